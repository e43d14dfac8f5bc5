//! Status-to-kind mapping.
//!
//! Keeps the dispatcher generic: any status-bearing business event can
//! drive notifications without the dispatcher knowing about bookings or
//! payments. The table is data; a missing status means "intentionally
//! no notification for this transition", never an error.

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct StatusKindMap {
    table: HashMap<String, String>,
}

impl StatusKindMap {
    /// Empty map; every status yields `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit (status, kind) pairs.
    pub fn from_pairs<I, S, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, K)>,
        S: Into<String>,
        K: Into<String>,
    {
        Self {
            table: pairs
                .into_iter()
                .map(|(s, k)| (s.into(), k.into()))
                .collect(),
        }
    }

    /// Default table covering the booking lifecycle.
    pub fn with_defaults() -> Self {
        Self::from_pairs([
            ("pending_payment", "payment-pending"),
            ("confirmed", "confirmed"),
            ("cancelled", "cancelled"),
            ("completed", "thank-you"),
        ])
    }

    /// Message kind for a business status, if one is configured.
    pub fn kind_for_status(&self, status: &str) -> Option<&str> {
        self.table.get(status).map(String::as_str)
    }
}
