//! Channel classification for rendered message bodies.
//!
//! The gateway splits and bills by UTF-8 byte count, so classification
//! measures bytes, never characters. A template's declared class is a
//! hint from the author; [`ChannelClass::classify`] is authoritative.

use serde::{Deserialize, Serialize};

/// Maximum UTF-8 byte length deliverable over the short channel.
/// Protocol constant of the gateway, not configurable per template.
pub const SHORT_MAX_BYTES: usize = 90;

/// Nominal unit cost recorded per short-channel message.
const SHORT_UNIT_COST: f64 = 1.0;

/// Nominal unit cost recorded per long-channel message.
const LONG_UNIT_COST: f64 = 3.0;

/// The two delivery modes, distinguished by rendered byte length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelClass {
    Short,
    Long,
}

impl ChannelClass {
    /// Classify a rendered body by its UTF-8 byte length.
    pub fn classify(rendered_body: &str) -> Self {
        if rendered_body.len() <= SHORT_MAX_BYTES {
            ChannelClass::Short
        } else {
            ChannelClass::Long
        }
    }

    /// Nominal unit cost for one message on this channel.
    pub fn unit_cost(&self) -> f64 {
        match self {
            ChannelClass::Short => SHORT_UNIT_COST,
            ChannelClass::Long => LONG_UNIT_COST,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelClass::Short => "short",
            ChannelClass::Long => "long",
        }
    }
}

impl std::str::FromStr for ChannelClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(ChannelClass::Short),
            "long" => Ok(ChannelClass::Long),
            other => Err(format!("Unknown channel class: {}", other)),
        }
    }
}

impl std::fmt::Display for ChannelClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundary() {
        let at_limit = "a".repeat(90);
        assert_eq!(ChannelClass::classify(&at_limit), ChannelClass::Short);

        let over_limit = "a".repeat(91);
        assert_eq!(ChannelClass::classify(&over_limit), ChannelClass::Long);

        assert_eq!(ChannelClass::classify(""), ChannelClass::Short);
    }

    #[test]
    fn test_classify_counts_bytes_not_chars() {
        // 31 Hangul syllables: 31 chars but 93 bytes in UTF-8
        let korean = "가".repeat(31);
        assert_eq!(korean.chars().count(), 31);
        assert_eq!(korean.len(), 93);
        assert_eq!(ChannelClass::classify(&korean), ChannelClass::Long);

        // 30 syllables fit exactly at 90 bytes
        let shorter = "가".repeat(30);
        assert_eq!(ChannelClass::classify(&shorter), ChannelClass::Short);
    }

    #[test]
    fn test_unit_cost_ordering() {
        assert!(ChannelClass::Long.unit_cost() > ChannelClass::Short.unit_cost());
    }

    #[test]
    fn test_round_trip_str() {
        for class in [ChannelClass::Short, ChannelClass::Long] {
            assert_eq!(class.as_str().parse::<ChannelClass>().unwrap(), class);
        }
        assert!("sms".parse::<ChannelClass>().is_err());
    }
}
