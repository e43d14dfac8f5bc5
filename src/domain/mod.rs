pub mod channel;
pub mod log;
pub mod store;
pub mod template;
