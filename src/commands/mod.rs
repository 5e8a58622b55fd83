//! Command implementations
//!
//! Each module corresponds to one CLI front end.

pub mod mailgate;
pub mod ping;

// Re-export commonly used types
pub use mailgate::MailArgs;
