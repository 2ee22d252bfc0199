//! Display formatting for terminal output

pub mod preview;

pub use preview::format_preview;
