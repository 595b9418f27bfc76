//! Token parsing and range expansion.
//!
//! This module contains the per-line pipeline:
//! - [`token`] - classification of a trimmed token
//! - [`expand_v4`] / [`expand_v6`] - family-specific range enumeration
//! - [`line`] - dispatch, filtering, and the input loop

pub mod expand_v4;
pub mod expand_v6;
mod line;
mod token;

// Re-export public functions
pub use expand_v6::{V6Expansion, ENUMERATION_CAP};
pub use line::{expand_line, process_input, FamilyFilter, LineSummary, ProcessSummary};
pub use token::{parse_token, Token};
