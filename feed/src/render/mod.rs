//! Rendering
//!
//! Event records to HTML fragments, plus the fixed placeholders.

pub mod event;
pub mod timestamp;

pub use event::{
    escape_html, render_event, render_message, EMPTY_PLACEHOLDER, ERROR_PLACEHOLDER,
    LOADING_PLACEHOLDER,
};
pub use timestamp::{format_timestamp, parse_timestamp, INVALID_TIMESTAMP, MISSING_TIMESTAMP};
