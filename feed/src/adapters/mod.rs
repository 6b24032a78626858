//! Adapters
//!
//! Concrete implementations of the domain ports.

pub mod container;
pub mod http;

pub use container::{render_page, Container, HtmlFileTarget, SharedContainer};
pub use http::EventsClient;
