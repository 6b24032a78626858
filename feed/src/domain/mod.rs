//! Domain layer
//!
//! - `event`: the event record data model
//! - `ports`: traits for the event source and the render target

pub mod event;
pub mod ports;

pub use event::{EventAction, EventRecord};
pub use ports::{EventSource, RenderTarget};
