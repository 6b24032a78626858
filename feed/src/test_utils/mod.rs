//! Test utilities
//!
//! Hand-written mocks and fixtures; the port traits are small enough that a
//! mocking framework buys nothing.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
