//! Engine test support utilities
//!
//! Shared helpers for the engine's unit and integration tests.

pub mod test_logging;
