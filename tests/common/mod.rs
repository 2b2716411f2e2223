//! Shared test helpers

pub mod fixtures;
pub mod logs;
pub mod mock_transport;
