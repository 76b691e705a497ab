//! Utility modules shared by both binaries.

pub mod logging;
pub mod shutdown;

pub use shutdown::wait_for_signal;
