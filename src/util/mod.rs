//! Shared utilities.

pub mod clock;
pub mod memory;
pub mod status;
pub mod telemetry;

pub use clock::*;
pub use memory::ProcessMemory;
pub use status::StatusFile;
pub use telemetry::*;
