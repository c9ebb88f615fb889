//! Library side of the `tonumber` binary.

pub mod logging;
pub mod settings;
