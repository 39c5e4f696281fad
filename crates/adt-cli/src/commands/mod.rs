//! CLI command implementations.

pub mod descriptor;
pub mod generate;
pub mod info;
pub mod process;
