//! Library side of the `labstock` command-line tool.
//!
//! Argument parsing and table rendering live in the binary; the pipelines
//! here return plain result types so they can be driven from tests.

pub mod logging;
pub mod pipeline;
pub mod types;
