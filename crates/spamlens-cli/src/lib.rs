//! SpamLens command-line front end
//!
//! Argument parsing, file-backed pixel sources, and the JSON report the
//! `spamlens` binary prints.

pub mod cli;
pub mod decode;
pub mod report;

pub use cli::{Cli, Commands, EngineArgs};
pub use decode::{decode_bytes, submissions, ImageFile};
pub use report::Report;
