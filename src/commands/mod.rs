//! CLI commands for sdk-release
//!
//! - **release**: bump versions, refresh samples, regenerate docs and tag

pub mod release;

pub use release::run_release;
