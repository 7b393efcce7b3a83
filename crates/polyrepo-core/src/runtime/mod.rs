//! External programs
//!
//! This module provides:
//! - The process shim every external command goes through
//! - Detection of git and the package manager
//! - Preflight management of the React Native rename tool

pub mod check;
pub mod process;
pub mod tool;

pub use check::{check_runtimes, RuntimeInfo};
pub use process::{CommandRunner, SystemRunner};
pub use tool::{rename_tool, NpmTool};
