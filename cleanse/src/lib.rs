// cleanse/src/lib.rs
//! # cleanse CLI
//!
//! Terminal front end for the `cleanse-core` mirror sanitizer: argument
//! parsing, logging setup, themed console output and the run command.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
