//! Command implementations for the `cleanse` binary.

pub mod cleanse;
