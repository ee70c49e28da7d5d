//! Adapter implementations of the board persistence ports.

pub mod file;
pub mod keyvalue;
pub mod memory;
pub mod postgres;
