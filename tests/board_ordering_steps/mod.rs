//! Step definitions for board ordering behaviour scenarios.

mod given;
mod then;
mod when;
pub mod world;
