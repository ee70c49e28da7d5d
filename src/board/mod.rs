//! Kanban boards: columns, tasks and the ordering rules that bind them.
//!
//! Every column's tasks form a dense `0..n` sequence and every task sits in
//! a column that exists. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - The pure ordering engine in [`ordering`]
//! - The board façade in [`facade`]
//! - Load reconciliation in [`migration`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Session orchestration in [`services`]

pub mod adapters;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod facade;
pub mod migration;
pub mod ordering;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
