//! Corkboard: a Kanban task ordering and reconciliation engine.
//!
//! This crate keeps a board of columns and tasks consistent while tasks are
//! added, edited, dragged within a column and moved between columns, and
//! repairs boards loaded from older or damaged storage.
//!
//! # Architecture
//!
//! Corkboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (memory, JSON file,
//!   key-value document, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`board`]: Board aggregate, ordering engine, persistence and sessions

pub mod board;
