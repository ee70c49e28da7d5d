//! `PostgreSQL` adapter storing one JSONB board document per account.
//!
//! The `boards` table is created by the SQL under `migrations/`, applied
//! out of band with the diesel CLI (`diesel migration run`); the adapter
//! never alters the schema. The `account_key` column is sized to
//! [`AccountKey::MAX_LENGTH`](crate::board::domain::AccountKey::MAX_LENGTH).

mod models;
mod repository;
mod schema;

pub use repository::{BoardPgPool, PostgresBoardStore};
