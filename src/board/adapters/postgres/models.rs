//! Diesel row models for board persistence.

use super::schema::boards;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for stored boards.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Normalised account key.
    pub account_key: String,
    /// Board document payload.
    pub document: Value,
    /// Last save timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for stored boards.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = boards)]
pub struct NewBoardRow {
    /// Normalised account key.
    pub account_key: String,
    /// Board document payload.
    pub document: Value,
    /// Save timestamp.
    pub updated_at: DateTime<Utc>,
}
