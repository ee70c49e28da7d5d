//! Board columns.

use super::ColumnId;
use serde::{Deserialize, Serialize};

/// A named, ordered bucket of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: String,
    order: usize,
}

impl Column {
    /// Creates a column at the given left-to-right position.
    #[must_use]
    pub fn new(id: ColumnId, title: impl Into<String>, order: usize) -> Self {
        Self {
            id,
            title: title.into(),
            order,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the zero-based display position.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    pub(crate) fn rename(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub(crate) const fn set_order(&mut self, order: usize) {
        self.order = order;
    }
}
