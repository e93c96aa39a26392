//! Task data structure and related functionality.
//!
//! This module defines the core `Task` struct representing a single card on
//! the board, and the `TaskDraft` payload used to create or rewrite one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::fields::{Priority, Status};

/// A card on the board.
///
/// `id` and `created_at` are assigned by the store at creation and never
/// change afterwards; every other field is mutable through the store's
/// update operations. Stored field names follow the on-disk format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// The caller-supplied fields of a task: everything except `id` and
/// `created_at`.
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
}
