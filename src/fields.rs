//! Enumerations for task categorisation.
//!
//! This module defines the two fixed enumerations every task carries:
//! its board column (`Status`) and its urgency (`Priority`). The serialized
//! spellings are kebab-case and stable, since they are part of the stored
//! file format.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Board column a task lives in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
}

/// Task urgency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    Medium,
    High,
}
