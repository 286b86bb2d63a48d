use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: u32 = 1;

/// One directory path with its existence interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathEntry {
    pub path: String,
    pub added_on_revision: u64,
    pub last_seen_revision: u64,
    /// Whether the path still exists as of the latest scanned revision.
    pub present: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub latest_revision: u64,
    pub entries: Vec<PathEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitterEntry {
    pub name: String,
    pub commit_count: u64,
    pub first_revision: u64,
    pub last_revision: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitterOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository_path: String,
    pub latest_revision: u64,
    pub entries: Vec<CommitterEntry>,
}
