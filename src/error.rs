use thiserror::Error;

pub type Result<T> = std::result::Result<T, SvnmapError>;

#[derive(Error, Debug)]
pub enum SvnmapError {
    #[error("Repository unreachable: {0}")]
    RepositoryUnreachable(String),
    #[error("Invalid location: {0}")]
    InvalidLocation(String),
    #[error("svnlook failed: {0}")]
    Backend(String),
    #[error("Unexpected svnlook output: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SvnmapError {
    /// Process exit code for this error. Pointing the tool at a working copy
    /// instead of a repository root gets its own code so scripts can tell it
    /// apart from a repository that simply cannot be reached.
    pub fn exit_code(&self) -> i32 {
        match self {
            SvnmapError::InvalidLocation(_) => 2,
            _ => 1,
        }
    }
}
