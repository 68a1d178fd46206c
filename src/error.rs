use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl StoreError {
    pub fn league_not_found(league_id: &str) -> Self {
        Self::NotFound(format!("league '{league_id}' not found"))
    }

    pub fn team_not_found(league_id: &str, team_name: &str) -> Self {
        Self::NotFound(format!(
            "team '{team_name}' not found in league '{league_id}'"
        ))
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
