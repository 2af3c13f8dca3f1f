use uuid::Uuid;

use super::catalog::FoodId;

/// Broad failure classes callers render differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Authorization,
    TransientStore,
}

#[derive(Debug, thiserror::Error)]
pub enum DiversityError {
    #[error("weekly goal must be a positive integer, got {0}")]
    InvalidGoal(String),
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("malformed request body: {0}")]
    InvalidBody(String),
    #[error("malformed query string: {0}")]
    InvalidQuery(String),
    #[error("`{0}` is not a YYYY-MM-DD date")]
    InvalidWeek(String),
    #[error("food {0} is not in the catalog")]
    UnknownFood(FoodId),
    #[error("food log {0} not found")]
    LogNotFound(Uuid),
    #[error("food log {log_id} belongs to another user")]
    NotOwner { log_id: Uuid },
    #[error("store unavailable: {0:#}")]
    Store(#[from] anyhow::Error),
}

impl DiversityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DiversityError::InvalidGoal(_)
            | DiversityError::MissingField(_)
            | DiversityError::InvalidBody(_)
            | DiversityError::InvalidQuery(_)
            | DiversityError::InvalidWeek(_) => ErrorKind::Validation,
            DiversityError::UnknownFood(_) | DiversityError::LogNotFound(_) => ErrorKind::NotFound,
            DiversityError::NotOwner { .. } => ErrorKind::Authorization,
            DiversityError::Store(_) => ErrorKind::TransientStore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_is_distinct_from_not_found() {
        let id = Uuid::new_v4();
        let missing = DiversityError::LogNotFound(id);
        let foreign = DiversityError::NotOwner { log_id: id };
        assert_eq!(missing.kind(), ErrorKind::NotFound);
        assert_eq!(foreign.kind(), ErrorKind::Authorization);
    }

    #[test]
    fn store_errors_keep_their_context() {
        let err: DiversityError = anyhow::anyhow!("connection refused")
            .context("list events")
            .into();
        assert_eq!(err.kind(), ErrorKind::TransientStore);
        assert!(err.to_string().contains("connection refused"));
    }
}
