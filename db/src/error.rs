use sea_orm::DbErr;
use thiserror::Error;

/// Domain-level failures surfaced by model operations.
///
/// Everything except `Db` is an expected business-rule rejection that the API
/// layer reports with `error_code = none`; `Db` is an internal fault reported
/// as `unknown`.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Permission(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("assignment deadline has passed")]
    DeadlinePassed,

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl DomainError {
    /// True for business-rule rejections a client can act on, false for
    /// internal storage faults.
    pub fn is_expected(&self) -> bool {
        !matches!(self, DomainError::Db(_))
    }
}
