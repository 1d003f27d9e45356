use thiserror::Error;

/// Input-validation failures surfaced before the numeric core runs.
///
/// Indeterminate outcomes (zero pooled standard error, too few observations,
/// zero traffic rate) are not errors — the test and planning functions return
/// `None` for those and the caller decides how to present them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpliftError {
    #[error("invalid group: {0}")]
    InvalidGroup(String),

    #[error("invalid revenue value: {0}")]
    InvalidRevenue(String),

    #[error("invalid rate: {0}")]
    InvalidRate(String),
}
