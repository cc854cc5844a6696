use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReputationError {
    #[error("statistics counter overflow")]
    Overflow,
}
