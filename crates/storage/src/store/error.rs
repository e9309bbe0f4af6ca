#![forbid(unsafe_code)]

use mt_core::auth::Role;
use mt_core::contract::ValidationError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    Invalid(ValidationError),
    InvalidInput(&'static str),
    UnknownId,
    UnknownProject,
    DuplicateId,
    Forbidden { required: Role },
    ExecutionLocked,
    ImmutableField(&'static str),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "invalid record: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::UnknownId => write!(f, "unknown id"),
            Self::UnknownProject => write!(f, "unknown project"),
            Self::DuplicateId => write!(f, "duplicate id"),
            Self::Forbidden { required } => {
                write!(f, "forbidden (requires role {})", required.as_str())
            }
            Self::ExecutionLocked => {
                write!(f, "execution record locked until the contract is signed")
            }
            Self::ImmutableField(field) => {
                write!(f, "field is immutable after creation: {field}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Invalid(value)
    }
}
