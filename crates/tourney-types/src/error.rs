use thiserror;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("malformed id '{value}': expected <prefix>_<32 hex chars>")]
    MalformedId { value: String },
    #[error("unknown id prefix '{prefix}'")]
    UnknownIdPrefix { prefix: String },
    #[error("'{value}' is not a valid amount")]
    InvalidMoney { value: String },
    #[error("'{value}' is not a valid time of day")]
    InvalidTime { value: String },
}
