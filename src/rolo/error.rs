use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoloError {
    #[error("Sorry, invalid phone number, must be 10 digits")]
    InvalidPhone,

    #[error("Sorry, phone number must start with '{0}'")]
    PhoneBadPrefix(String),

    #[error("Sorry, phone number already exists")]
    PhoneExists,

    #[error("Sorry, invalid date format, must be DD.MM.YYYY")]
    InvalidDate,

    #[error("Sorry, invalid email address")]
    InvalidEmail,

    #[error("Sorry, name cannot be empty")]
    EmptyName,

    #[error("Name must be a single word containing only letters")]
    InvalidName,

    #[error("Name must be at least {0} characters long")]
    NameTooShort(usize),

    #[error("Sorry, address cannot be empty")]
    EmptyAddress,

    #[error("Sorry, contact not found")]
    ContactNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RoloError {
    /// True for errors raised when a field constructor (or a policy check)
    /// rejects its input. The dispatcher renders these as `Error: <message>`.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RoloError::InvalidPhone
                | RoloError::PhoneBadPrefix(_)
                | RoloError::PhoneExists
                | RoloError::InvalidDate
                | RoloError::InvalidEmail
                | RoloError::EmptyName
                | RoloError::InvalidName
                | RoloError::NameTooShort(_)
                | RoloError::EmptyAddress
        )
    }
}

pub type Result<T> = std::result::Result<T, RoloError>;
