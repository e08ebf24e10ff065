use std::{error::Error, fmt};

pub mod client;
pub mod database;
pub mod memory;

#[derive(Debug)]
pub enum RequestError {
    /// The addressed record does not exist. Carries the message for the client.
    NotFound(String),
    /// The request was understood but violates a directory rule.
    Invalid(String),
    Other(Box<dyn Error + Send + Sync>),
}

impl RequestError {
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Self::Invalid(message.into())
    }

    pub fn other<T: Error + Send + Sync + 'static>(why: T) -> Self {
        Self::Other(Box::new(why))
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(message) | Self::Invalid(message) => f.write_str(message),
            Self::Other(why) => write!(f, "{}", why),
        }
    }
}

impl Error for RequestError {}

impl From<Box<dyn Error + Send + Sync>> for RequestError {
    fn from(value: Box<dyn Error + Send + Sync>) -> Self {
        RequestError::Other(value)
    }
}

impl From<database::DatabaseError> for RequestError {
    fn from(value: database::DatabaseError) -> Self {
        match value {
            database::DatabaseError::NotFound => Self::not_found("Record not found"),
            database::DatabaseError::AlreadyExists => {
                Self::invalid("Record already exists")
            }
            database::DatabaseError::ForeignKeyViolation => {
                Self::invalid("Record is referenced by or references another record")
            }
            database::DatabaseError::Other(why) => Self::Other(why),
        }
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
