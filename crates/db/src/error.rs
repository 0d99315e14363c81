use core::fmt::{self, Display};

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Input violated a check constraint.
    BadInput,
    /// No matching row, or the row belongs to someone else.
    NotFound,
    /// The row we are trying to insert already exists.
    AlreadyExists,
    /// Ran out of attempts at generating a unique quiz code.
    Exhausted,
    /// Unrecoverable error.
    Fatal,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BadInput => "Input rejected by the database.",
            Self::NotFound => "Record not found.",
            Self::AlreadyExists => "Record already exists.",
            Self::Exhausted => "Could not allocate a unique quiz code.",
            Self::Fatal => "Unexpected database error.",
        })
    }
}

impl std::error::Error for Error {}

impl From<tokio_postgres::Error> for Error {
    fn from(err: tokio_postgres::Error) -> Self {
        use tokio_postgres::error::SqlState;
        let Some(err) = err.as_db_error() else {
            log::error!("database failure: {err}");
            return Self::Fatal;
        };

        match err.code() {
            &SqlState::UNIQUE_VIOLATION => Self::AlreadyExists,
            &SqlState::CHECK_VIOLATION | &SqlState::STRING_DATA_RIGHT_TRUNCATION => Self::BadInput,
            &SqlState::FOREIGN_KEY_VIOLATION => Self::NotFound,
            _ => {
                log::error!("database error {}: {}", err.code().code(), err.message());
                Self::Fatal
            }
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
