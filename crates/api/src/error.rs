use core::fmt::{self, Display};
use hyper::StatusCode;
use model::{
    draft::{AttemptError, DraftError},
    order,
};

#[derive(Debug)]
pub enum Error {
    UnknownRoute,
    MethodNotAllowed,
    MissingUser,
    MalformedBody,
    InvalidCode,
    Draft(DraftError),
    Attempt(AttemptError),
    Order(order::Error),
    UnknownQuiz,
    UnknownSubmission,
    OwnQuiz,
    NotOwner,
    AlreadySubmitted,
    Fatal,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Draft(err) => return Display::fmt(err, f),
            Self::Attempt(err) => return Display::fmt(err, f),
            Self::Order(err) => return Display::fmt(err, f),
            Self::UnknownRoute => "Resource not found.",
            Self::MethodNotAllowed => "Method not allowed.",
            Self::MissingUser => "Please sign in first.",
            Self::MalformedBody => "Malformed request body.",
            Self::InvalidCode => "Please enter a valid 11-character code (format: XXXXX-XXXXX)",
            Self::UnknownQuiz => "Quiz not found. Please check the code and try again.",
            Self::UnknownSubmission => "Submission not found.",
            Self::OwnQuiz => "You cannot answer your own quiz.",
            Self::NotOwner => "Only the creator of this quiz may do that.",
            Self::AlreadySubmitted => "You have already answered this quiz.",
            Self::Fatal => "Oops! We have encountered an unrecoverable error on our end.",
        };
        f.write_str(text)
    }
}

impl Error {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::UnknownRoute | Self::UnknownQuiz | Self::UnknownSubmission => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::MissingUser => StatusCode::UNAUTHORIZED,
            Self::MalformedBody | Self::InvalidCode | Self::Draft(_) | Self::Attempt(_) | Self::Order(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::OwnQuiz | Self::NotOwner => StatusCode::FORBIDDEN,
            Self::AlreadySubmitted => StatusCode::CONFLICT,
            Self::Fatal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<db::error::Error> for Error {
    fn from(err: db::error::Error) -> Self {
        log::error!("unexpected store failure: {err}");
        Self::Fatal
    }
}

pub type Result<T> = core::result::Result<T, Error>;
