use entwine_schema::{build::BuildError, classify::ClassifyError};
use std::fmt;
use thiserror::Error as ThisError;

///
/// DefineError
///
/// Classified failure for one definition attempt. Stored in registry cells
/// and re-raised to every waiter, so it is cheap to clone.
///

#[derive(Clone, Debug, ThisError)]
#[error("{message}")]
pub struct DefineError {
    pub class: ErrorClass,
    pub message: String,
}

impl DefineError {
    pub fn new(class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            class,
            message: message.into(),
        }
    }

    /// Construct a configuration-class error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Configuration, message)
    }

    /// Construct a not-found-class error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::NotFound, message)
    }

    /// Construct an internal-class error for unexpected faults.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, message)
    }

    /// Wrap a fault raised by the external persistence-unit factory.
    pub fn factory<F: fmt::Display + ?Sized>(fault: &F) -> Self {
        Self::new(
            ErrorClass::Factory,
            format!("persistence unit factory failed: {fault}"),
        )
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {}", self.class, self.message)
    }
}

impl From<ClassifyError> for DefineError {
    fn from(err: ClassifyError) -> Self {
        Self::configuration(err.to_string())
    }
}

impl From<BuildError> for DefineError {
    fn from(err: BuildError) -> Self {
        Self::configuration(err.to_string())
    }
}

impl From<entwine_schema::Error> for DefineError {
    fn from(err: entwine_schema::Error) -> Self {
        Self::configuration(err.to_string())
    }
}

///
/// ErrorClass
/// Error taxonomy applied once at the definition-task boundary.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Configuration,
    Factory,
    Internal,
    NotFound,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Configuration => "configuration",
            Self::Factory => "factory",
            Self::Internal => "internal",
            Self::NotFound => "not_found",
        };
        write!(f, "{label}")
    }
}
