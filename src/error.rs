use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    io::Error as IoError,
};

#[derive(Debug)]
pub enum WashError {
    Io(IoError),
    /// Bad run configuration, e.g. an unknown normalization step name.
    Config(String),
    /// Malformed table data (mapping TSV or look-alike group file).
    Table(String),
    AnyHow(anyhow::Error),
    Common(String),
}

impl Error for WashError {}

impl Display for WashError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "WashError: ")?;
        match self {
            Self::Io(e) => Display::fmt(e, f),
            Self::Config(e) => Display::fmt(e, f),
            Self::Table(e) => Display::fmt(e, f),
            Self::AnyHow(e) => Display::fmt(e, f),
            Self::Common(e) => Display::fmt(e, f),
        }
    }
}

impl From<IoError> for WashError {
    fn from(value: IoError) -> Self {
        Self::Io(value)
    }
}

impl From<anyhow::Error> for WashError {
    fn from(value: anyhow::Error) -> Self {
        Self::AnyHow(value)
    }
}

impl From<String> for WashError {
    fn from(value: String) -> Self {
        Self::Common(value)
    }
}

impl From<&str> for WashError {
    fn from(value: &str) -> Self {
        Self::Common(value.into())
    }
}
