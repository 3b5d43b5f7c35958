use std::fmt::Display;

#[derive(Debug)]
pub enum LipidannotError {
    ConfigReadingError(ConfigReadingError),
    Other(String),
}

pub type Result<T> = std::result::Result<T, LipidannotError>;

impl Display for LipidannotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl LipidannotError {
    pub fn custom(msg: impl Display) -> Self {
        Self::Other(msg.to_string())
    }
}

#[derive(Debug)]
pub enum ConfigReadingError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    InvalidTableError(InvalidTableError),
}

#[derive(Debug)]
pub enum InvalidTableError {
    EmptyTable { polarity: &'static str },
    NonFiniteDelta { name: String },
}

impl From<InvalidTableError> for ConfigReadingError {
    fn from(e: InvalidTableError) -> Self {
        ConfigReadingError::InvalidTableError(e)
    }
}

impl From<std::io::Error> for ConfigReadingError {
    fn from(e: std::io::Error) -> Self {
        ConfigReadingError::IoError(e)
    }
}

impl From<serde_json::Error> for ConfigReadingError {
    fn from(e: serde_json::Error) -> Self {
        ConfigReadingError::JsonError(e)
    }
}

impl<T: Into<ConfigReadingError>> From<T> for LipidannotError {
    fn from(e: T) -> Self {
        LipidannotError::ConfigReadingError(e.into())
    }
}
