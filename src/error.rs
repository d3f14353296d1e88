use thiserror::Error;

/// Every failure the lab programs can surface.
#[derive(Error, Debug)]
pub enum LabError {
    #[error("Database error: {0}")]
    Driver(#[from] rusqlite::Error),

    #[error("Database handle for '{path}' is already closed")]
    HandleClosed { path: String },

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("Unknown order type: '{0}'")]
    UnknownOrderType(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// True when the error came straight from the SQLite driver.
    pub fn is_driver(&self) -> bool {
        matches!(self, LabError::Driver(_))
    }
}

impl From<toml::de::Error> for LabError {
    fn from(err: toml::de::Error) -> Self {
        LabError::config(err.to_string())
    }
}

pub type Result<T, E = LabError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_keeps_message() {
        let err: LabError = rusqlite::Error::InvalidQuery.into();
        assert!(err.is_driver());
        assert!(err.to_string().starts_with("Database error:"));
    }

    #[test]
    fn test_toml_error_becomes_config() {
        let err: LabError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(matches!(err, LabError::Config { .. }));
        assert!(!err.is_driver());
    }
}
