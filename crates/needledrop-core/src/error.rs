use thiserror::Error;

/// Errors that can occur during needledrop core operations.
#[derive(Debug, Error)]
pub enum NeedledropError {
    /// A publish timestamp was not valid RFC 3339.
    #[error("invalid timestamp {value:?}: {source}")]
    Timestamp {
        /// The offending timestamp string.
        value: String,
        /// The underlying chrono parse failure.
        #[source]
        source: chrono::ParseError,
    },

    /// Neither the edge-case table nor any title matcher could split the
    /// title into artist and work title. Adding the title to the grammar's
    /// edge cases resolves it.
    #[error("failed to extract artist and title from {title:?}")]
    Extraction {
        /// The video title that could not be split.
        title: String,
    },

    /// The grammar tables are unusable (empty marker set, blank entries).
    #[error("invalid grammar: {0}")]
    InvalidGrammar(String),

    /// A grammar document could not be deserialized.
    #[error("grammar deserialization error: {0}")]
    GrammarFormat(#[from] serde_json::Error),

    /// A regex pattern failed to compile (should not happen with the
    /// patterns built from a validated grammar).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),
}

/// Result type alias for needledrop core operations.
pub type Result<T> = std::result::Result<T, NeedledropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = NeedledropError::Extraction {
            title: "Some Untitled Upload".into(),
        };
        assert!(err.to_string().contains("Some Untitled Upload"));

        let err = NeedledropError::InvalidGrammar("no new-era markers".into());
        assert_eq!(err.to_string(), "invalid grammar: no new-era markers");
    }

    #[test]
    fn timestamp_error_names_value() {
        let source = chrono::DateTime::parse_from_rfc3339("yesterday").unwrap_err();
        let err = NeedledropError::Timestamp {
            value: "yesterday".into(),
            source,
        };
        assert!(err.to_string().contains("\"yesterday\""));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NeedledropError>();
    }
}
