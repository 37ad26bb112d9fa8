/// Errors that can occur while connecting to a provider or fetching from it.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Credentials are missing or contradictory for the requested provider.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The configured source does not name a registered provider.
    #[error("invalid source \"{name}\"; valid values are {allowed}")]
    Validation { name: String, allowed: String },

    /// A provider-side identity could not be resolved unambiguously.
    #[error("lookup error: {0}")]
    Lookup(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("parse error: {0}")]
    Parse(String),

    /// A worker task panicked or was cancelled before producing a result.
    #[error("task failed: {0}")]
    Task(String),
}

impl FetchError {
    /// Returns true for errors raised before any network call was made.
    pub fn is_preflight(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_source_and_allowed_set() {
        let err = FetchError::Validation {
            name: "bitbucket".to_owned(),
            allowed: "\"github\", \"gitlab\"".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid source \"bitbucket\"; valid values are \"github\", \"gitlab\""
        );
    }

    #[test]
    fn preflight_errors() {
        assert!(FetchError::Configuration("x".into()).is_preflight());
        assert!(
            FetchError::Validation {
                name: "x".into(),
                allowed: "y".into()
            }
            .is_preflight()
        );
        assert!(!FetchError::Lookup("x".into()).is_preflight());
        assert!(!FetchError::Network("x".into()).is_preflight());
    }
}
