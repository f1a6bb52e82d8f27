use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConspiraError {
    #[error("astronomy source unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("malformed astronomy payload: {0}")]
    MalformedPayload(String),

    #[error("missing data source credential: {0}")]
    MissingCredential(String),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("unknown scoring preset: {0}")]
    UnknownPreset(String),

    #[error("invalid scoring profile: {0}")]
    InvalidProfile(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConspiraError {
    /// Errors the snapshot path may recover from by substituting the fallback observation.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable(_) | Self::MalformedPayload(_) | Self::MissingCredential(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ConspiraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_errors_are_recoverable() {
        assert!(ConspiraError::UpstreamUnavailable("503".to_string()).is_upstream());
        assert!(ConspiraError::MissingCredential("CONSPIRA_API_KEY".to_string()).is_upstream());
        assert!(!ConspiraError::ConfigParse("bad".to_string()).is_upstream());
    }
}
