use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A fetch failure already folded into a view region.
    #[error("{what} unavailable: {reason}")]
    Unavailable { what: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// True for transport failures and non-2xx responses, the errors a
    /// view region turns into its "unable to load" state.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            AppError::Http(_) | AppError::Status { .. } | AppError::Unavailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_url_and_code() {
        let err = AppError::Status {
            url: "http://localhost:5000/api/props".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "HTTP 503 from http://localhost:5000/api/props");
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn unavailable_region_reads_as_a_sentence() {
        let err = AppError::Unavailable {
            what: "prop listing",
            reason: "HTTP 502 from http://localhost:5000/api/props".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "prop listing unavailable: HTTP 502 from http://localhost:5000/api/props"
        );
        assert!(err.is_fetch_failure());
    }

    #[test]
    fn config_error_is_not_a_fetch_failure() {
        let err = AppError::Config("PROPS_PER_PAGE must be a positive integer".to_string());
        assert!(!err.is_fetch_failure());
    }
}
