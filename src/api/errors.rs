use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("connect failure: {0}")]
    Connect(String),

    #[error("connect timeout")]
    ConnectTimeout,

    #[error("request timeout")]
    RequestTimeout,

    #[error("http error {status}")]
    Http {
        status: reqwest::StatusCode,
        retriable: bool,
    },

    #[error("could not encode request: {0}")]
    Encode(String),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("unknown: {0}")]
    Unknown(String),
}

impl ApiError {
    pub fn should_retry(&self) -> bool {
        match self {
            // Fatal errors - don't retry
            Self::InvalidUrl(_) => false,
            Self::Encode(_) => false,
            Self::Decode(_) => false,
            Self::Http { retriable, .. } => *retriable,

            // Temporary errors - retry
            Self::Connect(_) => true,
            Self::ConnectTimeout => true,
            Self::RequestTimeout => true,
            Self::Unknown(_) => true,
        }
    }

    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Http {
            status,
            retriable: status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS,
        }
    }

    pub fn from_reqwest_error(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            if err.is_connect() {
                Self::ConnectTimeout
            } else {
                Self::RequestTimeout
            }
        } else if let Some(status) = err.status() {
            Self::from_status(status)
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_connect() || err.is_request() {
            Self::Connect(err.to_string())
        } else {
            Self::Unknown(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_retry_classification() {
        assert!(ApiError::from_status(StatusCode::BAD_GATEWAY).should_retry());
        assert!(ApiError::from_status(StatusCode::TOO_MANY_REQUESTS).should_retry());
        assert!(!ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY).should_retry());
        assert!(!ApiError::Decode("eof".to_string()).should_retry());
        assert!(ApiError::RequestTimeout.should_retry());
    }

    #[test]
    fn test_invalid_url_converts() {
        let err: ApiError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
        assert!(!err.should_retry());
    }
}
