//! Failure classification for SAS token fetches.
//!
//! Every failure observed while fetching a token is first captured as a
//! [`FetchFailure`] and then mapped by [`classify`] onto exactly one of two
//! tiers. The mapping is an ordered list of predicates; the first that
//! matches decides the tier:
//!
//! 1. the endpoint rejected the credential (HTTP 401) -> unrecoverable
//! 2. the endpoint is temporarily unreachable -> recoverable
//! 3. the request could not be constructed -> unrecoverable
//! 4. anything else -> recoverable

use http::header::InvalidHeaderValue;
use http::StatusCode;
use thiserror::Error;

/// Raw failure observed while fetching a token, before classification.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("auth endpoint rejected the credential (HTTP 401)")]
    Unauthorized,

    #[error("auth endpoint answered {status}, retry after {retry_after}")]
    RetryAfter { status: StatusCode, retry_after: String },

    #[error("invalid auth endpoint url: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("credential cannot be sent as a header value: {0}")]
    InvalidCredentialHeader(#[from] InvalidHeaderValue),

    #[error("unexpected response status {0}")]
    UnexpectedStatus(StatusCode),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("cannot parse token response body: {0}")]
    ResponseParse(#[from] serde_json::Error),
}

impl FetchFailure {
    /// Stable identifier of the failure category, used in messages and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchFailure::Unauthorized => "unauthorized",
            FetchFailure::RetryAfter { .. } => "retry_after",
            FetchFailure::InvalidEndpoint(_) => "invalid_endpoint",
            FetchFailure::InvalidCredentialHeader(_) => "invalid_credential_header",
            FetchFailure::UnexpectedStatus(_) => "unexpected_status",
            FetchFailure::Transport(e) if e.is_body() || e.is_decode() => "response_body",
            FetchFailure::Transport(_) => "transport",
            FetchFailure::ResponseParse(_) => "response_parse",
        }
    }

    fn is_unauthorized(&self) -> bool {
        match self {
            FetchFailure::Unauthorized => true,
            FetchFailure::UnexpectedStatus(status) => *status == StatusCode::UNAUTHORIZED,
            FetchFailure::Transport(e) => e.status() == Some(StatusCode::UNAUTHORIZED),
            _ => false,
        }
    }

    /// Conditions the transport itself marks as transient.
    fn is_retryable_transport(&self) -> bool {
        match self {
            FetchFailure::RetryAfter { .. } => true,
            // is_request covers connections dropped or reset mid-request
            FetchFailure::Transport(e) => e.is_connect() || e.is_timeout() || e.is_request(),
            _ => false,
        }
    }

    fn is_invalid_construction(&self) -> bool {
        match self {
            FetchFailure::InvalidEndpoint(_) | FetchFailure::InvalidCredentialHeader(_) => true,
            FetchFailure::Transport(e) => e.is_builder(),
            _ => false,
        }
    }
}

/// Recoverability tier of a classified failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Recoverable,
    Unrecoverable,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Tier::Recoverable => "recoverable",
            Tier::Unrecoverable => "unrecoverable",
        }
    }
}

/// Classified outcome of a failed token fetch.
///
/// `Recoverable` means the caller may try again later, `Unrecoverable` means
/// retrying with the same credential and configuration cannot succeed.
#[derive(Debug, Error)]
pub enum SasTokenError {
    #[error("{message}")]
    Recoverable {
        message: String,
        #[source]
        source: FetchFailure,
    },

    #[error("{message}")]
    Unrecoverable {
        message: String,
        #[source]
        source: FetchFailure,
    },
}

impl SasTokenError {
    pub fn tier(&self) -> Tier {
        match self {
            SasTokenError::Recoverable { .. } => Tier::Recoverable,
            SasTokenError::Unrecoverable { .. } => Tier::Unrecoverable,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.tier() == Tier::Recoverable
    }

    pub fn message(&self) -> &str {
        match self {
            SasTokenError::Recoverable { message, .. } => message,
            SasTokenError::Unrecoverable { message, .. } => message,
        }
    }

    /// The underlying failure that was classified.
    pub fn failure(&self) -> &FetchFailure {
        match self {
            SasTokenError::Recoverable { source, .. } => source,
            SasTokenError::Unrecoverable { source, .. } => source,
        }
    }
}

/// Map a raw failure onto its recoverability tier. First matching rule wins.
pub fn classify(auth_endpoint: &str, failure: FetchFailure) -> SasTokenError {
    if failure.is_unauthorized() {
        return SasTokenError::Unrecoverable {
            message: "Auth endpoint rejected the provided credential. Analytics publishing will be \
                      disabled. Update the auth token in configuration and restart the instance."
                .to_owned(),
            source: failure,
        };
    }

    if failure.is_retryable_transport() {
        return SasTokenError::Recoverable {
            message: format!("Provided authentication endpoint {} is not reachable.", auth_endpoint),
            source: failure,
        };
    }

    if failure.is_invalid_construction() {
        return SasTokenError::Unrecoverable {
            message: "Invalid analytics auth configuration provided. Analytics publishing will be \
                      disabled. Update the configuration and restart the instance."
                .to_owned(),
            source: failure,
        };
    }

    SasTokenError::Recoverable {
        message: format!("Failure '{}' occurred while fetching SAS token: {}", failure.kind(), failure),
        source: failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "https://auth.example/token";

    #[test]
    fn unauthorized_is_unrecoverable_and_asks_for_credential_update() {
        let err = classify(ENDPOINT, FetchFailure::Unauthorized);
        assert_eq!(err.tier(), Tier::Unrecoverable);
        assert!(err.message().contains("auth token"));
        assert!(err.message().contains("restart"));
    }

    #[test]
    fn unexpected_401_status_still_counts_as_unauthorized() {
        let err = classify(ENDPOINT, FetchFailure::UnexpectedStatus(StatusCode::UNAUTHORIZED));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn status_with_retry_after_is_recoverable_and_names_endpoint() {
        let err = classify(
            ENDPOINT,
            FetchFailure::RetryAfter {
                status: StatusCode::TOO_MANY_REQUESTS,
                retry_after: "30".to_owned(),
            },
        );
        assert!(err.is_recoverable());
        assert!(err.message().contains(ENDPOINT));
    }

    #[test]
    fn unparsable_endpoint_is_unrecoverable() {
        let parse_err = url::Url::parse("").unwrap_err();
        let err = classify("", FetchFailure::InvalidEndpoint(parse_err));
        assert_eq!(err.tier(), Tier::Unrecoverable);
        assert!(err.message().contains("configuration"));
    }

    #[test]
    fn bad_credential_header_is_unrecoverable() {
        let header_err = http::HeaderValue::from_str("Bearer a\nb").unwrap_err();
        let err = classify(ENDPOINT, FetchFailure::InvalidCredentialHeader(header_err));
        assert_eq!(err.tier(), Tier::Unrecoverable);
    }

    #[test]
    fn unexpected_status_falls_through_to_recoverable_with_kind() {
        let err = classify(ENDPOINT, FetchFailure::UnexpectedStatus(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(err.is_recoverable());
        assert!(err.message().contains("unexpected_status"));
        assert!(err.message().contains("500"));
    }

    #[test]
    fn parse_failure_is_recoverable_and_names_kind() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = classify(ENDPOINT, FetchFailure::ResponseParse(json_err));
        assert!(err.is_recoverable());
        assert!(err.message().contains("response_parse"));
        assert_eq!(err.failure().kind(), "response_parse");
    }

    #[test]
    fn classified_error_displays_its_message() {
        let err = classify(ENDPOINT, FetchFailure::Unauthorized);
        assert_eq!(err.to_string(), err.message());
        assert!(std::error::Error::source(&err).is_some());
    }
}
