//! Conversions from external infrastructure errors into domain errors.

use momentum_domain::MomentumError;
use reqwest::Error as HttpError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MomentumError);

impl From<InfraError> for MomentumError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MomentumError> for InfraError {
    fn from(value: MomentumError) -> Self {
        InfraError(value)
    }
}

trait IntoMomentumError {
    fn into_momentum(self) -> MomentumError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MomentumError */
/* -------------------------------------------------------------------------- */

impl IntoMomentumError for HttpError {
    fn into_momentum(self) -> MomentumError {
        if self.is_timeout() {
            return MomentumError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return MomentumError::Network(format!("HTTP connection failure: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => MomentumError::Auth(message),
                404 => MomentumError::NotFound(message),
                429 => MomentumError::Network(message),
                400..=499 => MomentumError::InvalidInput(message),
                _ => MomentumError::Network(message),
            };
        }

        if self.is_decode() {
            return MomentumError::Parse(format!("failed to decode HTTP response: {self}"));
        }

        if self.is_builder() {
            return MomentumError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        MomentumError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_momentum())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → MomentumError */
/* -------------------------------------------------------------------------- */

impl IntoMomentumError for UrlError {
    fn into_momentum(self) -> MomentumError {
        MomentumError::Config(format!("invalid URL: {self}"))
    }
}

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(value.into_momentum())
    }
}
