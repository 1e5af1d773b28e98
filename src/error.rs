//! Crate-level error types shared by the credential cache, throttler, and configuration.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Login failed; no token could be obtained.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Throttle suspension did not complete.
	#[error(transparent)]
	Throttle(#[from] ThrottleError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Failures raised while obtaining a token from the login endpoint.
///
/// [`CredentialCache::get_token`](crate::cache::CredentialCache::get_token) collapses every
/// variant into "no token available"; use
/// [`CredentialCache::try_get_token`](crate::cache::CredentialCache::try_get_token) to inspect
/// them.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Login request never produced a response (DNS, TCP, TLS, timeout).
	#[error("Login request failed before a response arrived.")]
	RequestFailed(#[from] TransportError),
	/// Login endpoint answered with a non-success status.
	#[error("Login endpoint rejected the credentials with status {status}.")]
	Rejected {
		/// HTTP status code returned by the endpoint.
		status: u16,
	},
	/// Login endpoint answered with a body that is not JSON.
	#[error("Login endpoint returned malformed JSON.")]
	MalformedResponse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// None of the candidate token fields carried a non-empty string.
	#[error("Login response does not contain any of the fields {candidates}.")]
	TokenFieldMissing {
		/// Comma separated candidate field names that were probed.
		candidates: String,
	},
	/// Extracted token is shorter than the accepted minimum.
	#[error("Token from field `{field}` has {length} characters; at least {minimum} are required.")]
	TokenTooShort {
		/// Field the value was read from.
		field: String,
		/// Trimmed length of the extracted value.
		length: usize,
		/// Minimum accepted length.
		minimum: usize,
	},
}

/// Failures raised by the request throttler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ThisError)]
pub enum ThrottleError {
	/// The wait for the next window was cancelled before it elapsed.
	#[error("Throttle wait was interrupted before the rate window reopened.")]
	Interrupted,
}

/// Configuration and validation failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// Login endpoint is not a valid URL.
	#[error("Login endpoint is not a valid URL.")]
	InvalidEndpoint(#[from] url::ParseError),
	/// Required environment variable is absent.
	#[error("Environment variable `{name}` is not set.")]
	MissingVar {
		/// Variable name.
		name: &'static str,
	},
	/// Environment variable is present but cannot be parsed.
	#[error("Environment variable `{name}` has an invalid value `{value}`.")]
	InvalidVar {
		/// Variable name.
		name: &'static str,
		/// Raw value that failed to parse.
		value: String,
	},
	/// Rate limit must admit at least one request per window.
	#[error("Rate limit must be greater than zero.")]
	ZeroLimit,
	/// Durations (TTL, window, timeout) must be positive.
	#[error("The {name} duration must be positive.")]
	NonPositiveDuration {
		/// Which duration failed validation.
		name: &'static str,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the login endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
