//! Transport primitives for the login round trip.
//!
//! The credential cache only needs "send a JSON POST, get status + body back". That contract is
//! [`LoginHttpClient`]; [`ReqwestHttpClient`] is the default implementation and callers may plug
//! in any other client (or a fake in tests).

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
#[cfg(feature = "reqwest")] use reqwest::{header::CONTENT_TYPE, redirect::Policy};
// self
use crate::_prelude::*;
#[cfg(feature = "reqwest")] use crate::{config::AccessConfig, error::ConfigError};

/// Boxed future returned by [`LoginHttpClient::post_json`].
pub type LoginFuture<'a, Error> =
	Pin<Box<dyn Future<Output = Result<LoginResponse, Error>> + 'a + Send>>;

/// Abstraction over HTTP transports able to perform the login request.
///
/// Implementations must enforce their own request timeout. The credential cache holds its lock
/// across this call, so an unbounded request would stall every other caller.
pub trait LoginHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Sends `body` as a JSON POST to `url` and returns the raw response.
	fn post_json<'a>(
		&'a self,
		url: &'a Url,
		body: Vec<u8>,
	) -> LoginFuture<'a, Self::TransportError>;
}

/// Status and body of a login response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}
impl LoginResponse {
	/// Creates a response from its parts.
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self { status, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
/// Login requests should not follow redirects; a redirected login is treated as a rejection.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Builds a client bounded by [`AccessConfig::DEFAULT_HTTP_TIMEOUT`].
	pub fn new() -> Result<Self, ConfigError> {
		Self::with_timeout(AccessConfig::DEFAULT_HTTP_TIMEOUT)
	}

	/// Wraps an existing reqwest [`ReqwestClient`].
	///
	/// The client is used as is: configure its request timeout before wrapping it, since the
	/// credential cache holds its lock for the whole login round trip.
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Builds a client that gives up on any request after `timeout` and never follows redirects.
	pub fn with_timeout(timeout: Duration) -> Result<Self, ConfigError> {
		let timeout = std::time::Duration::try_from(timeout)
			.map_err(|_| ConfigError::NonPositiveDuration { name: "HTTP timeout" })?;
		let client = ReqwestClient::builder().timeout(timeout).redirect(Policy::none()).build()?;

		Ok(Self(client))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl LoginHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn post_json<'a>(
		&'a self,
		url: &'a Url,
		body: Vec<u8>,
	) -> LoginFuture<'a, Self::TransportError> {
		Box::pin(async move {
			let response = self
				.0
				.post(url.clone())
				.header(CONTENT_TYPE, "application/json")
				.body(body)
				.send()
				.await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(LoginResponse { status, body })
		})
	}
}
