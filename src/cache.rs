//! Login-token cache with serialized refreshes.
//!
//! [`CredentialCache`] keeps one bearer token for its configured TTL. Lookups take a single async
//! lock and hold it across the freshness check, the login round trip, and the store, so callers
//! that arrive during a refresh wait for it and then share its token instead of starting their
//! own login.

// crates.io
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::Token,
	clock::{Clock, SystemClock},
	config::LoginConfig,
	error::{AuthError, TransportError},
	http::LoginHttpClient,
	obs::{self, Operation, OperationSpan, Outcome},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Cache specialized for the crate's default reqwest transport.
pub type ReqwestCredentialCache = CredentialCache<ReqwestHttpClient>;

/// Supplies a currently valid bearer token, logging in only when the cached one is missing or
/// older than the TTL.
pub struct CredentialCache<C>
where
	C: ?Sized + LoginHttpClient,
{
	http_client: Arc<C>,
	config: LoginConfig,
	clock: Arc<dyn Clock>,
	token: AsyncMutex<Option<Token>>,
}
impl<C> CredentialCache<C>
where
	C: ?Sized + LoginHttpClient,
{
	/// Creates an empty cache driven by the system clock.
	pub fn new(config: LoginConfig, http_client: impl Into<Arc<C>>) -> Self {
		Self::with_clock(config, http_client, Arc::new(SystemClock))
	}

	/// Creates an empty cache driven by `clock`.
	pub fn with_clock(
		config: LoginConfig,
		http_client: impl Into<Arc<C>>,
		clock: Arc<dyn Clock>,
	) -> Self {
		Self { http_client: http_client.into(), config, clock, token: AsyncMutex::new(None) }
	}

	/// Login settings used by this cache.
	pub fn config(&self) -> &LoginConfig {
		&self.config
	}

	/// Returns a valid token, or `None` when no token could be obtained.
	///
	/// Failures are reported through logging and metrics only; the caller proceeds on the
	/// degraded path and sees the remote service's own authorization error.
	pub async fn get_token(&self) -> Option<Token> {
		self.try_get_token().await.ok()
	}

	/// Returns a valid token, or the reason none could be obtained.
	///
	/// A failed login leaves any previously stored token in place.
	pub async fn try_get_token(&self) -> Result<Token> {
		let span = OperationSpan::new(Operation::Login, "get_token");

		obs::record_outcome(Operation::Login, Outcome::Attempt);

		let result = span
			.instrument(async move {
				let mut slot = self.token.lock().await;
				let now = self.clock.now();

				if let Some(current) = slot.as_ref().filter(|t| t.is_fresh_at(now, self.config.ttl))
				{
					obs::record_outcome(Operation::Login, Outcome::CacheHit);

					return Ok(current.clone());
				}

				let token = self.login().await?;

				*slot = Some(token.clone());

				Ok::<_, AuthError>(token)
			})
			.await;

		match &result {
			Ok(_) => obs::record_outcome(Operation::Login, Outcome::Success),
			Err(e) => {
				obs::log_login_failure(e);
				obs::record_outcome(Operation::Login, Outcome::Failure);
			},
		}

		result.map_err(Error::from)
	}

	/// Drops the cached token so the next lookup logs in again.
	///
	/// Waits for any in-flight refresh to finish first.
	pub async fn invalidate(&self) {
		self.token.lock().await.take();
	}

	/// Currently stored token, fresh or not, without triggering a login.
	pub async fn cached(&self) -> Option<Token> {
		self.token.lock().await.clone()
	}

	async fn login(&self) -> Result<Token, AuthError> {
		let body = self.config.credentials.login_body().to_string().into_bytes();
		let response = self
			.http_client
			.post_json(&self.config.endpoint, body)
			.await
			.map_err(TransportError::network)?;

		if !response.is_success() {
			return Err(AuthError::Rejected { status: response.status });
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
		let parsed: Value = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| AuthError::MalformedResponse { source })?;
		let value = self.config.fields.extract(&parsed)?;

		obs::log_login_success(value.expose().chars().count());

		Ok(Token::new(value, self.clock.now()))
	}
}
#[cfg(feature = "reqwest")]
impl CredentialCache<ReqwestHttpClient> {
	/// Creates a cache with its own reqwest transport bounded by `timeout`.
	pub fn with_timeout(config: LoginConfig, timeout: Duration) -> Result<Self> {
		let http_client = ReqwestHttpClient::with_timeout(timeout)?;

		Ok(Self::new(config, http_client))
	}
}
impl<C> Debug for CredentialCache<C>
where
	C: ?Sized + LoginHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialCache")
			.field("endpoint", &self.config.endpoint.as_str())
			.field("identity", &self.config.credentials.identity())
			.field("ttl", &self.config.ttl)
			.finish()
	}
}
