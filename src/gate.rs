//! One-call admission for outbound harness requests.

// self
use crate::{
	_prelude::*,
	auth::Token,
	cache::CredentialCache,
	http::LoginHttpClient,
	throttle::RequestThrottler,
};
#[cfg(feature = "reqwest")] use crate::{config::AccessConfig, http::ReqwestHttpClient};

/// Pairs a [`RequestThrottler`] with a [`CredentialCache`] and applies them in order: first wait
/// for a rate slot, then fetch the token.
///
/// Construct one per process or per test run and share it by reference.
pub struct AccessGate<C>
where
	C: ?Sized + LoginHttpClient,
{
	/// Fixed-window throttle consulted before every request.
	pub throttler: RequestThrottler,
	/// Token cache consulted after admission.
	pub cache: CredentialCache<C>,
}
impl<C> AccessGate<C>
where
	C: ?Sized + LoginHttpClient,
{
	/// Combines existing components.
	pub fn from_parts(throttler: RequestThrottler, cache: CredentialCache<C>) -> Self {
		Self { throttler, cache }
	}

	/// Waits for a rate slot, then returns a valid token (or `None` when login failed).
	///
	/// A `None` still consumes the slot: the caller is expected to send its request anyway and
	/// observe the remote service's authorization failure.
	pub async fn admit(&self) -> Option<Token> {
		self.throttler.acquire().await;
		self.cache.get_token().await
	}

	/// Like [`admit`](Self::admit) but abandons the throttle wait when `cancel` fires.
	pub async fn admit_or_cancel(&self, cancel: &CancellationToken) -> Result<Option<Token>> {
		self.throttler.acquire_or_cancel(cancel).await?;

		Ok(self.cache.get_token().await)
	}

	/// Waits for a rate slot and returns the `Authorization` header value, if a token is
	/// available.
	pub async fn authorization_header(&self) -> Option<String> {
		self.admit().await.map(|token| token.authorization_header())
	}
}
#[cfg(feature = "reqwest")]
impl AccessGate<ReqwestHttpClient> {
	/// Builds both components from `config` with a reqwest login transport and the system clock.
	pub fn from_config(config: AccessConfig) -> Result<Self> {
		config.validate()?;

		let throttler = RequestThrottler::new(config.throttle);
		let cache = CredentialCache::with_timeout(config.login, config.http_timeout)?;

		Ok(Self::from_parts(throttler, cache))
	}

	/// Builds both components from the process environment.
	pub fn from_env() -> Result<Self> {
		Self::from_config(AccessConfig::from_env()?)
	}
}
impl<C> Debug for AccessGate<C>
where
	C: ?Sized + LoginHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessGate")
			.field("throttler", &self.throttler)
			.field("cache", &self.cache)
			.finish()
	}
}
