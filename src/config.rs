//! Configuration for the credential cache, throttler, and login transport.
//!
//! Values come either from the builder methods or from the environment via
//! [`AccessConfig::from_env`]. Every setting has a default except the login URL and the
//! credentials.

// std
use std::str::FromStr;
// self
use crate::{
	_prelude::*,
	auth::{Credentials, TokenFields},
	error::ConfigError,
	throttle::ThrottlePolicy,
};

/// Login endpoint URL.
pub const ENV_LOGIN_URL: &str = "HARNESS_LOGIN_URL";
/// Login identity.
pub const ENV_IDENTITY: &str = "HARNESS_IDENTITY";
/// Login secret.
pub const ENV_SECRET: &str = "HARNESS_SECRET";
/// JSON field carrying the identity.
pub const ENV_IDENTITY_FIELD: &str = "HARNESS_IDENTITY_FIELD";
/// JSON field carrying the secret.
pub const ENV_SECRET_FIELD: &str = "HARNESS_SECRET_FIELD";
/// Token TTL in seconds.
pub const ENV_TOKEN_TTL_SECS: &str = "HARNESS_TOKEN_TTL_SECS";
/// Requests admitted per window.
pub const ENV_RATE_LIMIT: &str = "HARNESS_RATE_LIMIT";
/// Window length in milliseconds.
pub const ENV_RATE_WINDOW_MS: &str = "HARNESS_RATE_WINDOW_MS";
/// Login request timeout in seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "HARNESS_HTTP_TIMEOUT_SECS";

/// Settings consumed by [`CredentialCache`](crate::cache::CredentialCache).
#[derive(Clone, Debug)]
pub struct LoginConfig {
	/// Login endpoint receiving the credentials.
	pub endpoint: Url,
	/// Identity/secret pair.
	pub credentials: Credentials,
	/// Maximum age at which a cached token is still served.
	pub ttl: Duration,
	/// Response fields probed for the token.
	pub fields: TokenFields,
}
impl LoginConfig {
	/// Token lifetime used when no override is configured.
	pub const DEFAULT_TTL: Duration = Duration::minutes(30);

	/// Creates a configuration with the default TTL and field table.
	pub fn new(endpoint: Url, credentials: Credentials) -> Self {
		Self { endpoint, credentials, ttl: Self::DEFAULT_TTL, fields: TokenFields::default() }
	}

	/// Overrides the token TTL.
	pub fn with_ttl(mut self, ttl: Duration) -> Self {
		self.ttl = ttl;

		self
	}

	/// Overrides the token field table.
	pub fn with_fields(mut self, fields: TokenFields) -> Self {
		self.fields = fields;

		self
	}

	/// Checks that the TTL is positive.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if !self.ttl.is_positive() {
			return Err(ConfigError::NonPositiveDuration { name: "token TTL" });
		}

		Ok(())
	}
}

/// Complete configuration for an [`AccessGate`](crate::gate::AccessGate).
#[derive(Clone, Debug)]
pub struct AccessConfig {
	/// Credential cache settings.
	pub login: LoginConfig,
	/// Throttle policy.
	pub throttle: ThrottlePolicy,
	/// Upper bound for a single login request.
	pub http_timeout: Duration,
}
impl AccessConfig {
	/// Login timeout used when no override is configured.
	pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::seconds(30);

	/// Creates a configuration with the default throttle policy and timeout.
	pub fn new(login: LoginConfig) -> Self {
		Self {
			login,
			throttle: ThrottlePolicy::default(),
			http_timeout: Self::DEFAULT_HTTP_TIMEOUT,
		}
	}

	/// Overrides the throttle policy.
	pub fn with_throttle(mut self, throttle: ThrottlePolicy) -> Self {
		self.throttle = throttle;

		self
	}

	/// Overrides the login timeout.
	pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
		self.http_timeout = timeout;

		self
	}

	/// Reads the configuration from the process environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Reads the configuration through `lookup`, which maps variable names to values.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let required =
			|name: &'static str| lookup(name).ok_or(ConfigError::MissingVar { name });
		let endpoint = Url::parse(&required(ENV_LOGIN_URL)?)?;
		let mut credentials = Credentials::new(required(ENV_IDENTITY)?, required(ENV_SECRET)?);

		if lookup(ENV_IDENTITY_FIELD).is_some() || lookup(ENV_SECRET_FIELD).is_some() {
			credentials = credentials.with_field_names(
				lookup(ENV_IDENTITY_FIELD)
					.unwrap_or_else(|| Credentials::DEFAULT_IDENTITY_FIELD.into()),
				lookup(ENV_SECRET_FIELD)
					.unwrap_or_else(|| Credentials::DEFAULT_SECRET_FIELD.into()),
			);
		}

		let mut login = LoginConfig::new(endpoint, credentials);

		if let Some(secs) = parse_var::<i64, _>(&lookup, ENV_TOKEN_TTL_SECS)? {
			login = login.with_ttl(Duration::seconds(secs));
		}

		let mut throttle = ThrottlePolicy::default();

		if let Some(limit) = parse_var::<u32, _>(&lookup, ENV_RATE_LIMIT)? {
			throttle = ThrottlePolicy::new(limit, throttle.window);
		}
		if let Some(millis) = parse_var::<i64, _>(&lookup, ENV_RATE_WINDOW_MS)? {
			throttle = ThrottlePolicy::new(throttle.limit, Duration::milliseconds(millis));
		}

		let mut config = Self::new(login).with_throttle(throttle);

		if let Some(secs) = parse_var::<i64, _>(&lookup, ENV_HTTP_TIMEOUT_SECS)? {
			config = config.with_http_timeout(Duration::seconds(secs));
		}

		config.validate()?;

		Ok(config)
	}

	/// Validates every nested setting.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.login.validate()?;
		self.throttle.validate()?;

		if !self.http_timeout.is_positive() {
			return Err(ConfigError::NonPositiveDuration { name: "HTTP timeout" });
		}

		Ok(())
	}
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
	T: FromStr,
	F: Fn(&str) -> Option<String>,
{
	match lookup(name) {
		Some(raw) => raw
			.trim()
			.parse()
			.map(Some)
			.map_err(|_| ConfigError::InvalidVar { name, value: raw }),
		None => Ok(None),
	}
}
