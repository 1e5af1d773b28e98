//! Static identity/secret pair presented to the login endpoint.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, auth::Secret};

/// Identity/secret pair used only to obtain a token.
///
/// The pair is fixed for the lifetime of the cache that owns it. Field names default to the
/// `email`/`password` shape the target login API expects and can be overridden for services
/// that name them differently.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
	identity: String,
	secret: Secret,
	identity_field: Cow<'static, str>,
	secret_field: Cow<'static, str>,
}
impl Credentials {
	/// Default JSON field carrying the identity.
	pub const DEFAULT_IDENTITY_FIELD: &'static str = "email";
	/// Default JSON field carrying the secret.
	pub const DEFAULT_SECRET_FIELD: &'static str = "password";

	/// Creates credentials using the default field names.
	pub fn new(identity: impl Into<String>, secret: impl Into<String>) -> Self {
		Self {
			identity: identity.into(),
			secret: Secret::new(secret),
			identity_field: Cow::Borrowed(Self::DEFAULT_IDENTITY_FIELD),
			secret_field: Cow::Borrowed(Self::DEFAULT_SECRET_FIELD),
		}
	}

	/// Overrides the JSON field names used in the login body.
	pub fn with_field_names(
		mut self,
		identity_field: impl Into<Cow<'static, str>>,
		secret_field: impl Into<Cow<'static, str>>,
	) -> Self {
		self.identity_field = identity_field.into();
		self.secret_field = secret_field.into();

		self
	}

	/// Identity presented to the login endpoint.
	pub fn identity(&self) -> &str {
		&self.identity
	}

	/// Secret presented to the login endpoint.
	pub fn secret(&self) -> &Secret {
		&self.secret
	}

	/// Builds the JSON login body `{identity_field: identity, secret_field: secret}`.
	pub fn login_body(&self) -> Value {
		let mut body = Map::with_capacity(2);

		body.insert(self.identity_field.to_string(), Value::String(self.identity.clone()));
		body.insert(self.secret_field.to_string(), Value::String(self.secret.expose().to_owned()));

		Value::Object(body)
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("identity", &self.identity)
			.field("secret", &self.secret)
			.field("identity_field", &self.identity_field)
			.field("secret_field", &self.secret_field)
			.finish()
	}
}
