//! Demonstrates guarding harness requests with the access gate: every call waits for a rate
//! slot, then reuses the cached login token against a mock login endpoint.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
use time::Duration;
use url::Url;
// self
use harness_access::{
	auth::Credentials,
	config::{AccessConfig, LoginConfig},
	gate::AccessGate,
	throttle::ThrottlePolicy,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let login_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/login");
			then.status(200).json_body(json!({
				"message": "Login realizado com sucesso",
				"authorization": "Bearer demo.jwt.value"
			}));
		})
		.await;
	let login = LoginConfig::new(
		Url::parse(&server.url("/login"))?,
		Credentials::new("fulano@qa.com", "teste"),
	);
	let config = AccessConfig::new(login)
		.with_throttle(ThrottlePolicy::new(5, Duration::seconds(2)))
		.with_http_timeout(Duration::seconds(5));
	let gate = AccessGate::from_config(config)?;

	for call in 1..=8 {
		let header = gate.authorization_header().await;

		println!("call {call}: Authorization = {header:?}");
	}

	// Eight admitted calls, one login.
	login_mock.assert_calls_async(1).await;

	Ok(())
}
