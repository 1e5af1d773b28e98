//! Login-token cache and fixed-window request throttle for HTTP API test harnesses.
//!
//! Two cooperating components guard every outbound call a harness makes:
//!
//! - [`cache::CredentialCache`] logs in once, keeps the bearer token for its TTL, and
//!   serializes refreshes so concurrent callers never stampede the login endpoint.
//! - [`throttle::RequestThrottler`] admits at most `limit` calls per fixed window and
//!   suspends everyone else until the window rolls over.
//!
//! [`gate::AccessGate`] wires the two together in the order callers should use them.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod gate;
pub mod http;
pub mod obs;
pub mod throttle;

mod _prelude {
	pub use std::{
		borrow::Cow,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::Mutex;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use tokio_util::sync::CancellationToken;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use tokio_util::sync::CancellationToken;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
