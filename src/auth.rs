//! Login credentials, the cached token model, and the token-field extraction table.

pub mod credentials;
pub mod fields;
pub mod secret;
pub mod token;

pub use credentials::*;
pub use fields::*;
pub use secret::*;
pub use token::*;
