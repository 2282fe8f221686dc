//! Credentials and request signing for the FTX REST API
//!
//! Private endpoints are authenticated with an HMAC-SHA256 signature over a
//! fixed payload template:
//!
//! ```text
//! <nonce><METHOD>/api/<endpoint>[?<query> | <json body>]
//! ```
//!
//! The signature is sent hex encoded together with the API key and the nonce.
//!
//! # Example
//!
//! ```no_run
//! use ftx_auth::{Credentials, RequestSigner, SignedParams};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::from_env()?;
//! let signer = RequestSigner::new(&creds);
//! let signature = signer.sign("GET", "account", SignedParams::None);
//! println!("nonce {} signature {}", signer.nonce(), signature);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod headers;

pub use credentials::{generate_nonce, signature_payload, Credentials, RequestSigner, SignedParams};
pub use error::{AuthError, AuthResult};
pub use headers::AuthHeaders;
