//! Core components for signed CloudStack API requests.
//!
//! This crate provides the value types a request builder needs to send a
//! command to the CloudStack management API, and the traits it expects the
//! surrounding client to implement.
//!
//! ## Overview
//!
//! - [`RequestBody`]: the canonical, signed, url encoded parameters of one
//!   command, readable like a stream.
//! - [`Uri`]: an immutable request URI with copy-producing `with_*` mutators
//!   and a cached string form.
//! - [`SignQuery`], [`Endpoint`], [`ApiCommand`]: the collaborators these
//!   values are built from.
//! - [`Context`]: where configuration is read from.
//!
//! ## Example
//!
//! ```
//! use cloudstack_sign_core::hash::base64_hmac_sha1;
//! use cloudstack_sign_core::{ApiCommand, Endpoint, RequestBody, Result, SignQuery, Uri};
//! use serde_json::json;
//!
//! #[derive(Debug)]
//! struct Api {
//!     key: String,
//!     secret: String,
//! }
//!
//! impl SignQuery for Api {
//!     fn api_key(&self) -> &str {
//!         &self.key
//!     }
//!
//!     fn build_signature(&self, query: &str) -> Result<String> {
//!         Ok(base64_hmac_sha1(
//!             self.secret.as_bytes(),
//!             query.to_lowercase().as_bytes(),
//!         ))
//!     }
//! }
//!
//! impl Endpoint for Api {
//!     fn scheme(&self) -> &str {
//!         "https"
//!     }
//!
//!     fn host(&self) -> &str {
//!         "cloud.example.com"
//!     }
//!
//!     fn port(&self) -> Option<u16> {
//!         None
//!     }
//!
//!     fn path_prefix(&self) -> &str {
//!         "client"
//!     }
//! }
//!
//! struct ListZones<'a> {
//!     api: &'a Api,
//!     query: String,
//! }
//!
//! impl ApiCommand for ListZones<'_> {
//!     type Endpoint = Api;
//!
//!     fn endpoint(&self) -> &Api {
//!         self.api
//!     }
//!
//!     fn path(&self) -> &str {
//!         "api"
//!     }
//!
//!     fn compiled_query(&self) -> &str {
//!         &self.query
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let api = Api {
//!     key: "key".to_string(),
//!     secret: "secret".to_string(),
//! };
//!
//! let body = RequestBody::new(&api, "listZones", [("available", json!(true))])?;
//! let cmd = ListZones {
//!     api: &api,
//!     query: body.to_string(),
//! };
//!
//! let uri = Uri::from_command(&cmd);
//! assert!(uri
//!     .as_str()
//!     .starts_with("https://cloud.example.com/client/api?apikey=key&available=true"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: HMAC and base64 helpers
//! - [`param`]: parameter coercion and RFC 3986 encoding
//! - [`utils`]: redaction of secrets for `Debug` and logs

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod param;
pub mod utils;

mod context;
pub use context::Context;
pub use context::Env;
pub use context::NoopEnv;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;

mod api;
pub use api::{ApiCommand, Endpoint, SignQuery};

mod body;
pub use body::{Metadata, RequestBody};

mod uri;
pub use uri::Uri;
