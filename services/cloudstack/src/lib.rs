//! CloudStack API signing implementation.
//!
//! This crate signs commands for the Apache CloudStack management API and
//! assembles them into HTTP requests.
//!
//! ## Overview
//!
//! CloudStack authenticates every call with an API key and a signature: the
//! parameters are sorted, url encoded and lower-cased, then signed with
//! HMAC-SHA1 keyed by the secret key. The signature is appended as the last
//! parameter.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cloudstack_sign::{Command, Config};
//! use cloudstack_sign_core::{Context, OsEnv, Result};
//!
//! fn main() -> Result<()> {
//!     // Load CLOUDSTACK_* variables for anything not set explicitly.
//!     let ctx = Context::new().with_env(OsEnv);
//!     let signer = Config::new()
//!         .with_scheme("https")
//!         .from_env(&ctx)?
//!         .build()?;
//!
//!     let cmd = Command::new("listZones").with_param("available", true);
//!     let req = signer.sign_command(&cmd)?.into_request()?;
//!
//!     println!("{}", req.uri());
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! ```bash
//! export CLOUDSTACK_API_KEY=your-api-key
//! export CLOUDSTACK_SECRET_KEY=your-secret-key
//! export CLOUDSTACK_HOST=cloud.example.com
//! export CLOUDSTACK_SCHEME=https        # Optional, defaults to http
//! export CLOUDSTACK_PORT=8080           # Optional
//! export CLOUDSTACK_PATH_PREFIX=client  # Optional, defaults to client
//! ```

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;

mod command;
pub use command::{Command, SignedCommand};
