use std::fmt::{Debug, Formatter};

use super::constants::*;
use crate::{Credential, RequestSigner};
use cloudstack_sign_core::{utils::Redact, Context, Error, Result};

/// Config carries all the configuration for the CloudStack API.
#[derive(Clone, Default)]
pub struct Config {
    /// `api_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSTACK_API_KEY`]
    pub api_key: Option<String>,
    /// `secret_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSTACK_SECRET_KEY`]
    pub secret_key: Option<String>,
    /// `scheme` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSTACK_SCHEME`]
    /// - default to `http`
    pub scheme: Option<String>,
    /// `host` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSTACK_HOST`]
    pub host: Option<String>,
    /// `port` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSTACK_PORT`]
    /// - left out of the URI if unset
    pub port: Option<u16>,
    /// `path_prefix` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`CLOUDSTACK_PATH_PREFIX`]
    /// - default to `client`
    pub path_prefix: Option<String>,
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set api_key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set secret_key
    pub fn with_secret_key(mut self, secret_key: impl Into<String>) -> Self {
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set scheme
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    /// Set host
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set port
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set path_prefix
    pub fn with_path_prefix(mut self, path_prefix: impl Into<String>) -> Self {
        self.path_prefix = Some(path_prefix.into());
        self
    }

    /// Load config from env.
    ///
    /// Fields that are already set are kept. An unparsable
    /// [`CLOUDSTACK_PORT`] is an error.
    pub fn from_env(mut self, ctx: &Context) -> Result<Self> {
        if let Some(v) = ctx.env_var(CLOUDSTACK_API_KEY) {
            self.api_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CLOUDSTACK_SECRET_KEY) {
            self.secret_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CLOUDSTACK_SCHEME) {
            self.scheme.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CLOUDSTACK_HOST) {
            self.host.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(CLOUDSTACK_PORT) {
            if self.port.is_none() {
                let port = v.parse::<u16>().map_err(|e| {
                    Error::config_invalid(format!("{CLOUDSTACK_PORT} is not a valid port: {v}"))
                        .with_source(e)
                })?;
                self.port = Some(port);
            }
        }
        if let Some(v) = ctx.env_var(CLOUDSTACK_PATH_PREFIX) {
            self.path_prefix.get_or_insert(v);
        }

        Ok(self)
    }

    /// Validate the config and build a [`RequestSigner`] from it.
    pub fn build(self) -> Result<RequestSigner> {
        let api_key = self
            .api_key
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("api_key is required"))?;
        let secret_key = self
            .secret_key
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("secret_key is required"))?;
        let host = self
            .host
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid("host is required"))?;

        let scheme = self
            .scheme
            .unwrap_or_else(|| DEFAULT_SCHEME.to_string())
            .to_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(Error::config_invalid(format!(
                "scheme must be http or https, got {scheme}"
            )));
        }

        let mut signer = RequestSigner::new(Credential::new(api_key, secret_key), &host)
            .with_scheme(&scheme)
            .with_path_prefix(self.path_prefix.as_deref().unwrap_or(DEFAULT_PATH_PREFIX));
        if let Some(port) = self.port {
            signer = signer.with_port(port);
        }

        Ok(signer)
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(Redact::from))
            .field("secret_key", &self.secret_key.as_ref().map(Redact::from))
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("path_prefix", &self.path_prefix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use cloudstack_sign_core::{Endpoint, ErrorKind, SignQuery, StaticEnv};

    use super::*;

    fn ctx(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_from_env() -> Result<()> {
        let ctx = ctx(&[
            (CLOUDSTACK_API_KEY, "env_key"),
            (CLOUDSTACK_SECRET_KEY, "env_secret"),
            (CLOUDSTACK_SCHEME, "https"),
            (CLOUDSTACK_HOST, "cs.example.com"),
            (CLOUDSTACK_PORT, "8443"),
            (CLOUDSTACK_PATH_PREFIX, "cloud"),
        ]);

        let config = Config::new().from_env(&ctx)?;
        assert_eq!(config.api_key.as_deref(), Some("env_key"));
        assert_eq!(config.secret_key.as_deref(), Some("env_secret"));
        assert_eq!(config.scheme.as_deref(), Some("https"));
        assert_eq!(config.host.as_deref(), Some("cs.example.com"));
        assert_eq!(config.port, Some(8443));
        assert_eq!(config.path_prefix.as_deref(), Some("cloud"));
        Ok(())
    }

    #[test]
    fn test_from_env_keeps_explicit_values() -> Result<()> {
        let ctx = ctx(&[
            (CLOUDSTACK_API_KEY, "env_key"),
            (CLOUDSTACK_PORT, "not a port"),
        ]);

        let config = Config::new()
            .with_api_key("explicit_key")
            .with_port(8080)
            .from_env(&ctx)?;
        assert_eq!(config.api_key.as_deref(), Some("explicit_key"));
        assert_eq!(config.port, Some(8080));
        Ok(())
    }

    #[test]
    fn test_from_env_invalid_port() {
        let ctx = ctx(&[(CLOUDSTACK_PORT, "70000")]);

        let err = Config::new().from_env(&ctx).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert!(err.to_string().contains("70000"));
    }

    #[test]
    fn test_build_defaults() -> Result<()> {
        let signer = Config::new()
            .with_api_key("key")
            .with_secret_key("secret")
            .with_host("cs.local")
            .build()?;

        assert_eq!(signer.api_key(), "key");
        assert_eq!(signer.scheme(), "http");
        assert_eq!(signer.host(), "cs.local");
        assert_eq!(signer.port(), None);
        assert_eq!(signer.path_prefix(), "client");
        Ok(())
    }

    #[test]
    fn test_build_missing_fields() {
        let cases = vec![
            (Config::new().with_secret_key("s").with_host("h"), "api_key"),
            (Config::new().with_api_key("k").with_host("h"), "secret_key"),
            (Config::new().with_api_key("k").with_secret_key("s"), "host"),
            (
                Config::new()
                    .with_api_key("")
                    .with_secret_key("s")
                    .with_host("h"),
                "api_key",
            ),
        ];

        for (config, field) in cases {
            let err = config.build().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
            assert!(err.to_string().contains(field), "{err}");
        }
    }

    #[test]
    fn test_build_invalid_scheme() {
        let err = Config::new()
            .with_api_key("k")
            .with_secret_key("s")
            .with_host("h")
            .with_scheme("ftp")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_debug_is_redacted() {
        let config = Config::new()
            .with_api_key("plgWJfZK4gyS3mOMTVmjUVg")
            .with_secret_key("secret");
        let s = format!("{config:?}");

        assert!(s.contains("plg***UVg"), "{s}");
        assert!(!s.contains("secret\""), "{s}");
    }
}
