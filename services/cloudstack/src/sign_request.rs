//! CloudStack API request signer
use http::Method;
use log::debug;

use super::constants::*;
use crate::{Command, Credential, SignedCommand};
use cloudstack_sign_core::hash::base64_hmac_sha1;
use cloudstack_sign_core::{Endpoint, Error, RequestBody, Result, SignQuery};

/// RequestSigner that implements CloudStack API request signing.
///
/// The signature is the base64 encoded HMAC-SHA1 of the lower-cased
/// canonical query, keyed with the secret key.
///
/// - [Signing API Requests](https://docs.cloudstack.apache.org/en/latest/developersguide/dev.html#signing-api-requests)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credential: Credential,
    scheme: String,
    host: String,
    port: Option<u16>,
    path_prefix: String,
}

impl RequestSigner {
    /// Create a signer for the API served at `host`.
    pub fn new(credential: Credential, host: &str) -> Self {
        Self {
            credential,
            scheme: DEFAULT_SCHEME.to_string(),
            host: host.to_string(),
            port: None,
            path_prefix: DEFAULT_PATH_PREFIX.to_string(),
        }
    }

    /// Set the scheme, `http` by default.
    pub fn with_scheme(mut self, scheme: &str) -> Self {
        self.scheme = scheme.to_string();
        self
    }

    /// Set the port, left out of the URI by default.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the path prefix, `client` by default.
    pub fn with_path_prefix(mut self, path_prefix: &str) -> Self {
        self.path_prefix = path_prefix.to_string();
        self
    }

    /// The credential used to sign.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Sign a command, producing its body and everything needed to send it.
    pub fn sign_command(&self, command: &Command) -> Result<SignedCommand<'_>> {
        if command.method() != Method::GET && command.method() != Method::POST {
            return Err(Error::invalid_argument(format!(
                "unsupported method {} for command {}, expected GET or POST",
                command.method(),
                command.name()
            )));
        }

        debug!("signing command {} for {}", command.name(), self.host);
        let body = RequestBody::new(self, command.name(), command.params().iter().cloned())?;

        Ok(SignedCommand::new(self, command, body))
    }
}

impl SignQuery for RequestSigner {
    fn api_key(&self) -> &str {
        &self.credential.api_key
    }

    fn build_signature(&self, query: &str) -> Result<String> {
        if !self.credential.is_valid() {
            return Err(Error::config_invalid(
                "api_key and secret_key are required to sign requests",
            ));
        }

        Ok(base64_hmac_sha1(
            self.credential.secret_key.as_bytes(),
            query.to_lowercase().as_bytes(),
        ))
    }
}

impl Endpoint for RequestSigner {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> Option<u16> {
        self.port
    }

    fn path_prefix(&self) -> &str {
        &self.path_prefix
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use cloudstack_sign_core::ErrorKind;

    fn test_signer() -> RequestSigner {
        RequestSigner::new(Credential::new("apikey123", "secret456"), "cs.local")
    }

    #[test]
    fn test_sign_documented_example() -> Result<()> {
        // Example from the CloudStack developer guide.
        let signer = RequestSigner::new(
            Credential::new(
                "plgWJfZK4gyS3mOMTVmjUVg-X-jlWlnfaUJ9GAbBbf9EdM-kAYMmAiLqzzq1ElZLYq_u38zCm0bewzGUdP66mg",
                "VDaACYb0LV9eNjTetIOElcVQkvJck_J_QljX_FcHRj87ZKiy0z0ty0ZsYBkoXkY9b7eq1EhwJaw7FF3akA3KBQ",
            ),
            "localhost",
        );

        let signed = signer.sign_command(&Command::new("listUsers"))?;
        assert_eq!(
            signed.body().to_string(),
            "apikey=plgWJfZK4gyS3mOMTVmjUVg-X-jlWlnfaUJ9GAbBbf9EdM-kAYMmAiLqzzq1ElZLYq_u38zCm0bewzGUdP66mg\
             &command=listUsers&response=json&signature=TTpdDq%2F7j%2FJ58XCRHomKoQXEQds%3D"
        );
        Ok(())
    }

    #[test]
    fn test_sign_with_params() -> Result<()> {
        let cmd = Command::new("listThings")
            .with_param("Name", "test")
            .with_param("Enabled", true)
            .with_param("Count", 0);

        let signer = test_signer();
        let signed = signer.sign_command(&cmd)?;
        assert_eq!(
            signed.body().to_string(),
            "apikey=apikey123&command=listThings&count=0&enabled=true&name=test&response=json\
             &signature=%2BDZAjbnCfG6hz%2BJd5bNnqA62OiY%3D"
        );
        Ok(())
    }

    #[test]
    fn test_sign_encoded_values() -> Result<()> {
        let cmd = Command::new("deployVirtualMachine")
            .with_param("zoneId", "a1b2")
            .with_param("displayName", "my vm / test")
            .with_param("keypair", "");

        let signer = test_signer();
        let signed = signer.sign_command(&cmd)?;
        assert_eq!(
            signed.body().canonical_query(),
            "apikey=apikey123&command=deployVirtualMachine&displayname=my%20vm%20%2F%20test&response=json&zoneid=a1b2"
        );
        assert!(signed
            .body()
            .to_string()
            .ends_with("&signature=dGMAwbWahhHVBWBm5uM4210aOaQ%3D"));
        Ok(())
    }

    #[test]
    fn test_signature_is_case_insensitive() -> Result<()> {
        let signer = test_signer();
        assert_eq!(
            signer.build_signature("command=LISTZONES")?,
            signer.build_signature("command=listzones")?
        );
        Ok(())
    }

    #[test]
    fn test_sign_without_secret() {
        let signer = RequestSigner::new(Credential::new("apikey123", ""), "cs.local");
        let err = signer.sign_command(&Command::new("listZones")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_sign_unsupported_param() {
        let cmd = Command::new("listZones").with_param("ids", json!(["a"]));
        let err = test_signer().sign_command(&cmd).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_sign_unsupported_method() {
        let cmd = Command::new("listZones").with_method(Method::DELETE);
        let err = test_signer().sign_command(&cmd).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("DELETE"));
    }

    #[test]
    fn test_endpoint() {
        let signer = test_signer()
            .with_scheme("https")
            .with_port(8443)
            .with_path_prefix("cloud");

        assert_eq!(signer.scheme(), "https");
        assert_eq!(signer.host(), "cs.local");
        assert_eq!(signer.port(), Some(8443));
        assert_eq!(signer.path_prefix(), "cloud");
        assert_eq!(signer.credential().api_key, "apikey123");
    }
}
