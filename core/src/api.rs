use crate::Result;
use std::fmt::Debug;

/// SignQuery is the trait used by [`RequestBody`](crate::RequestBody) to sign
/// its canonical query.
///
/// Implementations own the API key and the secret; the encoder never sees the
/// secret.
pub trait SignQuery: Debug + Send + Sync + 'static {
    /// The API key sent as the `apikey` parameter.
    fn api_key(&self) -> &str;

    /// Compute the signature of a canonical query string.
    ///
    /// The returned value is the raw signature (for CloudStack, a base64
    /// string). The caller percent-encodes it exactly once before appending
    /// it to the body.
    fn build_signature(&self, query: &str) -> Result<String>;
}

/// Endpoint describes where API requests are sent.
pub trait Endpoint: Debug + Send + Sync + 'static {
    /// URI scheme, `http` or `https`.
    fn scheme(&self) -> &str;

    /// Host name or address of the API server.
    fn host(&self) -> &str;

    /// Port of the API server, `None` to leave it out of the URI.
    fn port(&self) -> Option<u16>;

    /// Path prefix put in front of every command route, e.g. `client`.
    fn path_prefix(&self) -> &str;
}

/// ApiCommand is a command ready to be turned into a [`Uri`](crate::Uri).
pub trait ApiCommand {
    /// Endpoint the command is sent to.
    type Endpoint: Endpoint;

    /// The endpoint configuration governing this command.
    fn endpoint(&self) -> &Self::Endpoint;

    /// Route suffix appended to the endpoint's path prefix.
    fn path(&self) -> &str;

    /// The query string placed in the URI.
    fn compiled_query(&self) -> &str;
}
