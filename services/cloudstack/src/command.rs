use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::Method;
use log::debug;
use serde_json::Value;

use super::constants::*;
use crate::RequestSigner;
use cloudstack_sign_core::utils::RedactQuery;
use cloudstack_sign_core::{ApiCommand, Error, RequestBody, Result, Uri};

/// Command is a single CloudStack API call before signing.
///
/// ```
/// use cloudstack_sign::Command;
///
/// let cmd = Command::new("listVirtualMachines")
///     .with_param("zoneId", "a1b2")
///     .with_param("listAll", true)
///     .with_param("pageSize", 500);
///
/// assert_eq!(cmd.name(), "listVirtualMachines");
/// assert_eq!(cmd.params().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    params: Vec<(String, Value)>,
    path: String,
    method: Method,
}

impl Command {
    /// Create a command sent with `GET` to the `api` route.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            path: DEFAULT_COMMAND_PATH.to_string(),
            method: Method::GET,
        }
    }

    /// Add a parameter.
    ///
    /// Values must be booleans, numbers or strings, anything else fails
    /// when the command is signed.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add several parameters.
    pub fn with_params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.params
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the route under the path prefix, `api` by default.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set the HTTP method, `GET` or `POST`.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// The command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameters in the order they were added.
    pub fn params(&self) -> &[(String, Value)] {
        &self.params
    }

    /// The route under the path prefix.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }
}

/// SignedCommand is a command with its signed body, ready to be sent.
///
/// For `GET` the signed body is sent as the URI query, for `POST` as a form
/// encoded request body.
#[derive(Debug)]
pub struct SignedCommand<'a> {
    signer: &'a RequestSigner,
    path: String,
    method: Method,
    body: RequestBody,
    compiled_query: String,
}

impl<'a> SignedCommand<'a> {
    pub(crate) fn new(signer: &'a RequestSigner, command: &Command, body: RequestBody) -> Self {
        let compiled_query = if command.method() == Method::GET {
            body.to_string()
        } else {
            String::new()
        };

        Self {
            signer,
            path: command.path().to_string(),
            method: command.method().clone(),
            body,
            compiled_query,
        }
    }

    /// The signed body.
    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Mutable access to the signed body, to read it as a stream.
    pub fn body_mut(&mut self) -> &mut RequestBody {
        &mut self.body
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The request URI.
    pub fn uri(&self) -> Uri {
        Uri::from_command(self)
    }

    /// Assemble the HTTP request.
    ///
    /// The body is consumed: closed for `GET`, detached into the request for
    /// `POST`.
    pub fn into_request(self) -> Result<http::Request<Bytes>> {
        let uri = http::Uri::try_from(&self.uri())?;
        let mut body = self.body;

        let req = if self.method == Method::POST {
            let content = body
                .detach()
                .ok_or_else(|| Error::unexpected("request body is no longer readable"))?;

            http::Request::post(uri)
                .header(CONTENT_TYPE, FORM_URLENCODED)
                .header(CONTENT_LENGTH, content.len())
                .body(content)?
        } else {
            body.close();
            http::Request::get(uri).body(Bytes::new())?
        };

        debug!(
            "built request: {} {}",
            req.method(),
            RedactQuery::from(req.uri().to_string().as_str())
        );
        Ok(req)
    }
}

impl ApiCommand for SignedCommand<'_> {
    type Endpoint = RequestSigner;

    fn endpoint(&self) -> &RequestSigner {
        self.signer
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn compiled_query(&self) -> &str {
        &self.compiled_query
    }
}
