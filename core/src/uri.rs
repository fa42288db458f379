use std::fmt;

use log::debug;
use once_cell::unsync::OnceCell;

use crate::ApiCommand;
use crate::Endpoint;
use crate::Error;
use crate::Result;

/// Uri is an immutable request URI assembled from its components.
///
/// Every `with_*` method returns a modified copy and leaves `self` as it
/// was. The string form is compiled on first use and cached per instance;
/// copies always start with an empty cache.
///
/// ```text
/// [scheme:][//[userinfo@]host[:port]]/path[?query][#fragment]
/// ```
///
/// # Examples
///
/// ```
/// use cloudstack_sign_core::Uri;
///
/// let uri = Uri::default()
///     .with_scheme("HTTPS")?
///     .with_host(Some("api.example.com"))
///     .with_port(Some(8080))?
///     .with_path(Some("client/api"))
///     .with_query(Some("command=listZones"));
///
/// assert_eq!(uri.as_str(), "https://api.example.com:8080/client/api?command=listZones");
/// # Ok::<(), cloudstack_sign_core::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Uri {
    scheme: String,
    user_info: String,
    host: String,
    port: Option<u16>,
    path: String,
    query: String,
    fragment: String,

    compiled: OnceCell<String>,
}

impl Uri {
    /// Build the URI of a command from its endpoint, route and query.
    ///
    /// Scheme, host and port are copied from the endpoint without
    /// validation, the path is `<path_prefix>/<command path>`.
    pub fn from_command<C: ApiCommand + ?Sized>(command: &C) -> Self {
        let endpoint = command.endpoint();

        Self {
            scheme: endpoint.scheme().to_string(),
            host: endpoint.host().to_string(),
            port: endpoint.port().filter(|p| *p != 0),
            path: format!("{}/{}", endpoint.path_prefix(), command.path()),
            query: command.compiled_query().to_string(),
            ..Default::default()
        }
    }

    /// The scheme, without the trailing `:`.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The user information, `user[:password]`.
    pub fn user_info(&self) -> &str {
        &self.user_info
    }

    /// The host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The port, if any.
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The path as stored, without the separating `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query, without the leading `?`.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The fragment, without the leading `#`.
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// The authority in `[userinfo@]host[:port]` format.
    pub fn authority(&self) -> String {
        let mut s = String::with_capacity(self.user_info.len() + self.host.len() + 7);

        if !self.user_info.is_empty() {
            s.push_str(&self.user_info);
            s.push('@');
        }
        s.push_str(&self.host);
        if let Some(port) = self.port.filter(|p| *p != 0) {
            s.push(':');
            s.push_str(&port.to_string());
        }

        s
    }

    /// Return a copy with the given scheme.
    ///
    /// The scheme is lower-cased and must be `http` or `https`.
    pub fn with_scheme(&self, scheme: &str) -> Result<Self> {
        let scheme = scheme.to_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(Error::invalid_argument(format!(
                "unsupported scheme: `{scheme}`, expected http or https"
            )));
        }

        let mut uri = self.clone();
        uri.scheme = scheme;
        Ok(uri)
    }

    /// Return a copy with the given user and optional password.
    pub fn with_user_info(&self, user: &str, password: Option<&str>) -> Self {
        let mut uri = self.clone();
        uri.user_info = match password {
            Some(password) => format!("{user}:{password}"),
            None => user.to_string(),
        };
        uri
    }

    /// Return a copy with the given host, `None` clears it.
    pub fn with_host(&self, host: Option<&str>) -> Self {
        let mut uri = self.clone();
        uri.host = host.unwrap_or_default().to_string();
        uri
    }

    /// Return a copy with the given port, `None` removes it.
    ///
    /// The port must be within `1..=65535`.
    pub fn with_port(&self, port: Option<u32>) -> Result<Self> {
        let port = match port {
            None => None,
            Some(p) => match u16::try_from(p) {
                Ok(p) if p != 0 => Some(p),
                _ => {
                    return Err(Error::invalid_argument(format!(
                        "invalid port: {p}, expected a value between 1 and 65535"
                    )))
                }
            },
        };

        let mut uri = self.clone();
        uri.port = port;
        Ok(uri)
    }

    /// Return a copy with the given path, `None` clears it.
    ///
    /// Leading slashes are stripped, the rest is kept as given.
    pub fn with_path(&self, path: Option<&str>) -> Self {
        let mut uri = self.clone();
        uri.path = path.unwrap_or_default().trim_start_matches('/').to_string();
        uri
    }

    /// Return a copy with the given query, `None` clears it.
    pub fn with_query(&self, query: Option<&str>) -> Self {
        let mut uri = self.clone();
        uri.query = query.unwrap_or_default().to_string();
        uri
    }

    /// Return a copy with the given fragment.
    pub fn with_fragment(&self, fragment: &str) -> Self {
        let mut uri = self.clone();
        uri.fragment = fragment.to_string();
        uri
    }

    /// The compiled URI string.
    pub fn as_str(&self) -> &str {
        self.compiled.get_or_init(|| self.compile())
    }

    fn compile(&self) -> String {
        let authority = self.authority();
        let mut s = String::with_capacity(
            self.scheme.len()
                + authority.len()
                + self.path.len()
                + self.query.len()
                + self.fragment.len()
                + 6,
        );

        if !self.scheme.is_empty() {
            s.push_str(&self.scheme);
            s.push(':');
        }
        if !authority.is_empty() {
            s.push_str("//");
            s.push_str(&authority);
        }
        // Exactly one `/` between authority and path.
        if !self.path.is_empty() {
            s.push('/');
            s.push_str(self.path.trim_start_matches('/'));
        }
        if !self.query.is_empty() {
            s.push('?');
            s.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            s.push('#');
            s.push_str(&self.fragment);
        }

        debug!("compiled uri: {}", crate::utils::RedactQuery::from(s.as_str()));
        s
    }
}

impl Clone for Uri {
    fn clone(&self) -> Self {
        Self {
            scheme: self.scheme.clone(),
            user_info: self.user_info.clone(),
            host: self.host.clone(),
            port: self.port,
            path: self.path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
            compiled: OnceCell::new(),
        }
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.scheme == other.scheme
            && self.user_info == other.user_info
            && self.host == other.host
            && self.port == other.port
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl Eq for Uri {}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&Uri> for http::Uri {
    type Error = Error;

    fn try_from(uri: &Uri) -> Result<Self> {
        Ok(http::Uri::try_from(uri.as_str())?)
    }
}
