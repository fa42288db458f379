use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::io::SeekFrom;

use bytes::Bytes;
use log::debug;
use log::warn;
use serde_json::Value;

use crate::param::param_to_string;
use crate::param::percent_encode;
use crate::utils::RedactQuery;
use crate::Error;
use crate::Result;
use crate::SignQuery;

const PARAM_API_KEY: &str = "apikey";
const PARAM_COMMAND: &str = "command";
const PARAM_RESPONSE: &str = "response";
const PARAM_SIGNATURE: &str = "signature";
const RESPONSE_JSON: &str = "json";

/// RequestBody is the signed, url encoded body of a single API command.
///
/// The body is computed once at construction:
///
/// ```text
/// apikey=..&command=..&<lowercased params>&response=json&signature=..
/// ```
///
/// Keys are sorted ascending, keys and values are encoded per RFC 3986 and
/// parameters whose value renders as an empty string are left out.
///
/// After that only the read cursor moves. The body is open for reading
/// until [`close`](RequestBody::close) or [`detach`](RequestBody::detach)
/// is called, both of which are final.
///
/// # Examples
///
/// ```
/// use cloudstack_sign_core::{RequestBody, Result, SignQuery};
/// use serde_json::json;
///
/// #[derive(Debug)]
/// struct Unsigned;
///
/// impl SignQuery for Unsigned {
///     fn api_key(&self) -> &str {
///         "key"
///     }
///
///     fn build_signature(&self, _: &str) -> Result<String> {
///         Ok("sig".to_string())
///     }
/// }
///
/// let mut body = RequestBody::new(&Unsigned, "listZones", [("available", json!(true))])?;
/// assert_eq!(
///     body.read_all()?,
///     "apikey=key&available=true&command=listZones&response=json&signature=sig"
/// );
/// # Ok::<(), cloudstack_sign_core::Error>(())
/// ```
#[derive(Debug)]
pub struct RequestBody {
    parameters: Vec<(String, Value)>,
    canonical_query: String,
    state: State,
}

#[derive(Debug)]
enum State {
    Open { buf: Bytes, pos: u64 },
    Closed,
    Detached,
}

impl RequestBody {
    /// Build and sign the body for `command` with the given parameters.
    ///
    /// Parameter names are lower-cased; on duplicates after lowering the last
    /// one wins. `apikey`, `command` and `response` are always taken from
    /// `signer` and `command`, a caller parameter with one of these names is
    /// dropped.
    pub fn new<S, K, I>(signer: &S, command: &str, parameters: I) -> Result<Self>
    where
        S: SignQuery + ?Sized,
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let parameters: Vec<(String, Value)> = parameters
            .into_iter()
            .map(|(k, v)| (k.into(), v))
            .collect();

        let mut params = BTreeMap::new();
        for (k, v) in &parameters {
            let value = param_to_string(k, v)?;
            if value.is_empty() {
                continue;
            }
            params.insert(k.to_lowercase(), value);
        }

        for (k, v) in [
            (PARAM_API_KEY, signer.api_key()),
            (PARAM_COMMAND, command),
            (PARAM_RESPONSE, RESPONSE_JSON),
        ] {
            if params.insert(k.to_string(), v.to_string()).is_some() {
                warn!("parameter `{k}` is reserved, the value supplied for command {command} is ignored");
            }
        }

        let canonical_query = canonicalize_query(&params);
        debug!(
            "canonical query: {:?}",
            RedactQuery::from(canonical_query.as_str())
        );

        let signature = signer.build_signature(&canonical_query)?;
        let body = format!(
            "{canonical_query}&{PARAM_SIGNATURE}={}",
            percent_encode(&signature)
        );

        Ok(Self {
            parameters,
            canonical_query,
            state: State::Open {
                buf: Bytes::from(body),
                pos: 0,
            },
        })
    }

    /// Parameters as they were supplied, before coercion.
    pub fn parameters(&self) -> &[(String, Value)] {
        &self.parameters
    }

    /// The sorted, encoded query that was signed, without the signature.
    pub fn canonical_query(&self) -> &str {
        &self.canonical_query
    }

    /// Size of the body in bytes, `None` once closed or detached.
    pub fn size(&self) -> Option<u64> {
        match &self.state {
            State::Open { buf, .. } => Some(buf.len() as u64),
            _ => None,
        }
    }

    /// Current position of the read cursor.
    pub fn tell(&self) -> Result<u64> {
        match &self.state {
            State::Open { pos, .. } => Ok(*pos),
            _ => Err(self.state_error()),
        }
    }

    /// Whether the cursor is at or past the end. Always true once the body
    /// is closed or detached.
    pub fn eof(&self) -> bool {
        match &self.state {
            State::Open { buf, pos } => *pos >= buf.len() as u64,
            _ => true,
        }
    }

    /// Whether the body can be read.
    pub fn is_readable(&self) -> bool {
        matches!(self.state, State::Open { .. })
    }

    /// Whether the body can be seeked.
    pub fn is_seekable(&self) -> bool {
        matches!(self.state, State::Open { .. })
    }

    /// Request bodies are never writable.
    pub fn is_writable(&self) -> bool {
        false
    }

    /// Read up to `n` bytes from the cursor and advance it.
    ///
    /// Returns fewer bytes near the end and an empty buffer at the end.
    pub fn read(&mut self, n: usize) -> Result<Bytes> {
        match &mut self.state {
            State::Open { buf, pos } => {
                let start = (*pos).min(buf.len() as u64) as usize;
                let end = start.saturating_add(n).min(buf.len());
                *pos += (end - start) as u64;
                Ok(buf.slice(start..end))
            }
            _ => Err(self.state_error()),
        }
    }

    /// Read everything from the cursor to the end.
    pub fn read_all(&mut self) -> Result<Bytes> {
        self.read(usize::MAX)
    }

    /// Move the cursor, returning the new position.
    ///
    /// Seeking past the end is allowed, reads there return nothing. Seeking
    /// before the start is an invalid argument.
    pub fn seek(&mut self, target: SeekFrom) -> Result<u64> {
        match &mut self.state {
            State::Open { buf, pos } => {
                let (base, offset) = match target {
                    SeekFrom::Start(n) => {
                        *pos = n;
                        return Ok(n);
                    }
                    SeekFrom::Current(n) => (*pos, n),
                    SeekFrom::End(n) => (buf.len() as u64, n),
                };

                let new_pos = base.checked_add_signed(offset).ok_or_else(|| {
                    Error::invalid_argument(format!(
                        "invalid seek to {target:?}: position out of range"
                    ))
                })?;
                *pos = new_pos;
                Ok(new_pos)
            }
            _ => Err(self.state_error()),
        }
    }

    /// Move the cursor back to the start.
    pub fn rewind(&mut self) -> Result<()> {
        self.seek(SeekFrom::Start(0)).map(|_| ())
    }

    /// Always fails, request bodies are read only.
    pub fn write(&mut self, _data: &[u8]) -> Result<usize> {
        Err(Error::not_writable())
    }

    /// Release the buffer. Any later read fails with a closed error.
    ///
    /// Does nothing if the body is already closed or detached.
    pub fn close(&mut self) {
        if let State::Open { .. } = self.state {
            self.state = State::Closed;
        }
    }

    /// Hand the underlying buffer to the caller and leave the body unusable.
    ///
    /// Returns `None` if the body was already closed or detached.
    pub fn detach(&mut self) -> Option<Bytes> {
        match std::mem::replace(&mut self.state, State::Detached) {
            State::Open { buf, .. } => Some(buf),
            State::Closed => {
                self.state = State::Closed;
                None
            }
            State::Detached => None,
        }
    }

    /// Describe the underlying buffer, `None` once closed or detached.
    pub fn metadata(&self) -> Option<Metadata> {
        match &self.state {
            State::Open { buf, pos } => Some(Metadata {
                stream_type: "MEMORY",
                mode: "rb",
                seekable: true,
                size: buf.len() as u64,
                unread_bytes: (buf.len() as u64).saturating_sub(*pos),
                eof: *pos >= buf.len() as u64,
            }),
            _ => None,
        }
    }

    /// Get a single [`Metadata`] field by name.
    pub fn metadata_value(&self, key: &str) -> Option<String> {
        let meta = self.metadata()?;
        match key {
            "stream_type" => Some(meta.stream_type.to_string()),
            "mode" => Some(meta.mode.to_string()),
            "seekable" => Some(meta.seekable.to_string()),
            "size" => Some(meta.size.to_string()),
            "unread_bytes" => Some(meta.unread_bytes.to_string()),
            "eof" => Some(meta.eof.to_string()),
            _ => None,
        }
    }

    fn state_error(&self) -> Error {
        match self.state {
            State::Detached => Error::body_detached(),
            _ => Error::body_closed(),
        }
    }
}

/// Join sorted parameters as `k=v&k=v`, encoding keys and values.
fn canonicalize_query(params: &BTreeMap<String, String>) -> String {
    let mut s = String::with_capacity(64);

    for (idx, (k, v)) in params.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(&percent_encode(k));
        s.push('=');
        s.push_str(&percent_encode(v));
    }

    s
}

/// Metadata describes the buffer behind an open [`RequestBody`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    /// Kind of storage, always `MEMORY`.
    pub stream_type: &'static str,
    /// Access mode, always `rb`.
    pub mode: &'static str,
    /// Whether the cursor can be moved.
    pub seekable: bool,
    /// Total size in bytes.
    pub size: u64,
    /// Bytes between the cursor and the end.
    pub unread_bytes: u64,
    /// Whether the cursor is at or past the end.
    pub eof: bool,
}

/// Renders the whole body regardless of the cursor, or nothing once the body
/// is closed or detached.
impl fmt::Display for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Open { buf, .. } => f.write_str(&String::from_utf8_lossy(buf)),
            _ => Ok(()),
        }
    }
}

impl io::Read for RequestBody {
    fn read(&mut self, dst: &mut [u8]) -> io::Result<usize> {
        let bs = RequestBody::read(self, dst.len())?;
        dst[..bs.len()].copy_from_slice(&bs);
        Ok(bs.len())
    }
}

impl io::Seek for RequestBody {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        Ok(RequestBody::seek(self, pos)?)
    }
}
