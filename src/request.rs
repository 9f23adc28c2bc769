//! The inbound request value.
//!
//! The host prepares a [`Request`] once per HTTP exchange: method, path,
//! lower-cased headers, and an optional body given as a consumable byte
//! source. While the decision flow walks, it stores its negotiated choices
//! and parsed conditional dates in the request's scratch fields, where
//! resource callbacks can read them back.

use crate::header::Headers;
use bytes::Bytes;
use http::Method;
use std::fmt;
use std::io;
use std::io::Read;
use std::time::SystemTime;

/// A consumable request body: pre-buffered bytes or an opaque reader.
///
/// The flow drains the body at most once (Content-MD5 validation). A
/// reader-backed body is buffered on first use, so later reads observe
/// the same bytes.
pub struct ReqBody {
    kind: Kind,
}

enum Kind {
    Full(Bytes),
    Reader(Box<dyn Read + Send>),
}

impl ReqBody {
    pub fn full(bytes: impl Into<Bytes>) -> Self {
        Self { kind: Kind::Full(bytes.into()) }
    }

    pub fn reader(reader: impl Read + Send + 'static) -> Self {
        Self { kind: Kind::Reader(Box::new(reader)) }
    }

    /// Returns the complete body, draining and buffering the reader on
    /// first call. I/O failures propagate to the host untouched.
    pub fn bytes(&mut self) -> io::Result<Bytes> {
        if let Kind::Reader(reader) = &mut self.kind {
            let mut buffer = Vec::new();
            reader.read_to_end(&mut buffer)?;
            self.kind = Kind::Full(Bytes::from(buffer));
        }
        match &self.kind {
            Kind::Full(bytes) => Ok(bytes.clone()),
            Kind::Reader(_) => unreachable!("reader was just buffered"),
        }
    }
}

impl fmt::Debug for ReqBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Full(bytes) => f.debug_tuple("ReqBody").field(&bytes.len()).finish(),
            Kind::Reader(_) => f.write_str("ReqBody(reader)"),
        }
    }
}

impl From<&'static str> for ReqBody {
    fn from(value: &'static str) -> Self {
        Self::full(Bytes::from_static(value.as_bytes()))
    }
}

impl From<String> for ReqBody {
    fn from(value: String) -> Self {
        Self::full(Bytes::from(value))
    }
}

impl From<Bytes> for ReqBody {
    fn from(value: Bytes) -> Self {
        Self::full(value)
    }
}

impl From<Vec<u8>> for ReqBody {
    fn from(value: Vec<u8>) -> Self {
        Self::full(Bytes::from(value))
    }
}

/// An inbound HTTP request plus the flow's negotiation scratch area.
#[derive(Debug)]
pub struct Request {
    method: Method,
    uri: String,
    headers: Headers,
    body: Option<ReqBody>,
    path_info: Option<String>,

    pub(crate) acceptable_type: Option<String>,
    pub(crate) acceptable_language: Option<String>,
    pub(crate) acceptable_charset: Option<String>,
    pub(crate) acceptable_encoding: Option<String>,
    pub(crate) if_modified_since: Option<SystemTime>,
    pub(crate) if_unmodified_since: Option<SystemTime>,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::new()
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Case-insensitive single-header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Path remainder supplied by a router running in front, if any.
    pub fn path_info(&self) -> Option<&str> {
        self.path_info.as_deref()
    }

    /// The media type chosen by content negotiation, once the flow has
    /// passed node C3.
    pub fn acceptable_type(&self) -> Option<&str> {
        self.acceptable_type.as_deref()
    }

    pub fn acceptable_language(&self) -> Option<&str> {
        self.acceptable_language.as_deref()
    }

    pub fn acceptable_charset(&self) -> Option<&str> {
        self.acceptable_charset.as_deref()
    }

    pub fn acceptable_encoding(&self) -> Option<&str> {
        self.acceptable_encoding.as_deref()
    }

    /// Drains the body, buffering it so repeated calls see the same bytes.
    /// Returns empty bytes when the request carries no body.
    pub fn body_bytes(&mut self) -> io::Result<Bytes> {
        match &mut self.body {
            Some(body) => body.bytes(),
            None => Ok(Bytes::new()),
        }
    }

    // The POST-create branch rewrites the request as a PUT to the new URI.
    pub(crate) fn rewrite(&mut self, method: Method, uri: String) {
        self.method = method;
        self.uri = uri;
    }
}

/// Builder for [`Request`]. Header names are stored lower-cased, matching
/// the ingress convention the engine expects from the host.
pub struct RequestBuilder {
    method: Method,
    uri: String,
    headers: Headers,
    body: Option<ReqBody>,
    path_info: Option<String>,
}

impl RequestBuilder {
    fn new() -> Self {
        Self { method: Method::GET, uri: "/".to_string(), headers: Headers::new(), body: None, path_info: None }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    pub fn header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers.set(name.as_ref().to_ascii_lowercase(), value);
        self
    }

    pub fn body(mut self, body: impl Into<ReqBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn path_info(mut self, path_info: impl Into<String>) -> Self {
        self.path_info = Some(path_info.into());
        self
    }

    pub fn build(self) -> Request {
        Request {
            method: self.method,
            uri: self.uri,
            headers: self.headers,
            body: self.body,
            path_info: self.path_info,
            acceptable_type: None,
            acceptable_language: None,
            acceptable_charset: None,
            acceptable_encoding: None,
            if_modified_since: None,
            if_unmodified_since: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_lowercases_header_names() {
        let request = Request::builder().header("Accept", "*/*").build();
        assert_eq!(request.headers().iter().next(), Some(("accept", "*/*")));
        assert_eq!(request.header("ACCEPT"), Some("*/*"));
    }

    #[test]
    fn missing_body_reads_empty() {
        let mut request = Request::builder().build();
        assert!(request.body_bytes().unwrap().is_empty());
    }

    #[test]
    fn reader_body_buffers_once() {
        let reader = std::io::Cursor::new(b"Test message.".to_vec());
        let mut request = Request::builder().method(Method::POST).body(ReqBody::reader(reader)).build();

        assert_eq!(&request.body_bytes().unwrap()[..], b"Test message.");
        // second read observes the buffered copy
        assert_eq!(&request.body_bytes().unwrap()[..], b"Test message.");
    }
}
