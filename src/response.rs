//! The outbound response accumulator.
//!
//! A [`Response`] starts empty when the flow enters B13 and accumulates
//! status, headers, and body as nodes fire. Callbacks and responders
//! contribute [`Fragment`]s, merged key by key: same-key header maps merge
//! recursively, an absent right-hand field keeps the left value, and any
//! other collision lets the right side win.

use crate::header::Headers;
use bytes::Bytes;
use http::StatusCode;

/// A response body: text, raw bytes, or a renderable scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Bytes(Bytes),
    Number(i64),
}

impl Body {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Bytes(bytes) => bytes.is_empty(),
            Self::Number(_) => false,
        }
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            Self::Text(text) => Bytes::from(text),
            Self::Bytes(bytes) => bytes,
            Self::Number(number) => Bytes::from(number.to_string()),
        }
    }

    pub fn as_bytes(&self) -> Bytes {
        self.clone().into_bytes()
    }
}

impl From<&str> for Body {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Bytes> for Body {
    fn from(value: Bytes) -> Self {
        Self::Bytes(value)
    }
}

impl From<i64> for Body {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

/// The accumulating response value.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub(crate) status: Option<StatusCode>,
    pub(crate) headers: Headers,
    pub(crate) body: Option<Body>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// The final status code. Always present once the engine returns.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn body(&self) -> Option<&Body> {
        self.body.as_ref()
    }

    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(|body| !body.is_empty())
    }

    /// Merges a partial response into the accumulator.
    pub(crate) fn merge(&mut self, fragment: Fragment) {
        if let Some(status) = fragment.status {
            self.status = Some(status);
        }
        for (name, value) in fragment.headers {
            self.headers.set(name, value);
        }
        if let Some(body) = fragment.body {
            self.body = Some(body);
        }
    }
}

/// A partial response map: any subset of status, headers, and body,
/// mergeable into the accumulator.
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    status: Option<StatusCode>,
    headers: Vec<(String, String)>,
    body: Option<Body>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub(crate) fn status_code(&self) -> Option<StatusCode> {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_header_maps_key_by_key() {
        let mut response = Response::new();
        response.headers.set("location", "/a");
        response.headers.set("vary", "accept");

        response.merge(Fragment::new().header("location", "/b").header("allow", "GET"));

        assert_eq!(response.header("location"), Some("/b"));
        assert_eq!(response.header("vary"), Some("accept"));
        assert_eq!(response.header("allow"), Some("GET"));
    }

    #[test]
    fn merge_absent_fields_keep_left() {
        let mut response = Response::new();
        response.status = Some(StatusCode::OK);
        response.body = Some(Body::from("kept"));

        response.merge(Fragment::new().header("vary", "accept"));

        assert_eq!(response.status(), Some(StatusCode::OK));
        assert_eq!(response.body(), Some(&Body::from("kept")));
    }

    #[test]
    fn merge_right_wins_on_collision() {
        let mut response = Response::new();
        response.status = Some(StatusCode::OK);
        response.body = Some(Body::from("old"));

        response.merge(Fragment::new().status(StatusCode::CREATED).body("new"));

        assert_eq!(response.status(), Some(StatusCode::CREATED));
        assert_eq!(response.body(), Some(&Body::from("new")));
    }

    #[test]
    fn scalar_body_renders() {
        assert_eq!(Body::Number(42).into_bytes(), Bytes::from_static(b"42"));
        assert!(!Body::Number(0).is_empty());
        assert!(Body::Text(String::new()).is_empty());
    }
}
