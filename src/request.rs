//! Incoming HTTP request type and its body.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::verb::Verb;

/// An incoming HTTP request, handed to every action method as its last
/// argument.
///
/// The server builds one per request. Tests and hand-written callers can
/// build one with [`Request::new`] and the `with_*` methods:
///
/// ```rust
/// use roost::{Request, Verb};
///
/// let req = Request::new(Verb::Patch, "/user/7")
///     .with_param("id", "7")
///     .with_body(r#"{"name":"lisa"}"#);
/// assert_eq!(req.param("id"), Some("7"));
/// ```
#[derive(Clone, Debug)]
pub struct Request {
    verb: Verb,
    path: String,
    headers: Vec<(String, String)>,
    body: Body,
    params: HashMap<String, String>,
}

impl Request {
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            headers: Vec::new(),
            body: Body::default(),
            params: HashMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    pub fn verb(&self) -> Verb { self.verb }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &Body { &self.body }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/user/:id`, `req.param("id")` on `/user/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// The raw request body.
///
/// Cloning is cheap: the bytes are reference counted, so the dispatcher can
/// hand the same body to an action method and keep it on the [`Request`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Body(Bytes);

impl Body {
    pub fn as_bytes(&self) -> &[u8] { &self.0 }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// The body as UTF-8 text, if it is valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// Deserializes a JSON body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.0)
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self { Self(bytes) }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self { Self(bytes.into()) }
}

impl From<String> for Body {
    fn from(text: String) -> Self { Self(text.into()) }
}

impl From<&'static str> for Body {
    fn from(text: &'static str) -> Self { Self(Bytes::from_static(text.as_bytes())) }
}

impl PartialEq<&str> for Body {
    fn eq(&self, other: &&str) -> bool {
        self.0 == other.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let req = Request::new(Verb::Get, "/").with_header("Content-Type", "application/json");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("accept"), None);
    }

    #[test]
    fn json_body_deserializes() {
        #[derive(serde::Deserialize)]
        struct Product {
            cost: u32,
        }

        let body = Body::from(r#"{"cost":25000}"#);
        let product: Product = body.json().unwrap();
        assert_eq!(product.cost, 25000);
        assert!(Body::from("not json").json::<Product>().is_err());
    }
}
