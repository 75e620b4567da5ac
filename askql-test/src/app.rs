use axum::body::Body;
use axum::Router;
use bytes::Bytes;
use http::header::{CONTENT_TYPE, HeaderValue};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde::Serialize;
use serde_json::Value;
use tower::util::ServiceExt;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Drives an assembled `Router` with `oneshot` calls, without a socket.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub fn get(&self, path: &str) -> TestRequest<'_> {
        TestRequest::new(self, Method::GET, path)
    }

    pub fn post(&self, path: &str) -> TestRequest<'_> {
        TestRequest::new(self, Method::POST, path)
    }
}

pub struct TestRequest<'a> {
    app: &'a TestApp,
    inner: http::request::Builder,
    body: Body,
}

impl<'a> TestRequest<'a> {
    fn new(app: &'a TestApp, method: Method, path: &str) -> Self {
        Self {
            app,
            inner: Request::builder().method(method).uri(path),
            body: Body::empty(),
        }
    }

    fn with_body(mut self, content_type: &'static str, body: impl Into<Body>) -> Self {
        self.inner = self.inner.header(CONTENT_TYPE, content_type);
        self.body = body.into();
        self
    }

    /// What the API client sends to `/api/query`.
    pub fn json(self, payload: &impl Serialize) -> Self {
        let bytes = serde_json::to_vec(payload).expect("payload serializes");
        self.with_body("application/json", bytes)
    }

    /// What the browser sends when the question form is submitted.
    pub fn form(self, fields: &[(&str, &str)]) -> Self {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.with_body(FORM_CONTENT_TYPE, encoded)
    }

    pub async fn send(self) -> TestResponse {
        let request = self.inner.body(self.body).expect("valid test request");
        let response = match self.app.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .expect("response body is readable")
            .to_bytes();
        TestResponse {
            status: parts.status,
            content_type: parts.headers.get(CONTENT_TYPE).cloned(),
            body,
        }
    }
}

/// A buffered response. Assertions consume and return `self` so they chain.
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl TestResponse {
    pub fn assert_ok(self) -> Self {
        self.assert_status(StatusCode::OK)
    }

    pub fn assert_server_error(self) -> Self {
        self.assert_status(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(self.status, expected, "body: {}", self.text());
        self
    }

    /// Compares the media type, ignoring parameters such as `charset`.
    pub fn assert_content_type(self, media_type: &str) -> Self {
        let actual = self
            .content_type
            .as_ref()
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::trim);
        assert_eq!(actual, Some(media_type));
        self
    }

    pub fn assert_text_contains(self, needle: &str) -> Self {
        assert!(self.text().contains(needle), "{needle:?} not in:\n{}", self.text());
        self
    }

    pub fn assert_text_lacks(self, needle: &str) -> Self {
        assert!(!self.text().contains(needle), "{needle:?} unexpectedly in:\n{}", self.text());
        self
    }

    /// `path` is dot-separated keys, `[n]` indices and an optional final
    /// `len()`, e.g. `result.data.rows[0][1]` or `result.data.columns.len()`.
    /// Missing keys resolve to `null`.
    pub fn assert_json_path(self, path: &str, expected: impl Into<Value>) -> Self {
        let root = self.json();
        let actual = lookup(&root, path);
        assert_eq!(actual, expected.into(), "at {path:?} in {root}");
        self
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|err| panic!("body is not JSON ({err}): {}", self.text()))
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn lookup(root: &Value, path: &str) -> Value {
    let mut node = root.clone();
    for token in tokens(path) {
        node = match token {
            Token::Len => match &node {
                Value::Array(items) => items.len().into(),
                Value::Object(map) => map.len().into(),
                other => panic!("len() on {other} in {path:?}"),
            },
            Token::Key(key) => node.get(key).cloned().unwrap_or_default(),
            Token::Index(i) => node.get(i).cloned().unwrap_or_default(),
        };
    }
    node
}

#[derive(Debug, PartialEq)]
enum Token<'p> {
    Key(&'p str),
    Index(usize),
    Len,
}

fn tokens(path: &str) -> Vec<Token<'_>> {
    let mut out = Vec::new();
    for part in path.split('.').filter(|p| !p.is_empty()) {
        if part == "len()" {
            out.push(Token::Len);
            continue;
        }
        let mut pieces = part.split('[');
        if let Some(key) = pieces.next().filter(|k| !k.is_empty()) {
            out.push(Token::Key(key));
        }
        for piece in pieces {
            let index = piece
                .strip_suffix(']')
                .and_then(|n| n.parse().ok())
                .unwrap_or_else(|| panic!("bad index [{piece} in {path:?}"));
            out.push(Token::Index(index));
        }
    }
    out
}
