use std::io::{self, Cursor, Read};
use std::sync::Arc;

use once_cell::sync::Lazy;
use reqwest::header::CONTENT_TYPE;

/// Any failure raised by a [`Poster`] before a response exists.
pub type TransportError = Box<dyn std::error::Error + Send + Sync>;

/// The one HTTP operation [`Client`](crate::Client) needs. Swap in a double
/// to test sending without a network.
pub trait Poster: Send + Sync {
    fn post(
        &self,
        url: &str,
        content_type: &str,
        body: RequestBody,
    ) -> Result<PostResponse, TransportError>;
}

/// Serialized request body, readable as a stream with a known length.
#[derive(Debug)]
pub struct RequestBody {
    inner: Cursor<Vec<u8>>,
}

impl RequestBody {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            inner: Cursor::new(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

impl Read for RequestBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

/// Status plus the unread response body. Dropping it closes the body.
pub struct PostResponse {
    pub status: u16,
    pub body: Box<dyn Read + Send>,
}

impl PostResponse {
    pub fn new(status: u16, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }

    /// Response with an empty body, handy for doubles.
    pub fn empty(status: u16) -> Self {
        Self::new(status, io::empty())
    }
}

impl std::fmt::Debug for PostResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Poster for reqwest::blocking::Client {
    fn post(
        &self,
        url: &str,
        content_type: &str,
        body: RequestBody,
    ) -> Result<PostResponse, TransportError> {
        let resp = reqwest::blocking::Client::post(self, url)
            .header(CONTENT_TYPE, content_type)
            .body(body.into_bytes())
            .send()?;
        Ok(PostResponse::new(resp.status().as_u16(), resp))
    }
}

static DEFAULT_POSTER: Lazy<Arc<dyn Poster>> =
    Lazy::new(|| Arc::new(reqwest::blocking::Client::new()) as Arc<dyn Poster>);

/// Process-wide reqwest client shared by every [`Client::new`](crate::Client::new).
pub fn default_poster() -> Arc<dyn Poster> {
    DEFAULT_POSTER.clone()
}
