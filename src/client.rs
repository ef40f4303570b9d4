use std::io;
use std::sync::Arc;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::message::Message;
use crate::options::ClientConfig;
use crate::poster::{default_poster, Poster, RequestBody};
use crate::prom;

const CONTENT_TYPE_JSON: &str = "application/json";

/// Client for an Incoming WebHook URL.
///
/// Holds no per-request state; share it (or clones of it) freely.
#[derive(Clone)]
pub struct Client {
    url: String,
    /// Transport used for every send. Replace it to inject a test double.
    pub http_client: Arc<dyn Poster>,
}

impl Client {
    /// Client posting to `url` through the shared default reqwest client.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_poster(url, default_poster())
    }

    pub fn with_poster(url: impl Into<String>, poster: Arc<dyn Poster>) -> Self {
        prom::init_prometheus();
        Self {
            url: url.into(),
            http_client: poster,
        }
    }

    /// Client with its own reqwest client built from `cfg`.
    pub fn with_config(url: impl Into<String>, cfg: &ClientConfig) -> Result<Self> {
        let http = cfg.build_http_client()?;
        Ok(Self::with_poster(url, Arc::new(http)))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Simple text message.
    pub fn simple(&self, text: &str) -> Result<()> {
        self.send(&Message::new(text))
    }

    /// Send a Message. Succeeds only on HTTP 200.
    pub fn send(&self, msg: &Message) -> Result<()> {
        let start = Instant::now();
        let res = self.deliver(msg);

        let outcome = match &res {
            Ok(()) => "ok",
            Err(e) => e.outcome(),
        };
        prom::observe_send(outcome, start.elapsed().as_secs_f64());
        res
    }

    fn deliver(&self, msg: &Message) -> Result<()> {
        let buf = msg.to_json_bytes()?;
        tracing::debug!(target = "slackhook", bytes = buf.len(), "posting webhook message");

        let mut resp = self
            .http_client
            .post(&self.url, CONTENT_TYPE_JSON, RequestBody::new(buf))
            .map_err(|e| {
                tracing::warn!(target = "slackhook", error = %e, "webhook request failed");
                Error::Transport(e)
            })?;

        // Discard response body to reuse connection
        if let Err(e) = io::copy(&mut resp.body, &mut io::sink()) {
            tracing::debug!(target = "slackhook", error = %e, "failed draining webhook response");
        }
        let status = resp.status;
        drop(resp);

        prom::observe_status(status);
        if status != 200 {
            tracing::warn!(target = "slackhook", status, "unexpected webhook status");
            return Err(Error::UnexpectedStatus(status));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Client {
    // url carries the hook secret
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}
