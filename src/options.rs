use std::time::Duration;

use crate::error::{Error, Result};

// -------------------------------------------------------
// Transport config
// -------------------------------------------------------
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Whole-request timeout. `None` keeps reqwest's default.
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    /// Overrides the `User-Agent` header
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Dedicated reqwest client honoring these settings.
    pub fn build_http_client(&self) -> Result<reqwest::blocking::Client> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(t) = self.timeout {
            builder = builder.timeout(t);
        }
        if let Some(t) = self.connect_timeout {
            builder = builder.connect_timeout(t);
        }
        if let Some(ua) = &self.user_agent {
            builder = builder.user_agent(ua.as_str());
        }
        builder.build().map_err(Error::Build)
    }
}

// -------------------------------------------------------
// INITIATE (TRACING SETUP)
// -------------------------------------------------------
/// Install a fmt subscriber honoring `RUST_LOG`, with `slackhook=debug` on top.
/// Does nothing if the host already set a global subscriber.
pub fn initiate() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "slackhook=debug".parse() {
        filter = filter.add_directive(directive);
    }

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true));

    if subscriber.try_init().is_ok() {
        tracing::info!(target = "slackhook", "slackhook tracing initiated");
    }
}
