//! Client for Slack-style Incoming WebHooks.
//!
//! ```no_run
//! use slackhook::{Client, Message};
//!
//! let hook = Client::new("https://hooks.slack.com/services/T000/B000/XXXX");
//! hook.simple("deploy finished")?;
//! hook.send(&Message::new("disk almost full").channel("#ops").icon_emoji(":warning:"))?;
//! # Ok::<(), slackhook::Error>(())
//! ```

pub mod client;
pub mod error;
pub mod message;
pub mod poster;

pub mod options;
pub use options::{initiate, ClientConfig};

pub use client::Client;
pub use error::{Error, Result};
pub use message::Message;
pub use poster::{default_poster, PostResponse, Poster, RequestBody, TransportError};

// Prometheus metrics
pub mod prom;
