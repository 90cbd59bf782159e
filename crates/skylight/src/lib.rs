//! Client for the Skylight frame API.
//!
//! Translates ambiguous, human-shaped inputs (dates like "today", family
//! member names, list names) into exact, validated calls against the
//! JSON:API-style Skylight backend, and flattens the backend's nested
//! response envelopes into directly usable domain values.
//!
//! # Example
//!
//! ```rust,ignore
//! use skylight::{Config, SkylightClient, dates};
//! use skylight::api::chores::NewChore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let tz = config.timezone;
//!     let client = SkylightClient::new(config)?;
//!
//!     let assignee = client.find_category("dad").await?;
//!     client
//!         .create_chore(NewChore {
//!             summary: "Empty the dishwasher".into(),
//!             start: dates::resolve("tomorrow", tz)?,
//!             category_id: assignee.map(|c| c.id),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
mod client;
mod config;
pub mod dates;
mod error;
pub mod resolve;
pub mod types;

pub use client::SkylightClient;
pub use config::{AuthMode, Config};
pub use error::SkylightError;
