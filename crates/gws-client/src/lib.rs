//! Async client for the University of Washington Groups Web Service.
//!
//! One [`Client`] wraps a lazily-configured mutual-TLS HTTP client. The
//! certificate material is loaded exactly once, on first use; a failure
//! during that load is latched and returned to every later call. Resource
//! operations are thin methods, each translating one domain call into one
//! HTTP request plus response decoding.
//!
//! ```no_run
//! # async fn run() -> gws_client::Result<()> {
//! let mut config = gws_client::Config::default();
//! config.client_cert = Some("/etc/gws/client.crt".into());
//! config.client_key = Some("/etc/gws/client.key".into());
//!
//! let client = gws_client::Client::new(config)?;
//! let group = client.get_group("u_dept_team").await?;
//! println!("{} ({})", group.display_name, group.regid);
//! # Ok(())
//! # }
//! ```

mod affiliate;
mod config;
mod error;
mod groups;
mod history;
mod membership;
mod search;
mod transport;
mod wire;


pub use config::{Config, DEFAULT_API_URL};
pub use error::{Error, Result};
pub use transport::Client;
