//! Client configuration.

use std::path::PathBuf;

/// Production base URL of the Groups Service v3 API. Reaching it requires
/// the InCommon CA in `ca_file`.
pub const DEFAULT_API_URL: &str = "https://groups.uw.edu/group_sws/v3";

/// Connection settings for the Groups Service.
#[derive(Debug, Clone)]
pub struct Config {
  /// Base URL of the API, without a trailing slash.
  pub api_url: String,

  /// Request timeout in seconds.
  pub timeout: u64,

  /// When true, write requests wait for cache propagation before
  /// returning, so subsequent reads immediately see the change.
  pub synchronized: bool,

  /// Accept any server certificate. Test servers only.
  pub skip_tls_verify: bool,

  /// PEM CA certificate to trust, in addition to the system roots.
  pub ca_file: Option<PathBuf>,

  /// PEM client certificate for mutual TLS.
  pub client_cert: Option<PathBuf>,

  /// PEM private key matching `client_cert`.
  pub client_key: Option<PathBuf>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      api_url:         DEFAULT_API_URL.to_string(),
      timeout:         30,
      synchronized:    false,
      skip_tls_verify: false,
      ca_file:         None,
      client_cert:     None,
      client_key:      None,
    }
  }
}
