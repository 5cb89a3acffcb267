//! The client itself: lazy one-time TLS configuration and the response
//! decoding helpers shared by every resource operation.

use std::{fs, sync::OnceLock, time::Duration};

use gws_core::group::Group;
use reqwest::{
  Response, StatusCode,
  header::{self, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;

use crate::{
  config::Config,
  error::{Error, Result},
  wire::{Envelope, ErrorEnvelope},
};

// ─── Client ──────────────────────────────────────────────────────────────────

/// A Groups Service client.
///
/// Construction is cheap and performs no I/O. The underlying HTTP client —
/// including certificate loading for mutual TLS — is built exactly once, on
/// the first request; a failure during that build is latched and replayed
/// to every later call. A configured client is freely shared across tasks.
pub struct Client {
  config: Config,
  http:   OnceLock<std::result::Result<reqwest::Client, String>>,
}

impl Client {
  /// Create a client. Fails only on an obviously unusable configuration;
  /// certificate problems surface on first use (or via
  /// [`ensure_configured`](Client::ensure_configured)).
  pub fn new(config: Config) -> Result<Self> {
    if config.api_url.trim().is_empty() {
      return Err(Error::Config("api_url is empty".into()));
    }
    Ok(Self { config, http: OnceLock::new() })
  }

  /// Force the one-time configuration now, surfacing any certificate error
  /// without issuing a network call.
  pub fn ensure_configured(&self) -> Result<()> {
    self.http().map(|_| ())
  }

  /// Make write requests wait until the change is visible to reads.
  /// Trades write latency for read-after-write consistency; off by
  /// default.
  pub fn set_synchronized(&mut self, enabled: bool) {
    self.config.synchronized = enabled;
  }

  pub(crate) fn http(&self) -> Result<&reqwest::Client> {
    match self.http.get_or_init(|| build_http(&self.config)) {
      Ok(client) => Ok(client),
      Err(message) => Err(Error::Config(message.clone())),
    }
  }

  pub(crate) fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
  }

  /// Query pairs appended to every write request.
  pub(crate) fn write_query(&self) -> &'static [(&'static str, &'static str)] {
    if self.config.synchronized {
      // Presence is what matters, not the value.
      &[("synchronized", "true")]
    } else {
      &[]
    }
  }
}

/// Build the HTTP client from the configuration. Every failure is reported
/// as a message string so the latched result stays cloneable.
fn build_http(config: &Config) -> std::result::Result<reqwest::Client, String> {
  let mut headers = HeaderMap::new();
  headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
  headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

  let mut builder = reqwest::Client::builder()
    .default_headers(headers)
    .timeout(Duration::from_secs(config.timeout))
    .use_rustls_tls();

  if config.skip_tls_verify {
    builder = builder.danger_accept_invalid_certs(true);
  }

  if let Some(path) = &config.ca_file {
    let pem = fs::read(path)
      .map_err(|e| format!("reading CA file {}: {e}", path.display()))?;
    let ca = reqwest::Certificate::from_pem(&pem)
      .map_err(|e| format!("parsing CA file {}: {e}", path.display()))?;
    builder = builder.add_root_certificate(ca);
  }

  if config.client_cert.is_some() || config.client_key.is_some() {
    let (Some(cert_path), Some(key_path)) = (&config.client_cert, &config.client_key)
    else {
      return Err("client_cert and client_key must both be set".into());
    };
    let mut pem = fs::read(cert_path)
      .map_err(|e| format!("reading client certificate {}: {e}", cert_path.display()))?;
    let key = fs::read(key_path)
      .map_err(|e| format!("reading client key {}: {e}", key_path.display()))?;
    pem.extend_from_slice(&key);
    let identity = reqwest::Identity::from_pem(&pem)
      .map_err(|e| format!("loading client certificate pair: {e}"))?;
    builder = builder.identity(identity);
  }

  builder.build().map_err(|e| format!("building HTTP client: {e}"))
}

// ─── Argument validation ─────────────────────────────────────────────────────

/// Reject an empty required argument before any request is issued.
pub(crate) fn require(name: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::EmptyArgument(name));
  }
  Ok(())
}

// ─── Response decoding ───────────────────────────────────────────────────────

/// Decode a success envelope, or the error envelope on a non-2xx status.
pub(crate) async fn read_data<T: DeserializeOwned>(resp: Response) -> Result<T> {
  let status = resp.status();
  if !status.is_success() {
    return Err(api_error(status, resp).await);
  }
  let envelope: Envelope<T> = resp.json().await?;
  Ok(envelope.data)
}

/// Decode a group response, capturing the ETag header onto the group.
pub(crate) async fn read_group(resp: Response) -> Result<Group> {
  let status = resp.status();
  if !status.is_success() {
    return Err(api_error(status, resp).await);
  }
  let etag = resp
    .headers()
    .get(header::ETAG)
    .and_then(|v| v.to_str().ok())
    .map(str::to_owned);
  let envelope: Envelope<Group> = resp.json().await?;
  let mut group = envelope.data;
  group.etag = etag;
  Ok(group)
}

/// Decode a 2xx body directly as `T`, without the usual envelope. The
/// affiliate PUT endpoint answers this way.
pub(crate) async fn read_bare<T: DeserializeOwned>(resp: Response) -> Result<T> {
  let status = resp.status();
  if !status.is_success() {
    return Err(api_error(status, resp).await);
  }
  Ok(resp.json().await?)
}

/// Decode a membership PUT response: a 2xx carries the error-envelope
/// shape with the unresolved ids in `notFound`. Unresolved ids are not a
/// failure.
pub(crate) async fn read_not_found(resp: Response) -> Result<Vec<String>> {
  let status = resp.status();
  if !status.is_success() {
    return Err(api_error(status, resp).await);
  }
  let ids = match resp.json::<ErrorEnvelope>().await {
    Ok(envelope) => envelope
      .errors
      .into_iter()
      .next()
      .map(|fault| fault.not_found)
      .unwrap_or_default(),
    // An empty or non-envelope success body means nothing was unresolved.
    Err(_) => Vec::new(),
  };
  Ok(ids)
}

/// Discard a success body, or decode the error envelope.
pub(crate) async fn read_empty(resp: Response) -> Result<()> {
  let status = resp.status();
  if !status.is_success() {
    return Err(api_error(status, resp).await);
  }
  Ok(())
}

/// Decode a non-2xx response into an API error. Only the first element of
/// the `errors` array is considered; an unparseable body falls back to the
/// HTTP status alone.
async fn api_error(status: StatusCode, resp: Response) -> Error {
  match resp.json::<ErrorEnvelope>().await {
    Ok(envelope) if !envelope.errors.is_empty() => {
      let fault = &envelope.errors[0];
      Error::Api { status: fault.status, detail: fault.detail.join(", ") }
    }
    _ => Error::Api { status: status.as_u16(), detail: String::new() },
  }
}
