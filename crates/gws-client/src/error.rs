//! Error types for `gws-client`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Certificate loading or HTTP-client construction failed. Latched at
  /// first use and returned to every later call.
  #[error("configuration error: {0}")]
  Config(String),

  /// A required argument was empty; raised before any network call.
  #[error("required argument {0} is empty")]
  EmptyArgument(&'static str),

  /// An update was attempted on a group that has never been fetched.
  #[error("group {0} has no etag; fetch it before updating")]
  MissingEtag(String),

  /// A single-member lookup came back empty.
  #[error("member {member} not found in group {group}")]
  MemberNotFound { group: String, member: String },

  /// The service answered outside the 2xx range. Only the first element of
  /// the response's `errors` array is carried.
  #[error("API error status {status}: {detail}")]
  Api { status: u16, detail: String },

  #[error(transparent)]
  Transport(#[from] reqwest::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
