//! Wire shapes shared by every Groups Service endpoint.

use gws_core::{group::Group, member::MemberList};
use serde::{Deserialize, Serialize};

/// Success envelope. Responses arrive as `{schemas, meta, data}`; only the
/// payload is of interest, the rest is dropped during deserialization.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
  pub data: T,
}

/// Error envelope: `{schemas, meta, errors}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
  #[serde(default)]
  pub errors: Vec<ApiFault>,
}

/// One error record. Member-PUT responses reuse this shape on success, with
/// a 2xx `status` and the unresolved ids in `notFound` — the HTTP status
/// range decides which reading applies, never the payload shape.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiFault {
  pub status: u16,

  #[serde(default)]
  pub detail: Vec<String>,

  #[serde(default, rename = "notFound")]
  pub not_found: Vec<String>,
}

/// A group packaged for a PUT body.
#[derive(Debug, Serialize)]
pub(crate) struct PutGroup<'a> {
  pub data: &'a Group,
}

/// A membership list packaged for a PUT body.
#[derive(Debug, Serialize)]
pub(crate) struct PutMembership<'a> {
  pub members: &'a MemberList,
}

/// Payload of a `?view=count` membership request.
#[derive(Debug, Deserialize)]
pub(crate) struct CountData {
  pub count: usize,
}
