//! Affiliate state for a group (Exchange email, Google Apps, UW NetID,
//! RADIUS).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity::EntityList;

/// A service affiliation that can be enabled on a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffiliateName {
  Email,
  Google,
  Uwnetid,
  Radius,
}

impl fmt::Display for AffiliateName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      AffiliateName::Email => "email",
      AffiliateName::Google => "google",
      AffiliateName::Uwnetid => "uwnetid",
      AffiliateName::Radius => "radius",
    };
    f.write_str(s)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AffiliateStatus {
  Active,
  Inactive,
}

/// Affiliate state as reported by the service.
///
/// `name` is kept as a plain string: the server's spelling does not always
/// match the request-path enum (`netid` vs `uwnetid`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Affiliate {
  pub name: String,

  pub status: AffiliateStatus,

  /// Authorized email senders.
  #[serde(default, skip_serializing_if = "EntityList::is_empty")]
  pub sender: EntityList,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn deserializes_the_server_shape() {
    let json = r#"{
      "name": "google",
      "status": "active",
      "sender": [{"type": "uwnetid", "id": "jsmith"}]
    }"#;
    let affiliate: Affiliate = serde_json::from_str(json).unwrap();
    assert_eq!(affiliate.status, AffiliateStatus::Active);
    assert_eq!(affiliate.sender.len(), 1);
  }

  #[test]
  fn names_render_as_path_segments() {
    assert_eq!(AffiliateName::Google.to_string(), "google");
    assert_eq!(AffiliateName::Uwnetid.to_string(), "uwnetid");
  }
}
