//! Group — the full group resource, plus the lightweight search reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityList;

// ─── Classification ──────────────────────────────────────────────────────────

/// Data classification of a group's membership. A group with no
/// classification omits the field entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
  #[serde(rename = "u")]
  Public,
  #[serde(rename = "r")]
  Restricted,
  #[serde(rename = "c")]
  Confidential,
}

// ─── Group ───────────────────────────────────────────────────────────────────

/// Groups Service group metadata plus the six access-control lists.
///
/// `etag` is captured from the last successful GET or PUT and sent as an
/// `If-Match` precondition on updates; it never appears in a request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
  /// Unique, opaque identifier for the group; assigned by the server.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub regid: String,

  /// Id of the group, including its path.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub id: String,

  /// Descriptive name of the group.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub display_name: String,

  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub description: String,

  /// Create timestamp (milliseconds from epoch).
  #[serde(
    default,
    with = "chrono::serde::ts_milliseconds_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub created: Option<DateTime<Utc>>,

  /// Modify timestamp (milliseconds from epoch).
  #[serde(
    default,
    with = "chrono::serde::ts_milliseconds_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub last_modified: Option<DateTime<Utc>>,

  /// Last membership-change timestamp (milliseconds from epoch).
  #[serde(
    default,
    with = "chrono::serde::ts_milliseconds_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub last_member_modified: Option<DateTime<Utc>>,

  /// Contact person (UW NetID) for the group.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub contact: String,

  /// Multi-factor authentication requirement; string-encoded on the wire.
  #[serde(default, with = "numeric_string", skip_serializing_if = "Option::is_none")]
  pub authnfactor: Option<u32>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub classification: Option<Classification>,

  /// Membership dependency group name, e.g. `uw_employee`.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub depends_on: String,

  /// Numeric GID; string-encoded on the wire.
  #[serde(default, with = "numeric_string", skip_serializing_if = "Option::is_none")]
  pub gid: Option<u32>,

  /// Entities with full group access.
  #[serde(default, skip_serializing_if = "EntityList::is_empty")]
  pub admins: EntityList,

  /// Entities who can edit membership.
  #[serde(default, skip_serializing_if = "EntityList::is_empty")]
  pub updaters: EntityList,

  /// Entities who can create sub-groups.
  #[serde(default, skip_serializing_if = "EntityList::is_empty")]
  pub creators: EntityList,

  /// Entities who can read group membership.
  #[serde(default, skip_serializing_if = "EntityList::is_empty")]
  pub readers: EntityList,

  /// Entities who can opt in to membership.
  #[serde(default, skip_serializing_if = "EntityList::is_empty")]
  pub optins: EntityList,

  /// Entities who can opt out of membership.
  #[serde(default, skip_serializing_if = "EntityList::is_empty")]
  pub optouts: EntityList,

  /// Optimistic-concurrency token from the last GET/PUT; not a wire field.
  #[serde(skip)]
  pub etag: Option<String>,
}

impl Group {
  /// A bare group with only its id set, ready to fill in for creation.
  pub fn new(id: impl Into<String>) -> Self {
    Self { id: id.into(), ..Self::default() }
  }
}

// ─── GroupReference ──────────────────────────────────────────────────────────

/// Lightweight reference to a group, as returned by a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GroupReference {
  pub regid: String,

  /// Id of the group, including its path.
  pub id: String,

  pub display_name: String,

  /// URL for this group resource.
  pub url: String,

  /// Indirect group paths, for effective-membership searches.
  pub via: Vec<String>,
}

// ─── Wire helpers ────────────────────────────────────────────────────────────

/// The service encodes `authnfactor` and `gid` as JSON strings. Accept
/// either encoding on read, always emit the string form.
mod numeric_string {
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(value: &Option<u32>, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match value {
      Some(n) => serializer.serialize_str(&n.to_string()),
      None => serializer.serialize_none(),
    }
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
  where
    D: Deserializer<'de>,
  {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Num(u32),
      Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
      None => Ok(None),
      Some(Raw::Num(n)) => Ok(Some(n)),
      Some(Raw::Str(s)) if s.is_empty() => Ok(None),
      Some(Raw::Str(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const GROUP_JSON: &str = r#"{
    "regid": "abc123def456",
    "id": "u_dept_team",
    "displayName": "Departmental team",
    "description": "The team",
    "created": 1214343146201,
    "lastModified": 1214343146201,
    "contact": "jsmith",
    "authnfactor": "2",
    "classification": "c",
    "dependsOn": "uw_employee",
    "gid": "70013",
    "admins": [{"type": "uwnetid", "id": "jsmith"}],
    "readers": [{"type": "set", "id": "all"}]
  }"#;

  #[test]
  fn deserializes_the_server_shape() {
    let group: Group = serde_json::from_str(GROUP_JSON).unwrap();
    assert_eq!(group.regid, "abc123def456");
    assert_eq!(group.display_name, "Departmental team");
    assert_eq!(group.authnfactor, Some(2));
    assert_eq!(group.gid, Some(70013));
    assert_eq!(group.classification, Some(Classification::Confidential));
    assert_eq!(group.depends_on, "uw_employee");
    assert_eq!(group.created.unwrap().timestamp_millis(), 1214343146201);
    assert_eq!(group.admins.len(), 1);
    assert_eq!(group.readers.len(), 1);
    assert!(group.updaters.is_empty());
    assert!(group.etag.is_none());
  }

  #[test]
  fn numeric_fields_tolerate_bare_numbers() {
    let group: Group =
      serde_json::from_str(r#"{"id": "u_x", "gid": 70013, "authnfactor": 1}"#).unwrap();
    assert_eq!(group.gid, Some(70013));
    assert_eq!(group.authnfactor, Some(1));
  }

  #[test]
  fn serializes_sparsely_and_never_leaks_the_etag() {
    let mut group = Group::new("u_dept_team");
    group.display_name = "Departmental team".into();
    group.gid = Some(70013);
    group.etag = Some("abc".into());
    group.admins.append_by_id(["jsmith"]).unwrap();

    let json = serde_json::to_string(&group).unwrap();
    assert!(json.contains(r#""displayName":"Departmental team""#));
    assert!(json.contains(r#""gid":"70013""#));
    assert!(json.contains(r#""admins""#));
    assert!(!json.contains("etag"));
    assert!(!json.contains("regid"));
    assert!(!json.contains("classification"));
    assert!(!json.contains("updaters"));
  }

  #[test]
  fn classification_wire_values() {
    for (wire, expected) in [
      ("u", Classification::Public),
      ("r", Classification::Restricted),
      ("c", Classification::Confidential),
    ] {
      let group: Group =
        serde_json::from_str(&format!(r#"{{"id":"u_x","classification":"{wire}"}}"#)).unwrap();
      assert_eq!(group.classification, Some(expected));
    }
  }

  #[test]
  fn group_reference_deserializes() {
    let json = r#"{
      "regid": "abc",
      "id": "u_dept_team",
      "displayName": "Team",
      "url": "https://groups.uw.edu/group_sws/v3/group/u_dept_team",
      "via": ["u_parent"]
    }"#;
    let reference: GroupReference = serde_json::from_str(json).unwrap();
    assert_eq!(reference.id, "u_dept_team");
    assert_eq!(reference.via, vec!["u_parent".to_string()]);
  }
}
