//! Group members and membership lists.
//!
//! Members are distinct from access-control entities: the inference grammar
//! adds a machine-account rule, drops the reserved set words, and list
//! uniqueness is by id alone — a given id denotes one member whatever its
//! type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  infer,
};

// ─── Member ──────────────────────────────────────────────────────────────────

/// The kind of principal a member is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
  Uwnetid,
  Group,
  Dns,
  Eppn,
  /// Microsoft Infrastructure machine account (id ends in `$`).
  Uwwi,
}

impl fmt::Display for MemberType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      MemberType::Uwnetid => "uwnetid",
      MemberType::Group => "group",
      MemberType::Dns => "dns",
      MemberType::Eppn => "eppn",
      MemberType::Uwwi => "uwwi",
    };
    f.write_str(s)
  }
}

/// One membership entry.
///
/// `mtype` and `source` are annotations the server attaches to membership
/// reads (direct/indirect, and the originating group for indirect members).
/// They are never serialized into requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
  #[serde(rename = "type")]
  pub member_type: MemberType,

  pub id: String,

  /// `direct` or `indirect`; effective-membership reads only.
  #[serde(default, skip_serializing)]
  pub mtype: Option<String>,

  /// Originating group for indirect members.
  #[serde(default, skip_serializing)]
  pub source: Option<String>,
}

impl Member {
  /// Build a member from a bare id, inferring its type from the id's
  /// lexical shape.
  pub fn from_id(id: impl Into<String>) -> Result<Self> {
    let id = id.into();
    let member_type =
      infer_member_type(&id).ok_or_else(|| Error::UninferrableMember(id.clone()))?;
    Ok(Self { member_type, id, mtype: None, source: None })
  }
}

// ─── Inference ───────────────────────────────────────────────────────────────

/// Ordered inference rules; the first matching predicate decides the type.
/// The machine-account suffix outranks everything, and the reserved set
/// words of the entity grammar do not apply to members.
const MEMBER_RULES: [(fn(&str) -> bool, MemberType); 4] = [
  (infer::is_machine_account, MemberType::Uwwi),
  (infer::is_eppn_shaped, MemberType::Eppn),
  (infer::is_group_shaped, MemberType::Group),
  (infer::is_dns_shaped, MemberType::Dns),
];

/// Classify a bare id string, or `None` when the id has no principal-like
/// characters at all. Anything that matches no rule is a plain UW NetID.
pub fn infer_member_type(id: &str) -> Option<MemberType> {
  if !infer::has_principal_chars(id) {
    return None;
  }
  let inferred = MEMBER_RULES
    .iter()
    .find(|(rule, _)| rule(id))
    .map(|(_, member_type)| *member_type)
    .unwrap_or(MemberType::Uwnetid);
  Some(inferred)
}

// ─── MemberList ──────────────────────────────────────────────────────────────

/// An insertion-ordered list of members, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberList(Vec<Member>);

impl MemberList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Member> {
    self.0.iter()
  }

  /// Add explicit members, skipping ids already present.
  pub fn add(&mut self, members: impl IntoIterator<Item = Member>) {
    for member in members {
      if !self.contains(&member.id) {
        self.0.push(member);
      }
    }
  }

  /// Append members by bare id, inferring each type.
  ///
  /// Ids already present are skipped, so the operation is idempotent. An id
  /// whose type cannot be inferred stops the batch: ids before it are
  /// already appended, ids after it are not.
  pub fn append_by_id<S>(&mut self, ids: impl IntoIterator<Item = S>) -> Result<()>
  where
    S: Into<String>,
  {
    for id in ids {
      let id = id.into();
      if self.contains(&id) {
        continue;
      }
      let member_type =
        infer_member_type(&id).ok_or_else(|| Error::UninferrableMember(id.clone()))?;
      self.0.push(Member { member_type, id, mtype: None, source: None });
    }
    Ok(())
  }

  /// Remove the first member matching each given id. Absent ids are a
  /// silent no-op.
  pub fn remove_by_id<S>(&mut self, ids: impl IntoIterator<Item = S>)
  where
    S: AsRef<str>,
  {
    for id in ids {
      if let Some(pos) = self.0.iter().position(|m| m.id == id.as_ref()) {
        self.0.remove(pos);
      }
    }
  }

  /// Reset the list to empty.
  pub fn remove_all(&mut self) {
    self.0.clear();
  }

  /// Membership predicate by id only.
  pub fn contains(&self, id: &str) -> bool {
    self.0.iter().any(|m| m.id == id)
  }

  /// A new list without members of the given type.
  pub fn filter(&self, member_type: MemberType) -> Self {
    Self(
      self
        .0
        .iter()
        .filter(|m| m.member_type != member_type)
        .cloned()
        .collect(),
    )
  }

  /// A new list with only members of the given type.
  pub fn match_type(&self, member_type: MemberType) -> Self {
    Self(
      self
        .0
        .iter()
        .filter(|m| m.member_type == member_type)
        .cloned()
        .collect(),
    )
  }

  /// The ordered id strings, discarding every other member field.
  pub fn to_ids(&self) -> Vec<String> {
    self.0.iter().map(|m| m.id.clone()).collect()
  }

  /// The ids joined with commas, as used in request paths.
  pub fn to_comma_string(&self) -> String {
    self.to_ids().join(",")
  }
}

impl From<Vec<Member>> for MemberList {
  fn from(members: Vec<Member>) -> Self {
    let mut list = Self::new();
    list.add(members);
    list
  }
}

impl FromIterator<Member> for MemberList {
  fn from_iter<I: IntoIterator<Item = Member>>(iter: I) -> Self {
    let mut list = Self::new();
    list.add(iter);
    list
  }
}

impl IntoIterator for MemberList {
  type Item = Member;
  type IntoIter = std::vec::IntoIter<Member>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}

impl<'a> IntoIterator for &'a MemberList {
  type Item = &'a Member;
  type IntoIter = std::slice::Iter<'a, Member>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn inference_table() {
    let cases = [
      ("jsmith", Some(MemberType::Uwnetid)),
      ("machine$", Some(MemberType::Uwwi)),
      ("jsmith@uw.edu", Some(MemberType::Eppn)),
      ("urn:mace:washington.edu:x", Some(MemberType::Group)),
      ("uw_employee", Some(MemberType::Group)),
      ("u_dept_team", Some(MemberType::Group)),
      ("course_2024aut-cse142a", Some(MemberType::Group)),
      ("test.u.washington.edu", Some(MemberType::Dns)),
      ("", None),
      ("!!!", None),
    ];
    for (id, expected) in cases {
      assert_eq!(infer_member_type(id), expected, "id: {id:?}");
    }
  }

  #[test]
  fn reserved_set_words_are_plain_netids_for_members() {
    for id in ["all", "none", "uw", "member"] {
      assert_eq!(infer_member_type(id), Some(MemberType::Uwnetid), "id: {id:?}");
    }
  }

  #[test]
  fn machine_account_rule_outranks_the_rest() {
    // The suffix wins even when the id would otherwise match a later rule.
    assert_eq!(infer_member_type("u_team$"), Some(MemberType::Uwwi));
  }

  #[test]
  fn append_by_id_is_idempotent() {
    let mut list = MemberList::new();
    list.append_by_id(["alice", "machine$", "alice"]).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.iter().nth(1).unwrap().member_type, MemberType::Uwwi);
  }

  #[test]
  fn append_by_id_halts_batch_on_uninferrable_id() {
    let mut list = MemberList::new();
    let err = list.append_by_id(["alice", "???", "bob"]).unwrap_err();
    assert!(err.to_string().contains("???"));
    assert!(list.contains("alice"));
    assert!(!list.contains("bob"));
  }

  #[test]
  fn remove_then_contains_is_false() {
    let mut list = MemberList::new();
    list.append_by_id(["alice", "bob"]).unwrap();
    list.remove_by_id(["bob", "ghost"]);
    assert!(!list.contains("bob"));
    assert_eq!(list.len(), 1);
    list.remove_all();
    assert!(list.is_empty());
  }

  #[test]
  fn filter_and_match_partition_the_list() {
    let mut list = MemberList::new();
    list
      .append_by_id(["alice", "u_team_a", "machine$", "bob"])
      .unwrap();

    let netids = list.match_type(MemberType::Uwnetid);
    let rest = list.filter(MemberType::Uwnetid);
    assert_eq!(netids.len(), 2);
    assert_eq!(rest.len(), 2);
    assert_eq!(netids.len() + rest.len(), list.len());
    for member in &netids {
      assert!(!rest.contains(&member.id));
    }
  }

  #[test]
  fn add_dedupes_by_id_alone() {
    let mut list = MemberList::new();
    list.add([
      Member {
        member_type: MemberType::Uwnetid,
        id:          "alice".into(),
        mtype:       None,
        source:      None,
      },
      // Same id, different type: still the same member.
      Member {
        member_type: MemberType::Eppn,
        id:          "alice".into(),
        mtype:       None,
        source:      None,
      },
    ]);
    assert_eq!(list.len(), 1);
    assert_eq!(list.iter().next().unwrap().member_type, MemberType::Uwnetid);
  }

  #[test]
  fn serde_reads_annotations_but_never_writes_them() {
    let json = r#"[{"type":"group","id":"u_sub_team","mtype":"indirect","source":"u_parent"}]"#;
    let list: MemberList = serde_json::from_str(json).unwrap();
    let member = list.iter().next().unwrap();
    assert_eq!(member.mtype.as_deref(), Some("indirect"));
    assert_eq!(member.source.as_deref(), Some("u_parent"));

    let out = serde_json::to_string(&list).unwrap();
    assert!(!out.contains("mtype"));
    assert!(!out.contains("source"));
    assert!(out.contains(r#""type":"group""#));
  }
}
