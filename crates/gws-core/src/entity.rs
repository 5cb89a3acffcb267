//! Access-control entities and the lists that hold them.
//!
//! An entity names a principal attached to one of a group's access lists
//! (admins, updaters, creators, readers, optins, optouts). Entities are
//! usually built from bare id strings, with the type inferred from the id's
//! lexical shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
  error::{Error, Result},
  infer,
};

// ─── Entity ──────────────────────────────────────────────────────────────────

/// The kind of principal an entity names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
  Uwnetid,
  Group,
  Dns,
  Eppn,
  Set,
}

impl fmt::Display for EntityType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      EntityType::Uwnetid => "uwnetid",
      EntityType::Group => "group",
      EntityType::Dns => "dns",
      EntityType::Eppn => "eppn",
      EntityType::Set => "set",
    };
    f.write_str(s)
  }
}

/// A named access-control principal.
///
/// For `set` entities the id is one of the reserved words `all`, `none`,
/// `uw`, `member`, which the server interprets; the client does not validate
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
  #[serde(rename = "type")]
  pub entity_type: EntityType,

  pub id: String,

  /// Display name; populated by the server, optional in requests.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
}

impl Entity {
  /// Build an entity from a bare id, inferring its type from the id's
  /// lexical shape.
  pub fn from_id(id: impl Into<String>) -> Result<Self> {
    let id = id.into();
    let entity_type =
      infer_entity_type(&id).ok_or_else(|| Error::UninferrableEntity(id.clone()))?;
    Ok(Self { entity_type, id, name: None })
  }
}

// ─── Inference ───────────────────────────────────────────────────────────────

/// Ordered inference rules; the first matching predicate decides the type.
/// A DNS-looking group name must be caught by the group rule before the DNS
/// rule, and the reserved set words are only consulted last.
const ENTITY_RULES: [(fn(&str) -> bool, EntityType); 4] = [
  (infer::is_eppn_shaped, EntityType::Eppn),
  (infer::is_group_shaped, EntityType::Group),
  (infer::is_dns_shaped, EntityType::Dns),
  (infer::is_set_word, EntityType::Set),
];

/// Classify a bare id string, or `None` when the id has no principal-like
/// characters at all. Anything that matches no rule is a plain UW NetID.
pub fn infer_entity_type(id: &str) -> Option<EntityType> {
  if !infer::has_principal_chars(id) {
    return None;
  }
  let inferred = ENTITY_RULES
    .iter()
    .find(|(rule, _)| rule(id))
    .map(|(_, entity_type)| *entity_type)
    .unwrap_or(EntityType::Uwnetid);
  Some(inferred)
}

// ─── EntityList ──────────────────────────────────────────────────────────────

/// An insertion-ordered list of entities, unique by `(type, id)`.
///
/// A [`crate::group::Group`] owns six of these. Lists are mutated in place
/// by the add/remove operations; [`filter`](EntityList::filter) and
/// [`match_type`](EntityList::match_type) return new lists instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityList(Vec<Entity>);

impl EntityList {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
    self.0.iter()
  }

  /// Add explicit entities, skipping any `(type, id)` already present.
  pub fn add(&mut self, entities: impl IntoIterator<Item = Entity>) {
    for entity in entities {
      let exists = self
        .0
        .iter()
        .any(|e| e.entity_type == entity.entity_type && e.id == entity.id);
      if !exists {
        self.0.push(entity);
      }
    }
  }

  /// Append entities by bare id, inferring each type.
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
      let entity_type =
        infer_entity_type(&id).ok_or_else(|| Error::UninferrableEntity(id.clone()))?;
      self.0.push(Entity { entity_type, id, name: None });
    }
    Ok(())
  }

  /// Remove the first entity matching each given id. Absent ids are a
  /// silent no-op.
  pub fn remove_by_id<S>(&mut self, ids: impl IntoIterator<Item = S>)
  where
    S: AsRef<str>,
  {
    for id in ids {
      if let Some(pos) = self.0.iter().position(|e| e.id == id.as_ref()) {
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
    self.0.iter().any(|e| e.id == id)
  }

  /// A new list without entities of the given type.
  pub fn filter(&self, entity_type: EntityType) -> Self {
    Self(
      self
        .0
        .iter()
        .filter(|e| e.entity_type != entity_type)
        .cloned()
        .collect(),
    )
  }

  /// A new list with only entities of the given type.
  pub fn match_type(&self, entity_type: EntityType) -> Self {
    Self(
      self
        .0
        .iter()
        .filter(|e| e.entity_type == entity_type)
        .cloned()
        .collect(),
    )
  }

  /// The ordered id strings, discarding type and display name.
  pub fn to_ids(&self) -> Vec<String> {
    self.0.iter().map(|e| e.id.clone()).collect()
  }

  /// The ids joined with commas, as used in request paths.
  pub fn to_comma_string(&self) -> String {
    self.to_ids().join(",")
  }
}

impl From<Vec<Entity>> for EntityList {
  fn from(entities: Vec<Entity>) -> Self {
    let mut list = Self::new();
    list.add(entities);
    list
  }
}

impl FromIterator<Entity> for EntityList {
  fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
    let mut list = Self::new();
    list.add(iter);
    list
  }
}

impl IntoIterator for EntityList {
  type Item = Entity;
  type IntoIter = std::vec::IntoIter<Entity>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.into_iter()
  }
}

impl<'a> IntoIterator for &'a EntityList {
  type Item = &'a Entity;
  type IntoIter = std::slice::Iter<'a, Entity>;

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
      ("jsmith", Some(EntityType::Uwnetid)),
      ("js-mith2", Some(EntityType::Uwnetid)),
      ("jsmith@uw.edu", Some(EntityType::Eppn)),
      ("urn:mace:washington.edu:x", Some(EntityType::Group)),
      ("uw_employee", Some(EntityType::Group)),
      ("g_devtools", Some(EntityType::Group)),
      ("u_dept_team", Some(EntityType::Group)),
      ("course_2024aut-cse142a", Some(EntityType::Group)),
      ("test.u.washington.edu", Some(EntityType::Dns)),
      ("all", Some(EntityType::Set)),
      ("none", Some(EntityType::Set)),
      ("uw", Some(EntityType::Set)),
      ("member", Some(EntityType::Set)),
      ("", None),
      ("!!!", None),
    ];
    for (id, expected) in cases {
      assert_eq!(infer_entity_type(id), expected, "id: {id:?}");
    }
  }

  #[test]
  fn group_rule_wins_over_dns() {
    // A colon-separated path is a group even when the leaf looks like a
    // hostname.
    assert_eq!(
      infer_entity_type("course:host.example.com"),
      Some(EntityType::Group)
    );
    assert_eq!(infer_entity_type("uw_host.example.com"), Some(EntityType::Group));
  }

  #[test]
  fn eppn_rule_wins_over_group() {
    assert_eq!(infer_entity_type("u_team@uw.edu"), Some(EntityType::Eppn));
  }

  #[test]
  fn machine_account_suffix_is_not_special_for_entities() {
    assert_eq!(infer_entity_type("machine$"), Some(EntityType::Uwnetid));
  }

  #[test]
  fn append_by_id_infers_and_dedupes() {
    let mut list = EntityList::new();
    list.append_by_id(["jsmith"]).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list.iter().next().unwrap().entity_type, EntityType::Uwnetid);

    list.append_by_id(["u_mygroup_admins"]).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(
      list.iter().nth(1).unwrap().entity_type,
      EntityType::Group
    );

    // Idempotent: the duplicate is skipped.
    list.append_by_id(["jsmith"]).unwrap();
    assert_eq!(list.len(), 2);
  }

  #[test]
  fn append_by_id_halts_batch_on_uninferrable_id() {
    // Ids before the bad one are kept; ids after it are dropped.
    let mut list = EntityList::new();
    let err = list.append_by_id(["alice", "!!!", "bob"]).unwrap_err();
    assert!(err.to_string().contains("!!!"));
    assert!(list.contains("alice"));
    assert!(!list.contains("bob"));
    assert_eq!(list.len(), 1);
  }

  #[test]
  fn remove_by_id_then_contains_is_false() {
    let mut list = EntityList::new();
    list.append_by_id(["alice", "bob"]).unwrap();
    list.remove_by_id(["alice"]);
    assert!(!list.contains("alice"));
    assert!(list.contains("bob"));

    // Removing an absent id is a no-op.
    list.remove_by_id(["ghost"]);
    assert_eq!(list.len(), 1);
  }

  #[test]
  fn remove_all_empties_the_list() {
    let mut list = EntityList::new();
    list.append_by_id(["alice", "bob"]).unwrap();
    list.remove_all();
    assert!(list.is_empty());
  }

  #[test]
  fn add_dedupes_by_type_and_id() {
    let mut list = EntityList::new();
    let admin = Entity {
      entity_type: EntityType::Uwnetid,
      id:          "alice".into(),
      name:        None,
    };
    list.add([admin.clone(), admin.clone()]);
    assert_eq!(list.len(), 1);

    // Same id under a different type is a different principal.
    list.add([Entity {
      entity_type: EntityType::Eppn,
      id:          "alice".into(),
      name:        None,
    }]);
    assert_eq!(list.len(), 2);
  }

  #[test]
  fn filter_and_match_partition_the_list() {
    let mut list = EntityList::new();
    list
      .append_by_id(["alice", "u_team_a", "bob", "u_team_b"])
      .unwrap();

    let groups = list.match_type(EntityType::Group);
    let rest = list.filter(EntityType::Group);
    assert_eq!(groups.len(), 2);
    assert_eq!(rest.len(), 2);
    assert_eq!(groups.len() + rest.len(), list.len());
    for entity in &groups {
      assert!(!rest.contains(&entity.id));
    }

    // The originals are untouched.
    assert_eq!(list.len(), 4);
  }

  #[test]
  fn to_ids_round_trips_for_reinferrable_ids() {
    let mut list = EntityList::new();
    list.append_by_id(["alice", "bob", "carol"]).unwrap();

    let mut rebuilt = EntityList::new();
    rebuilt.append_by_id(list.to_ids()).unwrap();
    assert_eq!(rebuilt, list);
  }

  #[test]
  fn comma_string_preserves_order() {
    let mut list = EntityList::new();
    list.append_by_id(["alice", "bob"]).unwrap();
    assert_eq!(list.to_comma_string(), "alice,bob");
    assert_eq!(EntityList::new().to_comma_string(), "");
  }

  #[test]
  fn serde_wire_shape() {
    let json = r#"[{"type":"uwnetid","id":"alice","name":"Alice L"},{"type":"set","id":"all"}]"#;
    let list: EntityList = serde_json::from_str(json).unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list.iter().next().unwrap().name.as_deref(), Some("Alice L"));
    assert_eq!(list.iter().nth(1).unwrap().entity_type, EntityType::Set);

    let out = serde_json::to_string(&list).unwrap();
    assert!(out.contains(r#""type":"set""#));
    // Absent display names are omitted entirely.
    assert!(!out.contains(r#""name":null"#));
  }
}
