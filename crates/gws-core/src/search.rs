//! Search parameters for the group search endpoint.

/// A bag of named search filters, assembled into query pairs at request
/// time. Setters ignore empty values, so an all-empty build contributes no
/// query parameters at all.
#[derive(Debug, Clone, Default)]
pub struct SearchParameters {
  parameters: Vec<(&'static str, String)>,
}

impl SearchParameters {
  pub fn new() -> Self {
    Self::default()
  }

  fn set(mut self, key: &'static str, value: String) -> Self {
    if value.is_empty() {
      return self;
    }
    match self.parameters.iter_mut().find(|(k, _)| *k == key) {
      Some(slot) => slot.1 = value,
      None => self.parameters.push((key, value)),
    }
    self
  }

  /// Match on name. Name is some part of the group id; `*` is a wildcard.
  pub fn with_name(self, name: impl Into<String>) -> Self {
    self.set("name", name.into())
  }

  /// Match on stem, the path part of the group id.
  pub fn with_stem(self, stem: impl Into<String>) -> Self {
    self.set("stem", stem.into())
  }

  pub fn with_scope(self, scope: impl Into<String>) -> Self {
    self.set("scope", scope.into())
  }

  /// Match groups with the given member id.
  pub fn with_member(self, id: impl Into<String>) -> Self {
    self.set("member", id.into())
  }

  /// Match groups where an administrator (admin, creator, updater) is the
  /// given id.
  pub fn with_owner(self, id: impl Into<String>) -> Self {
    self.set("owner", id.into())
  }

  /// Match groups where the instructor is the given id.
  pub fn with_instructor(self, id: impl Into<String>) -> Self {
    self.set("instructor", id.into())
  }

  /// Match groups with the given affiliate. The server ignores every other
  /// parameter when this one is present.
  pub fn with_affiliate(self, id: impl Into<String>) -> Self {
    self.set("affiliate", id.into())
  }

  /// Match effective members when searching by member, owner, or
  /// instructor.
  pub fn in_effective_members(self) -> Self {
    self.set("type", "effective".into())
  }

  /// Match direct members only; this is the server default.
  pub fn in_direct_members(self) -> Self {
    self.set("type", "direct".into())
  }

  /// The non-empty parameters, in insertion order.
  pub fn query_pairs(&self) -> &[(&'static str, String)] {
    &self.parameters
  }

  pub fn is_empty(&self) -> bool {
    self.parameters.is_empty()
  }
}
