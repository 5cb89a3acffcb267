//! Lexical shape predicates shared by entity and member type inference.
//!
//! Inference is an ordered cascade over these predicates; the first matching
//! rule decides the type. Entities and members share every rule except the
//! machine-account suffix (members only) and the reserved set words
//! (entities only). The rule tables themselves live next to the types they
//! classify, in [`crate::entity`] and [`crate::member`].

use std::sync::LazyLock;

use regex::Regex;

/// Group ids carry one of these prefixes when they are not colon-separated
/// paths.
const GROUP_PREFIXES: [&str; 4] = ["uw_", "g_", "u_", "course_"];

/// Reserved ids with server-side set semantics.
const SET_WORDS: [&str; 4] = ["all", "none", "uw", "member"];

/// Hostname: dot-separated alphanumeric labels, interior hyphens allowed.
static DNS_NAME: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^(([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9])\.)+([A-Za-z0-9]|[A-Za-z0-9][A-Za-z0-9-]*[A-Za-z0-9])$",
  )
  .unwrap()
});

/// True when the string contains at least one character legal in a
/// principal id. Everything else is uninferrable.
pub(crate) fn has_principal_chars(id: &str) -> bool {
  id.chars()
    .any(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | ':' | '-' | '@' | '$'))
}

pub(crate) fn is_eppn_shaped(id: &str) -> bool {
  id.contains('@')
}

pub(crate) fn is_group_shaped(id: &str) -> bool {
  id.contains(':') || GROUP_PREFIXES.iter().any(|p| id.starts_with(p))
}

pub(crate) fn is_dns_shaped(id: &str) -> bool {
  DNS_NAME.is_match(id)
}

/// Microsoft Infrastructure machine accounts end in `$`.
pub(crate) fn is_machine_account(id: &str) -> bool {
  id.ends_with('$')
}

pub(crate) fn is_set_word(id: &str) -> bool {
  SET_WORDS.contains(&id)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn principal_chars() {
    assert!(has_principal_chars("jsmith"));
    assert!(has_principal_chars("a!!!"));
    assert!(!has_principal_chars(""));
    assert!(!has_principal_chars("!!!"));
    assert!(!has_principal_chars("  "));
  }

  #[test]
  fn dns_shapes() {
    assert!(is_dns_shaped("test.u.washington.edu"));
    assert!(is_dns_shaped("a.b"));
    assert!(is_dns_shaped("my-host.example.com"));
    assert!(!is_dns_shaped("nodots"));
    assert!(!is_dns_shaped("bad-.example.com"));
    assert!(!is_dns_shaped(".leading.dot"));
    assert!(!is_dns_shaped("trailing.dot."));
  }

  #[test]
  fn group_shapes() {
    assert!(is_group_shaped("uw_employee"));
    assert!(is_group_shaped("u_dept_team"));
    assert!(is_group_shaped("g_x"));
    assert!(is_group_shaped("course_2024aut-cse142a"));
    assert!(is_group_shaped("urn:mace:x"));
    assert!(!is_group_shaped("jsmith"));
  }
}
