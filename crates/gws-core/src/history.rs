//! Group change-history records and query options.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Query options ───────────────────────────────────────────────────────────

/// Sort order for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOrder {
  Ascending,
  Descending,
}

impl HistoryOrder {
  fn as_query_value(self) -> &'static str {
    match self {
      HistoryOrder::Ascending => "a",
      HistoryOrder::Descending => "d",
    }
  }
}

/// Activity class filter for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryActivity {
  Membership,
  Group,
}

impl HistoryActivity {
  fn as_query_value(self) -> &'static str {
    match self {
      HistoryActivity::Membership => "membership",
      HistoryActivity::Group => "group",
    }
  }
}

/// Options for a history query. Unset fields are omitted from the query
/// string entirely.
#[derive(Debug, Clone, Default)]
pub struct HistoryOptions {
  start:    Option<DateTime<Utc>>,
  size:     Option<u32>,
  order:    Option<HistoryOrder>,
  activity: Option<HistoryActivity>,
  member:   Option<String>,
}

impl HistoryOptions {
  pub fn new() -> Self {
    Self::default()
  }

  /// Only records at or after this time.
  pub fn since(mut self, start: DateTime<Utc>) -> Self {
    self.start = Some(start);
    self
  }

  /// Maximum number of records to return.
  pub fn limit(mut self, size: u32) -> Self {
    self.size = Some(size);
    self
  }

  pub fn order(mut self, order: HistoryOrder) -> Self {
    self.order = Some(order);
    self
  }

  pub fn for_activity(mut self, activity: HistoryActivity) -> Self {
    self.activity = Some(activity);
    self
  }

  /// Only records involving this member id.
  pub fn for_member(mut self, id: impl Into<String>) -> Self {
    let id = id.into();
    if !id.is_empty() {
      self.member = Some(id);
    }
    self
  }

  /// The set options as query pairs; start times become millisecond epochs.
  pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    if let Some(activity) = self.activity {
      pairs.push(("activity", activity.as_query_value().to_string()));
    }
    if let Some(order) = self.order {
      pairs.push(("order", order.as_query_value().to_string()));
    }
    if let Some(start) = self.start {
      pairs.push(("start", start.timestamp_millis().to_string()));
    }
    if let Some(size) = self.size {
      pairs.push(("size", size.to_string()));
    }
    if let Some(member) = &self.member {
      pairs.push(("id", member.clone()));
    }
    pairs
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// One history record for a group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEvent {
  /// Activity class, e.g. `membership`.
  #[serde(default)]
  pub activity: String,

  #[serde(default)]
  pub description: String,

  /// When the change happened (milliseconds from epoch).
  #[serde(
    default,
    with = "chrono::serde::ts_milliseconds_option",
    skip_serializing_if = "Option::is_none"
  )]
  pub timestamp: Option<DateTime<Utc>>,

  /// Who made the change.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user: Option<String>,
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn default_options_yield_no_pairs() {
    assert!(HistoryOptions::new().query_pairs().is_empty());
  }

  #[test]
  fn set_options_become_query_pairs() {
    let start = Utc.timestamp_millis_opt(1214343146201).unwrap();
    let options = HistoryOptions::new()
      .since(start)
      .limit(100)
      .order(HistoryOrder::Descending)
      .for_activity(HistoryActivity::Membership)
      .for_member("jsmith");
    assert_eq!(
      options.query_pairs(),
      vec![
        ("activity", "membership".to_string()),
        ("order", "d".to_string()),
        ("start", "1214343146201".to_string()),
        ("size", "100".to_string()),
        ("id", "jsmith".to_string()),
      ]
    );
  }

  #[test]
  fn empty_member_filter_is_ignored() {
    assert!(HistoryOptions::new().for_member("").query_pairs().is_empty());
  }

  #[test]
  fn event_deserializes_the_server_shape() {
    let json = r#"{
      "activity": "membership",
      "description": "add member: alice",
      "timestamp": 1214343146201,
      "user": "jsmith"
    }"#;
    let event: HistoryEvent = serde_json::from_str(json).unwrap();
    assert_eq!(event.activity, "membership");
    assert_eq!(event.timestamp.unwrap().timestamp_millis(), 1214343146201);
    assert_eq!(event.user.as_deref(), Some("jsmith"));
  }
}
