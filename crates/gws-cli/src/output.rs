//! Output rendering for text and JSON modes.

use anyhow::Result;
use gws_core::{
  affiliate::{Affiliate, AffiliateStatus},
  group::{Group, GroupReference},
  history::HistoryEvent,
  member::MemberList,
};
use serde::Serialize;

pub fn json<T: Serialize>(value: &T) -> Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

pub fn group_text(group: &Group) {
  println!("{}", group.id);
  if !group.display_name.is_empty() {
    println!("  display name: {}", group.display_name);
  }
  if !group.description.is_empty() {
    println!("  description:  {}", group.description);
  }
  if !group.regid.is_empty() {
    println!("  regid:        {}", group.regid);
  }
  if !group.contact.is_empty() {
    println!("  contact:      {}", group.contact);
  }
  if let Some(created) = group.created {
    println!("  created:      {created}");
  }
  if let Some(modified) = group.last_modified {
    println!("  modified:     {modified}");
  }
  if let Some(gid) = group.gid {
    println!("  gid:          {gid}");
  }
  if !group.depends_on.is_empty() {
    println!("  depends on:   {}", group.depends_on);
  }
  for (label, list) in [
    ("admins", &group.admins),
    ("updaters", &group.updaters),
    ("creators", &group.creators),
    ("readers", &group.readers),
    ("optins", &group.optins),
    ("optouts", &group.optouts),
  ] {
    if !list.is_empty() {
      println!("  {label}:       {}", list.to_comma_string());
    }
  }
}

pub fn members_text(members: &MemberList) {
  for member in members {
    match &member.source {
      Some(source) => println!("{}\t{}\t(via {source})", member.id, member.member_type),
      None => println!("{}\t{}", member.id, member.member_type),
    }
  }
}

pub fn references_text(references: &[GroupReference]) {
  for reference in references {
    if reference.display_name.is_empty() {
      println!("{}", reference.id);
    } else {
      println!("{}\t{}", reference.id, reference.display_name);
    }
  }
}

pub fn history_text(events: &[HistoryEvent]) {
  for event in events {
    let when = event
      .timestamp
      .map(|t| t.to_string())
      .unwrap_or_else(|| "-".to_string());
    match &event.user {
      Some(user) => println!("{when}\t{}\t{} ({user})", event.activity, event.description),
      None => println!("{when}\t{}\t{}", event.activity, event.description),
    }
  }
}

pub fn affiliate_text(affiliate: &Affiliate) {
  let status = match affiliate.status {
    AffiliateStatus::Active => "active",
    AffiliateStatus::Inactive => "inactive",
  };
  println!("{}: {status}", affiliate.name);
  if !affiliate.sender.is_empty() {
    println!("  senders: {}", affiliate.sender.to_comma_string());
  }
}
