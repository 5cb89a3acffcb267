//! `group`, `affiliate`, and `history` subcommands.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use gws_client::Client;
use gws_core::{
  affiliate::AffiliateName,
  group::{Classification, Group},
  history::{HistoryActivity, HistoryOptions, HistoryOrder},
};

use crate::output;

// ─── group ────────────────────────────────────────────────────────────────────

/// Fields shared by `group create` and `group update`.
#[derive(Args, Debug, Default)]
pub struct GroupFields {
  /// Descriptive name of the group.
  #[arg(long)]
  display_name: Option<String>,

  #[arg(long)]
  description: Option<String>,

  /// Contact person (UW NetID).
  #[arg(long)]
  contact: Option<String>,

  /// Membership classification: public, restricted, or confidential.
  #[arg(long)]
  classification: Option<String>,

  /// Entity ids with full group access; repeatable.
  #[arg(long = "admin", value_name = "ID")]
  admins: Vec<String>,

  /// Entity ids who can read membership; repeatable.
  #[arg(long = "reader", value_name = "ID")]
  readers: Vec<String>,

  /// Entity ids who can edit membership; repeatable.
  #[arg(long = "updater", value_name = "ID")]
  updaters: Vec<String>,
}

impl GroupFields {
  fn apply(&self, group: &mut Group) -> Result<()> {
    if let Some(display_name) = &self.display_name {
      group.display_name = display_name.clone();
    }
    if let Some(description) = &self.description {
      group.description = description.clone();
    }
    if let Some(contact) = &self.contact {
      group.contact = contact.clone();
    }
    if let Some(classification) = &self.classification {
      group.classification = Some(match classification.as_str() {
        "public" => Classification::Public,
        "restricted" => Classification::Restricted,
        "confidential" => Classification::Confidential,
        other => bail!("unknown classification: {other}"),
      });
    }
    group
      .admins
      .append_by_id(self.admins.iter().cloned())
      .context("adding admins")?;
    group
      .readers
      .append_by_id(self.readers.iter().cloned())
      .context("adding readers")?;
    group
      .updaters
      .append_by_id(self.updaters.iter().cloned())
      .context("adding updaters")?;
    Ok(())
  }
}

#[derive(Subcommand, Debug)]
pub enum GroupCommand {
  /// Get group information.
  Get { group_id: String },

  /// Create a new group.
  Create {
    group_id: String,
    #[command(flatten)]
    fields: GroupFields,
  },

  /// Update an existing group. Fetches first, so the update carries the
  /// current etag.
  Update {
    group_id: String,
    #[command(flatten)]
    fields: GroupFields,
  },

  /// Delete a group.
  Delete { group_id: String },

  /// Move a group to a new stem, keeping its leaf name.
  Move { group_id: String, new_stem: String },

  /// Rename the leaf part of a group id, keeping its stem.
  Rename { group_id: String, new_leaf: String },
}

pub async fn run(client: &Client, command: GroupCommand, json: bool) -> Result<()> {
  match command {
    GroupCommand::Get { group_id } => {
      let group = client.get_group(&group_id).await?;
      if json { output::json(&group)? } else { output::group_text(&group) }
    }
    GroupCommand::Create { group_id, fields } => {
      let mut group = Group::new(group_id);
      fields.apply(&mut group)?;
      let created = client.create_group(&group).await?;
      if json { output::json(&created)? } else { output::group_text(&created) }
    }
    GroupCommand::Update { group_id, fields } => {
      let mut group = client.get_group(&group_id).await?;
      fields.apply(&mut group)?;
      let updated = client.update_group(&group).await?;
      if json { output::json(&updated)? } else { output::group_text(&updated) }
    }
    GroupCommand::Delete { group_id } => {
      client.delete_group(&group_id).await?;
      if !json {
        println!("deleted {group_id}");
      }
    }
    GroupCommand::Move { group_id, new_stem } => {
      client.move_group(&group_id, &new_stem).await?;
      if !json {
        println!("moved {group_id} to stem {new_stem}");
      }
    }
    GroupCommand::Rename { group_id, new_leaf } => {
      client.rename_group(&group_id, &new_leaf).await?;
      if !json {
        println!("renamed {group_id} to {new_leaf}");
      }
    }
  }
  Ok(())
}

// ─── affiliate ────────────────────────────────────────────────────────────────

fn affiliate_name(name: &str) -> Result<AffiliateName> {
  Ok(match name {
    "email" => AffiliateName::Email,
    "google" => AffiliateName::Google,
    "uwnetid" => AffiliateName::Uwnetid,
    "radius" => AffiliateName::Radius,
    other => bail!("unknown affiliate: {other} (expected email, google, uwnetid, or radius)"),
  })
}

#[derive(Subcommand, Debug)]
pub enum AffiliateCommand {
  /// Get the status of an affiliate.
  Get { group_id: String, name: String },

  /// Enable an affiliate on a group.
  Add {
    group_id: String,
    name: String,
    /// Comma-separated list of authorized sender ids.
    #[arg(long, default_value = "")]
    senders: String,
  },

  /// Disable an affiliate.
  Delete { group_id: String, name: String },
}

pub async fn run_affiliate(client: &Client, command: AffiliateCommand, json: bool) -> Result<()> {
  match command {
    AffiliateCommand::Get { group_id, name } => {
      let affiliate = client.get_affiliate_status(&group_id, affiliate_name(&name)?).await?;
      if json { output::json(&affiliate)? } else { output::affiliate_text(&affiliate) }
    }
    AffiliateCommand::Add { group_id, name, senders } => {
      let affiliate = client
        .add_affiliate(&group_id, affiliate_name(&name)?, &senders)
        .await?;
      if json { output::json(&affiliate)? } else { output::affiliate_text(&affiliate) }
    }
    AffiliateCommand::Delete { group_id, name } => {
      client.delete_affiliate(&group_id, affiliate_name(&name)?).await?;
      if !json {
        println!("deleted affiliate {name} from {group_id}");
      }
    }
  }
  Ok(())
}

// ─── history ──────────────────────────────────────────────────────────────────

#[derive(Args, Debug)]
pub struct HistoryArgs {
  group_id: String,

  /// Oldest records first instead of newest.
  #[arg(long)]
  ascending: bool,

  /// Maximum number of records.
  #[arg(long)]
  size: Option<u32>,

  /// Activity class: membership or group.
  #[arg(long)]
  activity: Option<String>,

  /// Only records involving this member id.
  #[arg(long)]
  member: Option<String>,
}

pub async fn run_history(client: &Client, args: HistoryArgs, json: bool) -> Result<()> {
  let mut options = HistoryOptions::new();
  if args.ascending {
    options = options.order(HistoryOrder::Ascending);
  }
  if let Some(size) = args.size {
    options = options.limit(size);
  }
  if let Some(activity) = &args.activity {
    options = options.for_activity(match activity.as_str() {
      "membership" => HistoryActivity::Membership,
      "group" => HistoryActivity::Group,
      other => bail!("unknown activity: {other} (expected membership or group)"),
    });
  }
  if let Some(member) = &args.member {
    options = options.for_member(member.clone());
  }

  let events = client.get_history(&args.group_id, &options).await?;
  if json { output::json(&events)? } else { output::history_text(&events) }
  Ok(())
}
