//! `member` subcommand.

use anyhow::Result;
use clap::Subcommand;
use gws_client::Client;

use crate::output;

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
  /// List members of a group.
  List {
    group_id: String,
    /// Include members inherited through nested and dependent groups.
    #[arg(long)]
    effective: bool,
  },

  /// Get information about a specific member.
  Get {
    group_id: String,
    member_id: String,
    #[arg(long)]
    effective: bool,
  },

  /// Check whether a member belongs to a group. Exits nonzero when absent
  /// or undeterminable.
  Check {
    group_id: String,
    member_id: String,
    #[arg(long)]
    effective: bool,
  },

  /// Get the count of members in a group.
  Count {
    group_id: String,
    #[arg(long)]
    effective: bool,
  },

  /// Add members to a group. Ids the service cannot resolve are reported,
  /// not fatal.
  Add {
    group_id: String,
    #[arg(required = true)]
    member_ids: Vec<String>,
  },

  /// Remove members from a group.
  Remove {
    group_id: String,
    #[arg(required = true)]
    member_ids: Vec<String>,
  },

  /// Remove all members from a group.
  Clear { group_id: String },
}

pub async fn run(client: &Client, command: MemberCommand, json: bool) -> Result<()> {
  match command {
    MemberCommand::List { group_id, effective } => {
      let members = if effective {
        client.get_effective_membership(&group_id).await?
      } else {
        client.get_membership(&group_id).await?
      };
      if json { output::json(&members)? } else { output::members_text(&members) }
    }
    MemberCommand::Get { group_id, member_id, effective } => {
      let member = if effective {
        client.get_effective_member(&group_id, &member_id).await?
      } else {
        client.get_member(&group_id, &member_id).await?
      };
      if json {
        output::json(&member)?
      } else {
        println!("{}\t{}", member.id, member.member_type);
      }
    }
    MemberCommand::Check { group_id, member_id, effective } => {
      let present = if effective {
        client.is_effective_member(&group_id, &member_id).await
      } else {
        client.is_member(&group_id, &member_id).await
      };
      if json {
        output::json(&serde_json::json!({ "member": member_id, "present": present }))?;
      } else {
        println!("{}", if present { "member" } else { "not a member" });
      }
      if !present {
        std::process::exit(1);
      }
    }
    MemberCommand::Count { group_id, effective } => {
      let count = if effective {
        client.effective_member_count(&group_id).await?
      } else {
        client.member_count(&group_id).await?
      };
      if json {
        output::json(&serde_json::json!({ "count": count }))?;
      } else {
        println!("{count}");
      }
    }
    MemberCommand::Add { group_id, member_ids } => {
      let ids: Vec<&str> = member_ids.iter().map(String::as_str).collect();
      let not_found = client.add_members(&group_id, &ids).await?;
      if json {
        output::json(&serde_json::json!({ "added": ids.len() - not_found.len(), "notFound": not_found }))?;
      } else if not_found.is_empty() {
        println!("added {} member(s)", ids.len());
      } else {
        println!(
          "added {} member(s); not found: {}",
          ids.len() - not_found.len(),
          not_found.join(", ")
        );
      }
    }
    MemberCommand::Remove { group_id, member_ids } => {
      let ids: Vec<&str> = member_ids.iter().map(String::as_str).collect();
      client.remove_members(&group_id, &ids).await?;
      if !json {
        println!("removed {} member(s)", ids.len());
      }
    }
    MemberCommand::Clear { group_id } => {
      client.remove_all_members(&group_id).await?;
      if !json {
        println!("removed all members from {group_id}");
      }
    }
  }
  Ok(())
}
