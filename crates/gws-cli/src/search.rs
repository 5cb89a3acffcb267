//! `search` subcommand.

use anyhow::{Result, bail};
use clap::Args;
use gws_client::Client;
use gws_core::search::SearchParameters;

use crate::output;

#[derive(Args, Debug)]
pub struct SearchArgs {
  /// Match on name; `*` is a wildcard.
  #[arg(long)]
  name: Option<String>,

  /// Match on stem, the path part of the group id.
  #[arg(long)]
  stem: Option<String>,

  #[arg(long)]
  scope: Option<String>,

  /// Match groups with this member id.
  #[arg(long)]
  member: Option<String>,

  /// Match groups administered by this id.
  #[arg(long)]
  owner: Option<String>,

  /// Match groups with this instructor.
  #[arg(long)]
  instructor: Option<String>,

  /// Match groups with this affiliate; other parameters are ignored by the
  /// server.
  #[arg(long)]
  affiliate: Option<String>,

  /// Match effective members instead of direct ones.
  #[arg(long)]
  effective: bool,
}

pub async fn run(client: &Client, args: SearchArgs, json: bool) -> Result<()> {
  let mut search = SearchParameters::new()
    .with_name(args.name.unwrap_or_default())
    .with_stem(args.stem.unwrap_or_default())
    .with_scope(args.scope.unwrap_or_default())
    .with_member(args.member.unwrap_or_default())
    .with_owner(args.owner.unwrap_or_default())
    .with_instructor(args.instructor.unwrap_or_default())
    .with_affiliate(args.affiliate.unwrap_or_default());
  if search.is_empty() {
    bail!("at least one search parameter is required");
  }
  if args.effective {
    search = search.in_effective_members();
  }

  let references = client.do_search(&search).await?;
  if json {
    output::json(&references)?;
  } else {
    output::references_text(&references);
  }
  Ok(())
}
