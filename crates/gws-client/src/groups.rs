//! Group CRUD, move, and rename operations.

use gws_core::group::Group;
use reqwest::header;

use crate::{
  Client,
  error::{Error, Result},
  transport::{self, require},
  wire,
};

impl Client {
  /// `GET /group/{id}`
  ///
  /// The response ETag is captured onto the returned [`Group`] for use as
  /// an `If-Match` precondition by [`update_group`](Client::update_group).
  pub async fn get_group(&self, groupid: &str) -> Result<Group> {
    require("group id", groupid)?;
    let resp = self
      .http()?
      .get(self.url(&format!("/group/{groupid}")))
      .send()
      .await?;
    transport::read_group(resp).await
  }

  /// `PUT /group/{id}` with the group as the `data` payload.
  pub async fn create_group(&self, newgroup: &Group) -> Result<Group> {
    require("group id", &newgroup.id)?;
    let resp = self
      .http()?
      .put(self.url(&format!("/group/{}", newgroup.id)))
      .query(self.write_query())
      .json(&wire::PutGroup { data: newgroup })
      .send()
      .await?;
    transport::read_group(resp).await
  }

  /// `PUT /group/{id}` with `If-Match` set to the etag captured on read.
  ///
  /// A conflicting concurrent update makes the server reject the
  /// precondition; the rejection is surfaced as an API error. The caller
  /// must re-fetch and retry — no merge is attempted here.
  pub async fn update_group(&self, group: &Group) -> Result<Group> {
    require("group id", &group.id)?;
    let etag = group
      .etag
      .as_deref()
      .filter(|t| !t.is_empty())
      .ok_or_else(|| Error::MissingEtag(group.id.clone()))?;
    let resp = self
      .http()?
      .put(self.url(&format!("/group/{}", group.id)))
      .header(header::IF_MATCH, etag)
      .query(self.write_query())
      .json(&wire::PutGroup { data: group })
      .send()
      .await?;
    transport::read_group(resp).await
  }

  /// `DELETE /group/{id}`
  pub async fn delete_group(&self, groupid: &str) -> Result<()> {
    require("group id", groupid)?;
    let resp = self
      .http()?
      .delete(self.url(&format!("/group/{groupid}")))
      .query(self.write_query())
      .send()
      .await?;
    transport::read_empty(resp).await
  }

  /// Move a group to a new stem, keeping its leaf name.
  ///
  /// Two steps: resolve the group's regid via [`get_group`](Client::get_group),
  /// then `PUT /groupMove/{regid}?newstem=…`.
  pub async fn move_group(&self, groupid: &str, new_stem: &str) -> Result<()> {
    require("group id", groupid)?;
    require("new stem", new_stem)?;
    self.group_move(groupid, "newstem", new_stem).await
  }

  /// Rename the leaf part of a group id, keeping its stem. Same two-step
  /// shape as [`move_group`](Client::move_group), with `?newext=…`.
  pub async fn rename_group(&self, groupid: &str, new_leaf: &str) -> Result<()> {
    require("group id", groupid)?;
    require("new leaf", new_leaf)?;
    self.group_move(groupid, "newext", new_leaf).await
  }

  async fn group_move(&self, groupid: &str, key: &str, value: &str) -> Result<()> {
    let regid = self.get_group(groupid).await?.regid;
    let mut query: Vec<(&str, &str)> = vec![(key, value)];
    query.extend_from_slice(self.write_query());
    let resp = self
      .http()?
      .put(self.url(&format!("/groupMove/{regid}")))
      .query(&query)
      .send()
      .await?;
    transport::read_empty(resp).await
  }
}
