//! Membership reads and writes.

use gws_core::member::{Member, MemberList};

use crate::{
  Client,
  error::{Error, Result},
  transport::{self, require},
  wire,
};

impl Client {
  /// `GET /group/{id}/member` — direct membership.
  pub async fn get_membership(&self, groupid: &str) -> Result<MemberList> {
    require("group id", groupid)?;
    let resp = self
      .http()?
      .get(self.url(&format!("/group/{groupid}/member")))
      .send()
      .await?;
    transport::read_data(resp).await
  }

  /// `GET /group/{id}/effective_member` — membership including members
  /// inherited through nested and dependent groups.
  pub async fn get_effective_membership(&self, groupid: &str) -> Result<MemberList> {
    require("group id", groupid)?;
    let resp = self
      .http()?
      .get(self.url(&format!("/group/{groupid}/effective_member")))
      .send()
      .await?;
    transport::read_data(resp).await
  }

  /// `GET /group/{id}/member/{member}` — the response is a single-element
  /// list; an empty list means the member is absent.
  pub async fn get_member(&self, groupid: &str, memberid: &str) -> Result<Member> {
    self.member_at(groupid, memberid, "member").await
  }

  /// `GET /group/{id}/effective_member/{member}`
  pub async fn get_effective_member(&self, groupid: &str, memberid: &str) -> Result<Member> {
    self.member_at(groupid, memberid, "effective_member").await
  }

  async fn member_at(&self, groupid: &str, memberid: &str, segment: &str) -> Result<Member> {
    require("group id", groupid)?;
    require("member id", memberid)?;
    let resp = self
      .http()?
      .get(self.url(&format!("/group/{groupid}/{segment}/{memberid}")))
      .send()
      .await?;
    let members: MemberList = transport::read_data(resp).await?;
    members.into_iter().next().ok_or_else(|| Error::MemberNotFound {
      group:  groupid.to_string(),
      member: memberid.to_string(),
    })
  }

  /// Whether `memberid` is a direct member of the group.
  ///
  /// Every failure mode — unknown group, no permission, transport failure —
  /// collapses to `false`; "not a member" and "could not determine" are
  /// indistinguishable here.
  pub async fn is_member(&self, groupid: &str, memberid: &str) -> bool {
    if memberid.is_empty() {
      return false;
    }
    match self.get_member(groupid, memberid).await {
      Ok(member) => !member.id.is_empty(),
      Err(_) => false,
    }
  }

  /// Effective-membership variant of [`is_member`](Client::is_member);
  /// failures collapse to `false` the same way.
  pub async fn is_effective_member(&self, groupid: &str, memberid: &str) -> bool {
    if memberid.is_empty() {
      return false;
    }
    match self.get_effective_member(groupid, memberid).await {
      Ok(member) => !member.id.is_empty(),
      Err(_) => false,
    }
  }

  /// `GET /group/{id}/member?view=count`
  pub async fn member_count(&self, groupid: &str) -> Result<usize> {
    self.count_at(groupid, "member").await
  }

  /// `GET /group/{id}/effective_member?view=count`
  pub async fn effective_member_count(&self, groupid: &str) -> Result<usize> {
    self.count_at(groupid, "effective_member").await
  }

  async fn count_at(&self, groupid: &str, segment: &str) -> Result<usize> {
    require("group id", groupid)?;
    let resp = self
      .http()?
      .get(self.url(&format!("/group/{groupid}/{segment}")))
      .query(&[("view", "count")])
      .send()
      .await?;
    let data: wire::CountData = transport::read_data(resp).await?;
    Ok(data.count)
  }

  /// `PUT /group/{id}/member/{ids}` — add members by id.
  ///
  /// Returns the ids the service could not resolve. Unresolved ids are not
  /// a failure: the rest of the batch was added.
  pub async fn add_members(&self, groupid: &str, memberids: &[&str]) -> Result<Vec<String>> {
    require("group id", groupid)?;
    let csv = memberids.join(",");
    require("member ids", &csv)?;
    let resp = self
      .http()?
      .put(self.url(&format!("/group/{groupid}/member/{csv}")))
      .query(self.write_query())
      .send()
      .await?;
    transport::read_not_found(resp).await
  }

  /// `DELETE /group/{id}/member/{ids}`
  pub async fn remove_members(&self, groupid: &str, memberids: &[&str]) -> Result<()> {
    require("group id", groupid)?;
    let csv = memberids.join(",");
    require("member ids", &csv)?;
    let resp = self
      .http()?
      .delete(self.url(&format!("/group/{groupid}/member/{csv}")))
      .query(self.write_query())
      .send()
      .await?;
    transport::read_empty(resp).await
  }

  /// `PUT /group/{id}/member` — replace the whole direct membership.
  ///
  /// Same not-found decoding as [`add_members`](Client::add_members).
  pub async fn set_membership(
    &self,
    groupid: &str,
    members: &MemberList,
  ) -> Result<Vec<String>> {
    require("group id", groupid)?;
    let resp = self
      .http()?
      .put(self.url(&format!("/group/{groupid}/member")))
      .query(self.write_query())
      .json(&wire::PutMembership { members })
      .send()
      .await?;
    transport::read_not_found(resp).await
  }

  /// Replace the membership with an empty list.
  pub async fn remove_all_members(&self, groupid: &str) -> Result<()> {
    let empty = MemberList::new();
    self.set_membership(groupid, &empty).await.map(|_| ())
  }
}
