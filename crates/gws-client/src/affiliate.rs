//! Affiliate status operations.

use gws_core::affiliate::{Affiliate, AffiliateName};

use crate::{
  Client,
  error::Result,
  transport::{self, require},
};

impl Client {
  /// `GET /group/{id}/affiliate/{name}`
  pub async fn get_affiliate_status(
    &self,
    groupid: &str,
    affiliate: AffiliateName,
  ) -> Result<Affiliate> {
    require("group id", groupid)?;
    let resp = self
      .http()?
      .get(self.url(&format!("/group/{groupid}/affiliate/{affiliate}")))
      .send()
      .await?;
    transport::read_data(resp).await
  }

  /// `PUT /group/{id}/affiliate/{name}?status=active&sender=…` — enable an
  /// affiliate, e.g. sharing through UW Google Apps.
  ///
  /// `senders` is a comma-separated list of authorized sender ids; pass an
  /// empty string for none.
  pub async fn add_affiliate(
    &self,
    groupid: &str,
    affiliate: AffiliateName,
    senders: &str,
  ) -> Result<Affiliate> {
    require("group id", groupid)?;
    let mut query: Vec<(&str, &str)> = vec![("status", "active"), ("sender", senders)];
    query.extend_from_slice(self.write_query());
    let resp = self
      .http()?
      .put(self.url(&format!("/group/{groupid}/affiliate/{affiliate}")))
      .query(&query)
      .send()
      .await?;
    // This endpoint answers with a bare affiliate body, not the usual
    // envelope.
    transport::read_bare(resp).await
  }

  /// `DELETE /group/{id}/affiliate/{name}`
  pub async fn delete_affiliate(&self, groupid: &str, affiliate: AffiliateName) -> Result<()> {
    require("group id", groupid)?;
    let resp = self
      .http()?
      .delete(self.url(&format!("/group/{groupid}/affiliate/{affiliate}")))
      .query(self.write_query())
      .send()
      .await?;
    transport::read_empty(resp).await
  }
}
