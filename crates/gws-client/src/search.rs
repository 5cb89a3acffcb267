//! Group search.

use gws_core::{group::GroupReference, search::SearchParameters};

use crate::{Client, error::Result, transport};

impl Client {
  /// `GET /search?…` — returns lightweight references, not full groups.
  /// Empty parameters are omitted from the query string entirely.
  pub async fn do_search(&self, search: &SearchParameters) -> Result<Vec<GroupReference>> {
    let resp = self
      .http()?
      .get(self.url("/search"))
      .query(search.query_pairs())
      .send()
      .await?;
    transport::read_data(resp).await
  }
}
