//! Group change history.

use gws_core::history::{HistoryEvent, HistoryOptions};

use crate::{
  Client,
  error::Result,
  transport::{self, require},
};

impl Client {
  /// `GET /group/{id}/history?…` — change records, newest first unless the
  /// options say otherwise.
  pub async fn get_history(
    &self,
    groupid: &str,
    options: &HistoryOptions,
  ) -> Result<Vec<HistoryEvent>> {
    require("group id", groupid)?;
    let resp = self
      .http()?
      .get(self.url(&format!("/group/{groupid}/history")))
      .query(&options.query_pairs())
      .send()
      .await?;
    transport::read_data(resp).await
  }
}
