use anyhow::{
  Context,
  bail
};
use gloo::net::http::{
  Request,
  Response
};
use policygrid_core::datasource::{
  PolicyApi,
  SEARCH_PATH,
  STATS_PATH,
  endpoint_url
};
use policygrid_shared::{
  LineOfBusinessStats,
  SearchRequest,
  SearchResponse
};
use serde::de::DeserializeOwned;

/// `PolicyApi` over the browser's fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserApi {
  base_url: String
}

impl BrowserApi {
  pub fn new(base_url: &str) -> Self {
    Self {
      base_url: base_url.to_string()
    }
  }
}

async fn read_body(
  response: Response,
  url: &str
) -> anyhow::Result<String> {
  let status = response.status();
  let body =
    response.text().await.with_context(
      || {
        format!(
          "failed reading response from \
           {url}"
        )
      }
    )?;
  check_status(status, url)?;
  Ok(body)
}

fn check_status(
  status: u16,
  url: &str
) -> anyhow::Result<()> {
  if !(200..300).contains(&status) {
    bail!("{url} returned HTTP {status}");
  }
  Ok(())
}

fn decode_body<T: DeserializeOwned>(
  body: &str,
  what: &str
) -> anyhow::Result<T> {
  serde_json::from_str(body)
    .with_context(|| {
      format!("decode error: {what}")
    })
}

impl PolicyApi for BrowserApi {
  async fn line_of_business_stats(
    &self
  ) -> anyhow::Result<LineOfBusinessStats>
  {
    let url = endpoint_url(
      &self.base_url,
      STATS_PATH
    );
    let response = Request::get(&url)
      .header("Accept", "application/json")
      .send()
      .await
      .with_context(|| {
        format!("fetch error: {url}")
      })?;

    let body =
      read_body(response, &url).await?;
    decode_body(
      &body,
      "line of business stats"
    )
  }

  async fn search(
    &self,
    request: &SearchRequest
  ) -> anyhow::Result<SearchResponse> {
    let url = endpoint_url(
      &self.base_url,
      SEARCH_PATH
    );
    let payload =
      serde_json::to_string(request)
        .context(
          "failed to encode search payload"
        )?;
    let response = Request::post(&url)
      .header(
        "Content-Type",
        "application/json"
      )
      .header("Accept", "application/json")
      .body(payload)
      .with_context(|| {
        format!(
          "failed to build request for \
           {url}"
        )
      })?
      .send()
      .await
      .with_context(|| {
        format!("fetch error: {url}")
      })?;

    let body =
      read_body(response, &url).await?;
    decode_body(&body, "search response")
  }
}
