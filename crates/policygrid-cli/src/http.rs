use std::time::Duration;

use anyhow::{
  Context,
  bail
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
use serde_json::from_str;
use tracing::{
  debug,
  warn
};

const ERROR_BODY_PREVIEW: usize = 200;

/// `PolicyApi` over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpApi {
  client:   reqwest::Client,
  base_url: String
}

impl HttpApi {
  pub fn new(
    base_url: &str,
    timeout: Duration
  ) -> anyhow::Result<Self> {
    let client =
      reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .context(
          "failed building HTTP client \
           for policy API"
        )?;

    Ok(Self {
      client,
      base_url: base_url.to_string()
    })
  }

  async fn read_body(
    response: reqwest::Response,
    url: &str
  ) -> anyhow::Result<String> {
    let status = response.status();
    let body =
      response.text().await.with_context(
        || {
          format!(
            "failed reading response \
             body from {url}"
          )
        }
      )?;

    if !status.is_success() {
      warn!(
        url,
        status = status.as_u16(),
        "policy API returned an error \
         status"
      );
      bail!(
        "{url} returned HTTP {status}: \
         {}",
        preview(&body)
      );
    }

    debug!(
      url,
      bytes = body.len(),
      "policy API response received"
    );
    Ok(body)
  }
}

impl PolicyApi for HttpApi {
  async fn line_of_business_stats(
    &self
  ) -> anyhow::Result<LineOfBusinessStats>
  {
    let url = endpoint_url(
      &self.base_url,
      STATS_PATH
    );
    let response = self
      .client
      .get(&url)
      .header(
        reqwest::header::ACCEPT,
        "application/json"
      )
      .send()
      .await
      .with_context(|| {
        format!("failed requesting {url}")
      })?;

    let body =
      Self::read_body(response, &url)
        .await?;
    from_str(&body).with_context(|| {
      format!(
        "failed decoding stats from \
         {url}"
      )
    })
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
          "failed encoding search payload"
        )?;

    let response = self
      .client
      .post(&url)
      .header(
        reqwest::header::CONTENT_TYPE,
        "application/json"
      )
      .header(
        reqwest::header::ACCEPT,
        "application/json"
      )
      .body(payload)
      .send()
      .await
      .with_context(|| {
        format!("failed requesting {url}")
      })?;

    let body =
      Self::read_body(response, &url)
        .await?;
    from_str(&body).with_context(|| {
      format!(
        "failed decoding search \
         response from {url}"
      )
    })
  }
}

fn preview(body: &str) -> String {
  let trimmed = body.trim();
  match trimmed
    .char_indices()
    .nth(ERROR_BODY_PREVIEW)
  {
    | Some((idx, _)) => {
      format!("{}...", &trimmed[..idx])
    }
    | None => trimmed.to_string()
  }
}
