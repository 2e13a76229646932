use policygrid_shared::{
  LineOfBusinessStats,
  SearchRequest,
  SearchResponse
};
use tracing::{
  debug,
  error,
  info
};

use crate::query::{
  RowBlock,
  RowBlockRequest,
  TenantContext,
  build_search_request,
  row_block_from_response
};

pub const STATS_PATH: &str =
  "/api/line-of-business-stats";
pub const SEARCH_PATH: &str =
  "/api/search";

/// The two backend calls the grid depends on. Implemented over `reqwest`
/// natively and over `gloo` in the browser.
#[allow(async_fn_in_trait)]
pub trait PolicyApi {
  async fn line_of_business_stats(
    &self
  ) -> anyhow::Result<LineOfBusinessStats>;

  async fn search(
    &self,
    request: &SearchRequest
  ) -> anyhow::Result<SearchResponse>;
}

pub fn endpoint_url(
  base_url: &str,
  path: &str
) -> String {
  format!(
    "{}{}",
    base_url.trim_end_matches('/'),
    path
  )
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
  Loaded(RowBlock),
  Failed(String)
}

/// Result of one row-block fetch, stamped with the grid generation it
/// was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct RowBlockLoad {
  pub generation: u64,
  pub outcome:    LoadOutcome
}

#[derive(Debug, Clone)]
pub struct RowBlockSource<A> {
  api:    A,
  tenant: TenantContext
}

impl<A: PolicyApi> RowBlockSource<A> {
  pub fn new(
    api: A,
    tenant: TenantContext
  ) -> Self {
    Self {
      api,
      tenant
    }
  }

  pub fn api(&self) -> &A {
    &self.api
  }

  pub fn tenant(&self) -> &TenantContext {
    &self.tenant
  }

  /// One POST per call. Never retries; failures come back as
  /// `LoadOutcome::Failed`.
  #[tracing::instrument(skip(
    self, request
  ))]
  pub async fn get_rows(
    &self,
    request: &RowBlockRequest,
    generation: u64
  ) -> RowBlockLoad {
    let payload = build_search_request(
      &self.tenant,
      request
    );

    let outcome =
      match self.api.search(&payload).await
      {
        | Ok(response) => {
          let block =
            row_block_from_response(
              response
            );
          info!(
            from = payload.from,
            delivered = block.rows.len(),
            row_count = block.row_count,
            "row block loaded"
          );
          LoadOutcome::Loaded(block)
        }
        | Err(err) => {
          error!(
            error = %format!("{err:#}"),
            from = payload.from,
            size = payload.size,
            "row block fetch failed"
          );
          LoadOutcome::Failed(format!(
            "{err:#}"
          ))
        }
      };

    debug!(generation, "row block request settled");
    RowBlockLoad {
      generation,
      outcome
    }
  }
}
