use policygrid_shared::{
  LineOfBusiness,
  LineOfBusinessStats,
  Status
};
use tracing::{
  error,
  info
};

use crate::datasource::PolicyApi;

/// Summary counts for the status bar. `Pending` until the single fetch
/// settles; a failed fetch is kept apart from an empty result.
#[derive(
  Debug, Clone, PartialEq, Default,
)]
pub enum StatsState {
  #[default]
  Pending,
  Loaded(LineOfBusinessStats),
  Failed(String)
}

impl StatsState {
  pub fn statuses(&self) -> &[Status] {
    match self {
      | StatsState::Loaded(stats) => {
        &stats.statuses
      }
      | _ => &[]
    }
  }

  pub fn lines_of_business(
    &self
  ) -> &[LineOfBusiness] {
    match self {
      | StatsState::Loaded(stats) => {
        &stats.lines_of_business
      }
      | _ => &[]
    }
  }

  pub fn total_count(&self) -> u64 {
    match self {
      | StatsState::Loaded(stats) => {
        stats.total_count()
      }
      | _ => 0
    }
  }

  pub fn is_pending(&self) -> bool {
    matches!(self, StatsState::Pending)
  }

  pub fn error(&self) -> Option<&str> {
    match self {
      | StatsState::Failed(message) => {
        Some(message)
      }
      | _ => None
    }
  }
}

#[tracing::instrument(skip_all)]
pub async fn fetch_stats<A: PolicyApi>(
  api: &A
) -> StatsState {
  match api.line_of_business_stats().await
  {
    | Ok(stats) => {
      info!(
        statuses = stats.statuses.len(),
        lines_of_business =
          stats.lines_of_business.len(),
        total = stats.total_count(),
        "loaded line of business stats"
      );
      StatsState::Loaded(stats)
    }
    | Err(err) => {
      error!(error = %format!("{err:#}"), "error fetching stats");
      StatsState::Failed(format!(
        "{err:#}"
      ))
    }
  }
}
