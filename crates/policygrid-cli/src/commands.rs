use anyhow::{
  Context,
  bail
};
use policygrid_core::columns::column;
use policygrid_core::config::ClientConfig;
use policygrid_core::datasource::{
  PolicyApi,
  RowBlockSource
};
use policygrid_core::filter_model::FilterDescriptor;
use policygrid_core::grid::{
  GridFilterApi,
  GridState
};
use policygrid_core::query::{
  SortModelItem,
  build_search_request
};
use policygrid_core::search_box::on_search_change;
use policygrid_core::stats::{
  StatsState,
  fetch_stats
};
use policygrid_core::status_filter::{
  StatusFilterController,
  StatusSelection
};
use tracing::{
  debug,
  info,
  warn
};

use crate::cli::SearchArgs;
use crate::render::Renderer;

#[tracing::instrument(skip_all)]
pub async fn stats<A: PolicyApi>(
  api: &A,
  renderer: &Renderer
) -> anyhow::Result<()> {
  let state = fetch_stats(api).await;
  if let StatsState::Failed(message) =
    &state
  {
    bail!(
      "stats request failed: {message}"
    );
  }
  renderer.print_stats(&state)
}

/// Drives a fresh grid through the same controllers the browser uses.
/// Explicit `--filter` values are applied last and win over `--status`
/// for the same column.
pub fn build_grid(
  args: &SearchArgs,
  client: &ClientConfig
) -> GridState {
  let mut grid = GridState::new(
    args
      .page_size
      .unwrap_or(client.page_size)
  );

  if let Some(code) = &args.status {
    let mut controller =
      StatusFilterController::new();
    controller.select_status(
      &mut grid,
      StatusSelection::from(
        code.as_str()
      )
    );
    debug!(
      status = controller.selected().as_str(),
      "status filter selected"
    );
  }

  if let Some(text) = &args.text {
    on_search_change(&mut grid, text);
  }

  if !args.filters.is_empty() {
    let mut model = grid.filter_model();
    for filter in &args.filters {
      warn_unknown_column(&filter.field);
      model.set(
        filter.field.clone(),
        FilterDescriptor::set_of(
          filter.values.iter().cloned()
        )
      );
    }
    grid.set_filter_model(model);
    grid.on_filter_changed();
  }

  if !args.sort.is_empty() {
    for sort in &args.sort {
      warn_unknown_column(&sort.col_id);
    }
    grid.set_sort_model(
      args
        .sort
        .iter()
        .map(|sort| SortModelItem {
          col_id: sort.col_id.clone(),
          sort:   sort.sort
        })
        .collect()
    );
  }

  grid.set_page(
    args.page.saturating_sub(1)
  );
  grid
}

/// Unknown columns still reach the server unchanged.
fn warn_unknown_column(field: &str) {
  if column(field).is_none() {
    warn!(
      field,
      "not a grid column; sending as-is"
    );
  }
}

#[tracing::instrument(skip_all)]
pub async fn search<A: PolicyApi>(
  source: &RowBlockSource<A>,
  args: &SearchArgs,
  client: &ClientConfig,
  renderer: &Renderer
) -> anyhow::Result<()> {
  let mut grid =
    build_grid(args, client);
  let request = grid.row_block_request();

  if args.dry_run {
    let payload = build_search_request(
      source.tenant(),
      &request
    );
    println!(
      "{}",
      serde_json::to_string_pretty(
        &payload
      )
      .context(
        "failed encoding search payload"
      )?
    );
    return Ok(());
  }

  let load = source
    .get_rows(&request, grid.generation())
    .await;
  grid.apply_load(load);

  if let Some(err) = grid.last_error() {
    bail!("search failed: {err}");
  }
  info!(
    rows = grid.rows().len(),
    row_count = ?grid.row_count(),
    "search complete"
  );

  if args.json {
    let value = serde_json::json!({
      "rowData": grid.rows(),
      "rowCount": grid.row_count()
    });
    println!(
      "{}",
      serde_json::to_string_pretty(&value)
        .context("failed encoding rows")?
    );
  } else {
    renderer.print_grid(&grid)?;
  }
  Ok(())
}
