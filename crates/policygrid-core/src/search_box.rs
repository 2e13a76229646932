use tracing::debug;

use crate::filter_model::{
  FilterDescriptor,
  FilterModel,
  SEARCH_TEXT_FIELD
};
use crate::grid::GridFilterApi;

/// Writes `text` as a contains-filter on the hidden search column. An
/// empty string stays in the model; it matches every row.
pub fn apply_search_text(
  model: &mut FilterModel,
  text: &str
) {
  model.set(
    SEARCH_TEXT_FIELD,
    FilterDescriptor::text_contains(text)
  );
}

#[tracing::instrument(skip(grid))]
pub fn on_search_change<G>(
  grid: &mut G,
  text: &str
) where
  G: GridFilterApi
{
  let mut model = grid.filter_model();
  apply_search_text(&mut model, text);
  grid.set_filter_model(model);
  grid.on_filter_changed();
  debug!(
    len = text.len(),
    "search filter applied"
  );
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::filter_model::{
    FilterType,
    STATUS_FIELD
  };
  use crate::grid::GridState;

  fn current_search_text(
    model: &FilterModel
  ) -> &str {
    model
      .get(SEARCH_TEXT_FIELD)
      .and_then(|descriptor| {
        descriptor.filter.as_deref()
      })
      .unwrap_or_default()
  }

  #[test]
  fn search_overwrites_previous_text() {
    let mut grid = GridState::default();
    on_search_change(&mut grid, "acme");
    on_search_change(&mut grid, "acme co");

    let model = grid.filter_model();
    assert_eq!(model.len(), 1);
    assert_eq!(
      current_search_text(&model),
      "acme co"
    );

    let descriptor = model
      .get(SEARCH_TEXT_FIELD)
      .expect("search descriptor");
    assert_eq!(
      descriptor.filter_type,
      FilterType::Text
    );
    assert_eq!(
      descriptor.condition.as_deref(),
      Some("contains")
    );
  }

  #[test]
  fn empty_text_is_kept_as_a_filter() {
    let mut grid = GridState::default();
    on_search_change(&mut grid, "");

    let model = grid.filter_model();
    assert!(
      model.contains(SEARCH_TEXT_FIELD)
    );
    assert_eq!(
      current_search_text(&model),
      ""
    );
  }

  #[test]
  fn search_leaves_status_filter_alone() {
    let mut model = FilterModel::new();
    model.set(
      STATUS_FIELD,
      FilterDescriptor::set_of([
        "ISSUED"
      ])
    );
    apply_search_text(&mut model, "re");

    assert_eq!(model.len(), 2);
    assert!(model.contains(STATUS_FIELD));
  }
}
