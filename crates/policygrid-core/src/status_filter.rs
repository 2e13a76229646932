use policygrid_shared::StatusId;
use tracing::info;

use crate::filter_model::{
  FilterDescriptor,
  FilterModel,
  STATUS_FIELD
};
use crate::grid::GridFilterApi;

/// A status bar entry. `All` is never written into the filter model.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
)]
pub enum StatusSelection {
  #[default]
  All,
  Status(StatusId)
}

impl StatusSelection {
  pub fn as_str(&self) -> &str {
    match self {
      | StatusSelection::All => "ALL",
      | StatusSelection::Status(id) => {
        id.as_str()
      }
    }
  }
}

impl From<&str> for StatusSelection {
  fn from(code: &str) -> Self {
    if code.eq_ignore_ascii_case("all") {
      StatusSelection::All
    } else {
      StatusSelection::Status(
        StatusId::from(code)
      )
    }
  }
}

pub fn apply_status_selection(
  model: &mut FilterModel,
  selection: &StatusSelection
) {
  match selection {
    | StatusSelection::All => {
      model.remove(STATUS_FIELD);
    }
    | StatusSelection::Status(id) => {
      model.set(
        STATUS_FIELD,
        FilterDescriptor::set_of([
          id.as_str()
        ])
      );
    }
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
)]
pub struct StatusFilterController {
  selected: StatusSelection
}

impl StatusFilterController {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn selected(
    &self
  ) -> &StatusSelection {
    &self.selected
  }

  pub fn is_selected(
    &self,
    selection: &StatusSelection
  ) -> bool {
    &self.selected == selection
  }

  #[tracing::instrument(skip(self, grid))]
  pub fn select_status<G>(
    &mut self,
    grid: &mut G,
    selection: StatusSelection
  ) where
    G: GridFilterApi
  {
    let mut model = grid.filter_model();
    apply_status_selection(
      &mut model,
      &selection
    );
    grid.set_filter_model(model);
    grid.on_filter_changed();

    info!(
      status = selection.as_str(),
      "status filter selected"
    );
    self.selected = selection;
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::filter_model::{
    FilterType,
    SEARCH_TEXT_FIELD
  };
  use crate::grid::GridState;

  #[test]
  fn all_is_a_no_op_without_status_key() {
    let mut model = FilterModel::new();
    model.set(
      SEARCH_TEXT_FIELD,
      FilterDescriptor::text_contains(
        "acme"
      )
    );
    let before = model.clone();

    apply_status_selection(
      &mut model,
      &StatusSelection::All
    );
    assert_eq!(model, before);
  }

  #[test]
  fn selecting_a_status_then_all_removes_the_key()
   {
    for id in StatusId::KNOWN.iter().cloned().chain([
      StatusId::Other("ACTIVE".to_string())
    ]) {
      let mut grid = GridState::default();
      let mut controller =
        StatusFilterController::new();

      controller.select_status(
        &mut grid,
        StatusSelection::Status(id.clone())
      );
      let descriptor = grid
        .filter_model()
        .get(STATUS_FIELD)
        .cloned()
        .expect("status descriptor");
      assert_eq!(
        descriptor.filter_type,
        FilterType::Set
      );
      assert_eq!(
        descriptor.values,
        Some(vec![id.to_string()])
      );

      controller.select_status(
        &mut grid,
        StatusSelection::All
      );
      assert!(
        !grid
          .filter_model()
          .contains(STATUS_FIELD)
      );
      assert!(controller.is_selected(
        &StatusSelection::All
      ));
    }
  }

  #[test]
  fn selection_refreshes_and_keeps_other_filters()
   {
    let mut grid = GridState::default();
    let mut model = FilterModel::new();
    model.set(
      SEARCH_TEXT_FIELD,
      FilterDescriptor::text_contains(
        "harbor"
      )
    );
    grid.set_filter_model(model);
    grid.set_page(4);
    let before = grid.generation();

    let mut controller =
      StatusFilterController::new();
    controller.select_status(
      &mut grid,
      StatusSelection::from("QUOTED")
    );

    assert_eq!(grid.page(), 0);
    assert!(grid.generation() > before);
    assert!(
      grid
        .filter_model()
        .contains(SEARCH_TEXT_FIELD)
    );
    assert_eq!(
      controller.selected(),
      &StatusSelection::Status(
        StatusId::Quoted
      )
    );
  }

  #[test]
  fn all_parses_case_insensitively() {
    assert_eq!(
      StatusSelection::from("all"),
      StatusSelection::All
    );
    assert_eq!(
      StatusSelection::from("ALL").as_str(),
      "ALL"
    );
  }
}
