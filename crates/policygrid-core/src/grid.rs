use policygrid_shared::{
  GridRow,
  SortDirection
};
use tracing::{
  debug,
  trace
};

use crate::datasource::{
  LoadOutcome,
  RowBlockLoad
};
use crate::filter_model::FilterModel;
use crate::query::{
  RowBlockRequest,
  SortModelItem
};

pub const PAGE_SIZE_CHOICES: [u64; 4] =
  [10, 20, 50, 100];
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// The part of the grid the status and search controllers talk to.
pub trait GridFilterApi {
  fn filter_model(&self) -> FilterModel;

  fn set_filter_model(
    &mut self,
    model: FilterModel
  );

  /// Re-requests the visible row block under the current filters.
  fn on_filter_changed(&mut self);
}

/// Paged view over the server-side row model.
///
/// Every change that alters which rows should be visible bumps the
/// generation. Loads are only applied when their generation matches,
/// so a slow response for an old query cannot overwrite a newer one.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
  filter_model: FilterModel,
  sort_model:   Vec<SortModelItem>,
  page:         u64,
  page_size:    u64,
  rows:         Vec<GridRow>,
  row_count:    Option<u64>,
  loading:      bool,
  last_error:   Option<String>,
  generation:   u64
}

impl Default for GridState {
  fn default() -> Self {
    Self::new(DEFAULT_PAGE_SIZE)
  }
}

impl GridState {
  pub fn new(page_size: u64) -> Self {
    Self {
      filter_model: FilterModel::new(),
      sort_model:   Vec::new(),
      page:         0,
      page_size:    if page_size == 0 {
        DEFAULT_PAGE_SIZE
      } else {
        page_size
      },
      rows:         Vec::new(),
      row_count:    None,
      loading:      true,
      last_error:   None,
      generation:   0
    }
  }

  pub fn generation(&self) -> u64 {
    self.generation
  }

  pub fn rows(&self) -> &[GridRow] {
    &self.rows
  }

  pub fn row_count(&self) -> Option<u64> {
    self.row_count
  }

  pub fn page(&self) -> u64 {
    self.page
  }

  pub fn page_size(&self) -> u64 {
    self.page_size
  }

  pub fn is_loading(&self) -> bool {
    self.loading
  }

  pub fn last_error(&self) -> Option<&str> {
    self.last_error.as_deref()
  }

  pub fn sort_model(
    &self
  ) -> &[SortModelItem] {
    &self.sort_model
  }

  pub fn sort_for(
    &self,
    col_id: &str
  ) -> Option<SortDirection> {
    self
      .sort_model
      .iter()
      .find(|item| item.col_id == col_id)
      .map(|item| item.sort)
  }

  pub fn refresh(&mut self) -> u64 {
    self.generation =
      self.generation.wrapping_add(1);
    self.loading = true;
    trace!(
      generation = self.generation,
      filters = self.filter_model.len(),
      "grid refresh requested"
    );
    self.generation
  }

  /// Header click: unsorted -> asc -> desc -> unsorted. Replaces any
  /// other column's sort.
  pub fn toggle_sort(
    &mut self,
    col_id: &str
  ) {
    let next = match self.sort_for(col_id)
    {
      | None => Some(SortDirection::Asc),
      | Some(SortDirection::Asc) => {
        Some(SortDirection::Desc)
      }
      | Some(SortDirection::Desc) => None
    };

    self.sort_model = next
      .map(|sort| {
        vec![SortModelItem {
          col_id: col_id.to_string(),
          sort
        }]
      })
      .unwrap_or_default();
    debug!(col_id, sort = ?next, "sort toggled");

    self.page = 0;
    self.refresh();
  }

  pub fn set_sort_model(
    &mut self,
    sort_model: Vec<SortModelItem>
  ) {
    self.sort_model = sort_model;
    self.page = 0;
    self.refresh();
  }

  pub fn page_count(&self) -> u64 {
    match self.row_count {
      | Some(count) if count > 0 => {
        count.div_ceil(self.page_size)
      }
      | _ => 1
    }
  }

  /// Moves to `page` (zero based), clamped to the last known page.
  pub fn set_page(&mut self, page: u64) {
    let target = match self.row_count {
      | Some(_) => {
        page.min(
          self
            .page_count()
            .saturating_sub(1)
        )
      }
      | None => page
    };

    if target != self.page {
      self.page = target;
      self.refresh();
    }
  }

  pub fn set_page_size(
    &mut self,
    page_size: u64
  ) {
    if page_size == 0
      || page_size == self.page_size
    {
      return;
    }
    self.page_size = page_size;
    self.page = 0;
    self.refresh();
  }

  pub fn row_block_request(
    &self
  ) -> RowBlockRequest {
    let start =
      self.page.saturating_mul(self.page_size);
    let end =
      start.saturating_add(self.page_size);

    RowBlockRequest {
      start_row:    Some(to_row_index(start)),
      end_row:      Some(to_row_index(end)),
      sort_model:   self.sort_model.clone(),
      filter_model: self
        .filter_model
        .clone()
    }
  }

  /// Applies a finished load. Returns `false` when the load belongs
  /// to a superseded generation and was dropped.
  pub fn apply_load(
    &mut self,
    load: RowBlockLoad
  ) -> bool {
    if load.generation != self.generation {
      debug!(
        load_generation = load.generation,
        current_generation =
          self.generation,
        "dropping stale row block"
      );
      return false;
    }

    self.loading = false;
    match load.outcome {
      | LoadOutcome::Loaded(block) => {
        self.rows = block.rows;
        self.row_count =
          Some(block.row_count);
        self.last_error = None;
      }
      | LoadOutcome::Failed(message) => {
        self.rows.clear();
        self.row_count = None;
        self.last_error = Some(message);
      }
    }
    true
  }

  /// `1 to 10 of 57`, the way the pager footer shows it.
  pub fn row_range_label(&self) -> String {
    let Some(count) = self.row_count
    else {
      return "? to ? of ?".to_string();
    };
    if count == 0 {
      return "0 to 0 of 0".to_string();
    }

    let first = self
      .page
      .saturating_mul(self.page_size)
      .saturating_add(1)
      .min(count);
    let last = self
      .page
      .saturating_add(1)
      .saturating_mul(self.page_size)
      .min(count);
    format!("{first} to {last} of {count}")
  }
}

impl GridFilterApi for GridState {
  fn filter_model(&self) -> FilterModel {
    self.filter_model.clone()
  }

  fn set_filter_model(
    &mut self,
    model: FilterModel
  ) {
    self.filter_model = model;
  }

  fn on_filter_changed(&mut self) {
    self.page = 0;
    self.refresh();
  }
}

fn to_row_index(value: u64) -> i64 {
  i64::try_from(value).unwrap_or(i64::MAX)
}
