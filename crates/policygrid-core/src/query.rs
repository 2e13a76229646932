use policygrid_shared::{
  FilterAction,
  FilterEntry,
  FilterValue,
  GridRow,
  SearchRequest,
  SearchResponse,
  SortDirection,
  SortEntry
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::debug;

use crate::filter_model::{
  FilterDescriptor,
  FilterModel,
  SEARCH_TEXT_FIELD
};

/// Server-side field set matched by free-text search.
pub const SEARCH_FIELDS: &str =
  "searchFields";

/// End row assumed when the grid leaves the window open.
pub const DEFAULT_END_ROW: i64 = 100;

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct SortModelItem {
  pub col_id: String,
  pub sort:   SortDirection
}

/// What the grid asks for when it needs a window of rows.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct RowBlockRequest {
  pub start_row:    Option<i64>,
  pub end_row:      Option<i64>,
  #[serde(default)]
  pub sort_model:   Vec<SortModelItem>,
  #[serde(default)]
  pub filter_model: FilterModel
}

#[derive(
  Debug, Clone, PartialEq, Default,
)]
pub struct RowBlock {
  pub rows:      Vec<GridRow>,
  pub row_count: u64
}

/// Tenant the search runs against. Attached to every search payload.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct TenantContext {
  pub company_id: String,
  pub group_id:   String
}

#[tracing::instrument(skip_all)]
pub fn build_search_request(
  tenant: &TenantContext,
  request: &RowBlockRequest
) -> SearchRequest {
  let (from, size) =
    translate_window(
      request.start_row,
      request.end_row
    );

  let payload = SearchRequest {
    company_id: tenant
      .company_id
      .clone(),
    group_id: tenant.group_id.clone(),
    sort_entries: translate_sort(
      &request.sort_model
    ),
    filter_entries: translate_filters(
      &request.filter_model
    ),
    from,
    size
  };

  debug!(
    from,
    size,
    sorts = payload.sort_entries.len(),
    filters =
      payload.filter_entries.len(),
    "built search payload"
  );
  payload
}

/// `[start, end)` to `(from, size)`. Negative starts clamp to zero and
/// an inverted window yields an empty page.
pub fn translate_window(
  start_row: Option<i64>,
  end_row: Option<i64>
) -> (u64, u64) {
  let from = start_row.unwrap_or(0).max(0);
  let end =
    end_row.unwrap_or(DEFAULT_END_ROW);
  let size = end.saturating_sub(from).max(0);

  (from.unsigned_abs(), size.unsigned_abs())
}

pub fn translate_sort(
  sort_model: &[SortModelItem]
) -> Vec<SortEntry> {
  sort_model
    .iter()
    .map(|item| SortEntry {
      sort:   item.sort,
      col_id: item.col_id.clone()
    })
    .collect()
}

pub fn translate_filters(
  filter_model: &FilterModel
) -> Vec<FilterEntry> {
  filter_model
    .iter()
    .map(|(field, descriptor)| {
      translate_filter(
        field, descriptor
      )
    })
    .collect()
}

pub fn translate_filter(
  field: &str,
  descriptor: &FilterDescriptor
) -> FilterEntry {
  if field == SEARCH_TEXT_FIELD {
    return FilterEntry {
      field:         SEARCH_FIELDS
        .to_string(),
      filter_action:
        FilterAction::Contains,
      filter_value: FilterValue::Text(
        descriptor
          .filter
          .clone()
          .unwrap_or_default()
      )
    };
  }

  let values = match (
    &descriptor.values,
    &descriptor.filter
  ) {
    | (Some(values), _) => values.clone(),
    | (None, Some(filter)) => {
      vec![filter.clone()]
    }
    | (None, None) => Vec::new()
  };

  FilterEntry {
    field:         field.to_string(),
    filter_action: FilterAction::Equals,
    filter_value:  FilterValue::Values(
      values
    )
  }
}

pub fn row_block_from_response(
  response: SearchResponse
) -> RowBlock {
  RowBlock {
    rows:      response.data,
    row_count: response.total
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::filter_model::{
    FilterType,
    STATUS_FIELD
  };

  fn tenant() -> TenantContext {
    TenantContext {
      company_id: "20116".to_string(),
      group_id:   "3194034".to_string()
    }
  }

  #[test]
  fn window_maps_to_from_and_size() {
    for (start, end) in
      [(0, 10), (10, 20), (40, 45), (7, 7)]
    {
      let (from, size) = translate_window(
        Some(start),
        Some(end)
      );
      assert_eq!(from, start as u64);
      assert_eq!(
        size,
        (end - start) as u64
      );
    }
  }

  #[test]
  fn window_clamps_negative_start_and_defaults_end()
   {
    assert_eq!(
      translate_window(Some(-5), Some(10)),
      (0, 10)
    );
    assert_eq!(
      translate_window(None, None),
      (0, 100)
    );
    assert_eq!(
      translate_window(Some(30), Some(20)),
      (30, 0)
    );
  }

  #[test]
  fn search_text_becomes_contains_on_search_fields()
   {
    let entry = translate_filter(
      SEARCH_TEXT_FIELD,
      &FilterDescriptor {
        filter_type: FilterType::Text,
        values:      None,
        filter:      Some(
          "acme".to_string()
        ),
        condition:   None
      }
    );

    assert_eq!(
      entry,
      FilterEntry {
        field:         "searchFields"
          .to_string(),
        filter_action:
          FilterAction::Contains,
        filter_value:
          FilterValue::Text(
            "acme".to_string()
          )
      }
    );
  }

  #[test]
  fn set_values_pass_through_verbatim()
  {
    let entry = translate_filter(
      "line_of_business",
      &FilterDescriptor::set_of([
        "GL", "Aqua", "GL"
      ])
    );

    assert_eq!(
      entry.filter_action,
      FilterAction::Equals
    );
    assert_eq!(
      entry.filter_value,
      FilterValue::Values(vec![
        "GL".to_string(),
        "Aqua".to_string(),
        "GL".to_string(),
      ])
    );
  }

  #[test]
  fn single_text_filter_is_wrapped_in_a_list()
   {
    let descriptor =
      FilterDescriptor::text_contains(
        "Jane Smith"
      );

    let entry = translate_filter(
      "producing_UW",
      &descriptor
    );
    assert_eq!(
      entry.filter_value,
      FilterValue::Values(vec![
        "Jane Smith".to_string()
      ])
    );
  }

  #[test]
  fn payload_carries_tenant_sorts_and_filters()
   {
    let mut filter_model =
      FilterModel::new();
    filter_model.set(
      STATUS_FIELD,
      FilterDescriptor::set_of([
        "BOUND"
      ])
    );
    filter_model.set(
      SEARCH_TEXT_FIELD,
      FilterDescriptor::text_contains(
        "marine"
      )
    );

    let request = RowBlockRequest {
      start_row: Some(20),
      end_row: Some(30),
      sort_model: vec![
        SortModelItem {
          col_id: "named_insured"
            .to_string(),
          sort:   SortDirection::Asc
        },
        SortModelItem {
          col_id: "MNPID".to_string(),
          sort:   SortDirection::Desc
        },
      ],
      filter_model
    };

    let payload = build_search_request(
      &tenant(),
      &request
    );

    assert_eq!(payload.company_id, "20116");
    assert_eq!(payload.group_id, "3194034");
    assert_eq!(payload.from, 20);
    assert_eq!(payload.size, 10);
    assert_eq!(
      payload
        .sort_entries
        .iter()
        .map(|s| s.col_id.as_str())
        .collect::<Vec<_>>(),
      vec!["named_insured", "MNPID"]
    );
    assert_eq!(
      payload
        .filter_entries
        .iter()
        .map(|f| f.field.as_str())
        .collect::<Vec<_>>(),
      vec!["searchFields", "status"]
    );
  }

  #[test]
  fn response_total_becomes_row_count() {
    let block = row_block_from_response(
      SearchResponse {
        data:  vec![],
        total: 57,
        from:  0,
        size:  10
      }
    );
    assert_eq!(block.row_count, 57);
    assert!(block.rows.is_empty());
  }
}
