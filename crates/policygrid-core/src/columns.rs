use policygrid_shared::GridRow;

use crate::filter_model::{
  SEARCH_TEXT_FIELD,
  STATUS_FIELD
};

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub enum ColumnFilter {
  None,
  /// Contains-only text filter.
  Text,
  Set
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub struct ColumnDef {
  pub field:       &'static str,
  pub header_name: &'static str,
  pub min_width:   u32,
  pub hidden:      bool,
  pub sortable:    bool,
  pub filter:      ColumnFilter
}

pub const COLUMNS: [ColumnDef; 7] = [
  ColumnDef {
    field:       SEARCH_TEXT_FIELD,
    header_name: "Search",
    min_width:   100,
    hidden:      true,
    sortable:    false,
    filter:      ColumnFilter::Text
  },
  ColumnDef {
    field:       STATUS_FIELD,
    header_name: "Status",
    min_width:   100,
    hidden:      false,
    sortable:    true,
    filter:      ColumnFilter::Set
  },
  ColumnDef {
    field:       "named_insured",
    header_name: "Named Insured",
    min_width:   150,
    hidden:      false,
    sortable:    true,
    filter:      ColumnFilter::None
  },
  ColumnDef {
    field:       "MNPID",
    header_name: "MN Program ID",
    min_width:   120,
    hidden:      false,
    sortable:    true,
    filter:      ColumnFilter::None
  },
  ColumnDef {
    field:       "line_of_business",
    header_name: "Line of Business",
    min_width:   150,
    hidden:      false,
    sortable:    true,
    filter:      ColumnFilter::None
  },
  ColumnDef {
    field:       "MBU_handler",
    header_name: "MBU Handler",
    min_width:   120,
    hidden:      false,
    sortable:    true,
    filter:      ColumnFilter::None
  },
  ColumnDef {
    field:       "producing_UW",
    header_name: "Producing UW",
    min_width:   120,
    hidden:      false,
    sortable:    true,
    filter:      ColumnFilter::None
  }
];

pub fn visible_columns()
-> impl Iterator<Item = &'static ColumnDef>
{
  COLUMNS
    .iter()
    .filter(|column| !column.hidden)
}

pub fn column(
  field: &str
) -> Option<&'static ColumnDef> {
  COLUMNS
    .iter()
    .find(|column| column.field == field)
}

/// Display text for one cell, keyed by the column's wire field name.
pub fn cell_text(
  row: &GridRow,
  field: &str
) -> String {
  match field {
    | "_id" => row.id.clone(),
    | STATUS_FIELD => {
      row.status.to_string()
    }
    | "named_insured" => {
      row.named_insured.clone()
    }
    | "MNPID" => row.mnpid.clone(),
    | "line_of_business" => row
      .line_of_business
      .iter()
      .map(|lob| lob.as_str())
      .collect::<Vec<_>>()
      .join(", "),
    | "MBU_handler" => {
      row.mbu_handler.clone()
    }
    | "producing_UW" => {
      row.producing_uw.clone()
    }
    | "created_at" => {
      row.created_at.clone()
    }
    | SEARCH_TEXT_FIELD => {
      row.search_text.clone()
    }
    | _ => String::new()
  }
}
