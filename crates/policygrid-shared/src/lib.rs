use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum StatusId {
  ApprovalPending,
  Bound,
  Closed,
  InDesign,
  Issued,
  PendingQuote,
  PendingRenewal,
  Quoted,
  Other(String)
}

impl StatusId {
  pub const KNOWN: [StatusId; 8] = [
    StatusId::PendingRenewal,
    StatusId::ApprovalPending,
    StatusId::InDesign,
    StatusId::PendingQuote,
    StatusId::Quoted,
    StatusId::Bound,
    StatusId::Issued,
    StatusId::Closed
  ];

  pub fn as_str(&self) -> &str {
    match self {
      | StatusId::ApprovalPending => {
        "APPROVAL_PENDING"
      }
      | StatusId::Bound => "BOUND",
      | StatusId::Closed => "CLOSED",
      | StatusId::InDesign => "IN_DESIGN",
      | StatusId::Issued => "ISSUED",
      | StatusId::PendingQuote => {
        "PENDING_QUOTE"
      }
      | StatusId::PendingRenewal => {
        "PENDING_RENEWAL"
      }
      | StatusId::Quoted => "QUOTED",
      | StatusId::Other(code) => code
    }
  }

  /// `PENDING_QUOTE` -> `Pending Quote`.
  pub fn label(&self) -> String {
    self
      .as_str()
      .split('_')
      .filter(|word| !word.is_empty())
      .map(|word| {
        let lower =
          word.to_ascii_lowercase();
        let mut chars = lower.chars();
        match chars.next() {
          | Some(first) => {
            first
              .to_ascii_uppercase()
              .to_string()
              + chars.as_str()
          }
          | None => String::new()
        }
      })
      .collect::<Vec<_>>()
      .join(" ")
  }
}

impl From<String> for StatusId {
  fn from(code: String) -> Self {
    match code.as_str() {
      | "APPROVAL_PENDING" => {
        StatusId::ApprovalPending
      }
      | "BOUND" => StatusId::Bound,
      | "CLOSED" => StatusId::Closed,
      | "IN_DESIGN" => StatusId::InDesign,
      | "ISSUED" => StatusId::Issued,
      | "PENDING_QUOTE" => {
        StatusId::PendingQuote
      }
      | "PENDING_RENEWAL" => {
        StatusId::PendingRenewal
      }
      | "QUOTED" => StatusId::Quoted,
      | _ => StatusId::Other(code)
    }
  }
}

impl From<&str> for StatusId {
  fn from(code: &str) -> Self {
    StatusId::from(code.to_string())
  }
}

impl From<StatusId> for String {
  fn from(id: StatusId) -> Self {
    match id {
      | StatusId::Other(code) => code,
      | known => known.as_str().to_string()
    }
  }
}

impl fmt::Display for StatusId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  Serialize,
  Deserialize,
)]
#[serde(from = "String", into = "String")]
pub enum LineOfBusiness {
  Aqua,
  Crop,
  Cyber,
  DirectorsAndOfficers,
  Energy,
  GeneralLiability,
  Other(String)
}

impl LineOfBusiness {
  pub fn as_str(&self) -> &str {
    match self {
      | LineOfBusiness::Aqua => "Aqua",
      | LineOfBusiness::Crop => "Crop",
      | LineOfBusiness::Cyber => "Cyber",
      | LineOfBusiness::DirectorsAndOfficers => "D&O",
      | LineOfBusiness::Energy => "Energy",
      | LineOfBusiness::GeneralLiability => "GL",
      | LineOfBusiness::Other(name) => name
    }
  }
}

impl From<String> for LineOfBusiness {
  fn from(name: String) -> Self {
    match name.as_str() {
      | "Aqua" => LineOfBusiness::Aqua,
      | "Crop" => LineOfBusiness::Crop,
      | "Cyber" => LineOfBusiness::Cyber,
      | "D&O" => {
        LineOfBusiness::DirectorsAndOfficers
      }
      | "Energy" => LineOfBusiness::Energy,
      | "GL" => {
        LineOfBusiness::GeneralLiability
      }
      | _ => LineOfBusiness::Other(name)
    }
  }
}

impl From<LineOfBusiness> for String {
  fn from(lob: LineOfBusiness) -> Self {
    match lob {
      | LineOfBusiness::Other(name) => name,
      | known => known.as_str().to_string()
    }
  }
}

impl fmt::Display for LineOfBusiness {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
pub struct Status {
  pub id:    StatusId,
  #[serde(default)]
  pub name:  String,
  #[serde(default)]
  pub count: u64
}

impl Status {
  pub fn display_name(&self) -> String {
    if self.name.trim().is_empty() {
      self.id.label()
    } else {
      self.name.clone()
    }
  }
}

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
pub struct LineOfBusinessStats {
  #[serde(default)]
  pub statuses:          Vec<Status>,
  #[serde(default)]
  pub lines_of_business:
    Vec<LineOfBusiness>
}

impl LineOfBusinessStats {
  pub fn total_count(&self) -> u64 {
    self
      .statuses
      .iter()
      .map(|status| status.count)
      .sum()
  }
}

/// One policy record as the search endpoint returns it.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct GridRow {
  #[serde(rename = "_id", alias = "id")]
  pub id:               String,
  pub status:           StatusId,
  #[serde(default)]
  pub named_insured:    String,
  #[serde(rename = "MNPID", default)]
  pub mnpid:            String,
  #[serde(default)]
  pub line_of_business:
    Vec<LineOfBusiness>,
  #[serde(
    rename = "MBU_handler",
    default
  )]
  pub mbu_handler:      String,
  #[serde(
    rename = "producing_UW",
    default
  )]
  pub producing_uw:     String,
  #[serde(default)]
  pub created_at:       String,
  #[serde(
    rename = "searchText",
    default
  )]
  pub search_text:      String
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
  Asc,
  Desc
}

impl SortDirection {
  pub fn as_str(self) -> &'static str {
    match self {
      | SortDirection::Asc => "asc",
      | SortDirection::Desc => "desc"
    }
  }
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct SortEntry {
  pub sort:   SortDirection,
  pub col_id: String
}

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum FilterAction {
  Contains,
  Equals
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(untagged)]
pub enum FilterValue {
  Text(String),
  Values(Vec<String>)
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct FilterEntry {
  pub field:         String,
  pub filter_action: FilterAction,
  pub filter_value:  FilterValue
}

/// Body of `POST /api/search`.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
  pub company_id:     String,
  pub group_id:       String,
  pub sort_entries:   Vec<SortEntry>,
  pub filter_entries: Vec<FilterEntry>,
  pub from:           u64,
  pub size:           u64
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
pub struct SearchResponse {
  #[serde(alias = "rows", default)]
  pub data:  Vec<GridRow>,
  #[serde(alias = "totalRows", default)]
  pub total: u64,
  #[serde(default)]
  pub from:  u64,
  #[serde(default)]
  pub size:  u64
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unknown_status_codes_round_trip()
  {
    let status: Status =
      serde_json::from_str(
        r#"{"id":"ACTIVE","count":10}"#
      )
      .expect("decode status");
    assert_eq!(
      status.id,
      StatusId::Other(
        "ACTIVE".to_string()
      )
    );
    assert_eq!(status.name, "");
    assert_eq!(
      status.display_name(),
      "Active"
    );

    let encoded =
      serde_json::to_value(&status.id)
        .expect("encode id");
    assert_eq!(encoded, "ACTIVE");
  }

  #[test]
  fn known_status_codes_map_to_variants()
  {
    let id: StatusId =
      serde_json::from_str(
        r#""PENDING_RENEWAL""#
      )
      .expect("decode id");
    assert_eq!(
      id,
      StatusId::PendingRenewal
    );
    assert_eq!(
      id.label(),
      "Pending Renewal"
    );
  }

  #[test]
  fn stats_total_sums_counts() {
    let stats: LineOfBusinessStats =
      serde_json::from_str(
        r#"{
          "statuses": [
            {"id": "ACTIVE", "count": 10},
            {"id": "PENDING", "count": 5}
          ],
          "linesOfBusiness": ["Auto", "Home", "D&O"]
        }"#
      )
      .expect("decode stats");

    assert_eq!(stats.total_count(), 15);
    assert_eq!(
      stats.lines_of_business[2],
      LineOfBusiness::DirectorsAndOfficers
    );
    assert_eq!(
      stats.lines_of_business[0]
        .as_str(),
      "Auto"
    );
  }

  #[test]
  fn search_response_accepts_legacy_field_names()
   {
    let response: SearchResponse =
      serde_json::from_str(
        r#"{
          "rows": [{
            "id": "1",
            "status": "ACTIVE",
            "named_insured": "Test Company",
            "MNPID": "123",
            "line_of_business": ["Auto"],
            "MBU_handler": "John Doe",
            "producing_UW": "Jane Smith"
          }],
          "totalRows": 1
        }"#
      )
      .expect("decode response");

    assert_eq!(response.total, 1);
    assert_eq!(response.data.len(), 1);
    let row = &response.data[0];
    assert_eq!(row.id, "1");
    assert_eq!(row.mnpid, "123");
    assert_eq!(
      row.producing_uw,
      "Jane Smith"
    );
    assert!(row.created_at.is_empty());
  }

  #[test]
  fn search_request_uses_wire_names() {
    let request = SearchRequest {
      company_id:     "20116".to_string(),
      group_id:       "3194034"
        .to_string(),
      sort_entries:   vec![SortEntry {
        sort:   SortDirection::Desc,
        col_id: "named_insured"
          .to_string()
      }],
      filter_entries: vec![
        FilterEntry {
          field:         "searchFields"
            .to_string(),
          filter_action:
            FilterAction::Contains,
          filter_value: FilterValue::Text(
            "acme".to_string()
          )
        },
        FilterEntry {
          field:         "status"
            .to_string(),
          filter_action:
            FilterAction::Equals,
          filter_value:
            FilterValue::Values(vec![
              "BOUND".to_string(),
            ])
        },
      ],
      from:           0,
      size:           10
    };

    let value =
      serde_json::to_value(&request)
        .expect("encode request");
    assert_eq!(
      value,
      serde_json::json!({
        "companyId": "20116",
        "groupId": "3194034",
        "sortEntries": [
          {"sort": "desc", "colId": "named_insured"}
        ],
        "filterEntries": [
          {
            "field": "searchFields",
            "filterAction": "contains",
            "filterValue": "acme"
          },
          {
            "field": "status",
            "filterAction": "equals",
            "filterValue": ["BOUND"]
          }
        ],
        "from": 0,
        "size": 10
      })
    );
  }
}
