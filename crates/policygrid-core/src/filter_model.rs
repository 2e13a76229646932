use std::collections::BTreeMap;

use serde::{
  Deserialize,
  Serialize
};

pub const STATUS_FIELD: &str = "status";
pub const SEARCH_TEXT_FIELD: &str =
  "searchText";

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
pub enum FilterType {
  Set,
  Text
}

/// Filter state for one column, in the shape the grid keeps it.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct FilterDescriptor {
  pub filter_type: FilterType,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub values:      Option<Vec<String>>,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub filter:      Option<String>,
  #[serde(
    rename = "type",
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub condition:   Option<String>
}

impl FilterDescriptor {
  pub fn set_of<I, S>(
    values: I
  ) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>
  {
    Self {
      filter_type: FilterType::Set,
      values:      Some(
        values
          .into_iter()
          .map(Into::into)
          .collect()
      ),
      filter:      None,
      condition:   None
    }
  }

  pub fn text_contains(
    text: impl Into<String>
  ) -> Self {
    Self {
      filter_type: FilterType::Text,
      values:      None,
      filter:      Some(text.into()),
      condition:   Some(
        "contains".to_string()
      )
    }
  }
}

/// Column key to descriptor. One entry per column; `set` replaces
/// whatever the column held before.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct FilterModel {
  entries:
    BTreeMap<String, FilterDescriptor>
}

impl FilterModel {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn get(
    &self,
    field: &str
  ) -> Option<&FilterDescriptor> {
    self.entries.get(field)
  }

  pub fn set(
    &mut self,
    field: impl Into<String>,
    descriptor: FilterDescriptor
  ) -> Option<FilterDescriptor> {
    self
      .entries
      .insert(field.into(), descriptor)
  }

  pub fn remove(
    &mut self,
    field: &str
  ) -> Option<FilterDescriptor> {
    self.entries.remove(field)
  }

  pub fn contains(
    &self,
    field: &str
  ) -> bool {
    self.entries.contains_key(field)
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn iter(
    &self
  ) -> impl Iterator<Item = (&str, &FilterDescriptor)>
  {
    self
      .entries
      .iter()
      .map(|(field, descriptor)| {
        (field.as_str(), descriptor)
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn set_overwrites_previous_descriptor()
  {
    let mut model = FilterModel::new();
    model.set(
      STATUS_FIELD,
      FilterDescriptor::set_of([
        "BOUND"
      ])
    );
    let previous = model.set(
      STATUS_FIELD,
      FilterDescriptor::set_of([
        "QUOTED"
      ])
    );

    assert_eq!(model.len(), 1);
    assert_eq!(
      previous
        .and_then(|d| d.values)
        .unwrap_or_default(),
      vec!["BOUND".to_string()]
    );
    assert_eq!(
      model
        .get(STATUS_FIELD)
        .and_then(|d| d.values.clone()),
      Some(vec!["QUOTED".to_string()])
    );
  }

  #[test]
  fn descriptors_serialize_in_grid_shape()
   {
    let mut model = FilterModel::new();
    model.set(
      SEARCH_TEXT_FIELD,
      FilterDescriptor::text_contains(
        "acme"
      )
    );
    model.set(
      STATUS_FIELD,
      FilterDescriptor::set_of([
        "ISSUED"
      ])
    );

    let value =
      serde_json::to_value(&model)
        .expect("encode model");
    assert_eq!(
      value,
      serde_json::json!({
        "searchText": {
          "filterType": "text",
          "filter": "acme",
          "type": "contains"
        },
        "status": {
          "filterType": "set",
          "values": ["ISSUED"]
        }
      })
    );
  }
}
