use serde::{
  Deserialize,
  Serialize
};

use crate::datasource::{
  SEARCH_PATH,
  STATS_PATH,
  endpoint_url
};
use crate::grid::DEFAULT_PAGE_SIZE;
use crate::query::TenantContext;

pub const DEFAULT_API_BASE_URL: &str =
  "http://localhost:3000";
pub const DEFAULT_COMPANY_ID: &str =
  "20116";
pub const DEFAULT_GROUP_ID: &str =
  "3194034";

/// Settings shared by every client of the policy API.
#[derive(
  Debug,
  Clone,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
)]
#[serde(default)]
pub struct ClientConfig {
  pub api_base_url:       String,
  pub company_id:         String,
  pub group_id:           String,
  pub page_size:          u64,
  /// Zero disables debouncing of search keystrokes.
  pub search_debounce_ms: u32
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      api_base_url:       DEFAULT_API_BASE_URL
        .to_string(),
      company_id:         DEFAULT_COMPANY_ID
        .to_string(),
      group_id:           DEFAULT_GROUP_ID
        .to_string(),
      page_size:          DEFAULT_PAGE_SIZE,
      search_debounce_ms: 0
    }
  }
}

impl ClientConfig {
  pub fn tenant(&self) -> TenantContext {
    TenantContext {
      company_id: self.company_id.clone(),
      group_id:   self.group_id.clone()
    }
  }

  pub fn stats_url(&self) -> String {
    endpoint_url(
      &self.api_base_url,
      STATS_PATH
    )
  }

  pub fn search_url(&self) -> String {
    endpoint_url(
      &self.api_base_url,
      SEARCH_PATH
    )
  }

  /// Rejects values that would make every request fail.
  pub fn validate(
    &self
  ) -> anyhow::Result<()> {
    if self.api_base_url.trim().is_empty()
    {
      anyhow::bail!(
        "api base url cannot be empty"
      );
    }
    if self.company_id.trim().is_empty()
      || self.group_id.trim().is_empty()
    {
      anyhow::bail!(
        "tenant company and group ids \
         are required"
      );
    }
    if self.page_size == 0 {
      anyhow::bail!(
        "page size must be positive"
      );
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partial_toml_falls_back_to_defaults()
  {
    let cfg: ClientConfig = toml::from_str(
      r#"
        api_base_url = "https://policies.example.test/"
        page_size = 20
      "#
    )
    .expect("parse config");

    assert_eq!(cfg.page_size, 20);
    assert_eq!(
      cfg.company_id,
      DEFAULT_COMPANY_ID
    );
    assert_eq!(
      cfg.search_url(),
      "https://policies.example.test/api/search"
    );
    assert!(cfg.validate().is_ok());
  }

  #[test]
  fn tenant_comes_from_config() {
    let cfg = ClientConfig {
      company_id: "1".to_string(),
      group_id: "2".to_string(),
      ..ClientConfig::default()
    };
    assert_eq!(
      cfg.tenant(),
      TenantContext {
        company_id: "1".to_string(),
        group_id:   "2".to_string()
      }
    );
  }

  #[test]
  fn empty_tenant_is_rejected() {
    let cfg = ClientConfig {
      group_id: " ".to_string(),
      ..ClientConfig::default()
    };
    assert!(cfg.validate().is_err());
  }
}
