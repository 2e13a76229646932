use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use policygrid_core::config::{
  ClientConfig,
  DEFAULT_API_BASE_URL,
  DEFAULT_COMPANY_ID,
  DEFAULT_GROUP_ID
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

pub const RC_ENV_VAR: &str =
  "POLICYGRIDRC";
pub const RC_FILE_NAME: &str =
  ".policygridrc";

/// `key = value` settings with `#` comments and `include <path>` lines.
#[derive(Debug, Clone)]
pub struct Config {
  map: HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Config {
  pub fn with_defaults() -> Self {
    let mut map = HashMap::new();
    map.insert(
      "api.base_url".to_string(),
      DEFAULT_API_BASE_URL.to_string()
    );
    map.insert(
      "tenant.company_id".to_string(),
      DEFAULT_COMPANY_ID.to_string()
    );
    map.insert(
      "tenant.group_id".to_string(),
      DEFAULT_GROUP_ID.to_string()
    );
    map.insert(
      "grid.page_size".to_string(),
      "10".to_string()
    );
    map.insert(
      "grid.search_debounce_ms".to_string(),
      "0".to_string()
    );
    map.insert(
      "http.timeout_secs".to_string(),
      "30".to_string()
    );
    map.insert(
      "color".to_string(),
      "on".to_string()
    );

    Config {
      map,
      loaded_files: vec![]
    }
  }

  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Self::with_defaults();

    let rc =
      resolve_rc_path(rc_override)?;
    if let Some(path) = rc {
      info!(rc = %path.display(), "loading policygridrc");
      cfg.load_file(&path)?;
    } else {
      debug!(
        "no policygridrc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      debug!(key = %k, value = %v, "applying override");
      self.map.insert(k, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_u64(
    &self,
    key: &str
  ) -> anyhow::Result<Option<u64>> {
    self
      .map
      .get(key)
      .map(|v| {
        v.trim().parse::<u64>().with_context(
          || {
            format!(
              "{key} must be a \
               non-negative integer, got \
               {v:?}"
            )
          }
        )
      })
      .transpose()
  }

  pub fn client_config(
    &self
  ) -> anyhow::Result<ClientConfig> {
    let defaults = ClientConfig::default();
    let client = ClientConfig {
      api_base_url:       self
        .get("api.base_url")
        .unwrap_or(defaults.api_base_url),
      company_id:         self
        .get("tenant.company_id")
        .unwrap_or(defaults.company_id),
      group_id:           self
        .get("tenant.group_id")
        .unwrap_or(defaults.group_id),
      page_size:          self
        .get_u64("grid.page_size")?
        .unwrap_or(defaults.page_size),
      search_debounce_ms: self
        .get_u64("grid.search_debounce_ms")?
        .map(u32::try_from)
        .transpose()
        .context(
          "grid.search_debounce_ms is too \
           large"
        )?
        .unwrap_or(defaults.search_debounce_ms)
    };
    client.validate()?;
    Ok(client)
  }

  #[tracing::instrument(skip(self))]
  fn load_file(
    &mut self,
    path: &Path
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    self
      .loaded_files
      .push(path.clone());

    let base_dir = path
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let line = raw_line
        .split_once('#')
        .map_or(raw_line, |(before, _)| {
          before
        })
        .trim();
      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path =
          resolve_include_path(
            &base_dir,
            include_rest.trim()
          )?;
        if include_path == path {
          warn!(include = %include_path.display(), "policygridrc includes itself; skipping");
          continue;
        }
        if include_path.exists() {
          self
            .load_file(&include_path)?;
        } else {
          warn!(include = %include_path.display(), "include file does not exist; skipping");
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    Ok(())
  }
}

fn resolve_rc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(rc_env) =
    std::env::var(RC_ENV_VAR)
  {
    if rc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      rc_env
    )));
  }

  let Some(home) = dirs::home_dir()
  else {
    return Ok(None);
  };
  let candidate = home.join(RC_FILE_NAME);
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let expanded =
    expand_tilde(Path::new(include));
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  #[test]
  fn rc_file_and_includes_override_defaults()
   {
    let dir = tempdir().expect("tempdir");
    let shared = dir.path().join("tenant.rc");
    fs::write(
      &shared,
      "tenant.company_id = 42 # shared\n\
       tenant.group_id=7\n"
    )
    .expect("write include");

    let rc = dir.path().join("policygridrc");
    fs::write(
      &rc,
      "# local backend\n\
       api.base_url = http://127.0.0.1:8080\n\
       include tenant.rc\n\
       include missing.rc\n\
       grid.page_size = 20\n"
    )
    .expect("write rc");

    let cfg = Config::load(Some(&rc))
      .expect("load config");
    assert_eq!(cfg.loaded_files.len(), 2);

    let client = cfg
      .client_config()
      .expect("client config");
    assert_eq!(
      client.api_base_url,
      "http://127.0.0.1:8080"
    );
    assert_eq!(client.company_id, "42");
    assert_eq!(client.group_id, "7");
    assert_eq!(client.page_size, 20);
    assert_eq!(
      cfg.get("color").as_deref(),
      Some("on")
    );
  }

  #[test]
  fn overrides_win_over_file_values() {
    let mut cfg = Config::with_defaults();
    cfg.apply_overrides([
      (
        "grid.page_size".to_string(),
        "50".to_string()
      ),
      (
        "grid.search_debounce_ms".to_string(),
        "300".to_string()
      )
    ]);
    let client = cfg
      .client_config()
      .expect("client config");
    assert_eq!(client.page_size, 50);
    assert_eq!(client.search_debounce_ms, 300);
  }

  #[test]
  fn malformed_lines_are_errors() {
    let dir = tempdir().expect("tempdir");
    let rc = dir.path().join("bad.rc");
    fs::write(&rc, "api.base_url\n")
      .expect("write rc");

    let err = Config::load(Some(&rc))
      .expect_err("should fail");
    assert!(
      err
        .to_string()
        .contains("invalid config line")
    );
  }

  #[test]
  fn non_numeric_page_size_is_rejected() {
    let mut cfg = Config::with_defaults();
    cfg.apply_overrides([(
      "grid.page_size".to_string(),
      "lots".to_string()
    )]);
    assert!(cfg.client_config().is_err());
  }
}
