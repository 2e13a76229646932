pub mod cli;
pub mod commands;
pub mod config;
pub mod http;
pub mod render;

use std::ffi::OsString;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use policygrid_core::datasource::RowBlockSource;
use tracing::{
  debug,
  info
};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[tracing::instrument(skip_all)]
pub async fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli = cli::GlobalCli::parse_from(
    raw_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting policygrid CLI"
  );

  let mut cfg = config::Config::load(
    cli.config.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .overrides
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  );
  debug!(files = ?cfg.loaded_files, "configuration loaded");

  let client =
    cfg.client_config().context(
      "invalid policygrid \
       configuration"
    )?;
  debug!(
    stats = %client.stats_url(),
    search = %client.search_url(),
    "policy API endpoints"
  );
  let timeout = Duration::from_secs(
    cfg
      .get_u64("http.timeout_secs")?
      .unwrap_or(DEFAULT_TIMEOUT_SECS)
  );
  let renderer = render::Renderer::new(
    cfg.get("color").as_deref()
  )?;
  let api = http::HttpApi::new(
    &client.api_base_url,
    timeout
  )?;

  match cli.command {
    | cli::Command::Stats => {
      commands::stats(&api, &renderer)
        .await?;
    }
    | cli::Command::Search(args) => {
      let source = RowBlockSource::new(
        api,
        client.tenant()
      );
      commands::search(
        &source, &args, &client,
        &renderer
      )
      .await?;
    }
  }

  info!("done");
  Ok(())
}
