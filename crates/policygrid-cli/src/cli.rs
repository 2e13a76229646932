use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Args, Parser, Subcommand};
use policygrid_shared::SortDirection;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

/// `COLUMN[:asc|desc]`, ascending when the direction is omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortArg {
    pub col_id: String,
    pub sort: SortDirection,
}

impl std::str::FromStr for SortArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (col, dir) = s.split_once(':').unwrap_or((s, "asc"));
        let col = col.trim();
        if col.is_empty() {
            return Err(anyhow!("sort column cannot be empty"));
        }
        let sort = match dir.trim().to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            other => return Err(anyhow!("invalid sort direction: {other}")),
        };
        Ok(Self {
            col_id: col.to_string(),
            sort,
        })
    }
}

/// `FIELD=V1,V2`; set-filter values for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilterArg {
    pub field: String,
    pub values: Vec<String>,
}

impl std::str::FromStr for FieldFilterArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kv = s.parse::<KeyVal>()?;
        if kv.key.is_empty() {
            return Err(anyhow!("filter field cannot be empty"));
        }
        Ok(Self {
            field: kv.key,
            values: kv
                .value
                .split(',')
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .collect(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "policygrid",
    version,
    about = "Query the policy search backend from a terminal"
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// rc file to load instead of $POLICYGRIDRC or ~/.policygridrc
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    #[arg(
        long = "set",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub overrides: Vec<KeyVal>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Status and line-of-business counts
    Stats,
    /// One page of policy rows
    Search(SearchArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Status code, or ALL
    #[arg(long)]
    pub status: Option<String>,

    /// Free-text search across the server's searchable fields
    #[arg(long)]
    pub text: Option<String>,

    #[arg(
        long = "sort",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<SortArg>()),
        action = ArgAction::Append
    )]
    pub sort: Vec<SortArg>,

    #[arg(
        long = "filter",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<FieldFilterArg>()),
        action = ArgAction::Append
    )]
    pub filters: Vec<FieldFilterArg>,

    /// 1-based page number
    #[arg(long, default_value_t = 1)]
    pub page: u64,

    #[arg(long = "page-size")]
    pub page_size: Option<u64>,

    /// Print the search payload instead of sending it
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print rows as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = match (quiet, verbose) {
        (q, _) if q >= 2 => "error",
        (1, _) => "warn",
        (_, v) if v >= 3 => "trace",
        (_, 2) => "debug",
        (_, 1) => "info",
        _ => "warn",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_arg_defaults_to_ascending() {
        let arg: SortArg = "named_insured".parse().expect("parse sort");
        assert_eq!(arg.sort, SortDirection::Asc);

        let arg: SortArg = "MNPID:DESC".parse().expect("parse sort");
        assert_eq!(arg.col_id, "MNPID");
        assert_eq!(arg.sort, SortDirection::Desc);

        assert!("MNPID:sideways".parse::<SortArg>().is_err());
    }

    #[test]
    fn filter_arg_splits_values_in_order() {
        let arg: FieldFilterArg = "line_of_business=GL, Aqua,GL"
            .parse()
            .expect("parse filter");
        assert_eq!(arg.field, "line_of_business");
        assert_eq!(arg.values, vec!["GL", "Aqua", "GL"]);
    }

    #[test]
    fn search_subcommand_parses_repeated_flags() {
        let cli = GlobalCli::parse_from([
            "policygrid",
            "-vv",
            "--set",
            "grid.page_size=20",
            "search",
            "--status",
            "BOUND",
            "--sort",
            "named_insured:desc",
            "--sort",
            "MNPID",
            "--page",
            "3",
        ]);

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.overrides.len(), 1);
        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.status.as_deref(), Some("BOUND"));
        assert_eq!(args.sort.len(), 2);
        assert_eq!(args.page, 3);
        assert!(!args.dry_run);
    }
}
