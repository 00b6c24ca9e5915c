use std::path::PathBuf;

use clap::Parser;

use crate::data::aggregate::DEFAULT_NORMALIZE_FACTOR;
use crate::error::ConfigError;

pub const DEFAULT_IRELAND_PATH: &str = "export and import countries.csv";
pub const DEFAULT_WORLD_PATH: &str = "ireland import and export value.csv";
pub const DEFAULT_PREVIEW_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Import/export dashboard for Ireland and world trade statistics.
#[derive(Debug, Parser)]
#[command(name = "trade-dashboard", version, about)]
pub struct Cli {
    /// Ireland table (.csv, .json or .parquet)
    #[arg(long, default_value = DEFAULT_IRELAND_PATH)]
    pub ireland: PathBuf,

    /// World table (.csv, .json or .parquet)
    #[arg(long, default_value = DEFAULT_WORLD_PATH)]
    pub world: PathBuf,

    /// Rows shown in each data preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    pub preview_rows: usize,

    /// Divisor applied to the choropleth totals
    #[arg(long, default_value_t = DEFAULT_NORMALIZE_FACTOR)]
    pub normalize_factor: f64,
}

// ---------------------------------------------------------------------------
// Validated configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub ireland_path: PathBuf,
    pub world_path: PathBuf,
    pub preview_rows: usize,
    pub normalize_factor: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            ireland_path: PathBuf::from(DEFAULT_IRELAND_PATH),
            world_path: PathBuf::from(DEFAULT_WORLD_PATH),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            normalize_factor: DEFAULT_NORMALIZE_FACTOR,
        }
    }
}

impl TryFrom<Cli> for DashboardConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        if cli.preview_rows == 0 {
            return Err(ConfigError::PreviewRows);
        }
        if !cli.normalize_factor.is_finite() || cli.normalize_factor == 0.0 {
            return Err(ConfigError::NormalizeFactor(cli.normalize_factor));
        }
        Ok(Self {
            ireland_path: cli.ireland,
            world_path: cli.world,
            preview_rows: cli.preview_rows,
            normalize_factor: cli.normalize_factor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<DashboardConfig, ConfigError> {
        let cli = Cli::try_parse_from(std::iter::once("trade-dashboard").chain(args.iter().copied()))
            .expect("valid arguments");
        DashboardConfig::try_from(cli)
    }

    #[test]
    fn test_defaults_match_builtin_config() {
        assert_eq!(parse(&[]).unwrap(), DashboardConfig::default());
    }

    #[test]
    fn test_overrides() {
        let cfg = parse(&[
            "--ireland",
            "ie.parquet",
            "--world",
            "world.json",
            "--preview-rows",
            "25",
            "--normalize-factor",
            "1e6",
        ])
        .unwrap();
        assert_eq!(cfg.ireland_path, PathBuf::from("ie.parquet"));
        assert_eq!(cfg.world_path, PathBuf::from("world.json"));
        assert_eq!(cfg.preview_rows, 25);
        assert_eq!(cfg.normalize_factor, 1e6);
    }

    #[test]
    fn test_rejects_degenerate_values() {
        assert!(matches!(
            parse(&["--preview-rows", "0"]),
            Err(ConfigError::PreviewRows)
        ));
        assert!(matches!(
            parse(&["--normalize-factor", "0"]),
            Err(ConfigError::NormalizeFactor(_))
        ));
    }
}
