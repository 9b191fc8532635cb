use std::fs;
use std::path::{Path, PathBuf};

use cross_xdg::BaseDirs;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::robot::Table;

pub const ENV_MAX_X: &str = "ROBOT_MAX_X";
pub const ENV_MAX_Y: &str = "ROBOT_MAX_Y";
pub const CONFIG_FILE_NAME: &str = "robot.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for {name}: '{value}' is not an integer")]
    Env { name: &'static str, value: String },

    #[error("table bound {name} must be >= 0 (got {value})")]
    NegativeBound { name: &'static str, value: i32 },
}

/// On-disk layout of `robot.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    table: TableSection,
}

/// Each bound is optional so a file may override just one of them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TableSection {
    max_x: Option<i32>,
    max_y: Option<i32>,
}

/// Table bounds given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct TableOverrides {
    pub max_x: Option<i32>,
    pub max_y: Option<i32>,
    pub config: Option<PathBuf>,
}

/// Resolve the table from process env and config files.
///
/// Order per bound: flag -> env -> config file -> default.
pub fn resolve_table(overrides: &TableOverrides) -> Result<Table, ConfigError> {
    resolve_table_with(overrides, |name| std::env::var(name).ok(), default_config_path())
}

/// Same as [`resolve_table`] with the env lookup and the implicit config path
/// supplied by the caller.
pub fn resolve_table_with<F>(
    overrides: &TableOverrides,
    env: F,
    implicit_path: Option<PathBuf>,
) -> Result<Table, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let file = match overrides.config.as_deref() {
        // An explicit --config must exist and parse.
        Some(path) => read_config(path)?,
        None => match implicit_path {
            Some(path) if path.exists() => match read_config(&path) {
                Ok(file) => file,
                Err(e) => {
                    warn!("ignoring config file: {e}");
                    ConfigFile::default()
                }
            },
            _ => ConfigFile::default(),
        },
    };

    let max_x = pick(overrides.max_x, ENV_MAX_X, &env, file.table.max_x)?;
    let max_y = pick(overrides.max_y, ENV_MAX_Y, &env, file.table.max_y)?;

    let table = Table::new(
        check_bound("max_x", max_x)?,
        check_bound("max_y", max_y)?,
    );
    debug!(?table, "resolved table bounds");
    Ok(table)
}

fn pick<F>(
    flag: Option<i32>,
    name: &'static str,
    env: &F,
    from_file: Option<i32>,
) -> Result<i32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = flag {
        return Ok(v);
    }
    if let Some(raw) = env(name) {
        return raw
            .trim()
            .parse::<i32>()
            .map_err(|_| ConfigError::Env { name, value: raw });
    }
    Ok(from_file.unwrap_or(Table::DEFAULT_MAX))
}

fn check_bound(name: &'static str, value: i32) -> Result<i32, ConfigError> {
    if value < 0 {
        return Err(ConfigError::NegativeBound { name, value });
    }
    Ok(value)
}

fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// `robot.toml` in the XDG config home, e.g. `~/.config/robot.toml` on Linux.
pub fn default_config_path() -> Option<PathBuf> {
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push(CONFIG_FILE_NAME);
    Some(path)
}
