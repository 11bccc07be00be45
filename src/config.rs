use chrono::Month;
use num_traits::FromPrimitive;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cmds::{default_key_map, KeyMap};
use crate::error::{Error, ErrorKind, Result};
use crate::names::Names;
use crate::notification::NotificationKind;
use crate::weekstart::WeekStart;

const CONFIG_PATH_ENV_VAR: &str = "DTECAL_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("dtecal").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".dtecal.toml"));
    }

    locations
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub week_start: WeekStart,
    weekday_names: Option<Vec<String>>,
    month_names: Option<Vec<String>>,
    pub tasks: Option<PathBuf>,
    pub notification: NotificationKind,
    pub item_symbol: char,
    pub today_symbol: char,
    pub hide_empty_rows: bool,
    pub keys: KeyMap,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            week_start: WeekStart::default(),
            weekday_names: None,
            month_names: None,
            tasks: None,
            notification: NotificationKind::default(),
            item_symbol: '*',
            today_symbol: '>',
            hide_empty_rows: false,
            keys: default_key_map(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::from(ErrorKind::IOError(e))
                .context(&format!("could not read config {}", path.display()))
        })?;

        let mut config: Config = toml::from_str(&content)?;

        // Aliases from the file extend the defaults instead of replacing them
        let mut keys = default_key_map();
        keys.extend(config.keys.drain());
        config.keys = keys;

        if let Some(tasks) = config.tasks.take() {
            config.tasks = Some(resolve_relative(path, tasks));
        }

        config.names()?;
        Ok(config)
    }

    /// Name tables, falling back to English abbreviations for missing ones.
    pub fn names(&self) -> Result<Names> {
        let defaults = Names::default();
        if self.weekday_names.is_none() && self.month_names.is_none() {
            return Ok(defaults);
        }

        let weekdays = self.weekday_names.clone().unwrap_or_else(|| {
            defaults
                .header(WeekStart::Sunday)
                .iter()
                .map(|s| s.to_string())
                .collect()
        });
        let months = self.month_names.clone().unwrap_or_else(|| {
            (1..=12)
                .filter_map(Month::from_u32)
                .map(|month| defaults.month(month).to_owned())
                .collect()
        });

        Names::new(weekdays, months).map_err(|e| {
            Error::new(
                ErrorKind::ConfigParse,
                &e.message.unwrap_or_else(|| "invalid name table".to_owned()),
            )
        })
    }
}

fn resolve_relative(config_path: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        config_path
            .parent()
            .map(|dir| dir.join(&path))
            .unwrap_or(path)
    } else {
        path
    }
}

/// Loads `path` if given, otherwise the first existing default location,
/// otherwise the built-in defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path);
    }

    match find_configfile_locations().iter().find(|p| p.is_file()) {
        Some(path) => {
            log::info!("using config {}", path.display());
            Config::load(path)
        }
        None => {
            log::debug!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}
