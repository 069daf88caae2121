use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use taskrank_core::{DEFAULT_SUGGESTIONS, Strategy};

use crate::state::{ensure_taskrank_home, taskrank_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringSection,
    pub suggest: SuggestSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringSection {
    /// Strategy used when neither the flag nor the payload names one.
    pub strategy: String,
    /// IANA timezone used to decide what "today" is.
    pub timezone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestSection {
    pub limit: usize,
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            strategy: Strategy::default().name().to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

impl Default for SuggestSection {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SUGGESTIONS,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(taskrank_home()?.join("config.toml"))
}

pub fn parse_config(s: &str) -> Result<Config> {
    toml::from_str(s).context("parse config.toml")
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = ensure_taskrank_home()?.join("config.toml");
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

pub fn show_config() -> Result<()> {
    let cfg = load_config()?;
    println!("# {}", config_path()?.display());
    print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
    Ok(())
}
