use anyhow::Result;
use config::{Config as ConfigLoader, Environment, File};
use mt_eval_core::{EvalMetric, Level};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub metrics: Vec<EvalMetric>,
    pub level: Level,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("MT_EVAL")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("metrics"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config = ConfigLoader::builder()
            .add_source(File::from(path))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metrics: EvalMetric::ALL.to_vec(),
            level: Level::Word,
            log_level: "info".to_string(),
        }
    }
}
