use std::{fs, io, path::Path};

use cpath::{search::Algorithm, wire::DEFAULT_SIZE};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_SETTINGS: &str = include_str!("./default_settings.toml");

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read or write settings file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub default_width: Option<usize>,
    #[serde(default)]
    pub default_height: Option<usize>,
    #[serde(default)]
    pub default_algorithm: Option<Algorithm>,
    #[serde(default)]
    pub log_level: Option<LevelFilter>,
    #[serde(default)]
    pub color: Option<bool>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn populate(mut self) -> Self {
        let (width, height) = self.get_default_size();
        self.default_width = Some(width);
        self.default_height = Some(height);
        self.default_algorithm = Some(self.get_default_algorithm());
        self.log_level = Some(self.get_log_level());
        self.color = Some(self.get_color());

        self
    }

    pub fn set_default_size(mut self, width: usize, height: usize) -> Self {
        self.default_width = Some(width);
        self.default_height = Some(height);
        self
    }

    /// Zero counts as unset, same as in maze requests.
    pub fn get_default_size(&self) -> (usize, usize) {
        let pick = |len: Option<usize>| len.filter(|&l| l > 0).unwrap_or(DEFAULT_SIZE);
        (pick(self.default_width), pick(self.default_height))
    }

    pub fn set_default_algorithm(mut self, value: Algorithm) -> Self {
        self.default_algorithm = Some(value);
        self
    }

    pub fn get_default_algorithm(&self) -> Algorithm {
        self.default_algorithm.unwrap_or_default()
    }

    pub fn set_log_level(mut self, value: LevelFilter) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn get_log_level(&self) -> LevelFilter {
        self.log_level.unwrap_or(LevelFilter::Warn)
    }

    pub fn set_color(mut self, value: bool) -> Self {
        self.color = Some(value);
        self
    }

    pub fn get_color(&self) -> bool {
        self.color.unwrap_or(true)
    }

    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(text)?)
    }

    pub fn default_settings() -> Self {
        // the bundled file is checked by tests
        Self::parse(DEFAULT_SETTINGS).unwrap_or_default()
    }

    /// Loads the settings, writing the default file first if there is none yet.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("settings file {} not found, creating default", path.display());
                Self::reset_config(path)?;
                Ok(Self::default_settings())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Like [`Settings::load`], but falls back to defaults instead of failing.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            log::warn!("{err}, using default settings");
            Self::default_settings()
        })
    }

    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, DEFAULT_SETTINGS)?;
        Ok(())
    }
}
