//! Bundled and on-disk data loaders.
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::DataLoader;
use crate::city::CityCatalog;
use crate::config::PuzzleConfig;
use crate::content::ClueContent;

pub const CITIES_FILE: &str = "cities.json";
pub const CONTENT_FILE: &str = "content.json";
pub const CONFIG_FILE: &str = "puzzle.json";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON parsing error in {file}: {source}")]
    Json {
        file: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

fn parse<T>(
    file: &'static str,
    json: &str,
    decode: impl FnOnce(&str) -> Result<T, serde_json::Error>,
) -> Result<T, DataError> {
    decode(json).map_err(|source| DataError::Json { file, source })
}

/// Loads the datasets compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticDataLoader;

impl DataLoader for StaticDataLoader {
    type Error = DataError;

    fn load_cities(&self) -> Result<CityCatalog, Self::Error> {
        let json = include_str!("../assets/data/cities.json");
        parse(CITIES_FILE, json, CityCatalog::from_json)
    }

    fn load_content(&self) -> Result<ClueContent, Self::Error> {
        let json = include_str!("../assets/data/content.json");
        parse(CONTENT_FILE, json, ClueContent::from_json)
    }

    fn load_config(&self) -> Result<PuzzleConfig, Self::Error> {
        let json = include_str!("../assets/data/puzzle.json");
        parse(CONFIG_FILE, json, PuzzleConfig::from_json)
    }
}

/// Loads `cities.json`, `content.json` and `puzzle.json` from a directory.
#[derive(Debug, Clone)]
pub struct DirDataLoader {
    root: PathBuf,
}

impl DirDataLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, file: &str) -> Result<String, DataError> {
        let path = self.root.join(file);
        fs::read_to_string(&path).map_err(|source| DataError::Io { path, source })
    }
}

impl DataLoader for DirDataLoader {
    type Error = DataError;

    fn load_cities(&self) -> Result<CityCatalog, Self::Error> {
        parse(CITIES_FILE, &self.read(CITIES_FILE)?, CityCatalog::from_json)
    }

    fn load_content(&self) -> Result<ClueContent, Self::Error> {
        parse(CONTENT_FILE, &self.read(CONTENT_FILE)?, ClueContent::from_json)
    }

    fn load_config(&self) -> Result<PuzzleConfig, Self::Error> {
        parse(CONFIG_FILE, &self.read(CONFIG_FILE)?, PuzzleConfig::from_json)
    }
}
