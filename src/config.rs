//! YAML configuration.
//!
//! Every field has a default, so a missing or empty file is valid:
//!
//! ```yaml
//! part_of_speech: [اسم, فعل, صفة]
//! list_bullets: ["•", "◦"]
//! infer_phrase_type: true
//! ```

use crate::error::{Error, Result};
use crate::extract::DEFAULT_PARTS_OF_SPEECH;
use serde::Deserialize;
use std::fs;
use std::path::Path;

const DEFAULT_LIST_BULLETS: &[&str] = &["•", "◦", "▪", "‣"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Part-of-speech markers recognized as standalone tokens.
    pub part_of_speech: Vec<String>,
    /// Markers that make a plain-text line a list item.
    pub list_bullets: Vec<String>,
    pub infer_phrase_type: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            part_of_speech: DEFAULT_PARTS_OF_SPEECH.iter().map(|s| s.to_string()).collect(),
            list_bullets: DEFAULT_LIST_BULLETS.iter().map(|s| s.to_string()).collect(),
            infer_phrase_type: true,
        }
    }
}

impl Config {
    pub fn from_yaml(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` when given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config = Config::from_yaml("infer_phrase_type: false\n").unwrap();
        assert!(!config.infer_phrase_type);
        assert_eq!(config.list_bullets, Config::default().list_bullets);
        assert!(config.part_of_speech.contains(&"اسم".to_string()));
    }

    #[test]
    fn custom_vocabulary() {
        let config = Config::from_yaml("part_of_speech: [أداة, اسم]\nlist_bullets: [\"-\"]\n").unwrap();
        assert_eq!(config.part_of_speech, vec!["أداة", "اسم"]);
        assert_eq!(config.list_bullets, vec!["-"]);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        assert!(Config::from_yaml("part_of_speech: {").is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Config::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
