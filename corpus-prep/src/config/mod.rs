//! Configuration loader and validator.
//!
//! Responsibilities:
//! - Read a YAML config file or environment variables into [`ExtractorConfig`]
//! - Apply defaults when values are missing
//! - Validate constraints (e.g., path bounds must be > 0)

pub mod model;

pub use model::{ExtractorConfig, OutputFormat};

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::{Error, Result};

/// Environment variable naming the YAML config file.
pub const CONFIG_ENV: &str = "CORPUS_CONFIG";

/// Loads the configuration for a run.
///
/// With `CORPUS_CONFIG` set, that YAML file is authoritative; otherwise
/// `CORPUS_*` variables override the defaults. The result is always
/// validated.
pub fn load_from_env_or_default() -> Result<ExtractorConfig> {
    let cfg = match env::var(CONFIG_ENV) {
        Ok(path) => from_yaml_file(Path::new(&path))?,
        Err(_) => from_env()?,
    };
    cfg.validate()?;
    Ok(cfg)
}

/// Parses a YAML config file. Missing keys fall back to defaults, unknown
/// keys and malformed values are configuration errors.
pub fn from_yaml_file(path: &Path) -> Result<ExtractorConfig> {
    let raw = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("cannot read {:?}: {}", path, e)))?;
    serde_yml::from_str(&raw).map_err(|e| Error::Config(format!("cannot parse {:?}: {}", path, e)))
}

/// Builds a config from `CORPUS_*` environment variables over the defaults.
///
/// Recognized: `CORPUS_PATH_WIDTH`, `CORPUS_PATH_LENGTH`,
/// `CORPUS_MAX_PATHS_IN_TRAIN`, `CORPUS_MAX_PATHS_IN_TEST`,
/// `CORPUS_NODES_TO_NUMBERS`, `CORPUS_INCLUDE_TOKEN_TYPES`,
/// `CORPUS_OUTPUT_DIR`, `CORPUS_FORMATS` (comma-separated names) and
/// `CORPUS_SHUFFLE_SEED`.
pub fn from_env() -> Result<ExtractorConfig> {
    let mut cfg = ExtractorConfig::default();

    if let Some(v) = env_parse::<usize>("CORPUS_PATH_WIDTH")? {
        cfg.path_width = v;
    }
    if let Some(v) = env_parse::<usize>("CORPUS_PATH_LENGTH")? {
        cfg.path_length = v;
    }
    if let Some(v) = env_parse::<usize>("CORPUS_MAX_PATHS_IN_TRAIN")? {
        cfg.max_paths_in_train = Some(v);
    }
    if let Some(v) = env_parse::<usize>("CORPUS_MAX_PATHS_IN_TEST")? {
        cfg.max_paths_in_test = Some(v);
    }
    if let Some(v) = env_parse::<bool>("CORPUS_NODES_TO_NUMBERS")? {
        cfg.nodes_to_numbers = v;
    }
    if let Some(v) = env_parse::<bool>("CORPUS_INCLUDE_TOKEN_TYPES")? {
        cfg.include_token_types = v;
    }
    if let Ok(raw) = env::var("CORPUS_OUTPUT_DIR") {
        cfg.output_directory = PathBuf::from(raw);
    }
    if let Ok(raw) = env::var("CORPUS_FORMATS") {
        cfg.formats = parse_format_list(&raw)?;
    }
    if let Some(v) = env_parse::<u64>("CORPUS_SHUFFLE_SEED")? {
        cfg.shuffle_seed = Some(v);
    }

    Ok(cfg)
}

fn env_parse<T: FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| Error::Config(format!("`{}`: {}", name, e))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(Error::Config(format!("`{}`: {}", name, e))),
    }
}

fn parse_format_list(raw: &str) -> Result<Vec<OutputFormat>> {
    let mut formats = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let format = OutputFormat::from_name(name)
            .ok_or_else(|| Error::Config(format!("unknown output format `{}`", name)))?;
        formats.push(format);
    }
    Ok(formats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_yaml(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.yaml");
        let mut f = fs::File::create(&path).unwrap();
        write!(f, "{content}").unwrap();
        (dir, path)
    }

    #[test]
    fn partial_yaml_merges_with_defaults() {
        let (_dir, path) = write_yaml(
            "path_length: 5\n\
             max_paths_in_train: 200\n\
             formats: [path_contexts, trees]\n",
        );
        let cfg = from_yaml_file(&path).unwrap();
        assert_eq!(cfg.path_length, 5);
        assert_eq!(cfg.path_width, 8);
        assert_eq!(cfg.max_paths_in_train, Some(200));
        assert_eq!(
            cfg.formats,
            vec![OutputFormat::PathContexts, OutputFormat::Trees]
        );
        assert!(!cfg.nodes_to_numbers);
    }

    #[test]
    fn unknown_yaml_keys_are_rejected() {
        let (_dir, path) = write_yaml("path_legnth: 5\n");
        assert!(matches!(from_yaml_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn negative_limits_fail_at_parse_time() {
        let (_dir, path) = write_yaml("path_width: -3\n");
        assert!(matches!(from_yaml_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn missing_config_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = from_yaml_file(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn format_lists_parse_and_reject_unknown_names() {
        assert_eq!(
            parse_format_list("path_contexts, trees").unwrap(),
            vec![OutputFormat::PathContexts, OutputFormat::Trees]
        );
        assert!(parse_format_list("path_contexts,xml").is_err());
        assert!(parse_format_list("").unwrap().is_empty());
    }
}
