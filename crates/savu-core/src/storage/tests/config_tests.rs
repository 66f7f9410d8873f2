use std::path::Path;
use tempfile::tempdir;

use crate::citation::CitationRecord;
use crate::kernel::constants::{DEFAULT_RENDER_WIDTH, DEFAULT_SAVER_ID};
use crate::kernel::error::{Error, Result};
use crate::storage::config::{ConfigFormat, FrameworkConfig};
use crate::storage::error::StorageSystemError;
use crate::storage::local::LocalStorageProvider;

#[test]
fn test_defaults() {
    let config = FrameworkConfig::default();
    assert_eq!(config.default_saver_id, DEFAULT_SAVER_ID);
    assert_eq!(config.render_width, DEFAULT_RENDER_WIDTH);
    assert!(!config.colour);
    assert_eq!(config.framework_citations.len(), 1);
    assert_eq!(config.framework_citations[0].name, "savu");
}

#[test]
fn test_partial_json_fills_defaults() -> Result<()> {
    let config = FrameworkConfig::deserialize(r#"{"colour": true}"#, ConfigFormat::Json)?;
    assert!(config.colour);
    assert_eq!(config.render_width, DEFAULT_RENDER_WIDTH);
    assert_eq!(config.framework_citations, FrameworkConfig::default().framework_citations);
    Ok(())
}

#[test]
fn test_format_from_path() {
    assert_eq!(ConfigFormat::from_path(Path::new("savu.json")), Some(ConfigFormat::Json));
    assert_eq!(ConfigFormat::from_path(Path::new("savu.JSON")), Some(ConfigFormat::Json));
    assert_eq!(ConfigFormat::from_path(Path::new("savu.ini")), None);
    assert_eq!(ConfigFormat::from_path(Path::new("savu")), None);
    assert_eq!(ConfigFormat::Json.extension(), "json");
}

#[cfg(feature = "yaml-config")]
#[test]
fn test_yaml_round_trip() -> Result<()> {
    let mut config = FrameworkConfig::default();
    config.render_width = 100;
    let text = config.serialize(ConfigFormat::Yaml)?;
    assert_eq!(FrameworkConfig::deserialize(&text, ConfigFormat::Yaml)?, config);
    assert_eq!(ConfigFormat::from_path(Path::new("savu.yml")), Some(ConfigFormat::Yaml));
    Ok(())
}

#[cfg(feature = "toml-config")]
#[test]
fn test_toml_round_trip() -> Result<()> {
    let mut config = FrameworkConfig::default();
    config.framework_citations.push(CitationRecord::named("tomopy").with_doi("10.1107/S1600577514013939"));
    let text = config.serialize(ConfigFormat::Toml)?;
    assert_eq!(FrameworkConfig::deserialize(&text, ConfigFormat::Toml)?, config);
    Ok(())
}

#[test]
fn test_save_and_load() -> Result<()> {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());
    let path = Path::new("savu.json");

    let config = FrameworkConfig {
        default_saver_id: "savu.plugins.savers.tiff_saver".to_string(),
        framework_citations: vec![CitationRecord::named("framework")],
        ..FrameworkConfig::default()
    };
    config.save(&provider, path)?;
    assert_eq!(FrameworkConfig::load(&provider, path)?, config);
    assert_eq!(FrameworkConfig::load_or_default(&provider, Some(path))?, config);
    assert_eq!(FrameworkConfig::load_or_default(&provider, None)?, FrameworkConfig::default());
    Ok(())
}

#[test]
fn test_load_rejects_unknown_extension() {
    let provider = LocalStorageProvider::current_dir();
    let err = FrameworkConfig::load(&provider, Path::new("savu.ini")).unwrap_err();
    assert!(matches!(err, Error::StorageSystem(StorageSystemError::UnsupportedConfigFormat(_))));
}

#[test]
fn test_load_reports_parse_errors() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider = LocalStorageProvider::new(temp_dir.path().to_path_buf());
    std::fs::write(temp_dir.path().join("bad.json"), "{ not json").unwrap();

    let err = FrameworkConfig::load(&provider, Path::new("bad.json")).unwrap_err();
    assert!(matches!(err, Error::StorageSystem(StorageSystemError::DeserializationError { .. })));
}
