use std::path::Path;
use std::sync::Arc;

use assert_cmd::Command; // Bring Command into scope
use predicates::prelude::*; // Bring predicate traits into scope
use tempfile::tempdir;

use savu_core::plugin_list::{PluginList, PluginStep, Position};
use savu_core::plugin_system::traits::Plugin;
use savu_plugins::{builtin_registry, NxtomoLoader, TimeseriesFieldCorrections};

fn step_for(plugin: &mut dyn Plugin, position: u32) -> PluginStep {
    plugin.populate_default_parameters();
    PluginStep::from_plugin(plugin, Some(Position::new(position)))
}

/// Write a loader + correction list, optionally with the correction switched off
fn write_list(path: &Path, correction_active: bool) {
    let mut list = PluginList::new(Arc::new(builtin_registry().unwrap()));
    list.push(step_for(&mut NxtomoLoader::default(), 1)).unwrap();
    let correction = step_for(&mut TimeseriesFieldCorrections::default(), 2).with_active(correction_active);
    list.push(correction).unwrap();
    list.save(path).unwrap();
}

#[test]
fn test_list_command_quiet() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("process.nxs");
    write_list(&path, true);

    let mut cmd = Command::cargo_bin("savu-config")?;
    cmd.arg("list").arg(&path).arg("-q");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("  1) NxtomoLoader"))
        .stdout(predicate::str::contains("  2) TimeseriesFieldCorrections"))
        .stdout(predicate::str::contains("preview").not());

    Ok(())
}

#[test]
fn test_list_command_verbose_shows_synopsis() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("process.nxs");
    write_list(&path, true);

    let mut cmd = Command::cargo_bin("savu-config")?;
    cmd.arg("list").arg(&path).arg("--verbose");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("A Plugin to apply a simple dark and flatfield correction"))
        .stdout(predicate::str::contains("savu.plugins.corrections.timeseries_field_corrections"));

    Ok(())
}

#[test]
fn test_list_command_all_marks_inactive_steps() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("process.nxs");
    write_list(&path, false);

    Command::cargo_bin("savu-config")?
        .args(["list", "-q"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("TimeseriesFieldCorrections").not());

    Command::cargo_bin("savu-config")?
        .args(["list", "-q", "--all"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("***OFF***  2) TimeseriesFieldCorrections"));

    Ok(())
}

#[test]
fn test_check_command_adds_savers() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("process.nxs");
    let output = dir.path().join("completed.nxs");
    write_list(&path, true);

    Command::cargo_bin("savu-config")?
        .arg("check")
        .arg(&path)
        .args(["--require", "tomo", "--require", "sino"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 steps (1 loaders, 0 savers)"))
        .stdout(predicate::str::contains("Added savu.plugins.savers.hdf5_saver for dataset 'tomo'"))
        .stdout(predicate::str::contains("Added savu.plugins.savers.hdf5_saver for dataset 'sino'"));

    Command::cargo_bin("savu-config")?
        .args(["list", "-q"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("  3) Hdf5Saver"))
        .stdout(predicate::str::contains("  4) Hdf5Saver"));

    Ok(())
}

#[test]
fn test_check_command_rejects_list_without_loader() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("no_loader.nxs");
    let mut list = PluginList::new(Arc::new(builtin_registry().unwrap()));
    list.push(step_for(&mut TimeseriesFieldCorrections::default(), 1)).unwrap();
    list.save(&path).unwrap();

    Command::cargo_bin("savu-config")?
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a loader plugin"));

    Ok(())
}

#[test]
fn test_missing_file_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    Command::cargo_bin("savu-config")?
        .arg("list")
        .arg(dir.path().join("missing.nxs"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));

    Ok(())
}

#[test]
fn test_plugins_command_lists_builtins() -> Result<(), Box<dyn std::error::Error>> {
    Command::cargo_bin("savu-config")?
        .arg("plugins")
        .assert()
        .success()
        .stdout(predicate::str::contains("Hdf5Saver (savu.plugins.savers.hdf5_saver) [saver]"))
        .stdout(predicate::str::contains("NxtomoLoader (savu.plugins.loaders.full_field_loaders.nxtomo_loader) [loader]"))
        .stdout(predicate::str::contains("DummyPtycho"));

    Ok(())
}

#[test]
fn test_config_file_sets_framework_citations() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("process.nxs");
    let output = dir.path().join("completed.nxs");
    let config = dir.path().join("savu.json");
    write_list(&path, true);
    std::fs::write(&config, r#"{"framework_citations": [{"name": "facility"}]}"#)?;

    Command::cargo_bin("savu-config")?
        .arg("--config")
        .arg(&config)
        .arg("check")
        .arg(&path)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let saved = std::fs::read_to_string(&output)?;
    assert!(saved.contains("facility"));
    assert!(!saved.contains("arXiv"));
    Ok(())
}
