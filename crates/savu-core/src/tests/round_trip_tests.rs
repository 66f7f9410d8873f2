#![cfg(test)]

use std::sync::Arc;

use serde_json::json;
use tempfile::tempdir;

use crate::citation::CitationRecord;
use crate::plugin_list::{PluginList, Position, RenderOptions, Verbosity};
use crate::storage::{Container, LocalStorageProvider};

use super::common::{empty_list, filter_step, loader_step, mock_registry, saver_step, standard_list};

#[test]
fn test_file_round_trip_preserves_steps() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("lists").join("process.nxs");

    let mut list = standard_list();
    let extra = filter_step(2, &["tomo"])
        .with_position(Position::with_letter(2, 'b'))
        .with_parameter("preview", json!([[1, 2], [3, 4]]))
        .with_active(false);
    list.insert(2, extra).unwrap();
    list.save(&path).expect("save should succeed");

    let mut loaded = PluginList::new(Arc::new(mock_registry()));
    loaded.load(&path, true).expect("load should succeed");

    assert_eq!(loaded.steps(), list.steps());
    assert_eq!(loaded.loader_indices(), &[0]);
    assert_eq!(loaded.saver_indices(), &[3]);
}

#[test]
fn test_round_trip_without_activation_filter_drops_inactive_steps() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("process.nxs");

    let mut list = empty_list();
    list.push(loader_step(1)).unwrap();
    list.push(filter_step(2, &["tomo"]).with_active(false)).unwrap();
    list.push(saver_step(3, "tomo")).unwrap();
    list.save(&path).unwrap();

    let mut loaded = empty_list();
    loaded.load(&path, false).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.saver_indices(), &[1]);
}

#[test]
fn test_storage_provider_base_path_is_used() {
    let dir = tempdir().expect("Failed to create temp dir");
    let storage = Arc::new(LocalStorageProvider::new(dir.path().to_path_buf()));

    let list = standard_list().with_framework_citations(vec![CitationRecord::named("framework")]);
    let list = list.with_storage(storage.clone());
    list.save(std::path::Path::new("relative.nxs")).unwrap();
    assert!(dir.path().join("relative.nxs").is_file());

    let mut loaded = empty_list().with_storage(storage);
    loaded.load(std::path::Path::new("relative.nxs"), false).unwrap();
    assert_eq!(loaded.len(), 3);
}

#[test]
fn test_loaded_list_renders_and_validates() {
    let mut container = Container::new();
    standard_list().save_to(&mut container).unwrap();
    let text = container.to_json().unwrap();

    let mut loaded = empty_list();
    loaded.load_from(&Container::from_json(&text).unwrap(), false).unwrap();
    loaded.validate_structure().unwrap();

    let rendered = loaded.render(&RenderOptions::new(Verbosity::Quiet)).unwrap();
    assert_eq!(rendered.lines().count(), 3);
    assert!(rendered.lines().next().unwrap().contains(" 1) MockLoader"));
}
