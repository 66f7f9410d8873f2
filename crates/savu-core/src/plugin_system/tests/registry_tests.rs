#![cfg(test)]

use crate::kernel::constants::DEFAULT_SAVER_ID;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::registry::{PluginRegistry, StaticPluginRegistry};
use crate::plugin_system::traits::Capability;
use crate::tests::common::{mock_registry, MockPlugin, FILTER_ID, GPU_FILTER_ID, LOADER_ID, SAVER_ID};

#[test]
fn test_registry_initialization() {
    let registry = StaticPluginRegistry::new();
    assert_eq!(registry.count(), 0);
    assert_eq!(registry.default_saver_id(), DEFAULT_SAVER_ID);
    assert!(registry.plugin_ids().is_empty());
}

#[test]
fn test_register_and_resolve() {
    let registry = mock_registry();
    assert_eq!(registry.count(), 4);
    assert!(registry.has_plugin(LOADER_ID));

    let class = registry.resolve(LOADER_ID).expect("loader should resolve");
    assert_eq!(class.id(), LOADER_ID);
    assert_eq!(class.name(), "MockLoader");
    assert!(class.capabilities().is_loader());
    assert!(!class.capabilities().is_saver());
}

#[test]
fn test_plugin_ids_are_sorted() {
    let registry = mock_registry();
    let mut expected = vec![
        LOADER_ID.to_string(),
        FILTER_ID.to_string(),
        GPU_FILTER_ID.to_string(),
        SAVER_ID.to_string(),
    ];
    expected.sort();
    assert_eq!(registry.plugin_ids(), expected);
}

#[test]
fn test_register_duplicate_fails() {
    let mut registry = mock_registry();
    let result = registry.register_factory(|| Box::new(MockPlugin::filter()));
    match result {
        Err(PluginSystemError::AlreadyRegistered { plugin_id }) => assert_eq!(plugin_id, FILTER_ID),
        other => panic!("Expected AlreadyRegistered, got {:?}", other),
    }
    assert_eq!(registry.count(), 4);
}

#[test]
fn test_resolve_unknown_id() {
    let registry = mock_registry();
    let err = registry.resolve("savu.plugins.unknown").unwrap_err();
    assert!(matches!(err, PluginSystemError::PluginNotFound { ref plugin_id } if plugin_id == "savu.plugins.unknown"));
    assert!(registry.instantiate("savu.plugins.unknown").is_err());
    assert!(registry.capabilities("savu.plugins.unknown").is_err());
}

#[test]
fn test_unregister() {
    let mut registry = mock_registry();
    let removed = registry.unregister(GPU_FILTER_ID).expect("gpu filter should be registered");
    assert!(removed.capabilities().contains(Capability::Gpu));
    assert!(!registry.has_plugin(GPU_FILTER_ID));
    assert!(registry.unregister(GPU_FILTER_ID).is_err());
}

#[test]
fn test_instantiate_gives_fresh_instances() {
    let registry = mock_registry();
    let mut first = registry.instantiate(FILTER_ID).unwrap();
    first.populate_default_parameters();
    assert!(!first.parameters().is_empty());

    let second = registry.instantiate(FILTER_ID).unwrap();
    assert!(second.parameters().is_empty());
    assert_eq!(second.name(), "MockFilter");
}

#[test]
fn test_custom_default_saver() {
    let registry = StaticPluginRegistry::with_default_saver("savu.plugins.savers.tiff_saver");
    assert_eq!(registry.default_saver_id(), "savu.plugins.savers.tiff_saver");
}
