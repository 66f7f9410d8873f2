use std::sync::Arc;

use savu_core::kernel::constants::DEFAULT_SAVER_ID;
use savu_core::plugin_list::{PluginList, PluginStep, Position, RenderOptions, Verbosity};
use savu_core::plugin_system::traits::Plugin;
use savu_core::plugin_system::PluginRegistry;

use crate::{builtin_registry, register_builtin, DummyPtycho, NxtomoLoader, TimeseriesFieldCorrections};

#[test]
fn test_builtin_registry_contents() {
    let registry = builtin_registry().expect("built-in plugins register");
    assert_eq!(registry.count(), 4);
    assert!(registry.has_plugin(DEFAULT_SAVER_ID));
    assert!(registry.capabilities(DEFAULT_SAVER_ID).unwrap().is_saver());
    assert!(registry.capabilities(NxtomoLoader::default().id()).unwrap().is_loader());
}

#[test]
fn test_registering_twice_fails() {
    let mut registry = builtin_registry().unwrap();
    assert!(register_builtin(&mut registry).is_err());
}

#[test]
fn test_ptycho_datasets_and_citation() {
    let mut plugin = DummyPtycho::default();
    plugin.populate_default_parameters();
    let (_, outs) = plugin.get_plugin_datasets();
    let names: Vec<&str> = outs.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["probe", "object_transmission", "positions"]);
    assert_eq!(outs[0].pattern.name, "4D_SCAN");
    assert_eq!(plugin.citations()[0].name, "ptypy");
}

#[test]
fn test_builtin_pipeline_is_completed_with_savers() {
    let registry = Arc::new(builtin_registry().unwrap());
    let mut list = PluginList::new(registry.clone());

    let mut loader = registry.instantiate(NxtomoLoader::default().id()).unwrap();
    loader.populate_default_parameters();
    list.push(PluginStep::from_plugin(loader.as_ref(), Some(Position::new(1)))).unwrap();

    let mut correction = TimeseriesFieldCorrections::default();
    correction.populate_default_parameters();
    list.push(PluginStep::from_plugin(&correction, Some(Position::new(2)))).unwrap();

    list.validate_structure().unwrap();
    let added = list.synthesize_missing_savers(&["tomo"]).unwrap();
    assert_eq!(added, vec!["tomo".to_string()]);
    assert_eq!(list.saver_indices(), &[2]);

    let text = list.render(&RenderOptions::new(Verbosity::Verbose)).unwrap();
    assert!(text.contains("A Plugin to apply a simple dark and flatfield correction"));
    assert!(text.contains("3) Hdf5Saver"));
}
