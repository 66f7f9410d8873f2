/// Class attribute written on every container group
pub const NX_CLASS: &str = "NX_class";

/// Root group of a plugin list container
pub const ENTRY_GROUP: &str = "entry";

/// Group holding the framework-level citations
pub const FRAMEWORK_CITATIONS_GROUP: &str = "framework_citations";

/// Group holding one sub-group per plugin step
pub const PLUGIN_GROUP: &str = "plugin";

/// Plugin used when missing savers are synthesized
pub const DEFAULT_SAVER_ID: &str = "savu.plugins.savers.hdf5_saver";

/// Column width of rendered plugin lists
pub const DEFAULT_RENDER_WIDTH: usize = 85;

/// Minimum width of the zero-padded step keys
pub const POSITION_KEY_WIDTH: usize = 4;

/// Marker prefixed to the title of inactive steps
pub const INACTIVE_MARKER: &str = "***OFF***";
