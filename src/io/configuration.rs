//! Runtime defaults and fixed output naming

// Default values for configurable parameters
/// Default worker pool size for render dispatch
pub const DEFAULT_POOL_SIZE: usize = 4;

// Output settings
/// Directory receiving rendered images before archiving
pub const COLLECTION_DIR: &str = "collection";
/// Archive written next to the collection directory
pub const COLLECTION_ARCHIVE: &str = "collection.zip";
/// Extension appended to formatted output names
pub const OUTPUT_EXTENSION: &str = "png";
/// Substitution slot expected in the `name_format` template
pub const NAME_FORMAT_SLOT: &str = "{}";
