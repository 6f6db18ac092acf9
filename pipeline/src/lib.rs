/// Configuration errors shared by validation, resolution and rendering
mod error;
pub use error::ConfigurationError;

/// Role declarations and where their values come from
mod role;
pub use role::{DirRule, Override, Role, Setting, Source};

/// Role name to value map for a single item
mod resolved;
pub use resolved::ResolvedPaths;

/// Stage descriptors
mod stage;
pub use stage::{Flag, Stage};

/// The pipeline definition and its builder
mod spec;
pub use spec::{PipelineBuilder, PipelineSpec};

/// Rendering a pipeline into a job body
mod render;

/// Built-in campaign pipelines
pub mod presets;
pub use presets::Preset;

pub use template::{MissingRole, Template};

pub type Hasher = std::hash::BuildHasherDefault<rustc_hash::FxHasher>;
pub type HashMap<K, V> = std::collections::HashMap<K, V, Hasher>;
