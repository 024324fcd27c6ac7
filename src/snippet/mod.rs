/// Snippet Management Layer
///
/// Local side of a deployment:
/// - Type definitions (RegistryEntry, Registry, Snippet)
/// - JSON registry loading with duplicate detection
/// - Snippet file reading with marker validation

// Core snippet type definitions
pub mod types;

// Registry file loader
pub mod registry;

// Snippet source reader and marker check
pub mod reader;

// Re-export commonly used types
pub use reader::read_snippet;
pub use registry::load_registry;
pub use types::{Registry, RegistryEntry, Snippet};
