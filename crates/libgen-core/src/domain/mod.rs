// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for libgen.
//!
//! This module contains pure logic: library types, naming, metadata,
//! capability resolution and the composite dependency table. All I/O is
//! handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No clock or randomness**: every derived value is reproducible
//! - **Immutable values**: metadata and results are Clone + PartialEq
//!
// Public API - what the world sees
pub mod capabilities;
pub mod dependencies;
pub mod error;
pub mod generator_result;
pub mod metadata;
pub mod naming;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use capabilities::{
    CapabilitySet, LIBRARY_TYPE_REGISTRY, LibraryTypeDef, PlatformRequest, find_library_type,
    resolve_capabilities,
};
pub use dependencies::{
    CompositeType, DEPENDENCY_DESCRIPTORS, DependencyDescriptor, UpstreamLibrary,
    find_descriptor,
};
pub use error::DomainError;
pub use generator_result::GeneratorResult;
pub use metadata::{LIBS_DIR, LibraryMetadata, MetadataOverrides, WorkspaceConfig};
pub use naming::NameVariants;
pub use validation::DomainValidator;
pub use value_objects::{Capability, LibraryType, Platform};
