//! Static dependency table for composite generation.
//!
//! A composite request (today only `domain`) needs a fixed set of upstream
//! provider and infrastructure libraries. The table lists them in the order
//! they must exist, together with the parameters used to create each one
//! when it is missing. It is read-only, process-wide configuration.

use std::fmt;

use crate::domain::{
    metadata::LIBS_DIR,
    value_objects::{LibraryType, Platform},
};

/// A composite library request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositeType {
    /// contract + data-access + feature, wired together.
    Domain,
}

impl CompositeType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Domain => "domain",
        }
    }
}

impl fmt::Display for CompositeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One upstream library and the defaults used to generate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamLibrary {
    pub library_type: LibraryType,
    /// File-case name; also the directory name under `libs/<type>/`.
    pub name: &'static str,
    pub description: &'static str,
    pub platform: Option<Platform>,
    /// Provider only: the SDK the provider wraps.
    pub external_service: Option<&'static str>,
}

impl UpstreamLibrary {
    /// Identifier in `type:name` form, e.g. `provider:kysely`.
    pub fn id(&self) -> String {
        format!("{}:{}", self.library_type, self.name)
    }

    /// Directory whose presence marks the library as existing.
    pub fn project_root(&self) -> String {
        format!("{LIBS_DIR}/{}/{}", self.library_type, self.name)
    }
}

/// Upstream requirements of one composite type.
#[derive(Debug, Clone, Copy)]
pub struct DependencyDescriptor {
    pub composite: CompositeType,
    /// In generation order.
    pub upstream: &'static [UpstreamLibrary],
}

const DOMAIN: DependencyDescriptor = DependencyDescriptor {
    composite: CompositeType::Domain,
    upstream: &[
        UpstreamLibrary {
            library_type: LibraryType::Provider,
            name: "kysely",
            description: "Type-safe SQL query builder provider",
            platform: Some(Platform::Node),
            external_service: Some("kysely"),
        },
        UpstreamLibrary {
            library_type: LibraryType::Provider,
            name: "redis",
            description: "Redis client provider",
            platform: Some(Platform::Node),
            external_service: Some("ioredis"),
        },
        UpstreamLibrary {
            library_type: LibraryType::Infra,
            name: "database",
            description: "Database connection and transaction infrastructure",
            platform: Some(Platform::Node),
            external_service: None,
        },
        UpstreamLibrary {
            library_type: LibraryType::Infra,
            name: "cache",
            description: "Caching infrastructure",
            platform: Some(Platform::Node),
            external_service: None,
        },
        UpstreamLibrary {
            library_type: LibraryType::Infra,
            name: "observability",
            description: "Logging, tracing and metrics infrastructure",
            platform: Some(Platform::Universal),
            external_service: None,
        },
        UpstreamLibrary {
            library_type: LibraryType::Infra,
            name: "rpc",
            description: "RPC transport and middleware infrastructure",
            platform: Some(Platform::Universal),
            external_service: None,
        },
        UpstreamLibrary {
            library_type: LibraryType::Infra,
            name: "pubsub",
            description: "Publish/subscribe messaging infrastructure",
            platform: Some(Platform::Node),
            external_service: None,
        },
        UpstreamLibrary {
            library_type: LibraryType::Infra,
            name: "queue",
            description: "Background job queue infrastructure",
            platform: Some(Platform::Node),
            external_service: None,
        },
    ],
};

pub static DEPENDENCY_DESCRIPTORS: &[DependencyDescriptor] = &[DOMAIN];

pub fn find_descriptor(composite: CompositeType) -> &'static DependencyDescriptor {
    match composite {
        CompositeType::Domain => &DOMAIN,
    }
}
