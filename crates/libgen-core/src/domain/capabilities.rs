//! Library type capability registry and platform resolution.
//!
//! Each library type is described exactly once by its [`LibraryTypeDef`].
//! Generators never re-derive conditions inline: they receive a
//! [`CapabilitySet`] resolved once, up front, by [`resolve_capabilities`].
//!
//! # Adding a New Library Type
//!
//! 1. Add a variant to `LibraryType` in `value_objects.rs`
//! 2. Add one [`LibraryTypeDef`] entry to [`LIBRARY_TYPE_REGISTRY`]
//! 3. Add its core generator under `application::generators`

use std::fmt;

use serde::Serialize;

use crate::domain::value_objects::{Capability, LibraryType, Platform};

// ── Library type definitions ─────────────────────────────────────────────────

/// Describes the defaults and supported gates of one library type.
#[derive(Debug, Clone, Copy)]
pub struct LibraryTypeDef {
    /// The library type this definition describes.
    pub library_type: LibraryType,

    /// Platform used when the caller does not pick one.
    pub default_platform: Platform,

    /// Every capability this type can produce files for.
    ///
    /// Resolution intersects the requested set with this list.
    pub supported: &'static [Capability],

    /// Tags every library of this type carries, ahead of caller tags.
    pub default_tags: &'static [&'static str],

    /// One-line summary, used for the default description and `libgen list`.
    pub summary: &'static str,
}

const CONTRACT: LibraryTypeDef = LibraryTypeDef {
    library_type: LibraryType::Contract,
    default_platform: Platform::Universal,
    supported: &[Capability::Rpc, Capability::Cqrs],
    default_tags: &["type:contract"],
    summary: "domain contract: entities, errors, events and ports",
};

const DATA_ACCESS: LibraryTypeDef = LibraryTypeDef {
    library_type: LibraryType::DataAccess,
    default_platform: Platform::Node,
    // Repositories only ever run server-side; there is no client gate.
    supported: &[Capability::Server],
    default_tags: &["type:data-access"],
    summary: "data access: repositories and queries",
};

const FEATURE: LibraryTypeDef = LibraryTypeDef {
    library_type: LibraryType::Feature,
    default_platform: Platform::Node,
    supported: &[
        Capability::Server,
        Capability::Client,
        Capability::Edge,
        Capability::Rpc,
        Capability::Cqrs,
    ],
    default_tags: &["type:feature"],
    summary: "feature: services, client state and RPC handlers",
};

const INFRA: LibraryTypeDef = LibraryTypeDef {
    library_type: LibraryType::Infra,
    default_platform: Platform::Node,
    supported: &[Capability::Server, Capability::Client, Capability::Edge],
    default_tags: &["type:infra"],
    summary: "infrastructure service with runtime layers",
};

const PROVIDER: LibraryTypeDef = LibraryTypeDef {
    library_type: LibraryType::Provider,
    default_platform: Platform::Node,
    supported: &[Capability::Server, Capability::Client, Capability::Edge],
    default_tags: &["type:provider"],
    summary: "provider: typed wrapper around an external service SDK",
};

/// Single source of truth for library type capabilities.
pub static LIBRARY_TYPE_REGISTRY: &[LibraryTypeDef] =
    &[CONTRACT, DATA_ACCESS, FEATURE, INFRA, PROVIDER];

/// Find the definition for a library type.
pub fn find_library_type(library_type: LibraryType) -> &'static LibraryTypeDef {
    match library_type {
        LibraryType::Contract => &CONTRACT,
        LibraryType::DataAccess => &DATA_ACCESS,
        LibraryType::Feature => &FEATURE,
        LibraryType::Infra => &INFRA,
        LibraryType::Provider => &PROVIDER,
    }
}

// ── Capability set ───────────────────────────────────────────────────────────

/// Enum-keyed boolean map of enabled gates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CapabilitySet {
    enabled: [bool; Capability::COUNT],
}

impl CapabilitySet {
    pub const fn empty() -> Self {
        Self {
            enabled: [false; Capability::COUNT],
        }
    }

    pub fn of(capabilities: &[Capability]) -> Self {
        let mut set = Self::empty();
        for &cap in capabilities {
            set.insert(cap);
        }
        set
    }

    pub fn insert(&mut self, capability: Capability) {
        self.enabled[capability.index()] = true;
    }

    pub fn remove(&mut self, capability: Capability) {
        self.enabled[capability.index()] = false;
    }

    pub fn with(mut self, capability: Capability) -> Self {
        self.insert(capability);
        self
    }

    pub const fn contains(&self, capability: Capability) -> bool {
        self.enabled[capability.index()]
    }

    /// Keep only the capabilities present in `allowed`.
    pub fn intersect(mut self, allowed: &[Capability]) -> Self {
        for cap in Capability::ALL {
            if !allowed.contains(&cap) {
                self.remove(cap);
            }
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|c| self.contains(*c))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|c| c.as_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}

impl Serialize for CapabilitySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

// ── Platform resolution ──────────────────────────────────────────────────────

/// Caller-facing flags that influence which gates are enabled.
///
/// `None` / `false` fields defer to the library type's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformRequest {
    pub platform: Option<Platform>,
    pub include_client_server: Option<bool>,
    pub include_edge: bool,
    pub include_rpc: bool,
    pub include_cqrs: bool,
}

/// Runtime capabilities implied by a platform.
pub fn platform_capabilities(platform: Platform) -> CapabilitySet {
    match platform {
        Platform::Node => CapabilitySet::of(&[Capability::Server]),
        Platform::Browser => CapabilitySet::of(&[Capability::Client]),
        Platform::Universal => CapabilitySet::of(&[Capability::Server, Capability::Client]),
        Platform::Edge => CapabilitySet::of(&[Capability::Server, Capability::Edge]),
    }
}

/// Resolve the gates for one library.
///
/// Order:
/// 1. Platform (explicit, else the type default) seeds runtime capabilities
/// 2. `include_client_server` forces the server/client split on or drops client
/// 3. `include_edge`, `include_rpc`, `include_cqrs` add their gates
/// 4. The result is intersected with the type's supported capabilities
pub fn resolve_capabilities(library_type: LibraryType, request: &PlatformRequest) -> CapabilitySet {
    let def = find_library_type(library_type);
    let platform = request.platform.unwrap_or(def.default_platform);
    let mut set = platform_capabilities(platform);

    match request.include_client_server {
        Some(true) => {
            set.insert(Capability::Server);
            set.insert(Capability::Client);
        }
        Some(false) => set.remove(Capability::Client),
        None => {}
    }

    if request.include_edge {
        set.insert(Capability::Edge);
    }
    if request.include_rpc {
        set.insert(Capability::Rpc);
    }
    if request.include_cqrs {
        set.insert(Capability::Cqrs);
    }

    set.intersect(def.supported)
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registry is internally consistent.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    for library_type in LibraryType::ALL {
        let count = LIBRARY_TYPE_REGISTRY
            .iter()
            .filter(|def| def.library_type == library_type)
            .count();
        assert_eq!(count, 1, "{library_type} must be registered exactly once");
        assert_eq!(find_library_type(library_type).library_type, library_type);
    }

    for def in LIBRARY_TYPE_REGISTRY {
        let type_tag = format!("type:{}", def.library_type);
        assert!(
            def.default_tags.contains(&type_tag.as_str()),
            "{}: default tags must include '{type_tag}'",
            def.library_type
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_consistent() {
        assert_registry_integrity();
    }

    #[test]
    fn data_access_never_gets_client() {
        let request = PlatformRequest {
            platform: Some(Platform::Universal),
            include_client_server: Some(true),
            ..Default::default()
        };
        let caps = resolve_capabilities(LibraryType::DataAccess, &request);
        assert!(caps.contains(Capability::Server));
        assert!(!caps.contains(Capability::Client));
    }

    #[test]
    fn feature_defaults_to_server_only() {
        let caps = resolve_capabilities(LibraryType::Feature, &PlatformRequest::default());
        assert_eq!(caps, CapabilitySet::of(&[Capability::Server]));
    }

    #[test]
    fn client_server_flag_enables_split() {
        let request = PlatformRequest {
            include_client_server: Some(true),
            ..Default::default()
        };
        let caps = resolve_capabilities(LibraryType::Feature, &request);
        assert!(caps.contains(Capability::Server));
        assert!(caps.contains(Capability::Client));
    }

    #[test]
    fn explicit_false_drops_client_from_universal() {
        let request = PlatformRequest {
            platform: Some(Platform::Universal),
            include_client_server: Some(false),
            ..Default::default()
        };
        let caps = resolve_capabilities(LibraryType::Infra, &request);
        assert!(!caps.contains(Capability::Client));
        assert!(caps.contains(Capability::Server));
    }

    #[test]
    fn contract_ignores_runtime_capabilities() {
        let request = PlatformRequest {
            include_cqrs: true,
            ..Default::default()
        };
        let caps = resolve_capabilities(LibraryType::Contract, &request);
        assert_eq!(caps, CapabilitySet::of(&[Capability::Cqrs]));
    }

    #[test]
    fn edge_platform_implies_edge_gate() {
        let request = PlatformRequest {
            platform: Some(Platform::Edge),
            ..Default::default()
        };
        let caps = resolve_capabilities(LibraryType::Provider, &request);
        assert!(caps.contains(Capability::Edge));
    }

    #[test]
    fn capability_set_display_is_ordered() {
        let set = CapabilitySet::empty()
            .with(Capability::Cqrs)
            .with(Capability::Server);
        assert_eq!(set.to_string(), "[server, cqrs]");
        assert!(CapabilitySet::empty().is_empty());
    }
}
