//! Domain value objects: LibraryType, Platform, Capability.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! They hold NO capability logic. Defaults and supported-capability tables
//! live in `capabilities.rs`. This file's only job is to define the types,
//! their string representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Add a registry entry in `capabilities.rs`

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── LibraryType ──────────────────────────────────────────────────────────────

/// One of the five scaffolding targets, each with its own fixed file layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LibraryType {
    Contract,
    DataAccess,
    Feature,
    Infra,
    Provider,
}

impl LibraryType {
    /// Every library type, in documentation order.
    pub const ALL: [LibraryType; 5] = [
        Self::Contract,
        Self::DataAccess,
        Self::Feature,
        Self::Infra,
        Self::Provider,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contract => "contract",
            Self::DataAccess => "data-access",
            Self::Feature => "feature",
            Self::Infra => "infra",
            Self::Provider => "provider",
        }
    }
}

impl fmt::Display for LibraryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LibraryType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contract" => Ok(Self::Contract),
            "data-access" | "data_access" | "dataaccess" | "da" => Ok(Self::DataAccess),
            "feature" => Ok(Self::Feature),
            "infra" | "infrastructure" => Ok(Self::Infra),
            "provider" => Ok(Self::Provider),
            other => Err(DomainError::UnknownLibraryType(other.to_string())),
        }
    }
}

// ── Platform ─────────────────────────────────────────────────────────────────

/// Runtime a library targets. Seeds the runtime capabilities of a library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Node,
    Browser,
    Universal,
    Edge,
}

impl Platform {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Browser => "browser",
            Self::Universal => "universal",
            Self::Edge => "edge",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "node" | "server" => Ok(Self::Node),
            "browser" | "client" => Ok(Self::Browser),
            "universal" => Ok(Self::Universal),
            "edge" => Ok(Self::Edge),
            other => Err(DomainError::UnknownPlatform(other.to_string())),
        }
    }
}

// ── Capability ───────────────────────────────────────────────────────────────

/// A gate: one optional slice of a library's file set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Server,
    Client,
    Edge,
    Rpc,
    Cqrs,
}

impl Capability {
    pub const COUNT: usize = 5;

    pub const ALL: [Capability; Self::COUNT] = [
        Self::Server,
        Self::Client,
        Self::Edge,
        Self::Rpc,
        Self::Cqrs,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::Client => "client",
            Self::Edge => "edge",
            Self::Rpc => "rpc",
            Self::Cqrs => "cqrs",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
