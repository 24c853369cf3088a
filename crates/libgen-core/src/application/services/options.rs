//! Per-type option schemas.
//!
//! Raw caller options arrive as JSON values. Each library type has its own
//! schema; keys are camelCase and unknown keys are rejected, so a flag that
//! does not apply to a type is an error rather than silently ignored.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    application::generators::LibraryLinks,
    domain::{DomainError, DomainValidator, LibraryType, Platform, PlatformRequest},
};

/// Tags given either as `"a,b"` or `["a", "b"]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TagsInput {
    Csv(String),
    List(Vec<String>),
}

impl TagsInput {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::Csv(raw) => DomainValidator::parse_tags(&raw),
            Self::List(list) => list
                .iter()
                .flat_map(|t| DomainValidator::parse_tags(t))
                .collect(),
        }
    }
}

fn tags_or_empty(tags: Option<TagsInput>) -> Vec<String> {
    tags.map(TagsInput::into_vec).unwrap_or_default()
}

/// Platforms are parsed with the same aliases the CLI accepts.
pub(crate) fn deserialize_platform<'de, D>(deserializer: D) -> Result<Option<Platform>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    raw.map(|s| s.parse::<Platform>())
        .transpose()
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ContractOptions {
    name: String,
    description: Option<String>,
    tags: Option<TagsInput>,
    #[serde(default)]
    include_cqrs: bool,
    #[serde(default)]
    include_rpc: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct DataAccessOptions {
    name: String,
    description: Option<String>,
    tags: Option<TagsInput>,
    contract_package: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FeatureOptions {
    name: String,
    description: Option<String>,
    tags: Option<TagsInput>,
    #[serde(default, deserialize_with = "deserialize_platform")]
    platform: Option<Platform>,
    include_client_server: Option<bool>,
    #[serde(default)]
    include_edge: bool,
    #[serde(default)]
    include_rpc: bool,
    #[serde(default)]
    include_cqrs: bool,
    data_access_package: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct InfraOptions {
    name: String,
    description: Option<String>,
    tags: Option<TagsInput>,
    #[serde(default, deserialize_with = "deserialize_platform")]
    platform: Option<Platform>,
    include_client_server: Option<bool>,
    #[serde(default)]
    include_edge: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ProviderOptions {
    name: String,
    description: Option<String>,
    tags: Option<TagsInput>,
    #[serde(default, deserialize_with = "deserialize_platform")]
    platform: Option<Platform>,
    include_client_server: Option<bool>,
    external_service: Option<String>,
}

/// Decoded, type-independent view of one generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryOptions {
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub request: PlatformRequest,
    pub links: LibraryLinks,
}

impl From<ContractOptions> for LibraryOptions {
    fn from(o: ContractOptions) -> Self {
        Self {
            name: o.name,
            description: o.description,
            tags: tags_or_empty(o.tags),
            request: PlatformRequest {
                include_cqrs: o.include_cqrs,
                include_rpc: o.include_rpc,
                ..PlatformRequest::default()
            },
            links: LibraryLinks::default(),
        }
    }
}

impl From<DataAccessOptions> for LibraryOptions {
    fn from(o: DataAccessOptions) -> Self {
        Self {
            name: o.name,
            description: o.description,
            tags: tags_or_empty(o.tags),
            request: PlatformRequest::default(),
            links: LibraryLinks {
                contract_package: o.contract_package,
                ..LibraryLinks::default()
            },
        }
    }
}

impl From<FeatureOptions> for LibraryOptions {
    fn from(o: FeatureOptions) -> Self {
        Self {
            name: o.name,
            description: o.description,
            tags: tags_or_empty(o.tags),
            request: PlatformRequest {
                platform: o.platform,
                include_client_server: o.include_client_server,
                include_edge: o.include_edge,
                include_rpc: o.include_rpc,
                include_cqrs: o.include_cqrs,
            },
            links: LibraryLinks {
                data_access_package: o.data_access_package,
                ..LibraryLinks::default()
            },
        }
    }
}

impl From<InfraOptions> for LibraryOptions {
    fn from(o: InfraOptions) -> Self {
        Self {
            name: o.name,
            description: o.description,
            tags: tags_or_empty(o.tags),
            request: PlatformRequest {
                platform: o.platform,
                include_client_server: o.include_client_server,
                include_edge: o.include_edge,
                ..PlatformRequest::default()
            },
            links: LibraryLinks::default(),
        }
    }
}

impl From<ProviderOptions> for LibraryOptions {
    fn from(o: ProviderOptions) -> Self {
        Self {
            name: o.name,
            description: o.description,
            tags: tags_or_empty(o.tags),
            request: PlatformRequest {
                platform: o.platform,
                include_client_server: o.include_client_server,
                ..PlatformRequest::default()
            },
            links: LibraryLinks {
                external_service: o.external_service,
                ..LibraryLinks::default()
            },
        }
    }
}

/// Decode `raw` against the schema of `library_type`.
pub fn decode_options(
    library_type: LibraryType,
    raw: Value,
) -> Result<LibraryOptions, DomainError> {
    fn decode<T>(library_type: LibraryType, raw: Value) -> Result<LibraryOptions, DomainError>
    where
        T: DeserializeOwned + Into<LibraryOptions>,
    {
        serde_json::from_value::<T>(raw)
            .map(Into::into)
            .map_err(|e| DomainError::InvalidOptions {
                library_type: library_type.to_string(),
                message: e.to_string(),
            })
    }

    match library_type {
        LibraryType::Contract => decode::<ContractOptions>(library_type, raw),
        LibraryType::DataAccess => decode::<DataAccessOptions>(library_type, raw),
        LibraryType::Feature => decode::<FeatureOptions>(library_type, raw),
        LibraryType::Infra => decode::<InfraOptions>(library_type, raw),
        LibraryType::Provider => decode::<ProviderOptions>(library_type, raw),
    }
}
