//! Files every library gets, whatever its type.

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    application::generators::{GeneratorContext, PlannedFile},
    domain::{LibraryMetadata, LibraryType},
    template::{FileHeader, TemplateBuilder},
};

const EFFECT_VERSION: &str = "^3.17.0";

/// Start a TypeScript file with the canonical header.
pub(crate) fn ts_file(
    metadata: &LibraryMetadata,
    title: &str,
    description: &str,
    module: &str,
) -> TemplateBuilder {
    let mut builder = TemplateBuilder::new();
    builder.add_file_header(FileHeader::new(
        title,
        description,
        format!("{}/{}", metadata.package_name, module),
    ));
    builder
}

/// `package.json`, `tsconfig.json`, `README.md`, `CLAUDE.md` and
/// `src/index.ts`, in that order.
pub(crate) fn common_files(ctx: &GeneratorContext, exports: &[String]) -> Vec<PlannedFile> {
    vec![
        PlannedFile::new("package.json", package_json(ctx)),
        PlannedFile::new("tsconfig.json", tsconfig_json(&ctx.metadata)),
        PlannedFile::new("README.md", readme(ctx)),
        PlannedFile::new("CLAUDE.md", assistant_notes(ctx)),
        PlannedFile::new("src/index.ts", index_ts(&ctx.metadata, exports)),
    ]
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageJson<'a> {
    name: &'a str,
    version: &'static str,
    description: &'a str,
    #[serde(rename = "type")]
    module_type: &'static str,
    private: bool,
    side_effects: bool,
    exports: IndexMap<&'static str, &'static str>,
    dependencies: IndexMap<String, String>,
    keywords: Vec<&'a str>,
}

fn package_json(ctx: &GeneratorContext) -> String {
    let meta = &ctx.metadata;

    let mut dependencies = IndexMap::new();
    dependencies.insert("effect".to_string(), EFFECT_VERSION.to_string());
    let workspace_links = [&ctx.links.contract_package, &ctx.links.data_access_package];
    for package in workspace_links.into_iter().flatten() {
        dependencies.insert(package.clone(), "workspace:*".to_string());
    }
    if let (LibraryType::Provider, Some(sdk)) = (meta.library_type, &ctx.links.external_service) {
        dependencies.insert(sdk.clone(), "latest".to_string());
    }

    let manifest = PackageJson {
        name: &meta.package_name,
        version: "0.0.1",
        description: &meta.description,
        module_type: "module",
        private: true,
        side_effects: false,
        exports: IndexMap::from([(".", "./src/index.ts")]),
        dependencies,
        keywords: meta.tags.iter().map(String::as_str).collect(),
    };

    let mut out = serde_json::to_string_pretty(&manifest).unwrap_or_default();
    out.push('\n');
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TsConfig {
    extends: String,
    compiler_options: TsCompilerOptions,
    include: Vec<&'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TsCompilerOptions {
    out_dir: String,
    root_dir: &'static str,
}

fn tsconfig_json(meta: &LibraryMetadata) -> String {
    let config = TsConfig {
        extends: format!("{}tsconfig.base.json", meta.offset_from_root),
        compiler_options: TsCompilerOptions {
            out_dir: format!("{}dist/{}", meta.offset_from_root, meta.project_root),
            root_dir: "src",
        },
        include: vec!["src/**/*.ts"],
    };
    let mut out = serde_json::to_string_pretty(&config).unwrap_or_default();
    out.push('\n');
    out
}

fn readme(ctx: &GeneratorContext) -> String {
    let meta = &ctx.metadata;
    let capabilities: Vec<&str> = ctx.capabilities.iter().map(|c| c.as_str()).collect();
    let capabilities = if capabilities.is_empty() {
        "none".to_string()
    } else {
        capabilities.join(", ")
    };

    format!(
        "# {package}\n\n\
         {description}\n\n\
         | | |\n\
         |---|---|\n\
         | Type | `{library_type}` |\n\
         | Platform | `{platform}` |\n\
         | Capabilities | {capabilities} |\n\
         | Tags | {tags} |\n\n\
         ## Usage\n\n\
         ```ts\n\
         import * as {class} from \"{package}\";\n\
         ```\n",
        package = meta.package_name,
        description = meta.description,
        library_type = meta.library_type,
        platform = ctx.platform,
        tags = meta.tags_csv(),
        class = meta.names.class_name,
    )
}

fn assistant_notes(ctx: &GeneratorContext) -> String {
    let meta = &ctx.metadata;
    let layout = match meta.library_type {
        LibraryType::Contract => {
            "Entities, errors, events and ports only. No implementations and no I/O."
        }
        LibraryType::DataAccess => {
            "Repositories implement contract ports. Keep SQL inside `src/lib/queries.ts`."
        }
        LibraryType::Feature => {
            "Business logic lives in `src/lib/server`. Client code must not import server modules."
        }
        LibraryType::Infra => {
            "One service tag plus one layer per runtime. Consumers depend on the tag, not a layer."
        }
        LibraryType::Provider => {
            "Wraps exactly one external SDK. Never leak SDK types through `src/index.ts`."
        }
    };

    format!(
        "# {package}\n\n\
         {layout}\n\n\
         - Project root: `{root}`\n\
         - Source root: `{source}`\n\
         - Public API: `src/index.ts`\n\
         - Regenerating replaces every generated file; put hand-written code in new files.\n",
        package = meta.package_name,
        root = meta.project_root,
        source = meta.source_root,
    )
}

fn index_ts(meta: &LibraryMetadata, exports: &[String]) -> String {
    let mut builder = ts_file(
        meta,
        &format!("{} public API", meta.names.class_name),
        &meta.description,
        "index",
    );
    match exports.split_first() {
        None => {
            builder.add_raw("export {};");
        }
        Some((first, rest)) => {
            builder.add_raw(format!("export * from \"./{first}\";"));
            for module in rest {
                builder.add_raw_tight(format!("export * from \"./{module}\";"));
            }
        }
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generators::LibraryLinks;
    use crate::domain::{PlatformRequest, WorkspaceConfig};

    fn ctx(library_type: LibraryType, links: LibraryLinks) -> GeneratorContext {
        let meta =
            LibraryMetadata::compute("order", library_type, &WorkspaceConfig::default()).unwrap();
        GeneratorContext::new(meta, &PlatformRequest::default(), links)
    }

    #[test]
    fn package_json_wires_workspace_links() {
        let ctx = ctx(
            LibraryType::Feature,
            LibraryLinks {
                data_access_package: Some("@myorg/data-access-order".into()),
                ..LibraryLinks::default()
            },
        );
        let json: serde_json::Value = serde_json::from_str(&package_json(&ctx)).unwrap();
        assert_eq!(json["name"], "@myorg/feature-order");
        assert_eq!(json["dependencies"]["@myorg/data-access-order"], "workspace:*");
        assert_eq!(json["sideEffects"], false);
    }

    #[test]
    fn package_json_starts_with_name() {
        let ctx = ctx(LibraryType::Contract, LibraryLinks::default());
        assert!(package_json(&ctx).starts_with("{\n  \"name\": \"@myorg/contract-order\""));
    }

    #[test]
    fn tsconfig_extends_base_via_offset() {
        let ctx = ctx(LibraryType::DataAccess, LibraryLinks::default());
        let json: serde_json::Value = serde_json::from_str(&tsconfig_json(&ctx.metadata)).unwrap();
        assert_eq!(json["extends"], "../../../tsconfig.base.json");
    }

    #[test]
    fn index_reexports_modules() {
        let ctx = ctx(LibraryType::Contract, LibraryLinks::default());
        let text = index_ts(&ctx.metadata, &["lib/entities".into(), "lib/errors".into()]);
        let expected = "export * from \"./lib/entities\";\nexport * from \"./lib/errors\";\n";
        assert!(text.contains(expected));
        assert!(text.contains("@module @myorg/contract-order/index"));
    }
}
