//! Infrastructure libraries: one service tag, one layer per runtime.

use crate::{
    application::generators::{GeneratorContext, TypePlan, shared::ts_file},
    domain::{Capability, LibraryMetadata},
    template::ImportSpec,
};

/// Runtime layers in write order.
const RUNTIMES: [(Capability, &str, &str); 3] = [
    (Capability::Server, "server", "Server"),
    (Capability::Client, "client", "Client"),
    (Capability::Edge, "edge", "Edge"),
];

pub(crate) fn plan(ctx: &GeneratorContext) -> TypePlan {
    let meta = &ctx.metadata;
    let mut plan = TypePlan::default();

    plan.file("src/lib/service/service.ts", service(meta));
    plan.file("src/lib/service/config.ts", config(meta));
    plan.file("src/lib/service/errors.ts", errors(meta));
    plan.export("lib/service/service");
    plan.export("lib/service/config");
    plan.export("lib/service/errors");

    for (capability, runtime, label) in RUNTIMES {
        if ctx.capabilities.contains(capability) {
            plan.file(
                format!("src/lib/layers/{runtime}-layers.ts"),
                runtime_layer(meta, runtime, label),
            );
            plan.export(format!("lib/layers/{runtime}-layers"));
        }
    }

    plan
}

fn service(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Service"),
        &format!("Service tag for {c} infrastructure.\nConsumers depend on this tag only."),
        "service/service",
    );
    b.add_imports([
        ImportSpec::named("effect", ["Context"]),
        ImportSpec::types("effect", ["Effect"]),
        ImportSpec::types("./errors", [format!("{c}Error")]),
    ])
    .add_raw(format!(
        "export interface {c}ServiceShape {{\n\
         \x20 readonly health: Effect.Effect<boolean, {c}Error>;\n\
         }}"
    ))
    .add_raw(format!(
        "export class {c}Service extends Context.Tag(\"{c}Service\")<\n\
         \x20 {c}Service,\n\
         \x20 {c}ServiceShape\n\
         >() {{}}"
    ));
    b.build()
}

fn config(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let k = &meta.names.constant_name;
    let mut b = ts_file(meta, &format!("{c} Config"), "", "service/config");
    b.add_imports([ImportSpec::named("effect", ["Config"])])
        .add_raw(format!(
            "export const {c}Config = Config.all({{\n\
             \x20 url: Config.string(\"{k}_URL\"),\n\
             \x20 timeoutMs: Config.integer(\"{k}_TIMEOUT_MS\").pipe(Config.withDefault(5000)),\n\
             }});"
        ));
    b.build()
}

fn errors(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(meta, &format!("{c} Errors"), "", "service/errors");
    b.add_imports([ImportSpec::named("effect", ["Data"])])
        .add_raw(format!(
            "export class {c}Error extends Data.TaggedError(\"{c}Error\")<{{\n\
             \x20 readonly cause: unknown;\n\
             }}> {{}}"
        ));
    b.build()
}

fn runtime_layer(meta: &LibraryMetadata, runtime: &str, label: &str) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} {label} Layers"),
        &format!("{c}Service implementation for the {runtime} runtime."),
        &format!("layers/{runtime}-layers"),
    );
    b.add_imports([
        ImportSpec::named("effect", ["Effect", "Layer"]),
        ImportSpec::named("../service/config", [format!("{c}Config")]),
        ImportSpec::named("../service/service", [format!("{c}Service")]),
    ])
    .add_raw(format!(
        "export const {c}{label}Live = Layer.effect(\n\
         \x20 {c}Service,\n\
         \x20 Effect.gen(function* () {{\n\
         \x20   yield* {c}Config;\n\
         \x20   return {{ health: Effect.succeed(true) }};\n\
         \x20 }}),\n\
         );"
    ));
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generators::LibraryLinks;
    use crate::domain::{LibraryType, Platform, PlatformRequest, WorkspaceConfig};

    fn paths(request: PlatformRequest) -> Vec<String> {
        let meta =
            LibraryMetadata::compute("cache", LibraryType::Infra, &WorkspaceConfig::default())
                .unwrap();
        let ctx = GeneratorContext::new(meta, &request, LibraryLinks::default());
        plan(&ctx).files.into_iter().map(|f| f.path).collect()
    }

    #[test]
    fn node_infra_has_server_layer_only() {
        assert_eq!(
            paths(PlatformRequest::default()),
            vec![
                "src/lib/service/service.ts",
                "src/lib/service/config.ts",
                "src/lib/service/errors.ts",
                "src/lib/layers/server-layers.ts",
            ]
        );
    }

    #[test]
    fn universal_edge_infra_has_all_layers() {
        let paths = paths(PlatformRequest {
            platform: Some(Platform::Universal),
            include_edge: true,
            ..PlatformRequest::default()
        });
        assert!(paths.ends_with(&[
            "src/lib/layers/server-layers.ts".to_string(),
            "src/lib/layers/client-layers.ts".to_string(),
            "src/lib/layers/edge-layers.ts".to_string(),
        ]));
    }

    #[test]
    fn rpc_flag_is_ignored_for_infra() {
        let with_rpc = paths(PlatformRequest {
            include_rpc: true,
            ..PlatformRequest::default()
        });
        assert_eq!(with_rpc, paths(PlatformRequest::default()));
    }

    #[test]
    fn config_keys_use_constant_case() {
        let meta = LibraryMetadata::compute(
            "object store",
            LibraryType::Infra,
            &WorkspaceConfig::default(),
        )
        .unwrap();
        assert!(config(&meta).contains("Config.string(\"OBJECT_STORE_URL\")"));
    }
}
