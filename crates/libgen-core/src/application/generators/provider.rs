//! Provider libraries: a typed Effect wrapper around one external SDK.

use crate::{
    application::generators::{GeneratorContext, TypePlan, shared::ts_file},
    domain::{Capability, LibraryMetadata},
    template::ImportSpec,
};

pub(crate) fn plan(ctx: &GeneratorContext) -> TypePlan {
    let meta = &ctx.metadata;
    let sdk = ctx
        .links
        .external_service
        .as_deref()
        .unwrap_or(&meta.names.file_name);
    let mut plan = TypePlan::default();

    plan.file("src/lib/service.ts", service(meta, sdk));
    plan.file("src/lib/types.ts", types(meta));
    plan.file("src/lib/errors.ts", errors(meta, sdk));
    plan.file("src/lib/validation.ts", validation(meta));
    plan.file("src/lib/layers.ts", layers(meta, sdk));
    for module in ["service", "types", "errors", "layers"] {
        plan.export(format!("lib/{module}"));
    }

    if ctx.capabilities.contains(Capability::Client) {
        plan.file("src/lib/client.ts", client(meta));
        plan.export("lib/client");
    }
    if ctx.capabilities.contains(Capability::Edge) {
        plan.file("src/lib/edge.ts", edge(meta));
    }

    plan
}

fn service(meta: &LibraryMetadata, sdk: &str) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Provider"),
        &format!("Effect service wrapping the `{sdk}` SDK."),
        "service",
    );
    b.add_imports([
        ImportSpec::named("effect", ["Context", "Effect"]),
        ImportSpec::types("./errors", [format!("{c}ProviderError")]),
        ImportSpec::types("./types", [format!("{c}Client")]),
    ])
    .add_raw(format!(
        "export class {c}Provider extends Context.Tag(\"{c}Provider\")<\n\
         \x20 {c}Provider,\n\
         \x20 {{\n\
         \x20   readonly use: <A>(\n\
         \x20     f: (client: {c}Client) => Promise<A>,\n\
         \x20   ) => Effect.Effect<A, {c}ProviderError>;\n\
         \x20 }}\n\
         >() {{}}"
    ));
    b.build()
}

fn types(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(meta, &format!("{c} Types"), "", "types");
    b.add_raw(format!(
        "export interface {c}Client {{\n\
         \x20 readonly close: () => Promise<void>;\n\
         }}"
    ));
    b.build()
}

fn errors(meta: &LibraryMetadata, sdk: &str) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Errors"),
        &format!("Failures surfaced from `{sdk}`."),
        "errors",
    );
    b.add_imports([ImportSpec::named("effect", ["Data"])])
        .add_raw(format!(
            "export class {c}ProviderError extends Data.TaggedError(\"{c}ProviderError\")<{{\n\
             \x20 readonly cause: unknown;\n\
             }}> {{}}"
        ));
    b.build()
}

fn validation(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let k = &meta.names.constant_name;
    let mut b = ts_file(meta, &format!("{c} Validation"), "", "validation");
    b.add_raw(format!(
        "export const {k}_REQUIRED_ENV = [\"{k}_URL\"] as const;"
    ))
    .add_raw(format!(
        "export const missing{c}Env = (env: Record<string, string | undefined>) =>\n\
         \x20 {k}_REQUIRED_ENV.filter((key) => !env[key]);"
    ));
    b.build()
}

fn layers(meta: &LibraryMetadata, sdk: &str) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Layers"),
        "",
        "layers",
    );
    b.add_imports([
        ImportSpec::named("effect", ["Effect", "Layer"]),
        ImportSpec::namespace(sdk, "Sdk"),
        ImportSpec::named("./errors", [format!("{c}ProviderError")]),
        ImportSpec::named("./service", [format!("{c}Provider")]),
        ImportSpec::types("./types", [format!("{c}Client")]),
    ])
    .add_raw(format!(
        "declare const makeClient: (sdk: typeof Sdk) => {c}Client;"
    ))
    .add_raw(format!(
        "export const {c}ProviderLive = Layer.sync({c}Provider, () => {{\n\
         \x20 const client = makeClient(Sdk);\n\
         \x20 return {{\n\
         \x20   use: (f) =>\n\
         \x20     Effect.tryPromise({{\n\
         \x20       try: () => f(client),\n\
         \x20       catch: (cause) => new {c}ProviderError({{ cause }}),\n\
         \x20     }}),\n\
         \x20 }};\n\
         }});"
    ));
    b.build()
}

fn client(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Browser Client"),
        "Browser-safe subset of the provider.",
        "client",
    );
    b.add_imports([ImportSpec::types("./types", [format!("{c}Client")])])
        .add_raw(format!(
            "export type {c}BrowserClient = Pick<{c}Client, \"close\">;"
        ));
    b.build()
}

fn edge(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Edge Layer"),
        "Fetch-based provider for edge runtimes.",
        "edge",
    );
    b.add_imports([
        ImportSpec::named("effect", ["Layer"]),
        ImportSpec::named("./layers", [format!("{c}ProviderLive")]),
    ])
    .add_raw(format!(
        "export const {c}ProviderEdge = Layer.mergeAll({c}ProviderLive);"
    ));
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generators::LibraryLinks;
    use crate::domain::{LibraryType, Platform, PlatformRequest, WorkspaceConfig};

    fn context(request: PlatformRequest, sdk: Option<&str>) -> GeneratorContext {
        let meta =
            LibraryMetadata::compute("redis", LibraryType::Provider, &WorkspaceConfig::default())
                .unwrap();
        GeneratorContext::new(
            meta,
            &request,
            LibraryLinks {
                external_service: sdk.map(str::to_string),
                ..LibraryLinks::default()
            },
        )
    }

    #[test]
    fn layers_import_the_external_sdk() {
        let plan = plan(&context(PlatformRequest::default(), Some("ioredis")));
        let layers = plan
            .files
            .iter()
            .find(|f| f.path == "src/lib/layers.ts")
            .unwrap();
        assert!(layers.content.contains("import * as Sdk from \"ioredis\";"));
    }

    #[test]
    fn sdk_defaults_to_library_name() {
        let plan = plan(&context(PlatformRequest::default(), None));
        assert!(plan.files[0].content.contains("`redis` SDK"));
    }

    #[test]
    fn client_and_edge_gates() {
        let node: Vec<String> = plan(&context(PlatformRequest::default(), None))
            .files
            .into_iter()
            .map(|f| f.path)
            .collect();
        assert_eq!(node.len(), 5);

        let everywhere: Vec<String> = plan(&context(
            PlatformRequest {
                platform: Some(Platform::Edge),
                include_client_server: Some(true),
                ..PlatformRequest::default()
            },
            None,
        ))
        .files
        .into_iter()
        .map(|f| f.path)
        .collect();
        assert!(everywhere.contains(&"src/lib/client.ts".to_string()));
        assert!(everywhere.contains(&"src/lib/edge.ts".to_string()));
    }
}
