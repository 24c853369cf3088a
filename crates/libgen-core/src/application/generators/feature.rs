//! Feature libraries: services, client state, RPC handlers.
//!
//! | Gate   | Files                                                           |
//! |--------|-----------------------------------------------------------------|
//! | server | `server/service.ts`, `server/layers.ts`, `server/index.ts`      |
//! | client | `client/hooks/use-<name>.ts`, `client/atoms/<name>-atoms.ts`, `client/index.ts` |
//! | rpc    | `rpc/router.ts`, `rpc/handlers.ts`                              |
//! | cqrs   | `commands`, `queries`, `projections` under `server/`, or `cqrs/` without a server |
//! | edge   | `edge/middleware.ts`                                            |

use crate::{
    application::generators::{GeneratorContext, TypePlan, shared::ts_file},
    domain::{Capability, LibraryMetadata},
    template::ImportSpec,
};

pub(crate) fn plan(ctx: &GeneratorContext) -> TypePlan {
    let meta = &ctx.metadata;
    let file = &meta.names.file_name;
    let caps = ctx.capabilities;
    let mut plan = TypePlan::default();

    plan.file("src/lib/shared/types.ts", shared_types(meta));
    plan.file("src/lib/shared/errors.ts", shared_errors(meta));
    plan.export("lib/shared/types");
    plan.export("lib/shared/errors");

    if caps.contains(Capability::Server) {
        let data_access = ctx.links.data_access_package.as_deref();
        plan.file("src/lib/server/service.ts", service(meta, data_access));
        plan.file("src/lib/server/layers.ts", layers(meta, data_access));
        plan.file("src/lib/server/index.ts", server_index(meta));
        plan.export("lib/server");
    }

    if caps.contains(Capability::Client) {
        plan.file(format!("src/lib/client/hooks/use-{file}.ts"), hook(meta));
        plan.file(format!("src/lib/client/atoms/{file}-atoms.ts"), atoms(meta));
        plan.file("src/lib/client/index.ts", client_index(meta));
        plan.export("lib/client");
    }

    if caps.contains(Capability::Rpc) {
        plan.file("src/lib/rpc/router.ts", rpc_router(meta));
        plan.file("src/lib/rpc/handlers.ts", rpc_handlers(meta));
        plan.export("lib/rpc/router");
    }

    if caps.contains(Capability::Cqrs) {
        let root = if caps.contains(Capability::Server) {
            "server"
        } else {
            "cqrs"
        };
        for (dir, kind) in [
            ("commands", "Command"),
            ("queries", "Query"),
            ("projections", "Projection"),
        ] {
            let module = format!("{root}/{dir}");
            plan.file(format!("src/lib/{module}/index.ts"), cqrs_bus(meta, &module, kind));
            plan.export(format!("lib/{module}"));
        }
    }

    if caps.contains(Capability::Edge) {
        plan.file("src/lib/edge/middleware.ts", edge_middleware(meta));
        plan.export("lib/edge/middleware");
    }

    plan
}

fn shared_types(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(meta, &format!("{c} Shared Types"), "", "shared/types");
    b.add_raw(format!(
        "export interface {c}View {{\n\
         \x20 readonly id: string;\n\
         \x20 readonly updatedAt: Date;\n\
         }}"
    ));
    b.build()
}

fn shared_errors(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(meta, &format!("{c} Errors"), "", "shared/errors");
    b.add_imports([ImportSpec::named("effect", ["Data"])])
        .add_raw(format!(
            "export class {c}ServiceError extends Data.TaggedError(\"{c}ServiceError\")<{{\n\
             \x20 readonly message: string;\n\
             }}> {{}}"
        ));
    b.build()
}

fn service(meta: &LibraryMetadata, data_access: Option<&str>) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Service"),
        &format!("Business logic for {c}."),
        "server/service",
    );
    b.add_imports([
        ImportSpec::named("effect", ["Effect"]),
        ImportSpec::types("../shared/types", [format!("{c}View")]),
    ]);

    let body = match data_access {
        Some(package) => {
            b.add_imports([ImportSpec::named(package, [format!("{c}Repository")])]);
            format!(
                "\x20   const repository = yield* {c}Repository;\n\
                 \x20   return {{\n\
                 \x20     get: (id: string) => repository.findById(id),\n\
                 \x20   }} as const;"
            )
        }
        None => format!(
            "\x20   return {{\n\
             \x20     get: (id: string) => Effect.succeed<{c}View | undefined>(undefined),\n\
             \x20   }} as const;"
        ),
    };

    b.add_raw(format!(
        "export class {c}Service extends Effect.Service<{c}Service>()(\"{c}Service\", {{\n\
         \x20 effect: Effect.gen(function* () {{\n\
         {body}\n\
         \x20 }}),\n\
         }}) {{}}"
    ));
    b.build()
}

fn layers(meta: &LibraryMetadata, data_access: Option<&str>) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Server Layers"),
        "Composition root for the server runtime.",
        "server/layers",
    );
    b.add_imports([
        ImportSpec::named("effect", ["Layer"]),
        ImportSpec::named("./service", [format!("{c}Service")]),
    ]);
    match data_access {
        Some(package) => {
            b.add_imports([ImportSpec::named(package, [format!("{c}RepositoryLive")])])
                .add_raw(format!(
                    "export const {c}ServerLive = {c}Service.Default.pipe(\n\
                     \x20 Layer.provide({c}RepositoryLive),\n\
                     );"
                ));
        }
        None => {
            b.add_raw(format!(
                "export const {c}ServerLive = Layer.mergeAll({c}Service.Default);"
            ));
        }
    }
    b.build()
}

fn server_index(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(meta, &format!("{c} Server"), "", "server");
    b.add_raw("export * from \"./service\";\nexport * from \"./layers\";");
    b.build()
}

fn hook(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let p = &meta.names.property_name;
    let f = &meta.names.file_name;
    let mut b = ts_file(
        meta,
        &format!("use{c}"),
        &format!("React hook exposing {c} client state."),
        &format!("client/hooks/use-{f}"),
    );
    b.add_imports([
        ImportSpec::named("@effect-atom/atom-react", ["useAtomValue"]),
        ImportSpec::named(format!("../atoms/{f}-atoms"), [format!("{p}Atom")]),
    ])
    .add_raw(format!("export const use{c} = () => useAtomValue({p}Atom);"));
    b.build()
}

fn atoms(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let p = &meta.names.property_name;
    let f = &meta.names.file_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Atoms"),
        "",
        &format!("client/atoms/{f}-atoms"),
    );
    b.add_imports([
        ImportSpec::named("@effect-atom/atom-react", ["Atom"]),
        ImportSpec::types("../../shared/types", [format!("{c}View")]),
    ])
    .add_raw(format!("export const {p}Atom = Atom.make<{c}View | null>(null);"));
    b.build()
}

fn client_index(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let f = &meta.names.file_name;
    let mut b = ts_file(meta, &format!("{c} Client"), "", "client");
    b.add_raw(format!(
        "export * from \"./hooks/use-{f}\";\nexport * from \"./atoms/{f}-atoms\";"
    ));
    b.build()
}

fn rpc_router(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(meta, &format!("{c} RPC Router"), "", "rpc/router");
    b.add_imports([
        ImportSpec::named("@effect/rpc", ["Rpc", "RpcGroup"]),
        ImportSpec::named("effect", ["Schema"]),
    ])
    .add_raw(format!(
        "export class {c}Rpcs extends RpcGroup.make(\n\
         \x20 Rpc.make(\"Get{c}\", {{ payload: {{ id: Schema.String }} }}),\n\
         ) {{}}"
    ));
    b.build()
}

fn rpc_handlers(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} RPC Handlers"),
        "Binds the RPC group to the server service.",
        "rpc/handlers",
    );
    b.add_imports([
        ImportSpec::named("effect", ["Effect"]),
        ImportSpec::named("./router", [format!("{c}Rpcs")]),
    ])
    .add_raw(format!(
        "export const {c}Handlers = {c}Rpcs.toLayer(\n\
         \x20 Effect.succeed({{\n\
         \x20   Get{c}: ({{ id }}) => Effect.succeed({{ id }}),\n\
         \x20 }}),\n\
         );"
    ));
    b.build()
}

fn cqrs_bus(meta: &LibraryMetadata, module: &str, kind: &str) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(meta, &format!("{c} {kind} Handlers"), "", module);
    b.add_raw(format!(
        "export type {c}{kind}Handler<A, R> = (input: A) => Promise<R>;\n\
         \n\
         export const {c}{kind}Handlers: Record<string, {c}{kind}Handler<unknown, unknown>> = {{}};"
    ));
    b.build()
}

fn edge_middleware(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Edge Middleware"),
        "Runs at the edge; must not import server modules.",
        "edge/middleware",
    );
    b.add_raw(format!(
        "export const {c}EdgeMiddleware = async (request: Request): Promise<Request> => request;"
    ));
    b.build()
}
