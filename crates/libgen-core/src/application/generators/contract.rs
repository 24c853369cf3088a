//! Contract libraries: entities, errors, events and ports.
//!
//! Gates: `cqrs` adds commands, queries and projections; `rpc` adds the RPC
//! group definition.

use crate::{
    application::generators::{GeneratorContext, TypePlan, shared::ts_file},
    domain::{Capability, LibraryMetadata},
    template::ImportSpec,
};

pub(crate) fn plan(ctx: &GeneratorContext) -> TypePlan {
    let meta = &ctx.metadata;
    let mut plan = TypePlan::default();

    plan.file("src/lib/entities.ts", entities(meta));
    plan.file("src/lib/errors.ts", errors(meta));
    plan.file("src/lib/events.ts", events(meta));
    plan.file("src/lib/ports.ts", ports(meta));
    plan.export("lib/entities");
    plan.export("lib/errors");
    plan.export("lib/events");
    plan.export("lib/ports");

    if ctx.capabilities.contains(Capability::Cqrs) {
        plan.file("src/lib/commands.ts", commands(meta));
        plan.file("src/lib/queries.ts", queries(meta));
        plan.file("src/lib/projections.ts", projections(meta));
        plan.export("lib/commands");
        plan.export("lib/queries");
        plan.export("lib/projections");
    }

    if ctx.capabilities.contains(Capability::Rpc) {
        plan.file("src/lib/rpc.ts", rpc(meta));
        plan.export("lib/rpc");
    }

    plan
}

fn entities(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Entities"),
        &format!("Domain entities and identifiers for {c}."),
        "entities",
    );
    b.add_imports([ImportSpec::named("effect", ["Schema"])])
        .add_section_comment("Identifiers")
        .add_raw(format!(
            "export const {c}Id = Schema.String.pipe(Schema.brand(\"{c}Id\"));\n\
             export type {c}Id = typeof {c}Id.Type;"
        ))
        .add_section_comment("Entities")
        .add_raw(format!(
            "export class {c} extends Schema.Class<{c}>(\"{c}\")({{\n\
             \x20 id: {c}Id,\n\
             \x20 createdAt: Schema.Date,\n\
             \x20 updatedAt: Schema.Date,\n\
             }}) {{}}"
        ));
    b.build()
}

fn errors(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Errors"),
        &format!("Tagged domain errors raised by {c} operations."),
        "errors",
    );
    b.add_imports([ImportSpec::named("effect", ["Data"])])
        .add_raw(format!(
            "export class {c}NotFoundError extends Data.TaggedError(\"{c}NotFoundError\")<{{\n\
             \x20 readonly id: string;\n\
             }}> {{}}"
        ))
        .add_raw(format!(
            "export class {c}ValidationError extends Data.TaggedError(\"{c}ValidationError\")<{{\n\
             \x20 readonly field: string;\n\
             \x20 readonly message: string;\n\
             }}> {{}}"
        ))
        .add_raw(format!(
            "export type {c}DomainError = {c}NotFoundError | {c}ValidationError;"
        ));
    b.build()
}

fn events(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Events"),
        &format!("Events published when a {c} changes."),
        "events",
    );
    b.add_imports([
        ImportSpec::named("effect", ["Schema"]),
        ImportSpec::named("./entities", [format!("{c}Id")]),
    ]);
    for event in ["Created", "Updated", "Deleted"] {
        b.add_raw(format!(
            "export class {c}{event} extends Schema.TaggedClass<{c}{event}>()(\"{c}{event}\", {{\n\
             \x20 id: {c}Id,\n\
             \x20 occurredAt: Schema.Date,\n\
             }}) {{}}"
        ));
    }
    b.add_raw(format!(
        "export type {c}Event = {c}Created | {c}Updated | {c}Deleted;"
    ));
    b.build()
}

fn ports(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Ports"),
        &format!("Interfaces the {c} domain depends on.\nImplemented by data-access libraries."),
        "ports",
    );
    b.add_imports([
        ImportSpec::named("effect", ["Context"]),
        ImportSpec::types("effect", ["Effect", "Option"]),
        ImportSpec::types("./entities", [c.clone(), format!("{c}Id")]),
        ImportSpec::types("./errors", [format!("{c}NotFoundError")]),
    ])
    .add_section_comment("Repository")
    .add_raw(format!(
        "export interface {c}RepositoryShape {{\n\
         \x20 readonly findById: (id: {c}Id) => Effect.Effect<Option.Option<{c}>>;\n\
         \x20 readonly save: (entity: {c}) => Effect.Effect<void>;\n\
         \x20 readonly delete: (id: {c}Id) => Effect.Effect<void, {c}NotFoundError>;\n\
         }}"
    ))
    .add_raw(format!(
        "export class {c}Repository extends Context.Tag(\"{c}Repository\")<\n\
         \x20 {c}Repository,\n\
         \x20 {c}RepositoryShape\n\
         >() {{}}"
    ));
    b.build()
}

fn commands(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Commands"),
        &format!("Write-side messages for {c}."),
        "commands",
    );
    b.add_imports([
        ImportSpec::named("effect", ["Schema"]),
        ImportSpec::named("./entities", [format!("{c}Id")]),
    ])
    .add_raw(format!(
        "export class Create{c} extends Schema.TaggedRequest<Create{c}>()(\"Create{c}\", {{\n\
         \x20 failure: Schema.Never,\n\
         \x20 success: {c}Id,\n\
         \x20 payload: {{}},\n\
         }}) {{}}"
    ))
    .add_raw(format!(
        "export class Delete{c} extends Schema.TaggedRequest<Delete{c}>()(\"Delete{c}\", {{\n\
         \x20 failure: Schema.Never,\n\
         \x20 success: Schema.Void,\n\
         \x20 payload: {{ id: {c}Id }},\n\
         }}) {{}}"
    ))
    .add_raw(format!("export type {c}Command = Create{c} | Delete{c};"));
    b.build()
}

fn queries(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Queries"),
        &format!("Read-side messages for {c}."),
        "queries",
    );
    b.add_imports([
        ImportSpec::named("effect", ["Schema"]),
        ImportSpec::named("./entities", [c.clone(), format!("{c}Id")]),
    ])
    .add_raw(format!(
        "export class Get{c}ById extends Schema.TaggedRequest<Get{c}ById>()(\"Get{c}ById\", {{\n\
         \x20 failure: Schema.Never,\n\
         \x20 success: Schema.Option({c}),\n\
         \x20 payload: {{ id: {c}Id }},\n\
         }}) {{}}"
    ));
    b.build()
}

fn projections(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let p = &meta.names.property_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Projections"),
        &format!("Read models folded from {c} events."),
        "projections",
    );
    b.add_imports([
        ImportSpec::types("./entities", [format!("{c}Id")]),
        ImportSpec::types("./events", [format!("{c}Event")]),
    ])
    .add_raw(format!(
        "export interface {c}Summary {{\n\
         \x20 readonly id: {c}Id;\n\
         \x20 readonly version: number;\n\
         }}"
    ))
    .add_raw(format!(
        "export const apply{c}Event = (\n\
         \x20 {p}: {c}Summary,\n\
         \x20 event: {c}Event,\n\
         ): {c}Summary => ({{ ...{p}, id: event.id, version: {p}.version + 1 }});"
    ));
    b.build()
}

fn rpc(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} RPC"),
        &format!("RPC group shared by {c} clients and servers."),
        "rpc",
    );
    b.add_imports([
        ImportSpec::named("@effect/rpc", ["Rpc", "RpcGroup"]),
        ImportSpec::named("effect", ["Schema"]),
        ImportSpec::named("./entities", [c.clone(), format!("{c}Id")]),
        ImportSpec::named("./errors", [format!("{c}NotFoundError")]),
    ])
    .add_raw(format!(
        "export class {c}Rpcs extends RpcGroup.make(\n\
         \x20 Rpc.make(\"Get{c}\", {{\n\
         \x20   payload: {{ id: {c}Id }},\n\
         \x20   success: {c},\n\
         \x20   error: Schema.instanceOf({c}NotFoundError),\n\
         \x20 }}),\n\
         ) {{}}"
    ));
    b.build()
}
