//! Data-access libraries: repositories and queries over the database.
//!
//! Always server-side; there are no conditional files. When a contract
//! package is linked the repository implements the contract's port,
//! otherwise it declares its own tag.

use crate::{
    application::generators::{GeneratorContext, TypePlan, shared::ts_file},
    domain::LibraryMetadata,
    template::ImportSpec,
};

pub(crate) fn plan(ctx: &GeneratorContext) -> TypePlan {
    let meta = &ctx.metadata;
    let contract = ctx.links.contract_package.as_deref();
    let mut plan = TypePlan::default();

    plan.file("src/lib/repository/repository.ts", repository(meta, contract));
    plan.file("src/lib/repository/index.ts", repository_index(meta));
    plan.file("src/lib/shared/types.ts", types(meta));
    plan.file("src/lib/shared/errors.ts", errors(meta));
    plan.file("src/lib/shared/validation.ts", validation(meta));
    plan.file("src/lib/queries.ts", queries(meta));

    plan.export("lib/repository");
    plan.export("lib/shared/types");
    plan.export("lib/shared/errors");
    plan
}

fn table_name(meta: &LibraryMetadata) -> String {
    meta.names.file_name.replace('-', "_")
}

fn repository(meta: &LibraryMetadata, contract: Option<&str>) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Repository"),
        &format!("Kysely-backed persistence for {c}."),
        "repository",
    );

    b.add_imports([
        ImportSpec::named("effect", ["Effect", "Layer", "Option"]),
        ImportSpec::named("../queries", [format!("find{c}ById"), format!("delete{c}")]),
        ImportSpec::named("../shared/errors", [format!("{c}RepositoryError")]),
    ]);

    match contract {
        Some(package) => {
            b.add_imports([ImportSpec::named(package, [format!("{c}Repository")])])
                .add_raw(format!("export {{ {c}Repository }};"));
        }
        None => {
            b.add_imports([
                ImportSpec::named("effect", ["Context"]),
                ImportSpec::types("../shared/types", [format!("{c}Row")]),
            ])
            .add_section_comment("Tag")
            .add_raw(format!(
                "export class {c}Repository extends Context.Tag(\"{c}Repository\")<\n\
                 \x20 {c}Repository,\n\
                 \x20 {{\n\
                 \x20   readonly findById: (id: string) => Effect.Effect<Option.Option<{c}Row>, {c}RepositoryError>;\n\
                 \x20   readonly delete: (id: string) => Effect.Effect<void, {c}RepositoryError>;\n\
                 \x20 }}\n\
                 >() {{}}"
            ));
        }
    }

    b.add_section_comment("Implementation")
        .add_raw(format!(
            "export const {c}RepositoryLive = Layer.succeed({c}Repository, {{\n\
             \x20 findById: (id) =>\n\
             \x20   Effect.tryPromise({{\n\
             \x20     try: () => find{c}ById(id),\n\
             \x20     catch: (cause) => new {c}RepositoryError({{ cause }}),\n\
             \x20   }}).pipe(Effect.map(Option.fromNullable)),\n\
             \x20 delete: (id) =>\n\
             \x20   Effect.tryPromise({{\n\
             \x20     try: () => delete{c}(id),\n\
             \x20     catch: (cause) => new {c}RepositoryError({{ cause }}),\n\
             \x20   }}).pipe(Effect.asVoid),\n\
             }});"
        ));
    b.build()
}

fn repository_index(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(meta, &format!("{c} Repository exports"), "", "repository");
    b.add_raw("export * from \"./repository\";");
    b.build()
}

fn types(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let table = table_name(meta);
    let mut b = ts_file(
        meta,
        &format!("{c} Types"),
        &format!("Row shapes for the `{table}` table."),
        "shared/types",
    );
    b.add_raw(format!(
        "export interface {c}Row {{\n\
         \x20 readonly id: string;\n\
         \x20 readonly created_at: Date;\n\
         \x20 readonly updated_at: Date;\n\
         }}"
    ))
    .add_raw(format!(
        "export interface {c}Database {{\n\
         \x20 readonly {table}: {c}Row;\n\
         }}"
    ));
    b.build()
}

fn errors(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(meta, &format!("{c} Repository Errors"), "", "shared/errors");
    b.add_imports([ImportSpec::named("effect", ["Data"])])
        .add_raw(format!(
            "export class {c}RepositoryError extends Data.TaggedError(\"{c}RepositoryError\")<{{\n\
             \x20 readonly cause: unknown;\n\
             }}> {{}}"
        ));
    b.build()
}

fn validation(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let mut b = ts_file(
        meta,
        &format!("{c} Validation"),
        "Guards applied before rows reach the database.",
        "shared/validation",
    );
    b.add_raw(format!(
        "export const isValid{c}Id = (id: string): boolean => id.trim().length > 0;"
    ));
    b.build()
}

fn queries(meta: &LibraryMetadata) -> String {
    let c = &meta.names.class_name;
    let table = table_name(meta);
    let mut b = ts_file(
        meta,
        &format!("{c} Queries"),
        &format!("SQL for the `{table}` table. No other module builds queries."),
        "queries",
    );
    b.add_imports([
        ImportSpec::types("kysely", ["Kysely"]),
        ImportSpec::types("./shared/types", [format!("{c}Database")]),
    ])
    .add_raw(format!("declare const db: Kysely<{c}Database>;"))
    .add_raw(format!(
        "export const find{c}ById = (id: string) =>\n\
         \x20 db.selectFrom(\"{table}\").selectAll().where(\"id\", \"=\", id).executeTakeFirst();"
    ))
    .add_raw(format!(
        "export const delete{c} = (id: string) =>\n\
         \x20 db.deleteFrom(\"{table}\").where(\"id\", \"=\", id).execute();"
    ));
    b.build()
}
