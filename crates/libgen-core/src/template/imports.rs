//! TypeScript import grouping.

use std::collections::BTreeMap;

use indexmap::IndexSet;

/// One caller-supplied import request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub from: String,
    pub imports: Vec<String>,
    pub type_only: bool,
}

impl ImportSpec {
    /// Value import of named specifiers.
    pub fn named<I, S>(from: impl Into<String>, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            from: from.into(),
            imports: imports.into_iter().map(Into::into).collect(),
            type_only: false,
        }
    }

    /// `import type { ... }` of named specifiers.
    pub fn types<I, S>(from: impl Into<String>, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_only: true,
            ..Self::named(from, imports)
        }
    }

    /// `import * as alias from "..."`.
    pub fn namespace(from: impl Into<String>, alias: &str) -> Self {
        Self::named(from, [format!("* as {alias}")])
    }

    /// `import "..."` for side effects only.
    pub fn side_effect(from: impl Into<String>) -> Self {
        Self::named(from, Vec::<String>::new())
    }
}

/// Imports grouped by source module.
///
/// Modules iterate sorted by path, value imports before type-only imports of
/// the same module. Specifiers keep first-seen order and are de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportGroup {
    modules: BTreeMap<(String, bool), IndexSet<String>>,
}

impl ImportGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, spec: ImportSpec) {
        let entry = self.modules.entry((spec.from, spec.type_only)).or_default();
        entry.extend(spec.imports);
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Number of rendered import statements.
    pub fn len(&self) -> usize {
        let mut count = 0;
        for ((_, _), specifiers) in &self.modules {
            let (namespaces, named) = partition(specifiers);
            count += namespaces.len() + usize::from(!named.is_empty() || namespaces.is_empty());
        }
        count
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        for ((from, type_only), specifiers) in &self.modules {
            let type_kw = if *type_only { "type " } else { "" };
            let (namespaces, named) = partition(specifiers);

            for ns in &namespaces {
                lines.push(format!("import {type_kw}{ns} from \"{from}\";"));
            }
            if !named.is_empty() {
                lines.push(format!(
                    "import {type_kw}{{ {} }} from \"{from}\";",
                    named.join(", ")
                ));
            } else if namespaces.is_empty() {
                lines.push(format!("import \"{from}\";"));
            }
        }
        lines.join("\n")
    }
}

fn partition(specifiers: &IndexSet<String>) -> (Vec<&str>, Vec<&str>) {
    specifiers
        .iter()
        .map(String::as_str)
        .partition(|s| s.starts_with("* as "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_type_imports_render_separately() {
        let mut group = ImportGroup::new();
        group.add(ImportSpec::types("effect", ["Layer"]));
        group.add(ImportSpec::named("effect", ["Effect", "Context"]));
        assert_eq!(
            group.render(),
            "import { Effect, Context } from \"effect\";\nimport type { Layer } from \"effect\";"
        );
    }

    #[test]
    fn namespace_and_side_effect() {
        let mut group = ImportGroup::new();
        group.add(ImportSpec::side_effect("./polyfill"));
        group.add(ImportSpec::namespace("effect/Schema", "Schema"));
        assert_eq!(
            group.render(),
            "import \"./polyfill\";\nimport * as Schema from \"effect/Schema\";"
        );
        assert_eq!(group.len(), 2);
    }
}
