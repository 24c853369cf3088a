//! Structured assembly of one generated source file.

use crate::template::imports::{ImportGroup, ImportSpec};

const SECTION_RULE: &str =
    "// ============================================================================";

/// Canonical doc-comment block at the top of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub title: String,
    pub description: String,
    pub module: String,
}

impl FileHeader {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            module: module.into(),
        }
    }

    fn render(&self) -> String {
        let mut out = String::from("/**\n");
        out.push_str(&format!(" * {}\n", self.title));
        if !self.description.trim().is_empty() {
            out.push_str(" *\n");
            for line in self.description.trim().lines() {
                if line.trim().is_empty() {
                    out.push_str(" *\n");
                } else {
                    out.push_str(&format!(" * {}\n", line.trim_end()));
                }
            }
        }
        out.push_str(" *\n");
        out.push_str(&format!(" * @module {}\n", self.module));
        out.push_str(" */");
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Fragment {
    Header(FileHeader),
    Imports(ImportGroup),
    Section(String),
    Raw { text: String, spaced: bool },
    Blank,
}

impl Fragment {
    fn render(&self) -> String {
        match self {
            Self::Header(header) => header.render(),
            Self::Imports(group) => group.render(),
            Self::Section(label) => format!("{SECTION_RULE}\n// {label}\n{SECTION_RULE}"),
            Self::Raw { text, .. } => text.trim_end_matches('\n').to_string(),
            Self::Blank => String::new(),
        }
    }

    /// Whether a blank line separates this fragment from the previous one.
    fn spaced(&self) -> bool {
        match self {
            Self::Raw { spaced, .. } => *spaced,
            Self::Blank => false,
            _ => true,
        }
    }
}

/// Accumulates the fragments of one file and serializes them on demand.
///
/// A builder is created per file and consumed by [`TemplateBuilder::build`].
/// The same fragment sequence always produces byte-identical output.
///
/// # Example
///
/// ```
/// use libgen_core::template::{FileHeader, ImportSpec, TemplateBuilder};
///
/// let mut builder = TemplateBuilder::new();
/// builder
///     .add_file_header(FileHeader::new("Order Repository", "Persistence for orders", "repository"))
///     .add_imports([ImportSpec::named("effect", ["Effect"])])
///     .add_section_comment("Repository")
///     .add_raw("export const OrderRepository = {};");
/// let text = builder.build();
/// assert!(text.starts_with("/**\n * Order Repository\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateBuilder {
    fragments: Vec<Fragment>,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file_header(&mut self, header: FileHeader) -> &mut Self {
        self.fragments.push(Fragment::Header(header));
        self
    }

    /// Add imports. Repeated calls merge into the first import group so a
    /// module is never imported twice.
    pub fn add_imports(&mut self, specs: impl IntoIterator<Item = ImportSpec>) -> &mut Self {
        let existing = self.fragments.iter_mut().find_map(|f| match f {
            Fragment::Imports(group) => Some(group),
            _ => None,
        });

        match existing {
            Some(group) => specs.into_iter().for_each(|s| group.add(s)),
            None => {
                let mut group = ImportGroup::new();
                specs.into_iter().for_each(|s| group.add(s));
                if !group.is_empty() {
                    self.fragments.push(Fragment::Imports(group));
                }
            }
        }
        self
    }

    pub fn add_section_comment(&mut self, label: impl Into<String>) -> &mut Self {
        self.fragments.push(Fragment::Section(label.into()));
        self
    }

    /// Caller-assembled block, preceded by a blank line.
    pub fn add_raw(&mut self, text: impl Into<String>) -> &mut Self {
        self.fragments.push(Fragment::Raw {
            text: text.into(),
            spaced: true,
        });
        self
    }

    /// Caller-assembled block placed directly under the previous fragment.
    pub fn add_raw_tight(&mut self, text: impl Into<String>) -> &mut Self {
        self.fragments.push(Fragment::Raw {
            text: text.into(),
            spaced: false,
        });
        self
    }

    /// Exactly one empty line before the next fragment, even a tight one.
    /// Repeated or trailing blanks add nothing further.
    pub fn add_blank(&mut self) -> &mut Self {
        self.fragments.push(Fragment::Blank);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Serialize all fragments in insertion order. Output ends with exactly
    /// one newline.
    pub fn build(self) -> String {
        let mut out = String::new();
        let mut started = false;
        let mut blank_pending = false;
        for fragment in &self.fragments {
            if matches!(fragment, Fragment::Blank) {
                blank_pending = started;
                continue;
            }
            if started {
                out.push('\n');
                if blank_pending || fragment.spaced() {
                    out.push('\n');
                }
            }
            out.push_str(&fragment.render());
            started = true;
            blank_pending = false;
        }
        out.push('\n');
        out
    }
}
