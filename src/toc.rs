//! Index page generation: namespace grouping, page links and output file names.

use crate::model::full_name;
use std::collections::BTreeMap;

/// Heading of the generated index page.
pub const INDEX_TITLE: &str = "API Reference";

/// File name of the index page inside the output directory.
pub const INDEX_FILE: &str = "index.md";

/// Output file name for a type page.
///
/// Dots and generic-arity backticks become underscores:
/// `"NS.List`1"` → `"NS_List_1.md"`
pub fn type_file_name(full_name: &str) -> String {
    let mut name = full_name.replace(['.', '`'], "_");
    name.push_str(".md");
    name
}

/// One type as listed under its namespace. Field order is the sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeEntry {
    pub simple_name: String,
    pub id: String,
    pub full_name: String,
}

/// Bucket type identifiers by namespace (the full name minus its last segment).
///
/// Top-level types land under the empty namespace. Entries within each bucket
/// are sorted by simple name, then identifier.
pub fn group_by_namespace(type_ids: &[String]) -> BTreeMap<String, Vec<TypeEntry>> {
    let mut namespaces: BTreeMap<String, Vec<TypeEntry>> = BTreeMap::new();

    for id in type_ids {
        let full = full_name(id);
        let (namespace, simple) = full.rsplit_once('.').unwrap_or(("", full));
        namespaces
            .entry(namespace.to_string())
            .or_default()
            .push(TypeEntry {
                simple_name: simple.to_string(),
                id: id.clone(),
                full_name: full.to_string(),
            });
    }

    for entries in namespaces.values_mut() {
        entries.sort();
    }
    namespaces
}

/// Render a Markdown link to a type page.
pub fn render_type_link(entry: &TypeEntry) -> String {
    format!(
        "[{}]({})",
        entry.simple_name,
        type_file_name(&entry.full_name)
    )
}

/// Render the full index page for the given types.
pub fn render_index(type_ids: &[String]) -> String {
    let mut content = format!("# {}\n\n", INDEX_TITLE);
    content.push_str("## Namespaces\n\n");

    for (namespace, entries) in group_by_namespace(type_ids) {
        content.push_str(&format!("### {}\n\n", namespace));
        for entry in &entries {
            content.push_str(&format!("- {}\n", render_type_link(entry)));
        }
        content.push('\n');
    }

    content
}
