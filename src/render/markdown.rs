//! Markdown page for a single documented type.

use crate::model::{full_name, simple_name, MemberDoc};
use crate::parser::text::inline_code;
use crate::parser::DocIndex;

/// Render the page for `type_id`.
///
/// Layout: title, summary, remarks, type parameters, examples, then the
/// properties and methods declared on the type. With `all_members`, method
/// exceptions and the fields and events sections are included as well.
pub fn render_type_page(index: &DocIndex, type_id: &str, all_members: bool) -> String {
    let mut content = format!("# {}\n\n", full_name(type_id));

    if let Some(doc) = index.get_member_doc(type_id) {
        render_type_doc(&mut content, doc);
    }

    let members = index.get_type_members(type_id);

    if !members.properties.is_empty() {
        render_summary_section(&mut content, index, "Properties", &members.properties);
    }

    if !members.methods.is_empty() {
        content.push_str("## Methods\n\n");
        for id in sorted(&members.methods) {
            content.push_str(&format!("### {}\n\n", simple_name(id)));
            if let Some(doc) = index.get_member_doc(id) {
                render_method_doc(&mut content, doc, all_members);
            }
        }
    }

    if all_members {
        if !members.fields.is_empty() {
            render_summary_section(&mut content, index, "Fields", &members.fields);
        }
        if !members.events.is_empty() {
            render_summary_section(&mut content, index, "Events", &members.events);
        }
    }

    content
}

fn render_type_doc(content: &mut String, doc: &MemberDoc) {
    if let Some(summary) = non_empty(&doc.summary) {
        content.push_str(summary);
        content.push_str("\n\n");
    }

    if let Some(remarks) = non_empty(&doc.remarks) {
        content.push_str("## Remarks\n\n");
        content.push_str(remarks);
        content.push_str("\n\n");
    }

    if !doc.type_params.is_empty() {
        content.push_str("## Type Parameters\n\n");
        for (name, desc) in &doc.type_params {
            content.push_str(&format!("- **{}**: {}\n", name, desc));
        }
        content.push('\n');
    }

    if !doc.examples.is_empty() {
        content.push_str("## Examples\n\n");
        for example in &doc.examples {
            content.push_str(example);
            content.push_str("\n\n");
        }
    }
}

fn render_method_doc(content: &mut String, doc: &MemberDoc, all_members: bool) {
    if let Some(summary) = non_empty(&doc.summary) {
        content.push_str(summary);
        content.push_str("\n\n");
    }

    if !doc.params.is_empty() {
        content.push_str("**Parameters:**\n\n");
        for (name, desc) in &doc.params {
            content.push_str(&format!("- `{}`: {}\n", name, desc));
        }
        content.push('\n');
    }

    if let Some(returns) = non_empty(&doc.returns) {
        content.push_str(&format!("**Returns:** {}\n\n", returns));
    }

    if all_members && !doc.exceptions.is_empty() {
        content.push_str("**Exceptions:**\n\n");
        for (cref, desc) in &doc.exceptions {
            content.push_str(&format!("- {}: {}\n", inline_code(simple_name(cref)), desc));
        }
        content.push('\n');
    }
}

/// A `## title` section with one `###` entry and summary per member.
fn render_summary_section(content: &mut String, index: &DocIndex, title: &str, ids: &[String]) {
    content.push_str(&format!("## {}\n\n", title));
    for id in sorted(ids) {
        content.push_str(&format!("### {}\n\n", simple_name(id)));
        if let Some(summary) = index
            .get_member_doc(id)
            .and_then(|doc| non_empty(&doc.summary))
        {
            content.push_str(summary);
            content.push_str("\n\n");
        }
    }
}

fn sorted(ids: &[String]) -> Vec<&String> {
    let mut ids: Vec<&String> = ids.iter().collect();
    ids.sort();
    ids
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|s| !s.is_empty())
}
