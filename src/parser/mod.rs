//! Doc-comment index — parses an XML documentation export into member records.

pub mod text;
pub mod xml;

use crate::error::{DocError, Result};
use crate::model::{full_name, insert_ordered, strip_signature, MemberDoc, MemberKind, TypeMembers};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use text::{child_text, element_to_text};
use tracing::{debug, warn};
use xml::Element;

/// All documented members of one export, keyed by member identifier.
#[derive(Debug, Default)]
pub struct DocIndex {
    /// Identifier → record, in first-seen order
    members: Vec<(String, MemberDoc)>,
    positions: HashMap<String, usize>,
}

impl DocIndex {
    /// Read and parse the export at `path`.
    pub fn load(path: &Path, code_lang: &str) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| DocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, code_lang)
    }

    /// Parse an export already held in memory.
    ///
    /// Every `<member>` element anywhere in the document is recorded under its
    /// `name` attribute. A repeated identifier replaces the earlier record.
    pub fn parse(content: &str, code_lang: &str) -> Result<Self> {
        let root = xml::parse_document(content)?;
        let mut index = Self::default();

        for member in root.descendants("member") {
            let id = member.attr("name").unwrap_or("").to_string();
            let doc = member_doc(member, code_lang);
            debug!(member = %id, "parsed member");

            match index.positions.get(&id) {
                Some(&pos) => {
                    warn!(member = %id, "duplicate member identifier, keeping the last one");
                    index.members[pos].1 = doc;
                }
                None => {
                    index.positions.insert(id.clone(), index.members.len());
                    index.members.push((id, doc));
                }
            }
        }

        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Documentation for an exact identifier, if it was declared.
    pub fn get_member_doc(&self, id: &str) -> Option<&MemberDoc> {
        self.positions.get(id).map(|&pos| &self.members[pos].1)
    }

    /// Every `T:` identifier, sorted.
    pub fn get_all_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .members
            .iter()
            .filter(|(id, _)| MemberKind::from_id(id) == Some(MemberKind::Type))
            .map(|(id, _)| id.clone())
            .collect();
        types.sort();
        types
    }

    /// Members declared directly on `type_id`, in source order.
    ///
    /// A member belongs to `T:NS.Type` when its identifier starts with
    /// `Kind:NS.Type.` and the rest of its name (signature aside) has no further
    /// dot, so members of nested types such as `NS.Type.Inner` stay with `Inner`.
    pub fn get_type_members(&self, type_id: &str) -> TypeMembers {
        let type_name = full_name(type_id);
        let mut members = TypeMembers::default();

        for (id, _) in &self.members {
            let Some(kind) = MemberKind::from_id(id) else {
                continue;
            };
            if !is_direct_member(id, kind, type_name) {
                continue;
            }
            if let Some(bucket) = members.bucket_mut(kind) {
                bucket.push(id.clone());
            }
        }

        members
    }
}

fn is_direct_member(id: &str, kind: MemberKind, type_name: &str) -> bool {
    let prefix = format!("{}:{}.", kind.prefix(), type_name);
    match id.strip_prefix(&prefix) {
        Some(rest) => !rest.is_empty() && !strip_signature(rest).contains('.'),
        None => false,
    }
}

fn member_doc(member: &Element, code_lang: &str) -> MemberDoc {
    let mut doc = MemberDoc {
        summary: child_text(member, "summary", code_lang),
        remarks: child_text(member, "remarks", code_lang),
        returns: child_text(member, "returns", code_lang),
        ..Default::default()
    };

    for (tag, attr, entries) in [
        ("param", "name", &mut doc.params),
        ("typeparam", "name", &mut doc.type_params),
        ("exception", "cref", &mut doc.exceptions),
    ] {
        for el in member.find_all(tag) {
            let key = el.attr(attr).unwrap_or("").to_string();
            let desc = element_to_text(el, code_lang).trim().to_string();
            insert_ordered(entries, key, desc);
        }
    }

    doc.examples = member
        .find_all("example")
        .map(|el| element_to_text(el, code_lang).trim().to_string())
        .collect();

    doc
}
