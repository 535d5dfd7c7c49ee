//! Minimal element tree over quick-xml.
//!
//! Each element keeps its leading `text` and the `tail` text that follows its
//! closing tag inside the parent, so mixed content like
//! `<summary>A <see cref="X"/> B</summary>` can be walked in document order.

use crate::error::{DocError, Result};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Text before the first child
    pub text: String,
    pub children: Vec<Element>,
    /// Text after this element's end tag, up to the next sibling
    pub tail: String,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with the given tag.
    pub fn find(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with the given tag, in document order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// All descendants (not including `self`) with the given tag, in document order.
    pub fn descendants(&self, name: &str) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_descendants(self, name, &mut out);
        out
    }
}

fn collect_descendants<'a>(el: &'a Element, name: &str, out: &mut Vec<&'a Element>) {
    for child in &el.children {
        if child.name == name {
            out.push(child);
        }
        collect_descendants(child, name, out);
    }
}

/// Parse a complete document and return its root element.
///
/// Fails on mismatched or unclosed tags, a missing root, multiple roots,
/// stray text outside the root, and undefined entities.
pub fn parse_document(content: &str) -> Result<Element> {
    let mut reader = Reader::from_str(strip_bom(content));
    reader.config_mut().check_end_names = true;

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|source| DocError::Xml {
            position: reader.error_position() as u64,
            source,
        })?;

        match event {
            Event::Start(e) => {
                if stack.is_empty() && root.is_some() {
                    return Err(DocError::Malformed("multiple root elements".into()));
                }
                stack.push(start_element(&e)?);
            }
            Event::Empty(e) => {
                let el = start_element(&e)?;
                close_element(el, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                // check_end_names guarantees the names match
                let el = stack
                    .pop()
                    .ok_or_else(|| DocError::Malformed("unexpected closing tag".into()))?;
                close_element(el, &mut stack, &mut root)?;
            }
            Event::Text(e) => {
                let raw = String::from_utf8_lossy(e.as_ref());
                append_text(&mut stack, &normalize_line_ends(&raw))?;
            }
            Event::CData(e) => {
                let raw = String::from_utf8_lossy(&e.into_inner()).into_owned();
                append_text(&mut stack, &normalize_line_ends(&raw))?;
            }
            Event::GeneralRef(e) => {
                let entity = String::from_utf8_lossy(e.as_ref());
                let resolved = resolve_entity(&entity).ok_or_else(|| {
                    DocError::Malformed(format!("undefined entity: &{};", entity))
                })?;
                append_text(&mut stack, &resolved)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(DocError::Malformed(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| DocError::Malformed("no root element found".into()))
}

fn start_element(e: &BytesStart) -> Result<Element> {
    let mut el = Element {
        name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
        ..Default::default()
    };
    for attr in e.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = unescape(&raw)
            .map_err(|err| DocError::Malformed(format!("attribute {}: {}", key, err)))?
            .into_owned();
        el.attributes.push((key, value));
    }
    Ok(el)
}

fn close_element(el: Element, stack: &mut [Element], root: &mut Option<Element>) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None if root.is_none() => *root = Some(el),
        None => return Err(DocError::Malformed("multiple root elements".into())),
    }
    Ok(())
}

/// Route character data to the open element's text, or to its last child's tail.
fn append_text(stack: &mut [Element], text: &str) -> Result<()> {
    match stack.last_mut() {
        Some(open) => match open.children.last_mut() {
            Some(prev) => prev.tail.push_str(text),
            None => open.text.push_str(text),
        },
        None if text.trim().is_empty() => {}
        None => {
            return Err(DocError::Malformed(
                "text content outside the root element".into(),
            ))
        }
    }
    Ok(())
}

/// XML end-of-line handling: `\r\n` and bare `\r` both become `\n`.
///
/// Character references such as `&#13;` are resolved separately and keep their `\r`.
fn normalize_line_ends(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

/// Resolve predefined and numeric character references.
fn resolve_entity(entity: &str) -> Option<String> {
    match entity {
        "apos" => return Some("'".to_string()),
        "quot" => return Some("\"".to_string()),
        "lt" => return Some("<".to_string()),
        "gt" => return Some(">".to_string()),
        "amp" => return Some("&".to_string()),
        _ => {}
    }

    let code = if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok()?
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok()?
    } else {
        return None;
    };
    char::from_u32(code).map(|c| c.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_content_text_and_tail() {
        let root = parse_document(r#"<summary>A <see cref="X"/> B<para>C</para>D</summary>"#)
            .unwrap();
        assert_eq!(root.name, "summary");
        assert_eq!(root.text, "A ");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].name, "see");
        assert_eq!(root.children[0].attr("cref"), Some("X"));
        assert_eq!(root.children[0].tail, " B");
        assert_eq!(root.children[1].text, "C");
        assert_eq!(root.children[1].tail, "D");
    }

    #[test]
    fn entities_and_cdata_are_decoded() {
        let root =
            parse_document("<a title=\"x &amp; y\">1 &lt; 2 &#x41;<![CDATA[<raw>]]></a>").unwrap();
        assert_eq!(root.attr("title"), Some("x & y"));
        assert_eq!(root.text, "1 < 2 A<raw>");
    }

    #[test]
    fn crlf_line_ends_become_newlines() {
        let root = parse_document("<doc>\r\n<s>\r\nLine one\r\nline two.\rEnd</s>\r\n</doc>").unwrap();
        assert_eq!(root.text, "\n");
        assert_eq!(root.children[0].text, "\nLine one\nline two.\nEnd");
        assert_eq!(root.children[0].tail, "\n");
    }

    #[test]
    fn crlf_in_cdata_becomes_newline() {
        let root = parse_document("<code><![CDATA[a\r\nb]]></code>").unwrap();
        assert_eq!(root.text, "a\nb");
    }

    #[test]
    fn carriage_return_reference_is_kept() {
        let root = parse_document("<a>x&#13;y</a>").unwrap();
        assert_eq!(root.text, "x\ry");
    }

    #[test]
    fn declaration_and_comments_ignored() {
        let root = parse_document("<?xml version=\"1.0\"?>\n<doc><!-- c --><x/></doc>\n").unwrap();
        assert_eq!(root.name, "doc");
        assert_eq!(root.children.len(), 1);
    }

    #[test]
    fn descendants_in_document_order() {
        let root =
            parse_document("<doc><members><member name=\"a\"/><member name=\"b\"/></members></doc>")
                .unwrap();
        let names: Vec<_> = root
            .descendants("member")
            .iter()
            .filter_map(|m| m.attr("name"))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn mismatched_tags_fail() {
        assert!(parse_document("<a><b></a></b>").is_err());
    }

    #[test]
    fn unclosed_element_fails() {
        let err = parse_document("<doc><members>").unwrap_err();
        assert!(err.to_string().contains("unclosed element"));
    }

    #[test]
    fn empty_document_fails() {
        let err = parse_document("   ").unwrap_err();
        assert!(err.to_string().contains("no root element"));
    }

    #[test]
    fn multiple_roots_fail() {
        assert!(parse_document("<a/><b/>").is_err());
    }

    #[test]
    fn undefined_entity_fails() {
        assert!(parse_document("<a>&nbsp;</a>").is_err());
    }
}
