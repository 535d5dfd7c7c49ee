//! Flatten documentation markup into Markdown-flavored plain text.

use super::xml::Element;
use crate::model::simple_name;

/// Convert an element's mixed content to text, resolving inline doc tags.
///
/// - `<see>`/`<seealso cref>` → `` `Name` `` (nothing when `cref` is absent)
/// - `<code>` → fenced block tagged with `code_lang`
/// - `<para>` → blank-line separated paragraph
/// - `<paramref>`/`<typeparamref name>` → `` `name` ``
/// - anything else → its own content
///
/// Trailing text after every child is kept verbatim. The result is not trimmed.
pub fn element_to_text(el: &Element, code_lang: &str) -> String {
    let mut text = el.text.clone();

    for child in &el.children {
        match child.name.as_str() {
            "see" | "seealso" => {
                if let Some(cref) = child.attr("cref").filter(|c| !c.is_empty()) {
                    text.push_str(&inline_code(simple_name(cref)));
                }
            }
            "code" => {
                text.push_str(&format!(
                    "\n```{}\n{}\n```\n",
                    code_lang,
                    child.text.trim()
                ));
            }
            "para" => {
                text.push_str("\n\n");
                text.push_str(&element_to_text(child, code_lang));
            }
            "paramref" | "typeparamref" => {
                text.push_str(&inline_code(child.attr("name").unwrap_or("")));
            }
            _ => text.push_str(&element_to_text(child, code_lang)),
        }
        text.push_str(&child.tail);
    }

    text
}

/// Wrap `name` as inline code.
///
/// Generic arity markers (`` List`1 ``) contain backticks, so such names get a
/// double-backtick fence; a name starting or ending with one is padded with spaces.
pub fn inline_code(name: &str) -> String {
    if !name.contains('`') {
        return format!("`{}`", name);
    }
    if name.starts_with('`') || name.ends_with('`') {
        format!("`` {} ``", name)
    } else {
        format!("``{}``", name)
    }
}

/// Trimmed text of the first `tag` child, or `None` when there is no such child.
pub fn child_text(el: &Element, tag: &str, code_lang: &str) -> Option<String> {
    el.find(tag)
        .map(|child| element_to_text(child, code_lang).trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::xml::parse_document;

    fn normalize(xml: &str) -> String {
        let root = parse_document(xml).unwrap();
        element_to_text(&root, "csharp").trim().to_string()
    }

    #[test]
    fn see_cref_becomes_inline_code() {
        assert_eq!(normalize(r#"<s><see cref="M:Foo.Bar.Baz"/></s>"#), "`Baz`");
    }

    #[test]
    fn see_without_cref_contributes_nothing() {
        assert_eq!(normalize(r#"<s>a<see langword="null"/>b</s>"#), "ab");
    }

    #[test]
    fn seealso_with_signature() {
        assert_eq!(
            normalize(r#"<s>Use <seealso cref="M:NS.W.Run(System.String)"/> instead.</s>"#),
            "Use `Run` instead."
        );
    }

    #[test]
    fn generic_cref_uses_double_backticks() {
        assert_eq!(
            normalize(r#"<s>Returns a <see cref="T:NS.List`1"/>.</s>"#),
            "Returns a ``List`1``."
        );
    }

    #[test]
    fn inline_code_fences() {
        assert_eq!(inline_code("Run"), "`Run`");
        assert_eq!(inline_code("Map``1"), "``Map``1``");
        assert_eq!(inline_code("`0"), "`` `0 ``");
        assert_eq!(inline_code(""), "``");
    }

    #[test]
    fn nested_paragraph() {
        assert_eq!(normalize("<summary>A<para>B</para></summary>"), "A\n\nB");
    }

    #[test]
    fn paragraph_content_is_normalized() {
        assert_eq!(
            normalize(r#"<r><para>See <paramref name="x"/>.</para></r>"#),
            "See `x`."
        );
    }

    #[test]
    fn code_block_is_fenced() {
        assert_eq!(
            normalize("<example>Usage:<code>\n  var w = new Widget();\n</code>Done.</example>"),
            "Usage:\n```csharp\nvar w = new Widget();\n```\nDone."
        );
    }

    #[test]
    fn code_block_uses_only_direct_text() {
        assert_eq!(normalize("<e><code>a<b>x</b>c</code></e>"), "```csharp\na\n```");
    }

    #[test]
    fn code_block_language_is_configurable() {
        let root = parse_document("<e><code>let x = 1;</code></e>").unwrap();
        assert_eq!(element_to_text(&root, "rust").trim(), "```rust\nlet x = 1;\n```");
    }

    #[test]
    fn typeparamref_and_missing_name() {
        assert_eq!(
            normalize(r#"<s><typeparamref name="T"/> or <paramref/></s>"#),
            "`T` or ``"
        );
    }

    #[test]
    fn unknown_child_passes_through() {
        assert_eq!(normalize("<s>a <b>bold <c>deep</c></b> tail</s>"), "a bold deep tail");
    }

    #[test]
    fn child_text_absent_and_present() {
        let root = parse_document("<member><summary>  Hi  </summary><remarks/></member>").unwrap();
        assert_eq!(child_text(&root, "summary", "csharp"), Some("Hi".to_string()));
        assert_eq!(child_text(&root, "remarks", "csharp"), Some(String::new()));
        assert_eq!(child_text(&root, "returns", "csharp"), None);
    }
}
