//! HTML renderer. Every piece of user text goes through `escape()` on the
//! way out; markup characters in messages can never become markup in the
//! output.

use super::{Block, Document, Inline, Line};

/// Escapes the five HTML-significant characters.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_line(line: &Line, out: &mut String) {
    for inline in line {
        match inline {
            Inline::Text(t) => out.push_str(&escape(t)),
            Inline::Code(c) => {
                out.push_str("<code>");
                out.push_str(&escape(c));
                out.push_str("</code>");
            }
            Inline::Link(url) => {
                let escaped = escape(url);
                out.push_str(&format!(
                    "<a href=\"{escaped}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"message-link\">{escaped}</a>"
                ));
            }
        }
    }
}

pub fn render(doc: &Document) -> String {
    let mut out = String::new();
    for block in &doc.blocks {
        match block {
            Block::Paragraph(lines) => {
                out.push_str("<p>");
                for (j, line) in lines.iter().enumerate() {
                    if j > 0 {
                        out.push_str("<br>");
                    }
                    render_line(line, &mut out);
                }
                out.push_str("</p>");
            }
            Block::Heading { level, content } => {
                out.push_str(&format!("<h{level}>"));
                render_line(content, &mut out);
                out.push_str(&format!("</h{level}>"));
            }
            Block::List(items) => {
                out.push_str("<ul>");
                for item in items {
                    out.push_str("<li>");
                    render_line(item, &mut out);
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
            }
            Block::Code(code) => {
                out.push_str("<pre><code>");
                out.push_str(&escape(code));
                out.push_str("</code></pre>");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::{escape, render};

    #[test]
    fn test_escape_covers_markup_characters() {
        assert_eq!(
            escape("<script>\"a\" & 'b'</script>"),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_user_text_never_emits_raw_markup() {
        let html = render(&parse("<b>negrita</b> y `<i>` en código"));
        assert!(!html.contains("<b>"));
        assert!(!html.contains("<i>"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("<code>&lt;i&gt;</code>"));
    }

    #[test]
    fn test_paragraph_with_hard_breaks() {
        assert_eq!(render(&parse("uno\ndos")), "<p>uno<br>dos</p>");
    }

    #[test]
    fn test_heading_and_list_structure() {
        assert_eq!(
            render(&parse("# Título\n- uno\n- dos")),
            "<h2>Título</h2><ul><li>uno</li><li>dos</li></ul>"
        );
    }

    #[test]
    fn test_code_block_contents_stay_literal() {
        assert_eq!(
            render(&parse("```\nif a < b { }\n```")),
            "<pre><code>if a &lt; b { }</code></pre>"
        );
    }

    #[test]
    fn test_link_markup() {
        let html = render(&parse("https://e.com/?a=1&b=2"));
        assert_eq!(
            html,
            "<p><a href=\"https://e.com/?a=1&amp;b=2\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"message-link\">https://e.com/?a=1&amp;b=2</a></p>"
        );
    }
}
