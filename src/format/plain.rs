//! Plain-text renderer. Block markers survive (a rendered document parses
//! back to itself) while inline markup is bared: code spans lose their
//! backticks and links are just their URL. Search and the text export both
//! read this output.

use super::{Block, Document, Inline, Line};

fn render_line(line: &Line, out: &mut String) {
    for inline in line {
        match inline {
            Inline::Text(t) => out.push_str(t),
            Inline::Code(c) => out.push_str(c),
            Inline::Link(url) => out.push_str(url),
        }
    }
}

pub fn render(doc: &Document) -> String {
    let mut out = String::new();
    for (i, block) in doc.blocks.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        match block {
            Block::Paragraph(lines) => {
                for (j, line) in lines.iter().enumerate() {
                    if j > 0 {
                        out.push('\n');
                    }
                    render_line(line, &mut out);
                }
            }
            Block::Heading { level, content } => {
                for _ in 0..(level - 1) {
                    out.push('#');
                }
                out.push(' ');
                render_line(content, &mut out);
            }
            Block::List(items) => {
                for (j, item) in items.iter().enumerate() {
                    if j > 0 {
                        out.push('\n');
                    }
                    out.push_str("- ");
                    render_line(item, &mut out);
                }
            }
            Block::Code(code) => {
                out.push_str("```\n");
                out.push_str(code);
                out.push_str("\n```");
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::render;

    // render(parse(x)) applied twice must equal one application.
    fn assert_stable(input: &str) {
        let once = render(&parse(input));
        let twice = render(&parse(&once));
        assert_eq!(once, twice, "unstable for input: {input:?}");
    }

    #[test]
    fn test_plain_input_passes_through_unchanged() {
        for input in ["hola mundo", "uno\ndos", "línea con acentos áéí"] {
            assert_eq!(render(&parse(input)), input);
        }
    }

    #[test]
    fn test_inline_markup_is_bared() {
        assert_eq!(render(&parse("usa `cargo` aquí")), "usa cargo aquí");
        assert_eq!(
            render(&parse("ver https://example.com ya")),
            "ver https://example.com ya"
        );
    }

    #[test]
    fn test_block_markers_round_trip() {
        assert_eq!(render(&parse("# Título")), "# Título");
        assert_eq!(render(&parse("- uno\n- dos")), "- uno\n- dos");
        assert_eq!(render(&parse("```\nlet x = 1;\n```")), "```\nlet x = 1;\n```");
    }

    #[test]
    fn test_render_parse_is_idempotent() {
        for input in [
            "hola",
            "# T\ncuerpo",
            "- a\n* b\n\ntexto `x` y https://e.com",
            "```rust\nfn main() {}\n```\ndespués",
            "texto\n\n\n\ntexto lejano",
            "  - indentado",
        ] {
            assert_stable(input);
        }
    }
}
