//! # Rich Text
//!
//! The terminal renderer for parsed message documents: inline code in its
//! own color, links underlined, headings bold, list items bulleted, code
//! blocks on their own background. Pure data in, `ratatui::text::Text` out;
//! widgets wrap the result in a `Paragraph`.

use ratatui::text::{Line, Span, Text};

use crate::format::{Block, Document, Inline};
use crate::tui::theme::Theme;

fn inline_spans(line: &[Inline], theme: &Theme, base: ratatui::style::Style) -> Vec<Span<'static>> {
    line.iter()
        .map(|inline| match inline {
            Inline::Text(t) => Span::styled(t.clone(), base),
            Inline::Code(c) => Span::styled(c.clone(), theme.inline_code),
            Inline::Link(url) => Span::styled(url.clone(), theme.link),
        })
        .collect()
}

pub fn render(doc: &Document, theme: &Theme) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for (i, block) in doc.blocks.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        match block {
            Block::Paragraph(para) => {
                for line in para {
                    lines.push(Line::from(inline_spans(line, theme, theme.text)));
                }
            }
            Block::Heading { content, .. } => {
                lines.push(Line::from(inline_spans(content, theme, theme.heading)));
            }
            Block::List(items) => {
                for item in items {
                    let mut spans = vec![Span::styled("• ", theme.list_marker)];
                    spans.extend(inline_spans(item, theme, theme.text));
                    lines.push(Line::from(spans));
                }
            }
            Block::Code(code) => {
                for code_line in code.lines() {
                    lines.push(Line::styled(code_line.to_string(), theme.code_block));
                }
            }
        }
    }
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::parse;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_paragraph_with_inline_markup() {
        let text = render(&parse("usa `cargo` y https://e.com"), &Theme::dark());
        assert_eq!(text.lines.len(), 1);
        assert_eq!(line_text(&text.lines[0]), "usa cargo y https://e.com");
        // Three runs with distinct styling.
        assert_eq!(text.lines[0].spans.len(), 4);
        assert_eq!(text.lines[0].spans[1].style, Theme::dark().inline_code);
        assert_eq!(text.lines[0].spans[3].style, Theme::dark().link);
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let text = render(&parse("uno\n\ndos"), &Theme::dark());
        let rendered: Vec<String> = text.lines.iter().map(line_text).collect();
        assert_eq!(rendered, vec!["uno", "", "dos"]);
    }

    #[test]
    fn test_list_items_get_bullets() {
        let text = render(&parse("- uno\n- dos"), &Theme::dark());
        assert_eq!(line_text(&text.lines[0]), "• uno");
        assert_eq!(line_text(&text.lines[1]), "• dos");
    }

    #[test]
    fn test_code_block_lines_preserved() {
        let text = render(&parse("```\nfn main() {\n    todo()\n}\n```"), &Theme::dark());
        let rendered: Vec<String> = text.lines.iter().map(line_text).collect();
        assert_eq!(rendered, vec!["fn main() {", "    todo()", "}"]);
        assert!(
            text.lines
                .iter()
                .all(|l| l.spans.iter().all(|s| s.style == Theme::dark().code_block))
        );
    }

    #[test]
    fn test_heading_styled_bold() {
        let text = render(&parse("# Título"), &Theme::dark());
        assert_eq!(line_text(&text.lines[0]), "Título");
        assert_eq!(text.lines[0].spans[0].style, Theme::dark().heading);
    }
}
