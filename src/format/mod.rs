//! # Message Formatting
//!
//! Chat messages carry a small markup dialect: fenced code blocks, inline
//! backtick code, bare `http(s)://` links, `-`/`*` list items and `#` to
//! `###` headings (displayed one level down, h2 to h4).
//!
//! `parse()` turns a message into a typed [`Document`] in a single
//! deterministic pass. Each output target then gets its own renderer over
//! the tree: [`plain`] for search and text export, [`html`] for HTML export,
//! and `tui::richtext` for the terminal. Escaping happens at render time
//! only, so no renderer ever emits user text unescaped by accident.
//!
//! Rendering a document to plain text and parsing it again yields the same
//! document, which keeps search previews and exports stable no matter how
//! often they are regenerated.

pub mod html;
pub mod plain;

/// A run of inline content within a paragraph, heading or list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    /// Backtick span. Contents are literal.
    Code(String),
    /// Bare URL. The text and the target are the same.
    Link(String),
}

/// One visual line of inline content. Lines within a paragraph are hard
/// line breaks.
pub type Line = Vec<Inline>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Line>),
    /// Display level 2 to 4 (`#` maps to 2, `###` to 4).
    Heading { level: u8, content: Line },
    List(Vec<Line>),
    /// Fenced code. Contents are fully literal, surrounding blank space
    /// trimmed.
    Code(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// Splits `# `-style heading markers. Only the first three levels are
/// markup; deeper runs of `#` stay ordinary text.
fn heading_line(line: &str) -> Option<(u8, &str)> {
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if !(1..=3).contains(&hashes) {
        return None;
    }
    let rest = &line[hashes..];
    let text = rest.trim_start();
    if text.is_empty() || text.len() == rest.len() {
        // No whitespace after the marker, or nothing to head.
        return None;
    }
    Some((hashes as u8 + 1, text))
}

/// List items may be indented; the marker needs trailing whitespace and a
/// non-empty body.
fn list_item(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix('-').or_else(|| trimmed.strip_prefix('*'))?;
    let body = rest.strip_prefix(char::is_whitespace)?.trim_start();
    if body.is_empty() { None } else { Some(body) }
}

/// True if the byte at `idx` starts a URL run.
fn url_starts_at(s: &str, idx: usize) -> bool {
    s[idx..].starts_with("http://") || s[idx..].starts_with("https://")
}

/// Parses inline markup within one line: backtick code spans and bare URLs.
/// An unclosed backtick is literal text.
fn parse_inline(line: &str) -> Line {
    let mut out: Line = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    while i < line.len() {
        if line[i..].starts_with('`') {
            if let Some(close) = line[i + 1..].find('`') {
                let span = &line[i + 1..i + 1 + close];
                if !span.is_empty() {
                    if !text.is_empty() {
                        out.push(Inline::Text(std::mem::take(&mut text)));
                    }
                    out.push(Inline::Code(span.to_string()));
                    i += close + 2;
                    continue;
                }
            }
        }
        if url_starts_at(line, i) {
            let end = line[i..]
                .find(char::is_whitespace)
                .map(|off| i + off)
                .unwrap_or(line.len());
            if !text.is_empty() {
                out.push(Inline::Text(std::mem::take(&mut text)));
            }
            out.push(Inline::Link(line[i..end].to_string()));
            i = end;
            continue;
        }
        let ch = line[i..].chars().next().unwrap_or('\u{FFFD}');
        text.push(ch);
        i += ch.len_utf8();
    }

    if !text.is_empty() {
        out.push(Inline::Text(text));
    }
    out
}

/// Parses a whole message in one pass over its lines.
pub fn parse(input: &str) -> Document {
    let mut blocks: Vec<Block> = Vec::new();
    let mut paragraph: Vec<Line> = Vec::new();
    let mut list: Vec<Line> = Vec::new();
    let mut fence: Option<Vec<String>> = None;

    fn flush_paragraph(blocks: &mut Vec<Block>, paragraph: &mut Vec<Line>) {
        if !paragraph.is_empty() {
            blocks.push(Block::Paragraph(std::mem::take(paragraph)));
        }
    }
    fn flush_list(blocks: &mut Vec<Block>, list: &mut Vec<Line>) {
        if !list.is_empty() {
            blocks.push(Block::List(std::mem::take(list)));
        }
    }

    for line in input.lines() {
        if let Some(ref mut code_lines) = fence {
            if line.trim_start().starts_with("```") {
                blocks.push(Block::Code(code_lines.join("\n").trim().to_string()));
                fence = None;
            } else {
                code_lines.push(line.to_string());
            }
            continue;
        }

        if line.trim_start().starts_with("```") {
            flush_paragraph(&mut blocks, &mut paragraph);
            flush_list(&mut blocks, &mut list);
            fence = Some(Vec::new());
            continue;
        }

        if let Some(item) = list_item(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            list.push(parse_inline(item));
            continue;
        }
        flush_list(&mut blocks, &mut list);

        if let Some((level, text)) = heading_line(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::Heading {
                level,
                content: parse_inline(text),
            });
            continue;
        }

        if line.trim().is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
            continue;
        }

        paragraph.push(parse_inline(line));
    }

    // An unclosed fence runs to the end of the message.
    if let Some(code_lines) = fence {
        blocks.push(Block::Code(code_lines.join("\n").trim().to_string()));
    }
    flush_paragraph(&mut blocks, &mut paragraph);
    flush_list(&mut blocks, &mut list);

    Document { blocks }
}
