//! # Transcript Search
//!
//! Linear case-insensitive substring scan over the displayed transcript.
//! The welcome entry (index 0) is never searched. Hits come back in
//! document order with the matched runs marked, ready for highlighted
//! rendering.

use crate::core::transcript::TranscriptEntry;
use crate::format;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewSpan {
    pub text: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Index into the transcript snapshot, for scroll-to-message.
    pub entry_index: usize,
    pub sender_label: String,
    pub timestamp_label: String,
    pub preview: Vec<PreviewSpan>,
}

/// Lowercases one char for matching. Multi-char expansions (rare outside
/// Turkic locales) fall back to the original so positions stay 1:1.
fn fold(c: char) -> char {
    let mut lowered = c.to_lowercase();
    match (lowered.next(), lowered.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Splits `content` into plain and highlighted spans around every
/// case-insensitive occurrence of `query`.
fn highlight(content: &str, query: &[char]) -> Vec<PreviewSpan> {
    let chars: Vec<char> = content.chars().collect();
    let folded: Vec<char> = chars.iter().map(|&c| fold(c)).collect();

    let mut spans = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;
    while i + query.len() <= folded.len() {
        if folded[i..i + query.len()] == *query {
            if plain_start < i {
                spans.push(PreviewSpan {
                    text: chars[plain_start..i].iter().collect(),
                    highlighted: false,
                });
            }
            spans.push(PreviewSpan {
                text: chars[i..i + query.len()].iter().collect(),
                highlighted: true,
            });
            i += query.len();
            plain_start = i;
        } else {
            i += 1;
        }
    }
    if plain_start < chars.len() {
        spans.push(PreviewSpan {
            text: chars[plain_start..].iter().collect(),
            highlighted: false,
        });
    }
    spans
}

/// Scans every entry after the welcome one. An empty or whitespace query
/// yields no results.
pub fn search(entries: &[TranscriptEntry], query: &str) -> Vec<SearchHit> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let needle: Vec<char> = trimmed.chars().map(fold).collect();

    let mut hits = Vec::new();
    for (index, entry) in entries.iter().enumerate().skip(1) {
        let content = format::plain::render(&format::parse(&entry.text));
        let folded: String = content.chars().map(fold).collect();
        let needle_str: String = needle.iter().collect();
        if !folded.contains(&needle_str) {
            continue;
        }
        hits.push(SearchHit {
            entry_index: index,
            sender_label: entry.sender_label().to_string(),
            timestamp_label: entry.timestamp_label.clone(),
            preview: highlight(&content, &needle),
        });
    }
    hits
}

/// Label for the results header: `N resultado(s) encontrado(s)`.
pub fn results_label(count: usize) -> String {
    let plural = if count != 1 { "s" } else { "" };
    format!("{count} resultado{plural} encontrado{plural}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::Sender;

    fn entry(sender: Sender, text: &str) -> TranscriptEntry {
        TranscriptEntry {
            sender,
            text: text.to_string(),
            timestamp_label: "10:30".to_string(),
        }
    }

    fn transcript() -> Vec<TranscriptEntry> {
        vec![
            entry(Sender::Bot, "¡Hola! Bienvenido al chat"),
            entry(Sender::User, "Háblame de Rust"),
            entry(Sender::Bot, "RUST es un lenguaje de sistemas"),
            entry(Sender::User, "gracias"),
        ]
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        assert!(search(&transcript(), "").is_empty());
        assert!(search(&transcript(), "   ").is_empty());
    }

    #[test]
    fn test_case_insensitive_match_in_document_order() {
        let hits = search(&transcript(), "rust");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entry_index, 1);
        assert_eq!(hits[0].sender_label, "Usuario");
        assert_eq!(hits[1].entry_index, 2);
        assert_eq!(hits[1].sender_label, "Chatbot");
    }

    #[test]
    fn test_welcome_entry_is_skipped() {
        // "Hola" only appears in the welcome entry.
        assert!(search(&transcript(), "Hola").is_empty());
    }

    #[test]
    fn test_preview_marks_matched_runs_with_original_casing() {
        let hits = search(&transcript(), "rust");
        let preview = &hits[1].preview;
        assert_eq!(
            preview,
            &vec![
                PreviewSpan { text: "RUST".to_string(), highlighted: true },
                PreviewSpan {
                    text: " es un lenguaje de sistemas".to_string(),
                    highlighted: false
                },
            ]
        );
    }

    #[test]
    fn test_multiple_occurrences_in_one_entry() {
        let entries = vec![
            entry(Sender::Bot, "bienvenida"),
            entry(Sender::User, "casa Casa CASA"),
        ];
        let hits = search(&entries, "casa");
        assert_eq!(hits.len(), 1);
        let highlighted: Vec<&str> = hits[0]
            .preview
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(highlighted, vec!["casa", "Casa", "CASA"]);
    }

    #[test]
    fn test_match_against_rendered_text_not_markup() {
        let entries = vec![
            entry(Sender::Bot, "bienvenida"),
            entry(Sender::User, "usa `cargo build` y listo"),
        ];
        // "cargo build" spans the bared code span.
        assert_eq!(search(&entries, "usa cargo").len(), 1);
    }

    #[test]
    fn test_accented_query_matches() {
        let hits = search(&transcript(), "háblame");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entry_index, 1);
    }

    #[test]
    fn test_results_label_pluralizes() {
        assert_eq!(results_label(1), "1 resultado encontrado");
        assert_eq!(results_label(3), "3 resultados encontrados");
    }
}
