//! # Conversation Export
//!
//! Serializes the transcript snapshot to plain text, JSON or a
//! self-contained HTML document and writes it to
//! `chatbot_conversation_<timestamp>.<ext>`. Timestamps are exported
//! verbatim as displayed; the welcome entry is included.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::core::store::Sender;
use crate::core::transcript::TranscriptEntry;
use crate::format;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Txt,
    Json,
    Html,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Txt, ExportFormat::Json, ExportFormat::Html];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Html => "html",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "Texto plano (.txt)",
            ExportFormat::Json => "JSON (.json)",
            ExportFormat::Html => "HTML (.html)",
        }
    }
}

/// Session details shown in every export header.
#[derive(Debug, Clone)]
pub struct ExportMeta {
    pub user_id: String,
    pub model: String,
    pub message_count: usize,
    pub session_duration_secs: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonMetadata {
    export_date: String,
    user_id: String,
    model: String,
    message_count: usize,
    session_duration: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonMessage {
    id: usize,
    role: String,
    timestamp: String,
    content: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonExport {
    metadata: JsonMetadata,
    messages: Vec<JsonMessage>,
}

fn role(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "user",
        Sender::Bot => "assistant",
    }
}

fn render_txt(meta: &ExportMeta, entries: &[TranscriptEntry], now: DateTime<Local>) -> String {
    let mut text = String::from("Chatbot Conversation Export\n");
    text.push_str(&format!("Fecha: {}\n", now.format("%d/%m/%Y, %H:%M:%S")));
    text.push_str(&format!("Usuario: {}\n", meta.user_id));
    text.push_str(&format!("Modelo: {}\n", meta.model));
    text.push_str(&format!("Total mensajes: {}\n", meta.message_count));
    text.push_str(&"=".repeat(50));
    text.push_str("\n\n");

    for entry in entries {
        let sender = match entry.sender {
            Sender::User => "USUARIO",
            Sender::Bot => "CHATBOT",
        };
        let content = format::plain::render(&format::parse(&entry.text));
        text.push_str(&format!("[{}] {}:\n", entry.timestamp_label, sender));
        text.push_str(&format!("{content}\n\n"));
    }
    text
}

fn render_json(
    meta: &ExportMeta,
    entries: &[TranscriptEntry],
    now: DateTime<Local>,
) -> Result<String, serde_json::Error> {
    let export = JsonExport {
        metadata: JsonMetadata {
            export_date: now.to_rfc3339(),
            user_id: meta.user_id.clone(),
            model: meta.model.clone(),
            message_count: meta.message_count,
            session_duration: meta.session_duration_secs,
        },
        messages: entries
            .iter()
            .enumerate()
            .map(|(id, entry)| JsonMessage {
                id,
                role: role(entry.sender).to_string(),
                timestamp: entry.timestamp_label.clone(),
                content: format::plain::render(&format::parse(&entry.text)),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&export)
}

fn render_html(meta: &ExportMeta, entries: &[TranscriptEntry], now: DateTime<Local>) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Chatbot Conversation Export</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; line-height: 1.6; }}
        .message {{ margin: 20px 0; padding: 15px; border-radius: 10px; }}
        .user {{ background: #e3f2fd; margin-left: 40px; }}
        .bot {{ background: #f5f5f5; margin-right: 40px; }}
        .timestamp {{ font-size: 12px; color: #666; margin-top: 5px; }}
        .header {{ background: #4361ee; color: white; padding: 20px; border-radius: 10px; margin-bottom: 30px; }}
    </style>
</head>
<body>
    <div class="header">
        <h1>Chatbot Conversation Export</h1>
        <p>Fecha: {} | Usuario: {} | Modelo: {}</p>
    </div>"#,
        now.format("%d/%m/%Y, %H:%M:%S"),
        format::html::escape(&meta.user_id),
        format::html::escape(&meta.model),
    );

    for entry in entries {
        let (class, label) = match entry.sender {
            Sender::User => ("user", "Usuario"),
            Sender::Bot => ("bot", "Chatbot"),
        };
        let content = format::html::render(&format::parse(&entry.text));
        html.push_str(&format!(
            r#"
    <div class="message {class}">
        <div><strong>{label}</strong></div>
        <div>{content}</div>
        <div class="timestamp">{}</div>
    </div>"#,
            format::html::escape(&entry.timestamp_label),
        ));
    }

    html.push_str("\n</body>\n</html>");
    html
}

/// Renders the export body for one format.
pub fn render(
    fmt: ExportFormat,
    meta: &ExportMeta,
    entries: &[TranscriptEntry],
    now: DateTime<Local>,
) -> io::Result<String> {
    match fmt {
        ExportFormat::Txt => Ok(render_txt(meta, entries, now)),
        ExportFormat::Json => render_json(meta, entries, now).map_err(io::Error::other),
        ExportFormat::Html => Ok(render_html(meta, entries, now)),
    }
}

pub fn export_filename(fmt: ExportFormat, now: DateTime<Local>) -> String {
    format!(
        "chatbot_conversation_{}.{}",
        now.timestamp_millis(),
        fmt.extension()
    )
}

/// Renders and writes the export file, returning its path.
pub fn write_export(
    dir: &Path,
    fmt: ExportFormat,
    meta: &ExportMeta,
    entries: &[TranscriptEntry],
) -> io::Result<PathBuf> {
    let now = Local::now();
    let body = render(fmt, meta, entries, now)?;
    let path = dir.join(export_filename(fmt, now));
    fs::write(&path, body)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ExportMeta {
        ExportMeta {
            user_id: "user_1700000000000_abc123def".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            message_count: 2,
            session_duration_secs: 95,
        }
    }

    fn entries() -> Vec<TranscriptEntry> {
        vec![
            TranscriptEntry {
                sender: Sender::Bot,
                text: "¡Hola! Bienvenido".to_string(),
                timestamp_label: "Ahora".to_string(),
            },
            TranscriptEntry {
                sender: Sender::User,
                text: "usa `cargo build`".to_string(),
                timestamp_label: "10:30".to_string(),
            },
            TranscriptEntry {
                sender: Sender::Bot,
                text: "<b>claro</b>".to_string(),
                timestamp_label: "10:31".to_string(),
            },
        ]
    }

    #[test]
    fn test_txt_header_and_entries() {
        let txt = render_txt(&meta(), &entries(), Local::now());
        assert!(txt.starts_with("Chatbot Conversation Export\n"));
        assert!(txt.contains("Usuario: user_1700000000000_abc123def\n"));
        assert!(txt.contains("Modelo: llama-3.1-8b-instant\n"));
        assert!(txt.contains("Total mensajes: 2\n"));
        assert!(txt.contains("[Ahora] CHATBOT:\n¡Hola! Bienvenido\n"));
        assert!(txt.contains("[10:30] USUARIO:\nusa cargo build\n"));
    }

    #[test]
    fn test_txt_separator_is_a_real_line_of_equals() {
        let txt = render_txt(&meta(), &entries(), Local::now());
        assert!(txt.contains(&"=".repeat(50)));
        assert!(!txt.contains("repeat"));
    }

    #[test]
    fn test_json_round_trips_with_all_entries() {
        let json = render_json(&meta(), &entries(), Local::now()).unwrap();
        let parsed: JsonExport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.messages.len(), entries().len());
        assert_eq!(parsed.metadata.user_id, meta().user_id);
        assert_eq!(parsed.metadata.session_duration, 95);
        assert_eq!(parsed.messages[0].id, 0);
        assert_eq!(parsed.messages[0].role, "assistant");
        assert_eq!(parsed.messages[1].role, "user");
        assert_eq!(parsed.messages[1].timestamp, "10:30");
        assert_eq!(parsed.messages[1].content, "usa cargo build");
    }

    #[test]
    fn test_json_uses_camel_case_metadata_keys() {
        let json = render_json(&meta(), &entries(), Local::now()).unwrap();
        assert!(json.contains("\"exportDate\""));
        assert!(json.contains("\"userId\""));
        assert!(json.contains("\"messageCount\""));
        assert!(json.contains("\"sessionDuration\""));
    }

    #[test]
    fn test_html_is_self_contained_and_escaped() {
        let html = render_html(&meta(), &entries(), Local::now());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(html.ends_with("</html>"));
        // Message markup is escaped, not interpreted.
        assert!(html.contains("&lt;b&gt;claro&lt;/b&gt;"));
        assert!(!html.contains("<b>claro</b>"));
        assert!(html.contains("<code>cargo build</code>"));
    }

    #[test]
    fn test_filename_shape() {
        let name = export_filename(ExportFormat::Json, Local::now());
        assert!(name.starts_with("chatbot_conversation_"));
        assert!(name.ends_with(".json"));
        let millis = name
            .trim_start_matches("chatbot_conversation_")
            .trim_end_matches(".json");
        assert!(millis.parse::<i64>().is_ok());
    }

    #[test]
    fn test_write_export_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_export(dir.path(), ExportFormat::Txt, &meta(), &entries()).unwrap();
        assert!(path.exists());
        let body = fs::read_to_string(&path).unwrap();
        assert!(body.starts_with("Chatbot Conversation Export"));
    }
}
