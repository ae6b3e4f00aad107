// Citation Builder: one timestamped source link per video

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{CitationEntry, RetrievedPassage};

static START_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\s*([0-9.]+)\s*–").expect("start marker pattern is valid"));

/// Start of the `[start – end]` marker, truncated to whole seconds.
/// Missing or malformed markers read as 0.
pub fn extract_start_seconds(text: &str) -> u64 {
    START_MARKER
        .captures(text)
        .and_then(|caps| caps[1].parse::<f64>().ok())
        .map(|start| start.trunc() as u64)
        .unwrap_or(0)
}

/// Collapses passages to one entry per link, keeping the earliest timestamp.
/// Entries come out in the order their link was first seen.
pub fn build_citations(passages: &[RetrievedPassage]) -> Vec<CitationEntry> {
    let mut entries: Vec<CitationEntry> = Vec::new();
    let mut by_link: HashMap<&str, usize> = HashMap::new();

    for passage in passages {
        let Some(link) = passage.link.as_deref() else {
            continue;
        };
        let timestamp_seconds = extract_start_seconds(&passage.text);

        match by_link.get(link) {
            Some(&idx) => {
                let entry = &mut entries[idx];
                if timestamp_seconds < entry.timestamp_seconds {
                    entry.timestamp_seconds = timestamp_seconds;
                    entry.title = passage.title.clone();
                }
            }
            None => {
                by_link.insert(link, entries.len());
                entries.push(CitationEntry {
                    link: link.to_string(),
                    title: passage.title.clone(),
                    timestamp_seconds,
                });
            }
        }
    }

    entries
}

pub fn render_citations(citations: &[CitationEntry]) -> Vec<String> {
    citations.iter().map(CitationEntry::to_markdown).collect()
}

/// Markdown footer listing the sources. Empty when there are none.
pub fn sources_block(citations: &[CitationEntry]) -> String {
    if citations.is_empty() {
        return String::new();
    }

    let items = render_citations(citations)
        .into_iter()
        .map(|link| format!("- {}", link))
        .collect::<Vec<_>>()
        .join("\n");

    format!("\n\n**Sources:**\n{}", items)
}
