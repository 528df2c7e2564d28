//! Built-in base graph.
//!
//! A handful of small text formats so an engine is useful out of the box:
//!
//! ```text
//! markdown ──> plaintext <──> paragraphs ──> markdown
//!                  │  ^
//!                  v  │
//!                 bytes
//! ```
//!
//! None of these try to be a markdown implementation; richer converters are
//! expected to arrive as extensions.

use crate::core::payload::{Options, Parameters, Payload};
use crate::core::transform_graph::descriptor::{FormatDescriptor, TransformationGraph};
use crate::core::transform_graph::edge::edge_fn;
use anyhow::{anyhow, Context};
use mdtransform_types::FileFormat;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

pub const MARKDOWN: &str = "markdown";
pub const PLAINTEXT: &str = "plaintext";
pub const PARAGRAPHS: &str = "paragraphs";
pub const BYTES: &str = "bytes";

/// Build the base graph shipped with the crate.
pub fn base_graph() -> TransformationGraph {
    TransformationGraph::new()
        .with_format(
            FormatDescriptor::new(MARKDOWN, "Markdown text", FileFormat::Utf8)
                .with_edge(PLAINTEXT, edge_fn(markdown_to_plaintext)),
        )
        .with_format(
            FormatDescriptor::new(PLAINTEXT, "Plain text without markup", FileFormat::Utf8)
                .with_edge(PARAGRAPHS, edge_fn(plaintext_to_paragraphs))
                .with_edge(BYTES, edge_fn(plaintext_to_bytes)),
        )
        .with_format(
            FormatDescriptor::new(
                PARAGRAPHS,
                "JSON array of paragraph strings",
                FileFormat::Json,
            )
            .with_edge(PLAINTEXT, edge_fn(paragraphs_to_plaintext))
            .with_edge(MARKDOWN, edge_fn(paragraphs_to_markdown)),
        )
        .with_format(
            FormatDescriptor::new(BYTES, "UTF-8 encoded text", FileFormat::Binary)
                .with_edge(PLAINTEXT, edge_fn(bytes_to_plaintext)),
        )
}

struct InlineRule {
    pattern: Regex,
    replacement: &'static str,
}

fn block_markers() -> &'static Regex {
    static MARKERS: OnceLock<Regex> = OnceLock::new();
    MARKERS.get_or_init(|| {
        Regex::new(r"^\s{0,3}(?:#{1,6}\s+|>\s?|[-*+]\s+|\d+[.)]\s+)").expect("valid block regex")
    })
}

fn fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| Regex::new(r"^\s{0,3}(?:```|~~~)").expect("valid fence regex"))
}

fn inline_rules() -> &'static [InlineRule] {
    static RULES: OnceLock<Vec<InlineRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            (r"!\[([^\]]*)\]\([^)]*\)", "$1"),
            (r"\[([^\]]+)\]\([^)]*\)", "$1"),
            (r"\*\*([^*]+)\*\*", "$1"),
            (r"__([^_]+)__", "$1"),
            (r"\*([^*]+)\*", "$1"),
            (r"\b_([^_]+)_\b", "$1"),
            (r"`([^`]+)`", "$1"),
        ]
        .into_iter()
        .map(|(pattern, replacement)| InlineRule {
            pattern: Regex::new(pattern).expect("valid inline regex"),
            replacement,
        })
        .collect()
    })
}

fn markdown_escapes() -> &'static Regex {
    static ESCAPES: OnceLock<Regex> = OnceLock::new();
    ESCAPES.get_or_init(|| Regex::new(r"([\\`*_\[\]])").expect("valid escape regex"))
}

fn expect_text(input: Payload, format: &str) -> anyhow::Result<String> {
    match input {
        Payload::Text(text) => Ok(text),
        other => Err(anyhow!(
            "{} expects text input, got {}",
            format,
            variant_name(&other)
        )),
    }
}

fn variant_name(payload: &Payload) -> &'static str {
    match payload {
        Payload::Text(_) => "text",
        Payload::Json(_) => "json",
        Payload::Binary(_) => "binary",
    }
}

fn expect_paragraphs(input: Payload) -> anyhow::Result<Vec<String>> {
    let items = match input {
        Payload::Json(Value::Array(items)) => items,
        other => {
            return Err(anyhow!(
                "{} expects a JSON array, got {}",
                PARAGRAPHS,
                variant_name(&other)
            ))
        }
    };
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::String(text) => Ok(text),
            _ => Err(anyhow!("{} entry {} is not a string", PARAGRAPHS, idx)),
        })
        .collect()
}

fn markdown_to_plaintext(
    input: Payload,
    _parameters: &Parameters,
    _options: &Options,
) -> anyhow::Result<Payload> {
    let text = expect_text(input, MARKDOWN)?;
    let lines: Vec<String> = text
        .lines()
        .filter(|line| !fence().is_match(line))
        .map(|line| {
            let mut stripped = block_markers().replace(line, "").into_owned();
            for rule in inline_rules() {
                stripped = rule
                    .pattern
                    .replace_all(&stripped, rule.replacement)
                    .into_owned();
            }
            stripped
        })
        .collect();
    Ok(Payload::Text(lines.join("\n").trim_end().to_string()))
}

fn plaintext_to_paragraphs(
    input: Payload,
    _parameters: &Parameters,
    _options: &Options,
) -> anyhow::Result<Payload> {
    let text = expect_text(input, PLAINTEXT)?;
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(Value::String(current.join("\n")));
                current.clear();
            }
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        paragraphs.push(Value::String(current.join("\n")));
    }
    Ok(Payload::Json(Value::Array(paragraphs)))
}

fn paragraphs_to_plaintext(
    input: Payload,
    _parameters: &Parameters,
    _options: &Options,
) -> anyhow::Result<Payload> {
    let paragraphs = expect_paragraphs(input)?;
    Ok(Payload::Text(paragraphs.join("\n\n")))
}

fn paragraphs_to_markdown(
    input: Payload,
    _parameters: &Parameters,
    _options: &Options,
) -> anyhow::Result<Payload> {
    let paragraphs = expect_paragraphs(input)?;
    let escaped: Vec<String> = paragraphs
        .iter()
        .map(|paragraph| {
            let inline = markdown_escapes().replace_all(paragraph, r"\$1");
            inline
                .lines()
                .map(|line| match line.chars().next() {
                    Some('#') | Some('>') => format!("\\{}", line),
                    _ => line.to_string(),
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect();
    Ok(Payload::Text(escaped.join("\n\n")))
}

fn plaintext_to_bytes(
    input: Payload,
    _parameters: &Parameters,
    _options: &Options,
) -> anyhow::Result<Payload> {
    let text = expect_text(input, PLAINTEXT)?;
    Ok(Payload::Binary(text.into_bytes()))
}

fn bytes_to_plaintext(
    input: Payload,
    _parameters: &Parameters,
    _options: &Options,
) -> anyhow::Result<Payload> {
    let bytes = match input {
        Payload::Binary(bytes) => bytes,
        other => return Err(anyhow!("{} expects binary input, got {}", BYTES, variant_name(&other))),
    };
    let text = String::from_utf8(bytes).context("bytes are not valid UTF-8")?;
    Ok(Payload::Text(text))
}
