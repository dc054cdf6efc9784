//! Parsing classification replies into entries.

use serde_json::{Map, Value};

pub use teambrain_models::{Category, Entry};

use crate::error::{AgentError, Result};

/// Longest title derived from the input itself.
const FALLBACK_TITLE_CHARS: usize = 60;

/// Parses a classification reply into an [`Entry`].
///
/// Markdown code fences around the JSON are tolerated. The title falls back
/// to `product` or `name` and then to the start of the input.
pub fn parse_entry(reply: &str, raw_input: &str) -> Result<Entry> {
    let json = strip_code_fences(reply);
    let value: Value = serde_json::from_str(json)
        .map_err(|e| AgentError::ResponseParse(format!("classification is not JSON: {}", e)))?;
    let Value::Object(mut fields) = value else {
        return Err(AgentError::ResponseParse(
            "classification is not a JSON object".to_string(),
        ));
    };

    let category = take_string(&mut fields, "category")
        .map(|c| Category::parse_lenient(&c))
        .unwrap_or_default();
    fields.remove("raw_input");

    let title = take_string(&mut fields, "title")
        .or_else(|| fields.get("product").and_then(Value::as_str).map(str::to_string))
        .or_else(|| fields.get("name").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| fallback_title(raw_input));
    let summary = take_string(&mut fields, "summary").unwrap_or_default();

    Ok(Entry {
        category,
        title,
        summary,
        fields,
        raw_input: raw_input.to_string(),
    })
}

/// Removes a surrounding markdown code fence, with or without a language tag.
pub fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn fallback_title(raw_input: &str) -> String {
    let line = raw_input.lines().next().unwrap_or_default().trim();
    line.chars().take(FALLBACK_TITLE_CHARS).collect()
}
