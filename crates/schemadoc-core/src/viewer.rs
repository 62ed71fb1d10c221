//! Refreshes the schema data embedded in the HTML viewer
//!
//! The viewer keeps its data in a `const schemaData = { ... };` literal.
//! Only that literal is replaced; the rest of the page is left byte for byte.

use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

static SCHEMA_DATA: OnceLock<Regex> = OnceLock::new();

fn schema_data_marker() -> &'static Regex {
    SCHEMA_DATA.get_or_init(|| Regex::new(r"const\s+schemaData\s*=\s*").unwrap())
}

/// Replace the embedded `schemaData` object with `json`.
///
/// Fails without touching anything when the marker is missing or the
/// existing object literal never closes.
pub fn embed_schema_data(html: &str, json: &str) -> Result<String> {
    let marker = schema_data_marker().find(html).ok_or_else(|| Error::ViewerMarker {
        message: "no `const schemaData = {` assignment in the HTML".to_string(),
    })?;

    let object_start = marker.end();
    if !html[object_start..].starts_with('{') {
        return Err(Error::ViewerMarker {
            message: "`schemaData` is not assigned an object literal".to_string(),
        });
    }

    let object_end = object_literal_end(html, object_start).ok_or_else(|| Error::ViewerMarker {
        message: "`schemaData` object literal is never closed".to_string(),
    })?;

    let rest = &html[object_end..];
    let rest = rest.strip_prefix(';').unwrap_or(rest);

    debug!(
        replaced_bytes = object_end - object_start,
        new_bytes = json.len(),
        "Embedding schema data into viewer"
    );

    let mut output = String::with_capacity(html.len() + json.len());
    output.push_str(&html[..marker.start()]);
    output.push_str("const schemaData = ");
    output.push_str(json.trim_end());
    output.push(';');
    output.push_str(rest);
    Ok(output)
}

/// Byte offset just past the `}` closing the object opened at `start`.
///
/// Braces inside double-quoted strings are ignored, as are escaped quotes.
fn object_literal_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }

    None
}
