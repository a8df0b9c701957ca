//! Identifier extraction from decoded QR payloads.
//!
//! Badges in the field carry several generations of payload format, so
//! extraction runs an ordered set of heuristics. The precedence is part of
//! the contract and must not be reordered:
//!
//! 1. JSON object with a `visitorId` or `id` member
//! 2. `visitor:<id>:<timestamp>`: the second colon-delimited segment
//! 3. `visitor-<id>`: everything after the prefix
//! 4. a bare numeric string of at least six digits
//! 5. the first run of at least six consecutive digits anywhere in the string

use serde_json::Value;

/// Minimum digit-run length accepted as a visitor identifier.
const MIN_ID_DIGITS: usize = 6;

/// Extracts a visitor identifier from a raw decoded payload.
///
/// Returns `None` when no rule matches; the scanner surfaces that as an
/// invalid-format failure rather than guessing.
pub fn extract_visitor_id(payload: &str) -> Option<String> {
    let payload = payload.trim();
    if payload.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(payload) {
        if let Some(object) = value.as_object() {
            for key in ["visitorId", "id"] {
                match object.get(key) {
                    Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
                    Some(Value::Number(n)) => return Some(n.to_string()),
                    _ => {}
                }
            }
        }
    }

    if let Some(rest) = payload.strip_prefix("visitor:") {
        let id = rest.split(':').next().unwrap_or_default();
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }

    if let Some(rest) = payload.strip_prefix("visitor-") {
        if !rest.is_empty() {
            return Some(rest.to_string());
        }
    }

    if payload.len() >= MIN_ID_DIGITS && payload.bytes().all(|b| b.is_ascii_digit()) {
        return Some(payload.to_string());
    }

    first_digit_run(payload, MIN_ID_DIGITS)
}

/// Finds the first run of at least `min_len` consecutive ASCII digits.
fn first_digit_run(input: &str, min_len: usize) -> Option<String> {
    let bytes = input.as_bytes();
    let mut start = None;

    for (i, byte) in bytes.iter().enumerate() {
        if byte.is_ascii_digit() {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            if i - s >= min_len {
                return Some(input[s..i].to_string());
            }
        }
    }

    if let Some(s) = start {
        if bytes.len() - s >= min_len {
            return Some(input[s..].to_string());
        }
    }

    None
}
