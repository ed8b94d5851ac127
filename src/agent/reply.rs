//! Strict decoding of model replies
//!
//! A reply is free text that should contain `{"row": r, "col": c}`. Decoding
//! either yields a legal coordinate or says exactly why it could not.

use serde_json::Value;
use thiserror::Error;

use crate::board::Pos;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    #[error("reply contains no JSON object")]
    NoJsonObject,
    #[error("reply object is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("reply object has no `{0}` field")]
    MissingField(&'static str),
    #[error("`{field}` is not an integer: {value}")]
    NotInteger { field: &'static str, value: String },
    #[error("({row}, {col}) is off the board")]
    OffBoard { row: i64, col: i64 },
    #[error("{0} is not a legal move")]
    IllegalMove(Pos),
}

/// First brace-delimited span with a non-empty body and no closing brace
/// inside it. Nested objects are not balanced.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        let body_start = start + 1;
        match text[body_start..].find('}') {
            // `{}` has an empty body: try the next opening brace
            Some(0) => search_from = body_start,
            Some(len) => return Some(&text[start..=body_start + len]),
            None => return None,
        }
    }
    None
}

/// Read one coordinate field. Integral floats and integer strings are accepted.
fn integer_field(object: &Value, field: &'static str) -> Result<i64, ReplyError> {
    let value = object.get(field).ok_or(ReplyError::MissingField(field))?;
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < 1e15).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ReplyError::NotInteger {
        field,
        value: value.to_string(),
    })
}

/// Decode a reply into a member of `legal`
pub fn decode_move(reply: &str, legal: &[Pos]) -> Result<Pos, ReplyError> {
    let object = extract_json_object(reply).ok_or(ReplyError::NoJsonObject)?;
    let value: Value =
        serde_json::from_str(object).map_err(|err| ReplyError::InvalidJson(err.to_string()))?;

    let row = integer_field(&value, "row")?;
    let col = integer_field(&value, "col")?;
    let pos = Pos::try_new(row, col).ok_or(ReplyError::OffBoard { row, col })?;

    if legal.contains(&pos) {
        Ok(pos)
    } else {
        Err(ReplyError::IllegalMove(pos))
    }
}
