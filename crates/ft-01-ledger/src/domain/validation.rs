//! Boundary validation for submitted payloads.
//!
//! Accepted payloads are stored verbatim; validation never rewrites them.

use super::errors::LedgerError;
use serde_json::Value;

/// Structural limits for a submitted payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadLimits {
    /// Maximum nesting depth (the top-level object is depth 1).
    pub max_depth: usize,
    /// Maximum total of object keys and array elements.
    pub max_fields: usize,
}

impl Default for PayloadLimits {
    fn default() -> Self {
        Self {
            max_depth: 32,
            max_fields: 1024,
        }
    }
}

/// Checks that `payload` is a JSON object within `limits`.
pub fn validate_payload(payload: &Value, limits: &PayloadLimits) -> Result<(), LedgerError> {
    if !payload.is_object() {
        return Err(LedgerError::InvalidPayload(format!(
            "transaction payload must be a JSON object, got {}",
            kind(payload)
        )));
    }

    let mut fields = 0usize;
    let mut stack: Vec<(&Value, usize)> = vec![(payload, 1)];

    while let Some((value, depth)) = stack.pop() {
        if depth > limits.max_depth {
            return Err(LedgerError::InvalidPayload(format!(
                "payload nesting exceeds {} levels",
                limits.max_depth
            )));
        }

        let children: Box<dyn Iterator<Item = &Value>> = match value {
            Value::Object(map) => Box::new(map.values()),
            Value::Array(items) => Box::new(items.iter()),
            _ => continue,
        };

        for child in children {
            fields += 1;
            if fields > limits.max_fields {
                return Err(LedgerError::InvalidPayload(format!(
                    "payload has more than {} fields",
                    limits.max_fields
                )));
            }
            if child.is_object() || child.is_array() {
                stack.push((child, depth + 1));
            }
        }
    }

    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
