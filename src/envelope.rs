//! Locating the base64 document payload inside a response envelope
//!
//! The service does not document a single response shape, so the payload is
//! looked up under a fixed, ordered list of candidate keys: first on the root
//! object, then on each nested object value in document order. The search
//! never goes deeper than one level.

use serde_json::{Map, Value};

/// Candidate payload keys, in lookup priority order
pub const CANDIDATE_KEYS: [&str; 9] = [
    "base64",
    "pdf",
    "file",
    "file_base64",
    "danfe",
    "data",
    "document",
    "b64",
    "danfe_base64",
];

/// Where in the envelope the payload was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadLocation {
    /// Directly on the root object
    Root {
        /// Matching candidate key
        key: &'static str,
    },
    /// On an object one level below the root
    Nested {
        /// Root key holding the nested object
        parent: String,
        /// Matching candidate key
        key: &'static str,
    },
}

impl std::fmt::Display for PayloadLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadLocation::Root { key } => write!(f, "{key}"),
            PayloadLocation::Nested { parent, key } => write!(f, "{parent}.{key}"),
        }
    }
}

/// A parsed response envelope
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// A document payload was found
    Document {
        /// The base64 text, not yet decoded
        payload: String,
        /// Where it was found
        location: PayloadLocation,
    },
    /// No usable payload; the whole response is kept for reporting
    Opaque(Value),
}

impl Envelope {
    /// Classify a response body
    ///
    /// An empty payload string counts as missing.
    pub fn parse(value: Value) -> Self {
        match locate(&value) {
            Some((location, payload)) if !payload.is_empty() => Envelope::Document {
                payload: payload.to_string(),
                location,
            },
            _ => Envelope::Opaque(value),
        }
    }

    /// The payload, if any
    pub fn payload(&self) -> Option<&str> {
        match self {
            Envelope::Document { payload, .. } => Some(payload),
            Envelope::Opaque(_) => None,
        }
    }
}

/// Find the base64 payload in an envelope
///
/// Returns `None` for non-object values and for objects without a string
/// under any candidate key at depth 0 or 1. Never fails.
///
/// # Examples
///
/// ```
/// use danfe_fetch::envelope::extract;
/// use serde_json::json;
///
/// assert_eq!(extract(&json!({"base64": "JVBERi0="})), Some("JVBERi0="));
/// assert_eq!(extract(&json!({"result": {"pdf": "JVBERi0="}})), Some("JVBERi0="));
/// assert_eq!(extract(&json!([1, 2, 3])), None);
/// ```
pub fn extract(envelope: &Value) -> Option<&str> {
    locate(envelope).map(|(_, payload)| payload)
}

fn locate(envelope: &Value) -> Option<(PayloadLocation, &str)> {
    let root = envelope.as_object()?;

    if let Some((key, payload)) = scan(root) {
        return Some((PayloadLocation::Root { key }, payload));
    }

    root.iter().find_map(|(parent, value)| {
        let nested = value.as_object()?;
        scan(nested).map(|(key, payload)| {
            (
                PayloadLocation::Nested {
                    parent: parent.clone(),
                    key,
                },
                payload,
            )
        })
    })
}

fn scan(object: &Map<String, Value>) -> Option<(&'static str, &str)> {
    CANDIDATE_KEYS
        .iter()
        .find_map(|&key| object.get(key).and_then(Value::as_str).map(|s| (key, s)))
}
