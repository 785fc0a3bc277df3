//! Stored embedding normalization.
//!
//! Embeddings reach the ranker in whatever shape the database driver handed
//! back: a native JSON array, a JSON array serialized into text, or a
//! Postgres/pgvector literal such as `{0.1,0.2}` or `[0.1,0.2]`. The encoding
//! is decided once by inspection ([`StoredEmbedding`]) and each branch yields
//! a `Result`, so a malformed row is a value the caller can count and skip.

use serde_json::Value;
use thiserror::Error;

/// Canonical embedding representation.
pub type Embedding = Vec<f64>;

/// Why a stored embedding could not be turned into numbers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbeddingParseError {
    #[error("embedding text is empty")]
    Empty,
    #[error("element {index} of embedding array is not a finite number")]
    NonNumericElement { index: usize },
    #[error("token {token:?} at position {index} is not a finite number")]
    InvalidToken { index: usize, token: String },
    #[error("unrecognized embedding encoding: {0}")]
    Unrecognized(&'static str),
}

/// A stored embedding, classified by encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredEmbedding {
    /// Already a numeric sequence.
    Numeric(Vec<f64>),
    /// Text that parsed as a JSON array; elements are checked on normalization.
    JsonText(Vec<Value>),
    /// Brace/bracket-delimited, comma-separated text that is not valid JSON.
    DelimitedText(String),
    /// A shape that can never hold a vector (null, bool, object, bare number or JSON scalar text).
    Unrecognized(&'static str),
}

impl StoredEmbedding {
    /// Classify a text column.
    ///
    /// Text starting with `{` is a Postgres array literal, never a JSON
    /// object. Other text is a JSON array if it parses as one. Valid JSON of
    /// any other shape is rejected; only text that fails to parse as JSON
    /// goes to the delimited tokenizer.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim_start().starts_with('{') {
            return Self::DelimitedText(text);
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Array(items)) => Self::JsonText(items),
            Ok(_) => Self::Unrecognized("json scalar"),
            Err(_) => Self::DelimitedText(text),
        }
    }

    /// Classify a value of unknown shape, as returned by a JSON-speaking driver.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Array(items) => match numeric_elements(items) {
                Ok(numbers) => Self::Numeric(numbers),
                Err(_) => Self::Unrecognized("array with non-numeric elements"),
            },
            Value::String(text) => Self::from_text(text.as_str()),
            Value::Null => Self::Unrecognized("null"),
            Value::Bool(_) => Self::Unrecognized("boolean"),
            Value::Number(_) => Self::Unrecognized("number"),
            Value::Object(_) => Self::Unrecognized("object"),
        }
    }

    /// Short name of the encoding, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Numeric(_) => "numeric",
            Self::JsonText(_) => "json_text",
            Self::DelimitedText(_) => "delimited_text",
            Self::Unrecognized(_) => "unrecognized",
        }
    }

    /// Convert into a flat numeric sequence.
    ///
    /// # Errors
    /// Returns [`EmbeddingParseError`] when any element or token is not a
    /// finite number, when the text is blank, or when the shape is unrecognized.
    pub fn normalize(self) -> Result<Embedding, EmbeddingParseError> {
        match self {
            Self::Numeric(numbers) => {
                match numbers.iter().position(|n| !n.is_finite()) {
                    Some(index) => Err(EmbeddingParseError::NonNumericElement { index }),
                    None => Ok(numbers),
                }
            },
            Self::JsonText(items) => numeric_elements(&items),
            Self::DelimitedText(text) => parse_delimited(&text),
            Self::Unrecognized(shape) => Err(EmbeddingParseError::Unrecognized(shape)),
        }
    }
}

impl From<Vec<f64>> for StoredEmbedding {
    fn from(numbers: Vec<f64>) -> Self {
        Self::Numeric(numbers)
    }
}

/// Normalize a value of unknown shape in one call.
///
/// # Errors
/// See [`StoredEmbedding::normalize`].
pub fn normalize(raw: &Value) -> Result<Embedding, EmbeddingParseError> {
    StoredEmbedding::from_json(raw).normalize()
}

fn numeric_elements(items: &[Value]) -> Result<Embedding, EmbeddingParseError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_f64()
                .filter(|n| n.is_finite())
                .ok_or(EmbeddingParseError::NonNumericElement { index })
        })
        .collect()
}

fn parse_delimited(text: &str) -> Result<Embedding, EmbeddingParseError> {
    if text.trim().is_empty() {
        return Err(EmbeddingParseError::Empty);
    }
    let cleaned: String = text.chars().filter(|c| !matches!(c, '{' | '}' | '[' | ']')).collect();
    // `{}` and `[]` are empty array literals, not malformed input.
    if cleaned.trim().is_empty() {
        return Ok(Vec::new());
    }
    cleaned
        .split(',')
        .enumerate()
        .map(|(index, raw)| {
            let token = raw.trim();
            token.parse::<f64>().ok().filter(|n| n.is_finite()).ok_or_else(|| {
                EmbeddingParseError::InvalidToken { index, token: token.to_owned() }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numeric_sequence_unchanged() {
        let raw = json!([0.25, -1.5, 3.0]);
        assert_eq!(normalize(&raw), Ok(vec![0.25, -1.5, 3.0]));
    }

    #[test]
    fn test_json_text_array() {
        let stored = StoredEmbedding::from_text("[0.1, 0.2, 0.3]");
        assert_eq!(stored.kind(), "json_text");
        assert_eq!(stored.normalize(), Ok(vec![0.1, 0.2, 0.3]));
    }

    #[test]
    fn test_brace_delimited_text() {
        let stored = StoredEmbedding::from_text("{0.01804306,0.0030030657,-0.5}");
        assert_eq!(stored.kind(), "delimited_text");
        assert_eq!(stored.normalize(), Ok(vec![0.018_043_06, 0.003_003_065_7, -0.5]));
    }

    #[test]
    fn test_three_encodings_agree() {
        let native = normalize(&json!([0.5, -0.25, 1e-3])).unwrap();
        let json_text = normalize(&json!("[0.5,-0.25,0.001]")).unwrap();
        let braces = normalize(&json!("{0.5,-0.25,1e-3}")).unwrap();
        let brackets_spaced = StoredEmbedding::from_text("[ 0.5 , -0.25 , 1E-3 ]").normalize().unwrap();
        assert_eq!(native, json_text);
        assert_eq!(native, braces);
        assert_eq!(native, brackets_spaced);
    }

    #[test]
    fn test_scientific_and_negative_tokens() {
        let stored = StoredEmbedding::from_text("{-1.5e-2,2E3,+4,.5}");
        assert_eq!(stored.normalize(), Ok(vec![-0.015, 2000.0, 4.0, 0.5]));
    }

    #[test]
    fn test_empty_string_is_failure() {
        assert_eq!(StoredEmbedding::from_text("").normalize(), Err(EmbeddingParseError::Empty));
        assert_eq!(StoredEmbedding::from_text("   ").normalize(), Err(EmbeddingParseError::Empty));
    }

    #[test]
    fn test_empty_literals_are_empty_sequences() {
        assert_eq!(StoredEmbedding::from_text("{}").normalize(), Ok(Vec::new()));
        assert_eq!(StoredEmbedding::from_text("[]").normalize(), Ok(Vec::new()));
    }

    #[test]
    fn test_trailing_comma_is_failure() {
        let result = StoredEmbedding::from_text("{1,2,}").normalize();
        assert_eq!(result, Err(EmbeddingParseError::InvalidToken { index: 2, token: String::new() }));
    }

    #[test]
    fn test_non_numeric_token_is_failure() {
        let result = StoredEmbedding::from_text("{0.1,abc,0.3}").normalize();
        assert_eq!(
            result,
            Err(EmbeddingParseError::InvalidToken { index: 1, token: "abc".to_owned() })
        );
    }

    #[test]
    fn test_non_finite_tokens_rejected() {
        assert!(StoredEmbedding::from_text("{NaN,1}").normalize().is_err());
        assert!(StoredEmbedding::from_text("{inf,1}").normalize().is_err());
        assert!(StoredEmbedding::Numeric(vec![1.0, f64::NAN]).normalize().is_err());
    }

    #[test]
    fn test_json_array_with_strings_is_failure() {
        let result = StoredEmbedding::from_text("[0.1, \"x\"]").normalize();
        assert_eq!(result, Err(EmbeddingParseError::NonNumericElement { index: 1 }));
    }

    #[test]
    fn test_json_object_text_is_failure() {
        assert!(StoredEmbedding::from_text("{\"a\": 1}").normalize().is_err());
    }

    #[test]
    fn test_unrecognized_shapes() {
        assert_eq!(normalize(&json!(null)), Err(EmbeddingParseError::Unrecognized("null")));
        assert_eq!(normalize(&json!(true)), Err(EmbeddingParseError::Unrecognized("boolean")));
        assert_eq!(normalize(&json!({"v": [1]})), Err(EmbeddingParseError::Unrecognized("object")));
        assert!(normalize(&json!([1, "two"])).is_err());
    }

    #[test]
    fn test_json_scalar_text_is_failure() {
        for text in ["5", "-2.5e1", "null", "true", "\"0.5\""] {
            assert_eq!(
                StoredEmbedding::from_text(text).normalize(),
                Err(EmbeddingParseError::Unrecognized("json scalar")),
                "{text}"
            );
        }
        assert!(normalize(&json!("5")).is_err());
    }

    #[test]
    fn test_bare_comma_list_still_tokenized() {
        assert_eq!(StoredEmbedding::from_text("0.5, 1").normalize(), Ok(vec![0.5, 1.0]));
    }
}
