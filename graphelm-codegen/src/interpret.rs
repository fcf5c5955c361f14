//! Decoder interpreter.
//!
//! Evaluates a [`DecoderExpr`] against a JSON value with the semantics of
//! Elm's `Json.Decode`, so generated decoders can be checked from Rust.

use crate::elm::decoder::{Constructor, DecoderExpr, Primitive, UNEXPECTED_UNION_TYPE};
use serde_json::Value;
use thiserror::Error;

/// Decoded Elm value.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// `Int`.
    Int(i64),
    /// `Float`.
    Float(f64),
    /// `Bool`.
    Bool(bool),
    /// `String`.
    String(String),
    /// Enum value, as the GraphQL value name.
    Enum(String),
    /// `Nothing`.
    Nothing,
    /// `Just a`.
    Just(Box<Decoded>),
    /// `List a`.
    List(Vec<Decoded>),
    /// Record, fields in constructor order.
    Record(Vec<(String, Decoded)>),
    /// Union variant applied to a record.
    Variant {
        /// Constructor name.
        tag: String,
        /// Record fields in constructor order.
        fields: Vec<(String, Decoded)>,
    },
}

impl Decoded {
    /// Creates a `Just` value.
    #[must_use]
    pub fn just(value: Self) -> Self {
        Self::Just(Box::new(value))
    }

    /// Creates a record from `(name, value)` pairs.
    #[must_use]
    pub fn record<'n>(fields: impl IntoIterator<Item = (&'n str, Self)>) -> Self {
        Self::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }

    /// Creates a union variant from a tag and `(name, value)` pairs.
    #[must_use]
    pub fn variant<'n>(tag: &str, fields: impl IntoIterator<Item = (&'n str, Self)>) -> Self {
        Self::Variant {
            tag: tag.to_string(),
            fields: fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }
}

/// Error produced by a failing decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Value of the wrong JSON type.
    #[error("expecting {expected} at {path}")]
    Expecting {
        /// Expected JSON type.
        expected: String,
        /// JSON path.
        path: String,
    },

    /// Object without the requested field.
    #[error("expecting an object with a field named '{field}' at {path}")]
    MissingField {
        /// Field name.
        field: String,
        /// JSON path.
        path: String,
    },

    /// Explicit `fail`.
    #[error("{message} at {path}")]
    Failure {
        /// Failure message.
        message: String,
        /// JSON path.
        path: String,
    },
}

impl DecodeError {
    fn expecting(expected: &str, path: &str) -> Self {
        Self::Expecting {
            expected: expected.to_string(),
            path: path.to_string(),
        }
    }
}

/// Runs a decoder against a JSON value.
///
/// # Errors
/// Returns `DecodeError` where the Elm decoder would fail.
pub fn decode(decoder: &DecoderExpr, value: &Value) -> Result<Decoded, DecodeError> {
    decode_at(decoder, value, "$")
}

fn decode_at(decoder: &DecoderExpr, value: &Value, path: &str) -> Result<Decoded, DecodeError> {
    match decoder {
        DecoderExpr::Primitive(primitive) => decode_primitive(primitive, value, path),
        DecoderExpr::Field { name, decoder } => {
            let inner = field(value, name, path)?;
            decode_at(decoder, inner, &format!("{path}.{name}"))
        }
        DecoderExpr::Maybe(inner) => Ok(match decode_at(inner, value, path) {
            Ok(decoded) => Decoded::just(decoded),
            Err(_) => Decoded::Nothing,
        }),
        DecoderExpr::List(inner) => {
            let items = value
                .as_array()
                .ok_or_else(|| DecodeError::expecting("a LIST", path))?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| decode_at(inner, item, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Decoded::List)
        }
        DecoderExpr::Map {
            constructor,
            fields,
        } => {
            let values = fields
                .iter()
                .map(|d| decode_at(d, value, path))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(construct(constructor, values))
        }
        DecoderExpr::Dispatch { cases } => {
            let typename = field(value, "__typename", path)?
                .as_str()
                .ok_or_else(|| DecodeError::expecting("a STRING", &format!("{path}.__typename")))?;
            match cases.iter().find(|(name, _)| name == typename) {
                Some((_, decoder)) => decode_at(decoder, value, path),
                None => Err(DecodeError::Failure {
                    message: UNEXPECTED_UNION_TYPE.to_string(),
                    path: path.to_string(),
                }),
            }
        }
        DecoderExpr::Succeed(constructor) => Ok(construct(constructor, Vec::new())),
    }
}

fn field<'v>(value: &'v Value, name: &str, path: &str) -> Result<&'v Value, DecodeError> {
    value
        .as_object()
        .and_then(|object| object.get(name))
        .ok_or_else(|| DecodeError::MissingField {
            field: name.to_string(),
            path: path.to_string(),
        })
}

fn decode_primitive(primitive: &Primitive, value: &Value, path: &str) -> Result<Decoded, DecodeError> {
    match primitive {
        Primitive::Int => value
            .as_i64()
            .or_else(|| {
                value
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < 9.007_199_254_740_992e15)
                    .map(|f| f as i64)
            })
            .map(Decoded::Int)
            .ok_or_else(|| DecodeError::expecting("an INT", path)),
        Primitive::Float => value
            .as_f64()
            .map(Decoded::Float)
            .ok_or_else(|| DecodeError::expecting("a FLOAT", path)),
        Primitive::Bool => value
            .as_bool()
            .map(Decoded::Bool)
            .ok_or_else(|| DecodeError::expecting("a BOOL", path)),
        Primitive::String => value
            .as_str()
            .map(|s| Decoded::String(s.to_string()))
            .ok_or_else(|| DecodeError::expecting("a STRING", path)),
        Primitive::Enum { .. } => value
            .as_str()
            .map(|s| Decoded::Enum(s.to_string()))
            .ok_or_else(|| DecodeError::expecting("a STRING", path)),
    }
}

fn construct(constructor: &Constructor, values: Vec<Decoded>) -> Decoded {
    let fields = constructor.fields().iter().cloned().zip(values).collect();
    match constructor {
        Constructor::Record { .. } => Decoded::Record(fields),
        Constructor::Variant { tag, .. } => Decoded::Variant {
            tag: tag.clone(),
            fields,
        },
    }
}
