//! `Json.Encode` expression trees for operation variables.

use crate::elm::binders::Binders;
use crate::elm::enums::enum_encoder_name;
use crate::elm::types::ElmType;

/// Encoder function expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncoderExpr {
    /// `Json.Encode.int`.
    Int,
    /// `Json.Encode.float`.
    Float,
    /// `Json.Encode.bool`.
    Bool,
    /// `Json.Encode.string`.
    String,
    /// Generated `encode<Enum>` function, by GraphQL enum name.
    Enum(String),
    /// `Nothing` encodes as `null`.
    Maybe(Box<EncoderExpr>),
    /// `Json.Encode.list`.
    List(Box<EncoderExpr>),
    /// Record encoded with `Json.Encode.object`.
    Object(Vec<ObjectField>),
}

/// Field of an encoded input object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectField {
    /// JSON key.
    pub wire_name: String,
    /// Elm record field.
    pub field: String,
    /// Encoder for the field value.
    pub encoder: EncoderExpr,
}

impl EncoderExpr {
    /// Renders the encoder as an Elm function expression.
    ///
    /// Lambda parameters of input objects are bound in `binders`.
    #[must_use]
    pub fn render(&self, binders: &mut Binders<'_>) -> String {
        match self {
            Self::Int => "Json.Encode.int".to_string(),
            Self::Float => "Json.Encode.float".to_string(),
            Self::Bool => "Json.Encode.bool".to_string(),
            Self::String => "Json.Encode.string".to_string(),
            Self::Enum(name) => enum_encoder_name(name),
            Self::Maybe(inner) => format!(
                "(Maybe.map {} >> Maybe.withDefault Json.Encode.null)",
                inner.render(binders)
            ),
            Self::List(inner) => format!("(Json.Encode.list {})", inner.render(binders)),
            Self::Object(fields) => {
                let param = binders.bind("input");
                let body = render_object(fields, &param, binders);
                binders.release(1);
                format!("(\\{param} -> {body})")
            }
        }
    }
}

/// Renders a `Json.Encode.object` call over the fields of `record`.
#[must_use]
pub fn render_object(fields: &[ObjectField], record: &str, binders: &mut Binders<'_>) -> String {
    if fields.is_empty() {
        return "Json.Encode.object []".to_string();
    }
    let entries: Vec<String> = fields
        .iter()
        .map(|f| {
            format!(
                "( \"{}\", {} {record}.{} )",
                f.wire_name,
                f.encoder.render(binders),
                f.field
            )
        })
        .collect();
    format!("Json.Encode.object [ {} ]", entries.join(", "))
}

/// Elm type and encoder of a variable or input field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputType {
    /// Elm type.
    pub elm_type: ElmType,
    /// Encoder.
    pub encoder: EncoderExpr,
}

/// Operation variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// GraphQL variable name.
    pub name: String,
    /// Elm record field.
    pub field: String,
    /// Elm type and encoder.
    pub input: InputType,
}
