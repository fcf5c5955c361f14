//! Enum naming and code generation.

use crate::elm::binders::Binders;
use crate::error::CodegenError;
use graphelm_core::naming::{capitalize, elm_string_literal, to_pascal_case};
use graphelm_schema::{Schema, TypeDef};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt::Write;

/// Returns the Elm type name of an enum.
#[must_use]
pub fn enum_type_name(name: &str) -> String {
    capitalize(name)
}

/// Returns the decoder function name of an enum (`<lowercased>Decoder`).
#[must_use]
pub fn enum_decoder_name(name: &str) -> String {
    format!("{}Decoder", name.to_lowercase())
}

/// Returns the encoder function name of an enum (`encode<Name>`).
#[must_use]
pub fn enum_encoder_name(name: &str) -> String {
    format!("encode{}", enum_type_name(name))
}

/// Elm naming of one enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumNaming {
    /// GraphQL enum name.
    pub name: String,
    /// Elm type name.
    pub type_name: String,
    /// Decoder function name.
    pub decoder: String,
    /// Encoder function name.
    pub encoder: String,
    /// `(GraphQL value, Elm constructor)` pairs in declaration order.
    pub constructors: Vec<(String, String)>,
}

/// Enum name to Elm naming, built once per module.
#[derive(Debug, Default)]
pub struct EnumIndex {
    enums: IndexMap<String, EnumNaming>,
}

impl EnumIndex {
    /// Builds the index for the given enum names.
    ///
    /// When two enums share a constructor name, every constructor of both
    /// enums is prefixed with its type name.
    ///
    /// # Errors
    /// Returns `CodegenError::UnknownType` if a name is not a schema enum.
    pub fn build<'n>(
        schema: &Schema,
        names: impl IntoIterator<Item = &'n str>,
    ) -> Result<Self, CodegenError> {
        let mut enums = IndexMap::new();
        let mut owners: HashMap<String, Vec<String>> = HashMap::new();

        for name in names {
            if enums.contains_key(name) {
                continue;
            }
            let Some(TypeDef::Enum(enum_def)) = schema.get_type(name) else {
                return Err(CodegenError::unknown_type(name));
            };
            let constructors: Vec<(String, String)> = enum_def
                .value_names()
                .map(|value| (value.to_string(), to_pascal_case(value)))
                .collect();
            for (_, ctor) in &constructors {
                owners.entry(ctor.clone()).or_default().push(name.to_string());
            }
            enums.insert(
                name.to_string(),
                EnumNaming {
                    name: name.to_string(),
                    type_name: enum_type_name(name),
                    decoder: enum_decoder_name(name),
                    encoder: enum_encoder_name(name),
                    constructors,
                },
            );
        }

        for naming in enums.values_mut() {
            let clashes = naming.constructors.iter().any(|(_, ctor)| {
                owners
                    .get(ctor)
                    .is_some_and(|owner| owner.iter().any(|o| *o != naming.name))
            });
            if clashes {
                tracing::debug!(name = %naming.name, "prefixing enum constructors");
                for (_, ctor) in &mut naming.constructors {
                    *ctor = format!("{}{}", naming.type_name, ctor);
                }
            }
        }

        Ok(Self { enums })
    }

    /// Looks up an enum by GraphQL name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EnumNaming> {
        self.enums.get(name)
    }

    /// Iterates over the indexed enums in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &EnumNaming> {
        self.enums.values()
    }

    /// Returns true if no enums are indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
    }
}

impl EnumNaming {
    /// Generates the custom type, decoder and encoder for this enum.
    ///
    /// Local names are bound in `binders`.
    #[must_use]
    pub fn generate(&self, binders: &mut Binders<'_>) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "type {}", self.type_name);
        for (i, (_, ctor)) in self.constructors.iter().enumerate() {
            let sep = if i == 0 { '=' } else { '|' };
            let _ = writeln!(output, "    {sep} {ctor}");
        }
        output.push_str("\n\n");

        let raw = binders.bind("raw");
        let _ = writeln!(output, "{} : Decoder {}", self.decoder, self.type_name);
        let _ = writeln!(output, "{} =", self.decoder);
        output.push_str("    string\n");
        output.push_str("        |> andThen\n");
        let _ = writeln!(output, "            (\\{raw} ->");
        let _ = writeln!(output, "                case {raw} of");
        for (value, ctor) in &self.constructors {
            let _ = writeln!(output, "                    {} ->", elm_string_literal(value));
            let _ = writeln!(output, "                        succeed {ctor}\n");
        }
        output.push_str("                    _ ->\n");
        let _ = writeln!(
            output,
            "                        fail (\"Unknown {}: \" ++ {raw})",
            self.name
        );
        output.push_str("            )\n\n\n");
        binders.release(1);

        let item = binders.bind("item");
        let _ = writeln!(output, "{} : {} -> Json.Encode.Value", self.encoder, self.type_name);
        let _ = writeln!(output, "{} {item} =", self.encoder);
        let _ = writeln!(output, "    case {item} of");
        for (i, (value, ctor)) in self.constructors.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            let _ = writeln!(output, "        {ctor} ->");
            let _ = writeln!(output, "            Json.Encode.string {}", elm_string_literal(value));
        }
        binders.release(1);

        output
    }
}
