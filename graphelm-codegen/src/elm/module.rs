//! Elm module emission.
//!
//! [`ModuleEmitter`] renders the definitions generated from one query file
//! into a complete Elm module: request functions, type aliases, decoders,
//! union and enum custom types and the `apply` helper.

use crate::elm::binders::Binders;
use crate::elm::encoders::{ObjectField, render_object};
use crate::elm::enums::EnumIndex;
use crate::elm::types::{ElmType, UnionDecl, render_alias};
use crate::error::CodegenError;
use crate::generator::GeneratedDefinition;
use graphelm_core::ANONYMOUS_QUERY;
use graphelm_core::naming::{elm_safe_name, elm_string_literal, lower_first};
use graphelm_schema::Schema;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt::{self, Write};
use std::str::FromStr;

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "/graphql";

/// Values brought into scope by `import Json.Decode exposing (..)`.
const JSON_DECODE_EXPOSED: &[&str] = &[
    "andThen",
    "array",
    "at",
    "bool",
    "decodeString",
    "decodeValue",
    "dict",
    "errorToString",
    "fail",
    "field",
    "float",
    "index",
    "int",
    "keyValuePairs",
    "lazy",
    "list",
    "map",
    "map2",
    "map3",
    "map4",
    "map5",
    "map6",
    "map7",
    "map8",
    "maybe",
    "null",
    "nullable",
    "oneOf",
    "oneOrMore",
    "string",
    "succeed",
    "value",
];

const ENDPOINT_CONSTANT: &str = "endpointUrl";
const APPLY_HELPER: &str = "apply";

/// HTTP method used by generated request functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// Query, operation name and variables in the URL.
    #[default]
    Get,
    /// JSON request body.
    Post,
}

impl HttpMethod {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("GET") {
            Ok(Self::Get)
        } else if s.eq_ignore_ascii_case("POST") {
            Ok(Self::Post)
        } else {
            Err(CodegenError::UnknownMethod {
                method: s.to_string(),
            })
        }
    }
}

/// Options of one generated module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOptions {
    module_name: String,
    endpoint: String,
    method: HttpMethod,
}

impl ModuleOptions {
    /// Creates a builder for a module with the given dotted name.
    #[must_use]
    pub fn builder(module_name: impl Into<String>) -> ModuleOptionsBuilder {
        ModuleOptionsBuilder::new(module_name)
    }

    /// Returns the Elm module name.
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Returns the GraphQL endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }
}

/// Builder for [`ModuleOptions`].
#[derive(Debug, Clone)]
pub struct ModuleOptionsBuilder {
    module_name: String,
    endpoint: String,
    method: HttpMethod,
}

impl ModuleOptionsBuilder {
    /// Creates a new builder with the default endpoint and method.
    #[must_use]
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            method: HttpMethod::default(),
        }
    }

    /// Sets the GraphQL endpoint URL.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Builds the options.
    #[must_use]
    pub fn build(self) -> ModuleOptions {
        ModuleOptions {
            module_name: self.module_name,
            endpoint: self.endpoint,
            method: self.method,
        }
    }
}

/// Top-level names of a module. Types and values live in separate Elm
/// namespaces; record aliases and custom type variants also declare a
/// constructor value.
#[derive(Debug)]
struct Declarations {
    types: HashSet<String>,
    values: HashSet<String>,
}

impl Declarations {
    fn new() -> Self {
        Self {
            types: HashSet::new(),
            values: JSON_DECODE_EXPOSED.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    fn value(&mut self, name: &str) -> Result<(), CodegenError> {
        if self.values.insert(name.to_string()) {
            Ok(())
        } else {
            Err(CodegenError::duplicate(name))
        }
    }

    fn type_name(&mut self, name: &str) -> Result<(), CodegenError> {
        if self.types.insert(name.to_string()) {
            Ok(())
        } else {
            Err(CodegenError::duplicate(name))
        }
    }

    fn record_alias(&mut self, name: &str) -> Result<(), CodegenError> {
        self.type_name(name)?;
        self.value(name)
    }
}

/// Renders generated definitions into an Elm module.
#[derive(Debug)]
pub struct ModuleEmitter<'a> {
    schema: &'a Schema,
    options: &'a ModuleOptions,
}

impl<'a> ModuleEmitter<'a> {
    /// Creates a new module emitter.
    #[must_use]
    pub fn new(schema: &'a Schema, options: &'a ModuleOptions) -> Self {
        Self { schema, options }
    }

    /// Emits the module source.
    ///
    /// Every top-level name is declared before any body is rendered, so
    /// local binders can avoid all of them.
    ///
    /// # Arguments
    /// * `definitions` - Definitions generated from one document
    ///
    /// # Returns
    /// The Elm module source.
    ///
    /// # Errors
    /// Returns `CodegenError::DuplicateDeclaration` if two top-level
    /// declarations share a name, and `CodegenError::UnknownType` if an
    /// enum referenced by a definition is missing from the schema.
    pub fn emit(&self, definitions: &[GeneratedDefinition]) -> Result<String, CodegenError> {
        tracing::debug!(
            module = %self.options.module_name,
            definitions = definitions.len(),
            "emitting module"
        );

        let mut names = Declarations::new();
        names.value(ENDPOINT_CONSTANT)?;
        for def in definitions.iter().filter(|d| d.is_operation()) {
            OperationNames::new(def).declare(&mut names)?;
        }
        for def in definitions.iter().filter(|d| !d.is_operation()) {
            names.record_alias(&def.type_name)?;
            names.value(&fragment_decoder_name(def))?;
        }

        let (unions, enum_names) = collect_custom_types(definitions)?;
        for decl in unions.values() {
            names.type_name(&decl.name)?;
            for variant in &decl.variants {
                names.value(&variant.tag)?;
            }
        }

        let enums = EnumIndex::build(self.schema, enum_names.iter().map(String::as_str))?;
        for naming in enums.iter() {
            names.type_name(&naming.type_name)?;
            names.value(&naming.decoder)?;
            names.value(&naming.encoder)?;
            for (_, ctor) in &naming.constructors {
                names.value(ctor)?;
            }
        }
        names.value(APPLY_HELPER)?;

        let mut binders = Binders::new(&names.values);
        let mut blocks = vec![format!(
            "{ENDPOINT_CONSTANT} : String\n{ENDPOINT_CONSTANT} =\n    {}\n",
            elm_string_literal(&self.options.endpoint)
        )];

        for def in definitions.iter().filter(|d| d.is_operation()) {
            self.emit_operation(def, &mut binders, &mut blocks);
        }

        for def in definitions.iter().filter(|d| !d.is_operation()) {
            blocks.push(alias_block(&def.type_name, &def.result_type));
            blocks.push(decoder_block(&fragment_decoder_name(def), def, &mut binders));
        }

        blocks.extend(unions.values().map(UnionDecl::render));
        for naming in enums.iter() {
            blocks.push(naming.generate(&mut binders));
        }

        blocks.push(format!(
            "{APPLY_HELPER} : Decoder a -> Decoder (a -> b) -> Decoder b\n{APPLY_HELPER} =\n    map2 (|>)\n"
        ));

        let mut output = self.header();
        output.push_str("\n\n");
        output.push_str(&blocks.join("\n\n"));
        Ok(output)
    }

    fn header(&self) -> String {
        let mut output = format!("module {} exposing (..)\n\n", self.options.module_name);
        output.push_str("import Http\n");
        output.push_str("import Json.Decode exposing (..)\n");
        output.push_str("import Json.Encode\n");
        output.push_str("import Url.Builder\n");
        output
    }

    fn emit_operation(
        &self,
        def: &GeneratedDefinition,
        binders: &mut Binders<'_>,
        blocks: &mut Vec<String>,
    ) {
        let names = OperationNames::new(def);

        blocks.push(format!(
            "{document} : String\n{document} =\n    {}\n",
            elm_string_literal(&def.document),
            document = names.document
        ));

        if !def.variables.is_empty() {
            let fields: Vec<(String, ElmType)> = def
                .variables
                .iter()
                .map(|v| (v.field.clone(), v.input.elm_type.clone()))
                .collect();
            blocks.push(render_alias(&names.variables_type, &fields));

            let object_fields: Vec<ObjectField> = def
                .variables
                .iter()
                .map(|v| ObjectField {
                    wire_name: v.name.clone(),
                    field: v.field.clone(),
                    encoder: v.input.encoder.clone(),
                })
                .collect();
            let param = binders.bind("variables");
            let body = render_object(&object_fields, &param, binders);
            binders.release(1);
            blocks.push(format!(
                "{encoder} : {variables_type} -> Json.Encode.Value\n{encoder} {param} =\n    {body}\n",
                encoder = names.encoder,
                variables_type = names.variables_type
            ));
        }

        blocks.push(self.request_function(def, &names, binders));
        blocks.push(alias_block(&def.type_name, &def.result_type));
        blocks.push(decoder_block(&names.decoder, def, binders));
    }

    /// Renders the `Http.request` function of an operation.
    fn request_function(
        &self,
        def: &GeneratedDefinition,
        names: &OperationNames,
        binders: &mut Binders<'_>,
    ) -> String {
        let function = &names.function;
        let method = self.options.method;
        let variables = (!def.variables.is_empty()).then(|| binders.bind("variables"));
        let to_msg = binders.bind("toMsg");

        let mut output = String::new();
        if let Some(variables) = &variables {
            let _ = writeln!(
                output,
                "{function} : {} -> (Result Http.Error {} -> msg) -> Cmd msg",
                names.variables_type, def.type_name
            );
            let _ = writeln!(output, "{function} {variables} {to_msg} =");
        } else {
            let _ = writeln!(
                output,
                "{function} : (Result Http.Error {} -> msg) -> Cmd msg",
                def.type_name
            );
            let _ = writeln!(output, "{function} {to_msg} =");
        }
        output.push_str("    Http.request\n");
        let _ = writeln!(output, "        {{ method = \"{method}\"");
        output.push_str("        , headers = []\n");

        let mut params = vec![("query", method_value(method, &names.document))];
        if def.name != ANONYMOUS_QUERY {
            params.push((
                "operationName",
                method_value(method, &elm_string_literal(&def.name)),
            ));
        }
        if let Some(variables) = &variables {
            let encoded = format!("{} {variables}", names.encoder);
            params.push((
                "variables",
                match method {
                    HttpMethod::Get => format!("(Json.Encode.encode 0 ({encoded}))"),
                    HttpMethod::Post => encoded,
                },
            ));
        }

        match method {
            HttpMethod::Get => {
                output.push_str("        , url =\n");
                let _ = writeln!(output, "            {ENDPOINT_CONSTANT}");
                output.push_str("                ++ Url.Builder.toQuery\n");
                for (i, (key, value)) in params.iter().enumerate() {
                    let sep = if i == 0 { '[' } else { ',' };
                    let _ = writeln!(
                        output,
                        "                    {sep} Url.Builder.string \"{key}\" {value}"
                    );
                }
                output.push_str("                    ]\n");
                output.push_str("        , body = Http.emptyBody\n");
            }
            HttpMethod::Post => {
                let _ = writeln!(output, "        , url = {ENDPOINT_CONSTANT}");
                output.push_str("        , body =\n");
                output.push_str("            Http.jsonBody\n");
                output.push_str("                (Json.Encode.object\n");
                for (i, (key, value)) in params.iter().enumerate() {
                    let sep = if i == 0 { '[' } else { ',' };
                    let _ = writeln!(output, "                    {sep} ( \"{key}\", {value} )");
                }
                output.push_str("                    ]\n");
                output.push_str("                )\n");
            }
        }

        let _ = writeln!(
            output,
            "        , expect = Http.expectJson {to_msg} (field \"data\" {})",
            names.decoder
        );
        output.push_str("        , timeout = Nothing\n");
        output.push_str("        , tracker = Nothing\n");
        output.push_str("        }\n");

        binders.release(1 + usize::from(variables.is_some()));
        output
    }
}

/// Top-level names declared for one operation.
#[derive(Debug)]
struct OperationNames {
    function: String,
    document: String,
    decoder: String,
    type_name: String,
    variables_type: String,
    encoder: String,
    has_variables: bool,
}

impl OperationNames {
    fn new(def: &GeneratedDefinition) -> Self {
        let function = elm_safe_name(&def.name);
        let variables_type = format!("{}Variables", def.type_name);
        Self {
            document: format!("{function}Document"),
            decoder: format!("{function}Decoder"),
            encoder: format!("encode{variables_type}"),
            type_name: def.type_name.clone(),
            has_variables: !def.variables.is_empty(),
            function,
            variables_type,
        }
    }

    fn declare(&self, names: &mut Declarations) -> Result<(), CodegenError> {
        names.value(&self.function)?;
        names.value(&self.document)?;
        names.value(&self.decoder)?;
        names.record_alias(&self.type_name)?;
        if self.has_variables {
            names.record_alias(&self.variables_type)?;
            names.value(&self.encoder)?;
        }
        Ok(())
    }
}

fn fragment_decoder_name(def: &GeneratedDefinition) -> String {
    format!("{}Decoder", lower_first(&def.name))
}

/// Wraps a string expression for the request parameters of `method`.
fn method_value(method: HttpMethod, expr: &str) -> String {
    match method {
        HttpMethod::Get => expr.to_string(),
        HttpMethod::Post => format!("Json.Encode.string {expr}"),
    }
}

fn alias_block(name: &str, ty: &ElmType) -> String {
    match ty {
        ElmType::Record(fields) => render_alias(name, fields),
        other => format!("type alias {name} =\n    {}\n", other.render()),
    }
}

fn decoder_block(decoder: &str, def: &GeneratedDefinition, binders: &mut Binders<'_>) -> String {
    format!(
        "{decoder} : Decoder {}\n{decoder} =\n    {}\n",
        def.type_name,
        def.decoder.render_in(4, binders)
    )
}

/// Collects the union declarations and enum names referenced by the
/// definitions, in order of first appearance.
///
/// The same union selected twice with the same variants is declared once;
/// with different variants it is a duplicate declaration.
fn collect_custom_types(
    definitions: &[GeneratedDefinition],
) -> Result<(IndexMap<String, UnionDecl>, Vec<String>), CodegenError> {
    let mut found: Vec<&ElmType> = Vec::new();
    for def in definitions {
        def.result_type.visit(&mut |ty| found.push(ty));
        for variable in &def.variables {
            variable.input.elm_type.visit(&mut |ty| found.push(ty));
        }
    }

    let mut unions: IndexMap<String, UnionDecl> = IndexMap::new();
    let mut enums: Vec<String> = Vec::new();
    for ty in found {
        match ty {
            ElmType::Union(decl) => match unions.get(&decl.name) {
                Some(existing) if existing == decl => {}
                Some(_) => return Err(CodegenError::duplicate(&decl.name)),
                None => {
                    unions.insert(decl.name.clone(), decl.clone());
                }
            },
            ElmType::Enum(name) if !enums.contains(name) => enums.push(name.clone()),
            _ => {}
        }
    }
    Ok((unions, enums))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::Generator;
    use graphelm_core::parse_document;
    use graphelm_schema::parse_sdl;

    const SCHEMA: &str = r#"
        type Query {
            user(id: ID!): User
            search(text: String!): [SearchResult]
            reviews(episode: Episode, filter: ReviewFilter): [Review!]!
        }
        type Mutation { rename(id: ID!, name: String!): User }
        type User { id: ID! name: String role: Role }
        type Review { stars: Int! episode: Episode }
        type Human { name: String }
        type Droid { name: String }
        union SearchResult = Human | Droid
        enum Role { ADMIN MEMBER }
        enum Episode { NEWHOPE EMPIRE JEDI }
        enum Status { ACTIVE ADMIN }
        input ReviewFilter { minStars: Int status: Status }
    "#;

    fn emit_with(source: &str, options: &ModuleOptions) -> Result<String, CodegenError> {
        let schema = parse_sdl(SCHEMA).expect("Failed to parse schema");
        let document = parse_document(source).expect("Failed to parse document");
        let definitions = Generator::new(&schema).generate_document(&document)?;
        ModuleEmitter::new(&schema, options).emit(&definitions)
    }

    fn emit(source: &str) -> Result<String, CodegenError> {
        let options = ModuleOptions::builder("Api.User")
            .endpoint("https://api.example.com/graphql")
            .build();
        emit_with(source, &options)
    }

    #[test]
    fn test_http_method_parsing() {
        assert_eq!("get".parse::<HttpMethod>().expect("Failed to parse"), HttpMethod::Get);
        assert_eq!("POST".parse::<HttpMethod>().expect("Failed to parse"), HttpMethod::Post);
        assert!(matches!(
            "PUT".parse::<HttpMethod>(),
            Err(CodegenError::UnknownMethod { method }) if method == "PUT"
        ));
        assert_eq!(HttpMethod::default().to_string(), "GET");
    }

    #[test]
    fn test_options_builder_defaults() {
        let options = ModuleOptions::builder("Main").build();
        assert_eq!(options.module_name(), "Main");
        assert_eq!(options.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(options.method(), HttpMethod::Get);
    }

    #[test]
    fn test_module_layout() {
        let output = emit(r#"query user($id: ID!) { user(id: $id) { id name role } }"#)
            .expect("Failed to emit");

        assert!(output.starts_with(
            "module Api.User exposing (..)\n\nimport Http\nimport Json.Decode exposing (..)\nimport Json.Encode\nimport Url.Builder\n\n\nendpointUrl : String\nendpointUrl =\n    \"https://api.example.com/graphql\"\n"
        ));

        let order = [
            "userDocument : String",
            "type alias UserVariables =",
            "encodeUserVariables : UserVariables -> Json.Encode.Value",
            "user : UserVariables -> (Result Http.Error User -> msg) -> Cmd msg",
            "type alias User =",
            "userDecoder : Decoder User",
            "type Role",
            "apply : Decoder a -> Decoder (a -> b) -> Decoder b",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| output.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{output}");
        assert!(output.ends_with("apply =\n    map2 (|>)\n"));
    }

    #[test]
    fn test_operation_blocks() {
        let output = emit(r#"query user($id: ID!) { user(id: $id) { id name } }"#)
            .expect("Failed to emit");

        assert!(output.contains(
            "userDocument =\n    \"query user($id: ID!) { user(id: $id) { id name } }\"\n"
        ));
        assert!(output.contains("type alias UserVariables =\n    { id : String\n    }\n"));
        assert!(output.contains(
            "encodeUserVariables variables =\n    Json.Encode.object [ ( \"id\", Json.Encode.string variables.id ) ]\n"
        ));
        assert!(output.contains(
            "type alias User =\n    { user : Maybe { id : String, name : Maybe String }\n    }\n"
        ));
        assert!(output.contains("userDecoder =\n    map User\n        (maybe (field \"user\""));
    }

    #[test]
    fn test_get_request_function() {
        let output = emit(r#"query user($id: ID!) { user(id: $id) { id } }"#).expect("Failed to emit");
        let expected = "user variables toMsg =
    Http.request
        { method = \"GET\"
        , headers = []
        , url =
            endpointUrl
                ++ Url.Builder.toQuery
                    [ Url.Builder.string \"query\" userDocument
                    , Url.Builder.string \"operationName\" \"user\"
                    , Url.Builder.string \"variables\" (Json.Encode.encode 0 (encodeUserVariables variables))
                    ]
        , body = Http.emptyBody
        , expect = Http.expectJson toMsg (field \"data\" userDecoder)
        , timeout = Nothing
        , tracker = Nothing
        }
";
        assert!(output.contains(expected), "{output}");
    }

    #[test]
    fn test_post_request_function() {
        let options = ModuleOptions::builder("Main").method(HttpMethod::Post).build();
        let output = emit_with(r#"mutation rename { rename(id: "1", name: "x") { id } }"#, &options)
            .expect("Failed to emit");
        let expected = "rename : (Result Http.Error Rename -> msg) -> Cmd msg
rename toMsg =
    Http.request
        { method = \"POST\"
        , headers = []
        , url = endpointUrl
        , body =
            Http.jsonBody
                (Json.Encode.object
                    [ ( \"query\", Json.Encode.string renameDocument )
                    , ( \"operationName\", Json.Encode.string \"rename\" )
                    ]
                )
        , expect = Http.expectJson toMsg (field \"data\" renameDecoder)
";
        assert!(output.contains(expected), "{output}");
        assert!(output.contains("endpointUrl =\n    \"/graphql\"\n"));
    }

    #[test]
    fn test_anonymous_query_has_no_operation_name() {
        let output = emit("{ user(id: \"1\") { id } }").expect("Failed to emit");
        assert!(output.contains("anonymousQuery : (Result Http.Error AnonymousQuery -> msg) -> Cmd msg\n"));
        assert!(output.contains("anonymousQueryDecoder : Decoder AnonymousQuery\n"));
        assert!(!output.contains("operationName"));
        assert!(!output.contains("AnonymousQueryVariables"));
    }

    #[test]
    fn test_fragment_blocks() {
        let output = emit(
            r#"
            query q { user(id: "1") { ...UserFields } }
            fragment UserFields on User { id }
            "#,
        )
        .expect("Failed to emit");
        assert!(output.contains("type alias UserFields =\n    { id : String\n    }\n"));
        assert!(output.contains(
            "userFieldsDecoder : Decoder UserFields\nuserFieldsDecoder =\n    map (\\id -> { id = id })\n        (field \"id\" string)\n"
        ));
        assert!(output.contains(
            "qDocument =\n    \"query q { user(id: \\\"1\\\") { ...UserFields } } fragment UserFields on User { id }\"\n"
        ));
    }

    #[test]
    fn test_union_declared_once() {
        let output = emit(
            r#"
            query a { search(text: "x") { ... on Human { name } } }
            query b { search(text: "y") { ... on Human { name } } }
            "#,
        )
        .expect("Failed to emit");
        assert_eq!(output.matches("type SearchResult\n").count(), 1);
        assert!(output.contains("type SearchResult\n    = Human { name : Maybe String }\n"));
    }

    #[test]
    fn test_conflicting_union_selections() {
        let err = emit(
            r#"
            query a { search(text: "x") { ... on Human { name } } }
            query b { search(text: "y") { ... on Droid { name } } }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateDeclaration { name } if name == "SearchResult"));
    }

    #[test]
    fn test_enums_from_results_and_variables() {
        let output = emit(
            r#"query reviews($episode: Episode, $filter: ReviewFilter) {
                reviews(episode: $episode, filter: $filter) { stars }
                user(id: "1") { role }
            }"#,
        )
        .expect("Failed to emit");

        let episode = output.find("type Episode\n").expect("Episode");
        let status = output.find("type Status\n").expect("Status");
        let role = output.find("type Role\n").expect("Role");
        assert!(role < episode && episode < status);

        // Status and Role share ADMIN.
        assert!(output.contains("    = StatusActive\n    | StatusAdmin\n"));
        assert!(output.contains("    = RoleAdmin\n    | RoleMember\n"));
        assert!(output.contains("    = Newhope\n    | Empire\n    | Jedi\n"));
        assert!(output.contains(
            "( \"episode\", (Maybe.map encodeEpisode >> Maybe.withDefault Json.Encode.null) variables.episode )"
        ));
        assert!(output.contains(
            "( \"status\", (Maybe.map encodeStatus >> Maybe.withDefault Json.Encode.null) input.status )"
        ));
    }

    #[test]
    fn test_duplicate_type_alias() {
        let err = emit(
            r#"
            query user { user(id: "1") { id } }
            fragment user on User { id }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateDeclaration { name } if name == "User"));
    }

    #[test]
    fn test_operation_shadowing_json_decode() {
        let err = emit(r#"query map { user(id: "1") { id } }"#).unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateDeclaration { name } if name == "map"));
    }

    #[test]
    fn test_union_variant_clashes_with_alias() {
        let err = emit(
            r#"
            query q { search(text: "x") { ... on Human { name } } }
            fragment human on Human { name }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CodegenError::DuplicateDeclaration { name } if name == "Human"));
    }

    #[test]
    fn test_shape_params_avoid_top_level_names() {
        let output = emit(r#"query name { user(id: "1") { id name } }"#).expect("Failed to emit");
        assert!(output.contains("map (\\id name1 -> { id = id, name = name1 })"), "{output}");
    }

    #[test]
    fn test_typename_in_variant_gets_fresh_binder() {
        let output = emit(r#"query q { search(text: "x") { ... on Human { __typename name } } }"#)
            .expect("Failed to emit");
        assert_eq!(output.matches("(\\typename ->").count(), 1, "{output}");
        assert!(output.contains(
            "map (\\typename1 name -> Human { typename = typename1, name = name })"
        ));
    }

    #[test]
    fn test_request_params_avoid_top_level_names() {
        let output = emit(r#"query toMsg($id: ID!) { user(id: $id) { id } }"#).expect("Failed to emit");
        assert!(output.contains("toMsg variables toMsg1 =\n"));
        assert!(output.contains("Http.expectJson toMsg1 (field \"data\" toMsgDecoder)"));

        let output = emit(r#"query variables($id: ID!) { user(id: $id) { id } }"#)
            .expect("Failed to emit");
        assert!(output.contains("encodeVariablesVariables variables1 =\n"));
        assert!(output.contains("variables variables1 toMsg =\n"));
    }
}
