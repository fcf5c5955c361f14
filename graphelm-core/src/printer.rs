//! Compact GraphQL printer.
//!
//! Renders operations back to single-line GraphQL text so it can be embedded
//! in generated modules and sent to the server as-is.

use crate::document::{
    FragmentDefinition, OperationDefinition, Selection, SelectionSet, Value,
};
use crate::fragments::FragmentIndex;

/// Prints an operation followed by every fragment it spreads transitively.
#[must_use]
pub fn print_operation_document(op: &OperationDefinition, fragments: &FragmentIndex) -> String {
    let mut out = print_operation(op);
    for fragment in fragments.transitive_spreads(&op.selection_set) {
        out.push(' ');
        out.push_str(&print_fragment(fragment));
    }
    out
}

/// Prints a single operation.
#[must_use]
pub fn print_operation(op: &OperationDefinition) -> String {
    let mut out = String::from(op.kind.keyword());

    if let Some(name) = &op.name {
        out.push(' ');
        out.push_str(name);
    }

    if !op.variables.is_empty() {
        let vars: Vec<String> = op
            .variables
            .iter()
            .map(|var| match &var.default_value {
                Some(default) => format!("${}: {} = {}", var.name, var.var_type, print_value(default)),
                None => format!("${}: {}", var.name, var.var_type),
            })
            .collect();
        out.push_str(&format!("({})", vars.join(", ")));
    }

    out.push(' ');
    print_selection_set(&op.selection_set, &mut out);
    out
}

/// Prints a fragment definition.
#[must_use]
pub fn print_fragment(fragment: &FragmentDefinition) -> String {
    let mut out = format!("fragment {} on {} ", fragment.name, fragment.type_condition);
    print_selection_set(&fragment.selection_set, &mut out);
    out
}

fn print_selection_set(set: &SelectionSet, out: &mut String) {
    out.push('{');
    for selection in &set.items {
        out.push(' ');
        match selection {
            Selection::Field(field) => {
                if let Some(alias) = &field.alias {
                    out.push_str(alias);
                    out.push_str(": ");
                }
                out.push_str(&field.name);
                if !field.arguments.is_empty() {
                    let args: Vec<String> = field
                        .arguments
                        .iter()
                        .map(|(name, value)| format!("{name}: {}", print_value(value)))
                        .collect();
                    out.push_str(&format!("({})", args.join(", ")));
                }
                if let Some(nested) = &field.selection_set {
                    out.push(' ');
                    print_selection_set(nested, out);
                }
            }
            Selection::FragmentSpread(spread) => {
                out.push_str("...");
                out.push_str(&spread.fragment_name);
            }
            Selection::InlineFragment(inline) => {
                out.push_str("...");
                if let Some(type_condition) = &inline.type_condition {
                    out.push_str(" on ");
                    out.push_str(type_condition);
                }
                out.push(' ');
                print_selection_set(&inline.selection_set, out);
            }
        }
    }
    out.push_str(" }");
}

/// Prints an input value literal.
#[must_use]
pub fn print_value(value: &Value) -> String {
    match value {
        Value::Variable(name) => format!("${name}"),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => {
            let text = f.to_string();
            if text.contains(['.', 'e', 'E']) {
                text
            } else {
                format!("{text}.0")
            }
        }
        Value::String(s) => {
            let escaped = s
                .replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n");
            format!("\"{escaped}\"")
        }
        Value::Boolean(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Enum(name) => name.clone(),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(print_value).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(name, value)| format!("{name}: {}", print_value(value)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}
