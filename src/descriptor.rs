//! The flat descriptor model handed to the serializer.
//!
//! These are owned value trees: a [`Type`] exclusively owns its optional
//! [`Template`], which exclusively owns its argument [`Type`]s. Field names
//! serialize in camelCase (`fullName`, `isReference`, ...) to match the
//! generator's JSON output.

use serde::{Deserialize, Serialize};

/// Descriptor of a resolved, possibly-indirect type.
///
/// `full_name` captures the original spelling, indirection and qualifiers
/// included; every other field describes the innermost type reached after
/// stripping all pointer/reference layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Type {
    /// Fully qualified spelling of the original type, e.g. `const Foo &`.
    /// Set once at the outermost resolution step, never overwritten.
    pub full_name: String,
    /// Fully qualified spelling of the innermost, unqualified type.
    pub base_name: String,
    /// Count of pointer/reference layers stripped during resolution.
    pub pointer: u32,
    /// Whether any stripped layer was a reference.
    pub is_reference: bool,
    /// Whether any stripped layer was an rvalue reference.
    pub is_move: bool,
    /// Const-qualification of the innermost type.
    pub is_const: bool,
    pub is_void: bool,
    pub is_builtin: bool,
    /// Present only when the innermost type is a class-template
    /// instantiation whose arguments are all type arguments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templ: Option<Template>,
}

/// Descriptor of a class-template instantiation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Qualified name of the template, without arguments.
    pub base_name: String,
    /// Qualified name including instantiated arguments.
    pub full_name: String,
    /// One resolved descriptor per template type-argument, in order.
    pub arguments: Vec<Type>,
}

/// A literal default-argument value.
///
/// Serializes untagged, so values appear as bare JSON scalars
/// (`8`, `true`, `"hi"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

/// Descriptor of one function parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Argument {
    /// The parameter's resolved static type.
    #[serde(flatten)]
    pub ty: Type,
    /// Qualified name of the parameter as spelled in the declaration.
    pub name: String,
    /// Whether the declaration syntactically has a default argument.
    pub has_default: bool,
    /// The recovered literal value; `None` when extraction failed. A
    /// parameter with `has_default` and no value has a default the
    /// generator cannot know.
    pub value: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_serializes_camel_case_without_empty_template() {
        let ty = Type {
            full_name: "const int &".into(),
            base_name: "int".into(),
            pointer: 1,
            is_reference: true,
            is_const: true,
            is_builtin: true,
            ..Type::default()
        };
        let json = serde_json::to_value(&ty).unwrap();
        assert_eq!(json["fullName"], "const int &");
        assert_eq!(json["isReference"], true);
        assert_eq!(json["isMove"], false);
        assert!(json.get("templ").is_none());
    }

    #[test]
    fn value_serializes_untagged() {
        assert_eq!(serde_json::to_string(&Value::Int(8)).unwrap(), "8");
        assert_eq!(serde_json::to_string(&Value::Bool(true)).unwrap(), "true");
        assert_eq!(
            serde_json::to_string(&Value::String("hi".into())).unwrap(),
            "\"hi\""
        );
    }

    #[test]
    fn absent_value_serializes_as_null() {
        let arg = Argument {
            name: "x".into(),
            has_default: true,
            ..Argument::default()
        };
        let json = serde_json::to_value(&arg).unwrap();
        assert_eq!(json["hasDefault"], true);
        assert!(json["value"].is_null());
    }
}
