use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{GenerateError, Result};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap()
});

const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Name of the primary key every generated model carries implicitly.
pub const PRIMARY_KEY: &str = "id";

/// Closed set of field type tags accepted in a field spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    Text,
    DateTime,
    Date,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        FieldType::String,
        FieldType::Integer,
        FieldType::Float,
        FieldType::Boolean,
        FieldType::Text,
        FieldType::DateTime,
        FieldType::Date,
    ];

    /// Canonical tag as written in a field spec.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            FieldType::String => "str",
            FieldType::Integer => "int",
            FieldType::Float => "float",
            FieldType::Boolean => "bool",
            FieldType::Text => "text",
            FieldType::DateTime => "datetime",
            FieldType::Date => "date",
        }
    }

    /// Python type annotation used in schemas.
    #[must_use]
    pub fn annotation(self) -> &'static str {
        match self {
            FieldType::String | FieldType::Text => "str",
            FieldType::Integer => "int",
            FieldType::Float => "float",
            FieldType::Boolean => "bool",
            FieldType::DateTime => "datetime",
            FieldType::Date => "date",
        }
    }

    /// SQLAlchemy column type used in models.
    #[must_use]
    pub fn column_type(self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Integer => "Integer",
            FieldType::Float => "Float",
            FieldType::Boolean => "Boolean",
            FieldType::Text => "Text",
            FieldType::DateTime => "DateTime",
            FieldType::Date => "Date",
        }
    }

    /// Python literal standing in for "no value" of this type.
    #[must_use]
    pub fn default_literal(self) -> &'static str {
        match self {
            FieldType::String | FieldType::Text => "\"\"",
            FieldType::Integer => "0",
            FieldType::Float => "0.0",
            FieldType::Boolean => "False",
            FieldType::DateTime | FieldType::Date => "None",
        }
    }

    /// `datetime` module symbol the annotation needs, if any.
    #[must_use]
    pub fn datetime_import(self) -> Option<&'static str> {
        match self {
            FieldType::DateTime => Some("datetime"),
            FieldType::Date => Some("date"),
            _ => None,
        }
    }

    fn allowed_tags() -> String {
        FieldType::ALL
            .iter()
            .map(|t| t.tag())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FieldType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "str" | "string" => Ok(FieldType::String),
            "int" | "integer" => Ok(FieldType::Integer),
            "float" => Ok(FieldType::Float),
            "bool" | "boolean" => Ok(FieldType::Boolean),
            "text" => Ok(FieldType::Text),
            "datetime" => Ok(FieldType::DateTime),
            "date" => Ok(FieldType::Date),
            _ => Err(()),
        }
    }
}

/// One parsed entity attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub type_tag: FieldType,
    pub optional: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub fn annotation(&self) -> &'static str {
        self.type_tag.annotation()
    }

    #[must_use]
    pub fn column_type(&self) -> &'static str {
        self.type_tag.column_type()
    }

    #[must_use]
    pub fn default_literal(&self) -> &'static str {
        self.type_tag.default_literal()
    }
}

/// Parse a comma-separated `name:type` list into ordered field descriptors.
///
/// A `?` suffix on the type marks the field optional (`nickname:str?`).
/// Blank input yields no fields.
///
/// # Errors
///
/// [`GenerateError::MalformedFieldSpec`] for a token without exactly one `:`,
/// an invalid, reserved or duplicated name; [`GenerateError::UnknownFieldType`]
/// for a type tag outside [`FieldType`].
pub fn parse_fields(spec: &str) -> Result<Vec<FieldDescriptor>> {
    if spec.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::new();
    let mut fields = Vec::new();
    for raw in spec.split(',') {
        let token = raw.trim();
        let field = parse_token(token)?;
        if !seen.insert(field.name.clone()) {
            return Err(GenerateError::malformed(
                token,
                format!("duplicate field name `{}`", field.name),
            ));
        }
        fields.push(field);
    }
    Ok(fields)
}

fn parse_token(token: &str) -> Result<FieldDescriptor> {
    let mut parts = token.split(':');
    let (name, ty) = match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(ty), None) => (name.trim(), ty.trim()),
        _ => {
            return Err(GenerateError::malformed(
                token,
                "expected exactly one `:` separating name and type",
            ))
        }
    };

    if !IDENTIFIER.is_match(name) {
        return Err(GenerateError::malformed(
            token,
            format!("`{name}` is not a valid identifier"),
        ));
    }
    if PYTHON_KEYWORDS.contains(&name) {
        return Err(GenerateError::malformed(
            token,
            format!("`{name}` is a reserved word"),
        ));
    }
    if name == PRIMARY_KEY {
        return Err(GenerateError::malformed(
            token,
            "`id` is generated implicitly as the primary key",
        ));
    }

    let (type_tag, optional) = match ty.strip_suffix('?') {
        Some(inner) => (inner, true),
        None => (ty, false),
    };
    let type_tag = type_tag
        .parse::<FieldType>()
        .map_err(|()| GenerateError::UnknownFieldType {
            token: token.to_string(),
            type_tag: type_tag.to_string(),
            allowed: FieldType::allowed_tags(),
        })?;

    Ok(FieldDescriptor {
        name: name.to_string(),
        type_tag,
        optional,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let fields = parse_fields("name:str,price:float,in_stock:bool").unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["name", "price", "in_stock"]);
        assert_eq!(fields[1].type_tag, FieldType::Float);
        assert!(fields.iter().all(|f| !f.optional));
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_fields("").unwrap().is_empty());
        assert!(parse_fields("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_trims_whitespace_and_aliases() {
        let fields = parse_fields(" title : string , views:integer").unwrap();
        assert_eq!(fields[0].name, "title");
        assert_eq!(fields[0].type_tag, FieldType::String);
        assert_eq!(fields[1].type_tag, FieldType::Integer);
    }

    #[test]
    fn test_optional_suffix() {
        let fields = parse_fields("nickname:str?,born:date").unwrap();
        assert!(fields[0].optional);
        assert!(!fields[1].optional);
    }

    #[test]
    fn test_missing_colon_is_malformed() {
        let err = parse_fields("name:str,price").unwrap_err();
        assert_eq!(err.kind(), "malformed_field_spec");
        assert!(err.to_string().contains("`price`"));
    }

    #[test]
    fn test_two_colons_is_malformed() {
        let err = parse_fields("name:str:extra").unwrap_err();
        assert!(matches!(err, GenerateError::MalformedFieldSpec { ref token, .. } if token == "name:str:extra"));
    }

    #[test]
    fn test_trailing_comma_is_malformed() {
        assert_eq!(parse_fields("name:str,").unwrap_err().kind(), "malformed_field_spec");
    }

    #[test]
    fn test_unknown_type_lists_allowed_set() {
        let err = parse_fields("name:varchar").unwrap_err();
        match err {
            GenerateError::UnknownFieldType {
                token,
                type_tag,
                allowed,
            } => {
                assert_eq!(token, "name:varchar");
                assert_eq!(type_tag, "varchar");
                assert!(allowed.contains("datetime"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = parse_fields("name:str,name:text").unwrap_err();
        assert_eq!(err.kind(), "malformed_field_spec");
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(parse_fields("Name:str,name:str").unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_and_reserved_names() {
        assert_eq!(parse_fields("2fast:int").unwrap_err().kind(), "malformed_field_spec");
        assert_eq!(parse_fields("class:str").unwrap_err().kind(), "malformed_field_spec");
        assert_eq!(parse_fields("id:int").unwrap_err().kind(), "malformed_field_spec");
    }

    #[test]
    fn test_type_mapping() {
        assert_eq!(FieldType::Text.annotation(), "str");
        assert_eq!(FieldType::Text.column_type(), "Text");
        assert_eq!(FieldType::Boolean.default_literal(), "False");
        assert_eq!(FieldType::DateTime.datetime_import(), Some("datetime"));
        assert_eq!(FieldType::Float.datetime_import(), None);
        for ty in FieldType::ALL {
            assert_eq!(ty.tag().parse::<FieldType>(), Ok(ty));
        }
    }
}
