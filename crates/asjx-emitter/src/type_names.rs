//! ActionScript to Closure type name conversion.

use asjx_common::Token;

/// Global types and functions that are never package qualified. Matched
/// case-insensitively.
const BUILTIN_NAMES: &[&str] = &[
    "Array",
    "Boolean",
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "escape",
    "int",
    "isFinite",
    "isNaN",
    "isXMLName",
    "Number",
    "Object",
    "parseFloat",
    "parseInt",
    "String",
    "trace",
    "uint",
    "unescape",
    "Vector",
    "XML",
    "XMLList",
];

/// `Vector.<T>` or a built-in global name.
pub fn is_builtin_type(type_name: &str) -> bool {
    let is_vector = type_name.starts_with("Vector.<") && type_name.ends_with('>');
    is_vector
        || BUILTIN_NAMES
            .iter()
            .any(|builtin| builtin.eq_ignore_ascii_case(type_name))
}

/// Convert an ActionScript type name to the name used in Closure JSDoc.
///
/// `owning_package` qualifies user types; built-ins stay bare.
///
/// ```
/// use asjx_emitter::convert_type_name;
///
/// assert_eq!(convert_type_name("", ""), "*");
/// assert_eq!(convert_type_name("uint", "pkg"), "number");
/// assert_eq!(convert_type_name("Foo", "com.acme"), "com.acme.Foo");
/// assert_eq!(convert_type_name("Vector.<Foo>", "com.acme"), "Vector.<Foo>");
/// ```
pub fn convert_type_name(type_name: &str, owning_package: &str) -> String {
    let result = match type_name {
        "" => Token::AnyType.text().to_string(),
        "Boolean" | "String" | "Number" => type_name.to_lowercase(),
        "int" | "uint" => "number".to_string(),
        _ if !owning_package.is_empty() && !is_builtin_type(type_name) => {
            format!("{owning_package}.{type_name}")
        }
        _ => type_name.to_string(),
    };
    result.replace("String", "string")
}

#[cfg(test)]
#[path = "tests/type_names_tests.rs"]
mod tests;
