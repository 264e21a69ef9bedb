//! Helper vocabulary shared by templates and the Rust-side writers.
//!
//! The typed functions at the top are what the schema writer, route table
//! and scaffolder call directly. [`Helper`] exposes the same functions to
//! templates, taking and returning `serde_json::Value`s.

use heck::{ToKebabCase, ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde_json::Value;

use forge_ir::{Field, FieldType, ModifierKind};

pub fn snake(s: &str) -> String {
    s.to_snake_case()
}

pub fn kebab(s: &str) -> String {
    s.to_kebab_case()
}

pub fn lower_camel(s: &str) -> String {
    s.to_lower_camel_case()
}

pub fn pascal(s: &str) -> String {
    s.to_upper_camel_case()
}

/// English plural of the last word: `y` becomes `ies`, a trailing `s`,
/// `x`, `ch` or `sh` takes `es`, anything else takes `s`.
pub fn plural(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    if let Some(stem) = s.strip_suffix('y') {
        return format!("{stem}ies");
    }
    if ["s", "x", "ch", "sh"].iter().any(|suffix| s.ends_with(suffix)) {
        return format!("{s}es");
    }
    format!("{s}s")
}

/// Table name for a resource: `Product` → `products`.
pub fn table_name(resource: &str) -> String {
    plural(&snake(resource))
}

/// Double-quoted string literal for the generated source.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Host-language type of a field kind.
pub fn go_type(ty: FieldType) -> &'static str {
    match ty {
        FieldType::Uuid => "uuid.UUID",
        FieldType::String
        | FieldType::Text
        | FieldType::Enum
        | FieldType::Slug
        | FieldType::Email
        | FieldType::Url => "string",
        FieldType::Int => "int",
        FieldType::BigInt => "int64",
        FieldType::Decimal => "decimal.Decimal",
        FieldType::Bool => "bool",
        FieldType::DateTime | FieldType::Date => "time.Time",
        FieldType::Json => "json.RawMessage",
    }
}

/// Host-language type for a column that may be NULL: a pointer unless the
/// type already has a nil value.
pub fn go_type_nullable(ty: FieldType, nullable: bool) -> String {
    if nullable && ty != FieldType::Json {
        format!("*{}", go_type(ty))
    } else {
        go_type(ty).to_string()
    }
}

/// Column type of a field kind without modifiers.
pub fn sql_type(ty: FieldType) -> &'static str {
    match ty {
        FieldType::Uuid => "uuid",
        FieldType::String | FieldType::Slug | FieldType::Email | FieldType::Url => "varchar",
        FieldType::Text | FieldType::Enum => "text",
        FieldType::Int => "integer",
        FieldType::BigInt => "bigint",
        FieldType::Decimal => "numeric",
        FieldType::Bool => "boolean",
        FieldType::DateTime => "timestamptz",
        FieldType::Date => "date",
        FieldType::Json => "jsonb",
    }
}

/// Default length of a bounded text column.
pub const DEFAULT_VARCHAR_LEN: i64 = 255;

/// Column type tightened by `MaxLen` for string-like kinds.
pub fn sql_type_mod(ty: FieldType, max_len: Option<i64>) -> String {
    match (ty, max_len) {
        (ty, Some(len)) if ty.is_string_like() => format!("varchar({len})"),
        (FieldType::String | FieldType::Slug | FieldType::Email | FieldType::Url, None) => {
            format!("varchar({DEFAULT_VARCHAR_LEN})")
        }
        (ty, _) => sql_type(ty).to_string(),
    }
}

/// `MaxLen` of a field, if declared.
pub fn max_len(field: &Field) -> Option<i64> {
    field
        .modifier_value(ModifierKind::MaxLen)
        .and_then(forge_ir::Literal::as_int)
}

/// A template helper.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Helper {
    Snake,
    Kebab,
    LowerCamel,
    Pascal,
    Plural,
    Upper,
    Lower,
    Quote,
    Join,
    Eq,
    Ne,
    Not,
    And,
    Or,
    GoType,
    GoTypeMod,
    SqlType,
    SqlTypeMod,
    HasModifier,
    GetModifierValue,
    IsRequired,
    IsFilterable,
    IsSortable,
    IsSearchable,
    IsStringLike,
    IsNumeric,
    IsTemporal,
}

const HELPERS: &[(&str, Helper)] = &[
    ("snake", Helper::Snake),
    ("kebab", Helper::Kebab),
    ("lower_camel", Helper::LowerCamel),
    ("pascal", Helper::Pascal),
    ("plural", Helper::Plural),
    ("upper", Helper::Upper),
    ("lower", Helper::Lower),
    ("quote", Helper::Quote),
    ("join", Helper::Join),
    ("eq", Helper::Eq),
    ("ne", Helper::Ne),
    ("not", Helper::Not),
    ("and", Helper::And),
    ("or", Helper::Or),
    ("go_type", Helper::GoType),
    ("go_type_mod", Helper::GoTypeMod),
    ("sql_type", Helper::SqlType),
    ("sql_type_mod", Helper::SqlTypeMod),
    ("has_modifier", Helper::HasModifier),
    ("get_modifier_value", Helper::GetModifierValue),
    ("is_required", Helper::IsRequired),
    ("is_filterable", Helper::IsFilterable),
    ("is_sortable", Helper::IsSortable),
    ("is_searchable", Helper::IsSearchable),
    ("is_string_like", Helper::IsStringLike),
    ("is_numeric", Helper::IsNumeric),
    ("is_temporal", Helper::IsTemporal),
];

impl Helper {
    pub fn lookup(name: &str) -> Option<Helper> {
        HELPERS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, helper)| *helper)
    }

    pub fn name(self) -> &'static str {
        HELPERS
            .iter()
            .find(|(_, h)| *h == self)
            .map_or("?", |(n, _)| *n)
    }

    /// Apply the helper to evaluated arguments.
    pub fn call(self, args: &[Value]) -> Result<Value, String> {
        match self {
            Helper::Snake => string_fn(args, snake),
            Helper::Kebab => string_fn(args, kebab),
            Helper::LowerCamel => string_fn(args, lower_camel),
            Helper::Pascal => string_fn(args, pascal),
            Helper::Plural => string_fn(args, plural),
            Helper::Upper => string_fn(args, str::to_uppercase),
            Helper::Lower => string_fn(args, str::to_lowercase),
            Helper::Quote => string_fn(args, quote),
            Helper::Join => {
                let [list, sep] = exactly::<2>(args)?;
                let sep = as_str(sep)?;
                let items = list.as_array().ok_or("expected a list")?;
                let parts: Vec<String> = items.iter().map(display).collect();
                Ok(Value::String(parts.join(sep)))
            }
            Helper::Eq => {
                let [a, b] = exactly::<2>(args)?;
                Ok(Value::Bool(a == b))
            }
            Helper::Ne => {
                let [a, b] = exactly::<2>(args)?;
                Ok(Value::Bool(a != b))
            }
            Helper::Not => {
                let [a] = exactly::<1>(args)?;
                Ok(Value::Bool(!truthy(a)))
            }
            Helper::And => Ok(Value::Bool(non_empty(args)?.iter().all(truthy))),
            Helper::Or => Ok(Value::Bool(non_empty(args)?.iter().any(truthy))),
            Helper::GoType => {
                let [field] = exactly::<1>(args)?;
                Ok(Value::String(go_type(field_type(field)?).to_string()))
            }
            Helper::GoTypeMod => {
                let [field] = exactly::<1>(args)?;
                let nullable = !modifier_present(field, ModifierKind::Required)?
                    && !modifier_present(field, ModifierKind::PrimaryKey)?;
                Ok(Value::String(go_type_nullable(field_type(field)?, nullable)))
            }
            Helper::SqlType => {
                let [field] = exactly::<1>(args)?;
                Ok(Value::String(sql_type(field_type(field)?).to_string()))
            }
            Helper::SqlTypeMod => {
                let [field] = exactly::<1>(args)?;
                let len = modifier_value(field, ModifierKind::MaxLen)?.and_then(Value::as_i64);
                Ok(Value::String(sql_type_mod(field_type(field)?, len)))
            }
            Helper::HasModifier => {
                let [field, kind] = exactly::<2>(args)?;
                Ok(Value::Bool(modifier_present(field, modifier_kind(kind)?)?))
            }
            Helper::GetModifierValue => {
                let [field, kind] = exactly::<2>(args)?;
                Ok(modifier_value(field, modifier_kind(kind)?)?
                    .cloned()
                    .unwrap_or(Value::Null))
            }
            Helper::IsRequired => flag(args, ModifierKind::Required),
            Helper::IsFilterable => flag(args, ModifierKind::Filterable),
            Helper::IsSortable => flag(args, ModifierKind::Sortable),
            Helper::IsSearchable => flag(args, ModifierKind::Searchable),
            Helper::IsStringLike => type_test(args, FieldType::is_string_like),
            Helper::IsNumeric => type_test(args, FieldType::is_numeric),
            Helper::IsTemporal => type_test(args, FieldType::is_temporal),
        }
    }
}

/// Template truthiness: `null`, `false`, `0`, empty strings, lists and
/// objects are false.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Text a value renders as.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn exactly<const N: usize>(args: &[Value]) -> Result<&[Value; N], String> {
    args.try_into()
        .map_err(|_| format!("expected {N} argument(s), got {}", args.len()))
}

fn non_empty(args: &[Value]) -> Result<&[Value], String> {
    if args.is_empty() {
        Err("expected at least one argument".to_string())
    } else {
        Ok(args)
    }
}

fn as_str(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected a string, got {}", type_name(value)))
}

fn string_fn<R: Into<String>>(args: &[Value], f: impl Fn(&str) -> R) -> Result<Value, String> {
    let [arg] = exactly::<1>(args)?;
    Ok(Value::String(f(as_str(arg)?).into()))
}

/// Field kind of a field object (`{"type": "String", ...}`) or a bare kind
/// name.
fn field_type(value: &Value) -> Result<FieldType, String> {
    let name = match value {
        Value::Object(map) => map.get("type").and_then(Value::as_str),
        Value::String(s) => Some(s.as_str()),
        _ => None,
    }
    .ok_or_else(|| format!("expected a field, got {}", type_name(value)))?;
    FieldType::from_constructor(name).ok_or_else(|| format!("unknown field type `{name}`"))
}

fn modifier_kind(value: &Value) -> Result<ModifierKind, String> {
    let name = as_str(value)?;
    ModifierKind::from_method(name).ok_or_else(|| format!("unknown modifier `{name}`"))
}

/// Modifier list of a field object, or the list itself.
fn modifiers(value: &Value) -> Result<&[Value], String> {
    let list = match value {
        Value::Object(map) => map.get("modifiers"),
        Value::Array(_) => Some(value),
        _ => None,
    };
    list.and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| format!("expected a field or modifier list, got {}", type_name(value)))
}

fn find_modifier(value: &Value, kind: ModifierKind) -> Result<Option<&Value>, String> {
    Ok(modifiers(value)?
        .iter()
        .find(|m| m.get("kind").and_then(Value::as_str) == Some(kind.as_str())))
}

fn modifier_present(value: &Value, kind: ModifierKind) -> Result<bool, String> {
    Ok(find_modifier(value, kind)?.is_some())
}

fn modifier_value(value: &Value, kind: ModifierKind) -> Result<Option<&Value>, String> {
    Ok(find_modifier(value, kind)?
        .and_then(|m| m.get("value"))
        .filter(|v| !v.is_null()))
}

fn flag(args: &[Value], kind: ModifierKind) -> Result<Value, String> {
    let [field] = exactly::<1>(args)?;
    Ok(Value::Bool(modifier_present(field, kind)?))
}

fn type_test(args: &[Value], test: fn(FieldType) -> bool) -> Result<Value, String> {
    let [field] = exactly::<1>(args)?;
    Ok(Value::Bool(test(field_type(field)?)))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
