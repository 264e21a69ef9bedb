//! Template contexts.
//!
//! Every template receives a JSON object holding the global emitter
//! settings, the full resource list and, for per-resource templates, the
//! resource being rendered. Resource values carry the IR as written plus the
//! derived names (table, columns, identifiers) every template would
//! otherwise recompute.

use serde_json::{json, Map, Value};

use forge_ir::{
    Field, FieldType, Literal, ModifierKind, Modifier, Relationship, RelationshipKind, Resource,
};

use crate::helpers::{
    go_type, go_type_nullable, kebab, lower_camel, max_len, pascal, plural, quote, snake,
    sql_type, sql_type_mod, table_name,
};
use crate::routes::{resource_routes, Route};

/// Settings shared by every emitted file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitContext {
    /// Module path of the generated project (`github.com/acme/shop`).
    pub module: String,
    /// Generated tree, relative to the project root.
    pub generated_dir: String,
    /// Resource sources, relative to the project root.
    pub resources_dir: String,
    /// Migration directory, relative to the project root.
    pub migrations_dir: String,
    /// Database used by the migration engine to compute diffs.
    pub dev_url: String,
    /// Prefix of every API route.
    pub api_prefix: String,
}

impl EmitContext {
    pub fn new(module: impl Into<String>) -> Self {
        EmitContext {
            module: module.into(),
            generated_dir: "gen".to_string(),
            resources_dir: "resources".to_string(),
            migrations_dir: "migrations".to_string(),
            dev_url: "docker://postgres/16/dev".to_string(),
            api_prefix: "/api/v1".to_string(),
        }
    }

    /// Import path of a generated package.
    pub fn gen_import(&self, package: &str) -> String {
        format!("{}/{}/{package}", self.module, self.generated_dir)
    }

    fn global(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("module".into(), json!(self.module));
        map.insert("gen".into(), json!(format!("{}/{}", self.module, self.generated_dir)));
        map.insert("generated_dir".into(), json!(self.generated_dir));
        map.insert("resources_dir".into(), json!(self.resources_dir));
        map.insert("migrations_dir".into(), json!(self.migrations_dir));
        map.insert("dev_url".into(), json!(self.dev_url));
        map.insert("api_prefix".into(), json!(self.api_prefix));
        map.insert("error_codes".into(), error_codes());
        map
    }
}

/// The runtime error taxonomy of generated code: identifier, code and HTTP
/// status constant.
pub const RUNTIME_ERRORS: &[(&str, &str, &str)] = &[
    ("NotFound", "not_found", "StatusNotFound"),
    ("UniqueViolation", "unique_violation", "StatusConflict"),
    ("ForeignKeyViolation", "foreign_key_violation", "StatusBadRequest"),
    ("NotNullViolation", "not_null_violation", "StatusBadRequest"),
    ("CheckViolation", "check_violation", "StatusBadRequest"),
    ("Unauthorized", "unauthorized", "StatusUnauthorized"),
    ("Forbidden", "forbidden", "StatusForbidden"),
    ("BadRequest", "bad_request", "StatusBadRequest"),
    ("InternalError", "internal_error", "StatusInternalServerError"),
    ("ValidationError", "validation_error", "StatusUnprocessableEntity"),
];

fn error_codes() -> Value {
    RUNTIME_ERRORS
        .iter()
        .map(|(ident, code, status)| json!({"ident": ident, "code": code, "status": status}))
        .collect()
}

/// Context for templates rendered once for the whole project.
pub fn global_context(cx: &EmitContext, resources: &[Resource]) -> Value {
    let mut map = cx.global();
    map.insert(
        "resources".into(),
        resources.iter().map(|r| resource_value(cx, resources, r)).collect(),
    );
    Value::Object(map)
}

/// Context for a per-resource template.
pub fn resource_context(cx: &EmitContext, resources: &[Resource], resource: &Resource) -> Value {
    let mut map = cx.global();
    map.insert(
        "resources".into(),
        resources.iter().map(|r| resource_value(cx, resources, r)).collect(),
    );
    map.insert("resource".into(), resource_value(cx, resources, resource));
    Value::Object(map)
}

/// Primary key of a resource as the generated code sees it.
struct PrimaryKey {
    name: String,
    column: String,
    ty: FieldType,
    implicit: bool,
}

fn primary_key(resource: &Resource) -> PrimaryKey {
    match resource.primary_key() {
        Some(field) => PrimaryKey {
            name: field.name.clone(),
            column: snake(&field.name),
            ty: field.ty,
            implicit: false,
        },
        None => PrimaryKey {
            name: "ID".to_string(),
            column: "id".to_string(),
            ty: FieldType::Uuid,
            implicit: true,
        },
    }
}

/// The key column a reference to a table points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferencedKey {
    pub column: String,
    pub ty: FieldType,
    /// Column type, tightened by the key field's `MaxLen`.
    pub sql_type: String,
}

/// Key of the resource stored in `table`. Tables no resource declares are
/// taken to have the implicit `id uuid` key.
pub fn referenced_key(resources: &[Resource], table: &str) -> ReferencedKey {
    let key = resources
        .iter()
        .find(|r| table_name(&r.name) == table)
        .and_then(Resource::primary_key);
    match key {
        Some(field) => ReferencedKey {
            column: snake(&field.name),
            ty: field.ty,
            sql_type: sql_type_mod(field.ty, max_len(field)),
        },
        None => ReferencedKey {
            column: "id".to_string(),
            ty: FieldType::Uuid,
            sql_type: sql_type(FieldType::Uuid).to_string(),
        },
    }
}

/// Foreign-key column of a `BelongsTo` relationship.
pub fn foreign_key_column(relationship: &Relationship) -> String {
    format!("{}_id", snake(&relationship.name))
}

/// Column names of a resource's table, in model order.
pub fn columns(resource: &Resource) -> Vec<String> {
    let pk = primary_key(resource);
    let mut columns = Vec::new();
    if pk.implicit {
        columns.push(pk.column);
    }
    columns.extend(resource.fields.iter().map(|f| snake(&f.name)));
    columns.extend(
        resource
            .relationships
            .iter()
            .filter(|r| r.kind == RelationshipKind::BelongsTo)
            .map(foreign_key_column),
    );
    if resource.has_timestamps {
        columns.push("created_at".to_string());
        columns.push("updated_at".to_string());
    }
    if resource.options.soft_delete {
        columns.push("deleted_at".to_string());
    }
    columns
}

fn resource_value(cx: &EmitContext, resources: &[Resource], resource: &Resource) -> Value {
    let name = &resource.name;
    let table = table_name(name);
    let pk = primary_key(resource);
    let pk_is_field = |f: &Field| !pk.implicit && f.name == pk.name;

    let fields: Vec<Value> = resource
        .fields
        .iter()
        .map(|f| field_value(resource, f, pk_is_field(f)))
        .collect();

    let writable: Vec<&Field> = resource
        .fields
        .iter()
        .filter(|f| !pk_is_field(f) || f.ty != FieldType::Uuid)
        .collect();
    let create_fields: Vec<Value> = writable
        .iter()
        .map(|f| json!(f.name))
        .collect();
    let update_fields: Vec<Value> = writable
        .iter()
        .filter(|f| !pk_is_field(f) && !f.has_modifier(ModifierKind::Immutable))
        .map(|f| json!(f.name))
        .collect();

    let belongs_to: Vec<&Relationship> = resource
        .relationships
        .iter()
        .filter(|r| r.kind == RelationshipKind::BelongsTo)
        .collect();

    let mut insert_columns = Vec::new();
    let mut insert_args = Vec::new();
    if pk.implicit || pk.ty == FieldType::Uuid {
        insert_columns.push(pk.column.clone());
        insert_args.push(format!("row.{}", pk.name));
    }
    for field in &writable {
        insert_columns.push(snake(&field.name));
        insert_args.push(format!("row.{}", field.name));
    }
    for rel in &belongs_to {
        insert_columns.push(foreign_key_column(rel));
        insert_args.push(format!("row.{}ID", rel.name));
    }
    let placeholders: Vec<String> = (1..=insert_columns.len()).map(|i| format!("${i}")).collect();
    let all_columns = columns(resource).join(", ");
    let insert_sql = format!(
        "INSERT INTO {table} ({}) VALUES ({}) RETURNING {all_columns}",
        insert_columns.join(", "),
        placeholders.join(", ")
    );

    let mut set_columns: Vec<String> = update_fields
        .iter()
        .filter_map(Value::as_str)
        .map(snake)
        .chain(belongs_to.iter().map(|r| foreign_key_column(r)))
        .collect();
    let mut update_args: Vec<String> = update_fields
        .iter()
        .filter_map(Value::as_str)
        .map(|f| format!("row.{f}"))
        .chain(belongs_to.iter().map(|r| format!("row.{}ID", r.name)))
        .collect();
    let mut assignments: Vec<String> = set_columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{c} = ${}", i + 1))
        .collect();
    if resource.has_timestamps {
        assignments.push("updated_at = now()".to_string());
    }
    if assignments.is_empty() {
        assignments.push(format!("{0} = {0}", pk.column));
    }
    set_columns.push(pk.column.clone());
    update_args.push(format!("row.{}", pk.name));
    let update_sql = format!(
        "UPDATE {table} SET {} WHERE {} = ${} RETURNING {all_columns}",
        assignments.join(", "),
        pk.column,
        set_columns.len()
    );

    let permissions: Vec<Value> = resource
        .options
        .permissions
        .iter()
        .map(|(op, roles)| json!({"op": op.as_str(), "roles": roles.iter().collect::<Vec<_>>()}))
        .collect();

    let mut jobs: Vec<&forge_ir::JobRef> = Vec::new();
    for job in resource
        .options
        .hooks
        .after_create
        .iter()
        .chain(&resource.options.hooks.after_update)
    {
        if !jobs.iter().any(|j| j.kind == job.kind) {
            jobs.push(job);
        }
    }

    let routes: Vec<Value> = resource_routes(cx, resource)
        .iter()
        .map(route_value)
        .collect();

    json!({
        "name": name,
        "snake": snake(name),
        "kebab": kebab(name),
        "camel": lower_camel(name),
        "plural": plural(name),
        "package": snake(name).replace('_', ""),
        "table": table,
        "route": format!("{}/{}", cx.api_prefix, plural(&kebab(name))),
        "file": resource.file.display().to_string(),
        "line": resource.line,
        "fields": fields,
        "create_fields": create_fields,
        "update_fields": update_fields,
        "relationships": resource
            .relationships
            .iter()
            .map(|r| relationship_value(resources, r))
            .collect::<Vec<_>>(),
        "belongs_to": belongs_to
            .iter()
            .map(|r| relationship_value(resources, r))
            .collect::<Vec<_>>(),
        "columns": columns(resource),
        "insert_sql": insert_sql,
        "insert_args": insert_args,
        "update_sql": update_sql,
        "update_args": update_args,
        "pk": {
            "name": pk.name,
            "column": pk.column,
            "go_type": go_type(pk.ty),
            "implicit": pk.implicit,
            "generated": pk.ty == FieldType::Uuid,
            "parse": parse_expr(pk.ty),
        },
        "has_timestamps": resource.has_timestamps,
        "soft_delete": resource.options.soft_delete,
        "auditable": resource.options.auditable,
        "tenant_scoped": resource.options.tenant_scoped,
        "searchable": resource.options.searchable,
        "permissions": permissions,
        "hooks": {
            "after_create": resource.options.hooks.after_create.iter().map(job_value).collect::<Vec<_>>(),
            "after_update": resource.options.hooks.after_update.iter().map(job_value).collect::<Vec<_>>(),
        },
        "has_hooks": !resource.options.hooks.is_empty(),
        "jobs": jobs.into_iter().map(job_value).collect::<Vec<_>>(),
        "routes": routes,
    })
}

fn field_value(resource: &Resource, field: &Field, is_pk: bool) -> Value {
    let nullable = !is_pk && !field.is_required();
    let enum_type = format!("{}{}", resource.name, field.name);
    let (base, ext_base) = if field.ty == FieldType::Enum {
        (enum_type.clone(), format!("models.{enum_type}"))
    } else {
        (go_type(field.ty).to_string(), go_type(field.ty).to_string())
    };
    let pointer = nullable && field.ty != FieldType::Json;
    let wrap = |t: &str| if pointer { format!("*{t}") } else { t.to_string() };

    let enum_values: Vec<Value> = field
        .enum_values
        .iter()
        .map(|v| json!({"value": v, "ident": format!("{enum_type}{}", pascal(v))}))
        .collect();
    let min_len = field
        .modifier_value(ModifierKind::MinLen)
        .and_then(Literal::as_int);
    let required_check = field.is_required() && field.ty != FieldType::Bool;
    let validated = required_check
        || max_len(field).is_some()
        || min_len.is_some()
        || field.ty == FieldType::Enum
        || field.ty == FieldType::Email;

    json!({
        "name": field.name,
        "type": field.ty.as_str(),
        "modifiers": field.modifiers.iter().map(modifier_value).collect::<Vec<_>>(),
        "enum_values": field.enum_values,
        "enum_type": if field.ty == FieldType::Enum { Value::from(enum_type) } else { Value::Null },
        "enum": enum_values,
        "column": snake(&field.name),
        "json": lower_camel(&field.name),
        "label": field
            .modifier_value(ModifierKind::Label)
            .and_then(Literal::as_str)
            .map_or_else(|| field.name.clone(), str::to_string),
        "placeholder": text_modifier(field, ModifierKind::Placeholder),
        "help": text_modifier(field, ModifierKind::Help),
        "is_pk": is_pk,
        "writable": !is_pk || field.ty != FieldType::Uuid,
        "updatable": !is_pk && !field.has_modifier(ModifierKind::Immutable),
        "required": field.is_required(),
        "nullable": nullable,
        "pointer": pointer,
        "base_type": base,
        "go_type": wrap(&base),
        "ext_base_type": ext_base,
        "ext_type": wrap(&ext_base),
        "nullable_go_type": go_type_nullable(field.ty, true),
        "max_len": max_len(field),
        "min_len": min_len,
        "required_check": required_check,
        "zero_test": zero_test(field.ty),
        "validated": validated,
        "sample": if nullable { Value::Null } else { sample(resource, field).map_or(Value::Null, Value::from) },
        "input": input_kind(field.ty),
        "parse": parse_expr(field.ty),
        "line": field.line,
    })
}

/// String argument of a modifier, empty when absent.
fn text_modifier(field: &Field, kind: ModifierKind) -> &str {
    field
        .modifier_value(kind)
        .and_then(Literal::as_str)
        .unwrap_or_default()
}

fn modifier_value(modifier: &Modifier) -> Value {
    json!({
        "kind": modifier.kind.as_str(),
        "value": modifier.value,
    })
}

fn relationship_value(resources: &[Resource], relationship: &Relationship) -> Value {
    let column = (relationship.kind == RelationshipKind::BelongsTo)
        .then(|| foreign_key_column(relationship));
    let key = referenced_key(resources, &relationship.table);
    json!({
        "name": relationship.name,
        "kind": relationship.kind.as_str(),
        "table": relationship.table,
        "on_delete": relationship.on_delete.sql(),
        "optional": relationship.optional,
        "eager": relationship.eager,
        "column": column,
        "json": format!("{}Id", lower_camel(&relationship.name)),
        "ref_column": key.column,
        "key_go_type": go_type(key.ty),
        "go_type": go_type_nullable(key.ty, relationship.optional),
        "line": relationship.line,
    })
}

fn job_value(job: &forge_ir::JobRef) -> Value {
    json!({"kind": job.kind, "queue": job.queue})
}

fn route_value(route: &Route) -> Value {
    let roles: Vec<String> = route.roles.iter().map(|r| quote(r)).collect();
    json!({
        "method": route.method.as_str(),
        "chi_method": route.method.chi_name(),
        "pattern": route.pattern,
        "path": route.path,
        "operation_id": route.operation_id,
        "op": route.operation.as_str(),
        "roles": roles.join(", "),
    })
}

/// Expression parsing a request string `s` into the Go type, returning
/// `(value, error)`; `None` for types that convert from a string directly.
fn parse_expr(ty: FieldType) -> Option<&'static str> {
    match ty {
        FieldType::Uuid => Some("uuid.Parse(s)"),
        FieldType::Int => Some("strconv.Atoi(s)"),
        FieldType::BigInt => Some("strconv.ParseInt(s, 10, 64)"),
        FieldType::Decimal => Some("decimal.NewFromString(s)"),
        FieldType::Bool => Some("strconv.ParseBool(s)"),
        FieldType::DateTime => Some("time.Parse(time.RFC3339, s)"),
        FieldType::Date => Some("time.Parse(time.DateOnly, s)"),
        FieldType::String
        | FieldType::Text
        | FieldType::Enum
        | FieldType::Slug
        | FieldType::Email
        | FieldType::Url
        | FieldType::Json => None,
    }
}

/// Expression testing a non-pointer value `x` for its zero value.
fn zero_test(ty: FieldType) -> &'static str {
    match ty {
        FieldType::Uuid => "x == uuid.Nil",
        FieldType::Int | FieldType::BigInt => "x == 0",
        FieldType::Decimal | FieldType::DateTime | FieldType::Date => "x.IsZero()",
        FieldType::Json => "len(x) == 0",
        FieldType::Bool => "!x",
        FieldType::String
        | FieldType::Text
        | FieldType::Enum
        | FieldType::Slug
        | FieldType::Email
        | FieldType::Url => "x == \"\"",
    }
}

/// A valid value for factories, as an expression in the factories package.
fn sample(resource: &Resource, field: &Field) -> Option<String> {
    let text = |s: &str| {
        let limit = max_len(field).and_then(|n| usize::try_from(n).ok());
        let s: String = match limit {
            Some(n) => s.chars().take(n).collect(),
            None => s.to_string(),
        };
        quote(&s)
    };
    Some(match field.ty {
        FieldType::Uuid => "uuid.New()".to_string(),
        FieldType::String | FieldType::Text => text(&format!("Sample {}", field.name)),
        FieldType::Slug => text("sample-slug"),
        FieldType::Email => text("user@example.com"),
        FieldType::Url => text("https://example.com"),
        FieldType::Int | FieldType::BigInt => "1".to_string(),
        FieldType::Decimal => "decimal.NewFromInt(1)".to_string(),
        FieldType::Bool => return None,
        FieldType::DateTime | FieldType::Date => "time.Now().UTC()".to_string(),
        FieldType::Json => "json.RawMessage(`{}`)".to_string(),
        FieldType::Enum => {
            let value = field
                .modifier_value(ModifierKind::Default)
                .and_then(Literal::as_str)
                .or_else(|| field.enum_values.first().map(String::as_str))?;
            format!("models.{}{}{}", resource.name, field.name, pascal(value))
        }
    })
}

/// Form control used by the scaffolded views.
fn input_kind(ty: FieldType) -> &'static str {
    match ty {
        FieldType::Text | FieldType::Json => "textarea",
        FieldType::Enum => "select",
        FieldType::Bool => "checkbox",
        FieldType::Int | FieldType::BigInt | FieldType::Decimal => "number",
        FieldType::DateTime => "datetime-local",
        FieldType::Date => "date",
        FieldType::Email => "email",
        FieldType::Url => "url",
        FieldType::Uuid | FieldType::String | FieldType::Slug => "text",
    }
}
