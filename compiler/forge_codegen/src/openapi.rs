//! OpenAPI 3.1 document derived from the route table.

use serde_json::{json, Map, Value};

use forge_ir::{Field, FieldType, ModifierKind, Operation, RelationshipKind, Resource};

use crate::context::{foreign_key_column, EmitContext};
use crate::error::EmitError;
use crate::helpers::{lower_camel, max_len, snake};
use crate::pagination::{link_header, Cursor};
use crate::routes::{resource_routes, Route};

pub const OPENAPI_VERSION: &str = "3.1.0";

/// Serialization of an exported document.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
}

impl ExportFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "json" => Some(ExportFormat::Json),
            "yaml" | "yml" => Some(ExportFormat::Yaml),
            _ => None,
        }
    }
}

/// Build the document for `resources`.
pub fn document(cx: &EmitContext, title: &str, resources: &[Resource]) -> Value {
    let mut paths = Map::new();
    let mut schemas = Map::new();
    schemas.insert("Error".into(), error_schema());
    schemas.insert("Pagination".into(), pagination_schema());

    for resource in resources {
        let (output, create, update) = resource_schemas(resource);
        schemas.insert(resource.name.clone(), output);
        schemas.insert(format!("Create{}", resource.name), create);
        schemas.insert(format!("Update{}", resource.name), update);

        for route in resource_routes(cx, resource) {
            let item = paths
                .entry(route.path.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(item) = item {
                item.insert(
                    route.method.as_str().to_lowercase(),
                    operation(resource, &route),
                );
            }
        }
    }

    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": title,
            "version": "1.0.0",
        },
        "paths": paths,
        "components": {
            "schemas": schemas,
            "responses": {
                "Error": {
                    "description": "Error",
                    "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Error"}}},
                },
            },
        },
    })
}

/// Serialize `document` as JSON or YAML.
pub fn export(document: &Value, format: ExportFormat) -> Result<String, EmitError> {
    Ok(match format {
        ExportFormat::Json => {
            let mut text = serde_json::to_string_pretty(document)?;
            text.push('\n');
            text
        }
        ExportFormat::Yaml => serde_yaml::to_string(document)?,
    })
}

fn schema_ref(name: &str) -> Value {
    json!({"$ref": format!("#/components/schemas/{name}")})
}

fn operation(resource: &Resource, route: &Route) -> Value {
    let mut op = Map::new();
    op.insert("operationId".into(), json!(route.operation_id));
    op.insert("tags".into(), json!([resource.name]));
    op.insert(
        "summary".into(),
        json!(format!("{} {}", route.operation.as_str(), resource.name)),
    );

    let mut parameters = Vec::new();
    if route.has_id() {
        parameters.push(json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": pk_schema(resource),
        }));
    }
    if route.operation == Operation::List {
        parameters.extend(list_parameters(resource));
    }
    if !parameters.is_empty() {
        op.insert("parameters".into(), Value::Array(parameters));
    }

    let body = |schema: String| {
        json!({
            "required": true,
            "content": {"application/json": {"schema": schema_ref(&schema)}},
        })
    };
    match route.operation {
        Operation::Create => {
            op.insert("requestBody".into(), body(format!("Create{}", resource.name)));
        }
        Operation::Update => {
            op.insert("requestBody".into(), body(format!("Update{}", resource.name)));
        }
        _ => {}
    }

    let single = json!({
        "description": resource.name,
        "content": {"application/json": {"schema": schema_ref(&resource.name)}},
    });
    let error = json!({"$ref": "#/components/responses/Error"});
    let mut responses = Map::new();
    match route.operation {
        Operation::List => {
            let example_cursor = Cursor::new("", "00000000-0000-0000-0000-000000000000");
            let example_link = link_header(&route.path, &example_cursor, true);
            responses.insert(
                "200".into(),
                json!({
                    "description": format!("A page of {}", resource.name),
                    "headers": {
                        "Link": {
                            "description": "RFC 8288 link to the next page, present when more rows remain",
                            "schema": {"type": "string"},
                            "example": example_link,
                        },
                    },
                    "content": {"application/json": {"schema": {
                        "type": "object",
                        "required": ["items", "pagination"],
                        "properties": {
                            "items": {"type": "array", "items": schema_ref(&resource.name)},
                            "pagination": schema_ref("Pagination"),
                        },
                    }}},
                }),
            );
            responses.insert("400".into(), error.clone());
        }
        Operation::Read => {
            responses.insert("200".into(), single);
            responses.insert("404".into(), error.clone());
        }
        Operation::Create => {
            responses.insert("201".into(), single);
            responses.insert("409".into(), error.clone());
            responses.insert("422".into(), error.clone());
        }
        Operation::Update => {
            responses.insert("200".into(), single);
            responses.insert("404".into(), error.clone());
            responses.insert("422".into(), error.clone());
        }
        Operation::Delete => {
            responses.insert("204".into(), json!({"description": "Deleted"}));
            responses.insert("404".into(), error.clone());
        }
    }
    if !route.roles.is_empty() {
        responses.insert("401".into(), error.clone());
        responses.insert("403".into(), error.clone());
        op.insert("x-roles".into(), json!(route.roles));
    }
    responses.insert("default".into(), error);
    op.insert("responses".into(), Value::Object(responses));
    Value::Object(op)
}

fn list_parameters(resource: &Resource) -> Vec<Value> {
    let query = |name: &str, schema: Value, description: &str| {
        json!({"name": name, "in": "query", "required": false, "schema": schema, "description": description})
    };
    let pk = resource.primary_key().map_or_else(|| "id".to_string(), |f| snake(&f.name));
    let mut sort_columns = vec![json!(pk)];
    sort_columns.extend(
        resource
            .fields
            .iter()
            .filter(|f| f.has_modifier(ModifierKind::Sortable))
            .map(|f| json!(snake(&f.name))),
    );
    let mut params = vec![
        query("limit", json!({"type": "integer", "minimum": 1, "maximum": 100, "default": 20}), "Page size"),
        query("offset", json!({"type": "integer", "minimum": 0}), "Rows to skip"),
        query("cursor", json!({"type": "string"}), "Opaque cursor from a previous page"),
        query("sort", json!({"type": "string", "enum": sort_columns}), "Column to order by"),
        query("order", json!({"type": "string", "enum": ["asc", "desc"]}), "Sort direction"),
    ];
    params.extend(
        resource
            .fields
            .iter()
            .filter(|f| f.has_modifier(ModifierKind::Filterable))
            .map(|f| {
                query(
                    &lower_camel(&f.name),
                    field_schema(f),
                    &format!("Filter by {}", f.name),
                )
            }),
    );
    params
}

fn pk_schema(resource: &Resource) -> Value {
    resource
        .primary_key()
        .map_or_else(|| json!({"type": "string", "format": "uuid"}), field_schema)
}

/// JSON schema of a field's wire value.
pub fn field_schema(field: &Field) -> Value {
    let mut schema = match field.ty {
        FieldType::Uuid => json!({"type": "string", "format": "uuid"}),
        FieldType::String | FieldType::Text => json!({"type": "string"}),
        FieldType::Slug => json!({"type": "string", "pattern": "^[a-z0-9]+(?:-[a-z0-9]+)*$"}),
        FieldType::Email => json!({"type": "string", "format": "email"}),
        FieldType::Url => json!({"type": "string", "format": "uri"}),
        FieldType::Int => json!({"type": "integer", "format": "int32"}),
        FieldType::BigInt => json!({"type": "integer", "format": "int64"}),
        FieldType::Decimal => json!({"type": "string", "format": "decimal"}),
        FieldType::Bool => json!({"type": "boolean"}),
        FieldType::DateTime => json!({"type": "string", "format": "date-time"}),
        FieldType::Date => json!({"type": "string", "format": "date"}),
        FieldType::Enum => json!({"type": "string", "enum": field.enum_values}),
        FieldType::Json => json!({}),
    };
    if let Value::Object(map) = &mut schema {
        if let Some(len) = max_len(field) {
            map.insert("maxLength".into(), json!(len));
        }
        if let Some(len) = field
            .modifier_value(ModifierKind::MinLen)
            .and_then(forge_ir::Literal::as_int)
        {
            map.insert("minLength".into(), json!(len));
        }
        if let Some(default) = field.modifier_value(ModifierKind::Default) {
            map.insert("default".into(), json!(default));
        }
        if let Some(help) = field
            .modifier_value(ModifierKind::Help)
            .and_then(forge_ir::Literal::as_str)
        {
            map.insert("description".into(), json!(help));
        }
    }
    schema
}

/// Output, create and update schemas of a resource.
fn resource_schemas(resource: &Resource) -> (Value, Value, Value) {
    let pk = resource.primary_key();
    let is_pk = |f: &Field| pk.is_some_and(|p| p.name == f.name);

    let mut output = Map::new();
    let mut output_required = Vec::new();
    let mut create = Map::new();
    let mut create_required = Vec::new();
    let mut update = Map::new();

    if pk.is_none() {
        output.insert("id".into(), json!({"type": "string", "format": "uuid"}));
        output_required.push(json!("id"));
    }
    for field in &resource.fields {
        let name = lower_camel(&field.name);
        let schema = field_schema(field);
        output.insert(name.clone(), schema.clone());
        if field.is_required() || is_pk(field) {
            output_required.push(json!(name));
        }
        let generated = is_pk(field) && field.ty == FieldType::Uuid;
        if !generated {
            create.insert(name.clone(), schema.clone());
            if field.is_required() || is_pk(field) {
                create_required.push(json!(name));
            }
        }
        if !is_pk(field) && !field.has_modifier(ModifierKind::Immutable) {
            update.insert(name, schema);
        }
    }
    for rel in resource
        .relationships
        .iter()
        .filter(|r| r.kind == RelationshipKind::BelongsTo)
    {
        let name = format!("{}Id", lower_camel(&rel.name));
        let schema = json!({
            "type": "string",
            "format": "uuid",
            "description": format!("References {} (column {})", rel.table, foreign_key_column(rel)),
        });
        output.insert(name.clone(), schema.clone());
        create.insert(name.clone(), schema.clone());
        update.insert(name.clone(), schema);
        if !rel.optional {
            output_required.push(json!(name));
            create_required.push(json!(name));
        }
    }
    if resource.has_timestamps {
        for name in ["createdAt", "updatedAt"] {
            output.insert(name.into(), json!({"type": "string", "format": "date-time"}));
            output_required.push(json!(name));
        }
    }

    let object = |properties: Map<String, Value>, required: Vec<Value>| {
        let mut schema = json!({"type": "object", "properties": properties});
        if !required.is_empty() {
            schema["required"] = Value::Array(required);
        }
        schema
    };
    (
        object(output, output_required),
        object(create, create_required),
        object(update, Vec::new()),
    )
}

fn error_schema() -> Value {
    let codes: Vec<&str> = crate::context::RUNTIME_ERRORS
        .iter()
        .map(|(_, code, _)| *code)
        .collect();
    json!({
        "type": "object",
        "required": ["error"],
        "properties": {
            "error": {
                "type": "object",
                "required": ["code", "message"],
                "properties": {
                    "code": {"type": "string", "enum": codes},
                    "message": {"type": "string"},
                    "detail": {},
                },
            },
        },
    })
}

fn pagination_schema() -> Value {
    json!({
        "type": "object",
        "required": ["limit", "hasMore"],
        "properties": {
            "limit": {"type": "integer"},
            "offset": {"type": "integer"},
            "nextCursor": {"type": "string"},
            "hasMore": {"type": "boolean"},
        },
    })
}

#[cfg(test)]
mod tests;
