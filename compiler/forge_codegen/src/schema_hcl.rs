//! Declarative schema in Atlas HCL.
//!
//! One `table` block per resource, followed by the join tables of
//! many-to-many relationships. The output is consumed by the migration
//! engine as the desired state of the database.

use std::fmt::Write as _;

use forge_ir::{Field, FieldType, Literal, ModifierKind, RelationshipKind, Resource};

use crate::context::{foreign_key_column, referenced_key};
use crate::helpers::{max_len, snake, sql_type_mod, table_name};

/// Schema every table lives in.
pub const SCHEMA_NAME: &str = "public";

/// Predicate of unique indexes on soft-deleted tables.
pub const LIVE_ROWS: &str = "deleted_at IS NULL";

struct Block {
    out: String,
}

impl Block {
    fn new() -> Self {
        Block { out: String::new() }
    }

    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn column(&mut self, name: &str, ty: &str, null: bool, default: Option<&str>) {
        self.line(1, &format!("column {} {{", hcl_string(name)));
        self.line(2, &format!("null = {null}"));
        self.line(2, &format!("type = {ty}"));
        if let Some(default) = default {
            self.line(2, &format!("default = {default}"));
        }
        self.line(1, "}");
    }

    fn columns_attr<S: AsRef<str>>(columns: &[S]) -> String {
        let refs: Vec<String> = columns
            .iter()
            .map(|c| format!("column.{}", c.as_ref()))
            .collect();
        format!("[{}]", refs.join(", "))
    }
}

fn hcl_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out.replace("${", "$${").replace("%{", "%%{")
}

/// Render the schema for `resources`.
pub fn render(resources: &[Resource]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "schema {} {{\n}}", hcl_string(SCHEMA_NAME));
    for resource in resources {
        out.push('\n');
        out.push_str(&table(resources, resource));
    }
    for join in join_tables(resources) {
        out.push('\n');
        out.push_str(&join.render(resources));
    }
    out
}

/// The table of `resource`; `resources` resolves the keys its foreign keys
/// point at.
fn table(resources: &[Resource], resource: &Resource) -> String {
    let table = table_name(&resource.name);
    let mut b = Block::new();
    b.line(0, &format!("table {} {{", hcl_string(&table)));
    b.line(1, &format!("schema = schema.{SCHEMA_NAME}"));

    let pk = resource.primary_key();
    let pk_column = pk.map_or_else(|| "id".to_string(), |f| snake(&f.name));
    if pk.is_none() {
        b.column("id", "uuid", false, Some("sql(\"gen_random_uuid()\")"));
    }
    for field in &resource.fields {
        let is_pk = pk.is_some_and(|p| p.name == field.name);
        let default = if is_pk && field.ty == FieldType::Uuid {
            Some("sql(\"gen_random_uuid()\")".to_string())
        } else {
            default_value(field)
        };
        b.column(
            &snake(&field.name),
            &sql_type_mod(field.ty, max_len(field)),
            !is_pk && !field.is_required(),
            default.as_deref(),
        );
    }
    let belongs_to: Vec<_> = resource
        .relationships
        .iter()
        .filter(|r| r.kind == RelationshipKind::BelongsTo)
        .collect();
    for rel in &belongs_to {
        let key = referenced_key(resources, &rel.table);
        b.column(&foreign_key_column(rel), &key.sql_type, rel.optional, None);
    }
    if resource.has_timestamps {
        b.column("created_at", "timestamptz", false, Some("sql(\"now()\")"));
        b.column("updated_at", "timestamptz", false, Some("sql(\"now()\")"));
    }
    if resource.options.soft_delete {
        b.column("deleted_at", "timestamptz", true, None);
    }

    b.line(1, "primary_key {");
    b.line(2, &format!("columns = {}", Block::columns_attr(&[&pk_column])));
    b.line(1, "}");

    for rel in &belongs_to {
        let column = foreign_key_column(rel);
        b.line(1, &format!("foreign_key {} {{", hcl_string(&format!("{table}_{column}_fkey"))));
        b.line(2, &format!("columns = {}", Block::columns_attr(&[&column])));
        let key = referenced_key(resources, &rel.table);
        b.line(2, &format!("ref_columns = [table.{}.column.{}]", rel.table, key.column));
        b.line(2, &format!("on_delete = {}", rel.on_delete.sql()));
        b.line(1, "}");
    }

    for field in resource.fields.iter().filter(|f| f.has_modifier(ModifierKind::Index)) {
        let column = snake(&field.name);
        b.line(1, &format!("index {} {{", hcl_string(&format!("{table}_{column}_idx"))));
        b.line(2, &format!("columns = {}", Block::columns_attr(&[&column])));
        b.line(1, "}");
    }
    for field in resource.fields.iter().filter(|f| f.has_modifier(ModifierKind::Unique)) {
        let column = snake(&field.name);
        b.line(1, &format!("index {} {{", hcl_string(&format!("{table}_{column}_key"))));
        b.line(2, "unique = true");
        b.line(2, &format!("columns = {}", Block::columns_attr(&[&column])));
        if resource.options.soft_delete {
            b.line(2, &format!("where = {}", hcl_string(LIVE_ROWS)));
        }
        b.line(1, "}");
    }

    b.line(0, "}");
    b.out
}

/// Column default for a field's `Default(...)` modifier.
fn default_value(field: &Field) -> Option<String> {
    let value = field.modifier_value(ModifierKind::Default)?;
    Some(match value {
        Literal::String(s) | Literal::Constant(s) => hcl_string(s),
        Literal::Int(v) => v.to_string(),
        Literal::Float(v) => v.to_string(),
        Literal::Bool(v) => v.to_string(),
    })
}

/// A many-to-many join table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinTable {
    pub name: String,
    /// `(column, referenced table)` for each side, in table-name order.
    pub sides: [(String, String); 2],
}

impl JoinTable {
    fn render(&self, resources: &[Resource]) -> String {
        let keys = self.sides.clone().map(|(_, table)| referenced_key(resources, &table));
        let mut b = Block::new();
        b.line(0, &format!("table {} {{", hcl_string(&self.name)));
        b.line(1, &format!("schema = schema.{SCHEMA_NAME}"));
        for ((column, _), key) in self.sides.iter().zip(&keys) {
            b.column(column, &key.sql_type, false, None);
        }
        let columns: Vec<&str> = self.sides.iter().map(|(c, _)| c.as_str()).collect();
        b.line(1, "primary_key {");
        b.line(2, &format!("columns = {}", Block::columns_attr(&columns)));
        b.line(1, "}");
        for ((column, table), key) in self.sides.iter().zip(&keys) {
            b.line(1, &format!("foreign_key {} {{", hcl_string(&format!("{}_{column}_fkey", self.name))));
            b.line(2, &format!("columns = {}", Block::columns_attr(&[column])));
            b.line(2, &format!("ref_columns = [table.{table}.column.{}]", key.column));
            b.line(2, "on_delete = CASCADE");
            b.line(1, "}");
        }
        b.line(0, "}");
        b.out
    }
}

/// Join tables implied by `ManyToMany` relationships, deduplicated when
/// both ends declare the relationship.
pub fn join_tables(resources: &[Resource]) -> Vec<JoinTable> {
    let key_of = |table: &str| {
        resources
            .iter()
            .find(|r| table_name(&r.name) == table)
            .map_or_else(|| format!("{table}_id"), |r| format!("{}_id", snake(&r.name)))
    };
    let mut joins: Vec<JoinTable> = Vec::new();
    for resource in resources {
        let own = table_name(&resource.name);
        for rel in resource
            .relationships
            .iter()
            .filter(|r| r.kind == RelationshipKind::ManyToMany)
        {
            let (a, b) = if own <= rel.table {
                (own.clone(), rel.table.clone())
            } else {
                (rel.table.clone(), own.clone())
            };
            let name = format!("{a}_{b}");
            if joins.iter().any(|j| j.name == name) {
                continue;
            }
            let first = key_of(&a);
            let mut second = key_of(&b);
            if first == second {
                second = format!("related_{second}");
            }
            joins.push(JoinTable {
                name,
                sides: [(first, a), (second, b)],
            });
        }
    }
    joins
}
