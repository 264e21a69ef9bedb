//! The REST route table.
//!
//! Each resource gets five routes under `<api prefix>/<kebab plural>`. The
//! table drives the generated router, `forge routes` and the OpenAPI
//! document, so all three always agree.

use std::fmt::Write as _;

use forge_ir::{Operation, Resource};

use crate::context::EmitContext;
use crate::helpers::{kebab, plural};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    /// Router method name in generated code.
    pub fn chi_name(self) -> &'static str {
        match self {
            Method::Get => "Get",
            Method::Post => "Post",
            Method::Patch => "Patch",
            Method::Delete => "Delete",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    /// Pattern relative to the resource root: `/` or `/{id}`.
    pub pattern: &'static str,
    /// Full path.
    pub path: String,
    pub operation_id: String,
    pub operation: Operation,
    pub resource: String,
    /// Roles allowed to call the route; empty means unrestricted.
    pub roles: Vec<String>,
}

impl Route {
    pub fn has_id(&self) -> bool {
        self.pattern != "/"
    }
}

/// Root path of a resource's routes.
pub fn resource_root(cx: &EmitContext, resource: &Resource) -> String {
    format!("{}/{}", cx.api_prefix, plural(&kebab(&resource.name)))
}

/// Routes of one resource, in list, read, create, update, delete order.
pub fn resource_routes(cx: &EmitContext, resource: &Resource) -> Vec<Route> {
    let root = resource_root(cx, resource);
    let name = &resource.name;
    Operation::ALL
        .iter()
        .map(|&operation| {
            let (method, pattern, operation_id) = match operation {
                Operation::List => (Method::Get, "/", format!("list{}", plural(name))),
                Operation::Read => (Method::Get, "/{id}", format!("get{name}")),
                Operation::Create => (Method::Post, "/", format!("create{name}")),
                Operation::Update => (Method::Patch, "/{id}", format!("update{name}")),
                Operation::Delete => (Method::Delete, "/{id}", format!("delete{name}")),
            };
            let path = if pattern == "/" {
                root.clone()
            } else {
                format!("{root}{pattern}")
            };
            let roles = resource
                .options
                .permissions
                .get(&operation)
                .map(|roles| roles.iter().cloned().collect())
                .unwrap_or_default();
            Route {
                method,
                pattern,
                path,
                operation_id,
                operation,
                resource: name.clone(),
                roles,
            }
        })
        .collect()
}

/// Routes of every resource, in resource order.
pub fn routes(cx: &EmitContext, resources: &[Resource]) -> Vec<Route> {
    resources
        .iter()
        .flat_map(|r| resource_routes(cx, r))
        .collect()
}

/// Aligned table for terminal output.
pub fn render_table(routes: &[Route]) -> String {
    let path_width = routes.iter().map(|r| r.path.len()).max().unwrap_or(0);
    let id_width = routes
        .iter()
        .map(|r| r.operation_id.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for route in routes {
        let roles = if route.roles.is_empty() {
            String::new()
        } else {
            format!("  [{}]", route.roles.join(", "))
        };
        let line = format!(
            "{:<6} {:<path_width$}  {:<id_width$}{roles}",
            route.method.as_str(),
            route.path,
            route.operation_id,
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

#[cfg(test)]
mod tests;
