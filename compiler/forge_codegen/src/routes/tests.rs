use super::*;
use crate::test_support::product;
use pretty_assertions::assert_eq;

#[test]
fn product_routes() {
    let cx = EmitContext::new("github.com/acme/shop");
    let routes = resource_routes(&cx, &product());
    let summary: Vec<(&str, &str, &str)> = routes
        .iter()
        .map(|r| (r.method.as_str(), r.path.as_str(), r.operation_id.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("GET", "/api/v1/products", "listProducts"),
            ("GET", "/api/v1/products/{id}", "getProduct"),
            ("POST", "/api/v1/products", "createProduct"),
            ("PATCH", "/api/v1/products/{id}", "updateProduct"),
            ("DELETE", "/api/v1/products/{id}", "deleteProduct"),
        ]
    );
}

#[test]
fn permissions_attach_roles() {
    let cx = EmitContext::new("m");
    let routes = resource_routes(&cx, &product());
    let delete = routes.iter().find(|r| r.operation == Operation::Delete);
    assert_eq!(delete.map(|r| r.roles.clone()), Some(vec!["admin".to_string()]));
    assert!(routes
        .iter()
        .filter(|r| r.operation != Operation::Delete)
        .all(|r| r.roles.is_empty()));
}

#[test]
fn multi_word_resources_use_kebab_paths() {
    let cx = EmitContext::new("m");
    let resource = Resource::new("ProductReview", "x.go", 1);
    assert_eq!(resource_root(&cx, &resource), "/api/v1/product-reviews");
    let routes = resource_routes(&cx, &resource);
    assert_eq!(routes[0].operation_id, "listProductReviews");
    assert!(routes[1].has_id());
    assert!(!routes[2].has_id());
}

#[test]
fn table_is_aligned() {
    let cx = EmitContext::new("m");
    let table = render_table(&resource_routes(&cx, &product()));
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "GET    /api/v1/products       listProducts");
    assert_eq!(
        lines[4],
        "DELETE /api/v1/products/{id}  deleteProduct  [admin]"
    );
    assert!(lines.iter().all(|l| l == &l.trim_end()));
}
