use super::*;

fn catalog() -> EntityCatalog {
    EntityCatalog {
        roots: vec![Entity::new("m", "Math").with_child("Algebra")],
        featured: vec![Entity::new("a", "Algebra").with_parent("Math")],
        search: Vec::new(),
        nodes: vec![
            Entity::new("g", "Groups").with_parent("Algebra"),
            Entity::new("m2", "Math"),
        ],
    }
}

#[test]
fn find_prefers_catalog_order() {
    let c = catalog();
    assert_eq!(c.find("a").map(|e| e.name.as_str()), Some("Algebra"));
    assert!(c.find("zz").is_none());
    assert_eq!(c.all().count(), 4);
}

#[test]
fn by_names_resolves_in_order_and_skips_unknown() {
    let c = catalog();
    let got = c.by_names(&["Groups".to_owned(), "Nope".to_owned(), "Math".to_owned()]);
    let ids: Vec<_> = got.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["g", "m2"]);
}

#[test]
fn document_fields_default_to_empty() {
    let c: EntityCatalog = serde_json::from_str(r#"{"roots":[{"id":"x","name":"X"}]}"#).unwrap();
    assert_eq!(c.roots.len(), 1);
    assert!(c.nodes.is_empty() && c.featured.is_empty());
    assert!(c.roots[0].parents.is_empty());
}
