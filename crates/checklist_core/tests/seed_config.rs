use checklist_core::{CatalogError, Checklist, Item, SeedConfig, StoreError, OTHER_CATEGORY_ID};

#[test]
fn default_store_starts_with_three_reference_items() {
    let store = Checklist::new(SeedConfig::default()).unwrap();

    assert_eq!(store.all_items().len(), 3);
    assert_eq!(store.all_categories().len(), 4);
    assert_eq!(store.fallback_category_id(), OTHER_CATEGORY_ID);
    assert_eq!(store.all_mappings().len(), 11);
}

#[test]
fn seeded_stores_are_deterministic_and_independent() {
    let config = SeedConfig::default().with_rng_seed(7);
    let mut first = Checklist::new(config.clone()).unwrap();
    let second = Checklist::new(config).unwrap();

    assert_eq!(first.all_items(), second.all_items());

    let id = first.create_item("Bread", 1).unwrap();
    assert_eq!(id, 12);
    assert_eq!(second.all_items().len(), 3);
    assert!(!second.can_undo());
}

#[test]
fn default_items_resolve_to_reference_categories() {
    let store = Checklist::new(SeedConfig::default().with_all_samples()).unwrap();

    let items = store.all_items();
    let milk = items.iter().find(|item| item.name == "Milk").unwrap();
    let eggs = items.iter().find(|item| item.name == "Eggs").unwrap();
    let apples = items.iter().find(|item| item.name == "Apples").unwrap();
    assert_eq!(milk.category_id, 1);
    assert_eq!(eggs.category_id, OTHER_CATEGORY_ID);
    assert_eq!(apples.category_id, 3);
    assert_eq!(items.len(), 11);
}

#[test]
fn seed_config_parses_from_json() {
    let config = SeedConfig::from_json_str(
        r#"{
            "categories": [
                {"id": 9, "icon": "🛒", "name": "Misc", "colour": "hsl(0, 0%, 90%)"},
                {"id": 4, "icon": "🥖", "name": "Bakery", "colour": "hsl(30, 70%, 80%)"}
            ],
            "fallback_category_id": 9,
            "mappings": {"Bread": 4},
            "sample_items": [
                {"id": 10, "name": "Bread", "quantity": 1, "bought": false},
                {"id": 11, "name": "Salt", "quantity": 2, "bought": true}
            ],
            "sample_size": 2
        }"#,
    )
    .unwrap();

    let store = Checklist::new(config).unwrap();
    let items = store.all_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].category_id, 4);
    assert_eq!(items[1].category_id, 9);
    assert!(items[1].bought);
}

#[test]
fn seed_config_rejects_missing_fallback() {
    let err = SeedConfig::from_json_str(
        r#"{"categories": [{"id": 1, "icon": "x", "name": "A", "colour": "red"}],
            "fallback_category_id": 0}"#,
    )
    .unwrap_err();
    assert_eq!(err, StoreError::Catalog(CatalogError::MissingFallback(0)));
}

#[test]
fn seed_config_rejects_malformed_json() {
    let err = SeedConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, StoreError::Seed(message) if message.contains("parse")));
}

#[test]
fn store_rejects_invalid_sample_items() {
    let mut config = SeedConfig::default();
    config.sample_items.push(Item::new(40, "Ghost", 0));
    assert!(matches!(
        Checklist::new(config),
        Err(StoreError::Validation(_))
    ));
}

#[test]
fn seed_config_defaults_sample_size_when_omitted() {
    let config = SeedConfig::from_json_str(
        r#"{
            "categories": [{"id": 0, "icon": "🛒", "name": "Other", "colour": "grey"}],
            "fallback_category_id": 0,
            "sample_items": [
                {"id": 1, "name": "Salt", "quantity": 1, "bought": false},
                {"id": 2, "name": "Rice", "quantity": 1, "bought": false},
                {"id": 3, "name": "Tea", "quantity": 1, "bought": false},
                {"id": 4, "name": "Jam", "quantity": 1, "bought": false}
            ],
            "rng_seed": 5
        }"#,
    )
    .unwrap();

    assert_eq!(config.sample_size, 3);
    assert_eq!(Checklist::new(config).unwrap().all_items().len(), 3);
}

#[test]
fn seed_config_rejects_sample_id_at_upper_limit() {
    let err = SeedConfig::from_json_str(
        r#"{
            "categories": [{"id": 0, "icon": "🛒", "name": "Other", "colour": "grey"}],
            "fallback_category_id": 0,
            "sample_items": [
                {"id": 18446744073709551615, "name": "Salt", "quantity": 1, "bought": false}
            ]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, StoreError::Seed(message) if message.contains("no room")));
}

#[test]
fn create_item_reports_exhausted_ids_instead_of_wrapping() {
    let mut config = SeedConfig::default();
    config.sample_items = vec![Item::new(u64::MAX - 1, "Salt", 1)];
    config.sample_size = 1;
    let mut store = Checklist::new(config).unwrap();

    assert_eq!(store.create_item("Rice", 1), Ok(u64::MAX));
    assert_eq!(store.create_item("Tea", 1), Err(StoreError::IdsExhausted));
    assert_eq!(store.all_items().len(), 2);
    assert!(store.undo());
    assert!(!store.can_undo());
}
