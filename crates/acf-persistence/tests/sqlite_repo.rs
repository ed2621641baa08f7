use acf_domain::{FieldPatch, ItemField, Role, Scope};
use acf_persistence::SqliteItemRepository;
use acf_store::{ItemRepository, ItemService, TrackerError};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

#[test]
fn roundtrip_insert_get_update_remove() {
    let repo = SqliteItemRepository::open_in_memory().unwrap();
    let svc = ItemService::new(Arc::new(repo));

    let it = svc.create(Role::Admin, "Persisted").unwrap();
    assert_eq!(it.number, "AC-001");

    let mut patch = FieldPatch::new();
    patch.insert(ItemField::Scope, json!("wide"));
    patch.insert(ItemField::Notes, json!("abc"));
    let updated = svc.patch(Role::Admin, &it.id, patch).unwrap();
    assert_eq!(updated.scope, Some(Scope::Wide));

    let listed = svc.list(None).unwrap().remove(0);
    assert_eq!(listed.scope, Some(Scope::Wide));
    assert_eq!(listed.notes.as_deref(), Some("abc"));
    assert!(listed.updated_at > it.updated_at);

    assert_eq!(svc.delete(Role::Admin, &it.id).unwrap(), 1);
    assert_eq!(svc.delete(Role::Admin, &it.id).unwrap(), 0);
}

#[test]
fn clearing_an_enum_field_persists_null() {
    let repo = SqliteItemRepository::open_in_memory().unwrap();
    let svc = ItemService::new(Arc::new(repo));
    let it = svc.create(Role::Manager, "Clear me").unwrap();

    let mut patch = FieldPatch::new();
    patch.insert(ItemField::Resources, json!("high"));
    svc.patch(Role::Manager, &it.id, patch).unwrap();

    let mut patch = FieldPatch::new();
    patch.insert(ItemField::Resources, json!(""));
    svc.patch(Role::Manager, &it.id, patch).unwrap();

    let stored = svc.list(None).unwrap().remove(0);
    assert!(stored.resources.is_none());
}

#[test]
fn list_ordering_survives_interleaved_deletes() {
    let repo = SqliteItemRepository::open_in_memory().unwrap();
    let svc = ItemService::new(Arc::new(repo));
    let _a = svc.create(Role::Admin, "A").unwrap();
    let b = svc.create(Role::Admin, "B").unwrap();
    let _c = svc.create(Role::Admin, "C").unwrap();

    svc.delete(Role::Admin, &b.id).unwrap();
    let d = svc.create(Role::Admin, "D").unwrap();
    // la secuencia nunca reusa números, ni tras borrados
    assert_eq!(d.number, "AC-004");

    let titles: Vec<String> = svc.list(None).unwrap().into_iter().map(|i| i.title).collect();
    assert_eq!(titles, vec!["D".to_string(), "C".to_string(), "A".to_string()]);
}

#[test]
fn step_filter_matches_only_that_stage() {
    let repo = SqliteItemRepository::open_in_memory().unwrap();
    let svc = ItemService::new(Arc::new(repo));
    let a = svc.create(Role::Admin, "A").unwrap();
    svc.create(Role::Admin, "B").unwrap();
    svc.set_step(Role::Admin, &a.id, 3).unwrap();

    let step3 = svc.list(Some(3)).unwrap();
    assert_eq!(step3.len(), 1);
    assert_eq!(step3[0].title, "A");
    assert!(svc.list(Some(4)).unwrap().is_empty());
}

#[test]
fn update_missing_row_reports_false_and_service_not_found() {
    let repo = SqliteItemRepository::open_in_memory().unwrap();
    let mut ghost = acf_domain::Item::new("Ghost", "AC-099".into(), chrono::Utc::now()).unwrap();
    ghost.current_step = 1;
    assert!(!repo.update(&ghost).unwrap());

    let svc = ItemService::new(Arc::new(repo));
    let mut patch = FieldPatch::new();
    patch.insert(ItemField::Notes, json!("x"));
    assert!(matches!(svc.patch(Role::Admin, &Uuid::new_v4(), patch), Err(TrackerError::NotFound(_))));
}

#[test]
fn seed_if_empty_is_applied_once() {
    let repo = SqliteItemRepository::open_in_memory().unwrap();
    repo.seed_if_empty().unwrap();
    repo.seed_if_empty().unwrap();

    let items = repo.list(None).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].number, "AC-002"); // el más reciente primero
    assert_eq!(items[0].current_step, 1);

    // la numeración continúa después del seed
    let svc = ItemService::new(Arc::new(repo));
    let next = svc.create(Role::Admin, "Next").unwrap();
    assert_eq!(next.number, "AC-003");
}
