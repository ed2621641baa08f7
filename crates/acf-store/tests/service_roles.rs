use acf_store::stubs::InMemoryItemRepository;
use acf_store::{ItemService, TrackerError};
use acf_domain::{ExecStatus, FieldPatch, ItemField, Role};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

fn service() -> ItemService<InMemoryItemRepository> {
    ItemService::new(Arc::new(InMemoryItemRepository::new()))
}

#[test]
fn create_assigns_number_step_zero_and_unset_fields() {
    let svc = service();
    let it = svc.create(Role::Admin, "Draft").unwrap();
    assert_eq!(it.number, "AC-001");
    assert_eq!(it.current_step, 0);
    assert!(it.factor.is_none() && it.scope.is_none() && it.resources.is_none());
    assert!(it.exec_status.is_none());

    let second = svc.create(Role::Manager, "Second").unwrap();
    assert_eq!(second.number, "AC-002");
}

#[test]
fn create_rejects_empty_title_and_team_role() {
    let svc = service();
    assert!(matches!(svc.create(Role::Admin, ""), Err(TrackerError::InvalidRequest(_))));
    assert!(matches!(svc.create(Role::Team, "x"), Err(TrackerError::Forbidden(_))));
}

#[test]
fn team_patch_drops_title_silently_but_applies_notes() {
    let svc = service();
    let it = svc.create(Role::Admin, "Draft").unwrap();

    let mut patch = FieldPatch::new();
    patch.insert(ItemField::Title, json!("hijacked"));
    patch.insert(ItemField::Notes, json!("y"));
    let updated = svc.patch(Role::Team, &it.id, patch).unwrap();

    assert_eq!(updated.title, "Draft"); // title descartado en silencio
    assert_eq!(updated.notes.as_deref(), Some("y"));
}

#[test]
fn all_disallowed_patch_is_invalid_request_not_a_noop() {
    let svc = service();
    let it = svc.create(Role::Admin, "Draft").unwrap();
    let before = svc.list(None).unwrap().remove(0);

    let mut patch = FieldPatch::new();
    patch.insert(ItemField::Title, json!("x"));
    assert!(matches!(svc.patch(Role::Team, &it.id, patch), Err(TrackerError::InvalidRequest(_))));

    // nada se escribió
    let after = svc.list(None).unwrap().remove(0);
    assert_eq!(before.updated_at, after.updated_at);
}

#[test]
fn patch_missing_item_is_not_found() {
    let svc = service();
    let mut patch = FieldPatch::new();
    patch.insert(ItemField::Notes, json!("abc"));
    assert!(matches!(svc.patch(Role::Admin, &Uuid::new_v4(), patch), Err(TrackerError::NotFound(_))));
}

#[test]
fn invalid_enum_value_aborts_whole_patch() {
    let svc = service();
    let it = svc.create(Role::Admin, "Draft").unwrap();

    let mut patch = FieldPatch::new();
    patch.insert(ItemField::Notes, json!("will not land"));
    patch.insert(ItemField::Scope, json!("gigantic"));
    assert!(matches!(svc.patch(Role::Admin, &it.id, patch), Err(TrackerError::InvalidRequest(_))));

    let stored = svc.list(None).unwrap().remove(0);
    assert!(stored.notes.is_none());
    assert!(stored.scope.is_none());
}

#[test]
fn patch_roundtrip_updates_notes_and_timestamp() {
    let svc = service();
    let it = svc.create(Role::Admin, "Draft").unwrap();
    let before = it.updated_at;

    let mut patch = FieldPatch::new();
    patch.insert(ItemField::Notes, json!("abc"));
    patch.insert(ItemField::ExecStatus, json!("in_progress"));
    svc.patch(Role::Team, &it.id, patch).unwrap();

    let listed = svc.list(None).unwrap().remove(0);
    assert_eq!(listed.notes.as_deref(), Some("abc"));
    assert_eq!(listed.exec_status, Some(ExecStatus::InProgress));
    assert!(listed.updated_at > before);
}

#[test]
fn set_step_is_forbidden_for_team() {
    let svc = service();
    let it = svc.create(Role::Admin, "Draft").unwrap();
    assert!(matches!(svc.set_step(Role::Team, &it.id, 2), Err(TrackerError::Forbidden(_))));
}

#[test]
fn set_step_validates_integer_domain() {
    let svc = service();
    let it = svc.create(Role::Manager, "Draft").unwrap();
    assert!(matches!(svc.set_step(Role::Manager, &it.id, 9), Err(TrackerError::InvalidRequest(_))));
    assert!(matches!(svc.set_step(Role::Manager, &it.id, -1), Err(TrackerError::InvalidRequest(_))));

    let moved = svc.set_step(Role::Manager, &it.id, 4).unwrap();
    assert_eq!(moved.current_step, 4);
}

#[test]
fn set_step_missing_item_is_not_found() {
    let svc = service();
    assert!(matches!(svc.set_step(Role::Admin, &Uuid::new_v4(), 1), Err(TrackerError::NotFound(_))));
}

#[test]
fn delete_is_idempotent_and_role_gated() {
    let svc = service();
    let it = svc.create(Role::Admin, "Draft").unwrap();

    assert!(matches!(svc.delete(Role::Team, &it.id), Err(TrackerError::Forbidden(_))));
    assert_eq!(svc.delete(Role::Admin, &it.id).unwrap(), 1);
    assert_eq!(svc.delete(Role::Admin, &it.id).unwrap(), 0);
    // id inexistente: 0, no NotFound
    assert_eq!(svc.delete(Role::Admin, &Uuid::new_v4()).unwrap(), 0);
}

#[test]
fn list_filter_by_step_and_reverse_order() {
    let svc = service();
    let a = svc.create(Role::Admin, "A").unwrap();
    let _b = svc.create(Role::Admin, "B").unwrap();
    let c = svc.create(Role::Admin, "C").unwrap();
    svc.set_step(Role::Admin, &a.id, 1).unwrap();
    svc.set_step(Role::Admin, &c.id, 1).unwrap();

    let step1: Vec<String> = svc.list(Some(1)).unwrap().into_iter().map(|i| i.title).collect();
    assert_eq!(step1, vec!["C".to_string(), "A".to_string()]);

    let all: Vec<String> = svc.list(None).unwrap().into_iter().map(|i| i.title).collect();
    assert_eq!(all, vec!["C".to_string(), "B".to_string(), "A".to_string()]);
}
