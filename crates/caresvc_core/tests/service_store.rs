use caresvc_core::{
    default_services, validate, InMemoryServiceRepository, MonotonicIdGenerator, RemoveOutcome,
    ServiceCandidate, ServiceRecord, ServiceRepository, ServiceStore, StoreError, StoreOrigin,
    UpdateOutcome, ValidService,
};
use std::collections::HashSet;

fn valid(name: &str, description: &str, price: f64) -> ValidService {
    validate(&ServiceCandidate::new(name, description, price)).unwrap()
}

fn fresh_store(
    repo: &InMemoryServiceRepository,
) -> ServiceStore<&InMemoryServiceRepository, MonotonicIdGenerator> {
    ServiceStore::open(repo, MonotonicIdGenerator::new()).unwrap()
}

#[test]
fn empty_storage_seeds_defaults_in_order() {
    let repo = InMemoryServiceRepository::new();
    let store = fresh_store(&repo);

    assert_eq!(store.services(), default_services().as_slice());
    assert_eq!(store.origin(), &StoreOrigin::DefaultsEmpty);
    let names: Vec<_> = store.services().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["General Checkup", "Blood Test", "X-Ray"]);
}

#[test]
fn unparseable_storage_falls_back_to_defaults_and_is_overwritten() {
    let repo = InMemoryServiceRepository::with_raw("{not json");
    let store = fresh_store(&repo);

    assert!(matches!(store.origin(), StoreOrigin::DefaultsRecovered(_)));
    assert_eq!(store.len(), 3);
    assert_eq!(repo.load().unwrap().unwrap(), default_services());
}

#[test]
fn existing_storage_is_loaded_verbatim() {
    let stored = vec![
        ServiceRecord::new(7, "Dental", "Cleaning", 80.0),
        ServiceRecord::new(3, "X-Ray", "Chest", 120.5),
    ];
    let repo = InMemoryServiceRepository::new();
    repo.save(&stored).unwrap();

    let store = fresh_store(&repo);
    assert_eq!(store.origin(), &StoreOrigin::Stored);
    assert_eq!(store.services(), stored.as_slice());
}

#[test]
fn add_appends_one_record_with_fresh_id_and_persists() {
    let repo = InMemoryServiceRepository::new();
    let mut store = fresh_store(&repo);

    let created = store.add(valid("Vaccination", "Flu shot", 20.0)).unwrap();

    assert_eq!(store.len(), 4);
    assert_eq!(store.services().last(), Some(&created));
    assert_eq!(store.get(created.id), Some(&created));
    assert!(created.id > 0);
    assert_eq!(repo.load().unwrap().unwrap(), store.services());
}

#[test]
fn rapid_successive_adds_get_unique_ids() {
    let repo = InMemoryServiceRepository::new();
    let mut store = fresh_store(&repo);

    for index in 0..50 {
        store
            .add(valid(&format!("Service {index}"), "Batch", 1.0))
            .unwrap();
    }

    let ids: HashSet<_> = store.services().iter().map(|s| s.id).collect();
    assert_eq!(ids.len(), 53);
}

#[test]
fn update_replaces_only_the_matching_record_in_place() {
    let repo = InMemoryServiceRepository::new();
    let mut store = fresh_store(&repo);
    let before = store.services().to_vec();

    let replacement = ServiceRecord::new(2, "Blood Panel", "Extended panel", 45.0);
    let outcome = store.update(replacement.clone()).unwrap();

    assert_eq!(outcome, UpdateOutcome::Updated(replacement.clone()));
    assert_eq!(store.len(), before.len());
    assert_eq!(store.services()[0], before[0]);
    assert_eq!(store.services()[1], replacement);
    assert_eq!(store.services()[2], before[2]);
    assert_eq!(repo.load().unwrap().unwrap()[1], replacement);
}

#[test]
fn update_with_unknown_id_is_a_named_no_op() {
    let repo = InMemoryServiceRepository::new();
    let mut store = fresh_store(&repo);
    let raw_before = repo.raw().unwrap();
    let saves_before = repo.save_count();

    let outcome = store
        .update(ServiceRecord::new(999, "Ghost", "Nope", 1.0))
        .unwrap();

    assert_eq!(outcome, UpdateOutcome::NotFound(999));
    assert_eq!(store.services(), default_services().as_slice());
    assert_eq!(repo.raw().unwrap(), raw_before);
    assert_eq!(repo.save_count(), saves_before);
}

#[test]
fn remove_drops_at_most_one_record() {
    let repo = InMemoryServiceRepository::new();
    let mut store = fresh_store(&repo);

    let removed = store.remove(1).unwrap();
    assert_eq!(
        removed,
        RemoveOutcome::Removed(default_services()[0].clone())
    );
    assert_eq!(store.len(), 2);

    let missing = store.remove(1).unwrap();
    assert_eq!(missing, RemoveOutcome::NotFound(1));
    assert_eq!(store.len(), 2);
    assert_eq!(repo.load().unwrap().unwrap().len(), 2);
}

#[test]
fn remove_keeps_duplicate_ids_beyond_the_first() {
    let repo = InMemoryServiceRepository::new();
    repo.save(&[
        ServiceRecord::new(5, "A", "first", 1.0),
        ServiceRecord::new(5, "B", "second", 2.0),
    ])
    .unwrap();
    let mut store = fresh_store(&repo);

    store.remove(5).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.services()[0].name, "B");
}

#[test]
fn failed_save_surfaces_error_and_keeps_memory_in_sync_with_storage() {
    let repo = InMemoryServiceRepository::new();
    let mut store = fresh_store(&repo);
    repo.set_reject_writes(true);

    let err = store.add(valid("Vaccination", "Flu shot", 20.0)).unwrap_err();
    assert!(matches!(err, StoreError::Storage(_)));
    assert_eq!(store.len(), 3);

    let err = store.remove(1).unwrap_err();
    assert!(err.to_string().contains("rejected"));
    assert_eq!(store.len(), 3);
    assert_eq!(repo.load().unwrap().unwrap(), store.services());
}

#[test]
fn open_fails_when_initial_write_is_rejected() {
    let repo = InMemoryServiceRepository::new();
    repo.set_reject_writes(true);
    assert!(ServiceStore::open(&repo, MonotonicIdGenerator::new()).is_err());
}

#[test]
fn reset_to_defaults_restores_catalog() {
    let repo = InMemoryServiceRepository::new();
    let mut store = fresh_store(&repo);
    store.remove(1).unwrap();
    store.add(valid("Vaccination", "Flu shot", 20.0)).unwrap();

    store.reset_to_defaults().unwrap();
    assert_eq!(store.services(), default_services().as_slice());
    assert_eq!(repo.load().unwrap().unwrap(), default_services());
}

#[test]
fn defaults_to_add_update_remove_scenario() {
    let repo = InMemoryServiceRepository::new();
    let mut store = fresh_store(&repo);
    assert_eq!(store.len(), 3);

    let created = store.add(valid("Vaccination", "Flu shot", 20.0)).unwrap();
    assert_eq!(store.len(), 4);
    assert!(created.id > 0);
    assert!(default_services().iter().all(|s| s.id != created.id));

    let mut repriced = created.clone();
    repriced.price = 25.0;
    store.update(repriced).unwrap();
    assert_eq!(store.get(created.id).unwrap().price, 25.0);
    assert_eq!(store.len(), 4);

    store.remove(created.id).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.services(), default_services().as_slice());

    let reopened = fresh_store(&repo);
    assert_eq!(reopened.services(), default_services().as_slice());
}

#[test]
fn add_after_loading_max_id_fails_instead_of_reusing_it() {
    let repo = InMemoryServiceRepository::with_raw(
        r#"[{"id":9223372036854775807,"name":"Edge","description":"Largest id","price":1}]"#,
    );
    let mut store = fresh_store(&repo);
    let raw_before = repo.raw().unwrap();

    let err = store.add(valid("Vaccination", "Flu shot", 20.0)).unwrap_err();

    assert!(matches!(err, StoreError::IdsExhausted));
    assert_eq!(store.len(), 1);
    assert_eq!(store.services()[0].id, i64::MAX);
    assert_eq!(repo.raw().unwrap(), raw_before);
}
