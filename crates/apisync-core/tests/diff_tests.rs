#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Diff engine behaviour over whole data sources.

mod common;

use std::collections::BTreeSet;

use apisync_core::diff::{
    diff, diff_data_sources, render_diff_summary, ChangeKind, EntityKind, Resolution,
};
use apisync_core::model::{DataType, EndpointRef, Module, NamedList, Property, SharedType};
use common::{module, petstore_local, petstore_remote};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn names_of(kind: ChangeKind, changes: &[apisync_core::ChangeEntry]) -> BTreeSet<String> {
    changes
        .iter()
        .filter(|c| c.kind == kind)
        .map(|c| c.name.clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

// S1: comparing a snapshot with itself yields nothing
#[test]
fn test_diff_of_identical_sources_is_empty() {
    let ds = petstore_local();
    let report = diff_data_sources(&ds, &ds.clone());
    assert!(report.is_empty());
    assert_eq!(report.change_count(), 0);
}

// S2: a new endpoint inside an existing module
#[test]
fn test_added_endpoint_reports_modified_module() {
    let report = diff_data_sources(&petstore_local(), &petstore_remote());

    assert!(report.shared_type_changes.is_empty());
    assert_eq!(report.module_changes.len(), 1);

    let pet = report.module("pet").expect("pet change");
    assert_eq!(pet.entity, EntityKind::Module);
    assert_eq!(pet.kind, ChangeKind::Modified);
    assert!(pet.modified_endpoint_names().is_empty());
    assert_eq!(pet.endpoint_changes.len(), 1);
    assert_eq!(pet.endpoint_changes[0].name, "deletePet");
    assert_eq!(pet.endpoint_changes[0].kind, ChangeKind::Added);
    assert_eq!(pet.resolution, Resolution::Selectable);

    assert_eq!(
        report.endpoint_choices(),
        vec![EndpointRef::new("pet", "deletePet")]
    );
    assert_eq!(report.selectable_modules(), vec!["pet"]);
}

// S3: content change to an endpoint lists it as modified
#[test]
fn test_changed_endpoint_listed_in_modified_names() {
    let local = petstore_local();
    let mut remote = petstore_local();
    let add_pet = remote
        .modules
        .get_mut("pet")
        .and_then(|m| m.endpoints.get_mut("addPet"))
        .unwrap();
    add_pet.response_type = DataType::primitive("string");

    let report = diff_data_sources(&local, &remote);
    let pet = report.module("pet").unwrap();
    assert_eq!(pet.modified_endpoint_names(), vec!["addPet"]);
    assert_eq!(
        pet.endpoint_changes[0].details,
        vec!["endpoint `addPet`: response changed (`Pet` -> `string`)"]
    );
}

// S4: several endpoint differences force per-endpoint resolution
#[test]
fn test_module_with_several_differences_needs_endpoint_resolution() {
    let local: NamedList<Module> = vec![module("pet", &["addPet", "getPet"])]
        .into_iter()
        .collect();
    let remote: NamedList<Module> = vec![module("pet", &["deletePet", "findPets", "getPet"])]
        .into_iter()
        .collect();

    let changes = diff(&local, &remote, true);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].details.len(), 3);
    assert_eq!(changes[0].resolution, Resolution::RequiresEndpointResolution);
    assert!(!changes[0].is_selectable());
}

// S5: shared types are diffed without children
#[test]
fn test_shared_type_changes_have_no_nested_entries() {
    let local = petstore_local();
    let mut remote = petstore_local();
    remote.shared_types.insert(
        SharedType::new("Pet")
            .with_property(Property::new("id", DataType::primitive("integer")))
            .with_property(Property::new("tag", DataType::primitive("string"))),
    );
    remote.shared_types.insert(SharedType::new("Tag"));
    remote.shared_types.remove("Category");

    let report = diff_data_sources(&local, &remote);
    let kinds: Vec<(ChangeKind, &str)> = report
        .shared_type_changes
        .iter()
        .map(|c| (c.kind, c.name.as_str()))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (ChangeKind::Added, "Tag"),
            (ChangeKind::Removed, "Category"),
            (ChangeKind::Modified, "Pet"),
        ]
    );
    let pet = report.shared_type("Pet").unwrap();
    assert!(pet.endpoint_changes.is_empty());
    assert!(pet
        .details
        .contains(&"shared type `Pet`: property `tag` added".to_string()));
    assert!(pet
        .details
        .contains(&"shared type `Pet`: property `category` removed".to_string()));
}

// S6: summary lists every change
#[test]
fn test_summary_renders_module_and_details() {
    let report = diff_data_sources(&petstore_local(), &petstore_remote());
    let summary = render_diff_summary(&report);
    assert!(summary.starts_with("## Schema Diff\n"));
    assert!(summary.contains("### Modules"));
    assert!(summary.contains("- **Modified** `pet`"));
    assert!(summary.contains("module `pet`: endpoint `deletePet` added"));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn shared_types(names: &BTreeSet<String>, variant: u8) -> NamedList<SharedType> {
    names
        .iter()
        .map(|n| SharedType::new(n.clone()).with_description(format!("v{}", variant)))
        .collect()
}

proptest! {
    // Names split exactly into added, removed, modified and unchanged
    #[test]
    fn prop_diff_completeness(
        local_names in prop::collection::btree_set("[a-e]{1,2}", 0..12),
        remote_names in prop::collection::btree_set("[a-e]{1,2}", 0..12),
        modified_mask in prop::collection::vec(any::<bool>(), 12),
    ) {
        let local = shared_types(&local_names, 0);
        let mut remote = shared_types(&remote_names, 0);
        let common: Vec<String> = local_names.intersection(&remote_names).cloned().collect();
        let mut expected_modified = BTreeSet::new();
        for (name, flip) in common.iter().zip(modified_mask.iter()) {
            if *flip {
                remote.insert(SharedType::new(name.clone()).with_description("v1"));
                expected_modified.insert(name.clone());
            }
        }

        let changes = diff(&local, &remote, false);

        let added = names_of(ChangeKind::Added, &changes);
        let removed = names_of(ChangeKind::Removed, &changes);
        let modified = names_of(ChangeKind::Modified, &changes);

        let expected_added: BTreeSet<String> = remote_names.difference(&local_names).cloned().collect();
        let expected_removed: BTreeSet<String> = local_names.difference(&remote_names).cloned().collect();
        prop_assert_eq!(&added, &expected_added);
        prop_assert_eq!(&removed, &expected_removed);
        prop_assert_eq!(&modified, &expected_modified);
        prop_assert_eq!(changes.len(), added.len() + removed.len() + modified.len());
    }

    #[test]
    fn prop_diff_idempotent(names in prop::collection::btree_set("[a-z]{1,6}", 0..10)) {
        let list = shared_types(&names, 0);
        prop_assert!(diff(&list, &list.clone(), false).is_empty());
    }
}
