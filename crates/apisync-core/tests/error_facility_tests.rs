use apisync_core::errors::{ApiSyncError, ExError, ExErrorKind};

#[test]
fn test_error_kind_code_mapping() {
    let kinds = vec![
        (ExErrorKind::MissingName, "ERR_MISSING_NAME"),
        (ExErrorKind::NamingConvention, "ERR_NAMING_CONVENTION"),
        (ExErrorKind::CorruptSnapshot, "ERR_CORRUPT_SNAPSHOT"),
        (ExErrorKind::Fetch, "ERR_FETCH"),
        (ExErrorKind::ReferentialIntegrity, "ERR_REFERENTIAL_INTEGRITY"),
        (ExErrorKind::Io, "ERR_IO"),
        (ExErrorKind::Serialization, "ERR_SERIALIZATION"),
        (ExErrorKind::Internal, "ERR_INTERNAL"),
    ];

    for (kind, expected_code) in kinds {
        assert_eq!(kind.code(), expected_code);
    }
}

#[test]
fn test_endpoint_not_found_maps_to_merge_target() {
    let err = ApiSyncError::EndpointNotFound {
        module: "pet".to_string(),
        endpoint: "addPet".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::MergeTargetNotFound);
    assert_eq!(ex_err.entity(), Some("pet.addPet"));
}

#[test]
fn test_invalid_endpoint_ref_is_invalid_input() {
    let ex_err: ExError = ApiSyncError::InvalidEndpointRef {
        raw: "petaddPet".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidInput);
    assert_eq!(ex_err.code(), "ERR_INVALID_INPUT");
    assert_eq!(ex_err.entity(), Some("petaddPet"));
}

#[test]
fn test_duplicate_name_conversion() {
    let ex_err: ExError = ApiSyncError::DuplicateName {
        collection: "module".to_string(),
        name: "pet".to_string(),
    }
    .into();

    assert_eq!(ex_err.kind(), ExErrorKind::DuplicateName);
    assert!(ex_err.message().contains("module"));
}

#[test]
fn test_builder_context_in_display() {
    let err = ExError::new(ExErrorKind::ConfigNotFound)
        .with_op("select_data_source")
        .with_data_source("billing")
        .with_message("no such data source");

    assert_eq!(
        err.to_string(),
        "[ERR_CONFIG_NOT_FOUND] in operation 'select_data_source': no such data source (data_source: billing)"
    );
    assert_eq!(err.op(), Some("select_data_source"));
    assert_eq!(err.data_source(), Some("billing"));
}
