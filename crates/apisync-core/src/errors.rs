use thiserror::Error;

/// Result type alias using ApiSyncError
pub type Result<T> = std::result::Result<T, ApiSyncError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that the CLI prints and that tests
/// assert against, so codes never change once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Validation
    InvalidInput,
    MissingName,
    NamingConvention,
    DuplicateName,

    // Lookup
    NotFound,
    ConfigNotFound,
    MergeTargetNotFound,
    NoRemote,

    // Integrity
    ReferentialIntegrity,
    CorruptSnapshot,

    // Integration/IO
    Fetch,
    Config,
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::MissingName => "ERR_MISSING_NAME",
            ExErrorKind::NamingConvention => "ERR_NAMING_CONVENTION",
            ExErrorKind::DuplicateName => "ERR_DUPLICATE_NAME",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::ConfigNotFound => "ERR_CONFIG_NOT_FOUND",
            ExErrorKind::MergeTargetNotFound => "ERR_MERGE_TARGET_NOT_FOUND",
            ExErrorKind::NoRemote => "ERR_NO_REMOTE",
            ExErrorKind::ReferentialIntegrity => "ERR_REFERENTIAL_INTEGRITY",
            ExErrorKind::CorruptSnapshot => "ERR_CORRUPT_SNAPSHOT",
            ExErrorKind::Fetch => "ERR_FETCH",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context an
/// operator needs to act on it (which data source, which entity).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    data_source: Option<String>,
    entity: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
    candidates: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            data_source: None,
            entity: None,
            message: String::new(),
            source: None,
            candidates: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add data source context
    pub fn with_data_source(mut self, name: impl Into<String>) -> Self {
        self.data_source = Some(name.into());
        self
    }

    /// Add entity context (module, endpoint ref or shared type name)
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Add candidate names (offending names for batch errors, referencing
    /// endpoints for integrity errors)
    pub fn with_candidates(mut self, names: Vec<String>) -> Self {
        self.candidates = Some(names);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn data_source(&self) -> Option<&str> {
        self.data_source.as_deref()
    }

    pub fn entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    pub fn candidates(&self) -> Option<&[String]> {
        self.candidates.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(ds) = &self.data_source {
            write!(f, " (data_source: {})", ds)?;
        }
        if let Some(entity) = &self.entity {
            write!(f, " (entity: {})", entity)?;
        }
        if let Some(candidates) = &self.candidates {
            if !candidates.is_empty() {
                write!(f, " [{}]", candidates.join(", "))?;
            }
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the model, merge and validation layers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiSyncError {
    /// An entity has no name; `context` describes it for the operator
    #[error("{entity_kind} has no name: {context}")]
    MissingName {
        entity_kind: String,
        context: String,
    },

    /// Module or shared type names outside ASCII
    #[error("names must be ASCII (modules: {modules:?}, shared types: {shared_types:?})")]
    NamingConvention {
        modules: Vec<String>,
        shared_types: Vec<String>,
    },

    #[error("duplicate {collection} name: {name}")]
    DuplicateName { collection: String, name: String },

    #[error("module not found: {name}")]
    ModuleNotFound { name: String },

    #[error("shared type not found: {name}")]
    SharedTypeNotFound { name: String },

    #[error("endpoint not found: {module}.{endpoint}")]
    EndpointNotFound { module: String, endpoint: String },

    /// Deleting the shared type would leave dangling references
    #[error("shared type {name} is still referenced by {referenced_by:?}")]
    SharedTypeStillReferenced {
        name: String,
        referenced_by: Vec<String>,
    },

    #[error("endpoint {endpoint} references undefined shared type {type_name}")]
    DanglingReference { endpoint: String, type_name: String },

    /// Names that cannot be used as a single path segment
    #[error("names cannot contain path separators, NUL or '..': {names:?}")]
    UnsafePathName { names: Vec<String> },

    /// Endpoint references must be written as `module.endpoint`
    #[error("invalid endpoint reference '{raw}': expected <module>.<endpoint>")]
    InvalidEndpointRef { raw: String },
}

impl From<ApiSyncError> for ExError {
    fn from(err: ApiSyncError) -> Self {
        match err {
            ApiSyncError::MissingName {
                entity_kind,
                context,
            } => ExError::new(ExErrorKind::MissingName)
                .with_message(format!("{} has no name: {}", entity_kind, context)),

            ApiSyncError::NamingConvention {
                modules,
                shared_types,
            } => {
                let mut offenders = modules.clone();
                offenders.extend(shared_types.iter().cloned());
                ExError::new(ExErrorKind::NamingConvention)
                    .with_message(format!(
                        "names must be ASCII ({} modules, {} shared types)",
                        modules.len(),
                        shared_types.len()
                    ))
                    .with_candidates(offenders)
            }

            ApiSyncError::DuplicateName { collection, name } => {
                ExError::new(ExErrorKind::DuplicateName)
                    .with_entity(name)
                    .with_message(format!("duplicate {} name", collection))
            }

            ApiSyncError::ModuleNotFound { name } => ExError::new(ExErrorKind::MergeTargetNotFound)
                .with_entity(name)
                .with_message("module not found on either side"),

            ApiSyncError::SharedTypeNotFound { name } => {
                ExError::new(ExErrorKind::MergeTargetNotFound)
                    .with_entity(name)
                    .with_message("shared type not found on either side")
            }

            ApiSyncError::EndpointNotFound { module, endpoint } => {
                ExError::new(ExErrorKind::MergeTargetNotFound)
                    .with_entity(format!("{}.{}", module, endpoint))
                    .with_message("endpoint not found on either side")
            }

            ApiSyncError::SharedTypeStillReferenced {
                name,
                referenced_by,
            } => ExError::new(ExErrorKind::ReferentialIntegrity)
                .with_entity(name)
                .with_message("shared type is still referenced locally")
                .with_candidates(referenced_by),

            ApiSyncError::DanglingReference {
                endpoint,
                type_name,
            } => ExError::new(ExErrorKind::ReferentialIntegrity)
                .with_entity(endpoint)
                .with_message(format!("references undefined shared type {}", type_name)),

            ApiSyncError::UnsafePathName { names } => ExError::new(ExErrorKind::InvalidInput)
                .with_message("names cannot contain path separators, NUL or '..'")
                .with_candidates(names),

            ApiSyncError::InvalidEndpointRef { raw } => ExError::new(ExErrorKind::InvalidInput)
                .with_entity(raw)
                .with_message("expected <module>.<endpoint>"),
        }
    }
}
