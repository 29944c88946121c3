use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{ApiSyncError, Result};

/// Address of one endpoint inside a data source: `(module, endpoint)`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EndpointRef {
    pub module: String,
    pub endpoint: String,
}

impl EndpointRef {
    pub fn new(module: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Parse the `module.endpoint` form typed by an operator.
    ///
    /// Splits on the first `.`; both halves must be non-empty.
    ///
    /// # Errors
    ///
    /// `InvalidEndpointRef` when the input has no separator or an empty half.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.split_once('.') {
            Some((module, endpoint)) if !module.is_empty() && !endpoint.is_empty() => {
                Ok(Self::new(module, endpoint))
            }
            _ => Err(ApiSyncError::InvalidEndpointRef {
                raw: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for EndpointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let r = EndpointRef::parse("pet.addPet").unwrap();
        assert_eq!(r, EndpointRef::new("pet", "addPet"));
        assert_eq!(r.to_string(), "pet.addPet");
    }

    #[test]
    fn test_parse_splits_on_first_dot() {
        let r = EndpointRef::parse("store.order.v2").unwrap();
        assert_eq!(r.module, "store");
        assert_eq!(r.endpoint, "order.v2");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["pet", ".addPet", "pet.", ""] {
            assert!(
                matches!(
                    EndpointRef::parse(raw),
                    Err(ApiSyncError::InvalidEndpointRef { .. })
                ),
                "expected rejection for {:?}",
                raw
            );
        }
    }
}
