//! On-disk layout of a lock
//!
//! ```text
//! <out>/api-lock.yml
//! <out>/<source>/modules/<module>/<endpoint>.lock.yml
//! <out>/<source>/sharedTypes/<type>.lock.yml
//! ```

use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "api-lock.yml";
pub const LEGACY_INDEX_FILE: &str = "api.lock";
pub const MODULES_DIR: &str = "modules";
pub const SHARED_TYPES_DIR: &str = "sharedTypes";
pub const DETAIL_EXTENSION: &str = "lock.yml";

pub fn index_path(out_dir: &Path) -> PathBuf {
    out_dir.join(INDEX_FILE)
}

pub fn legacy_index_path(out_dir: &Path) -> PathBuf {
    out_dir.join(LEGACY_INDEX_FILE)
}

/// Index file to read: the primary name, else the legacy one, else none
pub fn existing_index_path(out_dir: &Path) -> Option<PathBuf> {
    [index_path(out_dir), legacy_index_path(out_dir)]
        .into_iter()
        .find(|p| p.is_file())
}

pub fn modules_dir(out_dir: &Path, data_source: &str) -> PathBuf {
    out_dir.join(data_source).join(MODULES_DIR)
}

pub fn shared_types_dir(out_dir: &Path, data_source: &str) -> PathBuf {
    out_dir.join(data_source).join(SHARED_TYPES_DIR)
}

/// For ("petstore", "pet", "addPet") returns
/// "<out>/petstore/modules/pet/addPet.lock.yml"
pub fn endpoint_path(out_dir: &Path, data_source: &str, module: &str, endpoint: &str) -> PathBuf {
    modules_dir(out_dir, data_source)
        .join(module)
        .join(format!("{}.{}", endpoint, DETAIL_EXTENSION))
}

pub fn shared_type_path(out_dir: &Path, data_source: &str, type_name: &str) -> PathBuf {
    shared_types_dir(out_dir, data_source).join(format!("{}.{}", type_name, DETAIL_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_path() {
        let path = endpoint_path(Path::new("/out"), "petstore", "pet", "addPet");
        assert_eq!(path, PathBuf::from("/out/petstore/modules/pet/addPet.lock.yml"));
    }

    #[test]
    fn test_shared_type_path() {
        let path = shared_type_path(Path::new("/out"), "petstore", "Pet");
        assert_eq!(path, PathBuf::from("/out/petstore/sharedTypes/Pet.lock.yml"));
    }

    #[test]
    fn test_existing_index_prefers_primary() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        assert!(existing_index_path(temp_dir.path()).is_none());

        std::fs::write(legacy_index_path(temp_dir.path()), "[]").unwrap();
        assert_eq!(
            existing_index_path(temp_dir.path()),
            Some(legacy_index_path(temp_dir.path()))
        );

        std::fs::write(index_path(temp_dir.path()), "[]").unwrap();
        assert_eq!(
            existing_index_path(temp_dir.path()),
            Some(index_path(temp_dir.path()))
        );
    }
}
