//! Directory-backed list store. Each key is one `<key>.json` file holding a
//! JSON array; a missing file reads as an empty list.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;

use super::BookingError;

/// Active appointments.
pub const APPOINTMENTS_KEY: &str = "triagecare_appointments";
/// Cancelled appointments, each stamped with its cancellation time.
pub const CANCELLED_KEY: &str = "triagecare_cancelled";

const TEMP_SUFFIX: &str = ".tmp";

/// Whole-list persistence keyed by name. Each write replaces the full list.
pub trait ListStore {
    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, BookingError>;
    fn write_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), BookingError>;
    fn remove(&self, key: &str) -> Result<(), BookingError>;
}

pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open (creating if needed) a store rooted at `root`. Temp files left
    /// by an interrupted write are removed.
    pub fn open(root: &Path) -> Result<Self, BookingError> {
        fs::create_dir_all(root)?;
        let cleaned = clean_orphaned_temp_files(root);
        if cleaned > 0 {
            tracing::info!(files_cleaned = cleaned, "Cleaned orphaned temp files from previous session");
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl ListStore for JsonStore {
    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, BookingError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|source| {
            tracing::warn!(key, error = %source, "Stored list is corrupted");
            BookingError::Json {
                key: key.to_string(),
                source,
            }
        })
    }

    /// Written to a uniquely named temp file in the same directory, then
    /// persisted over `<key>.json`.
    fn write_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), BookingError> {
        let json = serde_json::to_vec_pretty(items).map_err(|source| BookingError::Json {
            key: key.to_string(),
            source,
        })?;

        let mut file: NamedTempFile = tempfile::Builder::new()
            .prefix(&format!(".{key}."))
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.root)?;
        file.write_all(&json)?;
        file.as_file().sync_all()?;
        file.persist(self.path_for(key)).map_err(|e| BookingError::Io(e.error))?;

        tracing::debug!(key, items = items.len(), "Stored list written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BookingError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Remove `.<key>.*.tmp` files in `dir`. Returns count of files removed.
fn clean_orphaned_temp_files(dir: &Path) -> usize {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return 0,
    };

    let mut count = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        let is_temp = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.') && n.ends_with(TEMP_SUFFIX));
        if !is_temp || !path.is_file() {
            continue;
        }
        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!("Failed to clean temp file: {e}");
        } else {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let items: Vec<String> = store.read_list("nothing").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn write_then_read_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        store.write_list("k", &["b", "a", "c"]).unwrap();
        let items: Vec<String> = store.read_list("k").unwrap();
        assert_eq!(items, vec!["b", "a", "c"]);
    }

    fn temp_files_in(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .flatten()
            .map(|e| e.path())
            .filter(|p| p.to_string_lossy().ends_with(TEMP_SUFFIX))
            .collect()
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        store.write_list("k", &[1, 2, 3]).unwrap();
        store.write_list("k", &[4]).unwrap();
        assert!(temp_files_in(dir.path()).is_empty());
        assert_eq!(store.read_list::<i32>("k").unwrap(), vec![4]);
    }

    #[test]
    fn open_removes_orphaned_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let orphan = dir.path().join(".triagecare_appointments.a1B2c3.tmp");
        fs::write(&orphan, "[").unwrap();
        fs::write(dir.path().join("triagecare_appointments.json"), "[]").unwrap();

        let store = JsonStore::open(dir.path()).unwrap();
        assert!(!orphan.exists());
        assert!(store.read_list::<String>("triagecare_appointments").unwrap().is_empty());
    }

    #[test]
    fn stale_fixed_temp_name_does_not_block_writes() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("k.json.tmp")).unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        store.write_list("k", &["x"]).unwrap();
        assert_eq!(store.read_list::<String>("k").unwrap(), vec!["x"]);
    }

    #[test]
    fn corrupted_list_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "[{oops").unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        let err = store.read_list::<String>("bad").unwrap_err();
        assert!(matches!(err, BookingError::Json { ref key, .. } if key == "bad"));
    }

    #[test]
    fn blank_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blank.json"), "  \n").unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        assert!(store.read_list::<String>("blank").unwrap().is_empty());
    }

    #[test]
    fn open_creates_nested_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("a").join("b");
        let store = JsonStore::open(&root).unwrap();
        assert!(store.root().is_dir());
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path()).unwrap();
        store.write_list("k", &[1, 2]).unwrap();
        store.remove("k").unwrap();
        store.remove("k").unwrap();
        assert!(store.read_list::<i32>("k").unwrap().is_empty());
    }
}
