//! JsonFileStore - employee table persisted as a JSON document.
//!
//! The whole table is loaded on open and rewritten after every successful
//! mutation. Writes go to a sibling `<file name>.tmp` that is flushed to disk
//! and then renamed over the original, so a crash leaves either the old or the
//! new document on disk. A stale temp file from an interrupted write is
//! ignored on open and overwritten by the next write. A mutation whose write
//! fails is not applied in memory either.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard};

use super::table::{Table, TableSnapshot};
use super::{EmployeeStore, SortOrder, StoreError};
use crate::employee::{Employee, EmployeeId, NewEmployee};

/// File-backed employee store. Clones share the same table and file.
#[derive(Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    table: Arc<RwLock<Table>>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating an empty table if the file is absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let table = if path.exists() {
            let bytes = fs::read(&path)?;
            let snapshot: TableSnapshot = serde_json::from_slice(&bytes)?;
            Table::from_snapshot(snapshot)?
        } else {
            Table::new()
        };

        tracing::debug!(path = %path.display(), rows = table.count(), "opened employee file store");

        Ok(Self {
            path,
            table: Arc::new(RwLock::new(table)),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, StoreError> {
        self.table
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))
    }

    /// Apply `op` to a copy of the table, persist the copy, then publish it.
    fn mutate<T>(
        &self,
        op: impl FnOnce(&mut Table) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut table = self
            .table
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;

        let mut next = table.clone();
        let out = op(&mut next)?;
        self.persist(&next)?;
        *table = next;
        Ok(out)
    }

    fn persist(&self, table: &Table) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(&table.snapshot())?;
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }

        let tmp = temp_path(&self.path);
        let mut file = File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp, &self.path)?;
        sync_dir(parent.unwrap_or(Path::new(".")));
        Ok(())
    }
}

/// Flush a directory entry so a completed rename survives a crash.
/// Failure is logged only.
#[cfg(unix)]
fn sync_dir(dir: &Path) {
    if let Err(err) = File::open(dir).and_then(|d| d.sync_all()) {
        tracing::debug!(dir = %dir.display(), error = %err, "could not sync employee store directory");
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}

/// `employees.json` -> `employees.json.tmp`, next to the data file.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("employees"));
    name.push(".tmp");
    path.with_file_name(name)
}

impl EmployeeStore for JsonFileStore {
    fn insert(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        self.mutate(|table| table.insert(employee))
    }

    fn replace(&self, employee: &Employee) -> Result<Employee, StoreError> {
        self.mutate(|table| table.replace(employee))
    }

    fn delete(&self, id: EmployeeId) -> Result<bool, StoreError> {
        if !self.read()?.exists(id) {
            return Ok(false);
        }
        self.mutate(|table| Ok(table.delete(id)))
    }

    fn get(&self, id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        Ok(self.read()?.get(id))
    }

    fn exists(&self, id: EmployeeId) -> Result<bool, StoreError> {
        Ok(self.read()?.exists(id))
    }

    fn list(&self, order: SortOrder) -> Result<Vec<Employee>, StoreError> {
        Ok(self.read()?.list(order))
    }

    fn find_name_containing(&self, fragment: &str) -> Result<Vec<Employee>, StoreError> {
        Ok(self.read()?.find_name_containing(fragment))
    }

    fn find_by_name(&self, name: &str) -> Result<Option<Employee>, StoreError> {
        Ok(self.read()?.find_by_name(name))
    }

    fn exists_by_name(
        &self,
        name: &str,
        excluding: Option<EmployeeId>,
    ) -> Result<bool, StoreError> {
        Ok(self.read()?.exists_by_name(name, excluding))
    }

    fn find_age_between(&self, min: u8, max: u8) -> Result<Vec<Employee>, StoreError> {
        Ok(self.read()?.find_age_between(min, max))
    }

    fn find_salary_between(&self, min: f64, max: f64) -> Result<Vec<Employee>, StoreError> {
        Ok(self.read()?.find_salary_between(min, max))
    }

    fn count(&self) -> Result<u64, StoreError> {
        Ok(self.read()?.count())
    }
}
