use std::backtrace::Backtrace;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, Transaction};

use crate::config::FlashbackConfig;
use crate::model::error::WorkspaceResult;
use crate::repository::{initialize_db, open_connection};
use crate::service::file_system::{DiskFileSystem, FileSystem};
use crate::service::paths::RelativePath;

/// everything an operation needs to reach one workspace: the root directory, the database, and the disk.
///
/// Mutating operations are serialized through [`Workspace::write_transaction`]. Reads open their
/// own connection and never take the write lock
pub struct Workspace {
    root: PathBuf,
    database: PathBuf,
    file_system: Arc<dyn FileSystem>,
    write_lock: Mutex<()>,
}

impl Workspace {
    /// opens the workspace at `root` backed by the real disk, creating the root directory and the database tables if needed
    pub fn open(root: impl AsRef<Path>, database: impl Into<PathBuf>) -> WorkspaceResult<Workspace> {
        Self::open_with_file_system(root, database, Arc::new(DiskFileSystem))
    }

    pub fn from_config(config: &FlashbackConfig) -> WorkspaceResult<Workspace> {
        Self::open(&config.workspace.path, &config.database.location)
    }

    pub fn open_with_file_system(
        root: impl AsRef<Path>,
        database: impl Into<PathBuf>,
        file_system: Arc<dyn FileSystem>,
    ) -> WorkspaceResult<Workspace> {
        let root = root.as_ref();
        if !file_system.exists(root) {
            log::info!("creating workspace directory {root:?}");
            std::fs::create_dir_all(root)?;
        }
        // rows store absolute paths, so a relative root would tie them to the current directory
        let root = std::fs::canonicalize(root)?;
        let workspace = Workspace {
            root,
            database: database.into(),
            file_system,
            write_lock: Mutex::new(()),
        };
        initialize_db(&workspace.open_connection()?)?;
        Ok(workspace)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.file_system.as_ref()
    }

    pub fn open_connection(&self) -> WorkspaceResult<Connection> {
        Ok(open_connection(&self.database)?)
    }

    pub fn absolute(&self, path: &RelativePath) -> PathBuf {
        path.to_path(&self.root)
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| {
            log::warn!("The workspace write lock was poisoned! Resetting...");
            self.write_lock.clear_poison();
            poisoned.into_inner()
        })
    }

    /// runs `body` in a single database transaction while holding the workspace write lock.
    ///
    /// The transaction is committed only if `body` succeeds. Any error rolls back every database
    /// change made inside `body`, so disk mutations must be the last fallible step in it
    pub fn write_transaction<T>(
        &self,
        body: impl FnOnce(&Transaction) -> WorkspaceResult<T>,
    ) -> WorkspaceResult<T> {
        let _guard = self.lock_writes();
        self.run_transaction(body)
    }

    /// same as [`Workspace::write_transaction`], but `body` records every directory it creates.
    ///
    /// If `body` fails, those directories are removed (deepest first) before the write lock is released,
    /// so no other writer can register a directory that is about to disappear
    pub fn write_transaction_creating_dirs<T>(
        &self,
        body: impl FnOnce(&Transaction, &mut Vec<PathBuf>) -> WorkspaceResult<T>,
    ) -> WorkspaceResult<T> {
        let _guard = self.lock_writes();
        let mut created_dirs = Vec::new();
        let result = self.run_transaction(|tx| body(tx, &mut created_dirs));
        if result.is_err() {
            self.remove_created_dirs(&created_dirs);
        }
        result
    }

    /// must only be called while holding the write lock
    fn run_transaction<T>(
        &self,
        body: impl FnOnce(&Transaction) -> WorkspaceResult<T>,
    ) -> WorkspaceResult<T> {
        let mut con = self.open_connection()?;
        let tx = con.transaction()?;
        match body(&tx) {
            Ok(value) => {
                if let Err(e) = tx.commit() {
                    log::error!(
                        "Failed to commit after the disk was already changed! Error is {e:?}\n{}",
                        Backtrace::force_capture()
                    );
                    return Err(e.into());
                }
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_error) = tx.rollback() {
                    log::error!(
                        "Failed to roll back transaction! Error is {rollback_error:?}\n{}",
                        Backtrace::force_capture()
                    );
                }
                Err(e)
            }
        }
    }

    /// best-effort removal of directories created during an operation that later failed. Deepest first
    fn remove_created_dirs(&self, created: &[PathBuf]) {
        for dir in created.iter().rev() {
            if let Err(e) = self.file_system.remove_empty_dir(dir) {
                log::warn!("Failed to clean up directory {dir:?} after a failed operation: {e:?}");
            }
        }
    }
}
