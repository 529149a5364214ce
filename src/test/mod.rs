use std::fs::{remove_dir_all, remove_file};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rocket::local::blocking::Client;

use crate::model::repository::{Document, Folder, Tag};
use crate::service::file_system::{DiskFileSystem, FileSystem};
use crate::service::sync_service;
use crate::service::tag_service;
use crate::service::workspace::Workspace;

/// every test runs on its own thread, so the thread name keeps their files apart
pub fn current_thread_name() -> String {
    let thread = std::thread::current();
    thread.name().unwrap_or("flashback_test").to_string()
}

fn workspace_dir() -> PathBuf {
    PathBuf::from(format!("{}_workspace", current_thread_name()))
}

fn database_file() -> PathBuf {
    PathBuf::from(format!("{}.sqlite", current_thread_name()))
}

/// removes everything a previous run of this test may have left behind
pub fn cleanup() {
    let dir = workspace_dir();
    if dir.exists() {
        remove_dir_all(&dir).unwrap_or(());
    }
    let database = database_file();
    for suffix in ["", "-wal", "-shm"] {
        let path = format!("{}{suffix}", database.to_string_lossy());
        remove_file(Path::new(&path)).unwrap_or(());
    }
}

/// a fresh workspace and database for the current test
pub fn init_workspace() -> Workspace {
    cleanup();
    Workspace::open(workspace_dir(), database_file()).unwrap()
}

/// same as [`init_workspace`], but every disk operation goes through the returned [`FailingFileSystem`]
pub fn init_failing_workspace() -> (Workspace, Arc<FailingFileSystem>) {
    cleanup();
    let file_system = Arc::new(FailingFileSystem::default());
    let workspace =
        Workspace::open_with_file_system(workspace_dir(), database_file(), file_system.clone())
            .unwrap();
    (workspace, file_system)
}

pub fn client(workspace: Workspace) -> Client {
    Client::tracked(crate::build_rocket(workspace)).expect("Valid Rocket Instance")
}

pub fn create_file(workspace: &Workspace, path: &str) -> Document {
    sync_service::create_file(workspace, path, b"test").unwrap()
}

pub fn create_folder(workspace: &Workspace, path: &str) -> Folder {
    sync_service::create_folder(workspace, path).unwrap()
}

pub fn create_tag(workspace: &Workspace, name: &str) -> Tag {
    tag_service::create_tag(workspace, name).unwrap()
}

/// runs `sql`, which must select a single number
pub fn count(workspace: &Workspace, sql: &str) -> u32 {
    let con = workspace.open_connection().unwrap();
    con.query_row(sql, [], |row| row.get(0)).unwrap()
}

pub fn exists_on_disk(workspace: &Workspace, path: &str) -> bool {
    workspace.root().join(path).exists()
}

/// the real disk, except that writes, renames, and removes can be told to fail
#[derive(Default)]
pub struct FailingFileSystem {
    disk: DiskFileSystem,
    pub fail_writes: AtomicBool,
    pub fail_renames: AtomicBool,
    pub fail_removes: AtomicBool,
    /// when set, removing a leftover directory flags `cleanup_started` and then stalls for [`CLEANUP_PAUSE`]
    pub pause_cleanup: AtomicBool,
    pub cleanup_started: AtomicBool,
}

pub const CLEANUP_PAUSE: Duration = Duration::from_millis(250);

impl FailingFileSystem {
    fn check(flag: &AtomicBool, operation: &str) -> io::Result<()> {
        if flag.load(Ordering::SeqCst) {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{operation} failed on purpose"),
            ))
        } else {
            Ok(())
        }
    }
}

impl FileSystem for FailingFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.disk.exists(path)
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        self.disk.is_dir(path)
    }

    fn mkdir(&self, path: &Path) -> io::Result<()> {
        self.disk.mkdir(path)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.disk.read_file(path)
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        Self::check(&self.fail_writes, "write")?;
        self.disk.write_file(path, content)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        Self::check(&self.fail_renames, "rename")?;
        self.disk.rename(from, to)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        Self::check(&self.fail_removes, "remove")?;
        self.disk.remove(path)
    }

    fn remove_empty_dir(&self, path: &Path) -> io::Result<()> {
        if self.pause_cleanup.load(Ordering::SeqCst) {
            self.cleanup_started.store(true, Ordering::SeqCst);
            std::thread::sleep(CLEANUP_PAUSE);
        }
        self.disk.remove_empty_dir(path)
    }
}
