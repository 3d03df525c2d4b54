//! Board persistence backends.
//!
//! Boards are keyed by `(owner, name)`. Saving a name that exists
//! overwrites it; listing returns the most recently updated board first.

use crate::error::{StoreError, StoreResult};
use crate::notify::{Notifier, Subscription};
use pb_core::record::{BoardRecord, records_from_json, records_to_json};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Partition a board belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Owner {
    /// Unauthenticated, single-device boards keyed only by name.
    Local,
    /// Boards of a signed-in user, keyed by the user's opaque id.
    User(String),
}

impl Owner {
    /// Stable storage key for the partition.
    pub fn key(&self) -> String {
        match self {
            Owner::Local => "local".to_owned(),
            Owner::User(uid) => {
                let safe: String = uid
                    .chars()
                    .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
                    .collect();
                format!("user-{safe}")
            }
        }
    }
}

pub type BoardsCallback = Box<dyn FnMut(&[BoardRecord])>;

pub trait BoardStore {
    /// Insert or overwrite the board named `record.name`.
    fn save(&mut self, owner: &Owner, record: BoardRecord) -> StoreResult<()>;

    /// Every board of `owner`, most recently updated first.
    fn list(&self, owner: &Owner) -> StoreResult<Vec<BoardRecord>>;

    /// Remove a board. Unknown names are `NotFound`.
    fn delete(&mut self, owner: &Owner, name: &str) -> StoreResult<()>;

    /// Push the owner's board list after every change. Backends without
    /// change feeds keep the default, and callers re-list after writes.
    fn subscribe(&mut self, _owner: &Owner, _callback: BoardsCallback) -> Subscription {
        Subscription::noop()
    }
}

/// Upsert by name, keeping the position of an overwritten board. Shared by
/// backends that keep a whole partition as one array.
pub fn upsert(boards: &mut Vec<BoardRecord>, record: BoardRecord) {
    match boards.iter_mut().find(|b| b.name == record.name) {
        Some(slot) => *slot = record,
        None => boards.push(record),
    }
}

/// Newest first; ties keep insertion order.
pub fn newest_first(mut boards: Vec<BoardRecord>) -> Vec<BoardRecord> {
    boards.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    boards
}

pub fn remove(boards: &mut Vec<BoardRecord>, name: &str) -> StoreResult<()> {
    let pos = boards
        .iter()
        .position(|b| b.name == name)
        .ok_or_else(|| StoreError::NotFound(name.to_owned()))?;
    boards.remove(pos);
    Ok(())
}

// ─── In-memory ───────────────────────────────────────────────────────────

/// Store kept in memory, with change notifications per owner.
#[derive(Default)]
pub struct MemoryStore {
    boards: HashMap<Owner, Vec<BoardRecord>>,
    watchers: HashMap<Owner, Notifier<[BoardRecord]>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn changed(&self, owner: &Owner) {
        if let Some(watchers) = self.watchers.get(owner) {
            let boards = newest_first(self.boards.get(owner).cloned().unwrap_or_default());
            watchers.notify(&boards);
        }
    }
}

impl BoardStore for MemoryStore {
    fn save(&mut self, owner: &Owner, record: BoardRecord) -> StoreResult<()> {
        upsert(self.boards.entry(owner.clone()).or_default(), record);
        self.changed(owner);
        Ok(())
    }

    fn list(&self, owner: &Owner) -> StoreResult<Vec<BoardRecord>> {
        Ok(newest_first(self.boards.get(owner).cloned().unwrap_or_default()))
    }

    fn delete(&mut self, owner: &Owner, name: &str) -> StoreResult<()> {
        let boards = self
            .boards
            .get_mut(owner)
            .ok_or_else(|| StoreError::NotFound(name.to_owned()))?;
        remove(boards, name)?;
        self.changed(owner);
        Ok(())
    }

    fn subscribe(&mut self, owner: &Owner, mut callback: BoardsCallback) -> Subscription {
        // Deliver the current list right away, like a snapshot listener.
        let current = newest_first(self.boards.get(owner).cloned().unwrap_or_default());
        callback(&current);
        self.watchers.entry(owner.clone()).or_default().subscribe(callback)
    }
}

// ─── JSON files ──────────────────────────────────────────────────────────

/// One JSON array of records per owner, in a directory.
///
/// The array layout is the one the browser keeps in local storage, so
/// exported boards can be dropped into the directory as-is.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, owner: &Owner) -> PathBuf {
        self.dir.join(format!("{}.json", owner.key()))
    }

    fn read(&self, owner: &Owner) -> StoreResult<Vec<BoardRecord>> {
        match fs::read_to_string(self.path_for(owner)) {
            Ok(text) if text.trim().is_empty() => Ok(Vec::new()),
            Ok(text) => Ok(records_from_json(&text)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, owner: &Owner, boards: &[BoardRecord]) -> StoreResult<()> {
        let path = self.path_for(owner);
        let json = records_to_json(boards)?;
        // Write-then-rename so a crash never leaves half an array behind.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        log::debug!("wrote {} boards to {}", boards.len(), path.display());
        Ok(())
    }
}

impl BoardStore for JsonFileStore {
    fn save(&mut self, owner: &Owner, record: BoardRecord) -> StoreResult<()> {
        let mut boards = self.read(owner)?;
        upsert(&mut boards, record);
        self.write(owner, &boards)
    }

    fn list(&self, owner: &Owner) -> StoreResult<Vec<BoardRecord>> {
        Ok(newest_first(self.read(owner)?))
    }

    fn delete(&mut self, owner: &Owner, name: &str) -> StoreResult<()> {
        let mut boards = self.read(owner)?;
        remove(&mut boards, name)?;
        self.write(owner, &boards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pb_core::model::Scene;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn record(name: &str, age_minutes: i64) -> BoardRecord {
        let mut r = BoardRecord::capture(name, &Scene::default());
        r.updated_at = Utc::now() - Duration::minutes(age_minutes);
        r
    }

    fn names(boards: &[BoardRecord]) -> Vec<&str> {
        boards.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn owner_keys_are_path_safe() {
        assert_eq!(Owner::Local.key(), "local");
        assert_eq!(Owner::User("a/b:c".into()).key(), "user-a_b_c");
    }

    #[test]
    fn memory_store_partitions_by_owner() {
        let mut store = MemoryStore::new();
        let alice = Owner::User("alice".into());
        store.save(&alice, record("Press", 5)).unwrap();
        store.save(&Owner::Local, record("Shape", 1)).unwrap();
        assert_eq!(names(&store.list(&alice).unwrap()), vec!["Press"]);
        assert_eq!(names(&store.list(&Owner::Local).unwrap()), vec!["Shape"]);
        assert!(store.list(&Owner::User("bob".into())).unwrap().is_empty());
    }

    #[test]
    fn save_overwrites_same_name() {
        let mut store = MemoryStore::new();
        store.save(&Owner::Local, record("Corner", 10)).unwrap();
        let mut newer = record("Corner", 0);
        newer.vertical_orientation = true;
        store.save(&Owner::Local, newer).unwrap();
        let boards = store.list(&Owner::Local).unwrap();
        assert_eq!(boards.len(), 1);
        assert!(boards[0].vertical_orientation);
    }

    #[test]
    fn delete_unknown_is_not_found() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.delete(&Owner::Local, "ghost"),
            Err(StoreError::NotFound(name)) if name == "ghost"
        ));
    }

    #[test]
    fn subscribers_see_every_change() {
        let mut store = MemoryStore::new();
        let seen: Rc<RefCell<Vec<Vec<String>>>> = Rc::default();
        let sink = seen.clone();
        let sub = store.subscribe(
            &Owner::Local,
            Box::new(move |boards: &[BoardRecord]| {
                sink.borrow_mut()
                    .push(boards.iter().map(|b| b.name.clone()).collect());
            }),
        );
        store.save(&Owner::Local, record("A", 3)).unwrap();
        store.save(&Owner::Local, record("B", 1)).unwrap();
        store.save(&Owner::User("x".into()), record("C", 0)).unwrap();
        drop(sub);
        store.delete(&Owner::Local, "A").unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].is_empty());
        assert_eq!(seen[2], vec!["B".to_owned(), "A".to_owned()]);
    }
}
