//! Browser `localStorage` board store.
//!
//! Each owner's boards live under one key as a JSON array of records,
//! the layout earlier builds of the board wrote, so existing saves load
//! unchanged. Signed-in users get their own key.

use pb_core::record::{BoardRecord, records_from_json, records_to_json};
use pb_store::{BoardStore, Owner, StoreError, StoreResult};
use pb_store::store::{newest_first, remove, upsert};

pub const STORAGE_KEY: &str = "footballTacticsBoards";

/// A string key-value area.
pub trait StorageArea {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// The page's `window.localStorage`, looked up on each access.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn storage() -> StoreResult<web_sys::Storage> {
        let window = web_sys::window().ok_or_else(|| StoreError::Backend("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| StoreError::Backend(format!("{e:?}")))?
            .ok_or_else(|| StoreError::Backend("localStorage unavailable".into()))
    }
}

impl StorageArea for BrowserStorage {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}

#[derive(Debug, Default)]
pub struct LocalStorageStore<A = BrowserStorage> {
    area: A,
}

impl<A: StorageArea> LocalStorageStore<A> {
    pub fn new(area: A) -> Self {
        Self { area }
    }

    pub fn area(&self) -> &A {
        &self.area
    }

    /// `footballTacticsBoards` for local boards, suffixed by uid otherwise.
    pub fn key_for(owner: &Owner) -> String {
        match owner {
            Owner::Local => STORAGE_KEY.to_owned(),
            Owner::User(uid) => format!("{STORAGE_KEY}:{uid}"),
        }
    }

    fn read(&self, owner: &Owner) -> StoreResult<Vec<BoardRecord>> {
        match self.area.get(&Self::key_for(owner))? {
            Some(text) if !text.trim().is_empty() => Ok(records_from_json(&text)?),
            _ => Ok(Vec::new()),
        }
    }

    fn write(&mut self, owner: &Owner, boards: &[BoardRecord]) -> StoreResult<()> {
        let json = records_to_json(boards)?;
        self.area.set(&Self::key_for(owner), &json)
    }
}

impl<A: StorageArea> BoardStore for LocalStorageStore<A> {
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
