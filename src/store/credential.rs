use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::Result;

use super::LocalStore;

/// Fixed storage key holding the session credential.
pub const CREDENTIAL_KEY: &str = "token";

/// Durable key/value storage the session credential is persisted in.
pub trait CredentialStorage {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl CredentialStorage for LocalStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_state()?.entries.get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut st = self.read_state()?;
        st.entries.insert(key.to_string(), value.to_string());
        self.write_state(&st)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut st = self.read_state()?;
        if st.entries.remove(key).is_some() {
            self.write_state(&st)?;
        }
        Ok(())
    }
}

/// In-memory storage; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let storage = Self::default();
        storage
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl CredentialStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

impl<T: CredentialStorage + ?Sized> CredentialStorage for Rc<T> {
    fn load(&self, key: &str) -> Result<Option<String>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        (**self).save(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
