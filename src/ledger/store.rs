use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;

use crate::db::Member;

/// Durable home for member records. The ledger writes through this before
/// mirroring a member locally, and reads it once when opened.
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn insert_member(&self, member: &Member) -> Result<()>;

    async fn load_members(&self) -> Result<Vec<Member>>;
}

/// Process-local store. Nothing survives a restart.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Member>>,
    #[cfg(test)]
    reject_inserts: std::sync::atomic::AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_members(members: Vec<Member>) -> Self {
        Self {
            records: Mutex::new(members),
            ..Self::default()
        }
    }

    /// While set, every insert fails as an unreachable backend would.
    pub fn set_reject_inserts(&self, reject: bool) {
        self.reject_inserts
            .store(reject, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn insert_member(&self, member: &Member) -> Result<()> {
        #[cfg(test)]
        if self.reject_inserts.load(std::sync::atomic::Ordering::SeqCst) {
            bail!("member store is not accepting writes");
        }
        let mut records = self
            .records
            .lock()
            .map_err(|_| anyhow!("member store lock poisoned"))?;
        if records.iter().any(|existing| existing.id == member.id) {
            bail!("member {} already stored", member.id);
        }
        records.push(member.clone());
        Ok(())
    }

    async fn load_members(&self) -> Result<Vec<Member>> {
        self.records
            .lock()
            .map(|records| records.clone())
            .map_err(|_| anyhow!("member store lock poisoned"))
    }
}
