//! Membership ledger: the local mirror of every subscribed member.
//!
//! Writes go to the [`MemberStore`] first and are mirrored only once the
//! store confirms, so the mirror never holds a member the store lacks.

mod store;

pub use store::{MemberStore, MemoryStore};

use std::sync::Arc;

use anyhow::{anyhow, Context};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use crate::db::{Member, Plan};
use crate::{log_error, log_info, log_warn};

const ENABLE_LOGS: bool = true;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Rejected before any side effect.
    #[error("invalid member: {0}")]
    Validation(String),

    /// The store refused the record; the ledger is unchanged.
    #[error("failed to persist member: {0:#}")]
    Persistence(#[source] anyhow::Error),
}

#[derive(Clone)]
pub struct Ledger {
    members: Arc<RwLock<Vec<Member>>>,
    // Serializes writers so two subscriptions never interleave their
    // store round trips with the mirror update.
    write_lock: Arc<Mutex<()>>,
    store: Arc<dyn MemberStore>,
}

impl Ledger {
    /// Empty ledger over `store`, without reading what the store already has.
    pub fn new(store: Arc<dyn MemberStore>) -> Self {
        Self::with_members(store, Vec::new())
    }

    /// Ledger hydrated from the store's existing records.
    pub async fn open(store: Arc<dyn MemberStore>) -> anyhow::Result<Self> {
        let members = match store.load_members().await {
            Ok(members) => members,
            Err(err) => {
                log_error!("Could not hydrate ledger: {:#}", err);
                return Err(err).context("failed to load members from store");
            }
        };
        log_info!("Ledger opened with {} stored members", members.len());
        Ok(Self::with_members(store, members))
    }

    fn with_members(store: Arc<dyn MemberStore>, members: Vec<Member>) -> Self {
        Self {
            members: Arc::new(RwLock::new(members)),
            write_lock: Arc::new(Mutex::new(())),
            store,
        }
    }

    pub async fn add_member(&self, name: &str, plan: Plan) -> Result<Member, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::Validation("member name is required".into()));
        }

        let member = Member::subscribe(name, plan);

        // The store write and the mirror push run as one spawned unit, so a
        // caller dropped mid-flight cannot leave them disagreeing.
        let members = self.members.clone();
        let write_lock = self.write_lock.clone();
        let store = self.store.clone();
        let record = member.clone();
        let commit = tokio::spawn(async move {
            let _writer = write_lock.lock_owned().await;
            if let Err(err) = store.insert_member(&record).await {
                log_warn!("Store rejected member {}: {:#}", record.name, err);
                return Err(LedgerError::Persistence(err));
            }
            members.write().await.push(record);
            Ok(())
        });

        match commit.await {
            Ok(result) => result?,
            Err(join_err) => {
                log_error!("Member commit task failed: {join_err}");
                return Err(LedgerError::Persistence(anyhow!(
                    "member commit task failed: {join_err}"
                )));
            }
        }
        log_info!("Added member {} on {} plan", member.name, member.plan);

        Ok(member)
    }

    pub async fn list_members(&self) -> Vec<Member> {
        self.members.read().await.clone()
    }

    pub async fn total_members(&self) -> usize {
        self.members.read().await.len()
    }

    pub async fn total_minutes(&self) -> u64 {
        self.members
            .read()
            .await
            .iter()
            .fold(0u64, |total, member| total.saturating_add(member.minutes_read))
    }
}
