//! Admin dashboard figures, derived from the ledger on every read.

use serde::Serialize;

use crate::db::{Member, Plan};
use crate::ledger::Ledger;

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlanCounts {
    pub bronze: usize,
    pub silver: usize,
    pub gold: usize,
}

impl PlanCounts {
    pub fn get(&self, plan: Plan) -> usize {
        match plan {
            Plan::Bronze => self.bronze,
            Plan::Silver => self.silver,
            Plan::Gold => self.gold,
        }
    }

    fn bump(&mut self, plan: Plan) {
        match plan {
            Plan::Bronze => self.bronze += 1,
            Plan::Silver => self.silver += 1,
            Plan::Gold => self.gold += 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminSummary {
    pub total_members: usize,
    pub total_minutes: u64,
    pub members_by_plan: PlanCounts,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub summary: AdminSummary,
    pub members: Vec<Member>,
}

pub fn summarize(members: &[Member]) -> AdminSummary {
    members
        .iter()
        .fold(AdminSummary::default(), |mut summary, member| {
            summary.total_members += 1;
            summary.total_minutes = summary.total_minutes.saturating_add(member.minutes_read);
            summary.members_by_plan.bump(member.plan);
            summary
        })
}

/// Snapshot the ledger once and derive every figure from that snapshot.
pub async fn dashboard(ledger: &Ledger) -> AdminDashboard {
    let members = ledger.list_members().await;
    AdminDashboard {
        summary: summarize(&members),
        members,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::ledger::MemoryStore;

    fn member(name: &str, plan: Plan, minutes_read: u64) -> Member {
        Member {
            minutes_read,
            ..Member::subscribe(name, plan)
        }
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(summarize(&[]), AdminSummary::default());
    }

    #[test]
    fn test_summarize_counts_and_minutes() {
        let members = vec![
            member("Alice", Plan::Gold, 30),
            member("Bob", Plan::Bronze, 0),
            member("Cleo", Plan::Gold, 15),
        ];

        let summary = summarize(&members);
        assert_eq!(summary.total_members, 3);
        assert_eq!(summary.total_minutes, 45);
        assert_eq!(summary.members_by_plan.get(Plan::Gold), 2);
        assert_eq!(summary.members_by_plan.get(Plan::Bronze), 1);
        assert_eq!(summary.members_by_plan.get(Plan::Silver), 0);
    }

    #[tokio::test]
    async fn test_dashboard_tracks_ledger() {
        let ledger = Ledger::new(Arc::new(MemoryStore::new()));
        assert_eq!(dashboard(&ledger).await.summary.total_members, 0);

        ledger.add_member("Alice", Plan::Gold).await.unwrap();
        let first = dashboard(&ledger).await;
        assert_eq!(first.summary.total_members, 1);
        assert_eq!(first.summary.total_minutes, 0);

        ledger.add_member("Bob", Plan::Silver).await.unwrap();
        let second = dashboard(&ledger).await;
        assert_eq!(second.summary.total_members, 2);
        assert_eq!(second.members.len(), 2);
        assert_eq!(second.members[1].name, "Bob");
        assert_eq!(second.summary.total_members, ledger.total_members().await);
        assert_eq!(second.summary.total_minutes, ledger.total_minutes().await);
    }

    #[test]
    fn test_summarize_saturates_minutes() {
        let members = vec![
            member("Marathon", Plan::Gold, u64::MAX),
            member("Sprinter", Plan::Silver, 10),
        ];
        let summary = summarize(&members);
        assert_eq!(summary.total_minutes, u64::MAX);
        assert_eq!(summary.total_members, 2);
    }
}
