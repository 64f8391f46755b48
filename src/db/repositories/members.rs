use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, parse_plan, to_i64, to_u64},
    models::Member,
};
use crate::ledger::MemberStore;

fn row_to_member(row: &Row) -> Result<Member> {
    let plan: String = row.get("plan")?;
    let minutes_read: i64 = row.get("minutes_read")?;
    let joined_at: String = row.get("joined_at")?;

    Ok(Member {
        id: row.get("id")?,
        name: row.get("name")?,
        plan: parse_plan(&plan)?,
        minutes_read: to_u64(minutes_read, "minutes_read")?,
        joined_at: parse_datetime(&joined_at, "joined_at")?,
    })
}

impl Database {
    pub async fn insert_member(&self, member: &Member) -> Result<()> {
        let record = member.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO members (id, name, plan, minutes_read, joined_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    record.name,
                    record.plan.as_str(),
                    to_i64(record.minutes_read)?,
                    record.joined_at.to_rfc3339(),
                ],
            )
            .with_context(|| format!("failed to insert member {}", record.name))?;
            Ok(())
        })
        .await
    }

    /// All members in the order they subscribed.
    pub async fn list_members(&self) -> Result<Vec<Member>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, plan, minutes_read, joined_at
                 FROM members
                 ORDER BY rowid ASC",
            )?;

            let mut rows = stmt.query([])?;
            let mut members = Vec::new();
            while let Some(row) = rows.next()? {
                members.push(row_to_member(row)?);
            }

            Ok(members)
        })
        .await
    }
}

#[async_trait]
impl MemberStore for Database {
    async fn insert_member(&self, member: &Member) -> Result<()> {
        Database::insert_member(self, member).await
    }

    async fn load_members(&self) -> Result<Vec<Member>> {
        self.list_members().await
    }
}
