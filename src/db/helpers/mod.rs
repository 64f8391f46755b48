use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

use crate::db::models::Plan;

pub fn to_i64(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| anyhow!("value {value} exceeds SQLite INTEGER range"))
}

pub fn to_u64(value: i64, field: &str) -> Result<u64> {
    u64::try_from(value).map_err(|_| anyhow!("{field} contains negative value {value}"))
}

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_plan(value: &str) -> Result<Plan> {
    match value {
        "Bronze" => Ok(Plan::Bronze),
        "Silver" => Ok(Plan::Silver),
        "Gold" => Ok(Plan::Gold),
        other => Err(anyhow!("unknown membership plan {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_conversions() {
        assert_eq!(to_i64(42).unwrap(), 42);
        assert!(to_i64(u64::MAX).is_err());
        assert_eq!(to_u64(7, "minutes_read").unwrap(), 7);
        assert!(to_u64(-1, "minutes_read").is_err());
    }

    #[test]
    fn test_parse_plan_is_exact() {
        assert_eq!(parse_plan("Silver").unwrap(), Plan::Silver);
        assert!(parse_plan("silver").is_err());
    }
}
