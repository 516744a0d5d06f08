//! SQLite database for scam reports and trend aggregation

use crate::{Channel, RiskAssessment, Severity, Submission};
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::info;

pub struct Database {
    conn: Connection,
}

/// One stored report row: the scrubbed submission plus its assessment summary
#[derive(Debug, Clone)]
pub struct Report {
    pub id: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub channel: Channel,
    pub content: String,
    pub caller_number: Option<String>,
    pub overall_risk: Severity,
    pub confidence: u8,
    pub matched_categories: Vec<String>,
    pub immediate_action_required: bool,
}

impl Database {
    /// Open or create the database
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> anyhow::Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS reports (
                id TEXT PRIMARY KEY,
                timestamp TEXT NOT NULL,
                channel TEXT NOT NULL,
                content TEXT NOT NULL,
                caller_number TEXT,
                overall_risk TEXT NOT NULL,
                confidence INTEGER NOT NULL,
                matched_categories TEXT NOT NULL,
                immediate_action INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_reports_timestamp ON reports(timestamp);
            CREATE INDEX IF NOT EXISTS idx_reports_risk ON reports(overall_risk);
            "#,
        )?;

        info!("Database initialized");
        Ok(())
    }

    /// Store one submission with its assessment.
    /// Content must already be scrubbed by the caller.
    pub fn store_report(
        &self,
        submission: &Submission,
        assessment: &RiskAssessment,
    ) -> anyhow::Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO reports
                (id, timestamp, channel, content, caller_number, overall_risk,
                 confidence, matched_categories, immediate_action)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                submission.id,
                submission.timestamp.to_rfc3339(),
                submission.channel.to_string(),
                submission.content,
                submission.caller_number,
                assessment.overall_risk.to_string().to_lowercase(),
                assessment.confidence,
                assessment.matched_categories().join(","),
                assessment.immediate_action_required as i64,
            ],
        )?;

        Ok(())
    }

    /// Get recent reports, newest first
    pub fn get_recent_reports(&self, limit: usize) -> anyhow::Result<Vec<Report>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, timestamp, channel, content, caller_number, overall_risk,
                   confidence, matched_categories, immediate_action
            FROM reports
            ORDER BY timestamp DESC
            LIMIT ?1
            "#,
        )?;

        let reports = stmt
            .query_map([limit], |row| {
                Ok(Report {
                    id: row.get(0)?,
                    timestamp: chrono::DateTime::parse_from_rfc3339(&row.get::<_, String>(1)?)
                        .unwrap_or_default()
                        .with_timezone(&chrono::Utc),
                    channel: row.get::<_, String>(2)?.parse().unwrap_or_default(),
                    content: row.get(3)?,
                    caller_number: row.get(4)?,
                    overall_risk: row.get::<_, String>(5)?.parse().unwrap_or_default(),
                    confidence: row.get::<_, i64>(6)? as u8,
                    matched_categories: {
                        let joined: String = row.get(7)?;
                        if joined.is_empty() {
                            vec![]
                        } else {
                            joined.split(',').map(|s| s.to_string()).collect()
                        }
                    },
                    immediate_action_required: row.get::<_, i64>(8)? != 0,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(reports)
    }

    /// Aggregate counts by severity
    pub fn get_stats(&self) -> anyhow::Result<Stats> {
        let total: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))?;

        let count_for = |risk: &str| -> anyhow::Result<i64> {
            Ok(self.conn.query_row(
                "SELECT COUNT(*) FROM reports WHERE overall_risk = ?1",
                [risk],
                |row| row.get(0),
            )?)
        };

        Ok(Stats {
            total_reports: total,
            critical: count_for("critical")?,
            high: count_for("high")?,
            medium: count_for("medium")?,
            low: count_for("low")?,
        })
    }

    /// Trend counts: how often each category matched over the last N days
    pub fn category_trends(&self, days: u32) -> anyhow::Result<Vec<(String, i64)>> {
        let cutoff = chrono::Utc::now() - chrono::Duration::days(days as i64);
        let mut stmt = self.conn.prepare(
            "SELECT matched_categories FROM reports WHERE timestamp >= ?1",
        )?;

        let mut counts: std::collections::HashMap<String, i64> = Default::default();
        let rows = stmt.query_map([cutoff.to_rfc3339()], |row| row.get::<_, String>(0))?;
        for joined in rows.filter_map(|r| r.ok()) {
            for category in joined.split(',').filter(|s| !s.is_empty()) {
                *counts.entry(category.to_string()).or_insert(0) += 1;
            }
        }

        let mut trends: Vec<(String, i64)> = counts.into_iter().collect();
        trends.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(trends)
    }

    /// Clean up reports older than the retention window
    pub fn cleanup(&self, retention_days: u32) -> anyhow::Result<usize> {
        let cutoff = chrono::Utc::now() - chrono::Duration::days(retention_days as i64);

        let deleted = self.conn.execute(
            "DELETE FROM reports WHERE timestamp < ?1",
            [cutoff.to_rfc3339()],
        )?;

        info!("Cleaned up {} old reports", deleted);
        Ok(deleted)
    }
}

/// Aggregate report counts
#[derive(Debug, serde::Serialize)]
pub struct Stats {
    pub total_reports: i64,
    pub critical: i64,
    pub high: i64,
    pub medium: i64,
    pub low: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RiskEngine;

    fn assessed(text: &str) -> (Submission, RiskAssessment) {
        let engine = RiskEngine::default();
        let assessment = engine.assess(text, None).unwrap();
        (Submission::new(Channel::Sms, text, None), assessment)
    }

    #[test]
    fn test_store_and_fetch_report() {
        let db = Database::open_in_memory().unwrap();
        let (submission, assessment) = assessed("purchase gift cards to pay the fee");
        db.store_report(&submission, &assessment).unwrap();

        let reports = db.get_recent_reports(10).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].id, submission.id);
        assert_eq!(reports[0].channel, Channel::Sms);
        assert_eq!(reports[0].overall_risk, Severity::High);
        assert!(reports[0]
            .matched_categories
            .contains(&"financial".to_string()));
    }

    #[test]
    fn test_stats_by_severity() {
        let db = Database::open_in_memory().unwrap();
        let (s1, a1) = assessed("hello there");
        let (s2, a2) = assessed("purchase gift cards to pay the fee");
        db.store_report(&s1, &a1).unwrap();
        db.store_report(&s2, &a2).unwrap();

        let stats = db.get_stats().unwrap();
        assert_eq!(stats.total_reports, 2);
        assert_eq!(stats.low, 1);
        assert_eq!(stats.high, 1);
    }

    #[test]
    fn test_category_trends() {
        let db = Database::open_in_memory().unwrap();
        for _ in 0..3 {
            let (s, a) = assessed("purchase gift cards to pay the fee");
            db.store_report(&s, &a).unwrap();
        }
        let (s, a) = assessed("we need your social security number");
        db.store_report(&s, &a).unwrap();

        let trends = db.category_trends(7).unwrap();
        assert_eq!(trends[0].0, "financial");
        assert_eq!(trends[0].1, 3);
        assert!(trends.iter().any(|(c, n)| c == "sensitive_info" && *n == 1));
    }

    #[test]
    fn test_cleanup_keeps_recent_reports() {
        let db = Database::open_in_memory().unwrap();
        let (s, a) = assessed("hello there");
        db.store_report(&s, &a).unwrap();

        let deleted = db.cleanup(30).unwrap();
        assert_eq!(deleted, 0);
        assert_eq!(db.get_recent_reports(10).unwrap().len(), 1);
    }
}
