//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `work_records` - Work log CRUD
//! - `projects` - Project CRUD
//! - `objectives` - Objective CRUD

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::error::Result;

mod objectives;
mod projects;
mod work_records;

#[cfg(test)]
mod tests;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string into a DateTime<Utc>
///
/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS"; RFC 3339 values
/// written by the Rust side are accepted too.
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|dt| dt.and_utc())
        })
        .unwrap_or_else(|_| Utc::now())
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Create a new database connection pool and run migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database for testing
    ///
    /// Uses a temporary file rather than `:memory:` because pooled
    /// connections must all see the same data.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = format!(
            "{}/cadence_test_{}_{}.db",
            std::env::temp_dir().display(),
            std::process::id(),
            id
        );

        let _ = std::fs::remove_file(&path);

        Self::new(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Enable foreign keys
            PRAGMA foreign_keys = ON;

            -- WAL mode: better concurrency, readers don't block writers
            PRAGMA journal_mode = WAL;

            -- Synchronous NORMAL: good balance of safety and performance
            PRAGMA synchronous = NORMAL;

            -- Projects (named initiatives work rolls up to)
            -- Defined before work_records because work_records references it
            CREATE TABLE IF NOT EXISTS projects (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE,
                status TEXT NOT NULL DEFAULT 'active',
                starts_on DATE NOT NULL,
                ends_on DATE,
                departments TEXT NOT NULL DEFAULT '[]',    -- JSON array
                members TEXT NOT NULL DEFAULT '[]',        -- JSON array
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_projects_status ON projects(status);
            CREATE INDEX IF NOT EXISTS idx_projects_ends_on ON projects(ends_on);

            -- Work records (logged units of work)
            CREATE TABLE IF NOT EXISTS work_records (
                id INTEGER PRIMARY KEY,
                logged_at DATETIME NOT NULL,
                user TEXT NOT NULL,
                department TEXT NOT NULL,
                project_id INTEGER REFERENCES projects(id),
                hours REAL,
                status TEXT NOT NULL DEFAULT 'in_progress',
                description TEXT NOT NULL DEFAULT '',
                import_hash TEXT UNIQUE,                   -- dedup for imports
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_work_records_logged_at ON work_records(logged_at);
            CREATE INDEX IF NOT EXISTS idx_work_records_department ON work_records(department);
            CREATE INDEX IF NOT EXISTS idx_work_records_project ON work_records(project_id);
            CREATE INDEX IF NOT EXISTS idx_work_records_status ON work_records(status);

            -- Objectives (goals with measurable progress)
            CREATE TABLE IF NOT EXISTS objectives (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                progress REAL NOT NULL DEFAULT 0,
                target REAL NOT NULL,
                owner TEXT,
                period_start DATE,
                period_end DATE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_objectives_period_end ON objectives(period_end);
            "#,
        )?;

        Ok(())
    }
}
