//! Record store seam
//!
//! The insight engine never reads the database directly: it consumes this
//! trait, so the store can be backed by the embedded database, a network
//! client, or fixtures. Reads return a self-contained snapshot; the engine
//! makes no isolation assumptions beyond that.

use async_trait::async_trait;

use crate::db::Database;
use crate::error::Result;
use crate::models::{ObjectiveRecord, ProjectRecord, WorkRecord};

/// Read access to the three record collections
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_work_records(&self) -> Result<Vec<WorkRecord>>;
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>>;
    async fn list_objectives(&self) -> Result<Vec<ObjectiveRecord>>;
}

#[async_trait]
impl RecordStore for Database {
    async fn list_work_records(&self) -> Result<Vec<WorkRecord>> {
        self.all_work_records()
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>> {
        self.all_projects()
    }

    async fn list_objectives(&self) -> Result<Vec<ObjectiveRecord>> {
        self.all_objectives()
    }
}

/// In-memory store for tests and fixtures
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub work_records: Vec<WorkRecord>,
    pub projects: Vec<ProjectRecord>,
    pub objectives: Vec<ObjectiveRecord>,
}

impl MemoryStore {
    pub fn new(
        work_records: Vec<WorkRecord>,
        projects: Vec<ProjectRecord>,
        objectives: Vec<ObjectiveRecord>,
    ) -> Self {
        Self {
            work_records,
            projects,
            objectives,
        }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_work_records(&self) -> Result<Vec<WorkRecord>> {
        Ok(self.work_records.clone())
    }

    async fn list_projects(&self) -> Result<Vec<ProjectRecord>> {
        Ok(self.projects.clone())
    }

    async fn list_objectives(&self) -> Result<Vec<ObjectiveRecord>> {
        Ok(self.objectives.clone())
    }
}
