//! Engine catalog seam backed by Postgres.

use async_trait::async_trait;
use sqlx::PgPool;

use haulfinder_core::Facility;
use haulfinder_engine::{CandidateFilter, FacilityCatalog};

/// [`FacilityCatalog`] implementation over a Postgres pool. Cheap to
/// clone and share; each query sees a consistent read snapshot.
#[derive(Clone)]
pub struct PgFacilityCatalog {
    pool: PgPool,
}

impl PgFacilityCatalog {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FacilityCatalog for PgFacilityCatalog {
    async fn query_candidates(&self, filter: &CandidateFilter) -> anyhow::Result<Vec<Facility>> {
        let facilities = crate::facilities::list_candidates(&self.pool, filter).await?;
        Ok(facilities)
    }
}
