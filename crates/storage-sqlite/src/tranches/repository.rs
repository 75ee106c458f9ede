use obligo_core::tranches::{NewTranche, Tranche, TrancheRepositoryTrait};
use obligo_core::Result;

use super::model::{NewTrancheDB, TrancheDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::tranches;
use crate::schema::tranches::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct TrancheRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl TrancheRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        TrancheRepository { pool, writer }
    }

    pub fn load_tranches_impl(&self) -> Result<Vec<Tranche>> {
        let mut conn = get_connection(&self.pool)?;
        let tranches_db = tranches
            .order(issue_date.asc())
            .load::<TrancheDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(tranches_db.into_iter().map(Tranche::from).collect())
    }

    pub fn load_tranches_for_project_impl(&self, project_id_filter: &str) -> Result<Vec<Tranche>> {
        let mut conn = get_connection(&self.pool)?;
        let tranches_db = tranches
            .filter(project_id.eq(project_id_filter))
            .order(issue_date.asc())
            .load::<TrancheDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(tranches_db.into_iter().map(Tranche::from).collect())
    }

    pub fn get_tranche_impl(&self, tranche_id: &str) -> Result<Tranche> {
        let mut conn = get_connection(&self.pool)?;
        let tranche_db = tranches
            .find(tranche_id)
            .first::<TrancheDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Tranche::from(tranche_db))
    }
}

#[async_trait]
impl TrancheRepositoryTrait for TrancheRepository {
    fn load_tranches(&self) -> Result<Vec<Tranche>> {
        self.load_tranches_impl()
    }

    fn load_tranches_for_project(&self, project_id_filter: &str) -> Result<Vec<Tranche>> {
        self.load_tranches_for_project_impl(project_id_filter)
    }

    fn get_tranche(&self, tranche_id: &str) -> Result<Tranche> {
        self.get_tranche_impl(tranche_id)
    }

    async fn insert_new_tranche(&self, new_tranche: NewTranche) -> Result<Tranche> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Tranche> {
                let mut new_tranche_db: NewTrancheDB = new_tranche.into();
                new_tranche_db
                    .id
                    .get_or_insert_with(|| Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(tranches::table)
                    .values(&new_tranche_db)
                    .returning(TrancheDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Tranche::from(result_db))
            })
            .await
    }

    async fn update_tranche(&self, tranche_update: Tranche) -> Result<Tranche> {
        let tranche_id_owned = tranche_update.id.clone();
        let tranche_db: TrancheDB = tranche_update.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Tranche> {
                diesel::update(tranches.find(tranche_id_owned.clone()))
                    .set(&tranche_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = tranches
                    .find(tranche_id_owned)
                    .first::<TrancheDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Tranche::from(result_db))
            })
            .await
    }

    async fn delete_tranche(&self, tranche_id_to_delete: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(tranches.find(tranche_id_to_delete))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
