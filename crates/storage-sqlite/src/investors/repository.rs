use obligo_core::investors::{Investor, InvestorRepositoryTrait, NewInvestor};
use obligo_core::Result;

use super::model::{InvestorDB, NewInvestorDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::investors;
use crate::schema::investors::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct InvestorRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl InvestorRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        InvestorRepository { pool, writer }
    }

    pub fn load_investors_impl(&self) -> Result<Vec<Investor>> {
        let mut conn = get_connection(&self.pool)?;
        let investors_db = investors
            .order(name.asc())
            .load::<InvestorDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(investors_db.into_iter().map(Investor::from).collect())
    }

    pub fn get_investor_impl(&self, investor_id: &str) -> Result<Investor> {
        let mut conn = get_connection(&self.pool)?;
        let investor_db = investors
            .find(investor_id)
            .first::<InvestorDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Investor::from(investor_db))
    }
}

#[async_trait]
impl InvestorRepositoryTrait for InvestorRepository {
    fn load_investors(&self) -> Result<Vec<Investor>> {
        self.load_investors_impl()
    }

    fn get_investor(&self, investor_id: &str) -> Result<Investor> {
        self.get_investor_impl(investor_id)
    }

    async fn insert_new_investor(&self, new_investor: NewInvestor) -> Result<Investor> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investor> {
                let mut new_investor_db: NewInvestorDB = new_investor.into();
                new_investor_db
                    .id
                    .get_or_insert_with(|| Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(investors::table)
                    .values(&new_investor_db)
                    .returning(InvestorDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Investor::from(result_db))
            })
            .await
    }

    async fn update_investor(&self, investor_update: Investor) -> Result<Investor> {
        let investor_id_owned = investor_update.id.clone();
        let investor_db: InvestorDB = investor_update.into();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investor> {
                diesel::update(investors.find(investor_id_owned.clone()))
                    .set(&investor_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                let result_db = investors
                    .find(investor_id_owned)
                    .first::<InvestorDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Investor::from(result_db))
            })
            .await
    }

    async fn delete_investor(&self, investor_id_to_delete: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(investors.find(investor_id_to_delete))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
