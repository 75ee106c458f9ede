use obligo_core::constants::MAX_SCHEDULE_ROWS;
use obligo_core::schedule::{CouponInstallment, NewCouponInstallment, ScheduleRepositoryTrait};
use obligo_core::Result;

use super::model::{NewInstallmentDB, ScheduleRowDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{installments, investors, projects, subscriptions, tranches};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

/// Select tuple shared by the snapshot load and the single-row lookup,
/// matching `ScheduleRowDB`'s field order.
macro_rules! schedule_row_select {
    () => {
        (
            installments::id,
            installments::subscription_id,
            installments::due_date,
            installments::gross_amount,
            installments::net_amount,
            installments::status,
            installments::paid_date,
            installments::paid_amount,
            subscriptions::invested_amount,
            investors::id,
            investors::name,
            investors::kind,
            investors::email,
            investors::advisor_name,
            investors::has_bank_details,
            projects::id,
            projects::name,
            tranches::id,
            tranches::name,
            tranches::maturity_date,
        )
    };
}

pub struct ScheduleRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ScheduleRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        ScheduleRepository { pool, writer }
    }

    pub fn load_schedule_impl(&self) -> Result<Vec<CouponInstallment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = installments::table
            .inner_join(
                subscriptions::table
                    .inner_join(investors::table)
                    .inner_join(tranches::table.inner_join(projects::table)),
            )
            .order(installments::due_date.asc())
            .limit(MAX_SCHEDULE_ROWS)
            .select(schedule_row_select!())
            .load::<ScheduleRowDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(CouponInstallment::from).collect())
    }

    pub fn get_installment_impl(&self, installment_id: &str) -> Result<CouponInstallment> {
        let mut conn = get_connection(&self.pool)?;
        let row = installments::table
            .inner_join(
                subscriptions::table
                    .inner_join(investors::table)
                    .inner_join(tranches::table.inner_join(projects::table)),
            )
            .filter(installments::id.eq(installment_id))
            .select(schedule_row_select!())
            .first::<ScheduleRowDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(CouponInstallment::from(row))
    }
}

#[async_trait]
impl ScheduleRepositoryTrait for ScheduleRepository {
    fn load_schedule(&self) -> Result<Vec<CouponInstallment>> {
        self.load_schedule_impl()
    }

    fn get_installment(&self, installment_id: &str) -> Result<CouponInstallment> {
        self.get_installment_impl(installment_id)
    }

    async fn insert_installments(
        &self,
        new_installments: Vec<NewCouponInstallment>,
    ) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let rows: Vec<NewInstallmentDB> = new_installments
                    .into_iter()
                    .map(|domain| {
                        let mut row: NewInstallmentDB = domain.into();
                        row.id = Some(Uuid::new_v4().to_string());
                        row
                    })
                    .collect();
                Ok(diesel::insert_into(installments::table)
                    .values(&rows)
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
