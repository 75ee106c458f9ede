use obligo_core::errors::ValidationError;
use obligo_core::schedule::{InstallmentStatus, NewCouponInstallment};
use obligo_core::subscriptions::{NewSubscription, Subscription, SubscriptionRepositoryTrait};
use obligo_core::{Error, Result};

use super::model::{NewSubscriptionDB, SubscriptionDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schedule::NewInstallmentDB;
use crate::schema::{installments, subscriptions};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct SubscriptionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl SubscriptionRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        SubscriptionRepository { pool, writer }
    }

    pub fn load_subscriptions_impl(&self) -> Result<Vec<Subscription>> {
        let mut conn = get_connection(&self.pool)?;
        let subscriptions_db = subscriptions::table
            .order(subscriptions::subscription_date.asc())
            .load::<SubscriptionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(subscriptions_db
            .into_iter()
            .map(Subscription::from)
            .collect())
    }

    pub fn get_subscription_impl(&self, subscription_id: &str) -> Result<Subscription> {
        let mut conn = get_connection(&self.pool)?;
        let subscription_db = subscriptions::table
            .find(subscription_id)
            .first::<SubscriptionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(Subscription::from(subscription_db))
    }
}

#[async_trait]
impl SubscriptionRepositoryTrait for SubscriptionRepository {
    fn load_subscriptions(&self) -> Result<Vec<Subscription>> {
        self.load_subscriptions_impl()
    }

    fn get_subscription(&self, subscription_id: &str) -> Result<Subscription> {
        self.get_subscription_impl(subscription_id)
    }

    async fn insert_subscription_with_installments(
        &self,
        new_subscription: NewSubscription,
        new_installments: Vec<NewCouponInstallment>,
    ) -> Result<Subscription> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Subscription> {
                let mut new_subscription_db: NewSubscriptionDB = new_subscription.into();
                new_subscription_db
                    .id
                    .get_or_insert_with(|| Uuid::new_v4().to_string());

                let result_db = diesel::insert_into(subscriptions::table)
                    .values(&new_subscription_db)
                    .returning(SubscriptionDB::as_returning())
                    .get_result::<SubscriptionDB>(conn)
                    .map_err(StorageError::from)?;

                let installment_rows: Vec<NewInstallmentDB> = new_installments
                    .into_iter()
                    .map(|domain| {
                        let mut row: NewInstallmentDB = domain.into();
                        row.id = Some(Uuid::new_v4().to_string());
                        row.subscription_id = result_db.id.clone();
                        row
                    })
                    .collect();
                diesel::insert_into(installments::table)
                    .values(&installment_rows)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(Subscription::from(result_db))
            })
            .await
    }

    async fn delete_subscription(&self, subscription_id_to_delete: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let paid_count: i64 = installments::table
                    .filter(installments::subscription_id.eq(&subscription_id_to_delete))
                    .filter(installments::status.eq(InstallmentStatus::Paid.as_str()))
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if paid_count > 0 {
                    return Err(Error::Validation(ValidationError::InvalidInput(format!(
                        "Subscription {} has {} paid installment(s) and cannot be deleted",
                        subscription_id_to_delete, paid_count
                    ))));
                }

                diesel::delete(
                    installments::table
                        .filter(installments::subscription_id.eq(&subscription_id_to_delete)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(diesel::delete(
                    subscriptions::table.filter(subscriptions::id.eq(&subscription_id_to_delete)),
                )
                .execute(conn)
                .map_err(StorageError::from)?)
            })
            .await
    }
}
