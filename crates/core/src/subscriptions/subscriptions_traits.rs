use crate::errors::Result;
use crate::schedule::NewCouponInstallment;
use crate::subscriptions::subscriptions_model::{NewSubscription, Subscription};
use async_trait::async_trait;

/// Trait for subscription repository operations.
///
/// Inserting a subscription and its generated installments is a single
/// repository call so the storage layer can commit both in one transaction.
/// Deleting refuses when any installment of the subscription is paid.
#[async_trait]
pub trait SubscriptionRepositoryTrait: Send + Sync {
    fn load_subscriptions(&self) -> Result<Vec<Subscription>>;
    fn get_subscription(&self, subscription_id: &str) -> Result<Subscription>;
    async fn insert_subscription_with_installments(
        &self,
        new_subscription: NewSubscription,
        installments: Vec<NewCouponInstallment>,
    ) -> Result<Subscription>;
    async fn delete_subscription(&self, subscription_id_to_delete: String) -> Result<usize>;
}

/// Trait for subscription service operations
#[async_trait]
pub trait SubscriptionServiceTrait: Send + Sync {
    fn get_subscriptions(&self) -> Result<Vec<Subscription>>;
    fn get_subscription(&self, subscription_id: &str) -> Result<Subscription>;
    async fn create_subscription(&self, new_subscription: NewSubscription)
        -> Result<Subscription>;
    async fn delete_subscription(&self, subscription_id_to_delete: String) -> Result<usize>;
}
