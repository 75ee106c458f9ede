//! Subscriptions module - domain models, services, and traits.

mod subscriptions_model;
mod subscriptions_service;
mod subscriptions_traits;

pub use subscriptions_model::{NewSubscription, Subscription};
pub use subscriptions_service::{generate_installments, SubscriptionService};
pub use subscriptions_traits::{SubscriptionRepositoryTrait, SubscriptionServiceTrait};
