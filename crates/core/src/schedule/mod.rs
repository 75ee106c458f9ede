//! Coupon schedule aggregator - models, pure engine, service, and traits.

pub mod schedule_engine;
mod schedule_model;
mod schedule_service;
mod schedule_traits;

pub use schedule_model::{
    ComputedStatus, CouponInstallment, DashboardBucket, DashboardStats, DateGroup,
    DateGroupStatus, InstallmentStatus, NewCouponInstallment, ScheduleFilter, ScheduleItem,
    ScheduleSearchResponse, TrancheGroup,
};
pub use schedule_service::ScheduleService;
pub use schedule_traits::{ScheduleRepositoryTrait, ScheduleServiceTrait};
