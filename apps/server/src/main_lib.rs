use std::sync::Arc;

use crate::{config::Config, proof_store::FsProofStore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use obligo_core::{
    investors::{InvestorService, InvestorServiceTrait},
    payments::{PaymentService, PaymentServiceTrait},
    projects::{ProjectService, ProjectServiceTrait},
    reminders::{EmailDraftClient, ReminderService, ReminderServiceTrait},
    schedule::{ScheduleService, ScheduleServiceTrait},
    subscriptions::{SubscriptionService, SubscriptionServiceTrait},
    tranches::{TrancheService, TrancheServiceTrait},
};
use obligo_storage_sqlite::{
    db, investors::InvestorRepository, payments::PaymentRepository, projects::ProjectRepository,
    schedule::ScheduleRepository, subscriptions::SubscriptionRepository,
    tranches::TrancheRepository,
};

pub struct AppState {
    pub project_service: Arc<dyn ProjectServiceTrait>,
    pub tranche_service: Arc<dyn TrancheServiceTrait>,
    pub investor_service: Arc<dyn InvestorServiceTrait>,
    pub subscription_service: Arc<dyn SubscriptionServiceTrait>,
    pub schedule_service: Arc<dyn ScheduleServiceTrait>,
    pub payment_service: Arc<dyn PaymentServiceTrait>,
    pub reminder_service: Arc<dyn ReminderServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("OB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let project_repo = Arc::new(ProjectRepository::new(pool.clone(), writer.clone()));
    let tranche_repo = Arc::new(TrancheRepository::new(pool.clone(), writer.clone()));
    let investor_repo = Arc::new(InvestorRepository::new(pool.clone(), writer.clone()));
    let subscription_repo = Arc::new(SubscriptionRepository::new(pool.clone(), writer.clone()));
    let schedule_repo = Arc::new(ScheduleRepository::new(pool.clone(), writer.clone()));
    let payment_repo = Arc::new(PaymentRepository::new(pool.clone(), writer.clone()));

    let proof_store = Arc::new(FsProofStore::new(&config.data_root));
    let draft_client = Arc::new(EmailDraftClient::new(
        &config.email_draft_url,
        &config.email_draft_token,
    ));

    let state = AppState {
        project_service: Arc::new(ProjectService::new(project_repo)),
        tranche_service: Arc::new(TrancheService::new(tranche_repo.clone())),
        investor_service: Arc::new(InvestorService::new(investor_repo.clone())),
        subscription_service: Arc::new(SubscriptionService::new(
            subscription_repo,
            tranche_repo,
            investor_repo,
        )),
        schedule_service: Arc::new(ScheduleService::new(schedule_repo.clone())),
        payment_service: Arc::new(PaymentService::new(
            payment_repo,
            schedule_repo.clone(),
            proof_store,
        )),
        reminder_service: Arc::new(ReminderService::new(schedule_repo, draft_client)),
    };
    Ok(Arc::new(state))
}
