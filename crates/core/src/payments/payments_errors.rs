use thiserror::Error;

/// Payment-specific failure modes.
#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Installment {0} is already marked paid")]
    AlreadyPaid(String),

    #[error("Installment {0} has no recorded payment")]
    NoPaymentRecorded(String),

    #[error("Invalid payment amount: {0}")]
    InvalidAmount(String),
}
