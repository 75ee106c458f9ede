use rust_decimal::Decimal;

/// Decimal precision for amounts shown to the operator
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Upper bound on the installment snapshot loaded per refresh
pub const MAX_SCHEDULE_ROWS: i64 = 10_000;

/// Flat withholding rate applied to coupons paid to individual investors
/// (French PFU). Company investors are paid gross.
pub const WITHHOLDING_TAX_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// Default page size for schedule search
pub const DEFAULT_PAGE_SIZE: i64 = 50;
