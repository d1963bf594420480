use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::debug;

use crate::domain::value_objects::billing::{BillingContext, ChargeResult};
use crate::domain::value_objects::discounts::{DiscountKind, DiscountSpec};
use crate::domain::value_objects::enums::charge_modes::ChargeMode;

/// Fixed divisor for proration. Commercial-month convention: the daily rate
/// is always price/30, never price/actual-month-length.
pub const COMMERCIAL_MONTH_DAYS: i64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BillingError {
    #[error("invalid billing configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid billing interval: {0}")]
    InvalidInterval(String),
}

pub type BillingResult<T> = std::result::Result<T, BillingError>;

/// Resolves the next due date from the enrollment's billing day. If the
/// billing day has not passed yet this month (reference day included), the
/// charge is due this month; otherwise next month, rolling the year over in
/// December. The due day is restricted to 1..=28 so it exists in every
/// month, February included.
pub fn resolve_next_due_date(
    due_day_of_month: u32,
    reference_date: NaiveDate,
) -> BillingResult<NaiveDate> {
    if !(1..=28).contains(&due_day_of_month) {
        return Err(BillingError::InvalidConfiguration(format!(
            "due day of month must be within 1..=28, got {}",
            due_day_of_month
        )));
    }

    let due_date = if reference_date.day() <= due_day_of_month {
        NaiveDate::from_ymd_opt(
            reference_date.year(),
            reference_date.month(),
            due_day_of_month,
        )
    } else if reference_date.month() == 12 {
        NaiveDate::from_ymd_opt(reference_date.year() + 1, 1, due_day_of_month)
    } else {
        NaiveDate::from_ymd_opt(
            reference_date.year(),
            reference_date.month() + 1,
            due_day_of_month,
        )
    };

    // Days 1..=28 exist in every month.
    due_date.ok_or_else(|| {
        BillingError::InvalidConfiguration(format!(
            "due day {} does not exist in the target month",
            due_day_of_month
        ))
    })
}

/// Whole calendar days from `reference_date` to `due_date`. Both are pure
/// dates, so the difference is already a whole number of days. A due date
/// behind the reference date is a caller bug and is rejected instead of
/// being returned as a negative count.
pub fn days_until_due(reference_date: NaiveDate, due_date: NaiveDate) -> BillingResult<i64> {
    let days = due_date.signed_duration_since(reference_date).num_days();
    if days < 0 {
        return Err(BillingError::InvalidInterval(format!(
            "due date {} precedes reference date {}",
            due_date, reference_date
        )));
    }
    Ok(days)
}

/// Charge amount before discount. Full mode is the monthly price unchanged;
/// prorated mode charges `days_until_due` days at the 30-day commercial
/// daily rate, rounded half away from zero. Zero days is legal and yields a
/// zero prorated charge.
pub fn compute_gross_amount(
    monthly_price_minor: i64,
    mode: ChargeMode,
    days_until_due: i64,
) -> BillingResult<i64> {
    if monthly_price_minor < 0 {
        return Err(BillingError::InvalidConfiguration(format!(
            "monthly price must be non-negative, got {}",
            monthly_price_minor
        )));
    }

    match mode {
        ChargeMode::Full => Ok(monthly_price_minor),
        ChargeMode::Prorated => prorate_over_month(monthly_price_minor, days_until_due),
    }
}

/// Minor units actually deducted from `gross_amount_minor`. Expired or
/// absent discounts deduct nothing. A fixed discount against a prorated
/// charge is scaled by the same 30-day factor as the charge itself, so a
/// flat monthly discount never wipes out a disproportionate share of a
/// small partial-period amount; against a full charge it applies as-is.
/// Percentage discounts are proportional already and are never separately
/// prorated. The result is clamped to the gross amount.
pub fn compute_discount(
    gross_amount_minor: i64,
    spec: &DiscountSpec,
    reference_date: NaiveDate,
    mode: ChargeMode,
    days_until_due: i64,
) -> BillingResult<i64> {
    if gross_amount_minor < 0 {
        return Err(BillingError::InvalidConfiguration(format!(
            "gross amount must be non-negative, got {}",
            gross_amount_minor
        )));
    }

    let discount = match spec.kind {
        DiscountKind::None => 0,
        DiscountKind::Fixed { amount_minor } => {
            if amount_minor < 0 {
                return Err(BillingError::InvalidConfiguration(format!(
                    "fixed discount must be non-negative, got {}",
                    amount_minor
                )));
            }
            if spec.is_expired(reference_date) {
                0
            } else {
                match mode {
                    ChargeMode::Full => amount_minor,
                    ChargeMode::Prorated => prorate_over_month(amount_minor, days_until_due)?,
                }
            }
        }
        DiscountKind::Percentage { percent } => {
            if !(0.0..=100.0).contains(&percent) {
                return Err(BillingError::InvalidConfiguration(format!(
                    "discount percentage must be within 0..=100, got {}",
                    percent
                )));
            }
            if spec.is_expired(reference_date) {
                0
            } else {
                (gross_amount_minor as f64 * percent / 100.0).round() as i64
            }
        }
    };

    Ok(discount.min(gross_amount_minor))
}

/// Single entry point composing the calculator: resolves the due date,
/// counts the days, computes the gross amount for the requested mode,
/// applies the discount and floors the final amount at zero.
pub fn compute_charge(
    context: &BillingContext,
    mode: ChargeMode,
    discount: &DiscountSpec,
) -> BillingResult<ChargeResult> {
    let due_date = resolve_next_due_date(context.due_day_of_month, context.reference_date)?;
    let days = days_until_due(context.reference_date, due_date)?;
    let gross_amount_minor = compute_gross_amount(context.monthly_price_minor, mode, days)?;
    let discount_applied_minor =
        compute_discount(gross_amount_minor, discount, context.reference_date, mode, days)?;
    let final_amount_minor = (gross_amount_minor - discount_applied_minor).max(0);

    debug!(
        %due_date,
        days_until_due = days,
        gross_amount_minor,
        discount_applied_minor,
        final_amount_minor,
        "proration: charge computed"
    );

    Ok(ChargeResult {
        due_date,
        days_until_due: days,
        gross_amount_minor,
        discount_applied_minor,
        final_amount_minor,
    })
}

/// `round(amount / 30 * days)`, carried out in integer arithmetic so money
/// never passes through floats: for non-negative operands,
/// `(2n + d) / 2d` is the half-away-from-zero rounding of `n / d`.
fn prorate_over_month(amount_minor: i64, days_until_due: i64) -> BillingResult<i64> {
    if days_until_due < 0 {
        return Err(BillingError::InvalidInterval(format!(
            "days until due must be non-negative, got {}",
            days_until_due
        )));
    }

    let numerator = i128::from(amount_minor) * i128::from(days_until_due);
    let denominator = i128::from(COMMERCIAL_MONTH_DAYS);
    let rounded = (2 * numerator + denominator) / (2 * denominator);

    i64::try_from(rounded).map_err(|_| {
        BillingError::InvalidConfiguration(format!(
            "prorated amount for {} minor units over {} days is out of range",
            amount_minor, days_until_due
        ))
    })
}
