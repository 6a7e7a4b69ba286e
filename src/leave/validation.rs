use chrono::{Datelike, NaiveDate};

use crate::error::ApiError;
use crate::model::leave::{LeaveRequest, LeaveStatus, PaymentType};
use crate::model::user::User;

/// Outcome of a successful pre-submission validation, handed to the
/// lifecycle engine so the day count is computed exactly once.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedLeave {
    pub days: u32,
    pub payment_type: PaymentType,
}

/// Count of Monday-Friday days in the inclusive range. 0 when the range
/// is inverted or covers only a weekend.
pub fn weekdays_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end < start {
        return 0;
    }
    let mut days = 0;
    let mut date = start;
    while date <= end {
        if date.weekday().number_from_monday() <= 5 {
            days += 1;
        }
        date = match date.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    days
}

/// Inclusive interval intersection.
pub fn ranges_overlap(
    new_start: NaiveDate,
    new_end: NaiveDate,
    existing_start: NaiveDate,
    existing_end: NaiveDate,
) -> bool {
    new_start <= existing_end && new_end >= existing_start
}

/// Decide whether a prospective request may be submitted against the
/// owner's current ledger snapshot and their existing requests.
///
/// Cancelled and rejected requests do not block the date range; pending
/// and approved ones do.
pub fn validate_draft(
    start_date: NaiveDate,
    end_date: NaiveDate,
    payment_type: PaymentType,
    owner: &User,
    existing: &[LeaveRequest],
) -> Result<ValidatedLeave, ApiError> {
    if owner.reports.is_none() {
        return Err(ApiError::MissingManager);
    }

    let days = weekdays_between(start_date, end_date);
    if days == 0 {
        return Err(ApiError::InvalidDateRange);
    }

    if days > owner.balance(payment_type) {
        return Err(ApiError::InsufficientBalance { payment_type });
    }

    let overlaps = existing.iter().any(|leave| {
        !matches!(
            leave.status,
            LeaveStatus::Cancelled | LeaveStatus::Rejected
        ) && ranges_overlap(start_date, end_date, leave.start_date, leave.end_date)
    });
    if overlaps {
        return Err(ApiError::OverlapsExistingRequest);
    }

    Ok(ValidatedLeave { days, payment_type })
}
