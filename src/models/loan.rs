//! Loan model, due date and fine policy

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan period granted at checkout
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Fine accrued per overdue day
pub fn daily_fine_rate() -> Decimal {
    Decimal::new(50, 2) // 0.50
}

/// Ceiling on the fine of a single loan
pub fn fine_cap() -> Decimal {
    Decimal::new(2500, 2) // 25.00
}

/// Whole days elapsed past the due date, never negative
pub fn days_overdue(due_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - due_date).num_days().max(0)
}

/// Fine for a number of overdue days: linear per day, capped, 2 decimals.
/// Shared by loan return and the overdue projection.
pub fn fine_for_days(days_overdue: i64) -> Decimal {
    (daily_fine_rate() * Decimal::from(days_overdue))
        .min(fine_cap())
        .round_dp(2)
}

/// Loan model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub fine: Decimal,
}

/// Create loan request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLoan {
    pub user_id: i32,
    pub book_id: i32,
}

/// Result of returning a loan
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReturnOutcome {
    pub loan: Loan,
    pub is_overdue: bool,
    pub days_overdue: i64,
    pub fine: Decimal,
}

/// Unreturned loan past its due date, with the fine it would incur if
/// returned now. Nothing here is persisted.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OverdueLoan {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub days_overdue: i64,
    pub potential_fine: Decimal,
}

/// Active loan with live overdue projection, for user detail views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActiveLoan {
    pub id: i32,
    pub book_id: i32,
    pub loan_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub is_overdue: bool,
    pub days_overdue: i64,
    pub potential_fine: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn fine_is_linear_then_capped() {
        assert_eq!(fine_for_days(0), Decimal::new(0, 2));
        assert_eq!(fine_for_days(1), Decimal::new(50, 2));
        assert_eq!(fine_for_days(10), Decimal::new(500, 2));
        assert_eq!(fine_for_days(49), Decimal::new(2450, 2));
        assert_eq!(fine_for_days(50), Decimal::new(2500, 2));
        assert_eq!(fine_for_days(365), Decimal::new(2500, 2));
    }

    #[test]
    fn days_overdue_floors_partial_days() {
        let due = Utc::now();
        assert_eq!(days_overdue(due, due + Duration::hours(23)), 0);
        assert_eq!(days_overdue(due, due + Duration::hours(25)), 1);
        assert_eq!(days_overdue(due, due + Duration::days(20)), 20);
    }

    #[test]
    fn days_overdue_is_zero_before_due_date() {
        let due = Utc::now();
        assert_eq!(days_overdue(due, due - Duration::days(3)), 0);
        assert_eq!(days_overdue(due, due), 0);
    }

    #[test]
    fn twenty_days_late_costs_ten() {
        let due = Utc::now() - Duration::days(20);
        let days = days_overdue(due, Utc::now());
        assert_eq!(days, 20);
        assert_eq!(fine_for_days(days), Decimal::new(1000, 2));
    }
}
