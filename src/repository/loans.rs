//! Loans repository for database operations

use chrono::{DateTime, Duration, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::Book,
    models::loan::{
        days_overdue, fine_for_days, ActiveLoan, CreateLoan, Loan, OverdueLoan, ReturnOutcome,
        LOAN_PERIOD_DAYS,
    },
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// List all loans
    pub async fn list(&self) -> AppResult<Vec<Loan>> {
        let loans = sqlx::query_as::<_, Loan>("SELECT * FROM loans ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(loans)
    }

    /// Create a new loan. The book row is locked for the availability check
    /// and decrement, so two checkouts of the last copy cannot both succeed.
    pub async fn create(&self, loan: &CreateLoan, now: DateTime<Utc>) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
            .bind(loan.book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", loan.book_id)))?;

        if book.available_copies <= 0 {
            return Err(AppError::Conflict(format!(
                "No copies of \"{}\" available",
                book.title
            )));
        }

        sqlx::query("UPDATE books SET available_copies = available_copies - 1 WHERE id = $1")
            .bind(loan.book_id)
            .execute(&mut *tx)
            .await?;

        let due_date = now + Duration::days(LOAN_PERIOD_DAYS);

        let created = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO loans (user_id, book_id, loan_date, due_date, fine)
            VALUES ($1, $2, $3, $4, 0)
            RETURNING *
            "#,
        )
        .bind(loan.user_id)
        .bind(loan.book_id)
        .bind(now)
        .bind(due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(created)
    }

    /// Return a loan: stamp the return date, finalize the fine and release
    /// the copy. A loan can only be returned once.
    pub async fn return_loan(&self, loan_id: i32, now: DateTime<Utc>) -> AppResult<ReturnOutcome> {
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>("SELECT * FROM loans WHERE id = $1 FOR UPDATE")
            .bind(loan_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", loan_id)))?;

        if loan.return_date.is_some() {
            return Err(AppError::Conflict("Loan already returned".to_string()));
        }

        let days = days_overdue(loan.due_date, now);
        let fine = fine_for_days(days);

        let updated = sqlx::query_as::<_, Loan>(
            "UPDATE loans SET return_date = $1, fine = $2 WHERE id = $3 RETURNING *",
        )
        .bind(now)
        .bind(fine)
        .bind(loan_id)
        .fetch_one(&mut *tx)
        .await?;

        // available_copies can never pass total_copies, even if inventory
        // was shrunk while the copy was out
        sqlx::query(
            "UPDATE books SET available_copies = LEAST(available_copies + 1, total_copies) WHERE id = $1",
        )
        .bind(loan.book_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(ReturnOutcome {
            loan: updated,
            is_overdue: days > 0,
            days_overdue: days,
            fine,
        })
    }

    /// Unreturned loans past their due date, oldest due date first.
    /// Fines are projected, not persisted.
    pub async fn list_overdue(&self, now: DateTime<Utc>) -> AppResult<Vec<OverdueLoan>> {
        let loans = sqlx::query_as::<_, Loan>(
            r#"
            SELECT * FROM loans
            WHERE return_date IS NULL AND due_date < $1
            ORDER BY due_date ASC, id ASC
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans
            .into_iter()
            .map(|loan| {
                let days = days_overdue(loan.due_date, now);
                OverdueLoan {
                    id: loan.id,
                    user_id: loan.user_id,
                    book_id: loan.book_id,
                    loan_date: loan.loan_date,
                    due_date: loan.due_date,
                    days_overdue: days,
                    potential_fine: fine_for_days(days),
                }
            })
            .collect())
    }

    /// Active loans for a user, with live overdue projection
    pub async fn list_active_for_user(
        &self,
        user_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<ActiveLoan>> {
        let loans = sqlx::query_as::<_, Loan>(
            r#"
            SELECT * FROM loans
            WHERE user_id = $1 AND return_date IS NULL
            ORDER BY due_date ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans
            .into_iter()
            .map(|loan| {
                let days = days_overdue(loan.due_date, now);
                ActiveLoan {
                    id: loan.id,
                    book_id: loan.book_id,
                    loan_date: loan.loan_date,
                    due_date: loan.due_date,
                    is_overdue: days > 0,
                    days_overdue: days,
                    potential_fine: fine_for_days(days),
                }
            })
            .collect())
    }

    /// Count active loans
    pub async fn count_active(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM loans WHERE return_date IS NULL")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Count overdue loans
    pub async fn count_overdue(&self, now: DateTime<Utc>) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM loans WHERE return_date IS NULL AND due_date < $1",
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
