//! Audit logs repository. Entries are append-only; there is no update or
//! delete path by design of the schema, and none here.

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::audit_log::{AuditLog, AuditQuery, RecordAudit},
};

#[derive(Clone)]
pub struct AuditLogsRepository {
    pool: Pool<Postgres>,
}

impl AuditLogsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get audit entry by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<AuditLog> {
        sqlx::query_as::<_, AuditLog>("SELECT * FROM audit_logs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Audit log with id {} not found", id)))
    }

    /// Append a new audit entry
    pub async fn insert(&self, entry: &RecordAudit) -> AppResult<AuditLog> {
        let created = sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (action, entity_type, entity_id, user_id, details, ip_address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(&entry.action)
        .bind(&entry.entity_type)
        .bind(entry.entity_id)
        .bind(entry.user_id)
        .bind(&entry.details)
        .bind(&entry.ip_address)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// List entries matching the given filters, oldest first
    pub async fn search(&self, query: &AuditQuery) -> AppResult<Vec<AuditLog>> {
        let mut conditions = Vec::new();
        let mut param_idx = 0;

        if query.entity_type.is_some() {
            param_idx += 1;
            conditions.push(format!("entity_type = ${}", param_idx));
        }
        if query.entity_id.is_some() {
            param_idx += 1;
            conditions.push(format!("entity_id = ${}", param_idx));
        }
        if query.user_id.is_some() {
            param_idx += 1;
            conditions.push(format!("user_id = ${}", param_idx));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let select_query = format!(
            "SELECT * FROM audit_logs {} ORDER BY timestamp ASC, id ASC",
            where_clause
        );

        let mut builder = sqlx::query_as::<_, AuditLog>(&select_query);
        if let Some(ref entity_type) = query.entity_type {
            builder = builder.bind(entity_type);
        }
        if let Some(entity_id) = query.entity_id {
            builder = builder.bind(entity_id);
        }
        if let Some(user_id) = query.user_id {
            builder = builder.bind(user_id);
        }

        let entries = builder.fetch_all(&self.pool).await?;
        Ok(entries)
    }
}
