//! SQLite store adapters.
#![allow(clippy::collapsible_if)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use xchange_types::{CurrencyRate, PreferenceKey, PreferenceStore, RateStore, RepoError};

use crate::types::{DbCurrencyRate, DbPreference};

// ─────────────────────────────────────────────────────────────────────────────
// Connection
// ─────────────────────────────────────────────────────────────────────────────

/// Connects to `database_url` and runs the migrations.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    // Ensure on-disk SQLite target directory exists (no-op for in-memory).
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        let path = path.split('?').next().unwrap_or(path);
        if path != ":memory:" {
            let p = std::path::Path::new(path);
            if let Some(parent) = p.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;
    migrate(&pool).await?;

    tracing::debug!(database_url, "SQLite stores ready");
    Ok(pool)
}

/// Creates the schema on an existing pool.
pub async fn migrate(pool: &SqlitePool) -> Result<(), RepoError> {
    let ddl_rates = include_str!("../migrations/0001_create_currency_rates.sql");
    sqlx::query(ddl_rates)
        .execute(pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

    let ddl_preferences = include_str!("../migrations/0002_create_preferences.sql");
    sqlx::query(ddl_preferences)
        .execute(pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate store
// ─────────────────────────────────────────────────────────────────────────────

/// Rate cache persisted in the `currency_rates` table.
#[derive(Debug, Clone)]
pub struct SqliteRateStore {
    pool: SqlitePool,
}

impl SqliteRateStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn try_create(&self, rate: &CurrencyRate) -> Result<(), RepoError> {
        sqlx::query(r#"INSERT INTO currency_rates (code, name, rate) VALUES (?, ?, ?)"#)
            .bind(&rate.code)
            .bind(&rate.name)
            .bind(rate.rate)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    RepoError::Conflict(format!("currency {} already exists", rate.code))
                }
                other => RepoError::Database(other.to_string()),
            })?;
        Ok(())
    }

    async fn try_retrieve(&self) -> Result<Vec<CurrencyRate>, RepoError> {
        let rows: Vec<DbCurrencyRate> =
            sqlx::query_as(r#"SELECT code, name, rate FROM currency_rates ORDER BY code"#)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(DbCurrencyRate::into_domain).collect())
    }

    async fn try_update(&self, rate: &CurrencyRate) -> Result<(), RepoError> {
        let result = sqlx::query(r#"UPDATE currency_rates SET name = ?, rate = ? WHERE code = ?"#)
            .bind(&rate.name)
            .bind(rate.rate)
            .bind(&rate.code)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(rate.code.clone()));
        }
        Ok(())
    }

    async fn try_delete(&self, rate: &CurrencyRate) -> Result<(), RepoError> {
        let result = sqlx::query(r#"DELETE FROM currency_rates WHERE code = ?"#)
            .bind(&rate.code)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(rate.code.clone()));
        }
        Ok(())
    }

    async fn try_exists(&self, rate: &CurrencyRate) -> Result<bool, RepoError> {
        let row: Option<(i64,)> = sqlx::query_as(r#"SELECT 1 FROM currency_rates WHERE code = ?"#)
            .bind(&rate.code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(row.is_some())
    }
}

#[async_trait]
impl RateStore for SqliteRateStore {
    async fn create(&self, rate: &CurrencyRate) -> bool {
        match self.try_create(rate).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(code = %rate.code, error = %e, "Failed while creating currency rate");
                false
            }
        }
    }

    async fn retrieve(&self) -> Vec<CurrencyRate> {
        self.try_retrieve().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed while retrieving currency rates");
            Vec::new()
        })
    }

    async fn update(&self, rate: &CurrencyRate) -> bool {
        match self.try_update(rate).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(code = %rate.code, error = %e, "Failed while updating currency rate");
                false
            }
        }
    }

    async fn delete(&self, rate: &CurrencyRate) -> bool {
        match self.try_delete(rate).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(code = %rate.code, error = %e, "Failed while deleting currency rate");
                false
            }
        }
    }

    async fn exists(&self, rate: &CurrencyRate) -> bool {
        self.try_exists(rate).await.unwrap_or_else(|e| {
            tracing::warn!(code = %rate.code, error = %e, "Failed while checking currency rate");
            false
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Preference store
// ─────────────────────────────────────────────────────────────────────────────

/// Preference values persisted in the `preferences` table.
#[derive(Debug, Clone)]
pub struct SqlitePreferenceStore {
    pool: SqlitePool,
}

impl SqlitePreferenceStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn try_set(&self, key: PreferenceKey, value: DateTime<Utc>) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO preferences (key, value) VALUES (?, ?)
               ON CONFLICT(key) DO UPDATE SET value = excluded.value"#,
        )
        .bind(key.as_str())
        .bind(value.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;
        Ok(())
    }

    async fn try_get(&self, key: PreferenceKey) -> Result<Option<DateTime<Utc>>, RepoError> {
        let row: Option<DbPreference> =
            sqlx::query_as(r#"SELECT key, value FROM preferences WHERE key = ?"#)
                .bind(key.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbPreference::into_timestamp).transpose()
    }

    async fn try_remove(&self, key: PreferenceKey) -> Result<(), RepoError> {
        sqlx::query(r#"DELETE FROM preferences WHERE key = ?"#)
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for SqlitePreferenceStore {
    async fn set_timestamp(&self, key: PreferenceKey, value: DateTime<Utc>) {
        if let Err(e) = self.try_set(key, value).await {
            tracing::warn!(%key, error = %e, "Failed while saving preference");
        }
    }

    async fn get_timestamp(&self, key: PreferenceKey) -> Option<DateTime<Utc>> {
        self.try_get(key).await.unwrap_or_else(|e| {
            tracing::warn!(%key, error = %e, "Failed while reading preference");
            None
        })
    }

    async fn remove(&self, key: PreferenceKey) {
        if let Err(e) = self.try_remove(key).await {
            tracing::warn!(%key, error = %e, "Failed while removing preference");
        }
    }
}
