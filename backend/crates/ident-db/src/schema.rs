//! Declarative schema for the identity store.
//!
//! Every table and index the store relies on is listed here explicitly and
//! applied in order at startup. All statements are `IF NOT EXISTS`, so
//! `migrate` is safe to run against an existing database.

use crate::{DbError, Result as DbErrorResult};

use ident_core::ErrorLocation;

use std::panic::Location;

use log::{debug, info};
use sqlx::SqlitePool;

/// One named DDL statement
#[derive(Debug, Clone, Copy)]
pub struct SchemaObject {
    pub name: &'static str,
    pub sql: &'static str,
}

pub const SCHEMA: &[SchemaObject] = &[
    SchemaObject {
        name: "identities",
        sql: r#"
            CREATE TABLE IF NOT EXISTS identities (
                id TEXT PRIMARY KEY NOT NULL,
                display_name TEXT NOT NULL,
                email TEXT NOT NULL,
                auth_provider TEXT NOT NULL CHECK (auth_provider IN ('local', 'oauth')),
                password_hash TEXT,
                external_id TEXT,
                organisation TEXT,
                last_login_at INTEGER NOT NULL,
                created_at INTEGER NOT NULL,
                CHECK (
                    (auth_provider = 'local' AND password_hash IS NOT NULL AND external_id IS NULL)
                    OR
                    (auth_provider = 'oauth' AND external_id IS NOT NULL AND password_hash IS NULL)
                )
            )
        "#,
    },
    SchemaObject {
        name: "idx_identities_email",
        sql: "CREATE UNIQUE INDEX IF NOT EXISTS idx_identities_email ON identities (email)",
    },
];

/// Indexes earlier schemas created that must no longer exist
pub const RETIRED_INDEXES: &[&str] = &["idx_identities_provider_external_id"];

/// Apply `SCHEMA` and drop `RETIRED_INDEXES` in a single transaction.
pub async fn migrate(pool: &SqlitePool) -> DbErrorResult<()> {
    let mut tx = pool.begin().await?;

    for index in RETIRED_INDEXES {
        sqlx::query(&format!("DROP INDEX IF EXISTS {index}"))
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::Migration {
                message: format!("Failed to drop {}: {}", index, e),
                location: ErrorLocation::from(Location::caller()),
            })?;
    }

    for object in SCHEMA {
        debug!("Applying schema object {}", object.name);
        sqlx::query(object.sql)
            .execute(&mut *tx)
            .await
            .map_err(|e| DbError::Migration {
                message: format!("Failed to apply {}: {}", object.name, e),
                location: ErrorLocation::from(Location::caller()),
            })?;
    }

    tx.commit().await?;

    info!("Schema up to date ({} objects)", SCHEMA.len());
    Ok(())
}
