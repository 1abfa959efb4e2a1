//! Identity repository.
//!
//! Email is the identity key. The UNIQUE index on `identities.email` is the
//! authoritative uniqueness check: `find_by_email` followed by `create` is not
//! atomic, so callers that need find-or-create use `create_or_get`, which
//! treats a constraint violation as "someone else won the race" and re-reads.
//!
//! Every call is bounded by the timeout given to `new`.

use crate::{DbError, Result as DbErrorResult};

use ident_core::{AuthProvider, Credential, ErrorLocation, UserIdentity, normalize_email};

use std::panic::Location;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const FIND_BY_EMAIL: &str = r#"
    SELECT id, display_name, email, auth_provider, password_hash, external_id,
        organisation, last_login_at, created_at
    FROM identities
    WHERE email = ?
"#;

const FIND_BY_ID: &str = r#"
    SELECT id, display_name, email, auth_provider, password_hash, external_id,
        organisation, last_login_at, created_at
    FROM identities
    WHERE id = ?
"#;

#[derive(Clone)]
pub struct IdentityRepository {
    pool: SqlitePool,
    timeout: Duration,
}

impl IdentityRepository {
    pub fn new(pool: SqlitePool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<UserIdentity>> {
        let email = normalize_email(email);

        self.bounded("find_by_email", async {
            let row = sqlx::query(FIND_BY_EMAIL)
                .bind(&email)
                .fetch_optional(&self.pool)
                .await?;

            row.as_ref().map(identity_from_row).transpose()
        })
        .await
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<UserIdentity>> {
        let id = id.to_string();

        self.bounded("find_by_id", async {
            let row = sqlx::query(FIND_BY_ID)
                .bind(&id)
                .fetch_optional(&self.pool)
                .await?;

            row.as_ref().map(identity_from_row).transpose()
        })
        .await
    }

    /// Insert a new identity. A duplicate email surfaces as `DbError::Conflict`.
    pub async fn create(&self, identity: &UserIdentity) -> DbErrorResult<()> {
        let id = identity.id.to_string();
        let email = normalize_email(&identity.email);
        let auth_provider = identity.auth_provider().as_str();
        let last_login_at = identity.last_login_at.timestamp();
        let created_at = identity.created_at.timestamp();

        self.bounded("create", async {
            sqlx::query(
                r#"
                    INSERT INTO identities (
                        id, display_name, email, auth_provider, password_hash, external_id,
                        organisation, last_login_at, created_at
                    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&id)
            .bind(&identity.display_name)
            .bind(&email)
            .bind(auth_provider)
            .bind(identity.password_hash())
            .bind(identity.external_id())
            .bind(identity.organisation.as_deref())
            .bind(last_login_at)
            .bind(created_at)
            .execute(&self.pool)
            .await?;

            Ok::<_, DbError>(())
        })
        .await
    }

    /// Insert, or return the record that already owns this email.
    ///
    /// The returned identity may differ from the one passed in (including its
    /// provider); callers decide whether that is acceptable.
    pub async fn create_or_get(&self, identity: &UserIdentity) -> DbErrorResult<UserIdentity> {
        match self.create(identity).await {
            Ok(()) => Ok(identity.clone()),
            Err(DbError::Conflict { field, location }) => {
                debug!("Identity insert lost race on '{}', re-reading", field);

                match self.find_by_email(&identity.email).await? {
                    Some(existing) => Ok(existing),
                    // Deleted between the insert and the re-read
                    None => Err(DbError::Conflict { field, location }),
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Stamp a successful authentication. Idempotent; a missing email is not an error.
    pub async fn touch_last_login(&self, email: &str) -> DbErrorResult<()> {
        let email = normalize_email(email);
        let now = Utc::now().timestamp();

        self.bounded("touch_last_login", async {
            let result = sqlx::query("UPDATE identities SET last_login_at = ? WHERE email = ?")
                .bind(now)
                .bind(&email)
                .execute(&self.pool)
                .await?;

            if result.rows_affected() == 0 {
                debug!("touch_last_login matched no identity");
            }

            Ok::<_, DbError>(())
        })
        .await
    }

    async fn bounded<T, F>(&self, operation: &'static str, fut: F) -> DbErrorResult<T>
    where
        F: Future<Output = DbErrorResult<T>>,
    {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    "Identity store call '{}' timed out after {:?}",
                    operation, self.timeout
                );
                Err(DbError::Timeout {
                    operation,
                    after: self.timeout,
                    location: ErrorLocation::from(Location::caller()),
                })
            }
        }
    }
}

fn identity_from_row(row: &SqliteRow) -> DbErrorResult<UserIdentity> {
    let id: String = row.try_get("id")?;
    let provider: String = row.try_get("auth_provider")?;
    let password_hash: Option<String> = row.try_get("password_hash")?;
    let external_id: Option<String> = row.try_get("external_id")?;

    let auth_provider = AuthProvider::from_str(&provider)
        .map_err(|e| DbError::decode(format!("identities.auth_provider: {e}")))?;

    let credential = match (auth_provider, password_hash, external_id) {
        (AuthProvider::Local, Some(password_hash), None) => Credential::Local { password_hash },
        (AuthProvider::OAuth, None, Some(external_id)) => Credential::OAuth { external_id },
        _ => {
            return Err(DbError::decode(format!(
                "identity {id} has credentials inconsistent with provider '{provider}'"
            )));
        }
    };

    Ok(UserIdentity {
        id: Uuid::parse_str(&id)
            .map_err(|e| DbError::decode(format!("Invalid UUID in identities.id: {e}")))?,
        display_name: row.try_get("display_name")?,
        email: row.try_get("email")?,
        credential,
        organisation: row.try_get("organisation")?,
        last_login_at: timestamp(row.try_get("last_login_at")?, "last_login_at")?,
        created_at: timestamp(row.try_get("created_at")?, "created_at")?,
    })
}

fn timestamp(secs: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::decode(format!("Invalid timestamp in identities.{column}")))
}
