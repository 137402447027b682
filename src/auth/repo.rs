use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{NewUser, SessionUser, User};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique key (email) is already taken.
    #[error("user already exists")]
    Conflict,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Narrow repository the auth flows depend on.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Full record, including the password hash.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Projected record used to populate the request context.
    async fn find_session_user(&self, id: Uuid) -> Result<Option<SessionUser>, StoreError>;

    /// Inserts a user. Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, role, image, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_session_user(&self, id: Uuid) -> Result<Option<SessionUser>, StoreError> {
        let user = sqlx::query_as::<_, SessionUser>(
            r#"
            SELECT id, image, name, email, role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password, role)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password, role, image, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            let unique = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if unique {
                StoreError::Conflict
            } else {
                StoreError::Database(e)
            }
        })
    }
}
