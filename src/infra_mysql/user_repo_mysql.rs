use crate::application_port::AuthError;
use crate::domain_model::{UserId, UserRecord};
use crate::domain_port::UserRepo;
use sqlx::{MySqlPool, Row};

pub struct MySqlUserRepo {
    pool: MySqlPool,
}

impl MySqlUserRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserRepo { pool }
    }
}

fn record_from_row(row: &sqlx::mysql::MySqlRow) -> UserRecord {
    UserRecord {
        user_id: row.get::<UserId, _>("user_id"),
        email: row.get::<String, _>("email"),
        login: row.get::<String, _>("login"),
        password: row.get::<String, _>("password"),
    }
}

#[async_trait::async_trait]
impl UserRepo for MySqlUserRepo {
    async fn insert(&self, record: &UserRecord) -> Result<(), AuthError> {
        sqlx::query(
            r#"
INSERT INTO user (user_id, email, login, password)
VALUES (?, ?, ?, ?)
"#,
        )
        .bind(record.user_id)
        .bind(&record.email)
        .bind(&record.login)
        .bind(&record.password)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::StoreFailure(e.to_string()))?;

        Ok(())
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<UserRecord>, AuthError> {
        let row = sqlx::query("SELECT user_id, email, login, password FROM user WHERE login = ?")
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::StoreFailure(format!("query by login: {e}")))?;

        Ok(row.as_ref().map(record_from_row))
    }

    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserRecord>, AuthError> {
        let row = sqlx::query("SELECT user_id, email, login, password FROM user WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AuthError::StoreFailure(format!("query by id: {e}")))?;

        Ok(row.as_ref().map(record_from_row))
    }

    async fn login_or_email_taken(&self, login: &str, email: &str) -> Result<bool, AuthError> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM user WHERE login = ? OR email = ?"#)
                .bind(login)
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AuthError::StoreFailure(e.to_string()))?;

        Ok(count > 0)
    }
}
