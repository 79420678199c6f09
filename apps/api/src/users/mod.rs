//! User-facing résumé storage and onboarding — thin glue over the `users`
//! table.

pub mod handlers;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::UserRow;

pub async fn get_user(db: &PgPool, user_id: Uuid) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

pub async fn save_resume_text(
    db: &PgPool,
    user_id: Uuid,
    resume_text: &str,
) -> Result<(), AppError> {
    let done = sqlx::query("UPDATE users SET resume_text = $1 WHERE id = $2")
        .bind(resume_text)
        .bind(user_id)
        .execute(db)
        .await?;

    if done.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }
    Ok(())
}

pub async fn save_onboarding(
    db: &PgPool,
    user_id: Uuid,
    data: &serde_json::Value,
) -> Result<(), AppError> {
    let done = sqlx::query("UPDATE users SET onboarding = $1 WHERE id = $2")
        .bind(data)
        .bind(user_id)
        .execute(db)
        .await?;

    if done.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("User {user_id} not found")));
    }
    Ok(())
}
