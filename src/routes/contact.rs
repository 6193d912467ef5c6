use crate::{error::AppError, models::Contact};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

// Same shape the original enforced (`^[^\s@]+@[^\s@]+\.[^\s@]+$`): one '@',
// no whitespace, and a dot somewhere inside the domain. Deliberately not
// RFC 5322.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i < domain.len() - 1)
}

#[derive(Deserialize)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmittedResponse {
    pub success: bool,
    pub message: String,
    pub contact_id: i64,
}

pub async fn submit_contact(
    State(pool): State<PgPool>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<ContactSubmittedResponse>, AppError> {
    let (Some(name), Some(email), Some(message)) = (
        payload.name.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        payload.email.as_deref().map(str::trim).filter(|s| !s.is_empty()),
        payload.message.as_deref().map(str::trim).filter(|s| !s.is_empty()),
    ) else {
        return Err(AppError::validation("Name, email, and message are required"));
    };

    if !is_valid_email(email) {
        return Err(AppError::validation(
            "Please provide a valid email address",
        ));
    }

    let contact_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO contacts (name, email, subject, message, status)
         VALUES ($1, $2, $3, $4, 'UNREAD')
         RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(&payload.subject)
    .bind(message)
    .fetch_one(&pool)
    .await?;

    Ok(Json(ContactSubmittedResponse {
        success: true,
        message: "Your message has been sent successfully. We will get back to you soon!"
            .to_string(),
        contact_id,
    }))
}

#[derive(Serialize)]
pub struct ListContactsResponse {
    pub success: bool,
    pub contacts: Vec<Contact>,
}

pub async fn get_contacts(
    State(pool): State<PgPool>,
) -> Result<Json<ListContactsResponse>, AppError> {
    let contacts = sqlx::query_as::<_, Contact>(
        "SELECT id, name, email, subject, message, status, created_at
         FROM contacts
         ORDER BY created_at DESC",
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(ListContactsResponse {
        success: true,
        contacts,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("jane@x.com"));
        assert!(is_valid_email("a.b+tag@sub.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("jane@com"));
        assert!(!is_valid_email("jane@.com"));
        assert!(!is_valid_email("jane@com."));
        assert!(!is_valid_email("jane doe@x.com"));
        assert!(!is_valid_email("jane@@x.com"));
    }
}
