//! Contact form submission.

use serde_json::Value;

use crate::error::AppError;
use crate::models::contact::{Contact, ContactRequest};
use crate::models::created::CreatedRecordResponse;
use crate::models::fields;
use crate::store::{CONTACTS_TABLE, RecordStore};

/// Check required fields and that `agreed` is a real boolean.
pub fn validate_contact(request: ContactRequest) -> Result<Contact, AppError> {
    let required = [
        &request.first_name,
        &request.last_name,
        &request.email,
        &request.message,
    ];
    if required.iter().any(|v| fields::is_blank(v.as_deref())) {
        return Err(AppError::InvalidRequest(
            "firstName, lastName, email and message are required".to_string(),
        ));
    }

    let Some(Value::Bool(agreed)) = request.agreed else {
        return Err(AppError::InvalidRequest(
            "agreed must be a boolean".to_string(),
        ));
    };

    Ok(Contact {
        first_name: request.first_name.unwrap_or_default(),
        last_name: request.last_name.unwrap_or_default(),
        email: request.email.unwrap_or_default(),
        phone: request.phone.unwrap_or_default(),
        message: request.message.unwrap_or_default(),
        agreed_to_policy: agreed,
    })
}

/// Validate and store a contact submission.
pub async fn submit_contact(
    store: &dyn RecordStore,
    request: ContactRequest,
) -> Result<CreatedRecordResponse, AppError> {
    let contact = validate_contact(request)?;
    let record = store.create(CONTACTS_TABLE, contact.into_fields()).await?;
    Ok(record.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use serde_json::json;

    fn request(agreed: Value) -> ContactRequest {
        serde_json::from_value(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "message": "Hello",
            "agreed": agreed
        }))
        .unwrap()
    }

    #[test]
    fn test_agreed_must_be_boolean() {
        assert!(matches!(
            validate_contact(request(json!("true"))),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(matches!(
            validate_contact(request(json!(1))),
            Err(AppError::InvalidRequest(_))
        ));
        assert!(validate_contact(request(json!(false))).is_ok());
    }

    #[test]
    fn test_missing_agreed() {
        let mut req = request(json!(true));
        req.agreed = None;
        assert!(validate_contact(req).is_err());
    }

    #[test]
    fn test_phone_defaults_to_empty() {
        let contact = validate_contact(request(json!(true))).unwrap();
        assert_eq!(contact.phone, "");
        assert!(contact.agreed_to_policy);
    }

    #[test]
    fn test_required_fields() {
        let mut req = request(json!(true));
        req.email = Some("".into());
        assert!(validate_contact(req).is_err());
    }

    #[tokio::test]
    async fn test_submit_writes_store_columns() {
        let store = MemoryStore::new();
        let created = submit_contact(&store, request(json!(true))).await.unwrap();

        assert_eq!(store.create_calls(), 1);
        assert_eq!(created.fields["Firstname"], json!("Ada"));
        assert_eq!(created.fields["Lastname"], json!("Lovelace"));
        assert_eq!(created.fields["Phone"], json!(""));
        assert_eq!(created.fields["AcceptOurPrivacyPolicy"], json!(true));
    }
}
