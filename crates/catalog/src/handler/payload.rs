use serde::de::DeserializeOwned;
use shared::errors::{AppErrorRpc, ServiceError};
use validator::{Validate, ValidationErrors};

/// Deserializes and validates an inbound payload. An empty payload is read as
/// `{}` so requests with only optional fields may omit it.
pub fn parse_payload<T>(payload: &[u8]) -> Result<T, AppErrorRpc>
where
    T: DeserializeOwned + Validate,
{
    let bytes: &[u8] = if payload.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        payload
    };

    let value: T = serde_json::from_slice(bytes)?;

    value
        .validate()
        .map_err(|errors| ServiceError::Validation(format_validation_errors(&errors)))?;

    Ok(value)
}

fn format_validation_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| match error.code.as_ref() {
                        "length" => "Invalid length".to_string(),
                        "range" => "Value out of range".to_string(),
                        "custom" => "Custom validation failed".to_string(),
                        _ => format!("Invalid {field}"),
                    });
                format!("{field}: {message}")
            })
        })
        .collect();

    if messages.is_empty() {
        vec!["Validation failed".to_string()]
    } else {
        messages
    }
}
