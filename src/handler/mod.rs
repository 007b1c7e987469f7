pub mod account;
pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod feedback;
pub mod knowledgebase;
pub mod tickets;
pub mod users;

use validator::ValidationErrors;

// Flattens validator's per-field map into the flat message list the
// `{status, data, message}` envelope carries as its data payload.
pub(crate) fn validation_errors(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .values()
        .flat_map(|field_errors| field_errors.iter())
        .filter_map(|error| error.message.as_ref().map(|message| message.to_string()))
        .collect()
}
