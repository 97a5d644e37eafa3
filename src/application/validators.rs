use crate::app_error::{AppError, AppResult};

/// Guard for document ids. Ids come from the UI layer untrusted; a blank or
/// whitespace id would otherwise turn into a malformed store path.
pub fn require_id(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}
