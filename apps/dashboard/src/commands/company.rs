//! # Company Commands
//!
//! Company Settings screen (manage_company OR manage_items).

use bakery_core::validation::{validate_email, validate_required};
use bakery_core::{Company, Screen};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

use super::require_screen;

pub fn get_company(state: &AppState) -> Result<Company, ApiError> {
    debug!("get_company command");
    require_screen(state, Screen::Settings, "get_company")?;
    Ok(state.company.clone())
}

/// Replaces the company details.
///
/// The name is required; the email, when given, must be well formed. Text
/// fields are trimmed and a blank GST number is stored as `None`.
pub fn update_company(state: &mut AppState, company: Company) -> Result<Company, ApiError> {
    debug!(name = %company.name, "update_company command");
    let staff = require_screen(state, Screen::Settings, "update_company")?;

    let name = validate_required("company name", &company.name)?;
    let email = match company.email.trim() {
        "" => String::new(),
        email => validate_email(email)?,
    };

    state.company = Company {
        name,
        address: company.address.trim().to_string(),
        phone: company.phone.trim().to_string(),
        email,
        gst: company
            .gst
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty()),
    };

    info!(name = %state.company.name, staff_id = %staff.id, "Company settings updated");
    Ok(state.company.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::testing::signed_in;

    #[test]
    fn test_update_company() {
        let mut state = signed_in("admin");
        let mut company = get_company(&state).unwrap();
        company.name = "  Sweet Bakery & Cafe ".to_string();
        company.gst = Some("   ".to_string());

        let saved = update_company(&mut state, company).unwrap();
        assert_eq!(saved.name, "Sweet Bakery & Cafe");
        assert_eq!(saved.gst, None);
        assert_eq!(state.company, saved);
    }

    #[test]
    fn test_name_required() {
        let mut state = signed_in("manager");
        let mut company = get_company(&state).unwrap();
        company.name = String::new();

        let err = update_company(&mut state, company).unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingInformation);
        assert_eq!(state.company.name, "Sweet Bakery");
    }

    #[test]
    fn test_staff_cannot_open_settings() {
        let state = signed_in("staff");
        assert_eq!(
            get_company(&state).unwrap_err().code,
            ErrorCode::PermissionDenied
        );
    }
}
