use super::domain::TenantProfile;
use crate::validation::{FieldErrors, ValidationFailure};

/// Prefix every captured signature must carry.
pub const SIGNATURE_PREFIX: &str = "data:image/png;base64,";

const SIGNATURE_MESSAGE: &str = "Signature must be a PNG image";
const REQUIRED_MESSAGE: &str = "This field is required";

/// Checks the mandatory questionnaire answers and signature encodings,
/// reporting every problem at once.
pub fn validate_profile(profile: &TenantProfile) -> Result<(), ValidationFailure> {
    let mut errors = FieldErrors::new();

    errors.require_some("property", profile.property.as_ref(), "Property is required");
    errors.require_some(
        "roomNumber",
        profile.room_number.as_ref(),
        "Room number is required",
    );
    errors.require_some(
        "signInDate",
        profile.sign_in_date.as_ref(),
        "Sign in date is required",
    );
    errors.require_some(
        "dateOfAssessment",
        profile.date_of_assessment.as_ref(),
        "Assessment date is required",
    );
    errors.require_some("debts", profile.debts.as_ref(), REQUIRED_MESSAGE);
    errors.require_some(
        "fullCheckCompleted",
        profile.full_check_completed.as_ref(),
        REQUIRED_MESSAGE,
    );

    let personal = &profile.personal_details;
    errors.require_text(
        "personalDetails.firstName",
        &personal.first_name,
        "First name is required",
    );
    errors.require_text(
        "personalDetails.lastName",
        &personal.last_name,
        "Last name is required",
    );
    errors.require_text(
        "personalDetails.nationalInsuranceNumber",
        &personal.national_insurance_number,
        "NI number is required",
    );
    errors.require_text("personalDetails.gender", &personal.gender, "Gender is required");
    errors.require_some(
        "personalDetails.dateOfBirth",
        personal.date_of_birth.as_ref(),
        "Date of birth is required",
    );
    errors.require_text(
        "personalDetails.maritalStatus",
        &personal.marital_status,
        "Marital status is required",
    );

    if let (Some(sign_in), Some(sign_out)) = (profile.sign_in_date, profile.sign_out_date) {
        if sign_out < sign_in {
            errors.insert("signOutDate", "Sign out date cannot be before sign in date");
        }
    }

    check_signature(&mut errors, "supportWorkerSignature", &profile.support_worker_signature);
    check_signature(&mut errors, "tenantSignature", &profile.tenant_signature);
    for (name, item) in profile.terms_and_conditions.items() {
        check_signature(
            &mut errors,
            &format!("termsAndConditions.{name}.signature"),
            &item.signature,
        );
    }

    errors.into_result()
}

fn check_signature(errors: &mut FieldErrors, field: &str, value: &str) {
    if !value.is_empty() && !value.starts_with(SIGNATURE_PREFIX) {
        errors.insert(field, SIGNATURE_MESSAGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::PropertyId;
    use crate::tenants::domain::RoomNumber;
    use chrono::NaiveDate;

    fn complete_profile() -> TenantProfile {
        let mut profile = TenantProfile::default();
        profile.property = Some(PropertyId::from("prop-1"));
        profile.room_number = Some(RoomNumber(1));
        profile.sign_in_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        profile.date_of_assessment = NaiveDate::from_ymd_opt(2024, 2, 27);
        profile.debts = Some(false);
        profile.full_check_completed = Some(true);
        profile.personal_details.first_name = "Ama".to_string();
        profile.personal_details.last_name = "Mensah".to_string();
        profile.personal_details.national_insurance_number = "QQ123456C".to_string();
        profile.personal_details.gender = "Female".to_string();
        profile.personal_details.date_of_birth = NaiveDate::from_ymd_opt(1990, 4, 12);
        profile.personal_details.marital_status = "Single".to_string();
        profile
    }

    #[test]
    fn complete_profile_passes() {
        assert!(validate_profile(&complete_profile()).is_ok());
    }

    #[test]
    fn empty_profile_reports_every_required_field() {
        let failure = validate_profile(&TenantProfile::default()).expect_err("empty profile");
        let fields: Vec<&str> = failure.fields.fields().collect();
        assert_eq!(
            fields,
            vec![
                "dateOfAssessment",
                "debts",
                "fullCheckCompleted",
                "personalDetails.dateOfBirth",
                "personalDetails.firstName",
                "personalDetails.gender",
                "personalDetails.lastName",
                "personalDetails.maritalStatus",
                "personalDetails.nationalInsuranceNumber",
                "property",
                "roomNumber",
                "signInDate",
            ]
        );
        assert_eq!(
            failure.fields.get("personalDetails.nationalInsuranceNumber"),
            Some("NI number is required")
        );
    }

    #[test]
    fn signatures_must_be_png_data_urls() {
        let mut profile = complete_profile();
        profile.tenant_signature = format!("{SIGNATURE_PREFIX}iVBORw0KGgo=");
        profile.support_worker_signature = "data:image/jpeg;base64,/9j/".to_string();
        profile.terms_and_conditions.staff_agreement.signature = "scribble".to_string();

        let failure = validate_profile(&profile).expect_err("bad signatures");
        assert_eq!(failure.fields.len(), 2);
        assert_eq!(failure.fields.get("supportWorkerSignature"), Some(SIGNATURE_MESSAGE));
        assert_eq!(
            failure.fields.get("termsAndConditions.staffAgreement.signature"),
            Some(SIGNATURE_MESSAGE)
        );
    }

    #[test]
    fn sign_out_before_sign_in_is_rejected() {
        let mut profile = complete_profile();
        profile.sign_out_date = NaiveDate::from_ymd_opt(2024, 2, 1);
        let failure = validate_profile(&profile).expect_err("dates reversed");
        assert!(failure.fields.get("signOutDate").is_some());
    }
}
