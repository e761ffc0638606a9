use chrono::NaiveDate;

use super::domain::Tenant;

const HEADER: [&str; 14] = [
    "id",
    "firstName",
    "lastName",
    "property",
    "roomNumber",
    "status",
    "signInDate",
    "signOutDate",
    "dateOfAssessment",
    "gender",
    "dateOfBirth",
    "contactNumber",
    "email",
    "consentsAgreed",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv: {0}")]
    Flush(String),
}

/// One header row, then one row per tenant in the given order.
pub fn tenants_to_csv(tenants: &[Tenant]) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for tenant in tenants {
        let profile = &tenant.profile;
        let personal = &profile.personal_details;
        writer.write_record([
            tenant.id.as_str().to_string(),
            personal.first_name.clone(),
            personal.last_name.clone(),
            profile
                .property
                .as_ref()
                .map(|id| id.as_str().to_string())
                .unwrap_or_default(),
            profile
                .room_number
                .map(|room| room.to_string())
                .unwrap_or_default(),
            profile.status.label().to_string(),
            format_date(profile.sign_in_date),
            format_date(profile.sign_out_date),
            format_date(profile.date_of_assessment),
            personal.gender.clone(),
            format_date(personal.date_of_birth),
            personal.contact_number.clone(),
            personal.email.clone(),
            profile.terms_and_conditions.agreed_count().to_string(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.error().to_string()))
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|value| value.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountId;
    use crate::properties::PropertyId;
    use crate::tenants::domain::{RoomNumber, TenantId, TenantProfile, TenantStatus};
    use chrono::Utc;

    #[test]
    fn writes_header_and_quoted_rows() {
        let now = Utc::now();
        let mut profile = TenantProfile::default();
        profile.property = Some(PropertyId::from("prop-1"));
        profile.room_number = Some(RoomNumber(2));
        profile.status = TenantStatus::Inactive;
        profile.sign_in_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        profile.personal_details.first_name = "Ama, Jr".to_string();
        profile.personal_details.last_name = "Mensah".to_string();
        profile.terms_and_conditions.support_checklist.agreed = true;
        let tenant = Tenant {
            id: TenantId::from("tenant-1"),
            profile,
            added_by: AccountId::from("user-1"),
            created_at: now,
            updated_at: now,
        };

        let bytes = tenants_to_csv(&[tenant]).expect("csv");
        let text = String::from_utf8(bytes).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(HEADER.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("tenant-1,\"Ama, Jr\",Mensah,prop-1,2,Inactive,2024-03-01,,,,,,,1")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_export_is_just_the_header() {
        let text = String::from_utf8(tenants_to_csv(&[]).expect("csv")).expect("utf8");
        assert_eq!(text.trim_end(), HEADER.join(","));
    }
}
