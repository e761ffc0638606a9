use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::accounts::AccountId;
use crate::properties::PropertyId;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub String);

impl TenantId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TenantId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Bedroom number within a property, counted from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomNumber(pub u16);

impl fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1 is active; every other stored value reads as inactive (vacated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum TenantStatus {
    #[default]
    Active,
    Inactive,
}

impl TenantStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl From<u8> for TenantStatus {
    fn from(value: u8) -> Self {
        if value == 1 {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

impl From<TenantStatus> for u8 {
    fn from(status: TenantStatus) -> Self {
        match status {
            TenantStatus::Active => 1,
            TenantStatus::Inactive => 0,
        }
    }
}

/// Questionnaire answers as the tenant form submits them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TenantProfile {
    #[serde(deserialize_with = "deserialize_optional_property")]
    pub property: Option<PropertyId>,
    #[serde(deserialize_with = "deserialize_optional_room")]
    pub room_number: Option<RoomNumber>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub sign_in_date: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub sign_out_date: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub date_of_assessment: Option<NaiveDate>,
    pub preferred_area: String,
    pub ethnic_origin: String,
    pub religion: String,
    pub sexual_orientation: String,

    pub source_of_income: String,
    pub benefits: String,
    pub total_amount: String,
    pub payment_frequency: String,
    pub debts: Option<bool>,
    pub debt_details: String,
    pub gambling_issues: bool,
    pub gambling_details: String,

    pub criminal_records: bool,
    pub offence_details: OffenceDetails,
    pub prison_history: bool,
    pub legal_orders: bool,
    pub legal_status: String,

    pub support_needs: Vec<String>,
    pub full_check_completed: Option<bool>,
    pub physical_health_conditions: bool,
    pub mental_health_conditions: bool,
    pub diagnosed_mental_health: bool,
    pub prescribed_medication: bool,
    pub self_harm_or_suicidal_thoughts: bool,
    pub benefits_claimed: String,
    pub drug_use: bool,
    pub risk_assessment: Vec<String>,
    pub family_support: bool,

    pub support_worker_signature: String,
    pub tenant_signature: String,
    pub personal_details: PersonalDetails,
    pub terms_and_conditions: TermsAndConditions,
    pub status: TenantStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OffenceDetails {
    pub nature: String,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    pub sentence: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalDetails {
    pub title: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub national_insurance_number: String,
    pub marital_status: String,
    pub height: String,
    pub shoe_size: String,
    pub clothing_size: String,
    pub eye_color: String,
    pub gender: String,
    pub contact_number: String,
    pub email: String,
    pub signup_email: String,
    pub claim_reference_number: String,
    pub skin_tone: String,
    pub hair_color: String,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub date_of_birth: Option<NaiveDate>,
    pub place_of_birth: String,
    pub current_situation: String,
    pub has_vehicle: bool,
    pub distinguishing_marks: bool,
    pub employer_or_college_details: bool,
    pub moved_last12_months: bool,
    #[serde(rename = "enteredUKLast2Years")]
    pub entered_uk_last2_years: bool,
    pub partner_living_with_you: bool,
    pub bereavement_or_separation: bool,
    pub relevant_circumstances: bool,
    pub rent_affordable_when_moved: bool,
    pub multi_agency_protection_plan: bool,
    pub homeless_hostel_for3_months: bool,
    pub next_of_kin_info: bool,
    pub gp_info: bool,
    pub require_nil_income_form: bool,
    pub claim_backdated: bool,
    pub other_charges: String,
    pub sheltered_accommodation: bool,
    pub photo_uploaded: bool,
    pub proof_of_benefit_uploaded: bool,
    pub student_status: bool,
    pub incapable_of_work: bool,
    pub registered_blind: bool,
    pub carer_allowance_received: bool,
    pub overnight_care_required: bool,
    pub foster_carer: bool,
    pub currently_absent_from_home: bool,
    pub claimed_housing_benefit_before: bool,
    pub expected_income_change_next6_months: bool,
    pub expected_expense_change_next6_months: bool,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub uk_entry_date: Option<NaiveDate>,
}

impl PersonalDetails {
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One consent line: whether it was agreed and the captured signature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsentItem {
    pub agreed: bool,
    pub signature: String,
}

/// Every consent document the tenant signs. Missing entries default to
/// not agreed and unsigned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TermsAndConditions {
    pub support_checklist: ConsentItem,
    pub license_to_occupy: ConsentItem,
    pub weekly_service_charge: ConsentItem,
    pub missing_person_form: ConsentItem,
    #[serde(rename = "tenantPhotographicID")]
    pub tenant_photographic_id: ConsentItem,
    pub personal_details_agreement: ConsentItem,
    pub license_charge_payments: ConsentItem,
    pub fire_evacuation_procedure: ConsentItem,
    pub support_agreement: ConsentItem,
    pub complaints_procedure: ConsentItem,
    pub confidentiality_waiver: ConsentItem,
    pub nil_income_form_agreement: ConsentItem,
    pub authorization_form: ConsentItem,
    pub support_services: ConsentItem,
    pub staff_agreement: ConsentItem,
}

impl TermsAndConditions {
    /// Entries keyed by their wire name, in form order.
    pub fn items(&self) -> [(&'static str, &ConsentItem); 15] {
        [
            ("supportChecklist", &self.support_checklist),
            ("licenseToOccupy", &self.license_to_occupy),
            ("weeklyServiceCharge", &self.weekly_service_charge),
            ("missingPersonForm", &self.missing_person_form),
            ("tenantPhotographicID", &self.tenant_photographic_id),
            ("personalDetailsAgreement", &self.personal_details_agreement),
            ("licenseChargePayments", &self.license_charge_payments),
            ("fireEvacuationProcedure", &self.fire_evacuation_procedure),
            ("supportAgreement", &self.support_agreement),
            ("complaintsProcedure", &self.complaints_procedure),
            ("confidentialityWaiver", &self.confidentiality_waiver),
            ("nilIncomeFormAgreement", &self.nil_income_form_agreement),
            ("authorizationForm", &self.authorization_form),
            ("supportServices", &self.support_services),
            ("staffAgreement", &self.staff_agreement),
        ]
    }

    pub fn agreed_count(&self) -> usize {
        self.items().iter().filter(|(_, item)| item.agreed).count()
    }
}

/// Stored tenant record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    #[serde(rename = "_id", alias = "id")]
    pub id: TenantId,
    #[serde(flatten)]
    pub profile: TenantProfile,
    pub added_by: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tenant {
    pub fn is_active(&self) -> bool {
        self.profile.status == TenantStatus::Active
    }

    /// The room this tenant holds, if active and placed.
    pub fn occupied_room(&self) -> Option<(&PropertyId, RoomNumber)> {
        if !self.is_active() {
            return None;
        }
        match (&self.profile.property, self.profile.room_number) {
            (Some(property), Some(room)) => Some((property, room)),
            _ => None,
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|stamp| stamp.with_timezone(&Utc).date_naive())
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Accepts `null`, `""`, `YYYY-MM-DD`, or an RFC 3339 timestamp.
pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}

fn deserialize_optional_property<'de, D>(deserializer: D) -> Result<Option<PropertyId>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PropertyId))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawRoom {
    Number(u64),
    Text(String),
}

/// Room numbers arrive as numbers or as the strings the room picker offers.
fn deserialize_optional_room<'de, D>(deserializer: D) -> Result<Option<RoomNumber>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawRoom>::deserialize(deserializer)?;
    let number = match raw {
        None => return Ok(None),
        Some(RawRoom::Number(value)) => value,
        Some(RawRoom::Text(text)) if text.trim().is_empty() => return Ok(None),
        Some(RawRoom::Text(text)) => text.trim().parse::<u64>().map_err(|_| {
            serde::de::Error::custom(format!("room number '{text}' is not a number"))
        })?,
    };
    u16::try_from(number)
        .ok()
        .filter(|value| *value > 0)
        .map(|value| Some(RoomNumber(value)))
        .ok_or_else(|| serde::de::Error::custom(format!("room number {number} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_payload_with_blank_fields_deserialises() {
        let profile: TenantProfile = serde_json::from_value(json!({
            "property": "",
            "roomNumber": "",
            "signInDate": "",
            "offenceDetails": { "nature": "", "date": "", "sentence": "" },
            "personalDetails": { "firstName": "Ama", "dateOfBirth": "1990-04-12" },
            "status": 1
        }))
        .expect("payload deserialises");

        assert_eq!(profile.property, None);
        assert_eq!(profile.room_number, None);
        assert_eq!(profile.sign_in_date, None);
        assert_eq!(profile.offence_details.date, None);
        assert_eq!(profile.personal_details.first_name, "Ama");
        assert_eq!(
            profile.personal_details.date_of_birth,
            NaiveDate::from_ymd_opt(1990, 4, 12)
        );
        assert_eq!(profile.status, TenantStatus::Active);
        assert!(!profile.terms_and_conditions.staff_agreement.agreed);
    }

    #[test]
    fn room_numbers_accept_strings_and_numbers() {
        let from_text: TenantProfile =
            serde_json::from_value(json!({ "roomNumber": "3" })).expect("text room");
        let from_number: TenantProfile =
            serde_json::from_value(json!({ "roomNumber": 3 })).expect("numeric room");
        assert_eq!(from_text.room_number, Some(RoomNumber(3)));
        assert_eq!(from_number.room_number, Some(RoomNumber(3)));
        assert!(serde_json::from_value::<TenantProfile>(json!({ "roomNumber": 0 })).is_err());
        assert!(serde_json::from_value::<TenantProfile>(json!({ "roomNumber": "A" })).is_err());
    }

    #[test]
    fn timestamps_collapse_to_dates() {
        let profile: TenantProfile =
            serde_json::from_value(json!({ "signInDate": "2024-03-01T00:00:00.000Z" }))
                .expect("timestamp accepted");
        assert_eq!(profile.sign_in_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn wire_names_match_the_form() {
        let mut profile = TenantProfile::default();
        profile.personal_details.entered_uk_last2_years = true;
        profile.terms_and_conditions.tenant_photographic_id.agreed = true;
        let value = serde_json::to_value(&profile).expect("serialises");
        assert_eq!(value["personalDetails"]["enteredUKLast2Years"], json!(true));
        assert_eq!(value["personalDetails"]["movedLast12Months"], json!(false));
        assert_eq!(
            value["termsAndConditions"]["tenantPhotographicID"]["agreed"],
            json!(true)
        );
        assert_eq!(value["status"], json!(1));
    }

    #[test]
    fn tenant_record_flattens_profile() {
        let now = Utc::now();
        let mut profile = TenantProfile::default();
        profile.property = Some(PropertyId::from("prop-1"));
        profile.room_number = Some(RoomNumber(2));
        let tenant = Tenant {
            id: TenantId::from("tenant-1"),
            profile,
            added_by: AccountId::from("user-1"),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&tenant).expect("serialises");
        assert_eq!(value["_id"], json!("tenant-1"));
        assert_eq!(value["roomNumber"], json!(2));
        assert_eq!(value["property"], json!("prop-1"));

        let back: Tenant = serde_json::from_value(value).expect("deserialises");
        assert_eq!(back, tenant);
    }

    #[test]
    fn inactive_tenants_hold_no_room() {
        let now = Utc::now();
        let mut profile = TenantProfile::default();
        profile.property = Some(PropertyId::from("prop-1"));
        profile.room_number = Some(RoomNumber(1));
        profile.status = TenantStatus::Inactive;
        let tenant = Tenant {
            id: TenantId::from("tenant-1"),
            profile,
            added_by: AccountId::from("user-1"),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(tenant.occupied_room(), None);
    }
}
