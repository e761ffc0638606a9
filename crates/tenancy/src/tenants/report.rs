//! Printable per-tenant summary: personal, property, financial, health and
//! signature sections with `N/A` for unanswered items.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::Tenant;
use crate::properties::Property;

const MISSING: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantReport {
    pub title: String,
    pub file_name: String,
    pub sections: Vec<ReportSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub heading: &'static str,
    pub lines: Vec<ReportLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub label: &'static str,
    pub value: String,
}

impl ReportSection {
    fn new(heading: &'static str, lines: impl IntoIterator<Item = (&'static str, String)>) -> Self {
        Self {
            heading,
            lines: lines
                .into_iter()
                .map(|(label, value)| ReportLine { label, value })
                .collect(),
        }
    }

    pub fn value(&self, label: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.label == label)
            .map(|line| line.value.as_str())
    }
}

impl TenantReport {
    /// `property` is the tenant's property when it still exists.
    pub fn build(tenant: &Tenant, property: Option<&Property>) -> Self {
        let profile = &tenant.profile;
        let personal = &profile.personal_details;
        let full_name = personal.full_name();

        let personal_section = ReportSection::new(
            "Personal Details",
            [
                ("Full Name", join_nonblank([personal.title.as_str(), full_name.as_str()])),
                ("Date of Birth", date(personal.date_of_birth)),
                ("Place of Birth", text(&personal.place_of_birth)),
                ("Gender", text(&personal.gender)),
                ("Marital Status", text(&personal.marital_status)),
                ("National Insurance Number", text(&personal.national_insurance_number)),
                ("Contact Number", text(&personal.contact_number)),
                ("Email", text(&personal.email)),
            ],
        );

        let property_section = ReportSection::new(
            "Property Details",
            [
                (
                    "Property",
                    property
                        .map(|property| text(&property.name))
                        .unwrap_or_else(|| MISSING.to_string()),
                ),
                (
                    "Room Number",
                    profile
                        .room_number
                        .map(|room| room.to_string())
                        .unwrap_or_else(|| MISSING.to_string()),
                ),
                ("Sign In Date", date(profile.sign_in_date)),
                ("Sign Out Date", date(profile.sign_out_date)),
                ("Status", profile.status.label().to_string()),
            ],
        );

        let financial_section = ReportSection::new(
            "Financial Information",
            [
                ("Source of Income", text(&profile.source_of_income)),
                ("Benefits", text(&profile.benefits)),
                ("Total Amount", text(&profile.total_amount)),
                ("Payment Frequency", text(&profile.payment_frequency)),
            ],
        );

        let health_section = ReportSection::new(
            "Health Information",
            [
                ("Physical Health Conditions", yes_no(profile.physical_health_conditions)),
                ("Mental Health Conditions", yes_no(profile.mental_health_conditions)),
                ("Prescribed Medication", yes_no(profile.prescribed_medication)),
                ("Self-Harm or Suicidal Thoughts", yes_no(profile.self_harm_or_suicidal_thoughts)),
            ],
        );

        let signature_section = ReportSection::new(
            "Signatures",
            [
                ("Tenant Signature", signature(&profile.tenant_signature)),
                ("Support Worker Signature", signature(&profile.support_worker_signature)),
            ],
        );

        Self {
            title: format!("Tenant Report: {full_name}"),
            file_name: format!(
                "Tenant_Report_{}_{}.txt",
                file_safe(&personal.first_name),
                file_safe(&personal.last_name)
            ),
            sections: vec![
                personal_section,
                property_section,
                financial_section,
                health_section,
                signature_section,
            ],
        }
    }

    pub fn section(&self, heading: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|section| section.heading == heading)
    }
}

impl fmt::Display for TenantReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.heading)?;
            for line in &section.lines {
                writeln!(f, "{}: {}", line.label, line.value)?;
            }
        }
        Ok(())
    }
}

/// ASCII letters, digits and `-` survive; everything else becomes `_`.
fn file_safe(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect()
}

fn text(value: &str) -> String {
    match value.trim() {
        "" => MISSING.to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn join_nonblank<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let joined = parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    text(&joined)
}

/// `Mar 1, 2024`.
fn date(value: Option<NaiveDate>) -> String {
    value
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

fn yes_no(answer: bool) -> String {
    let word = if answer { "Yes" } else { "No" };
    word.to_string()
}

fn signature(data_url: &str) -> String {
    if data_url.trim().is_empty() {
        MISSING.to_string()
    } else {
        "See original document".to_string()
    }
}
