//! Tenant questionnaire records, room occupancy, listing, export and reports.

pub mod domain;
pub mod export;
pub mod listing;
pub mod report;
pub mod repository;
pub mod rooms;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    ConsentItem, OffenceDetails, PersonalDetails, RoomNumber, Tenant, TenantId, TenantProfile,
    TenantStatus, TermsAndConditions,
};
pub use export::{tenants_to_csv, ExportError};
pub use listing::{SortDirection, TenantPage, TenantQuery};
pub use report::{ReportFormat, ReportLine, ReportSection, TenantReport};
pub use repository::TenantRepository;
pub use rooms::{available_rooms, occupied_rooms, room_holder};
pub use router::tenant_router;
pub use service::{TenantService, TenantServiceError};
pub use validation::{validate_profile, SIGNATURE_PREFIX};
