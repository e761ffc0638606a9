//! Sites with a bedroom count and an embedded, visibility-filtered scope list.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{NewProperty, Property, PropertyId, PropertyUpdate, ScopeRef};
pub use repository::PropertyRepository;
pub use router::property_router;
pub use service::{PropertyService, PropertyServiceError};
