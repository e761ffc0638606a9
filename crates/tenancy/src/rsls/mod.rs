//! Scope catalogue ("RSLs"): the organisations a property can be shared with.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{NewRsl, Rsl, RslId, RslUpdate};
pub use repository::RslRepository;
pub use router::rsl_router;
pub use service::{RslService, RslServiceError};
