//! Tenancy back office: accounts, properties, tenants and the scope catalogue.

pub mod accounts;
pub mod api;
pub mod config;
pub mod error;
pub mod properties;
pub mod repository;
pub mod rsls;
pub mod seed;
pub mod store;
pub mod telemetry;
pub mod tenants;
pub mod validation;
pub mod visibility;

#[cfg(test)]
pub(crate) mod testing;
