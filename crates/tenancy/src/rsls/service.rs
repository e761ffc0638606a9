use std::sync::Arc;

use chrono::Utc;

use super::domain::{NewRsl, Rsl, RslId, RslUpdate};
use super::repository::RslRepository;
use crate::repository::{next_record_id, RepositoryError};
use crate::validation::{FieldErrors, ValidationFailure};

pub struct RslService<R> {
    rsls: Arc<R>,
}

impl<R> RslService<R>
where
    R: RslRepository + 'static,
{
    pub fn new(rsls: Arc<R>) -> Self {
        Self { rsls }
    }

    pub fn create(&self, payload: NewRsl) -> Result<Rsl, RslServiceError> {
        let mut errors = FieldErrors::new();
        errors.require_text("name", &payload.name, "Name is required");
        errors.into_result()?;

        let now = Utc::now();
        let rsl = Rsl {
            id: RslId(next_record_id("rsl")),
            name: payload.name.trim().to_string(),
            description: payload.description.filter(|value| !value.trim().is_empty()),
            created_at: now,
            updated_at: now,
        };
        let stored = self.rsls.insert_rsl(rsl)?;
        tracing::info!(rsl = %stored.id.as_str(), name = %stored.name, "rsl created");
        Ok(stored)
    }

    pub fn get(&self, id: &RslId) -> Result<Rsl, RslServiceError> {
        self.rsls.fetch_rsl(id)?.ok_or(RslServiceError::NotFound)
    }

    /// Catalogue entries sorted by name.
    pub fn list(&self) -> Result<Vec<Rsl>, RslServiceError> {
        let mut rsls = self.rsls.list_rsls()?;
        rsls.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(rsls)
    }

    pub fn update(&self, id: &RslId, update: RslUpdate) -> Result<Rsl, RslServiceError> {
        if matches!(update.name.as_deref(), Some(name) if name.trim().is_empty()) {
            let mut errors = FieldErrors::new();
            errors.insert("name", "Name is required");
            errors.into_result()?;
        }
        let mut rsl = self.rsls.fetch_rsl(id)?.ok_or(RslServiceError::NotFound)?;
        rsl.apply(update, Utc::now());
        self.rsls.update_rsl(rsl)?.ok_or(RslServiceError::NotFound)
    }

    pub fn delete(&self, id: &RslId) -> Result<Rsl, RslServiceError> {
        let deleted = self.rsls.delete_rsl(id)?.ok_or(RslServiceError::NotFound)?;
        tracing::info!(rsl = %deleted.id.as_str(), "rsl deleted");
        Ok(deleted)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RslServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error("rsl not found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
