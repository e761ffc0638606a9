use std::sync::Arc;

use chrono::Utc;

use super::domain::{
    AccountId, Actor, NewStaff, NewUser, Role, Staff, StaffUpdate, User, UserUpdate,
};
use super::password::{hash_password, PasswordError};
use super::repository::AccountRepository;
use super::resolver::{IdentityResolver, ResolveError};
use crate::repository::{next_record_id, RepositoryError};
use crate::validation::{FieldErrors, ValidationFailure};

/// CRUD for users and staff plus the `me` lookup.
pub struct AccountService<A> {
    accounts: Arc<A>,
    resolver: IdentityResolver<A>,
}

impl<A> AccountService<A>
where
    A: AccountRepository + 'static,
{
    pub fn new(accounts: Arc<A>) -> Self {
        let resolver = IdentityResolver::new(accounts.clone());
        Self { accounts, resolver }
    }

    pub fn me(&self, actor_id: &AccountId) -> Result<Actor, AccountServiceError> {
        Ok(self.resolver.resolve(actor_id)?)
    }

    pub fn create_user(&self, payload: NewUser) -> Result<User, AccountServiceError> {
        payload.validate()?;
        let role = payload.role.unwrap_or(Role::Delegate);
        self.check_creator(None, role, payload.added_by.as_ref())?;

        let now = Utc::now();
        let user = User {
            id: AccountId(next_record_id("user")),
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            username: payload.username.trim().to_string(),
            email: payload.email.trim().to_string(),
            role,
            rsls: payload.rsls,
            added_by: payload.added_by,
            password_hash: hash_password(&payload.password)?,
            created_at: now,
            updated_at: now,
        };

        let stored = self.accounts.insert_user(user)?;
        tracing::info!(user = %stored.id, role = stored.role.label(), "user created");
        Ok(stored)
    }

    pub fn get_user(&self, id: &AccountId) -> Result<User, AccountServiceError> {
        self.accounts
            .fetch_user(id)?
            .ok_or(AccountServiceError::NotFound)
    }

    pub fn list_users(&self) -> Result<Vec<User>, AccountServiceError> {
        Ok(self.accounts.list_users()?)
    }

    pub fn update_user(
        &self,
        id: &AccountId,
        update: UserUpdate,
    ) -> Result<User, AccountServiceError> {
        let mut user = self.get_user(id)?;

        if let Some(first_name) = non_blank(update.first_name) {
            user.first_name = first_name;
        }
        if let Some(last_name) = non_blank(update.last_name) {
            user.last_name = last_name;
        }
        if let Some(username) = non_blank(update.username) {
            user.username = username;
        }
        if let Some(email) = non_blank(update.email) {
            user.email = email;
        }
        if let Some(password) = non_blank(update.password) {
            user.password_hash = hash_password(&password)?;
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        if let Some(rsls) = update.rsls {
            user.rsls = rsls;
        }
        if update.added_by.is_some() {
            user.added_by = update.added_by;
        }
        self.check_creator(Some(&user.id), user.role, user.added_by.as_ref())?;
        user.updated_at = Utc::now();

        self.accounts
            .update_user(user)?
            .ok_or(AccountServiceError::NotFound)
    }

    /// A delegate needs a creator, and any named creator must be a known
    /// account other than the user itself.
    fn check_creator(
        &self,
        user: Option<&AccountId>,
        role: Role,
        added_by: Option<&AccountId>,
    ) -> Result<(), AccountServiceError> {
        match added_by {
            None if role == Role::Delegate => {
                Err(field_error("addedBy", "Delegated accounts need a creator"))
            }
            None => Ok(()),
            Some(creator) if Some(creator) == user => {
                Err(field_error("addedBy", "An account cannot be its own creator"))
            }
            Some(creator) => match self.resolver.find(creator)? {
                Some(_) => Ok(()),
                None => Err(field_error("addedBy", "Creator not found")),
            },
        }
    }

    pub fn delete_user(&self, id: &AccountId) -> Result<User, AccountServiceError> {
        let deleted = self
            .accounts
            .delete_user(id)?
            .ok_or(AccountServiceError::NotFound)?;
        tracing::info!(user = %deleted.id, "user deleted");
        Ok(deleted)
    }

    /// Creates a staff member owned by the caller. The role is always 3.
    pub fn create_staff(
        &self,
        actor_id: &AccountId,
        payload: NewStaff,
    ) -> Result<Staff, AccountServiceError> {
        let creator = self.resolver.resolve(actor_id)?;
        payload.validate()?;
        let gender = payload
            .gender
            .ok_or_else(|| field_error("gender", "Gender is required"))?;

        let now = Utc::now();
        let staff = Staff {
            id: AccountId(next_record_id("staff")),
            job_title: payload.job_title.trim().to_string(),
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            phone: payload.phone.trim().to_string(),
            gender,
            username: payload.username.trim().to_string(),
            email: payload.email.trim().to_string(),
            corresponding_email: payload.corresponding_email.trim().to_string(),
            role: Role::Delegate,
            rsls: payload.rsls,
            added_by: creator.id,
            password_hash: hash_password(&payload.password)?,
            created_at: now,
            updated_at: now,
        };

        let stored = self.accounts.insert_staff(staff)?;
        tracing::info!(staff = %stored.id, added_by = %stored.added_by, "staff created");
        Ok(stored)
    }

    pub fn get_staff(&self, id: &AccountId) -> Result<Staff, AccountServiceError> {
        self.accounts
            .fetch_staff(id)?
            .ok_or(AccountServiceError::NotFound)
    }

    /// Administrators see every staff member; everyone else sees their own.
    pub fn list_staff(&self, actor_id: &AccountId) -> Result<Vec<Staff>, AccountServiceError> {
        let actor = self.resolver.resolve(actor_id)?;
        let staff = self.accounts.list_staff()?;
        if actor.role == Role::Administrator {
            return Ok(staff);
        }
        Ok(staff
            .into_iter()
            .filter(|member| member.added_by == actor.id)
            .collect())
    }

    pub fn update_staff(
        &self,
        id: &AccountId,
        update: StaffUpdate,
    ) -> Result<Staff, AccountServiceError> {
        let mut staff = self.get_staff(id)?;

        if let Some(job_title) = non_blank(update.job_title) {
            staff.job_title = job_title;
        }
        if let Some(first_name) = non_blank(update.first_name) {
            staff.first_name = first_name;
        }
        if let Some(last_name) = non_blank(update.last_name) {
            staff.last_name = last_name;
        }
        if let Some(phone) = non_blank(update.phone) {
            staff.phone = phone;
        }
        if let Some(gender) = update.gender {
            staff.gender = gender;
        }
        if let Some(username) = non_blank(update.username) {
            staff.username = username;
        }
        if let Some(email) = non_blank(update.email) {
            staff.email = email;
        }
        if let Some(corresponding_email) = non_blank(update.corresponding_email) {
            staff.corresponding_email = corresponding_email;
        }
        if let Some(password) = non_blank(update.password) {
            staff.password_hash = hash_password(&password)?;
        }
        if let Some(rsls) = update.rsls {
            staff.rsls = rsls;
        }
        staff.role = Role::Delegate;
        staff.updated_at = Utc::now();

        self.accounts
            .update_staff(staff)?
            .ok_or(AccountServiceError::NotFound)
    }

    pub fn delete_staff(&self, id: &AccountId) -> Result<Staff, AccountServiceError> {
        let deleted = self
            .accounts
            .delete_staff(id)?
            .ok_or(AccountServiceError::NotFound)?;
        tracing::info!(staff = %deleted.id, "staff deleted");
        Ok(deleted)
    }
}

fn field_error(field: &str, message: &str) -> AccountServiceError {
    let mut fields = FieldErrors::new();
    fields.insert(field, message);
    AccountServiceError::Validation(ValidationFailure { fields })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

/// Error raised by the account service.
#[derive(Debug, thiserror::Error)]
pub enum AccountServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error("account not found")]
    NotFound,
    #[error("caller {0} is not a known user or staff member")]
    ActorNotFound(AccountId),
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error("password hashing task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ResolveError> for AccountServiceError {
    fn from(value: ResolveError) -> Self {
        match value {
            ResolveError::NotFound(id) => Self::ActorNotFound(id),
            ResolveError::Repository(err) => Self::Repository(err),
        }
    }
}
