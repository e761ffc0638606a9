use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rsls::RslId;
use crate::validation::{FieldErrors, ValidationFailure};

/// Identifier shared by users and staff; the two live in separate collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Three-tier role hierarchy, serialised as the numbers 1, 2 and 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Role {
    Administrator,
    Manager,
    Delegate,
}

impl Role {
    pub const fn code(self) -> u8 {
        match self {
            Self::Administrator => 1,
            Self::Manager => 2,
            Self::Delegate => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Manager => "manager",
            Self::Delegate => "delegate",
        }
    }
}

impl TryFrom<u8> for Role {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Administrator),
            2 => Ok(Self::Manager),
            3 => Ok(Self::Delegate),
            other => Err(format!("unknown role {other}; expected 1, 2 or 3")),
        }
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        role.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Primary account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub rsls: Vec<RslId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<AccountId>,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Delegated account created by a user or another staff member. Always role 3.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    #[serde(rename = "_id", alias = "id")]
    pub id: AccountId,
    pub job_title: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub gender: Gender,
    pub username: String,
    pub email: String,
    pub corresponding_email: String,
    pub role: Role,
    #[serde(default)]
    pub rsls: Vec<RslId>,
    pub added_by: AccountId,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    User,
    Staff,
}

/// Resolved caller: whichever of user or staff the id matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: AccountId,
    pub kind: AccountKind,
    pub role: Role,
    pub rsls: BTreeSet<RslId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_by: Option<AccountId>,
    pub display_name: String,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            kind: AccountKind::User,
            role: user.role,
            rsls: user.rsls.iter().cloned().collect(),
            added_by: user.added_by.clone(),
            display_name: format!("{} {}", user.first_name, user.last_name),
        }
    }
}

impl From<&Staff> for Actor {
    fn from(staff: &Staff) -> Self {
        Self {
            id: staff.id.clone(),
            kind: AccountKind::Staff,
            role: Role::Delegate,
            rsls: staff.rsls.iter().cloned().collect(),
            added_by: Some(staff.added_by.clone()),
            display_name: format!("{} {}", staff.first_name, staff.last_name),
        }
    }
}

/// Payload for creating a primary account.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<Role>,
    #[serde(default)]
    pub rsls: Vec<RslId>,
    pub added_by: Option<AccountId>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut errors = FieldErrors::new();
        errors.require_text("firstName", &self.first_name, "First name is required");
        errors.require_text("lastName", &self.last_name, "Last name is required");
        errors.require_text("username", &self.username, "Username is required");
        errors.require_text("email", &self.email, "Email is required");
        errors.require_text("password", &self.password, "Password is required");
        errors.require_some("role", self.role.as_ref(), "Role is required");
        if self.role == Some(Role::Delegate) && self.added_by.is_none() {
            errors.insert("addedBy", "Delegated accounts need a creator");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub rsls: Option<Vec<RslId>>,
    pub added_by: Option<AccountId>,
}

/// Payload for creating a staff member. The creator comes from the caller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStaff {
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    pub gender: Option<Gender>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub corresponding_email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub rsls: Vec<RslId>,
}

impl NewStaff {
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut errors = FieldErrors::new();
        errors.require_text("jobTitle", &self.job_title, "Job title is required");
        errors.require_text("firstName", &self.first_name, "First name is required");
        errors.require_text("lastName", &self.last_name, "Last name is required");
        errors.require_text("phone", &self.phone, "Phone is required");
        errors.require_some("gender", self.gender.as_ref(), "Gender is required");
        errors.require_text("username", &self.username, "Username is required");
        errors.require_text("email", &self.email, "Email is required");
        errors.require_text(
            "correspondingEmail",
            &self.corresponding_email,
            "Corresponding email is required",
        );
        errors.require_text("password", &self.password, "Password is required");
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUpdate {
    pub job_title: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub corresponding_email: Option<String>,
    pub password: Option<String>,
    pub rsls: Option<Vec<RslId>>,
}
