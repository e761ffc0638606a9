//! Primary users, delegated staff, and resolution of a caller id to an actor.

pub mod domain;
pub mod password;
pub mod repository;
pub mod resolver;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AccountId, AccountKind, Actor, Gender, NewStaff, NewUser, Role, Staff, StaffUpdate, User,
    UserUpdate,
};
pub use repository::AccountRepository;
pub use resolver::{IdentityResolver, ResolveError};
pub use router::{staff_router, user_router};
pub use service::{AccountService, AccountServiceError};
