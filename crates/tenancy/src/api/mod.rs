//! HTTP surface shared by every router: the response envelope, error mapping,
//! and the extractors that report their rejections through it.

mod actor;
mod envelope;
mod extract;

pub use actor::{ActorId, ACTOR_HEADER};
pub use envelope::{ApiError, ApiResponse, Envelope};
pub use extract::{ApiJson, ApiQuery};
