//! # Chanwatch Core
//!
//! Record types shared by every chanwatch crate.
//!
//! ## Key Types
//!
//! - [`User`] - A registered user and its opaque [`Session`]
//! - [`Channel`] - A monitored channel owned by a user
//! - [`UserId`] / [`ChannelId`] - Integer identifier newtypes
//! - [`IntoId`] - Coercion from the representations callers hand us
//!
//! Nothing in this crate touches storage. Identifiers are always integers
//! once they reach a store; coercion from strings happens here.

pub mod error;
pub mod id;
pub mod types;

pub use error::IdError;
pub use id::{ChannelId, IntoId, UserId};
pub use types::{Channel, Session, User};
