//! User account and authentication service
//!
//! The crate is split along hexagonal lines: `domain` holds the account
//! model and port traits, `application` the use cases, `infrastructure`
//! the Postgres, Argon2 and JWT implementations of the ports, and
//! `adapters` the HTTP surface.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
