//! Server tests against an in-memory sqlite store.

mod common;
mod envelope;
mod permissions;
mod projects;
mod resources;
mod roles;
