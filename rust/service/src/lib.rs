//! # felt-service: Server Shell for the Hold'em Hand Engine
//!
//! Wraps [`felt_engine`] in the per-request machinery a real table server
//! needs: a versioned hand store committed by compare-and-swap, a lazy turn
//! clock that force-folds absent players, secret-free snapshots, and an
//! event bus feeding the realtime broadcast collaborator. Transport,
//! authentication and persistence technology live outside this crate; the
//! types here are the interface they program against.
//!
//! ## Modules
//!
//! - [`service`] - Read-compute-commit action handling ([`service::HandService`])
//! - [`store`] - Versioned storage with optimistic CAS commits
//! - [`snapshot`] - Public and per-owner state views
//! - [`events`] - Per-table event fan-out
//! - [`deadline`] - Turn clock policy, enforced lazily on the next request
//! - [`errors`] - Structured rejections for the session layer

pub mod deadline;
pub mod errors;
pub mod events;
pub mod service;
pub mod snapshot;
pub mod store;
