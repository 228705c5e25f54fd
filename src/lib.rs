//! Taskdeck: user-scoped task management core.
//!
//! This crate provides the domain model, authorization, querying, and
//! mutation services behind a personal task-management application: users
//! own lists, lists contain tasks, and every operation is scoped to the
//! acting user supplied by an external authentication collaborator.
//!
//! # Architecture
//!
//! Taskdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`tasks`]: Lists, tasks, ownership authorization, filtered and
//!   paginated queries, mutations, and dashboard counts

pub mod tasks;
