//! Adapter implementations of the task-management ports.

pub mod memory;
pub mod postgres;
