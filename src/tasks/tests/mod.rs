//! Unit tests for the task-management module.

mod support;
