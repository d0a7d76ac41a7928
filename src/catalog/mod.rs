//! The read-only catalog collections backing the configurator.

pub mod entity;
