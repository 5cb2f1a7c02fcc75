//! Core domain types
//!
//! This module contains the domain structures shared between the tracker
//! (which owns job state) and any presentation layer (which only ever reads
//! immutable views of it).

pub mod job;
pub mod progress;
