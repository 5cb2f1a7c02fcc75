//! Moleculab Core
//!
//! Core types for the Moleculab pharmaceutical research client.
//!
//! This crate contains:
//! - Domain types: job state, progress views, phase messages
//! - DTOs: wire shapes for the research backend's REST API

pub mod domain;
pub mod dto;
