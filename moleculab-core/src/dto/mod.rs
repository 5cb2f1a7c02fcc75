//! Data Transfer Objects for the backend REST API
//!
//! Wire shapes exchanged with the research backend. These mirror the HTTP
//! contract exactly and are kept separate from the domain types the tracker
//! works with internally.

pub mod research;
