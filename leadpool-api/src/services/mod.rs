//! Business logic extracted from route handlers.
//!
//! Route handlers do wire-level concerns (extraction, status codes); the
//! services own validation, eligibility enforcement, and store calls.

pub mod assignment_service;
