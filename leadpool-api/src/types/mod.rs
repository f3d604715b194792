//! API Request and Response Types
//!
//! Wire types for the REST endpoints. Domain entities from `leadpool-core`
//! are serialized directly; the types here are the envelopes around them.

// Pool query types
mod pool;
pub use pool::*;

// Agent types
mod agent;
pub use agent::*;

// Assignment types
mod assignment;
pub use assignment::*;
