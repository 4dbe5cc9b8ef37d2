// crates/air-core/src/lib.rs
//
// air-core: Core types, account identities, crypto primitives, and error
// types for the AIR Protocol.
//
// This is the leaf crate that all other crates in the workspace depend on.
// It defines account identifiers, the protocol-wide error type, hashing
// helpers, and the observable event types emitted by protocol components.

pub mod account;
pub mod crypto;
pub mod error;
pub mod events;

// Re-export key types for ergonomic access from downstream crates.
// Usage: `use air_core::AccountId;`

pub use account::AccountId;
pub use crypto::{hash_bytes, Hash32, Keypair};
pub use error::AirError;
pub use events::ProtocolEvent;
