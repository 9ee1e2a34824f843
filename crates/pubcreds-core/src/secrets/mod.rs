//! Secret lookup abstractions and implementations
//!
//! This module provides the read side of secret storage:
//! - `SecretLookup` trait for plugging in custom stores
//! - Built-in implementations: `KeychainSecretLookup`, `MemorySecretLookup`, `ChainSecretLookup`

mod traits;
mod memory_store;
mod chain_store;
mod keychain_store;

pub use traits::SecretLookup;
pub use memory_store::MemorySecretLookup;
pub use chain_store::ChainSecretLookup;
pub use keychain_store::KeychainSecretLookup;
