//! Credential hashing module
//!
//! One-way hashing and verification of passwords using bcrypt.

mod hasher;

pub use hasher::PasswordHasher;
