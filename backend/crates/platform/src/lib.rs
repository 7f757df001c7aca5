//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random secrets, HMAC-SHA256, Base64)
//! - Password hashing (Argon2id with per-password salt and optional pepper)
//! - Cookie management

pub mod cookie;
pub mod crypto;
pub mod password;
