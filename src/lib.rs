//! Clubpass - Membership Credential Verification & Pass Issuance Engine
//!
//! Verifies member claims against hashed club rosters and issues wallet
//! passes for Google Wallet (signed save URL) and Apple Wallet (signed
//! `.pkpass` archive).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
