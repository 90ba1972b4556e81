//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The issuance orchestrator lives here, along with the idempotent wallet
//! class manager and the roster upload path.

pub mod class_manager;
pub mod handlers;

pub use class_manager::WalletClassManager;
