//! Adapters - concrete implementations of the ports.

pub mod apple;
pub mod google;
pub mod http;
pub mod images;
pub mod storage;
