//! Extension seams around the transport: request signing and rate-limit header parsing.

pub mod rate_limit;
pub mod request_signer;

pub use rate_limit::*;
pub use request_signer::*;
