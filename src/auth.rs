//! Auth-domain identifiers, scopes, and token secrets.

pub mod id;
pub mod scope;
pub mod token;

pub use id::*;
pub use scope::*;
pub use token::*;
