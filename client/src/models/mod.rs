//! Request parameters and response payloads, one module per endpoint

mod de;

pub mod autocomplete;
pub mod discover;
pub mod key;
pub mod status;
pub mod user;

pub use autocomplete::*;
pub use discover::*;
pub use key::*;
pub use status::Status;
pub use user::*;
