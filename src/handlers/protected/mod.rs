// handlers/protected/mod.rs - Handlers behind the bearer-token middleware
//
// Every route here is mounted under /api/v1 with `jwt_auth_middleware`, which
// rejects the request with 401/1005 before a handler runs. Handlers that need
// the caller take an `AuthUser` extractor.

pub mod directory;
pub mod document;

pub use directory::*;
pub use document::*;
