// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind `jwt_auth_middleware`, which injects the
// caller as `Extension<AuthUser>`. Handlers that modify an account check
// that the caller owns it.

pub mod favorites;
pub mod movies;
pub mod users;
