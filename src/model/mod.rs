pub mod leave;
pub mod role;
pub mod user;
