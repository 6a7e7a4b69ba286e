pub mod handlers;
pub mod identity;
pub mod middleware;

pub use identity::Identity;
