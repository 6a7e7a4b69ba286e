pub mod leaves;
pub mod users;

pub use leaves::{LeaveFilter, LeaveStore};
pub use users::UserStore;
