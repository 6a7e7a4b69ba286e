pub mod leaves;
pub mod users;
