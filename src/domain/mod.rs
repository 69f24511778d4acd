pub mod expense;
pub mod user;

pub use expense::{ExpenseRecord, DEFAULT_CATEGORIES};
pub use user::User;
