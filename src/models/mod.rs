pub mod audit;
pub mod expense;
pub mod member;
pub mod room;

pub use audit::AuditLogEntry;
pub use expense::{Expense, ExpenseStatus};
pub use member::Member;
pub use room::Room;
