//! DML statement builders.

mod delete;
mod insert;
mod select;
mod update;

pub use delete::DeleteStatement;
pub use insert::InsertStatement;
pub use select::SelectStatement;
pub use update::UpdateStatement;
