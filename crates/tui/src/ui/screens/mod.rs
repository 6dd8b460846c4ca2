pub mod entry;
pub mod expenses;
