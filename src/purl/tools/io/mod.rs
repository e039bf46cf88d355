pub mod excel_read;
pub mod excel_write;
pub mod table;

pub use table::{Delimiter, Record, Table, read_association_table, read_header};
