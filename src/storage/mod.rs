pub mod csv_report;

pub use csv_report::{write_report, write_rows, HEADER};
