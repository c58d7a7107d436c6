pub mod search_parser;

pub use search_parser::{Parser, SearchResponseParser};
