pub mod analyzer;
pub mod config;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod source;
pub mod storage;
pub mod utils;
