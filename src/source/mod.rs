pub mod traits;
pub mod twitter;

pub use traits::PostSource;
pub use twitter::TwitterSource;
