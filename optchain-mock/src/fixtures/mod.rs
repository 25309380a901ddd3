pub mod options;
pub mod quotes;
