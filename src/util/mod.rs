pub mod unicode;
pub mod words;
