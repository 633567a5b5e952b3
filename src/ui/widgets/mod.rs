pub mod movie;
pub mod search;
