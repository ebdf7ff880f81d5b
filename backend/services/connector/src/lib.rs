pub mod api;
pub mod buildops;
