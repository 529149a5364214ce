pub mod error;
pub mod file_types;
pub mod repository;
pub mod request;
pub mod response;
