pub mod file_system;
pub mod flashcard_service;
pub mod graph_service;
pub mod paths;
pub mod search_service;
pub mod sync_service;
pub mod tag_service;
pub mod tree_service;
pub mod workspace;
