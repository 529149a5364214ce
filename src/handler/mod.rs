pub mod file_handler;
pub mod flashcard_handler;
pub mod node_handler;
pub mod tag_handler;

#[cfg(test)]
mod tests;
