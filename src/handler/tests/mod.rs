mod file_handler;
mod flashcard_handler;
