use crate::model::error::{WorkspaceError, WorkspaceResult};
use crate::model::response::SearchResults;
use crate::repository::search_repository;
use crate::service::workspace::Workspace;

/// searches folder and document names for `term`.
///
/// each list is ranked on its own: exact match, then case-sensitive prefix, case-insensitive prefix,
/// word boundary, and finally any other substring. Ties go to the higher presence and then the name
pub fn search_database(workspace: &Workspace, term: &str) -> WorkspaceResult<SearchResults> {
    let term = term.trim();
    if term.is_empty() {
        return Err(WorkspaceError::validation("A search term is required"));
    }
    let con = workspace.open_connection()?;
    let folders = search_repository::search_folders(term, &con)?;
    let documents = search_repository::search_documents(term, &con)?;
    log::debug!(
        "search for {term} matched {} folders and {} documents",
        folders.len(),
        documents.len()
    );
    Ok(SearchResults::new(folders, documents))
}
