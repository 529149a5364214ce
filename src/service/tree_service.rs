use std::collections::{HashMap, HashSet};

use crate::model::error::WorkspaceResult;
use crate::model::file_types::encoding_flag;
use crate::model::repository::FileTreeRow;
use crate::model::response::TreeNode;
use crate::repository::search_repository;
use crate::service::workspace::Workspace;

/// a folder waiting to be assembled. Children are indices into the same slot list
struct FolderSlot {
    key: u32,
    id: u32,
    name: String,
    presence: f64,
    child_folders: Vec<usize>,
    documents: Vec<TreeNode>,
}

/// reads every folder and document from the database and nests them under a synthetic root
pub fn get_database_file_tree(workspace: &Workspace) -> WorkspaceResult<TreeNode> {
    let con = workspace.open_connection()?;
    let rows = search_repository::get_file_tree_rows(&con)?;
    Ok(build_tree(&rows))
}

/// nests the flat folder/document rows into a tree.
///
/// Rows must list every folder after its parent. Folders whose parent has not been seen yet are
/// dropped along with their documents. Keys are handed out to folders first and then to documents,
/// in row order, starting at 1. The root is always key 0 with id 0
pub fn build_tree(rows: &[FileTreeRow]) -> TreeNode {
    let mut next_key = 1;
    let mut slots: Vec<Option<FolderSlot>> = Vec::new();
    let mut slot_of: HashMap<u32, usize> = HashMap::new();
    let mut root_folders: Vec<usize> = Vec::new();

    for row in rows {
        let Some(folder_id) = row.folder_id else {
            continue;
        };
        if slot_of.contains_key(&folder_id) {
            continue;
        }
        let parent_slot = match row.parent_folder_id {
            None => None,
            Some(parent_id) => match slot_of.get(&parent_id) {
                Some(index) => Some(*index),
                None => {
                    log::warn!("folder {folder_id} was listed before its parent {parent_id}, leaving it out of the tree");
                    continue;
                }
            },
        };
        let index = slots.len();
        slots.push(Some(FolderSlot {
            key: next_key,
            id: folder_id,
            name: row.folder_name.clone().unwrap_or_default(),
            presence: row.folder_presence.unwrap_or_default(),
            child_folders: Vec::new(),
            documents: Vec::new(),
        }));
        next_key += 1;
        slot_of.insert(folder_id, index);
        match parent_slot {
            Some(parent) => {
                if let Some(parent) = slots[parent].as_mut() {
                    parent.child_folders.push(index);
                }
            }
            None => root_folders.push(index),
        }
    }

    let mut root_documents: Vec<TreeNode> = Vec::new();
    let mut seen_documents: HashSet<u32> = HashSet::new();
    for row in rows {
        let Some(document_id) = row.document_id else {
            continue;
        };
        if !seen_documents.insert(document_id) {
            continue;
        }
        let extension = row.file_extension.clone().unwrap_or_default();
        let encoding = encoding_flag(&extension);
        let document = TreeNode::document(
            next_key,
            document_id,
            row.document_name.clone().unwrap_or_default(),
            row.document_presence.unwrap_or_default(),
            extension,
            encoding,
        );
        match row.folder_id {
            None => root_documents.push(document),
            Some(folder_id) => match slot_of.get(&folder_id).and_then(|i| slots[*i].as_mut()) {
                Some(folder) => folder.documents.push(document),
                None => {
                    log::warn!("document {document_id} belongs to folder {folder_id}, which is not in the tree");
                    continue;
                }
            },
        }
        next_key += 1;
    }

    let mut items: Vec<TreeNode> = root_folders
        .iter()
        .filter_map(|index| assemble(&mut slots, *index))
        .collect();
    items.extend(root_documents);
    TreeNode::folder(0, 0, "root".to_string(), 0.0, items)
}

fn assemble(slots: &mut [Option<FolderSlot>], index: usize) -> Option<TreeNode> {
    let slot = slots[index].take()?;
    let mut items: Vec<TreeNode> = slot
        .child_folders
        .iter()
        .filter_map(|child| assemble(slots, *child))
        .collect();
    items.extend(slot.documents);
    Some(TreeNode::folder(
        slot.key,
        slot.id,
        slot.name,
        slot.presence,
        items,
    ))
}
