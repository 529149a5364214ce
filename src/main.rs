#[macro_use]
extern crate rocket;

use std::path::Path;

use rocket::{Build, Rocket};

use handler::{
    file_handler::{
        change_file_extension, create_file, create_folder, delete_path, get_document_name,
        get_document_path, get_folder_name, get_folder_path, get_tree, move_path, read_file,
        rename_file, rename_folder, search, write_file,
    },
    flashcard_handler::{
        create_flashcard, delete_flashcard, get_for_document, get_for_folder, get_for_tag,
        get_highlight, set_highlight, update_flashcard,
    },
    node_handler::{get_connections, get_graph, get_node, update_presence},
    tag_handler::{
        create_tag, delete_tag, get_inherited_tags, get_tag, get_tags_for_node, list_tags,
        rename_tag, tag_document, tag_flashcard, tag_folder, tag_node, untag_document,
        untag_flashcard, untag_node,
    },
};

use crate::config::{parse_config, CONFIG_LOCATION};
use crate::logging::init_logger;
use crate::service::workspace::Workspace;

mod config;
mod handler;
mod logging;
mod model;
mod repository;
mod service;
#[cfg(test)]
mod test;

#[launch]
fn rocket() -> Rocket<Build> {
    let parsed = parse_config(CONFIG_LOCATION)
        .unwrap_or_else(|e| panic!("Failed to parse config file. Exception is {e}"));
    let config = parsed.clone().unwrap_or_default();
    init_logger(&config.logging).unwrap_or_else(|e| panic!("Failed to set up logging: {e}"));
    if parsed.is_none() {
        log::warn!("No config file found at {CONFIG_LOCATION}. Continuing startup with defaults...");
    }
    let workspace = Workspace::from_config(&config).unwrap_or_else(|e| {
        panic!(
            "Failed to open workspace {:?}: {e}",
            Path::new(&config.workspace.path)
        )
    });
    log::info!("serving workspace {:?}", workspace.root());
    build_rocket(workspace)
}

/// mounts every route against the passed workspace
pub fn build_rocket(workspace: Workspace) -> Rocket<Build> {
    rocket::build()
        .manage(workspace)
        .mount(
            "/files",
            routes![
                get_tree,
                search,
                get_document_path,
                get_document_name,
                get_folder_path,
                get_folder_name,
                read_file,
                create_file,
                write_file,
                create_folder,
                delete_path,
                move_path,
                rename_file,
                rename_folder,
                change_file_extension
            ],
        )
        .mount(
            "/tags",
            routes![
                list_tags,
                get_tag,
                create_tag,
                rename_tag,
                delete_tag,
                get_inherited_tags,
                get_tags_for_node,
                tag_node,
                untag_node,
                tag_document,
                untag_document,
                tag_folder,
                tag_flashcard,
                untag_flashcard
            ],
        )
        .mount(
            "/flashcards",
            routes![
                create_flashcard,
                get_for_document,
                get_for_folder,
                get_for_tag,
                update_flashcard,
                set_highlight,
                get_highlight,
                delete_flashcard
            ],
        )
        .mount(
            "/nodes",
            routes![get_graph, get_node, get_connections, update_presence],
        )
}
