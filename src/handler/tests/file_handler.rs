use std::fs;

use rocket::http::{ContentType, Status};
use rocket::serde::json::serde_json as serde;

use crate::model::response::BasicMessage;
use crate::test::*;

#[test]
fn create_file_returns_created_document() {
    let workspace = init_workspace();
    let root = workspace.root().to_path_buf();
    let client = client(workspace);
    let res = client
        .post(uri!("/files"))
        .header(ContentType::JSON)
        .body(r#"{"path":"notes/todo.md","content":"- [ ] write tests"}"#)
        .dispatch();
    assert_eq!(Status::Created, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("todo.md", body["name"]);
    assert_eq!("md", body["file_extension"]);
    assert_eq!(
        "- [ ] write tests",
        fs::read_to_string(root.join("notes/todo.md")).unwrap()
    );
    cleanup();
}

#[test]
fn create_binary_file_decodes_base64() {
    let workspace = init_workspace();
    let root = workspace.root().to_path_buf();
    let client = client(workspace);
    let res = client
        .post(uri!("/files"))
        .header(ContentType::JSON)
        .body(r#"{"path":"blob.bin","content":"AAEC"}"#)
        .dispatch();
    assert_eq!(Status::Created, res.status());
    assert_eq!(vec![0u8, 1, 2], fs::read(root.join("blob.bin")).unwrap());
    cleanup();
}

#[test]
fn create_binary_file_with_bad_base64_is_bad_request() {
    let workspace = init_workspace();
    let client = client(workspace);
    let res = client
        .post(uri!("/files"))
        .header(ContentType::JSON)
        .body(r#"{"path":"blob.bin","content":"not base64!"}"#)
        .dispatch();
    assert_eq!(Status::BadRequest, res.status());
    cleanup();
}

#[test]
fn create_existing_file_is_conflict() {
    let workspace = init_workspace();
    create_file(&workspace, "a.txt");
    let client = client(workspace);
    let res = client
        .post(uri!("/files"))
        .header(ContentType::JSON)
        .body(r#"{"path":"a.txt","content":"again"}"#)
        .dispatch();
    assert_eq!(Status::Conflict, res.status());
    let body: BasicMessage = res.into_json().unwrap();
    assert_eq!("a.txt already exists", body.message);
    cleanup();
}

#[test]
fn create_file_outside_workspace_is_bad_request() {
    let workspace = init_workspace();
    let client = client(workspace);
    let res = client
        .post(uri!("/files"))
        .header(ContentType::JSON)
        .body(r#"{"path":"../escape.txt","content":""}"#)
        .dispatch();
    assert_eq!(Status::BadRequest, res.status());
    cleanup();
}

#[test]
fn read_file_content() {
    let workspace = init_workspace();
    create_file(&workspace, "a/b.txt");
    let client = client(workspace);
    let res = client.get(uri!("/files/content?path=a/b.txt")).dispatch();
    assert_eq!(Status::Ok, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("test", body["content"]);
    assert_eq!(false, body["binary"]);
    assert_eq!("a/b.txt", body["path"]);
    cleanup();
}

#[test]
fn read_missing_file_is_not_found() {
    let workspace = init_workspace();
    let client = client(workspace);
    let res = client.get(uri!("/files/content?path=nope.txt")).dispatch();
    assert_eq!(Status::NotFound, res.status());
    cleanup();
}

#[test]
fn write_file_content() {
    let workspace = init_workspace();
    create_file(&workspace, "a.txt");
    let root = workspace.root().to_path_buf();
    let client = client(workspace);
    let res = client
        .put(uri!("/files/content"))
        .header(ContentType::JSON)
        .body(r#"{"path":"a.txt","content":"updated"}"#)
        .dispatch();
    assert_eq!(Status::NoContent, res.status());
    assert_eq!("updated", fs::read_to_string(root.join("a.txt")).unwrap());
    cleanup();
}

#[test]
fn create_folder() {
    let workspace = init_workspace();
    let client = client(workspace);
    let res = client
        .post(uri!("/files/folder"))
        .header(ContentType::JSON)
        .body(r#"{"path":"a/b"}"#)
        .dispatch();
    assert_eq!(Status::Created, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("b", body["name"]);
    cleanup();
}

#[test]
fn delete_path() {
    let workspace = init_workspace();
    create_file(&workspace, "a/b.txt");
    let root = workspace.root().to_path_buf();
    let client = client(workspace);
    let res = client.delete(uri!("/files?path=a")).dispatch();
    assert_eq!(Status::NoContent, res.status());
    assert!(!root.join("a").exists());
    let res = client.delete(uri!("/files?path=a")).dispatch();
    assert_eq!(Status::NotFound, res.status());
    cleanup();
}

#[test]
fn move_path() {
    let workspace = init_workspace();
    create_file(&workspace, "a/b.txt");
    let client = client(workspace);
    let res = client
        .put(uri!("/files/move"))
        .header(ContentType::JSON)
        .body(r#"{"source":"a","destination":"c"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("Folder", body["type"]);
    assert_eq!("c", body["entry"]["name"]);
    cleanup();
}

#[test]
fn move_onto_existing_path_is_conflict() {
    let workspace = init_workspace();
    create_file(&workspace, "a.txt");
    create_file(&workspace, "b.txt");
    let client = client(workspace);
    let res = client
        .put(uri!("/files/move"))
        .header(ContentType::JSON)
        .body(r#"{"source":"a.txt","destination":"b.txt"}"#)
        .dispatch();
    assert_eq!(Status::Conflict, res.status());
    cleanup();
}

#[test]
fn rename_file_and_folder() {
    let workspace = init_workspace();
    create_file(&workspace, "a/b.txt");
    let client = client(workspace);
    let res = client
        .put(uri!("/files/rename"))
        .header(ContentType::JSON)
        .body(r#"{"path":"a/b.txt","name":"c.txt"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("c.txt", body["name"]);
    let res = client
        .put(uri!("/files/folder/rename"))
        .header(ContentType::JSON)
        .body(r#"{"path":"a","name":"z"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("z", body["name"]);
    cleanup();
}

#[test]
fn change_file_extension() {
    let workspace = init_workspace();
    create_file(&workspace, "a.txt");
    let client = client(workspace);
    let res = client
        .put(uri!("/files/extension"))
        .header(ContentType::JSON)
        .body(r#"{"path":"a.txt","extension":"md"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("a.md", body["name"]);
    assert_eq!("md", body["file_extension"]);
    cleanup();
}

#[test]
fn get_tree() {
    let workspace = init_workspace();
    create_file(&workspace, "a/b.txt");
    let client = client(workspace);
    let res = client.get(uri!("/files/tree")).dispatch();
    assert_eq!(Status::Ok, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!(0, body["key"]);
    assert_eq!("a", body["items"][0]["name"]);
    assert_eq!("b.txt", body["items"][0]["items"][0]["name"]);
    assert_eq!(1, body["items"][0]["items"][0]["encoding"]);
    cleanup();
}

#[test]
fn search() {
    let workspace = init_workspace();
    create_file(&workspace, "Note");
    create_file(&workspace, "my Note");
    let client = client(workspace);
    let res = client.get(uri!("/files/search?term=Note")).dispatch();
    assert_eq!(Status::Ok, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("Note", body["documents"][0]["name"]);
    assert_eq!("my Note", body["documents"][1]["name"]);
    assert_eq!(2, body["metadata"]["total"]);
    cleanup();
}

#[test]
fn search_without_term_is_bad_request() {
    let workspace = init_workspace();
    let client = client(workspace);
    let res = client.get(uri!("/files/search?term=")).dispatch();
    assert_eq!(Status::BadRequest, res.status());
    cleanup();
}

#[test]
fn look_up_paths_and_names_by_id() {
    let workspace = init_workspace();
    let document = create_file(&workspace, "a/b.txt");
    let folder_id = document.folder_id.unwrap();
    let client = client(workspace);
    let res = client.get(format!("/files/{}/path", document.id)).dispatch();
    assert_eq!(Status::Ok, res.status());
    let body: BasicMessage = res.into_json().unwrap();
    assert_eq!("a/b.txt", body.message);
    let res = client.get(format!("/files/{}/name", document.id)).dispatch();
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("b.txt", body["name"]);
    let res = client.get(format!("/files/folder/{folder_id}/path")).dispatch();
    let body: BasicMessage = res.into_json().unwrap();
    assert_eq!("a", body.message);
    let res = client.get(format!("/files/folder/{folder_id}/name")).dispatch();
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("a", body["name"]);
    cleanup();
}

#[test]
fn look_up_missing_id_is_not_found() {
    let workspace = init_workspace();
    let client = client(workspace);
    assert_eq!(Status::NotFound, client.get(uri!("/files/9/path")).dispatch().status());
    assert_eq!(
        Status::NotFound,
        client.get(uri!("/files/folder/9/name")).dispatch().status()
    );
    cleanup();
}
