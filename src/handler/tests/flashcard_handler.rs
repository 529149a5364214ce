use rocket::http::{ContentType, Status};
use rocket::serde::json::serde_json as serde;

use crate::test::*;

#[test]
fn create_flashcard() {
    let workspace = init_workspace();
    let document = create_file(&workspace, "a/notes.txt");
    let client = client(workspace);
    let res = client
        .post(uri!("/flashcards"))
        .header(ContentType::JSON)
        .body(format!(
            r#"{{"documentId":{},"name":"capitals","front":"France","back":"Paris"}}"#,
            document.id
        ))
        .dispatch();
    assert_eq!(Status::Created, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("capitals", body["name"]);
    assert_eq!("Paris", body["back"]);
    let res = client
        .get(format!("/flashcards/document/{}", document.id))
        .dispatch();
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!(1, body.as_array().unwrap().len());
    let res = client
        .get(format!("/flashcards/folder/{}", document.folder_id.unwrap()))
        .dispatch();
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!(1, body.as_array().unwrap().len());
    cleanup();
}

#[test]
fn create_flashcard_for_missing_document_is_not_found() {
    let workspace = init_workspace();
    let client = client(workspace);
    let res = client
        .post(uri!("/flashcards"))
        .header(ContentType::JSON)
        .body(r#"{"documentId":12,"name":"card"}"#)
        .dispatch();
    assert_eq!(Status::NotFound, res.status());
    cleanup();
}

#[test]
fn delete_flashcard() {
    let workspace = init_workspace();
    let document = create_file(&workspace, "notes.txt");
    let flashcard = crate::service::flashcard_service::create_flashcard(
        &workspace,
        document.id,
        "card",
        None,
        None,
    )
    .unwrap();
    let client = client(workspace);
    let uri = format!("/flashcards/{}", flashcard.id);
    assert_eq!(Status::NoContent, client.delete(uri.clone()).dispatch().status());
    assert_eq!(Status::NotFound, client.delete(uri).dispatch().status());
    cleanup();
}

#[test]
fn update_flashcard() {
    let workspace = init_workspace();
    let document = create_file(&workspace, "notes.txt");
    let flashcard = crate::service::flashcard_service::create_flashcard(
        &workspace,
        document.id,
        "card",
        None,
        None,
    )
    .unwrap();
    let client = client(workspace);
    let res = client
        .put(format!("/flashcards/{}", flashcard.id))
        .header(ContentType::JSON)
        .body(r#"{"name":"capitals","front":"France","back":"Paris"}"#)
        .dispatch();
    assert_eq!(Status::Ok, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("capitals", body["name"]);
    assert_eq!("Paris", body["back"]);
    let res = client
        .put(uri!("/flashcards/300"))
        .header(ContentType::JSON)
        .body(r#"{"name":"capitals"}"#)
        .dispatch();
    assert_eq!(Status::NotFound, res.status());
    cleanup();
}

#[test]
fn flashcards_for_tag() {
    let workspace = init_workspace();
    let document = create_file(&workspace, "notes.txt");
    crate::service::flashcard_service::create_flashcard(&workspace, document.id, "card", None, None)
        .unwrap();
    let tag = create_tag(&workspace, "rust");
    crate::service::tag_service::tag_document_cascade(&workspace, document.id, tag.id).unwrap();
    let client = client(workspace);
    let res = client.get(format!("/flashcards/tag/{}", tag.id)).dispatch();
    assert_eq!(Status::Ok, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!("card", body[0]["name"]);
    cleanup();
}

#[test]
fn set_and_get_highlight() {
    let workspace = init_workspace();
    let document = create_file(&workspace, "notes.txt");
    let flashcard = crate::service::flashcard_service::create_flashcard(
        &workspace,
        document.id,
        "card",
        None,
        None,
    )
    .unwrap();
    let client = client(workspace);
    let uri = format!("/flashcards/{}/highlight", flashcard.id);
    assert_eq!(Status::NotFound, client.get(uri.clone()).dispatch().status());
    let res = client
        .post(uri.clone())
        .header(ContentType::JSON)
        .body(r#"{"kind":"text","start":2,"end":6}"#)
        .dispatch();
    assert_eq!(Status::Created, res.status());
    let res = client.get(uri.clone()).dispatch();
    assert_eq!(Status::Ok, res.status());
    let body: serde::Value = res.into_json().unwrap();
    assert_eq!(2, body["start"]);
    assert_eq!(6, body["end"]);
    let res = client
        .post(uri)
        .header(ContentType::JSON)
        .body(r#"{"kind":"region","page":1,"x1":0,"y1":0,"x2":1,"y2":1}"#)
        .dispatch();
    assert_eq!(Status::BadRequest, res.status());
    cleanup();
}
