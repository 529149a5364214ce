use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension};

use crate::model::repository::{Flashcard, Highlight};

pub fn create_flashcard(
    document_id: u32,
    node_id: u32,
    name: &str,
    front: Option<&str>,
    back: Option<&str>,
    next_recall: NaiveDateTime,
    con: &Connection,
) -> Result<Flashcard, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/flashcard/create_flashcard.sql"
    ))?;
    let id = pst.insert(rusqlite::params![
        document_id,
        node_id,
        name,
        front,
        back,
        next_recall
    ])? as u32;
    Ok(Flashcard {
        id,
        document_id,
        node_id,
        name: name.to_string(),
        front: front.map(str::to_string),
        back: back.map(str::to_string),
        next_recall: Some(next_recall),
        highlight_id: None,
    })
}

pub fn get_by_id(id: u32, con: &Connection) -> Result<Option<Flashcard>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/flashcard/get_flashcard_by_id.sql"
    ))?;
    pst.query_row(rusqlite::params![id], flashcard_mapper)
        .optional()
}

pub fn get_by_node_id(node_id: u32, con: &Connection) -> Result<Option<Flashcard>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/flashcard/get_flashcard_by_node_id.sql"
    ))?;
    pst.query_row(rusqlite::params![node_id], flashcard_mapper)
        .optional()
}

pub fn get_for_document(
    document_id: u32,
    con: &Connection,
) -> Result<Vec<Flashcard>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/flashcard/get_flashcards_for_document.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![document_id], flashcard_mapper)?;
    rows.collect()
}

/// flashcards of the documents directly inside the folder
pub fn get_for_folder(folder_id: u32, con: &Connection) -> Result<Vec<Flashcard>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/flashcard/get_flashcards_for_folder.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![folder_id], flashcard_mapper)?;
    rows.collect()
}

/// flashcards carrying the tag, whether it was applied directly or inherited
pub fn get_for_tag(tag_id: u32, con: &Connection) -> Result<Vec<Flashcard>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/flashcard/get_flashcards_for_tag.sql"
    ))?;
    let rows = pst.query_map(rusqlite::params![tag_id], flashcard_mapper)?;
    rows.collect()
}

pub fn update_flashcard(
    id: u32,
    name: &str,
    front: Option<&str>,
    back: Option<&str>,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/flashcard/update_flashcard.sql"
    ))?;
    pst.execute(rusqlite::params![name, front, back, id])
}

/// inserts the highlight and returns it with its new id. The passed id is ignored
pub fn create_highlight(highlight: &Highlight, con: &Connection) -> Result<Highlight, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/flashcard/create_highlight.sql"
    ))?;
    let id = pst.insert(rusqlite::params![
        highlight.page,
        highlight.x1,
        highlight.y1,
        highlight.x2,
        highlight.y2,
        highlight.start,
        highlight.end
    ])? as u32;
    Ok(Highlight {
        id,
        ..highlight.clone()
    })
}

pub fn get_highlight(id: u32, con: &Connection) -> Result<Option<Highlight>, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/flashcard/get_highlight_by_id.sql"
    ))?;
    pst.query_row(rusqlite::params![id], |row| {
        Ok(Highlight {
            id: row.get(0)?,
            page: row.get(1)?,
            x1: row.get(2)?,
            y1: row.get(3)?,
            x2: row.get(4)?,
            y2: row.get(5)?,
            start: row.get(6)?,
            end: row.get(7)?,
        })
    })
    .optional()
}

pub fn delete_highlight(id: u32, con: &Connection) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/flashcard/delete_highlight.sql"
    ))?;
    pst.execute(rusqlite::params![id])
}

pub fn set_highlight_id(
    flashcard_id: u32,
    highlight_id: Option<u32>,
    con: &Connection,
) -> Result<usize, rusqlite::Error> {
    let mut pst = con.prepare(include_str!(
        "../assets/queries/flashcard/set_flashcard_highlight.sql"
    ))?;
    pst.execute(rusqlite::params![highlight_id, flashcard_id])
}

fn flashcard_mapper(row: &rusqlite::Row) -> Result<Flashcard, rusqlite::Error> {
    Ok(Flashcard {
        id: row.get(0)?,
        document_id: row.get(1)?,
        node_id: row.get(2)?,
        name: row.get(3)?,
        front: row.get(4)?,
        back: row.get(5)?,
        next_recall: row.get(6)?,
        highlight_id: row.get(7)?,
    })
}
