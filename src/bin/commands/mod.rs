//! CLI command handlers
//!
//! Thin dispatch glue over [`BookmarkStore`]; every handler opens the
//! store, performs one operation, and prints the outcome. Errors propagate
//! to `main`, which decides the exit code.

use anyhow::{anyhow, Result};
use clap::Args;
use shelfmark::{Bookmark, BookmarkStore, Record};
use std::path::Path;

/// Arguments for the Add command
#[derive(Args)]
pub struct AddArgs {
    /// Title for the bookmark
    pub title: String,

    /// Address to save
    pub url: String,

    /// Free-form notes
    #[clap(short, long)]
    pub notes: Option<String>,
}

/// Arguments for the List command
#[derive(Args)]
pub struct ListArgs {
    /// Only show bookmarks with exactly these notes
    #[clap(short, long)]
    pub notes: Option<String>,

    /// Sort order, e.g. "id desc" or "title"
    #[clap(short, long, default_value = "id")]
    pub sort: String,

    /// Output as JSON
    #[clap(long)]
    pub json: bool,
}

/// Arguments for the Remove command
#[derive(Args)]
pub struct RemoveArgs {
    /// Id of the bookmark to remove
    #[clap(required_unless_present = "title")]
    pub id: Option<i64>,

    /// Remove every bookmark with this exact title instead
    #[clap(short, long, conflicts_with = "id")]
    pub title: Option<String>,
}

pub fn run_add(db_path: &str, args: AddArgs) -> Result<()> {
    let store = BookmarkStore::open(db_path)?;
    let bookmark = Bookmark::new(args.title, args.url, args.notes);
    let id = store.add(&bookmark)?;
    println!("saved #{}: {} <{}>", id, bookmark.title, bookmark.url);
    Ok(())
}

pub fn run_list(db_path: &str, args: ListArgs) -> Result<()> {
    let store = BookmarkStore::open(db_path)?;

    let criteria = args
        .notes
        .map(|notes| Record::new().with("notes", notes));
    let bookmarks = store.list(criteria.as_ref(), Some(&args.sort))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bookmarks)?);
        return Ok(());
    }

    if bookmarks.is_empty() {
        println!("no bookmarks");
        return Ok(());
    }

    for bookmark in &bookmarks {
        let id = bookmark.id.unwrap_or_default();
        let notes = bookmark.notes.as_deref().unwrap_or("");
        println!(
            "{:>5}  {}  {}  <{}>  {}",
            id, bookmark.date_added, bookmark.title, bookmark.url, notes
        );
    }
    Ok(())
}

pub fn run_remove(db_path: &str, args: RemoveArgs) -> Result<()> {
    let store = BookmarkStore::open(db_path)?;

    let affected = match (args.id, args.title) {
        (Some(id), _) => store.delete_by_id(id)?,
        (None, Some(title)) => store.delete_by_title(&title)?,
        (None, None) => return Err(anyhow!("provide an id or --title")),
    };

    match affected {
        0 => println!("nothing matched"),
        n => println!("removed {} bookmark(s)", n),
    }
    Ok(())
}

pub fn run_status(db_path: &str) -> Result<()> {
    println!("Database path:   {}", db_path);

    if !Path::new(db_path).exists() {
        println!("Status:          not created yet");
        return Ok(());
    }

    let size = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let store = BookmarkStore::open(db_path)?;

    println!("Size:            {} bytes", size);
    println!("Bookmarks:       {}", store.count()?);
    Ok(())
}
