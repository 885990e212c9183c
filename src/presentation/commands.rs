//! One-shot post operations: the automation surface of the binary.
//!
//! Each subcommand maps to a single backend call, except that writes first
//! fetch the collection so the same draft validation the console applies
//! (required fields, unique title) runs before any mutation is issued.

use std::fs;
use std::path::PathBuf;

use crate::application::error::AppError;
use crate::application::gateway::PostsGateway;
use crate::config::PostsCmd;
use crate::domain::posts::{self, Draft};
use crate::infra::api::ApiClient;

use super::{CliError, print_json};

pub async fn handle(client: &ApiClient, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List => list(client).await,
        PostsCmd::Search { keyword } => search(client, &keyword).await,
        PostsCmd::Create {
            title,
            image,
            content,
            content_file,
            unpublished,
        } => create(client, title, image, content, content_file, unpublished).await,
        PostsCmd::Update {
            id,
            title,
            image,
            content,
            content_file,
        } => update(client, id, title, image, content, content_file).await,
        PostsCmd::SetStatus { id, status } => set_status(client, id, status).await,
        PostsCmd::Delete { id } => delete(client, id).await,
    }
}

async fn list(client: &ApiClient) -> Result<(), CliError> {
    let collection = client.list().await?;
    print_json(&collection)
}

async fn search(client: &ApiClient, keyword: &str) -> Result<(), CliError> {
    let collection = client.search(keyword).await?;
    print_json(&collection)
}

async fn create(
    client: &ApiClient,
    title: String,
    image: String,
    content: Option<String>,
    content_file: Option<PathBuf>,
    unpublished: bool,
) -> Result<(), CliError> {
    let content = read_value(content, content_file)?;
    let collection = client.list().await?;

    let draft = Draft {
        title,
        image,
        content,
        status: !unpublished,
        ..Draft::empty(posts::today_stamp())
    };
    posts::validate_draft(&draft, &collection, None).map_err(AppError::from)?;

    let created = client.create(&draft.into_post()).await?;
    print_json(&created)
}

async fn update(
    client: &ApiClient,
    id: i64,
    title: Option<String>,
    image: Option<String>,
    content: Option<String>,
    content_file: Option<PathBuf>,
) -> Result<(), CliError> {
    let content = read_opt_value(content, content_file)?;
    let collection = client.list().await?;
    let existing = collection
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| CliError::InvalidInput(format!("post {id} not found")))?;

    let mut draft = Draft::from_post(existing);
    if let Some(title) = title {
        draft.title = title;
    }
    if let Some(image) = image {
        draft.image = image;
    }
    if let Some(content) = content {
        draft.content = content;
    }
    posts::validate_draft(&draft, &collection, Some(id)).map_err(AppError::from)?;

    let updated = client.update(id, &draft.into_post()).await?;
    print_json(&updated)
}

async fn set_status(client: &ApiClient, id: i64, status: Option<bool>) -> Result<(), CliError> {
    let status = match status {
        Some(status) => status,
        // Mirror the console toggle: negate the current backend state.
        None => {
            let collection = client.list().await?;
            let existing = collection
                .iter()
                .find(|p| p.id == id)
                .ok_or_else(|| CliError::InvalidInput(format!("post {id} not found")))?;
            !existing.status
        }
    };

    let updated = client.set_status(id, status).await?;
    print_json(&updated)
}

async fn delete(client: &ApiClient, id: i64) -> Result<(), CliError> {
    client.delete(id).await?;
    println!("deleted");
    Ok(())
}

fn read_value(val: Option<String>, file: Option<PathBuf>) -> Result<String, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        Ok(data)
    } else if let Some(v) = val {
        Ok(v)
    } else {
        Err(CliError::InvalidInput(
            "content required (use --content or --content-file)".into(),
        ))
    }
}

fn read_opt_value(val: Option<String>, file: Option<PathBuf>) -> Result<Option<String>, CliError> {
    if let Some(path) = file {
        let data = fs::read_to_string(&path).map_err(|source| CliError::InputFile {
            path: path.display().to_string(),
            source,
        })?;
        return Ok(Some(data));
    }
    Ok(val)
}
