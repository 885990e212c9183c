//! Interactive console screens: the landing page and the post list.
//!
//! The list screen is a thin driver around [`ListView`]: it parses line
//! commands, invokes the state machine, and re-renders. Validation
//! failures are printed for the operator; transport failures are logged
//! and reported as warnings with the previous state kept.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::PathBuf;

use quaderno_api_types::Post;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::application::error::AppError;
use crate::application::gateway::PostsGateway;
use crate::application::list_view::{Editor, ListView, Saved};
use crate::application::router::Route;
use crate::infra::api::ApiClient;

use super::CliError;

pub async fn run(client: ApiClient, route: Route) -> Result<(), CliError> {
    match route {
        Route::Landing => landing(client).await,
        Route::ListPost => list_post(client).await,
    }
}

async fn landing(client: ApiClient) -> Result<(), CliError> {
    println!("quaderno admin");
    println!("screens:");
    for route in Route::ALL {
        println!("  {}", route.path());
    }
    println!("commands: open <path>, quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        let line = line.trim();
        match line {
            "" => {}
            "quit" | "exit" => return Ok(()),
            _ => match line.strip_prefix("open ") {
                Some(path) => match Route::parse(path.trim()) {
                    Some(Route::ListPost) => return list_post(client).await,
                    Some(Route::Landing) => println!("already on the landing screen"),
                    None => println!("unknown route `{}`", path.trim()),
                },
                None => println!("unrecognized command; use `open <path>` or `quit`"),
            },
        }
    }
}

async fn list_post(client: ApiClient) -> Result<(), CliError> {
    let mut view = ListView::new(client);
    if let Err(err) = view.load().await {
        surface(&err);
    }
    print!("{}", render_table(view.posts(), view.not_found()));
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        let Some(command) = parse_command(&line) else {
            if !line.trim().is_empty() {
                println!("unrecognized command; type `help`");
            }
            continue;
        };
        if let Flow::Quit = dispatch(&mut view, command).await {
            return Ok(());
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

async fn dispatch<G: PostsGateway>(view: &mut ListView<G>, command: ConsoleCommand) -> Flow {
    match command {
        ConsoleCommand::Quit => return Flow::Quit,
        ConsoleCommand::Help => print_help(),
        ConsoleCommand::Reload => {
            if let Err(err) = view.load().await {
                surface(&err);
            }
            print!("{}", render_table(view.posts(), view.not_found()));
        }
        ConsoleCommand::Search(term) => {
            if let Err(err) = view.search(&term).await {
                surface(&err);
            }
            print!("{}", render_table(view.posts(), view.not_found()));
        }
        ConsoleCommand::Add => {
            view.open_create();
            print!("{}", render_draft(view.draft(), view.editor()));
        }
        ConsoleCommand::Edit(id) => match view.find(id).cloned() {
            Some(post) => {
                view.open_edit(&post);
                print!("{}", render_draft(view.draft(), view.editor()));
            }
            None => println!("no post with id {id}"),
        },
        ConsoleCommand::Title(text) => {
            if editor_open(view) {
                view.set_title(&text);
            }
        }
        ConsoleCommand::Content(text) => {
            if editor_open(view) {
                view.set_content(&text);
            }
        }
        ConsoleCommand::Image(path) => {
            if editor_open(view) {
                if let Err(err) = view.attach_image(&path) {
                    surface(&err);
                }
            }
        }
        ConsoleCommand::Save => match view.save().await {
            Ok(Saved::Created(post)) => {
                println!("created post {}", post.id);
                print!("{}", render_table(view.posts(), view.not_found()));
            }
            Ok(Saved::Updated(post)) => {
                println!("updated post {}", post.id);
                print!("{}", render_table(view.posts(), view.not_found()));
            }
            Err(err) => surface(&err),
        },
        ConsoleCommand::Cancel => {
            view.cancel();
            println!("draft discarded");
        }
        ConsoleCommand::Toggle(id) => {
            if let Err(err) = view.toggle_status(id).await {
                surface(&err);
            }
            print!("{}", render_table(view.posts(), view.not_found()));
        }
        ConsoleCommand::Delete(id) => {
            if let Err(err) = view.delete(id).await {
                surface(&err);
            }
            print!("{}", render_table(view.posts(), view.not_found()));
        }
    }
    Flow::Continue
}

/// Validation rejections are operator feedback; everything else is a
/// backend problem worth logging.
fn surface(err: &AppError) {
    match err.validation_message() {
        Some(message) => println!("{message}"),
        None => {
            warn!(error = %err, "backend request failed");
            println!("warning: {err}");
        }
    }
}

fn editor_open<G>(view: &ListView<G>) -> bool {
    if view.editor() == Editor::Closed {
        println!("no draft is open; use `add` or `edit <id>`");
        return false;
    }
    true
}

fn prompt() -> Result<(), CliError> {
    print!("> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn print_help() {
    println!(
        "commands: search <keyword>, add, edit <id>, title <text>, content <text>, \
         image <path>, save, cancel, toggle <id>, delete <id>, reload, help, quit"
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ConsoleCommand {
    Search(String),
    Add,
    Edit(i64),
    Title(String),
    Content(String),
    Image(PathBuf),
    Save,
    Cancel,
    Toggle(i64),
    Delete(i64),
    Reload,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<ConsoleCommand> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        // Bare `search` restores the unfiltered collection.
        "search" => Some(ConsoleCommand::Search(rest.to_string())),
        "add" => Some(ConsoleCommand::Add),
        "edit" => rest.parse().ok().map(ConsoleCommand::Edit),
        "title" => Some(ConsoleCommand::Title(rest.to_string())),
        "content" => Some(ConsoleCommand::Content(rest.to_string())),
        "image" => (!rest.is_empty()).then(|| ConsoleCommand::Image(PathBuf::from(rest))),
        "save" => Some(ConsoleCommand::Save),
        "cancel" => Some(ConsoleCommand::Cancel),
        "toggle" => rest.parse().ok().map(ConsoleCommand::Toggle),
        "delete" => rest.parse().ok().map(ConsoleCommand::Delete),
        "reload" => Some(ConsoleCommand::Reload),
        "help" => Some(ConsoleCommand::Help),
        "quit" | "exit" => Some(ConsoleCommand::Quit),
        _ => None,
    }
}

fn render_table(posts: &[Post], not_found: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<4} {:<6} {:<28} {:<12} {:<12} image",
        "#", "id", "title", "date", "status"
    );
    if not_found {
        out.push_str("no search results\n");
        return out;
    }
    for (index, post) in posts.iter().enumerate() {
        let status = if post.status { "published" } else { "unpublished" };
        let _ = writeln!(
            out,
            "{:<4} {:<6} {:<28} {:<12} {:<12} {}",
            index + 1,
            post.id,
            post.title,
            post.date,
            status,
            post.image
        );
    }
    out
}

fn render_draft(draft: &crate::domain::posts::Draft, editor: Editor) -> String {
    let mut out = String::new();
    let heading = match editor {
        Editor::Edit { id } => format!("editing post {id}"),
        _ => "new post".to_string(),
    };
    let _ = writeln!(out, "{heading} (date {})", draft.date);
    let _ = writeln!(out, "  title:   {}", draft.title);
    let _ = writeln!(out, "  image:   {}", draft.image);
    let _ = writeln!(out, "  content: {}", draft.content);
    out
}
