use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::{JoinError, JoinSet};
use tracing::error;

use jjal::contexts::{
    App, FetchError, ImageSource, Outcome, RequestKind, RequestTicket, FIRST_CAPTION,
};
use jjal::data::{Caption, ImageRef, Storage};

use super::render;

type Pending = JoinSet<(RequestTicket, Result<ImageRef, FetchError>)>;

/// One line of session input.
#[derive(Debug, PartialEq, Eq)]
enum SessionCommand {
    Favorite,
    List,
    Help,
    Quit,
    Caption(String),
}

impl SessionCommand {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "/fav" => SessionCommand::Favorite,
            "/list" => SessionCommand::List,
            "/help" => SessionCommand::Help,
            "/quit" | "/exit" => SessionCommand::Quit,
            _ => SessionCommand::Caption(line.to_string()),
        }
    }
}

/// Drives the app from `input` lines.
///
/// Image requests run in the background so the prompt keeps accepting input;
/// only the latest request may replace the current image. Pending requests
/// are awaited at end of input and dropped on `/quit`.
pub async fn run<S, F, R>(mut app: App<S, F>, input: R) -> Result<()>
where
    S: Storage,
    F: ImageSource + Clone + Send + Sync + 'static,
    R: AsyncBufRead + Unpin,
{
    let mut pending: Pending = JoinSet::new();

    if let Ok(greeting) = Caption::parse(FIRST_CAPTION) {
        spawn_fetch(&mut app, &mut pending, RequestKind::Greeting, greeting);
    }
    render::card(&app);
    render::help();
    render::prompt();

    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match SessionCommand::parse(&line) {
                    SessionCommand::Quit => return Ok(()),
                    SessionCommand::Favorite => favorite(&mut app),
                    SessionCommand::List => render::gallery(app.favorites()),
                    SessionCommand::Help => render::help(),
                    SessionCommand::Caption(raw) => match Caption::parse(&raw) {
                        Ok(caption) => {
                            println!("Generating \"{}\"...", caption);
                            spawn_fetch(&mut app, &mut pending, RequestKind::Caption, caption);
                        }
                        Err(e) => println!("  {}", e),
                    },
                }
                render::prompt();
            }
            Some(joined) = pending.join_next(), if !pending.is_empty() => {
                complete(&mut app, joined);
                render::prompt();
            }
        }
    }

    while let Some(joined) = pending.join_next().await {
        complete(&mut app, joined);
    }
    println!();
    Ok(())
}

fn spawn_fetch<S, F>(app: &mut App<S, F>, pending: &mut Pending, kind: RequestKind, caption: Caption)
where
    S: Storage,
    F: ImageSource + Clone + Send + Sync + 'static,
{
    let ticket = app.begin_request(kind);
    let source = app.source().clone();
    pending.spawn(async move {
        let result = source.fetch_image(&caption).await;
        (ticket, result)
    });
}

fn complete<S: Storage, F: ImageSource>(
    app: &mut App<S, F>,
    joined: Result<(RequestTicket, Result<ImageRef, FetchError>), JoinError>,
) {
    let (ticket, result) = match joined {
        Ok(done) => done,
        Err(e) => {
            error!(error = %e, "image request task failed");
            return;
        }
    };

    match app.complete_request(ticket, result) {
        Ok(Outcome::Applied(_)) => render::card(app),
        Ok(Outcome::Stale) => {}
        Err(e) if ticket.kind() == RequestKind::Greeting => {
            error!(error = %e, "failed to load greeting image");
        }
        Err(e) => render::alert(&e),
    }
}

fn favorite<S: Storage, F: ImageSource>(app: &mut App<S, F>) {
    if app.current().is_none() {
        println!("  No cat to save yet");
    } else if app.add_favorite() {
        println!("  💖 Saved");
    } else {
        println!("  Already saved");
    }
}
