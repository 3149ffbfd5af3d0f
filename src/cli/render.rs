use std::io::Write;
use tracing::debug;

use jjal::contexts::{App, FetchError, ImageSource};
use jjal::data::{FavoritesList, Storage};

const LOADING: &str = "이미지를 불러오는 중...";
const EMPTY_GALLERY: &str = "사진 위 하트를 눌러 고양이 사진을 저장해봐요!";

/// Title, current image and heart state.
pub fn card<S: Storage, F: ImageSource>(app: &App<S, F>) {
    let heart = if app.is_current_favorite() { "💖" } else { "🤍" };
    println!("\n{}", app.title());
    println!("{}", "=".repeat(40));
    match app.current() {
        Some(image) => println!("{} {}", heart, image),
        None => println!("{} {}", heart, LOADING),
    }
}

pub fn gallery(favorites: &FavoritesList) {
    let view = favorites.display_view();
    if view.is_empty() {
        println!("{}", EMPTY_GALLERY);
        return;
    }
    println!("Favorites ({}):", view.len());
    for (i, url) in view.iter().enumerate() {
        println!("  {:>3}. {}", i + 1, url);
    }
}

pub fn alert(error: &FetchError) {
    eprintln!("✗ {}", error);
}

pub fn help() {
    println!("Type an English caption to make a new cat.");
    println!("  /fav   save the current cat");
    println!("  /list  show saved cats");
    println!("  /quit  leave");
}

pub fn prompt() {
    print!("> ");
    if let Err(e) = std::io::stdout().flush() {
        debug!(error = %e, "failed to flush prompt");
    }
}
