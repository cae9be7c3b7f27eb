//! `collectible download <url>` – print the status line for a download request.

use collectible_core::App;

pub fn run_download(app: &App, url: &str) {
    println!("{}", app.download(url));
}
