//! Application object handed to the host.
//!
//! The host either builds the app in one step with [`App::with_lifetime`] or
//! uses the two-phase [`App::create`] + [`App::startup`] sequence. The request
//! formatter does not depend on the lifetime, so both paths behave the same
//! for [`App::download`].

use crate::lifetime::Lifetime;

#[derive(Debug, Default)]
pub struct App {
    lifetime: Option<Lifetime>,
}

impl App {
    /// New instance with no lifetime installed.
    pub fn create() -> Self {
        Self::default()
    }

    /// New instance already bound to the host's lifetime.
    pub fn with_lifetime(lifetime: Lifetime) -> Self {
        tracing::debug!("app created with lifetime");
        Self {
            lifetime: Some(lifetime),
        }
    }

    /// Install the host's lifetime, replacing any previous one.
    pub fn startup(&mut self, lifetime: Lifetime) {
        if self.lifetime.replace(lifetime).is_some() {
            tracing::debug!("startup replaced existing lifetime");
        } else {
            tracing::debug!("app started");
        }
    }

    pub fn lifetime(&self) -> Option<&Lifetime> {
        self.lifetime.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.lifetime.is_some()
    }

    /// Status line for a download request. Accepts any input and never fails.
    pub fn download(&self, url: &str) -> String {
        tracing::info!(url, "download requested");
        format!("Downloading {url}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_formats_url() {
        let app = App::with_lifetime(Lifetime::new());
        assert_eq!(
            app.download("http://example.com/item"),
            "Downloading http://example.com/item..."
        );
    }

    #[test]
    fn download_accepts_empty_and_non_url_input() {
        let app = App::with_lifetime(Lifetime::new());
        assert_eq!(app.download(""), "Downloading ...");
        assert_eq!(app.download("not a url"), "Downloading not a url...");
        assert_eq!(app.download("ünï cødé\n"), "Downloading ünï cødé\n...");
    }

    #[test]
    fn download_without_startup_matches_started_output() {
        let bare = App::create();
        assert!(!bare.is_started());

        let mut started = App::create();
        started.startup(Lifetime::new());
        assert!(started.is_started());

        for input in ["http://example.com/item", "", "not a url"] {
            assert_eq!(bare.download(input), started.download(input));
        }
    }

    #[test]
    fn startup_last_write_wins() {
        let a = Lifetime::new();
        let b = Lifetime::new();
        let mut app = App::create();
        app.startup(a.clone());
        app.startup(b.clone());

        let stored = app.lifetime().unwrap();
        assert!(stored.same_as(&b));
        assert!(!stored.same_as(&a));

        // Cancelling the replaced lifetime does not reach the app.
        a.cancel();
        assert!(!app.lifetime().unwrap().is_cancelled());
    }

    #[test]
    fn download_ignores_cancelled_lifetime() {
        let lt = Lifetime::new();
        lt.cancel();
        let app = App::with_lifetime(lt);
        assert_eq!(app.download("x"), "Downloading x...");
    }
}
