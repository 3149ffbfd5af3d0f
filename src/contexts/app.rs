use super::cataas::{FetchError, ImageSource};
use super::json_storage::JsonStorage;
use crate::data::{Caption, FavoritesList, ImageRef, Storage, COUNTER_KEY, FAVORITES_KEY};
use serde_json::Value;
use tracing::{debug, error, info};

/// Caption of the greeting image fetched when the app starts.
pub const FIRST_CAPTION: &str = "First cat";

const TITLE: &str = "고양이 가라사대";

/// What a request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// The startup image; does not count as a generation
    Greeting,
    /// A user-submitted caption
    Caption,
}

/// Handle for one outstanding image request.
///
/// Tickets are numbered monotonically; only the most recently issued one may
/// change the displayed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
    kind: RequestKind,
}

impl RequestTicket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

/// Result of completing a request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The image is now the current image
    Applied(ImageRef),
    /// A newer request was issued meanwhile; the response was discarded
    Stale,
}

/// Application state container.
///
/// Owns the usage counter, the current image and the favorites list. State is
/// read through getters and changed only through the operations below, each
/// of which writes through to storage immediately.
pub struct App<S: Storage, F: ImageSource> {
    storage: JsonStorage<S>,
    source: F,
    counter: u64,
    current: Option<ImageRef>,
    favorites: FavoritesList,
    last_issued: u64,
}

impl<S: Storage, F: ImageSource> App<S, F> {
    /// Loads persisted state and sanitizes the favorites list.
    ///
    /// When sanitizing dropped entries, the cleaned list is written back
    /// right away.
    pub fn load(store: S, source: F) -> Self {
        let storage = JsonStorage::new(store);

        let counter = storage.load::<u64>(COUNTER_KEY).unwrap_or(0);

        let favorites = match storage.load::<Value>(FAVORITES_KEY) {
            Some(Value::Array(raw)) => {
                let cleaned = FavoritesList::sanitize(&raw);
                if cleaned.len() != raw.len() {
                    info!(
                        dropped = raw.len() - cleaned.len(),
                        "repaired stored favorites"
                    );
                    storage.save(FAVORITES_KEY, &cleaned);
                }
                cleaned
            }
            Some(_) => {
                debug!("stored favorites are not a list, starting empty");
                FavoritesList::new()
            }
            None => FavoritesList::new(),
        };

        debug!(counter, favorites = favorites.len(), "loaded preferences");

        Self {
            storage,
            source,
            counter,
            current: None,
            favorites,
            last_issued: 0,
        }
    }

    /// Fetches the greeting image.
    ///
    /// Failure is logged only; the app stays in the loading state.
    pub async fn startup(&mut self) {
        let caption = match Caption::parse(FIRST_CAPTION) {
            Ok(caption) => caption,
            Err(e) => {
                error!(error = %e, "greeting caption is invalid");
                return;
            }
        };

        let ticket = self.begin_request(RequestKind::Greeting);
        let result = self.source.fetch_image(&caption).await;
        if let Err(e) = self.complete_request(ticket, result) {
            error!(error = %e, "failed to load greeting image");
        }
    }

    /// Requests a new image for `caption` and makes it current.
    ///
    /// On success the usage counter is incremented and persisted. On failure
    /// no state changes.
    pub async fn submit(&mut self, caption: &Caption) -> Result<Outcome, FetchError> {
        let ticket = self.begin_request(RequestKind::Caption);
        let result = self.source.fetch_image(caption).await;
        self.complete_request(ticket, result)
    }

    /// Issues a ticket for a request about to start, superseding all
    /// earlier tickets.
    pub fn begin_request(&mut self, kind: RequestKind) -> RequestTicket {
        self.last_issued += 1;
        RequestTicket {
            seq: self.last_issued,
            kind,
        }
    }

    /// Applies the result of the request behind `ticket`.
    ///
    /// Responses for superseded tickets are discarded, errors included.
    pub fn complete_request(
        &mut self,
        ticket: RequestTicket,
        result: Result<ImageRef, FetchError>,
    ) -> Result<Outcome, FetchError> {
        if ticket.seq != self.last_issued {
            debug!(
                seq = ticket.seq,
                latest = self.last_issued,
                "discarding stale image response"
            );
            return Ok(Outcome::Stale);
        }

        let image = result?;
        self.current = Some(image.clone());

        if ticket.kind == RequestKind::Caption {
            self.counter = self.counter.saturating_add(1);
            self.storage.save(COUNTER_KEY, &self.counter);
        }

        info!(image = %image, counter = self.counter, "current image updated");
        Ok(Outcome::Applied(image))
    }

    /// Adds the current image to the favorites.
    ///
    /// Returns false without touching storage when there is no current image
    /// or it is already a favorite.
    pub fn add_favorite(&mut self) -> bool {
        let Some(image) = self.current.as_ref() else {
            return false;
        };
        if !self.favorites.add(image) {
            return false;
        }
        self.storage.save(FAVORITES_KEY, &self.favorites);
        true
    }

    pub fn is_current_favorite(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|image| self.favorites.contains(image))
    }

    /// `"{n}번째 "` once at least one image was generated, else empty.
    pub fn counter_title(&self) -> String {
        if self.counter > 0 {
            format!("{}번째 ", self.counter)
        } else {
            String::new()
        }
    }

    pub fn title(&self) -> String {
        format!("{}{}", self.counter_title(), TITLE)
    }

    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// `None` while no image has been loaded yet.
    pub fn current(&self) -> Option<&ImageRef> {
        self.current.as_ref()
    }

    pub fn favorites(&self) -> &FavoritesList {
        &self.favorites
    }

    pub fn source(&self) -> &F {
        &self.source
    }

    pub fn storage(&self) -> &JsonStorage<S> {
        &self.storage
    }
}
