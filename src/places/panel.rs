use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::autocomplete::{BindingId, PlaceSelected, PlacesWidget};
use super::client::{Place, PlaceLookup};
use super::error::PlacesError;

/// Shortest input worth looking up.
const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug)]
struct LookupResult {
    binding: BindingId,
    request: u64,
    places: Result<Vec<Place>, PlacesError>,
}

/// The suggestion list shown under the address field.
///
/// Lookups run on the async runtime; [`drain`](Self::drain) collects their
/// results on the UI thread. Results and choices belong to the binding that
/// was live when the lookup started, so anything from a detached binding is
/// dropped. Only the most recent request's result is applied.
pub struct SuggestionPanel {
    lookup: Arc<dyn PlaceLookup>,
    handle: Handle,
    next_id: u64,
    latest_request: u64,
    live: Option<BindingId>,
    suggestions: Vec<Place>,
    cursor: usize,
    tx: mpsc::UnboundedSender<LookupResult>,
    rx: mpsc::UnboundedReceiver<LookupResult>,
    in_flight: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for SuggestionPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestionPanel")
            .field("live", &self.live)
            .field("suggestions", &self.suggestions)
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl SuggestionPanel {
    pub fn new(lookup: Arc<dyn PlaceLookup>, handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            lookup,
            handle,
            next_id: 0,
            latest_request: 0,
            live: None,
            suggestions: Vec::new(),
            cursor: 0,
            tx,
            rx,
            in_flight: None,
        }
    }

    pub fn live_binding(&self) -> Option<BindingId> {
        self.live
    }

    pub fn suggestions(&self) -> &[Place] {
        &self.suggestions
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// Starts a lookup for `query`, replacing any lookup still running.
    /// Short queries just close the list.
    pub fn request(&mut self, query: &str) {
        self.cancel_lookup();
        self.latest_request += 1;
        let request = self.latest_request;
        let Some(binding) = self.live else {
            return;
        };
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            self.dismiss();
            return;
        }
        let tx = self.tx.clone();
        let lookup = self.lookup.autocomplete(query.to_string());
        self.in_flight = Some(self.handle.spawn(async move {
            let places = lookup.await;
            // The panel is gone if the receiver is closed.
            let _ = tx.send(LookupResult {
                binding,
                request,
                places,
            });
        }));
    }

    /// Applies finished lookups for the live binding. Returns `true` if the
    /// list changed.
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.rx.try_recv() {
            if self.live != Some(result.binding) {
                debug!(binding = ?result.binding, "suggestions for stale binding dropped");
                continue;
            }
            if result.request != self.latest_request {
                debug!(request = result.request, "suggestions for superseded query dropped");
                continue;
            }
            match result.places {
                Ok(places) => self.suggestions = places,
                Err(e) => {
                    warn!(error = %e, "address lookup failed");
                    self.suggestions.clear();
                }
            }
            self.cursor = 0;
            changed = true;
        }
        changed
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.suggestions.is_empty() {
            return;
        }
        let last = self.suggestions.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    pub fn dismiss(&mut self) {
        self.suggestions.clear();
        self.cursor = 0;
    }

    /// Picks the highlighted suggestion and closes the list.
    pub fn choose(&mut self) -> Option<PlaceSelected> {
        let binding = self.live?;
        let place = self.suggestions.get(self.cursor)?.clone();
        self.dismiss();
        Some(PlaceSelected {
            binding,
            formatted_address: place.formatted_address,
        })
    }

    fn cancel_lookup(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

impl PlacesWidget for SuggestionPanel {
    fn attach(&mut self) -> Result<BindingId, PlacesError> {
        self.next_id += 1;
        let binding = BindingId::new(self.next_id);
        self.live = Some(binding);
        self.dismiss();
        Ok(binding)
    }

    fn detach(&mut self, binding: BindingId) {
        if self.live == Some(binding) {
            self.live = None;
            self.cancel_lookup();
            self.dismiss();
        }
    }
}

impl Drop for SuggestionPanel {
    fn drop(&mut self) {
        self.cancel_lookup();
    }
}
