use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ports::{IntegrationError, LocationProvider, PlacesProvider};

/// Candidate address returned by the places service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSuggestion {
    pub place_id: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `"lat,lng"` form accepted as autocomplete input.
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Why the current location could not be turned into an address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,
    #[error("Could not get your location")]
    Unavailable { reason: String },
    #[error("Could not get address for your location")]
    LookupFailed,
}

/// Sequence token stamped on every address search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchToken(u64);

/// Issues search tokens and tracks which one is current.
#[derive(Debug, Default)]
pub struct QueryDispatcher {
    latest: u64,
}

impl QueryDispatcher {
    pub fn issue(&mut self) -> SearchToken {
        self.latest += 1;
        SearchToken(self.latest)
    }

    /// Retires every outstanding token.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, token: SearchToken) -> bool {
        token.0 == self.latest
    }
}

/// A search that has been issued but not yet sent.
#[derive(Debug)]
pub struct PendingSearch<P> {
    token: SearchToken,
    query: String,
    places: Arc<P>,
}

impl<P> PendingSearch<P>
where
    P: PlacesProvider,
{
    pub fn token(&self) -> SearchToken {
        self.token
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Sends the query; needs no access to the session that issued it.
    pub async fn resolve(self) -> CompletedSearch {
        let result = self.places.autocomplete(&self.query).await;
        CompletedSearch {
            token: self.token,
            result,
        }
    }
}

#[derive(Debug)]
pub struct CompletedSearch {
    pub token: SearchToken,
    pub result: Result<Vec<AddressSuggestion>, IntegrationError>,
}

/// Suggestion list and location state behind the address input.
pub struct AddressAssistant<P> {
    places: Arc<P>,
    suggestions: Vec<AddressSuggestion>,
    location_error: Option<LocationError>,
    dispatcher: QueryDispatcher,
}

impl<P> AddressAssistant<P>
where
    P: PlacesProvider + 'static,
{
    pub fn new(places: Arc<P>) -> Self {
        Self {
            places,
            suggestions: Vec::new(),
            location_error: None,
            dispatcher: QueryDispatcher::default(),
        }
    }

    pub fn suggestions(&self) -> &[AddressSuggestion] {
        &self.suggestions
    }

    pub fn location_error(&self) -> Option<&LocationError> {
        self.location_error.as_ref()
    }

    /// Issues a search for `text`, or clears the list when there is nothing to search.
    pub fn begin_search(&mut self, text: &str) -> Option<PendingSearch<P>> {
        if text.trim().is_empty() {
            self.dispatcher.invalidate();
            self.suggestions.clear();
            return None;
        }

        Some(PendingSearch {
            token: self.dispatcher.issue(),
            query: text.to_string(),
            places: Arc::clone(&self.places),
        })
    }

    pub fn is_current(&self, token: SearchToken) -> bool {
        self.dispatcher.is_current(token)
    }

    /// Applies a finished search. Returns `false` when a newer search superseded it.
    pub fn complete_search(&mut self, completed: CompletedSearch) -> bool {
        if !self.dispatcher.is_current(completed.token) {
            debug!(token = completed.token.0, "discarding stale address suggestions");
            return false;
        }

        match completed.result {
            Ok(suggestions) => self.suggestions = suggestions,
            Err(err) => {
                warn!(error = %err, "address search failed");
                self.suggestions.clear();
            }
        }
        true
    }

    /// Takes the chosen suggestion and clears the list.
    pub fn select(&mut self, place_id: &str) -> Option<AddressSuggestion> {
        let index = self
            .suggestions
            .iter()
            .position(|suggestion| suggestion.place_id == place_id)?;
        let chosen = self.suggestions.swap_remove(index);
        self.suggestions.clear();
        self.dispatcher.invalidate();
        Some(chosen)
    }

    /// Looks up the address at the device position.
    ///
    /// `Ok(Some(_))` carries the description to adopt; `Ok(None)` means the
    /// service knew no address there and nothing changes.
    pub async fn locate<L>(&mut self, location: &L) -> Result<Option<String>, LocationError>
    where
        L: LocationProvider,
    {
        let coordinates = match location.current_position().await {
            Ok(coordinates) => coordinates,
            Err(err) => {
                warn!(error = %err, "location unavailable");
                self.location_error = Some(err.clone());
                return Err(err);
            }
        };

        match self.places.autocomplete(&coordinates.as_query()).await {
            Ok(predictions) => {
                let Some(first) = predictions.into_iter().next() else {
                    debug!("no address known at current location");
                    return Ok(None);
                };
                self.suggestions.clear();
                self.dispatcher.invalidate();
                self.location_error = None;
                Ok(Some(first.description))
            }
            Err(err) => {
                warn!(error = %err, "reverse address lookup failed");
                self.location_error = Some(LocationError::LookupFailed);
                Err(LocationError::LookupFailed)
            }
        }
    }
}
