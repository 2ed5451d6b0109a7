//! Place Lookup Collaborator
//!
//! Finds candidate points of interest near a destination by combining two
//! public data sources: Nominatim (forward geocoding) and the Wikipedia
//! geosearch API (nearby articles plus intro extracts).
//!
//! Both sources are treated as unreliable: any network or parse failure
//! yields an empty candidate set so the suggestion flow is never blocked.
//! No retries are attempted.

use std::collections::HashMap;
use std::time::Duration;

use reqwest;
use serde::Deserialize;

use crate::models::suggestion::{CandidatePlace, Coordinates};

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const WIKIPEDIA_API_URL: &str = "https://en.wikipedia.org/w/api.php";
const LOOKUP_USER_AGENT: &str = "SmartTrip/1.0";

// Search radius in meters: tight around an explicit starting point,
// wide around a geocoded destination.
const STARTING_POINT_RADIUS: u32 = 3_000;
const DESTINATION_RADIUS: u32 = 10_000;
const GEOSEARCH_LIMIT: u32 = 50;
const MAX_DETAIL_FETCHES: usize = 30;
const DESCRIPTION_MAX_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct GeosearchResponse {
    query: Option<GeosearchQuery>,
}

#[derive(Debug, Deserialize)]
struct GeosearchQuery {
    geosearch: Vec<GeosearchHit>,
}

#[derive(Debug, Deserialize)]
struct GeosearchHit {
    pageid: u64,
    title: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct PageDetailResponse {
    query: Option<PageDetailQuery>,
}

#[derive(Debug, Deserialize)]
struct PageDetailQuery {
    pages: HashMap<String, PageDetail>,
}

#[derive(Debug, Deserialize)]
struct PageDetail {
    extract: Option<String>,
}

/// Source of candidate places for the suggestion generator. The production
/// implementation talks to the network; tests substitute their own.
pub trait PlaceSource {
    async fn lookup_places(
        &self,
        destination: &str,
        starting_coords: Option<Coordinates>,
    ) -> Vec<CandidatePlace>;
}

pub struct PlaceLookupService {
    http_client: reqwest::Client,
}

impl PlaceLookupService {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(LOOKUP_USER_AGENT)
            .build()?;

        Ok(Self { http_client })
    }

    /// Resolve a free-text destination to coordinates. Failures are logged
    /// and reported as `None`.
    pub async fn geocode(&self, destination: &str) -> Option<Coordinates> {
        match self.fetch_coordinates(destination).await {
            Ok(coords) => coords,
            Err(err) => {
                eprintln!("Error fetching coordinates for '{}': {}", destination, err);
                None
            }
        }
    }

    async fn fetch_coordinates(
        &self,
        destination: &str,
    ) -> Result<Option<Coordinates>, Box<dyn std::error::Error>> {
        let response = self
            .http_client
            .get(NOMINATIM_URL)
            .query(&[("q", destination), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let results: Vec<NominatimResult> = response.json().await?;
        match results.first() {
            Some(result) => {
                let lat: f64 = result.lat.parse()?;
                let lon: f64 = result.lon.parse()?;
                Ok(Some(Coordinates { lat, lon }))
            }
            None => Ok(None),
        }
    }

    async fn fetch_nearby(
        &self,
        coords: Coordinates,
        radius: u32,
    ) -> Result<Vec<GeosearchHit>, Box<dyn std::error::Error>> {
        let gscoord = format!("{}|{}", coords.lat, coords.lon);
        let gsradius = radius.to_string();
        let gslimit = GEOSEARCH_LIMIT.to_string();

        let response = self
            .http_client
            .get(WIKIPEDIA_API_URL)
            .query(&[
                ("action", "query"),
                ("list", "geosearch"),
                ("gscoord", gscoord.as_str()),
                ("gsradius", gsradius.as_str()),
                ("gslimit", gslimit.as_str()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let geosearch: GeosearchResponse = response.json().await?;
        Ok(geosearch
            .query
            .map(|query| query.geosearch)
            .unwrap_or_default())
    }

    async fn fetch_extract(
        &self,
        pageid: u64,
    ) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let pageids = pageid.to_string();

        let response = self
            .http_client
            .get(WIKIPEDIA_API_URL)
            .query(&[
                ("action", "query"),
                ("pageids", pageids.as_str()),
                ("prop", "extracts|coordinates"),
                ("exintro", "true"),
                ("explaintext", "true"),
                ("format", "json"),
            ])
            .send()
            .await?;

        let detail: PageDetailResponse = response.json().await?;
        let extract = detail
            .query
            .and_then(|mut query| query.pages.remove(&pageid.to_string()))
            .and_then(|page| page.extract);

        Ok(extract)
    }
}

impl PlaceSource for PlaceLookupService {
    async fn lookup_places(
        &self,
        destination: &str,
        starting_coords: Option<Coordinates>,
    ) -> Vec<CandidatePlace> {
        let coords = match starting_coords {
            Some(coords) => Some(coords),
            None => self.geocode(destination).await,
        };

        let coords = match coords {
            Some(coords) => coords,
            None => return Vec::new(),
        };

        let radius = if starting_coords.is_some() {
            STARTING_POINT_RADIUS
        } else {
            DESTINATION_RADIUS
        };

        let hits = match self.fetch_nearby(coords, radius).await {
            Ok(hits) => hits,
            Err(err) => {
                eprintln!("Error fetching nearby places: {}", err);
                return Vec::new();
            }
        };

        let mut places = Vec::new();
        for hit in hits.into_iter().take(MAX_DETAIL_FETCHES) {
            // A failed detail fetch skips this place only.
            match self.fetch_extract(hit.pageid).await {
                Ok(Some(extract)) => places.push(CandidatePlace {
                    title: hit.title,
                    description: truncate_chars(&extract, DESCRIPTION_MAX_CHARS),
                    coordinates: Some(Coordinates {
                        lat: hit.lat,
                        lon: hit.lon,
                    }),
                }),
                Ok(None) => {}
                Err(err) => eprintln!("Error fetching place details: {}", err),
            }
        }

        places
    }
}

pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
