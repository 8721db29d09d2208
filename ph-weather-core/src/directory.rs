//! The place directory and its loader.
//!
//! A [`Directory`] is built once per load and never mutated afterwards;
//! [`DirectoryLoader::load`] swaps in a fresh `Arc` so readers holding the
//! previous one keep a consistent view.

use std::{collections::HashMap, fmt::Debug, sync::Arc};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;

use crate::{
    error::{DirectoryError, LookupError},
    model::{Coordinates, PlaceRecord},
};

pub mod fallback;
pub mod registry;

const CITY_MARKER: &str = "city";
const MUNICIPALITY_MARKER: &str = "municipality";

/// Strip one leading `City of` or `Municipality of` (any case, any amount
/// of whitespace between the words) and trim what is left.
///
/// A name that consists of nothing but the prefix is kept as is.
pub fn strip_prefixes(name: &str) -> String {
    [CITY_MARKER, MUNICIPALITY_MARKER]
        .iter()
        .find_map(|marker| strip_marker(name, marker))
        .unwrap_or(name)
        .trim()
        .to_string()
}

fn strip_marker<'a>(name: &'a str, marker: &str) -> Option<&'a str> {
    let rest = strip_word(name.trim_start(), marker)?;
    let rest = skip_whitespace(rest)?;
    let rest = strip_word(rest, "of")?;
    let rest = skip_whitespace(rest)?.trim_end();
    (!rest.is_empty()).then_some(rest)
}

fn strip_word<'a>(s: &'a str, word: &str) -> Option<&'a str> {
    let head = s.get(..word.len())?;
    head.eq_ignore_ascii_case(word).then(|| &s[word.len()..])
}

/// Requires at least one whitespace character.
fn skip_whitespace(s: &str) -> Option<&str> {
    let rest = s.trim_start();
    (rest.len() < s.len()).then_some(rest)
}

impl PlaceRecord {
    /// Normalize a raw source name. Blank names yield `None`.
    pub fn from_source(original: &str, coordinates: Coordinates) -> Option<Self> {
        if original.trim().is_empty() {
            return None;
        }

        Some(Self {
            original: original.to_string(),
            cleaned: strip_prefixes(original),
            coordinates,
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct IndexedPlace {
    pub(crate) record: PlaceRecord,
    pub(crate) cleaned_lower: String,
    pub(crate) original_lower: String,
}

/// Ordered, immutable list of places in source order.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    places: Vec<IndexedPlace>,
    /// Lower-cased cleaned and original names mapped to the first position
    /// carrying them. Serves the exact pass in O(1); partial matching
    /// remains a linear scan over `places`.
    exact_index: HashMap<String, usize>,
}

impl Directory {
    pub fn new(records: Vec<PlaceRecord>) -> Self {
        let places: Vec<IndexedPlace> = records
            .into_iter()
            .map(|record| IndexedPlace {
                cleaned_lower: record.cleaned.to_lowercase(),
                original_lower: record.original.to_lowercase(),
                record,
            })
            .collect();

        let mut exact_index = HashMap::with_capacity(places.len() * 2);
        for (pos, place) in places.iter().enumerate() {
            exact_index.entry(place.cleaned_lower.clone()).or_insert(pos);
            exact_index.entry(place.original_lower.clone()).or_insert(pos);
        }

        Self { places, exact_index }
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn get(&self, pos: usize) -> Option<&PlaceRecord> {
        self.places.get(pos).map(|p| &p.record)
    }

    pub fn records(&self) -> impl Iterator<Item = &PlaceRecord> {
        self.places.iter().map(|p| &p.record)
    }

    pub(crate) fn places(&self) -> &[IndexedPlace] {
        &self.places
    }

    /// `normalized` must already be trimmed and lower-cased.
    pub(crate) fn exact_position(&self, normalized: &str) -> Option<usize> {
        self.exact_index.get(normalized).copied()
    }
}

/// One entry as delivered by a directory source.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceEntry {
    pub name: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub country_code: Option<String>,
    /// Country name, e.g. `Philippines` in Open-Meteo geocoding results.
    #[serde(default)]
    pub country: Option<String>,
}

/// The country registry entries have to belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub code: String,
    pub name: String,
}

impl SourceEntry {
    pub fn into_record(self) -> Option<PlaceRecord> {
        let coordinates = Coordinates::or_fallback(self.latitude, self.longitude);
        PlaceRecord::from_source(&self.name, coordinates)
    }

    /// Untagged entries are assumed local. A tagged entry is kept when its
    /// code or its country name matches.
    pub fn belongs_to(&self, country: &Country) -> bool {
        let code = self.country_code.as_deref().map(|c| c.trim().eq_ignore_ascii_case(&country.code));
        let name = self.country.as_deref().map(|n| n.trim().eq_ignore_ascii_case(&country.name));

        match (code, name) {
            (None, None) => true,
            (code, name) => code == Some(true) || name == Some(true),
        }
    }
}

/// Somewhere the authoritative place list can be fetched from.
#[async_trait]
pub trait DirectorySource: Send + Sync + Debug {
    async fn fetch(&self) -> Result<Vec<SourceEntry>, DirectoryError>;
}

/// Observable loader state for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectoryStatus {
    /// A directory (remote or embedded) is available.
    pub ready: bool,
    /// The embedded list is in use because the source failed.
    pub using_fallback: bool,
    /// A load is in progress.
    pub loading: bool,
}

#[derive(Debug)]
pub struct DirectoryLoader {
    source: Box<dyn DirectorySource>,
    current: RwLock<Option<Arc<Directory>>>,
    status: RwLock<DirectoryStatus>,
}

impl DirectoryLoader {
    pub fn new(source: Box<dyn DirectorySource>) -> Self {
        Self {
            source,
            current: RwLock::new(None),
            status: RwLock::new(DirectoryStatus::default()),
        }
    }

    /// Fetch and install a fresh directory. Never fails: any problem with
    /// the source installs the embedded list instead.
    pub async fn load(&self) -> Arc<Directory> {
        self.status.write().loading = true;

        let (directory, using_fallback) = match self.fetch_remote().await {
            Ok(directory) => {
                tracing::info!(places = directory.len(), "Loaded place directory");
                (directory, false)
            }
            Err(err) => {
                let err = LookupError::from(err);
                tracing::warn!(source = ?self.source, "{err}; using embedded place list");
                (fallback::directory(), true)
            }
        };

        let directory = Arc::new(directory);
        *self.current.write() = Some(Arc::clone(&directory));
        *self.status.write() = DirectoryStatus { ready: true, using_fallback, loading: false };

        directory
    }

    /// The cached directory, loading it first if needed.
    pub async fn get_or_load(&self) -> Arc<Directory> {
        match self.current() {
            Some(directory) => directory,
            None => self.load().await,
        }
    }

    pub fn current(&self) -> Option<Arc<Directory>> {
        self.current.read().clone()
    }

    pub fn status(&self) -> DirectoryStatus {
        *self.status.read()
    }

    async fn fetch_remote(&self) -> Result<Directory, DirectoryError> {
        let entries = self.source.fetch().await?;

        let records: Vec<PlaceRecord> =
            entries.into_iter().filter_map(SourceEntry::into_record).collect();

        if records.is_empty() {
            return Err(DirectoryError::Empty);
        }

        Ok(Directory::new(records))
    }
}
