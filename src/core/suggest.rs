use crate::models::{College, Coordinate, Suggestion, SuggestionKind};
use crate::core::colleges::builtin_colleges;

/// Default number of suggestions returned per query
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Queries shorter than this (in characters, after trimming) are not searchable
pub const MIN_QUERY_CHARS: usize = 2;

/// Built-in places: (name, kind, city, lat, lng)
const PLACES: &[(&str, SuggestionKind, &str, f64, f64)] = &[
    ("Koramangala", SuggestionKind::Area, "Bangalore", 12.9352, 77.6245),
    ("Indiranagar", SuggestionKind::Area, "Bangalore", 12.9784, 77.6408),
    ("HSR Layout", SuggestionKind::Area, "Bangalore", 12.9116, 77.6389),
    ("BTM Layout", SuggestionKind::Area, "Bangalore", 12.9166, 77.6101),
    ("Whitefield", SuggestionKind::Area, "Bangalore", 12.9698, 77.7500),
    ("Electronic City", SuggestionKind::Area, "Bangalore", 12.8452, 77.6602),
    ("Marathahalli", SuggestionKind::Area, "Bangalore", 12.9591, 77.6974),
    ("Bellandur", SuggestionKind::Area, "Bangalore", 12.9260, 77.6762),
    ("Jayanagar", SuggestionKind::Area, "Bangalore", 12.9250, 77.5938),
    ("JP Nagar", SuggestionKind::Area, "Bangalore", 12.9063, 77.5857),
    ("Banashankari", SuggestionKind::Area, "Bangalore", 12.9255, 77.5468),
    ("Malleshwaram", SuggestionKind::Area, "Bangalore", 13.0035, 77.5647),
    ("Rajajinagar", SuggestionKind::Area, "Bangalore", 12.9915, 77.5560),
    ("Hebbal", SuggestionKind::Area, "Bangalore", 13.0358, 77.5970),
    ("Yelahanka", SuggestionKind::Area, "Bangalore", 13.1005, 77.5963),
    ("Forum Mall", SuggestionKind::Landmark, "Bangalore", 12.9346, 77.6114),
    ("Manyata Tech Park", SuggestionKind::Landmark, "Bangalore", 13.0475, 77.6208),
    ("ITPL", SuggestionKind::Landmark, "Bangalore", 12.9857, 77.7375),
    ("Cubbon Park", SuggestionKind::Landmark, "Bangalore", 12.9763, 77.5929),
    ("Lalbagh Botanical Garden", SuggestionKind::Landmark, "Bangalore", 12.9507, 77.5848),
    ("MG Road Metro Station", SuggestionKind::Metro, "Bangalore", 12.9755, 77.6068),
    ("Indiranagar Metro Station", SuggestionKind::Metro, "Bangalore", 12.9783, 77.6386),
    ("Majestic Metro Station", SuggestionKind::Metro, "Bangalore", 12.9757, 77.5728),
    ("Baiyappanahalli Metro Station", SuggestionKind::Metro, "Bangalore", 12.9907, 77.6525),
    ("Yeshwanthpur Metro Station", SuggestionKind::Metro, "Bangalore", 13.0233, 77.5500),
    ("Kothrud", SuggestionKind::Area, "Pune", 18.5074, 73.8077),
    ("Hinjewadi", SuggestionKind::Area, "Pune", 18.5912, 73.7389),
    ("Viman Nagar", SuggestionKind::Area, "Pune", 18.5679, 73.9143),
    ("Kamla Nagar", SuggestionKind::Area, "Delhi", 28.6814, 77.2060),
    ("Laxmi Nagar", SuggestionKind::Area, "Delhi", 28.6304, 77.2773),
    ("Salt Lake", SuggestionKind::Area, "Kolkata", 22.5867, 88.4171),
    ("Park Street", SuggestionKind::Area, "Kolkata", 22.5535, 88.3520),
    ("Talwandi", SuggestionKind::Area, "Kota", 25.1430, 75.8470),
];

/// A named place that can be offered as a suggestion
#[derive(Debug, Clone)]
pub struct Place {
    pub name: String,
    pub kind: SuggestionKind,
    pub city: String,
    pub coordinates: Option<Coordinate>,
}

/// Static reference list of areas, landmarks, metro stations and colleges
///
/// Read-only after construction; share it behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    places: Vec<Place>,
    colleges: Vec<College>,
}

impl Gazetteer {
    pub fn new(places: Vec<Place>, colleges: Vec<College>) -> Self {
        Self { places, colleges }
    }

    pub fn builtin() -> Self {
        let places = PLACES
            .iter()
            .map(|&(name, kind, city, lat, lng)| Place {
                name: name.to_string(),
                kind,
                city: city.to_string(),
                coordinates: Some(Coordinate::new(lat, lng)),
            })
            .collect();

        Self::new(places, builtin_colleges())
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty() && self.colleges.is_empty()
    }

    pub fn colleges(&self) -> &[College] {
        &self.colleges
    }

    pub fn college(&self, id: &str) -> Option<&College> {
        self.colleges.iter().find(|college| college.id == id)
    }

    /// Places then colleges whose name or city contains the query
    ///
    /// Results follow gazetteer order and are capped at `limit`. Queries
    /// shorter than [`MIN_QUERY_CHARS`] return nothing.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        let Some(needle) = searchable(query) else {
            return Vec::new();
        };

        self.direct_matches(&needle).take(limit).collect()
    }

    /// Like [`Gazetteer::suggest`], followed by a "Near {college}" entry for
    /// every college whose name matches
    pub fn suggest_with_colleges(&self, query: &str, limit: usize) -> Vec<Suggestion> {
        let Some(needle) = searchable(query) else {
            return Vec::new();
        };

        let near = self
            .colleges
            .iter()
            .filter(|college| college.name.to_lowercase().contains(&needle))
            .map(|college| Suggestion {
                name: format!("Near {}", college.name),
                kind: SuggestionKind::NearCollege,
                city: college.city.clone(),
                coordinates: Some(college.coordinates),
                college_id: Some(college.id.clone()),
            });

        self.direct_matches(&needle).chain(near).take(limit).collect()
    }

    fn direct_matches<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = Suggestion> + 'a {
        let places = self
            .places
            .iter()
            .filter(move |place| contains_folded(&place.name, needle) || contains_folded(&place.city, needle))
            .map(|place| Suggestion {
                name: place.name.clone(),
                kind: place.kind,
                city: place.city.clone(),
                coordinates: place.coordinates,
                college_id: None,
            });

        let colleges = self
            .colleges
            .iter()
            .filter(move |college| {
                contains_folded(&college.name, needle) || contains_folded(&college.city, needle)
            })
            .map(|college| Suggestion {
                name: college.name.clone(),
                kind: SuggestionKind::College,
                city: college.city.clone(),
                coordinates: Some(college.coordinates),
                college_id: Some(college.id.clone()),
            });

        places.chain(colleges)
    }
}

/// Lowercased, trimmed query if it is long enough to search
fn searchable(query: &str) -> Option<String> {
    let query = query.trim();
    (query.chars().count() >= MIN_QUERY_CHARS).then(|| query.to_lowercase())
}

#[inline]
fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
