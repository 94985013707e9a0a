use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Geographic coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude", alias = "lon")]
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A rentable PG/hostel property as returned by the marketplace backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: ListingLocation,
    #[serde(default)]
    pub room_types: Vec<RoomType>,
    #[serde(default)]
    pub amenities: Amenities,
    pub gender: Gender,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Listing {
    /// Lowest monthly rent across the listing's room types
    pub fn min_price(&self) -> Option<u32> {
        self.room_types.iter().map(|room| room.base_rent).min()
    }

    pub fn coordinates(&self) -> Option<Coordinate> {
        self.location.coordinates
    }

    pub fn has_room_kind(&self, kind: RoomKind) -> bool {
        self.room_types.iter().any(|room| room.kind == kind)
    }

    pub fn has_furnishing(&self, furnishing: Furnishing) -> bool {
        self.room_types.iter().any(|room| room.furnishing == furnishing)
    }

    /// Total vacancies across all room types
    pub fn available_rooms(&self) -> u32 {
        self.room_types.iter().map(|room| room.available_rooms).sum()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingLocation {
    pub address: String,
    pub area: String,
    pub city: String,
    pub pincode: String,
    pub coordinates: Option<Coordinate>,
    pub landmarks: Vec<String>,
    pub nearby_colleges: Vec<NearbyCollege>,
}

/// Reference from a listing to a college, with the distance between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyCollege {
    pub college_id: String,
    #[serde(alias = "distance", default)]
    pub distance_km: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomType {
    #[serde(rename = "type")]
    pub kind: RoomKind,
    pub base_rent: u32,
    #[serde(default)]
    pub security_deposit: u32,
    #[serde(default)]
    pub available_rooms: u32,
    pub furnishing: Furnishing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
    Single,
    Double,
    Triple,
    Dormitory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Furnishing {
    #[serde(rename = "fully", alias = "fully-furnished", alias = "furnished")]
    Fully,
    #[serde(rename = "semi", alias = "semi-furnished")]
    Semi,
    #[serde(rename = "unfurnished")]
    Unfurnished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "male")]
    Male,
    #[serde(rename = "female")]
    Female,
    #[serde(rename = "co-ed", alias = "coed", alias = "unisex")]
    CoEd,
}

/// Named amenity flags a listing can advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Amenity {
    Wifi,
    Meals,
    Ac,
    Laundry,
    Parking,
    Security,
    Gym,
    CommonArea,
    Study,
    PowerBackup,
}

impl Amenity {
    pub const ALL: [Amenity; 10] = [
        Amenity::Wifi,
        Amenity::Meals,
        Amenity::Ac,
        Amenity::Laundry,
        Amenity::Parking,
        Amenity::Security,
        Amenity::Gym,
        Amenity::CommonArea,
        Amenity::Study,
        Amenity::PowerBackup,
    ];

    /// Name used by the backend for this flag (query parameters and JSON keys)
    pub fn as_str(self) -> &'static str {
        match self {
            Amenity::Wifi => "wifi",
            Amenity::Meals => "meals",
            Amenity::Ac => "ac",
            Amenity::Laundry => "laundry",
            Amenity::Parking => "parking",
            Amenity::Security => "security",
            Amenity::Gym => "gym",
            Amenity::CommonArea => "commonArea",
            Amenity::Study => "study",
            Amenity::PowerBackup => "powerBackup",
        }
    }
}

impl fmt::Display for Amenity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean amenity flags on a listing; absent flags are false
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Amenities {
    pub wifi: bool,
    pub meals: bool,
    pub ac: bool,
    pub laundry: bool,
    pub parking: bool,
    pub security: bool,
    pub gym: bool,
    pub common_area: bool,
    pub study: bool,
    pub power_backup: bool,
}

impl Amenities {
    pub fn has(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::Wifi => self.wifi,
            Amenity::Meals => self.meals,
            Amenity::Ac => self.ac,
            Amenity::Laundry => self.laundry,
            Amenity::Parking => self.parking,
            Amenity::Security => self.security,
            Amenity::Gym => self.gym,
            Amenity::CommonArea => self.common_area,
            Amenity::Study => self.study,
            Amenity::PowerBackup => self.power_backup,
        }
    }

    /// Build a flag set with exactly the given amenities enabled
    pub fn with(amenities: &[Amenity]) -> Self {
        let mut flags = Self::default();
        for amenity in amenities {
            let slot = match amenity {
                Amenity::Wifi => &mut flags.wifi,
                Amenity::Meals => &mut flags.meals,
                Amenity::Ac => &mut flags.ac,
                Amenity::Laundry => &mut flags.laundry,
                Amenity::Parking => &mut flags.parking,
                Amenity::Security => &mut flags.security,
                Amenity::Gym => &mut flags.gym,
                Amenity::CommonArea => &mut flags.common_area,
                Amenity::Study => &mut flags.study,
                Amenity::PowerBackup => &mut flags.power_backup,
            };
            *slot = true;
        }
        flags
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rating {
    pub average: f64,
    pub count: u32,
}

/// Static reference entry for a college or university
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct College {
    pub id: String,
    pub name: String,
    pub kind: CollegeKind,
    pub city: String,
    pub coordinates: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollegeKind {
    Engineering,
    Medical,
    Commerce,
    Arts,
    Other,
}

/// Inclusive monthly rent bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    #[serde(default)]
    pub min: u32,
    #[serde(default = "default_price_max")]
    pub max: u32,
}

fn default_price_max() -> u32 {
    u32::MAX
}

impl PriceRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: u32) -> bool {
        price >= self.min && price <= self.max
    }

    pub fn is_unbounded(&self) -> bool {
        self.min == 0 && self.max == u32::MAX
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: default_price_max(),
        }
    }
}

/// Ordering applied to a filtered result set
///
/// Unknown keys deserialize to `Relevance`, which leaves the order untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Rating,
    Distance,
    Newest,
    #[default]
    #[serde(other)]
    Relevance,
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "price" => SortKey::Price,
            "rating" => SortKey::Rating,
            "distance" => SortKey::Distance,
            "newest" => SortKey::Newest,
            _ => SortKey::Relevance,
        })
    }
}

/// User-selected search criteria
///
/// Every field has an "empty" value (blank string, empty set, unbounded
/// range, `None`, zero) under which the corresponding check is skipped, so
/// `FilterSpec::default()` matches every listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub location: String,
    pub nearby_colleges: BTreeSet<String>,
    pub price_range: PriceRange,
    pub gender: Option<Gender>,
    #[serde(rename = "roomType", alias = "roomTypes")]
    pub room_types: BTreeSet<RoomKind>,
    pub amenities: BTreeSet<Amenity>,
    pub furnishing: Option<Furnishing>,
    #[serde(rename = "rating", alias = "minRating")]
    pub min_rating: f64,
    #[serde(rename = "maxDistance", alias = "maxDistanceKm")]
    pub max_distance_km: f64,
    pub sort_by: SortKey,
}

/// Kind of gazetteer entry a suggestion was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    Area,
    Landmark,
    Metro,
    College,
    NearCollege,
}

/// Autocomplete entry returned to the search box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub name: String,
    pub kind: SuggestionKind,
    pub city: String,
    pub coordinates: Option<Coordinate>,
    pub college_id: Option<String>,
}

/// Listing that survived the search pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub listing: Listing,
    pub min_price: Option<u32>,
    pub distance_km: Option<f64>,
}
