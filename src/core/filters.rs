use crate::models::{Amenity, Coordinate, FilterSpec, Listing};
use crate::core::distance::distance_to_listing;

/// Check whether a listing satisfies every criterion of a filter spec
///
/// Checks run in a fixed order and stop at the first failure. Criteria left
/// at their empty value are skipped, so the default spec matches everything.
#[inline]
pub fn matches(listing: &Listing, spec: &FilterSpec) -> bool {
    matches_location(listing, &spec.location)
        && matches_colleges(listing, spec)
        && matches_price(listing, spec)
        && matches_gender(listing, spec)
        && matches_room_types(listing, spec)
        && matches_amenities(listing, spec)
        && matches_furnishing(listing, spec)
        && matches_rating(listing, spec)
}

/// Case-insensitive substring match against address, city and landmarks
#[inline]
pub fn matches_location(listing: &Listing, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    let location = &listing.location;

    location.address.to_lowercase().contains(&needle)
        || location.city.to_lowercase().contains(&needle)
        || location
            .landmarks
            .iter()
            .any(|landmark| landmark.to_lowercase().contains(&needle))
}

#[inline]
fn matches_colleges(listing: &Listing, spec: &FilterSpec) -> bool {
    spec.nearby_colleges.is_empty()
        || listing
            .location
            .nearby_colleges
            .iter()
            .any(|college| spec.nearby_colleges.contains(&college.college_id))
}

/// Bounds are inclusive. A listing without rooms has no price and only
/// passes an unbounded range.
#[inline]
fn matches_price(listing: &Listing, spec: &FilterSpec) -> bool {
    match listing.min_price() {
        Some(price) => spec.price_range.contains(price),
        None => spec.price_range.is_unbounded(),
    }
}

#[inline]
fn matches_gender(listing: &Listing, spec: &FilterSpec) -> bool {
    spec.gender.map_or(true, |gender| gender == listing.gender)
}

#[inline]
fn matches_room_types(listing: &Listing, spec: &FilterSpec) -> bool {
    spec.room_types.is_empty()
        || spec
            .room_types
            .iter()
            .any(|kind| listing.has_room_kind(*kind))
}

/// Every requested amenity must be present
#[inline]
fn matches_amenities(listing: &Listing, spec: &FilterSpec) -> bool {
    spec.amenities
        .iter()
        .all(|amenity: &Amenity| listing.amenities.has(*amenity))
}

#[inline]
fn matches_furnishing(listing: &Listing, spec: &FilterSpec) -> bool {
    spec.furnishing
        .map_or(true, |furnishing| listing.has_furnishing(furnishing))
}

#[inline]
fn matches_rating(listing: &Listing, spec: &FilterSpec) -> bool {
    spec.min_rating <= 0.0 || listing.rating.average >= spec.min_rating
}

/// Radius cut applied after the predicate checks
///
/// Only active when both a positive `max_distance_km` and an origin are
/// given. Listings without coordinates cannot be placed and are dropped.
#[inline]
pub fn within_radius(listing: &Listing, spec: &FilterSpec, origin: Option<&Coordinate>) -> bool {
    match origin {
        Some(origin) if spec.max_distance_km > 0.0 => distance_to_listing(origin, listing)
            .is_some_and(|distance| distance <= spec.max_distance_km),
        _ => true,
    }
}
