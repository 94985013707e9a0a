// Unit tests for the PG Finder search core

use pg_finder::core::{
    distance::haversine_distance,
    filters::matches,
    sorting::sort_listings,
    suggest::Gazetteer,
};
use pg_finder::models::{
    Amenities, Amenity, Coordinate, FilterSpec, Furnishing, Gender, Listing, ListingLocation,
    PriceRange, Rating, RoomKind, RoomType, SortKey,
};

fn create_listing(id: &str, rent: u32, gender: Gender, amenities: &[Amenity]) -> Listing {
    Listing {
        id: id.to_string(),
        name: format!("PG {}", id),
        location: ListingLocation {
            address: "17th Cross, Sector 4".to_string(),
            area: "HSR Layout".to_string(),
            city: "Bangalore".to_string(),
            pincode: "560102".to_string(),
            coordinates: Some(Coordinate::new(12.9116, 77.6389)),
            landmarks: vec!["Agara Lake".to_string()],
            nearby_colleges: vec![],
        },
        room_types: vec![
            RoomType {
                kind: RoomKind::Triple,
                base_rent: rent,
                security_deposit: rent,
                available_rooms: 4,
                furnishing: Furnishing::Semi,
            },
            RoomType {
                kind: RoomKind::Single,
                base_rent: rent + 6000,
                security_deposit: rent + 6000,
                available_rooms: 1,
                furnishing: Furnishing::Fully,
            },
        ],
        amenities: Amenities::with(amenities),
        gender,
        rating: Rating { average: 3.9, count: 41 },
        created_at: None,
    }
}

#[test]
fn test_identity_filter_matches_fixture_set() {
    let spec = FilterSpec::default();
    let fixtures = vec![
        create_listing("1", 6000, Gender::Male, &[]),
        create_listing("2", 30000, Gender::Female, &Amenity::ALL),
        create_listing("3", 12000, Gender::CoEd, &[Amenity::Gym]),
    ];

    for listing in &fixtures {
        assert!(matches(listing, &spec), "default spec rejected {}", listing.id);
    }
}

#[test]
fn test_amenities_require_all() {
    let mut spec = FilterSpec::default();
    spec.amenities.insert(Amenity::Wifi);
    spec.amenities.insert(Amenity::Ac);

    let wifi_only = create_listing("1", 9000, Gender::Male, &[Amenity::Wifi]);
    let both = create_listing("2", 9000, Gender::Male, &[Amenity::Wifi, Amenity::Ac]);

    assert!(!matches(&wifi_only, &spec));
    assert!(matches(&both, &spec));
}

#[test]
fn test_price_boundaries_use_minimum_rent() {
    let listing = create_listing("1", 10000, Gender::Male, &[]);
    let mut spec = FilterSpec::default();

    // Minimum rent is the triple room at 10000, not the single at 16000
    spec.price_range = PriceRange::new(10000, 10000);
    assert!(matches(&listing, &spec));

    spec.price_range = PriceRange::new(5000, 10000);
    assert!(matches(&listing, &spec));

    spec.price_range = PriceRange::new(10001, 20000);
    assert!(!matches(&listing, &spec));
}

#[test]
fn test_furnishing_any_room() {
    let listing = create_listing("1", 10000, Gender::Female, &[]);
    let mut spec = FilterSpec::default();

    spec.furnishing = Some(Furnishing::Fully);
    assert!(matches(&listing, &spec));

    spec.furnishing = Some(Furnishing::Unfurnished);
    assert!(!matches(&listing, &spec));
}

#[test]
fn test_location_query_hits_landmark() {
    let listing = create_listing("1", 10000, Gender::Female, &[]);
    let mut spec = FilterSpec::default();

    spec.location = "agara".to_string();
    assert!(matches(&listing, &spec));

    spec.location = "Indiranagar".to_string();
    assert!(!matches(&listing, &spec));
}

#[test]
fn test_distance_zero_and_symmetric() {
    assert_eq!(haversine_distance(12.97, 77.59, 12.97, 77.59), 0.0);

    let a = (12.9716, 77.5946);
    let b = (18.5204, 73.8567);
    let forward = haversine_distance(a.0, a.1, b.0, b.1);
    let backward = haversine_distance(b.0, b.1, a.0, a.1);
    assert!((forward - backward).abs() < 1e-9);
    // Bangalore to Pune is roughly 735 km as the crow flies
    assert!((forward - 735.0).abs() < 20.0, "got {}", forward);
}

#[test]
fn test_rating_sort_idempotent() {
    let mut listings: Vec<Listing> = (0..5)
        .map(|i| create_listing(&i.to_string(), 9000, Gender::Male, &[]))
        .collect();
    for (i, listing) in listings.iter_mut().enumerate() {
        listing.rating.average = 5.0 - i as f64 * 0.5;
    }

    let sorted = sort_listings(&listings, SortKey::Rating, None);
    let resorted = sort_listings(&sorted, SortKey::Rating, None);

    let ids = |l: &[Listing]| l.iter().map(|x| x.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&sorted), ids(&listings));
    assert_eq!(ids(&resorted), ids(&sorted));
}

#[test]
fn test_unrecognized_sort_key_keeps_order() {
    let listings = vec![
        create_listing("b", 20000, Gender::Male, &[]),
        create_listing("a", 8000, Gender::Male, &[]),
        create_listing("c", 14000, Gender::Male, &[]),
    ];

    let key: SortKey = serde_json::from_str(r#""most-viewed""#).unwrap();
    let sorted = sort_listings(&listings, key, None);

    let ids: Vec<&str> = sorted.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[test]
fn test_suggestion_threshold() {
    let gazetteer = Gazetteer::builtin();

    assert!(gazetteer.suggest("K", 10).is_empty());

    let results = gazetteer.suggest("Ko", 10);
    assert!(results.iter().any(|s| s.name == "Koramangala"));
    assert!(results
        .iter()
        .all(|s| s.name.to_lowercase().contains("ko") || s.city.to_lowercase().contains("ko")));
}
