use crate::models::{College, CollegeKind, Coordinate, Listing, NearbyCollege};

/// Built-in college reference table: (id, name, kind, city, lat, lng)
const COLLEGES: &[(&str, &str, CollegeKind, &str, f64, f64)] = &[
    ("rvce", "RV College of Engineering", CollegeKind::Engineering, "Bangalore", 12.9237, 77.4987),
    ("pes", "PES University", CollegeKind::Engineering, "Bangalore", 12.9345, 77.5345),
    ("bmsce", "BMS College of Engineering", CollegeKind::Engineering, "Bangalore", 12.9411, 77.5655),
    ("msrit", "MS Ramaiah Institute of Technology", CollegeKind::Engineering, "Bangalore", 13.0306, 77.5649),
    ("christ", "Christ University", CollegeKind::Arts, "Bangalore", 12.9344, 77.6060),
    ("sjc", "St. Joseph's College", CollegeKind::Arts, "Bangalore", 12.9634, 77.5967),
    ("mcc", "Mount Carmel College", CollegeKind::Arts, "Bangalore", 12.9903, 77.5926),
    ("jain", "Jain University", CollegeKind::Commerce, "Bangalore", 12.9387, 77.5800),
    ("bmcri", "Bangalore Medical College", CollegeKind::Medical, "Bangalore", 12.9590, 77.5740),
    ("iisc", "Indian Institute of Science", CollegeKind::Other, "Bangalore", 13.0219, 77.5671),
    ("coep", "College of Engineering Pune", CollegeKind::Engineering, "Pune", 18.5293, 73.8565),
    ("du-north", "Delhi University North Campus", CollegeKind::Other, "Delhi", 28.6889, 77.2100),
];

/// The built-in college table
pub fn builtin_colleges() -> Vec<College> {
    COLLEGES
        .iter()
        .map(|&(id, name, kind, city, lat, lng)| College {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            city: city.to_string(),
            coordinates: Coordinate::new(lat, lng),
        })
        .collect()
}

/// Colleges within `radius_km` of a listing, nearest first
///
/// Distances are computed on demand; the colleges themselves carry no
/// per-listing state. A listing without coordinates has no nearby colleges.
pub fn annotate_nearby_colleges(
    listing: &Listing,
    colleges: &[College],
    radius_km: f64,
) -> Vec<NearbyCollege> {
    let Some(origin) = listing.coordinates() else {
        return Vec::new();
    };

    let mut nearby: Vec<NearbyCollege> = colleges
        .iter()
        .filter_map(|college| {
            let distance_km = origin.distance_to(&college.coordinates);
            (distance_km <= radius_km).then(|| NearbyCollege {
                college_id: college.id.clone(),
                distance_km,
            })
        })
        .collect();

    nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    nearby
}
