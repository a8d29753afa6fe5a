//! Static edge-location coordinate table.
//!
//! Maps 3-letter airport-style location codes to map coordinates. The table
//! is compiled in and never changes at runtime.

use serde::{Deserialize, Serialize};

/// Geographic region an edge location belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Europe,
    AsiaPacific,
    Oceania,
    NorthAmerica,
    SouthAmerica,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Europe => "Europe",
            Region::AsiaPacific => "Asia Pacific",
            Region::Oceania => "Oceania",
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
        }
    }
}

/// Latitude / longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// One known edge location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeLocation {
    pub code: &'static str,
    pub city: &'static str,
    pub region: Region,
    pub coordinate: Coordinate,
}

const fn loc(
    code: &'static str,
    city: &'static str,
    region: Region,
    lat: f64,
    lng: f64,
) -> EdgeLocation {
    EdgeLocation {
        code,
        city,
        region,
        coordinate: Coordinate { lat, lng },
    }
}

/// Every edge location with known coordinates.
pub const EDGE_LOCATIONS: &[EdgeLocation] = &[
    // Europe
    loc("AMS", "Amsterdam", Region::Europe, 52.3105, 4.7683),
    loc("ARN", "Stockholm", Region::Europe, 59.6497, 17.9237),
    loc("ATH", "Athens", Region::Europe, 37.9364, 23.9445),
    loc("CDG", "Paris", Region::Europe, 49.0097, 2.5479),
    loc("CPH", "Copenhagen", Region::Europe, 55.618, 12.6508),
    loc("DUB", "Dublin", Region::Europe, 53.4264, -6.2499),
    loc("DUS", "Düsseldorf", Region::Europe, 51.2789, 6.7645),
    loc("FRA", "Frankfurt", Region::Europe, 50.0379, 8.5622),
    loc("HAM", "Hamburg", Region::Europe, 53.6304, 9.9882),
    loc("HEL", "Helsinki", Region::Europe, 60.3172, 24.9633),
    loc("IST", "Istanbul", Region::Europe, 41.2609, 28.7415),
    loc("LHR", "London", Region::Europe, 51.47, -0.4543),
    loc("MAD", "Madrid", Region::Europe, 40.4983, -3.5676),
    loc("MRS", "Marseille", Region::Europe, 43.436, 5.2146),
    loc("MUC", "Munich", Region::Europe, 48.3537, 11.786),
    loc("MXP", "Milan", Region::Europe, 45.6286, 8.7236),
    loc("SOF", "Sofia", Region::Europe, 42.6967, 23.4114),
    loc("VIE", "Vienna", Region::Europe, 48.1103, 16.5697),
    loc("WAW", "Warsaw", Region::Europe, 52.1672, 20.9679),
    loc("ZRH", "Zurich", Region::Europe, 47.4582, 8.5555),
    // Asia Pacific
    loc("BLR", "Bangalore", Region::AsiaPacific, 13.1986, 77.7066),
    loc("HKG", "Hong Kong", Region::AsiaPacific, 22.308, 113.9185),
    loc("ICN", "Seoul", Region::AsiaPacific, 37.4602, 126.4407),
    loc("NRT", "Tokyo", Region::AsiaPacific, 35.772, 140.3929),
    loc("SIN", "Singapore", Region::AsiaPacific, 1.3644, 103.9915),
    // Oceania
    loc("BNE", "Brisbane", Region::Oceania, -27.3842, 153.1177),
    loc("MEL", "Melbourne", Region::Oceania, -37.669, 144.841),
    // North America
    loc("ATL", "Atlanta", Region::NorthAmerica, 33.6407, -84.4277),
    loc("CMH", "Columbus", Region::NorthAmerica, 39.9999, -82.8872),
    loc("DEN", "Denver", Region::NorthAmerica, 39.8561, -104.6737),
    loc("DFW", "Dallas", Region::NorthAmerica, 32.8998, -97.0403),
    loc("IAD", "Washington DC", Region::NorthAmerica, 38.9519, -77.448),
    loc("JFK", "New York", Region::NorthAmerica, 40.6413, -73.7781),
    loc("LAX", "Los Angeles", Region::NorthAmerica, 33.9416, -118.4085),
    loc("MIA", "Miami", Region::NorthAmerica, 25.7959, -80.287),
    loc("ORD", "Chicago", Region::NorthAmerica, 41.9742, -87.9073),
    loc("PHX", "Phoenix", Region::NorthAmerica, 33.4352, -112.0101),
    loc("SEA", "Seattle", Region::NorthAmerica, 47.4502, -122.3088),
    loc("SFO", "San Francisco", Region::NorthAmerica, 37.6213, -122.379),
    loc("YTO", "Toronto", Region::NorthAmerica, 43.8561, -79.337),
    loc("YUL", "Montreal", Region::NorthAmerica, 45.4707, -73.7407),
    // South America
    loc("GRU", "São Paulo", Region::SouthAmerica, -23.4357, -46.4731),
    loc("QRO", "Querétaro", Region::SouthAmerica, 20.6219, -100.185),
    loc("SCL", "Santiago", Region::SouthAmerica, -33.3928, -70.7857),
];

/// Look up the full table entry for an exact base code.
pub fn lookup(base_code: &str) -> Option<&'static EdgeLocation> {
    EDGE_LOCATIONS.iter().find(|l| l.code == base_code)
}

/// Coordinates for an exact base code, or `None` when the code is unknown.
pub fn resolve(base_code: &str) -> Option<Coordinate> {
    lookup(base_code).map(|l| l.coordinate)
}

/// Derive the base location code from an edge location identifier: drop
/// digits and hyphens, keep the first three characters, uppercase.
///
/// `"ATH50-C1"` → `"ATH"`, `"fra2-p3"` → `"FRA"`.
pub fn base_code(edge_location: &str) -> String {
    edge_location
        .chars()
        .filter(|c| !c.is_ascii_digit() && *c != '-')
        .take(3)
        .collect::<String>()
        .to_uppercase()
}
