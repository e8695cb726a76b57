//! Café locations around Lima and Bogotá for realistic fixtures.

use cafe_discovery::dataset::{CafeRow, DatasetSnapshot, SnapshotBuilder, TagRow};

/// A named location with coordinates in degrees.
#[derive(Debug, Clone)]
pub struct Location {
    pub id: i64,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(id: i64, name: &'static str, lat: f64, lng: f64) -> Self {
        Self { id, name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// Row as stored in the dataset, coordinates scaled by 10^7.
    pub fn row(&self) -> CafeRow {
        CafeRow {
            cafe_id: self.id,
            name: self.name.to_string(),
            latitude: Some((self.lat * 1e7).round() as i64),
            longitude: Some((self.lng * 1e7).round() as i64),
        }
    }
}

// ============================================================================
// Lima: Miraflores / Barranco / San Isidro
// ============================================================================

pub const LIMA_USER: (f64, f64) = (-12.1219, -77.0297);

pub const LIMA: &[Location] = &[
    Location::new(101, "Tostaduría Larcomar", -12.1318, -77.0303),
    Location::new(102, "Café Parque Kennedy", -12.1211, -77.0297),
    Location::new(103, "Puente de los Suspiros Café", -12.1490, -77.0219),
    Location::new(104, "Espresso El Olivar", -12.0990, -77.0365),
    Location::new(105, "Malecón Cisneros Roasters", -12.1264, -77.0383),
    Location::new(106, "Bajada de Baños Café", -12.1486, -77.0245),
];

// ============================================================================
// Bogotá: Chapinero / Usaquén
// ============================================================================

pub const BOGOTA: &[Location] = &[
    Location::new(201, "Tinto Zona G", 4.6535, -74.0575),
    Location::new(202, "Café Usaquén", 4.6951, -74.0305),
];

/// Snapshot builder pre-loaded with every fixture café.
pub fn all_cafes() -> SnapshotBuilder {
    LIMA.iter()
        .chain(BOGOTA)
        .fold(DatasetSnapshot::builder(), |builder, location| builder.cafe(location.row()))
}

/// Tag row with the boolean attributes set as yes/no strings.
pub fn tags(cafe_id: i64, pet_friendly: bool, wifi: bool, terrace: bool) -> TagRow {
    let yes_no = |flag: bool| Some(if flag { "Sí" } else { "No" }.to_string());
    TagRow {
        cafe_id,
        pet_friendly: yes_no(pet_friendly),
        wifi: yes_no(wifi),
        terraza: yes_no(terrace),
        enchufes: yes_no(false),
        ..TagRow::default()
    }
}
