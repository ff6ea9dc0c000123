//! Static table of known locations
//!
//! The 27 state capitals with their IBGE municipality codes. Used when the
//! live area lookup is disabled or fails.

use crate::coord::distance::nearest;
use crate::coord::Coordinates;

/// Geocode answered when no distance is comparable
pub const DEFAULT_GEOCODE: &str = "3304557";

/// A named location with a fixed geocode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnownLocation {
    pub geocode: &'static str,
    pub lat: f64,
    pub lon: f64,
    pub name: &'static str,
}

impl KnownLocation {
    const fn new(geocode: &'static str, lat: f64, lon: f64, name: &'static str) -> Self {
        Self { geocode, lat, lon, name }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// State capitals, ordered by state
pub const STATE_CAPITALS: &[KnownLocation] = &[
    KnownLocation::new("1200401", -9.9747, -67.8100, "Rio Branco"),
    KnownLocation::new("2704302", -9.6658, -35.7353, "Maceió"),
    KnownLocation::new("1600303", 0.0349, -51.0694, "Macapá"),
    KnownLocation::new("1302603", -3.1190, -60.0217, "Manaus"),
    KnownLocation::new("2927408", -12.9714, -38.5014, "Salvador"),
    KnownLocation::new("2304400", -3.7319, -38.5267, "Fortaleza"),
    KnownLocation::new("5300108", -15.7939, -47.8828, "Brasília"),
    KnownLocation::new("3205309", -20.3155, -40.3128, "Vitória"),
    KnownLocation::new("5208707", -16.6869, -49.2648, "Goiânia"),
    KnownLocation::new("2111300", -2.5307, -44.3068, "São Luís"),
    KnownLocation::new("5103403", -15.6014, -56.0979, "Cuiabá"),
    KnownLocation::new("5002704", -20.4697, -54.6201, "Campo Grande"),
    KnownLocation::new("3106200", -19.9167, -43.9345, "Belo Horizonte"),
    KnownLocation::new("1501402", -1.4558, -48.4902, "Belém"),
    KnownLocation::new("2507507", -7.1195, -34.8450, "João Pessoa"),
    KnownLocation::new("4106902", -25.4284, -49.2733, "Curitiba"),
    KnownLocation::new("2611606", -8.0476, -34.8770, "Recife"),
    KnownLocation::new("2211001", -5.0920, -42.8038, "Teresina"),
    KnownLocation::new("3304557", -22.9068, -43.1729, "Rio de Janeiro"),
    KnownLocation::new("2408102", -5.7945, -35.2110, "Natal"),
    KnownLocation::new("4314902", -30.0346, -51.2177, "Porto Alegre"),
    KnownLocation::new("1100205", -8.7612, -63.9004, "Porto Velho"),
    KnownLocation::new("1400100", 2.8235, -60.6758, "Boa Vista"),
    KnownLocation::new("4205407", -27.5954, -48.5480, "Florianópolis"),
    KnownLocation::new("3550308", -23.5505, -46.6333, "São Paulo"),
    KnownLocation::new("2800308", -10.9472, -37.0731, "Aracaju"),
    KnownLocation::new("1721000", -10.1842, -48.3336, "Palmas"),
];

/// Closest entry of `table` to `origin`
///
/// When no distance is comparable the entry for [`DEFAULT_GEOCODE`] answers,
/// or the first entry if the table lacks it. An empty table yields `None`.
pub fn nearest_known(table: &[KnownLocation], origin: Coordinates) -> Option<&KnownLocation> {
    if let Some((location, _)) = nearest(origin, table.iter(), |l| l.coordinates()) {
        return Some(location);
    }

    table
        .iter()
        .find(|l| l.geocode == DEFAULT_GEOCODE)
        .or_else(|| table.first())
}
