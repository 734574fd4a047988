/// A selectable location: the provider-assigned numeric key plus display
/// metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct City {
    pub id: u64,
    pub name: &'static str,
    pub country: &'static str,
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}

/// The cities offered by the picker. Ids are OpenWeather city ids.
pub const CITIES: &[City] = &[
    City { id: 6_167_865, name: "Toronto", country: "CA" },
    City { id: 6_094_817, name: "Ottawa", country: "CA" },
    City { id: 1_850_147, name: "Tokyo", country: "JP" },
];

/// Look up a city by name (case-insensitive) or by its numeric id.
pub fn find_city(query: &str) -> Option<City> {
    let query = query.trim();

    if let Ok(id) = query.parse::<u64>() {
        return CITIES.iter().copied().find(|c| c.id == id);
    }

    CITIES.iter().copied().find(|c| c.name.eq_ignore_ascii_case(query))
}
