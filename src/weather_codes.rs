//! WMO weather interpretation codes as used by Open-Meteo

/// Description returned for codes outside the table
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Known codes, ascending
const WEATHER_CODES: [(i64, &str); 24] = [
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Foggy"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (61, "Slight rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (71, "Slight snow"),
    (73, "Moderate snow"),
    (75, "Heavy snow"),
    (77, "Snow grains"),
    (80, "Slight rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Slight snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm with slight hail"),
    (99, "Thunderstorm with heavy hail"),
];

/// Convert a weather code to a human-readable description
#[must_use]
pub fn describe(code: i64) -> &'static str {
    WEATHER_CODES
        .binary_search_by_key(&code, |&(known, _)| known)
        .map_or(UNKNOWN_DESCRIPTION, |idx| WEATHER_CODES[idx].1)
}

/// All codes with a dedicated description
pub fn known_codes() -> impl Iterator<Item = (i64, &'static str)> {
    WEATHER_CODES.iter().copied()
}
