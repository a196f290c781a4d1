/// Human-readable label for a genre key.
///
/// Lookup is case-insensitive; keys outside the table pass through unchanged.
#[must_use]
pub fn genre_display_name(key: &str) -> &str {
    match key.trim().to_ascii_lowercase().as_str() {
        "rock" => "Rock",
        "pop" => "Pop",
        "jazz" => "Jazz",
        "blues" => "Blues",
        "hiphop" | "hip_hop" | "hip-hop" => "Hip-Hop",
        "rnb" | "r_and_b" => "R&B",
        "edm" => "EDM",
        "electronic" => "Electronic",
        "techno" => "Techno",
        "house" => "House",
        "country" => "Country",
        "folk" => "Folk",
        "indie" => "Indie",
        "metal" => "Metal",
        "punk" => "Punk",
        "latin" => "Latin",
        "classical" => "Classical",
        "comedy" => "Comedy",
        "theater" | "theatre" => "Theater",
        "art" | "arts" => "Arts",
        "food" | "food_drink" => "Food & Drink",
        "sports" => "Sports",
        "tech" => "Tech",
        "community" => "Community",
        _ => key,
    }
}
