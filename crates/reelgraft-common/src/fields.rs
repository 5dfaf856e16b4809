//! The fixed set of metadata columns appended to every record.
//!
//! Field order matters: the table writer places values positionally, so
//! [`EnrichmentFields::to_cells`] and [`ENRICHMENT_COLUMNS`] must always agree.

use serde::{Deserialize, Serialize};

/// Number of enrichment columns appended to every output row.
pub const ENRICHMENT_FIELD_COUNT: usize = 12;

/// Output headers for the enrichment columns, in declared order.
pub const ENRICHMENT_COLUMNS: [&str; ENRICHMENT_FIELD_COUNT] = [
    "TMDB_Genres",
    "TMDB_Poster_URL",
    "TMDB_Origin_Country",
    "Runtime_Minutes",
    "Original_Language",
    "TMDB_Vote_Average",
    "TMDB_Popularity",
    "Revenue_USD",
    "Budget_USD",
    "Tagline",
    "Director",
    "Top_Cast",
];

/// Metadata attached to one record.
///
/// Every field is optional; `None` is written as an empty cell. The default
/// value is the all-null tuple used whenever a lookup fails outright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentFields {
    /// Genre names joined by `", "`.
    pub genres: Option<String>,
    /// Full poster image URL.
    pub poster_url: Option<String>,
    /// Production country names joined by `", "`.
    pub countries: Option<String>,
    pub runtime_minutes: Option<u32>,
    /// ISO-639-1 code of the original language.
    pub original_language: Option<String>,
    pub vote_average: Option<f64>,
    pub popularity: Option<f64>,
    pub revenue: Option<u64>,
    pub budget: Option<u64>,
    pub tagline: Option<String>,
    pub director: Option<String>,
    /// Up to three cast names joined by `", "`.
    pub top_cast: Option<String>,
}

impl EnrichmentFields {
    /// Returns `true` when no field carries a value.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Render the fields as CSV cells in [`ENRICHMENT_COLUMNS`] order.
    pub fn to_cells(&self) -> [String; ENRICHMENT_FIELD_COUNT] {
        [
            text(&self.genres),
            text(&self.poster_url),
            text(&self.countries),
            number(&self.runtime_minutes),
            text(&self.original_language),
            number(&self.vote_average),
            number(&self.popularity),
            number(&self.revenue),
            number(&self.budget),
            text(&self.tagline),
            text(&self.director),
            text(&self.top_cast),
        ]
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn number<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all_null() {
        let fields = EnrichmentFields::default();
        assert!(fields.is_empty());
        assert!(fields.to_cells().iter().all(String::is_empty));
    }

    #[test]
    fn cells_follow_column_order() {
        let fields = EnrichmentFields {
            genres: Some("Drama, Sci-Fi".into()),
            poster_url: Some("https://image.tmdb.org/t/p/w500/abc.jpg".into()),
            countries: Some("United States of America".into()),
            runtime_minutes: Some(116),
            original_language: Some("en".into()),
            vote_average: Some(7.6),
            popularity: Some(41.25),
            revenue: Some(203_388_186),
            budget: Some(47_000_000),
            tagline: Some("Why are they here?".into()),
            director: Some("Denis Villeneuve".into()),
            top_cast: Some("Amy Adams, Jeremy Renner".into()),
        };

        let cells = fields.to_cells();
        assert_eq!(cells.len(), ENRICHMENT_COLUMNS.len());
        assert_eq!(cells[0], "Drama, Sci-Fi");
        assert_eq!(cells[3], "116");
        assert_eq!(cells[5], "7.6");
        assert_eq!(cells[6], "41.25");
        assert_eq!(cells[7], "203388186");
        assert_eq!(cells[8], "47000000");
        assert_eq!(cells[10], "Denis Villeneuve");
        assert_eq!(cells[11], "Amy Adams, Jeremy Renner");
        assert!(!fields.is_empty());
    }

    #[test]
    fn partial_fields_leave_gaps() {
        let fields = EnrichmentFields {
            director: Some("Agnès Varda".into()),
            ..Default::default()
        };
        let cells = fields.to_cells();
        assert_eq!(cells[10], "Agnès Varda");
        assert_eq!(cells.iter().filter(|c| c.is_empty()).count(), 11);
    }

    #[test]
    fn serializes_nulls_explicitly() {
        let json = serde_json::to_value(EnrichmentFields::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), ENRICHMENT_FIELD_COUNT);
        assert!(obj.values().all(|v| v.is_null()));
    }
}
