//! Geography context for classification requests.
//!
//! Demographic datasets are published per market-area level (tract, county,
//! block group, and so on). The engine never interprets the level itself; it
//! rides along for provenance and logging, and the dataset name tells the
//! provider which table to query.

use serde::{Deserialize, Serialize};

/// Market-area levels demographic data is published at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AreaType {
    /// Ring or drive-time buffer around a site.
    Radius,
    /// ZIP code.
    Zip,
    County,
    /// Incorporated place or census-designated place.
    Place,
    /// Census tract.
    Tract,
    /// Census block.
    Block,
    /// Census block group.
    BlockGroup,
    /// Core-based statistical area.
    Cbsa,
    State,
    /// National summary.
    Usa,
}

impl AreaType {
    /// Canonical lowercase name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Radius => "radius",
            Self::Zip => "zip",
            Self::County => "county",
            Self::Place => "place",
            Self::Tract => "tract",
            Self::Block => "block",
            Self::BlockGroup => "block-group",
            Self::Cbsa => "cbsa",
            Self::State => "state",
            Self::Usa => "usa",
        }
    }

    /// Coerces a loosely formatted label into an area type.
    ///
    /// Tolerates casing, whitespace, punctuation, and plurals, so the strings
    /// that UIs and feature services emit ("Block Group", "ZIP Codes",
    /// "census tracts") all land on the right variant.
    ///
    /// ```
    /// use choroscale::classify::AreaType;
    ///
    /// assert_eq!(AreaType::coerce("Block Group"), Some(AreaType::BlockGroup));
    /// assert_eq!(AreaType::coerce("ZIP Codes"), Some(AreaType::Zip));
    /// assert_eq!(AreaType::coerce("parcels"), None);
    /// ```
    pub fn coerce(input: &str) -> Option<Self> {
        let normalized: String = input
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "radius" | "radii" | "ring" | "rings" => Some(Self::Radius),
            "zip" | "zips" | "zipcode" | "zipcodes" => Some(Self::Zip),
            "county" | "counties" => Some(Self::County),
            "place" | "places" | "city" | "cities" => Some(Self::Place),
            "tract" | "tracts" | "censustract" | "censustracts" => Some(Self::Tract),
            "block" | "blocks" => Some(Self::Block),
            "blockgroup" | "blockgroups" => Some(Self::BlockGroup),
            "cbsa" | "cbsas" | "metro" | "metros" => Some(Self::Cbsa),
            "state" | "states" => Some(Self::State),
            "usa" | "us" | "nation" | "national" | "unitedstates" => Some(Self::Usa),
            _ => None,
        }
    }
}

impl std::fmt::Display for AreaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names the dataset a classification runs against and the market-area level
/// it represents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeographyContext {
    /// Provider table name.
    pub dataset: String,
    /// Market-area level of the dataset's rows.
    pub area_type: AreaType,
}

impl GeographyContext {
    /// Creates a context for the given dataset and area type.
    pub fn new(dataset: impl Into<String>, area_type: AreaType) -> Self {
        Self {
            dataset: dataset.into(),
            area_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coercion_tolerates_formatting_noise() {
        assert_eq!(AreaType::coerce("tract"), Some(AreaType::Tract));
        assert_eq!(AreaType::coerce("Census Tracts"), Some(AreaType::Tract));
        assert_eq!(AreaType::coerce("Block Group"), Some(AreaType::BlockGroup));
        assert_eq!(AreaType::coerce("block-groups"), Some(AreaType::BlockGroup));
        assert_eq!(AreaType::coerce("ZIP Codes"), Some(AreaType::Zip));
        assert_eq!(AreaType::coerce("U.S.A."), Some(AreaType::Usa));
        assert_eq!(AreaType::coerce("COUNTIES"), Some(AreaType::County));
        assert_eq!(AreaType::coerce("CBSA"), Some(AreaType::Cbsa));
    }

    #[test]
    fn coercion_rejects_unknown_labels() {
        assert_eq!(AreaType::coerce("parcel"), None);
        assert_eq!(AreaType::coerce(""), None);
        assert_eq!(AreaType::coerce("---"), None);
    }

    #[test]
    fn serializes_kebab_case() {
        let json = serde_json::to_string(&AreaType::BlockGroup).unwrap();
        assert_eq!(json, "\"block-group\"");

        let parsed: AreaType = serde_json::from_str("\"tract\"").unwrap();
        assert_eq!(parsed, AreaType::Tract);
    }

    #[test]
    fn display_matches_canonical_name() {
        assert_eq!(AreaType::Tract.to_string(), "tract");
        assert_eq!(AreaType::BlockGroup.to_string(), "block-group");
    }

    #[test]
    fn context_carries_dataset_and_level() {
        let geography = GeographyContext::new("tracts_2020", AreaType::Tract);
        assert_eq!(geography.dataset, "tracts_2020");
        assert_eq!(geography.area_type, AreaType::Tract);
    }
}
