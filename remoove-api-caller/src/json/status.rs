use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ids::deserialize_optional_id;

pub const SORTING_STATUS_IDLE: &str = "Idle";
pub const TRAP_STATUS_CLOSED: &str = "Closed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WasteCategory {
    Containers,
    Organics,
    Landfill,
    Paper,
}

impl WasteCategory {
    /// Display order
    pub const ALL: [WasteCategory; 4] = [
        WasteCategory::Containers,
        WasteCategory::Organics,
        WasteCategory::Landfill,
        WasteCategory::Paper,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            WasteCategory::Containers => "Containers",
            WasteCategory::Organics => "Organics",
            WasteCategory::Landfill => "Landfill",
            WasteCategory::Paper => "Paper",
        }
    }
}

impl std::fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unknown waste category: `{0}`")]
pub struct UnknownCategory(pub String);

impl std::str::FromStr for WasteCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Percentage per category, keyed by the category name as the server sends it.
/// Categories that are absent, or reported as `null`, read as 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FillLevels {
    #[serde(deserialize_with = "deserialize_levels")]
    levels: BTreeMap<String, f64>,
}

fn deserialize_levels<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let levels = BTreeMap::<String, Option<f64>>::deserialize(deserializer)?;
    Ok(levels
        .into_iter()
        .map(|(category, value)| (category, value.unwrap_or(0.)))
        .collect())
}

impl FillLevels {
    pub fn zeroed() -> Self {
        WasteCategory::ALL.into_iter().map(|c| (c, 0.)).collect()
    }

    #[must_use]
    pub fn get(&self, category: WasteCategory) -> f64 {
        self.levels.get(category.as_str()).copied().unwrap_or(0.)
    }

    pub fn set(&mut self, category: WasteCategory, value: f64) {
        self.levels.insert(category.as_str().to_string(), value);
    }

    /// All reported values, including categories this client does not know about
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.levels.values().copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl FromIterator<(WasteCategory, f64)> for FillLevels {
    fn from_iter<T: IntoIterator<Item = (WasteCategory, f64)>>(iter: T) -> Self {
        Self {
            levels: iter
                .into_iter()
                .map(|(c, v)| (c.as_str().to_string(), v))
                .collect(),
        }
    }
}

/// Live status of one trash can, as returned by `/status/{id}` and pushed over the WebSocket
#[must_use]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashCanStatus {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub trash_can_id: Option<String>,
    pub fill_levels: FillLevels,
    #[serde(default)]
    pub sorting_status: String,
    #[serde(default)]
    pub trap_status: String,
}

impl TrashCanStatus {
    /// Structural equality of everything a sensor reports; the id is not a reading
    #[must_use]
    pub fn has_same_readings(&self, other: &TrashCanStatus) -> bool {
        self.fill_levels == other.fill_levels
            && self.sorting_status == other.sorting_status
            && self.trap_status == other.trap_status
    }

    #[must_use]
    pub fn is_sorting_idle(&self) -> bool {
        self.sorting_status == SORTING_STATUS_IDLE
    }

    #[must_use]
    pub fn is_trap_closed(&self) -> bool {
        self.trap_status == TRAP_STATUS_CLOSED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn parse_full_status() {
        let status: TrashCanStatus = serde_json::from_value(json!({
            "trashCanId": 4,
            "fillLevels": {"Containers": 12, "Organics": 85.5, "Landfill": 0, "Paper": 100},
            "sortingStatus": "Idle",
            "trapStatus": "Closed"
        }))
        .unwrap();

        assert_eq!(status.trash_can_id.as_deref(), Some("4"));
        assert_eq!(status.fill_levels.get(WasteCategory::Containers), 12.);
        assert_eq!(status.fill_levels.get(WasteCategory::Organics), 85.5);
        assert_eq!(status.fill_levels.get(WasteCategory::Paper), 100.);
        assert!(status.is_sorting_idle());
        assert!(status.is_trap_closed());
    }

    #[test]
    fn missing_categories_read_as_zero() {
        let status: TrashCanStatus =
            serde_json::from_value(json!({"fillLevels": {"Paper": 30}})).unwrap();
        assert_eq!(status.fill_levels.get(WasteCategory::Landfill), 0.);
        assert_eq!(status.sorting_status, "");
        assert_eq!(status.trash_can_id, None);
    }

    #[test]
    fn null_fill_level_reads_as_zero() {
        let status: TrashCanStatus = serde_json::from_value(json!({
            "fillLevels": {"Containers": 10, "Organics": null, "Landfill": 5, "Paper": 0},
            "sortingStatus": "Idle",
            "trapStatus": "Closed"
        }))
        .unwrap();
        assert_eq!(status.fill_levels.get(WasteCategory::Containers), 10.);
        assert_eq!(status.fill_levels.get(WasteCategory::Organics), 0.);
        assert_eq!(status.fill_levels.get(WasteCategory::Landfill), 5.);
    }

    #[test]
    fn missing_fill_levels_is_a_shape_error() {
        let result =
            serde_json::from_value::<TrashCanStatus>(json!({"sortingStatus": "Idle"}));
        assert!(result.is_err());
    }

    #[test]
    fn same_readings_ignores_id() {
        let a = TrashCanStatus {
            trash_can_id: Some("1".to_string()),
            fill_levels: FillLevels::zeroed(),
            sorting_status: "Idle".to_string(),
            trap_status: "Closed".to_string(),
        };
        let mut b = a.clone();
        b.trash_can_id = None;
        assert!(a.has_same_readings(&b));

        b.fill_levels.set(WasteCategory::Paper, 1.);
        assert!(!a.has_same_readings(&b));
    }

    #[rstest]
    #[case("paper", WasteCategory::Paper)]
    #[case("CONTAINERS", WasteCategory::Containers)]
    #[case("Organics", WasteCategory::Organics)]
    #[case("landFill", WasteCategory::Landfill)]
    fn category_from_str(#[case] input: &str, #[case] expected: WasteCategory) {
        assert_eq!(input.parse::<WasteCategory>(), Ok(expected));
    }

    #[test]
    fn unknown_category() {
        assert_eq!(
            "glass".parse::<WasteCategory>(),
            Err(UnknownCategory("glass".to_string()))
        );
    }

    #[test]
    fn serialize_round_trips_through_wire_names() {
        let levels: FillLevels = [(WasteCategory::Containers, 5.), (WasteCategory::Paper, 7.)]
            .into_iter()
            .collect();
        assert_eq!(
            serde_json::to_value(&levels).unwrap(),
            json!({"Containers": 5.0, "Paper": 7.0})
        );
    }
}
