//! Typed tool arguments.
//!
//! Each struct is both the deserialization target for a call's argument
//! object and the source of the tool's JSON input schema.

use schemars::JsonSchema;
use serde::de::{self, Deserializer};
use serde::Deserialize;

/// Arguments of `search_modules`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchModulesParams {
    /// Search query (module code or title keyword)
    pub query: String,

    /// Academic year (e.g., "2024-2025")
    #[serde(default)]
    pub acad_year: Option<String>,

    /// Maximum number of modules to list
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Arguments of the tools that look up a single module.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleParams {
    /// Module code (e.g., "CS1010S")
    pub module_code: String,

    /// Academic year (e.g., "2024-2025")
    #[serde(default)]
    pub acad_year: Option<String>,
}

/// Arguments of the tools that look up a module in one semester.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSemesterParams {
    /// Module code (e.g., "CS1010S")
    pub module_code: String,

    #[schemars(description = "Semester (1 or 2; 3 and 4 are the special terms)")]
    #[serde(deserialize_with = "semester")]
    pub semester: u32,

    /// Academic year (e.g., "2024-2025")
    #[serde(default)]
    pub acad_year: Option<String>,
}

/// Arguments of `list_modules_by_department`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentParams {
    /// Department name, or part of it (e.g., "Computer Science")
    pub department: String,

    /// Only list modules offered in this semester
    #[serde(default, deserialize_with = "optional_semester")]
    pub semester: Option<u32>,

    /// Academic year (e.g., "2024-2025")
    #[serde(default)]
    pub acad_year: Option<String>,
}

/// Arguments of `get_venue_schedule`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VenueScheduleParams {
    /// Venue code (e.g., "COM1-0207"), matched exactly
    pub venue: String,

    #[schemars(description = "Semester (1 or 2)")]
    #[serde(deserialize_with = "semester")]
    pub semester: u32,

    /// Academic year (e.g., "2024-2025")
    #[serde(default)]
    pub acad_year: Option<String>,
}

/// Arguments of `list_all_venues`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SemesterParams {
    #[schemars(description = "Semester (1 or 2)")]
    #[serde(deserialize_with = "semester")]
    pub semester: u32,

    /// Academic year (e.g., "2024-2025")
    #[serde(default)]
    pub acad_year: Option<String>,
}

/// Semester numbers arrive as JSON numbers; `2` and `2.0` are both accepted.
fn semester<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    whole_semester(f64::deserialize(deserializer)?)
}

fn optional_semester<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)?
        .map(whole_semester)
        .transpose()
}

fn whole_semester<E: de::Error>(value: f64) -> Result<u32, E> {
    if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
        Ok(value as u32)
    } else {
        Err(E::custom(format!(
            "invalid semester {value}, expected a whole number"
        )))
    }
}

/// Canonical form of a user-supplied module code.
pub fn normalize_module_code(code: &str) -> String {
    code.trim().to_uppercase()
}
