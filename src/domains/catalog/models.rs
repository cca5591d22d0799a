//! Catalog entities as served by the NUSMods API.
//!
//! Every entity is a read-only snapshot deserialized from one response.
//! The two loosely-typed fields of the API (`prereqTree` and `workload`)
//! are decoded into closed enums here so the renderers can match on them
//! exhaustively.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Condensed module record from `moduleList.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub module_code: String,
    pub title: String,
    #[serde(default)]
    pub semesters: Vec<u32>,
    #[serde(default)]
    pub module_credit: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub faculty: Option<String>,
}

/// Full module record from `modules/{code}.json` and `moduleInformation.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDetail {
    pub module_code: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub module_credit: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub workload: Workload,
    #[serde(default)]
    pub prerequisite: Option<String>,
    #[serde(default)]
    pub corequisite: Option<String>,
    #[serde(default)]
    pub preclusion: Option<String>,
    #[serde(default)]
    pub semester_data: Vec<SemesterRecord>,
    #[serde(default)]
    pub prereq_tree: Option<PrereqTree>,
    #[serde(default)]
    pub fulfill_requirements: Vec<String>,
}

impl ModuleDetail {
    /// Find the record for a semester. The API lists each semester at most once.
    pub fn semester(&self, semester: u32) -> Option<&SemesterRecord> {
        self.semester_data.iter().find(|s| s.semester == semester)
    }

    /// Semester numbers in the order the API lists them.
    pub fn semester_numbers(&self) -> Vec<u32> {
        self.semester_data.iter().map(|s| s.semester).collect()
    }

    /// Whether any semester record matches.
    pub fn is_offered_in(&self, semester: u32) -> bool {
        self.semester(semester).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterRecord {
    pub semester: u32,
    #[serde(default)]
    pub timetable: Vec<Lesson>,
    #[serde(default)]
    pub exam_date: Option<String>,
    /// Exam length in minutes.
    #[serde(default)]
    pub exam_duration: Option<u32>,
}

/// One scheduled class of a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub class_no: String,
    pub lesson_type: String,
    pub weeks: Weeks,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub size: Option<u32>,
}

/// One class held in a venue, tagged with the module that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueLesson {
    pub class_no: String,
    pub lesson_type: String,
    pub weeks: Weeks,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub module_code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub size: Option<u32>,
}

/// Entry of `venueInformation.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueRecord {
    #[serde(default)]
    pub classes: Vec<VenueLesson>,
}

/// Venue code to its classes for one semester.
pub type VenueInformation = HashMap<String, VenueRecord>;

/// Week specification of a lesson: explicit week numbers or a dated range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Weeks {
    List(Vec<u32>),
    Range(WeekRange),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRange {
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub week_interval: Option<u32>,
    #[serde(default)]
    pub weeks: Option<Vec<u32>>,
}

/// Boolean requirement structure over module codes.
///
/// Wire shapes: a bare string (`"CS1010"`), `{"and": [...]}`, `{"or": [...]}`
/// and `{"nOf": [n, [...]]}`. Anything else decodes to `Unrecognized` and
/// renders as nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum PrereqTree {
    Module(String),
    All(Vec<PrereqTree>),
    Any(Vec<PrereqTree>),
    NOf(u32, Vec<PrereqTree>),
    Unrecognized,
}

impl PrereqTree {
    fn from_value(value: Value) -> Self {
        match value {
            Value::String(code) => Self::Module(code),
            Value::Object(mut map) => {
                if let Some(Value::Array(children)) = map.remove("and") {
                    Self::All(Self::children(children))
                } else if let Some(Value::Array(children)) = map.remove("or") {
                    Self::Any(Self::children(children))
                } else if let Some(Value::Array(mut pair)) = map.remove("nOf") {
                    match (pair.len(), pair.pop(), pair.pop()) {
                        (2, Some(Value::Array(children)), Some(Value::Number(n))) => {
                            match n.as_u64().and_then(|n| u32::try_from(n).ok()) {
                                Some(n) => Self::NOf(n, Self::children(children)),
                                None => Self::Unrecognized,
                            }
                        }
                        _ => Self::Unrecognized,
                    }
                } else {
                    Self::Unrecognized
                }
            }
            _ => Self::Unrecognized,
        }
    }

    fn children(values: Vec<Value>) -> Vec<PrereqTree> {
        values.into_iter().map(Self::from_value).collect()
    }
}

impl<'de> Deserialize<'de> for PrereqTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

impl Serialize for PrereqTree {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = match self {
            Self::Module(code) => Value::String(code.clone()),
            Self::All(children) => serde_json::json!({ "and": children }),
            Self::Any(children) => serde_json::json!({ "or": children }),
            Self::NOf(n, children) => serde_json::json!({ "nOf": [n, children] }),
            Self::Unrecognized => Value::Null,
        };
        value.serialize(serializer)
    }
}

/// Weekly workload of a module.
///
/// The API sends either five numbers (lecture, tutorial, lab, project,
/// preparation), a free-text description, or nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Workload {
    Breakdown([f64; 5]),
    Description(String),
    #[default]
    Unknown,
}

impl<'de> Deserialize<'de> for Workload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(text) => Self::Description(text),
            Value::Array(items) if items.len() == 5 => {
                let hours: Vec<f64> = items.iter().filter_map(Value::as_f64).collect();
                match <[f64; 5]>::try_from(hours) {
                    Ok(hours) => Self::Breakdown(hours),
                    Err(_) => Self::Unknown,
                }
            }
            _ => Self::Unknown,
        })
    }
}

impl Serialize for Workload {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Breakdown(hours) => hours.serialize(serializer),
            Self::Description(text) => text.serialize(serializer),
            Self::Unknown => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prereq_tree_shapes() {
        let tree: PrereqTree = serde_json::from_value(json!({
            "and": ["CS1231", {"or": ["CS2030", "CS2030S"]}, {"nOf": [2, ["MA1521", "MA1505", "MA2002"]]}]
        }))
        .unwrap();

        assert_eq!(
            tree,
            PrereqTree::All(vec![
                PrereqTree::Module("CS1231".into()),
                PrereqTree::Any(vec![
                    PrereqTree::Module("CS2030".into()),
                    PrereqTree::Module("CS2030S".into()),
                ]),
                PrereqTree::NOf(
                    2,
                    vec![
                        PrereqTree::Module("MA1521".into()),
                        PrereqTree::Module("MA1505".into()),
                        PrereqTree::Module("MA2002".into()),
                    ]
                ),
            ])
        );
    }

    #[test]
    fn test_prereq_tree_unrecognized() {
        let tree: PrereqTree = serde_json::from_value(json!({"xor": ["A"]})).unwrap();
        assert_eq!(tree, PrereqTree::Unrecognized);

        let tree: PrereqTree = serde_json::from_value(json!({"nOf": ["two", []]})).unwrap();
        assert_eq!(tree, PrereqTree::Unrecognized);

        let tree: PrereqTree = serde_json::from_value(json!(42)).unwrap();
        assert_eq!(tree, PrereqTree::Unrecognized);
    }

    #[test]
    fn test_workload_variants() {
        let w: Workload = serde_json::from_value(json!([2, 1, 0, 0, 3])).unwrap();
        assert_eq!(w, Workload::Breakdown([2.0, 1.0, 0.0, 0.0, 3.0]));

        let w: Workload = serde_json::from_value(json!("3-1-1-2-3")).unwrap();
        assert_eq!(w, Workload::Description("3-1-1-2-3".into()));

        let w: Workload = serde_json::from_value(json!([1, 2])).unwrap();
        assert_eq!(w, Workload::Unknown);

        let w: Workload = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(w, Workload::Unknown);
    }

    #[test]
    fn test_module_detail_minimal_and_missing_workload() {
        let module: ModuleDetail = serde_json::from_value(json!({
            "moduleCode": "CS1010S",
            "title": "Programming Methodology",
            "moduleCredit": "4",
            "semesterData": [{
                "semester": 1,
                "timetable": [{
                    "classNo": "01",
                    "lessonType": "Lecture",
                    "weeks": {"start": "2024-08-12", "end": "2024-11-15"},
                    "day": "Wednesday",
                    "startTime": "1000",
                    "endTime": "1200",
                    "venue": "LT27"
                }],
                "examDate": "2024-11-27T01:00:00.000Z",
                "examDuration": 120
            }]
        }))
        .unwrap();

        assert_eq!(module.workload, Workload::Unknown);
        assert!(module.prereq_tree.is_none());
        assert!(module.is_offered_in(1));
        assert!(!module.is_offered_in(2));
        let lesson = &module.semester(1).unwrap().timetable[0];
        assert!(matches!(lesson.weeks, Weeks::Range(ref r) if r.end == "2024-11-15"));
    }

    #[test]
    fn test_week_list_form() {
        let weeks: Weeks = serde_json::from_value(json!([1, 2, 3, 4])).unwrap();
        assert_eq!(weeks, Weeks::List(vec![1, 2, 3, 4]));
    }

    #[test]
    fn test_venue_information_map() {
        let info: VenueInformation = serde_json::from_value(json!({
            "COM1-0207": {
                "classes": [{
                    "classNo": "T01",
                    "lessonType": "Tutorial",
                    "weeks": [3, 4, 5],
                    "day": "Monday",
                    "startTime": "0900",
                    "endTime": "1000",
                    "moduleCode": "CS1231S",
                    "title": "Discrete Structures",
                    "size": 30
                }],
                "availability": {}
            }
        }))
        .unwrap();

        assert_eq!(info["COM1-0207"].classes[0].module_code, "CS1231S");
    }
}
