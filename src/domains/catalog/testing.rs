//! In-memory catalog for dispatcher tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use super::client::{CatalogApi, CatalogResult};
use super::error::CatalogError;
use super::models::{ModuleDetail, ModuleSummary, VenueInformation};

/// A fixed catalog that records every call made against it.
pub(crate) struct StaticCatalog {
    year: String,
    details: Vec<ModuleDetail>,
    venues: HashMap<u32, VenueInformation>,
    venue_codes: HashMap<u32, Vec<String>>,
    failure: Option<(u16, String)>,
    calls: Mutex<Vec<String>>,
}

impl StaticCatalog {
    pub fn new(details: Vec<ModuleDetail>) -> Self {
        Self {
            year: "2024-2025".to_string(),
            details,
            venues: HashMap::new(),
            venue_codes: HashMap::new(),
            failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// A catalog whose every call fails with the given status.
    pub fn failing(status: u16, status_text: &str) -> Self {
        let mut catalog = Self::new(Vec::new());
        catalog.failure = Some((status, status_text.to_string()));
        catalog
    }

    pub fn with_venues(mut self, semester: u32, venues: VenueInformation) -> Self {
        self.venues.insert(semester, venues);
        self
    }

    pub fn with_venue_codes(mut self, semester: u32, codes: &[&str]) -> Self {
        self.venue_codes
            .insert(semester, codes.iter().map(|c| c.to_string()).collect());
        self
    }

    /// Calls received so far, as `method(args)` strings.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> CatalogResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some((status, status_text)) => Err(CatalogError::network(*status, status_text.clone())),
            None => Ok(()),
        }
    }

    fn year<'a>(&'a self, year: Option<&'a str>) -> &'a str {
        year.unwrap_or(&self.year)
    }

    /// Catalog with a handful of realistic modules and one venue.
    pub fn sample() -> Self {
        let details: Vec<ModuleDetail> = serde_json::from_value(json!([
            {
                "moduleCode": "CS1010S",
                "title": "Programming Methodology",
                "description": "This module introduces the fundamental concepts of problem solving by computing.",
                "moduleCredit": "4",
                "department": "Computer Science",
                "faculty": "Computing",
                "workload": [2, 1, 1, 3, 3],
                "preclusion": "CS1010, CS1010E, CS1010X",
                "fulfillRequirements": ["CS2040S", "CS2030S"],
                "semesterData": [
                    {
                        "semester": 1,
                        "timetable": [
                            {"classNo": "1", "lessonType": "Lecture", "weeks": {"start": "2024-08-14", "end": "2024-11-13"}, "day": "Wednesday", "startTime": "1000", "endTime": "1200", "venue": "LT27"},
                            {"classNo": "T01", "lessonType": "Tutorial", "weeks": [3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13], "day": "Monday", "startTime": "0900", "endTime": "1000", "venue": "COM1-0207"},
                            {"classNo": "R01", "lessonType": "Recitation", "weeks": [2, 3, 4, 5, 6], "day": "Thursday", "startTime": "1200", "endTime": "1300", "venue": "COM1-0208"},
                            {"classNo": "T02", "lessonType": "Tutorial", "weeks": [3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13], "day": "Tuesday", "startTime": "1400", "endTime": "1500", "venue": "COM1-0209"}
                        ],
                        "examDate": "2024-11-27T01:00:00.000Z",
                        "examDuration": 120
                    },
                    {
                        "semester": 2,
                        "timetable": [
                            {"classNo": "1", "lessonType": "Lecture", "weeks": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13], "day": "Friday", "startTime": "1400", "endTime": "1600", "venue": "LT27"}
                        ]
                    }
                ]
            },
            {
                "moduleCode": "CS2040S",
                "title": "Data Structures and Algorithms",
                "moduleCredit": "4",
                "department": "Computer Science",
                "faculty": "Computing",
                "workload": "Lectures and tutorials, around 10 hours a week",
                "prerequisite": "CS1010 or its equivalent, and MA1521",
                "corequisite": "CS2030S",
                "preclusion": "CS2040, CS2040C",
                "prereqTree": {"and": [{"or": ["CS1010", "CS1010S"]}, "MA1521"]},
                "semesterData": [
                    {"semester": 2, "timetable": []}
                ]
            },
            {
                "moduleCode": "MA1521",
                "title": "Calculus for Computing",
                "moduleCredit": "4",
                "department": "Mathematics",
                "faculty": "Science",
                "semesterData": [
                    {"semester": 1, "timetable": []}
                ]
            },
            {
                "moduleCode": "GEA1000",
                "title": "Quantitative Reasoning with Data",
                "moduleCredit": "4",
                "semesterData": [
                    {"semester": 1, "timetable": []},
                    {"semester": 2, "timetable": []}
                ]
            }
        ]))
        .unwrap();

        let venues: VenueInformation = serde_json::from_value(json!({
            "COM1-0207": {
                "classes": [
                    {"classNo": "T05", "lessonType": "Tutorial", "weeks": [3, 4, 5], "day": "Tuesday", "startTime": "1400", "endTime": "1500", "moduleCode": "CS2040S", "title": "Data Structures and Algorithms", "size": 20},
                    {"classNo": "T03", "lessonType": "Tutorial", "weeks": [3, 4, 5], "day": "Monday", "startTime": "1000", "endTime": "1100", "moduleCode": "CS1231S", "title": "Discrete Structures", "size": 20},
                    {"classNo": "T01", "lessonType": "Tutorial", "weeks": [3, 4, 5], "day": "Monday", "startTime": "0900", "endTime": "1000", "moduleCode": "CS1010S", "title": "Programming Methodology", "size": 20},
                    {"classNo": "X1", "lessonType": "Workshop", "weeks": [7], "day": "Sunday", "startTime": "1000", "endTime": "1200", "moduleCode": "CS1010S", "title": "Programming Methodology", "size": 40},
                    {"classNo": "L1", "lessonType": "Laboratory", "weeks": {"start": "2024-08-16", "end": "2024-11-15"}, "day": "Friday", "startTime": "0800", "endTime": "1000", "moduleCode": "CS2100", "title": "Computer Organisation", "size": 25}
                ],
                "availability": {}
            }
        }))
        .unwrap();

        Self::new(details)
            .with_venues(1, venues)
            .with_venue_codes(
                1,
                &[
                    "COM1-0201", "COM1-0202", "COM1-0203", "COM1-0204", "COM1-0205",
                    "COM1-0206", "COM1-0207", "LT27", "E-Learn_A",
                ],
            )
    }
}

#[async_trait]
impl CatalogApi for StaticCatalog {
    fn current_year(&self) -> &str {
        &self.year
    }

    async fn list_modules(&self, year: Option<&str>) -> CatalogResult<Vec<ModuleSummary>> {
        self.record(format!("list_modules({})", self.year(year)))?;
        Ok(self
            .details
            .iter()
            .map(|m| ModuleSummary {
                module_code: m.module_code.clone(),
                title: m.title.clone(),
                semesters: m.semester_numbers(),
                module_credit: Some(m.module_credit.clone()),
                department: m.department.clone(),
                faculty: m.faculty.clone(),
            })
            .collect())
    }

    async fn get_module(&self, code: &str, year: Option<&str>) -> CatalogResult<ModuleDetail> {
        let year = self.year(year);
        self.record(format!("get_module({code}, {year})"))?;
        self.details
            .iter()
            .find(|m| m.module_code == code)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(format!("Module {code} ({year})")))
    }

    async fn list_module_details(&self, year: Option<&str>) -> CatalogResult<Vec<ModuleDetail>> {
        self.record(format!("list_module_details({})", self.year(year)))?;
        Ok(self.details.clone())
    }

    async fn venue_information(
        &self,
        semester: u32,
        year: Option<&str>,
    ) -> CatalogResult<VenueInformation> {
        self.record(format!("venue_information({semester}, {})", self.year(year)))?;
        Ok(self.venues.get(&semester).cloned().unwrap_or_default())
    }

    async fn list_venues(&self, semester: u32, year: Option<&str>) -> CatalogResult<Vec<String>> {
        self.record(format!("list_venues({semester}, {})", self.year(year)))?;
        Ok(self.venue_codes.get(&semester).cloned().unwrap_or_default())
    }
}
