//! Query dispatcher.
//!
//! Maps a tool call onto catalog fetches and renderers. Every tool follows
//! the same shape: fetch, check the requested piece is there, render, wrap.
//! "Not offered" and "nothing matched" outcomes are ordinary text results;
//! only argument problems and catalog failures become errors, and `call`
//! turns those into an `Error: ...` payload as well.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use super::definitions::ToolKind;
use super::error::ToolError;
use super::format::{
    estimated_weekly_hours, extract_module_codes, format_module_detail, format_module_list,
    format_modules_by_department, format_prereq_tree, format_timetable, format_venue_list,
    format_venue_schedule, format_workload,
};
use super::params::{
    DepartmentParams, ModuleParams, ModuleSemesterParams, SearchModulesParams, SemesterParams,
    VenueScheduleParams, normalize_module_code,
};
use crate::core::config::CatalogConfig;
use crate::domains::catalog::{CatalogApi, Workload};

/// Raw argument object of a tool call.
pub type Arguments = Map<String, Value>;

type ToolResult = Result<String, ToolError>;

/// Turns tool calls into text reports.
///
/// Holds no mutable state; one instance serves concurrent calls.
pub struct QueryDispatcher {
    catalog: Arc<dyn CatalogApi>,
    settings: CatalogConfig,
}

fn parse<P: DeserializeOwned>(arguments: Arguments) -> Result<P, ToolError> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

impl QueryDispatcher {
    pub fn new(catalog: Arc<dyn CatalogApi>, settings: CatalogConfig) -> Self {
        Self { catalog, settings }
    }

    /// Run a tool and always produce text: failures become `Error: <message>`.
    #[instrument(skip(self, arguments))]
    pub async fn call(&self, name: &str, arguments: Option<Arguments>) -> String {
        info!("Tool called: {}", name);

        match self.dispatch(name, arguments).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                format!("Error: {e}")
            }
        }
    }

    /// Run a tool, keeping failures typed.
    pub async fn dispatch(&self, name: &str, arguments: Option<Arguments>) -> ToolResult {
        let arguments = arguments.ok_or(ToolError::MissingArguments)?;
        let kind = ToolKind::from_name(name).ok_or_else(|| ToolError::unknown_tool(name))?;

        match kind {
            ToolKind::SearchModules => self.search_modules(parse(arguments)?).await,
            ToolKind::GetModuleInfo => self.get_module_info(parse(arguments)?).await,
            ToolKind::GetModuleTimetable => self.get_module_timetable(parse(arguments)?).await,
            ToolKind::GetModulePrerequisites => {
                self.get_module_prerequisites(parse(arguments)?).await
            }
            ToolKind::ListModulesByDepartment => {
                self.list_modules_by_department(parse(arguments)?).await
            }
            ToolKind::GetVenueSchedule => self.get_venue_schedule(parse(arguments)?).await,
            ToolKind::ListAllVenues => self.list_all_venues(parse(arguments)?).await,
            ToolKind::CheckModuleAvailability => {
                self.check_module_availability(parse(arguments)?).await
            }
            ToolKind::GetModuleWorkload => self.get_module_workload(parse(arguments)?).await,
            ToolKind::FindConflictingModules => {
                self.find_conflicting_modules(parse(arguments)?).await
            }
        }
    }

    pub async fn search_modules(&self, params: SearchModulesParams) -> ToolResult {
        let limit = params.limit.unwrap_or(self.settings.search_limit).max(1);
        let matches = self
            .catalog
            .search(&params.query, None, params.acad_year.as_deref())
            .await?;

        let shown = matches.len().min(limit);
        if shown == 0 {
            return Ok(format!("No modules found matching \"{}\"", params.query));
        }

        Ok(format!(
            "Found {} modules matching \"{}\":\n\n{}",
            shown,
            params.query,
            format_module_list(&matches, Some(limit))
        ))
    }

    pub async fn get_module_info(&self, params: ModuleParams) -> ToolResult {
        let code = normalize_module_code(&params.module_code);
        let module = self
            .catalog
            .get_module(&code, params.acad_year.as_deref())
            .await?;

        Ok(format_module_detail(&module))
    }

    pub async fn get_module_timetable(&self, params: ModuleSemesterParams) -> ToolResult {
        let code = normalize_module_code(&params.module_code);
        let semester = params.semester;
        let module = self
            .catalog
            .get_module(&code, params.acad_year.as_deref())
            .await?;

        let Some(record) = module.semester(semester) else {
            return Ok(format!(
                "Module {code} is not offered in Semester {semester}"
            ));
        };

        let mut text = format!("**{code} - Semester {semester} Timetable**\n\n");
        if record.timetable.is_empty() {
            text.push_str("No classes scheduled.\n\n");
        } else {
            text.push_str(&format_timetable(&record.timetable));
        }

        if let Some(exam_date) = &record.exam_date {
            text.push_str(&format!(
                "**Exam:** {} ({} minutes)",
                exam_date,
                record.exam_duration.unwrap_or(0)
            ));
        }

        Ok(text)
    }

    pub async fn get_module_prerequisites(&self, params: ModuleParams) -> ToolResult {
        let code = normalize_module_code(&params.module_code);
        let module = self
            .catalog
            .get_module(&code, params.acad_year.as_deref())
            .await?;

        let mut text = format!("**Prerequisites for {code}:**\n\n");
        let mut has_info = false;

        if let Some(prerequisite) = &module.prerequisite {
            text.push_str(&format!("**Text Description:** {prerequisite}\n\n"));
            has_info = true;
        }

        let tree = module
            .prereq_tree
            .as_ref()
            .map(|tree| format_prereq_tree(tree, 0))
            .unwrap_or_default();
        if !tree.is_empty() {
            text.push_str(&format!("**Prerequisite Tree:**\n{tree}\n\n"));
            has_info = true;
        }

        if !module.fulfill_requirements.is_empty() {
            text.push_str("**This module fulfills prerequisites for:**\n");
            for fulfilled in &module.fulfill_requirements {
                text.push_str(&format!("  • {fulfilled}\n"));
            }
            has_info = true;
        }

        if !has_info {
            text.push_str("No prerequisite information available");
        }

        Ok(text)
    }

    pub async fn list_modules_by_department(&self, params: DepartmentParams) -> ToolResult {
        let modules = self
            .catalog
            .by_department(
                &params.department,
                params.semester,
                params.acad_year.as_deref(),
            )
            .await?;

        if modules.is_empty() {
            return Ok(match params.semester {
                Some(semester) => format!(
                    "No modules found for department \"{}\" in Semester {}",
                    params.department, semester
                ),
                None => format!("No modules found for department \"{}\"", params.department),
            });
        }

        Ok(format!(
            "**Modules by Department (matching \"{}\"):**\n\n{}",
            params.department,
            format_modules_by_department(&modules, self.settings.preview_limit)
        ))
    }

    pub async fn get_venue_schedule(&self, params: VenueScheduleParams) -> ToolResult {
        let venues = self
            .catalog
            .venue_information(params.semester, params.acad_year.as_deref())
            .await?;

        // exact, case-sensitive key
        match venues.get(&params.venue) {
            Some(record) => Ok(format!(
                "**Schedule for {} - Semester {}:**\n\n{}",
                params.venue,
                params.semester,
                format_venue_schedule(&record.classes)
            )),
            None => Ok(format!(
                "No schedule found for venue \"{}\" in Semester {}",
                params.venue, params.semester
            )),
        }
    }

    pub async fn list_all_venues(&self, params: SemesterParams) -> ToolResult {
        let venues = self
            .catalog
            .list_venues(params.semester, params.acad_year.as_deref())
            .await?;

        Ok(format!(
            "**Venues in Semester {}:**\n\n{}",
            params.semester,
            format_venue_list(&venues)
        ))
    }

    pub async fn check_module_availability(&self, params: ModuleSemesterParams) -> ToolResult {
        let code = normalize_module_code(&params.module_code);
        let semester = params.semester;
        let module = self
            .catalog
            .get_module(&code, params.acad_year.as_deref())
            .await?;

        let record = module.semester(semester);

        let mut text = format!("**{code} in Semester {semester}:**\n\n");
        text.push_str(match record {
            Some(_) => "✅ Module is offered\n\n",
            None => "❌ Module is NOT offered\n\n",
        });
        text.push_str(&format!(
            "**Available semesters:** {}\n",
            module
                .semester_numbers()
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ));

        if let Some(record) = record {
            let mut lesson_types: Vec<&str> = Vec::new();
            for lesson in &record.timetable {
                if !lesson_types.contains(&lesson.lesson_type.as_str()) {
                    lesson_types.push(&lesson.lesson_type);
                }
            }
            text.push_str(&format!("**Class types:** {}\n", lesson_types.join(", ")));

            match &record.exam_date {
                Some(exam_date) => text.push_str(&format!("**Has final exam:** Yes ({exam_date})")),
                None => text.push_str("**Has final exam:** No"),
            }
        }

        Ok(text)
    }

    pub async fn get_module_workload(&self, params: ModuleParams) -> ToolResult {
        let code = normalize_module_code(&params.module_code);
        let module = self
            .catalog
            .get_module(&code, params.acad_year.as_deref())
            .await?;

        let mut text = format!("**Workload for {code}:**\n\n");
        text.push_str(&format!("**Module Credits:** {} MCs\n", module.module_credit));

        // the estimate is part of the renderer's output when no data exists
        if module.workload != Workload::Unknown {
            if let Some(hours) = estimated_weekly_hours(&module.module_credit) {
                text.push_str(&format!("**Expected hours/week:** {hours} hours\n"));
            }
        }
        text.push('\n');
        text.push_str(&format_workload(&module.workload, &module.module_credit));

        Ok(text)
    }

    pub async fn find_conflicting_modules(&self, params: ModuleParams) -> ToolResult {
        let code = normalize_module_code(&params.module_code);
        let module = self
            .catalog
            .get_module(&code, params.acad_year.as_deref())
            .await?;

        let mut text = format!("**Conflicts and Restrictions for {code}:**\n\n");

        if let Some(preclusion) = &module.preclusion {
            text.push_str(&format!(
                "**Preclusions (cannot take together):**\n{preclusion}\n\n"
            ));

            let codes = extract_module_codes(preclusion);
            if !codes.is_empty() {
                text.push_str("**Detected preclusion codes:**\n");
                for precluded in codes {
                    text.push_str(&format!("  • {precluded}\n"));
                }
                text.push('\n');
            }
        }

        if let Some(corequisite) = &module.corequisite {
            text.push_str(&format!(
                "**Corequisites (must take together):**\n{corequisite}\n\n"
            ));
        }

        if module.preclusion.is_none() && module.corequisite.is_none() {
            text.push_str("No preclusions or corequisites found for this module.");
        }

        Ok(text)
    }
}
