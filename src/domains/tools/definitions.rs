//! Tool definitions.
//!
//! The fixed set of catalog tools with their wire names, descriptions and
//! input schemas. Schemas are derived from the parameter types in
//! `params.rs`, so a tool's schema and its deserializer cannot drift apart.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};

use super::params::{
    DepartmentParams, ModuleParams, ModuleSemesterParams, SearchModulesParams, SemesterParams,
    VenueScheduleParams,
};

/// Every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    SearchModules,
    GetModuleInfo,
    GetModuleTimetable,
    GetModulePrerequisites,
    ListModulesByDepartment,
    GetVenueSchedule,
    ListAllVenues,
    CheckModuleAvailability,
    GetModuleWorkload,
    FindConflictingModules,
}

impl ToolKind {
    /// All tools, in listing order.
    pub const ALL: [ToolKind; 10] = [
        Self::SearchModules,
        Self::GetModuleInfo,
        Self::GetModuleTimetable,
        Self::GetModulePrerequisites,
        Self::ListModulesByDepartment,
        Self::GetVenueSchedule,
        Self::ListAllVenues,
        Self::CheckModuleAvailability,
        Self::GetModuleWorkload,
        Self::FindConflictingModules,
    ];

    /// Tool name as registered in MCP.
    pub fn name(self) -> &'static str {
        match self {
            Self::SearchModules => "search_modules",
            Self::GetModuleInfo => "get_module_info",
            Self::GetModuleTimetable => "get_module_timetable",
            Self::GetModulePrerequisites => "get_module_prerequisites",
            Self::ListModulesByDepartment => "list_modules_by_department",
            Self::GetVenueSchedule => "get_venue_schedule",
            Self::ListAllVenues => "list_all_venues",
            Self::CheckModuleAvailability => "check_module_availability",
            Self::GetModuleWorkload => "get_module_workload",
            Self::FindConflictingModules => "find_conflicting_modules",
        }
    }

    /// Tool description shown to clients.
    pub fn description(self) -> &'static str {
        match self {
            Self::SearchModules => {
                "Search for modules by code, title, department or faculty"
            }
            Self::GetModuleInfo => "Get detailed information about a specific module",
            Self::GetModuleTimetable => {
                "Get the timetable of a module in one semester, grouped by lesson type"
            }
            Self::GetModulePrerequisites => {
                "Get prerequisites and the modules that this module fulfills"
            }
            Self::ListModulesByDepartment => "List all modules offered by a specific department",
            Self::GetVenueSchedule => {
                "Get the schedule of classes in a specific venue, by day of the week"
            }
            Self::ListAllVenues => "List all venues used in a semester, grouped by building",
            Self::CheckModuleAvailability => {
                "Check if a module is offered in a specific semester, with its class types and exam"
            }
            Self::GetModuleWorkload => "Get the weekly workload breakdown for a module",
            Self::FindConflictingModules => {
                "Find modules that are precluded by, or must be taken with, the given module"
            }
        }
    }

    /// Look a tool up by its registered name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// JSON schema of the tool's argument object.
    pub fn input_schema(self) -> Arc<JsonObject> {
        match self {
            Self::SearchModules => cached_schema_for_type::<SearchModulesParams>(),
            Self::GetModuleInfo
            | Self::GetModulePrerequisites
            | Self::GetModuleWorkload
            | Self::FindConflictingModules => cached_schema_for_type::<ModuleParams>(),
            Self::GetModuleTimetable | Self::CheckModuleAvailability => {
                cached_schema_for_type::<ModuleSemesterParams>()
            }
            Self::ListModulesByDepartment => cached_schema_for_type::<DepartmentParams>(),
            Self::GetVenueSchedule => cached_schema_for_type::<VenueScheduleParams>(),
            Self::ListAllVenues => cached_schema_for_type::<SemesterParams>(),
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(self) -> Tool {
        Tool {
            name: self.name().into(),
            description: Some(self.description().into()),
            input_schema: self.input_schema(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::from_name("get_weather"), None);
    }

    #[test]
    fn test_schema_lists_required_fields() {
        let schema = ToolKind::GetModuleTimetable.input_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"moduleCode"));
        assert!(required.contains(&"semester"));
        assert!(!required.contains(&"acadYear"));
    }

    #[test]
    fn test_tool_model() {
        let tool = ToolKind::SearchModules.to_tool();
        assert_eq!(tool.name, "search_modules");
        assert!(tool.input_schema["properties"]["query"].is_object());
    }
}
