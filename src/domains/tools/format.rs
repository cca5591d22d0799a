//! Text renderers for catalog entities.
//!
//! Pure functions: they never mutate their input and always produce the same
//! text for the same data. Grouping keeps the order in which a key is first
//! seen unless a renderer says otherwise.

use std::sync::LazyLock;

use regex::Regex;

use crate::domains::catalog::{
    Lesson, ModuleDetail, ModuleSummary, PrereqTree, VenueLesson, Weeks, Workload,
};

/// Teaching days in calendar order.
pub const DAY_ORDER: [&str; 6] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Venues listed per prefix before the overflow line.
const VENUE_PREVIEW_LIMIT: usize = 5;

/// Two or three capitals, four digits, optional capital suffix.
static MODULE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z]{2,3}[0-9]{4}[A-Z]?").expect("module code pattern is valid")
});

/// Group items by key, keeping keys and items in first-seen order.
fn group_by<'a, T, K, F>(items: &'a [T], key: F) -> Vec<(K, Vec<&'a T>)>
where
    K: PartialEq,
    F: Fn(&'a T) -> K,
{
    let mut groups: Vec<(K, Vec<&'a T>)> = Vec::new();
    for item in items {
        let k = key(item);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, members)) => members.push(item),
            None => groups.push((k, vec![item])),
        }
    }
    groups
}

fn join_semesters(semesters: &[u32]) -> String {
    semesters
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One bullet per module: `• CS1010S: Programming Methodology (Semesters: 1, 2)`.
pub fn format_module_list(modules: &[ModuleSummary], limit: Option<usize>) -> String {
    let shown = limit.unwrap_or(modules.len()).min(modules.len());

    modules[..shown]
        .iter()
        .map(|m| {
            format!(
                "• {}: {} (Semesters: {})",
                m.module_code,
                m.title,
                join_semesters(&m.semesters)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full description of one module.
pub fn format_module_detail(module: &ModuleDetail) -> String {
    let mut info = format!("**{}: {}**\n\n", module.module_code, module.title);
    info.push_str(&format!("**Credits:** {} MCs\n", module.module_credit));
    if let Some(department) = &module.department {
        info.push_str(&format!("**Department:** {department}\n"));
    }
    if let Some(faculty) = &module.faculty {
        info.push_str(&format!("**Faculty:** {faculty}\n"));
    }
    info.push_str(&format!(
        "\n**Description:**\n{}\n",
        module
            .description
            .as_deref()
            .unwrap_or("No description available")
    ));

    if let Some(prerequisite) = &module.prerequisite {
        info.push_str(&format!("\n**Prerequisites:** {prerequisite}\n"));
    }
    if let Some(corequisite) = &module.corequisite {
        info.push_str(&format!("**Corequisites:** {corequisite}\n"));
    }
    if let Some(preclusion) = &module.preclusion {
        info.push_str(&format!("**Preclusions:** {preclusion}\n"));
    }

    info.push_str(&format!(
        "\n**Offered in Semesters:** {}",
        join_semesters(&module.semester_numbers())
    ));
    info
}

/// Lessons grouped by lesson type; lessons keep their input order.
pub fn format_timetable(lessons: &[Lesson]) -> String {
    let mut result = String::new();

    for (lesson_type, group) in group_by(lessons, |l| l.lesson_type.as_str()) {
        result.push_str(&format!("**{lesson_type}:**\n"));
        for lesson in group {
            result.push_str(&format!(
                "  • Class {}: {} {}-{} @ {}\n",
                lesson.class_no, lesson.day, lesson.start_time, lesson.end_time, lesson.venue
            ));
            if let Weeks::Range(range) = &lesson.weeks {
                result.push_str(&format!("    ({} to {})\n", range.start, range.end));
            }
        }
        result.push('\n');
    }

    result
}

/// Render a prerequisite tree, two spaces of indentation per level.
pub fn format_prereq_tree(tree: &PrereqTree, indent: usize) -> String {
    match tree {
        PrereqTree::Module(code) => format!("{}• {}", "  ".repeat(indent), code),
        PrereqTree::All(children) => format_prereq_group("All of:", children, indent),
        PrereqTree::Any(children) => format_prereq_group("One of:", children, indent),
        PrereqTree::NOf(n, children) => format_prereq_group(&format!("{n} of:"), children, indent),
        PrereqTree::Unrecognized => String::new(),
    }
}

fn format_prereq_group(header: &str, children: &[PrereqTree], indent: usize) -> String {
    let rendered: Vec<String> = children
        .iter()
        .map(|child| format_prereq_tree(child, indent + 1))
        .filter(|text| !text.is_empty())
        .collect();

    if rendered.is_empty() {
        return String::new();
    }

    let mut result = format!("{}{}\n", "  ".repeat(indent), header);
    for child in rendered {
        result.push_str(child.trim_end());
        result.push('\n');
    }
    result.trim_end().to_string()
}

/// Venue classes by day, Monday to Saturday, each day sorted by start time.
///
/// Days outside the teaching week follow Saturday in first-seen order.
pub fn format_venue_schedule(lessons: &[VenueLesson]) -> String {
    let mut by_day = group_by(lessons, |l| l.day.as_str());
    by_day.sort_by_key(|(day, _)| {
        DAY_ORDER
            .iter()
            .position(|d| d == day)
            .unwrap_or(DAY_ORDER.len())
    });

    let mut result = String::new();
    for (day, mut day_lessons) in by_day {
        day_lessons.sort_by(|a, b| a.start_time.cmp(&b.start_time));

        result.push_str(&format!("**{day}:**\n"));
        for lesson in day_lessons {
            result.push_str(&format!(
                "  • {}-{}: {} ({} {})\n",
                lesson.start_time,
                lesson.end_time,
                lesson.module_code,
                lesson.lesson_type,
                lesson.class_no
            ));
        }
        result.push('\n');
    }

    result
}

/// Building prefix of a venue code: the part before the first `-`.
fn venue_prefix(venue: &str) -> &str {
    match venue.split_once('-') {
        Some((prefix, _)) if !prefix.is_empty() => prefix,
        _ => "Other",
    }
}

/// Venue codes grouped by building prefix, five per group before summarizing.
pub fn format_venue_list(venues: &[String]) -> String {
    let mut result = format!("Total venues: {}\n\n", venues.len());

    for (prefix, group) in group_by(venues, |v| venue_prefix(v)) {
        result.push_str(&format!("**{}:** {} venues\n", prefix, group.len()));
        for venue in group.iter().take(VENUE_PREVIEW_LIMIT) {
            result.push_str(&format!("  • {venue}\n"));
        }
        if group.len() > VENUE_PREVIEW_LIMIT {
            result.push_str(&format!(
                "  ... and {} more\n",
                group.len() - VENUE_PREVIEW_LIMIT
            ));
        }
        result.push('\n');
    }

    result
}

/// Modules grouped by department with up to `preview_limit` shown per group.
pub fn format_modules_by_department(modules: &[ModuleDetail], preview_limit: usize) -> String {
    if modules.is_empty() {
        return "No modules found".to_string();
    }

    let mut result = String::new();
    for (department, group) in group_by(modules, |m| m.department.as_deref().unwrap_or("Unknown")) {
        result.push_str(&format!("**{}:** {} modules\n", department, group.len()));
        for module in group.iter().take(preview_limit) {
            result.push_str(&format!("  • {}: {}\n", module.module_code, module.title));
        }
        if group.len() > preview_limit {
            result.push_str(&format!("  ... and {} more\n", group.len() - preview_limit));
        }
        result.push('\n');
    }

    result
}

/// Rule-of-thumb weekly hours: 2.5 per modular credit.
pub fn estimated_weekly_hours(module_credit: &str) -> Option<f64> {
    module_credit.trim().parse::<f64>().ok().map(|mc| mc * 2.5)
}

/// Workload breakdown, free-text description, or a credit-based estimate.
pub fn format_workload(workload: &Workload, module_credit: &str) -> String {
    match workload {
        Workload::Breakdown([lecture, tutorial, lab, project, preparation]) => {
            let total = lecture + tutorial + lab + project + preparation;
            format!(
                "**Breakdown (hours/week):**\n\
                 \x20 • Lectures: {lecture}\n\
                 \x20 • Tutorials: {tutorial}\n\
                 \x20 • Laboratory: {lab}\n\
                 \x20 • Project/Fieldwork: {project}\n\
                 \x20 • Preparation: {preparation}\n\
                 \x20 • **Total:** {total} hours/week"
            )
        }
        Workload::Description(text) => format!("**Workload description:** {text}"),
        Workload::Unknown => {
            let estimate = estimated_weekly_hours(module_credit)
                .map(|hours| format!("{hours} hours"))
                .unwrap_or_else(|| "unknown".to_string());
            format!(
                "**Expected hours/week:** {estimate}\n\n\
                 Detailed workload information not available in standard format."
            )
        }
    }
}

/// Every module-code-shaped token in `text`, in order, duplicates kept.
pub fn extract_module_codes(text: &str) -> Vec<String> {
    MODULE_CODE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
