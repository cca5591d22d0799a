//! Catalog API client.
//!
//! `CatalogApi` is the seam between the tool dispatcher and the catalog.
//! `CatalogClient` implements it over HTTP with one request per call: no
//! retries, no caching, no timeout beyond what the transport imposes.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::error::CatalogError;
use super::models::{ModuleDetail, ModuleSummary, VenueInformation};
use crate::core::config::CatalogConfig;

/// Result type for catalog fetches.
pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Read access to the course catalog.
///
/// Every method takes an optional academic year; `None` means the year the
/// implementation was configured with.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// The academic year used when a call passes `None`.
    fn current_year(&self) -> &str;

    async fn list_modules(&self, year: Option<&str>) -> CatalogResult<Vec<ModuleSummary>>;

    /// Fetch one module. A 404 surfaces as [`CatalogError::NotFound`].
    async fn get_module(&self, code: &str, year: Option<&str>) -> CatalogResult<ModuleDetail>;

    async fn list_module_details(&self, year: Option<&str>) -> CatalogResult<Vec<ModuleDetail>>;

    async fn venue_information(
        &self,
        semester: u32,
        year: Option<&str>,
    ) -> CatalogResult<VenueInformation>;

    async fn list_venues(&self, semester: u32, year: Option<&str>) -> CatalogResult<Vec<String>>;

    /// Search a module list, fetching the list for `year` when none is given.
    async fn search(
        &self,
        query: &str,
        modules: Option<Vec<ModuleSummary>>,
        year: Option<&str>,
    ) -> CatalogResult<Vec<ModuleSummary>> {
        let modules = match modules {
            Some(modules) => modules,
            None => self.list_modules(year).await?,
        };
        Ok(search_modules(query, modules))
    }

    /// Modules whose department contains `department`, optionally restricted
    /// to those offered in `semester`.
    async fn by_department(
        &self,
        department: &str,
        semester: Option<u32>,
        year: Option<&str>,
    ) -> CatalogResult<Vec<ModuleDetail>> {
        let modules = self.list_module_details(year).await?;
        Ok(filter_by_department(department, semester, modules))
    }
}

/// Keep modules whose code, title, department or faculty contains `query`,
/// ignoring case. An empty query keeps everything.
pub fn search_modules(query: &str, modules: Vec<ModuleSummary>) -> Vec<ModuleSummary> {
    let needle = query.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&needle);

    modules
        .into_iter()
        .filter(|m| {
            contains(m.module_code.as_str())
                || contains(m.title.as_str())
                || m.department.as_deref().is_some_and(contains)
                || m.faculty.as_deref().is_some_and(contains)
        })
        .collect()
}

/// Keep modules whose department contains `department` (ignoring case) and,
/// when a semester is given, that have a record for it.
pub fn filter_by_department(
    department: &str,
    semester: Option<u32>,
    modules: Vec<ModuleDetail>,
) -> Vec<ModuleDetail> {
    let needle = department.to_lowercase();

    modules
        .into_iter()
        .filter(|m| {
            m.department
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
        })
        .filter(|m| semester.is_none_or(|s| m.is_offered_in(s)))
        .collect()
}

/// HTTP implementation of [`CatalogApi`].
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    acad_year: String,
}

impl CatalogClient {
    /// Build a client for the configured base URL and academic year.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            acad_year: config.acad_year.clone(),
        })
    }

    fn year<'a>(&'a self, year: Option<&'a str>) -> &'a str {
        year.filter(|y| !y.is_empty()).unwrap_or(&self.acad_year)
    }

    fn url(&self, year: &str, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, year, path)
    }

    pub fn module_list_url(&self, year: Option<&str>) -> String {
        self.url(self.year(year), "moduleList.json")
    }

    pub fn module_url(&self, code: &str, year: Option<&str>) -> String {
        self.url(self.year(year), &format!("modules/{code}.json"))
    }

    pub fn module_information_url(&self, year: Option<&str>) -> String {
        self.url(self.year(year), "moduleInformation.json")
    }

    pub fn venue_information_url(&self, semester: u32, year: Option<&str>) -> String {
        self.url(
            self.year(year),
            &format!("semesters/{semester}/venueInformation.json"),
        )
    }

    pub fn venues_url(&self, semester: u32, year: Option<&str>) -> String {
        self.url(self.year(year), &format!("semesters/{semester}/venues.json"))
    }

    /// GET `url` and decode its JSON body. `what` names the entity for the
    /// 404 message.
    #[instrument(skip(self, what))]
    async fn fetch_json<T: DeserializeOwned>(&self, url: &str, what: String) -> CatalogResult<T> {
        debug!("Fetching {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if let Some(err) = status_error(status, what) {
            debug!("Catalog answered {} for {}", status, url);
            return Err(err);
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes from {}", body.len(), url);

        serde_json::from_slice(&body).map_err(|source| CatalogError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Map a response status onto the catalog error taxonomy.
fn status_error(status: StatusCode, what: String) -> Option<CatalogError> {
    if status.is_success() {
        None
    } else if status == StatusCode::NOT_FOUND {
        Some(CatalogError::not_found(what))
    } else {
        Some(CatalogError::network(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status"),
        ))
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    fn current_year(&self) -> &str {
        &self.acad_year
    }

    async fn list_modules(&self, year: Option<&str>) -> CatalogResult<Vec<ModuleSummary>> {
        let what = format!("Module list for {}", self.year(year));
        self.fetch_json(&self.module_list_url(year), what).await
    }

    async fn get_module(&self, code: &str, year: Option<&str>) -> CatalogResult<ModuleDetail> {
        let what = format!("Module {} ({})", code, self.year(year));
        self.fetch_json(&self.module_url(code, year), what).await
    }

    async fn list_module_details(&self, year: Option<&str>) -> CatalogResult<Vec<ModuleDetail>> {
        let what = format!("Module information for {}", self.year(year));
        self.fetch_json(&self.module_information_url(year), what)
            .await
    }

    async fn venue_information(
        &self,
        semester: u32,
        year: Option<&str>,
    ) -> CatalogResult<VenueInformation> {
        let what = format!(
            "Venue information for Semester {} ({})",
            semester,
            self.year(year)
        );
        self.fetch_json(&self.venue_information_url(semester, year), what)
            .await
    }

    async fn list_venues(&self, semester: u32, year: Option<&str>) -> CatalogResult<Vec<String>> {
        let what = format!("Venue list for Semester {} ({})", semester, self.year(year));
        self.fetch_json(&self.venues_url(semester, year), what).await
    }
}
