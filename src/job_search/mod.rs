// src/job_search/mod.rs
use crate::core::config_manager::SearchCriteria;
use crate::error::Result;

pub mod fetcher;
pub mod types;

pub use fetcher::WantedClient;

/// Shown in place of any field the job API left out.
pub const PLACEHOLDER: &str = "정보 없음";

/// Public page of a single posting.
pub const POSTING_URL_BASE: &str = "https://www.wanted.co.kr/wd/";

/// One job listing as returned by the search API.
///
/// Every field is optional because the API schema is not under our control;
/// the accessors apply the documented fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPosting {
    pub id: Option<String>,
    pub position: Option<String>,
    pub company_name: Option<String>,
    pub short_location: Option<String>,
}

impl JobPosting {
    pub fn position_or_placeholder(&self) -> &str {
        non_blank(&self.position)
    }

    pub fn company_or_placeholder(&self) -> &str {
        non_blank(&self.company_name)
    }

    pub fn location_or_placeholder(&self) -> &str {
        non_blank(&self.short_location)
    }

    /// Link to the posting page. Only ids that are safe as a bare path
    /// segment get one.
    pub fn link(&self) -> Option<String> {
        self.id
            .as_deref()
            .filter(|id| is_path_safe(id))
            .map(|id| format!("{}{}", POSTING_URL_BASE, id))
    }
}

fn is_path_safe(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn non_blank(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER,
    }
}

/// Anything that can answer a job search with a single request.
///
/// `Ok(vec![])` means the search matched nothing; a failed request is an `Err`.
#[allow(async_fn_in_trait)]
pub trait JobSource {
    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<JobPosting>>;
}
