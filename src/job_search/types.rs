// src/job_search/types.rs
use serde::Deserialize;
use serde_json::Value;

use super::JobPosting;

// Response body of the job search endpoint. Elements stay untyped so one
// malformed posting cannot fail the whole response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct JobsResponse {
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

impl JobsResponse {
    pub fn into_postings(self) -> Vec<JobPosting> {
        self.data
            .unwrap_or_default()
            .iter()
            .map(JobPosting::from_api)
            .collect()
    }
}

impl JobPosting {
    /// Read the rendered fields from one `data` element. Anything missing or of
    /// an unexpected type becomes `None`.
    pub(crate) fn from_api(job: &Value) -> Self {
        // Ids are numeric today, but accept strings too.
        let id = match job.get("id") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        Self {
            id,
            position: string_at(job, &["position"]),
            company_name: string_at(job, &["company", "name"]),
            short_location: string_at(job, &["address", "short_location"]),
        }
    }
}

fn string_at(value: &Value, path: &[&str]) -> Option<String> {
    path.iter()
        .try_fold(value, |current, key| current.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}
