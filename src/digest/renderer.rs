// src/digest/renderer.rs
//! Digest HTML built by plain string concatenation.

use crate::core::config_manager::SearchCriteria;
use crate::job_search::JobPosting;
use crate::utils::html_escape;

const ALL_LOCATIONS: &str = "전체";
const ANY_EXPERIENCE: &str = "무관";

pub struct DigestRenderer;

impl DigestRenderer {
    /// Render the digest body. Postings keep the order the API returned them in.
    pub fn render_html(postings: &[JobPosting], criteria: &SearchCriteria) -> String {
        if postings.is_empty() {
            return Self::no_results(criteria);
        }

        let mut body = format!(
            "<h2>'{}' 최신 채용 공고 (상위 {}개)</h2>",
            html_escape(&criteria.keyword),
            postings.len()
        );
        body.push_str(&format!(
            "<p>{}</p>",
            html_escape(&Self::describe_criteria(criteria))
        ));

        body.push_str("<ul>");
        for posting in postings {
            body.push_str(&Self::render_posting(posting));
        }
        body.push_str("</ul>");

        body
    }

    /// Sentence sent when the search came back empty.
    pub fn no_results(criteria: &SearchCriteria) -> String {
        format!(
            "'{}' 키워드에 대한 새로운 채용 공고가 없습니다.",
            html_escape(&criteria.keyword)
        )
    }

    /// One-line summary of the active filters.
    pub fn describe_criteria(criteria: &SearchCriteria) -> String {
        let locations = if criteria.locations.is_empty() {
            ALL_LOCATIONS.to_string()
        } else {
            criteria.locations.join(", ")
        };

        let experience = match criteria.min_experience_years {
            Some(years) => format!("{}년 이상", years),
            None => ANY_EXPERIENCE.to_string(),
        };

        format!(
            "검색 조건: 지역 {} / 경력 {} / 키워드 '{}'",
            locations, experience, criteria.keyword
        )
    }

    fn render_posting(posting: &JobPosting) -> String {
        let position = html_escape(posting.position_or_placeholder());
        let title = match posting.link() {
            Some(link) => format!("<a href=\"{}\"><b>{}</b></a>", html_escape(&link), position),
            None => format!("<b>{}</b>", position),
        };

        format!(
            "<li>{} - {} ({})</li>",
            title,
            html_escape(posting.company_or_placeholder()),
            html_escape(posting.location_or_placeholder())
        )
    }
}
