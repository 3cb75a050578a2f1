// src/pipeline.rs
//! One digest run: fetch, render, send. Any failure ends the run.

use tracing::{info, warn};

use crate::core::config_manager::DigestConfig;
use crate::digest::{DigestRenderer, EmailMessage, Mailer};
use crate::error::Result;
use crate::job_search::JobSource;

/// Summary of a run that ended with the digest handed to the mailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub postings: usize,
    pub recipient: String,
    pub subject: String,
}

pub async fn run<S, M>(config: &DigestConfig, source: &S, mailer: &M) -> Result<RunReport>
where
    S: JobSource,
    M: Mailer,
{
    let postings = match source.fetch(&config.criteria).await {
        Ok(postings) => postings,
        Err(e) => {
            warn!("Job search failed, aborting without sending a digest");
            return Err(e);
        }
    };

    let html_body = DigestRenderer::render_html(&postings, &config.criteria);
    let message = EmailMessage::digest(config, html_body);
    info!(postings = postings.len(), "Digest rendered");

    mailer.send(&message).await?;

    Ok(RunReport {
        postings: postings.len(),
        recipient: message.recipient,
        subject: message.subject,
    })
}
