//! Review orchestration: send a bundle to a [`Reviewer`] and save the answer.
//!
//! Transport lives behind the trait; this module only decides what is sent,
//! and where the result goes. One request per call, no retries.

use std::path::Path;

use tracing::{debug, info};

use crate::contract::{ReviewError, ReviewRequest, Reviewer};
use crate::write::save_string_to_file;

/// Review `code` with `reviewer` and write the review text to `output`.
pub async fn review_bundle<R>(reviewer: &R, code: &str, output: &Path) -> Result<String, ReviewError>
where
    R: Reviewer + ?Sized,
{
    if code.trim().is_empty() {
        return Err(ReviewError::EmptyBundle);
    }

    info!(bytes = code.len(), "Requesting code review");
    let response = reviewer
        .review(ReviewRequest {
            code: code.to_string(),
        })
        .await?;
    debug!(bytes = response.review.len(), "Received code review");

    save_string_to_file(&response.review, output)?;
    info!(output = %output.display(), "Saved code review");
    Ok(response.review)
}
