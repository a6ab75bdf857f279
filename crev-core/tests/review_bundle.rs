use crev_core::contract::{MockReviewer, ReviewError, ReviewRequest, ReviewResponse};
use crev_core::review::review_bundle;
use tempfile::tempdir;

#[tokio::test]
async fn test_review_bundle_saves_review() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("crev-review.md");

    let mut reviewer = MockReviewer::new();
    reviewer
        .expect_review()
        .withf(|req: &ReviewRequest| req.code.contains("fn main"))
        .times(1)
        .returning(|_| {
            Ok(ReviewResponse {
                review: "# Review\nLooks fine.".to_string(),
            })
        });

    let review = review_bundle(&reviewer, "Project Directory Structure:\nfn main() {}", &output)
        .await
        .expect("review should succeed");

    assert_eq!(review, "# Review\nLooks fine.");
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "# Review\nLooks fine."
    );
}

#[tokio::test]
async fn test_review_bundle_propagates_unauthorized_without_writing() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("crev-review.md");

    let mut reviewer = MockReviewer::new();
    reviewer
        .expect_review()
        .times(1)
        .returning(|_| Err(ReviewError::Unauthorized));

    let err = review_bundle(&reviewer, "code", &output).await.unwrap_err();
    assert!(matches!(err, ReviewError::Unauthorized));
    assert!(err.to_string().contains("invalid CREV API key"));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_review_bundle_rejects_empty_bundle() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("crev-review.md");

    let mut reviewer = MockReviewer::new();
    reviewer.expect_review().never();

    let err = review_bundle(&reviewer, "  \n", &output).await.unwrap_err();
    assert!(matches!(err, ReviewError::EmptyBundle));
}

#[tokio::test]
async fn test_review_bundle_reports_status_errors_verbatim() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("crev-review.md");

    let mut reviewer = MockReviewer::new();
    reviewer.expect_review().returning(|_| {
        Err(ReviewError::Status {
            status: 503,
            body: "upstream unavailable".to_string(),
        })
    });

    let err = review_bundle(&reviewer, "code", &output).await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("503"), "{msg}");
    assert!(msg.contains("upstream unavailable"), "{msg}");
}

#[tokio::test]
async fn test_review_bundle_save_failure_is_reported() {
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("missing-dir").join("crev-review.md");

    let mut reviewer = MockReviewer::new();
    reviewer.expect_review().returning(|_| {
        Ok(ReviewResponse {
            review: "ok".to_string(),
        })
    });

    let err = review_bundle(&reviewer, "code", &output).await.unwrap_err();
    assert!(matches!(err, ReviewError::Save(_)), "got {err:?}");
}
