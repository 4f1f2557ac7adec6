/*!
 * Tests for article publishing and simulated mode
 */

use anyhow::Result;
use mdpress::app_config::PublishMode;
use mdpress::publisher::Publisher;
use crate::common;
use crate::common::mock_providers::MockEndpoint;

/// Test that simulated mode performs zero endpoint calls and counts
/// one simulated notice per article
#[tokio::test]
async fn test_publish_file_withSimulatedMode_shouldNotCallEndpoint() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(&temp_dir.path().to_path_buf(), "history.md")?;

    let endpoint = MockEndpoint::new();
    let tracker = endpoint.tracker();
    let publisher = Publisher::new(Box::new(endpoint), PublishMode::Simulated);

    let report = publisher.publish_file(&path).await?;

    assert_eq!(report.articles, 2);
    assert_eq!(report.simulated, 2);
    assert_eq!(report.submitted, 0);
    assert_eq!(tracker.lock().unwrap().call_count, 0);
    Ok(())
}

/// Test that live mode submits every article in document order
#[tokio::test]
async fn test_publish_file_withLiveMode_shouldSubmitArticlesInOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(&temp_dir.path().to_path_buf(), "history.md")?;

    let endpoint = MockEndpoint::new();
    let tracker = endpoint.tracker();
    let publisher = Publisher::new(Box::new(endpoint), PublishMode::Live);

    let report = publisher.publish_file(&path).await?;

    assert_eq!(report.submitted, 2);
    assert_eq!(report.failed, 0);

    let tracker = tracker.lock().unwrap();
    assert_eq!(tracker.titles, vec!["光と影の記録者", "リアリズムの系譜"]);
    Ok(())
}

/// Test that a failure on the first article does not prevent the second
/// from being submitted
#[tokio::test]
async fn test_publish_file_withFailingFirstArticle_shouldContinueBatch() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(&temp_dir.path().to_path_buf(), "history.md")?;

    let endpoint = MockEndpoint::failing_on(vec![0]);
    let tracker = endpoint.tracker();
    let publisher = Publisher::new(Box::new(endpoint), PublishMode::Live);

    let report = publisher.publish_file(&path).await?;

    assert_eq!(report.failed, 1);
    assert_eq!(report.submitted, 1);

    // Both articles reached the endpoint, in order
    let tracker = tracker.lock().unwrap();
    assert_eq!(tracker.call_count, 2);
    assert_eq!(tracker.titles[1], "リアリズムの系譜");
    Ok(())
}

/// Test that a missing file is reported as a no-op instead of an error
#[tokio::test]
async fn test_publish_file_withMissingFile_shouldNoOp() -> Result<()> {
    let endpoint = MockEndpoint::new();
    let tracker = endpoint.tracker();
    let publisher = Publisher::new(Box::new(endpoint), PublishMode::Live);

    let report = publisher.publish_file("./no_such_document_12345.md").await?;

    assert_eq!(report.articles, 0);
    assert_eq!(tracker.lock().unwrap().call_count, 0);
    Ok(())
}

/// Test that a document without markers publishes nothing
#[tokio::test]
async fn test_publish_file_withNoMarkers_shouldSubmitNothing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        &temp_dir.path().to_path_buf(),
        "plain.md",
        "# 見出し\n\nマーカーのない文書。\n",
    )?;

    let endpoint = MockEndpoint::new();
    let tracker = endpoint.tracker();
    let publisher = Publisher::new(Box::new(endpoint), PublishMode::Live);

    let report = publisher.publish_file(&path).await?;

    assert_eq!(report.articles, 0);
    assert_eq!(tracker.lock().unwrap().call_count, 0);
    Ok(())
}
