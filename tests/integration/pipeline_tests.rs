/*!
 * End-to-end pipeline tests: enrichment followed by publishing
 * on the same document path, using mock providers throughout
 */

use anyhow::Result;
use mdpress::app_config::PublishMode;
use mdpress::enrichment::Enricher;
use mdpress::publisher::Publisher;
use crate::common;
use crate::common::mock_providers::{MockEndpoint, MockImageSource};

/// Test the full two-stage run: images inserted, then both articles
/// simulated with no endpoint traffic
#[tokio::test]
async fn test_pipeline_withTwoArticleDocument_shouldEnrichThenSimulate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(&temp_dir.path().to_path_buf(), "history.md")?;

    // Phase 1: enrichment persists to the path
    let source = MockImageSource::returning("primary", "https://img.example/found.jpg");
    let enricher = Enricher::new(vec![Box::new(source)]);
    let enrich_report = enricher.enrich_file(&path).await?;

    assert_eq!(enrich_report.inserted, 2);

    // Phase 2: publishing reads the path fresh
    let endpoint = MockEndpoint::new();
    let tracker = endpoint.tracker();
    let publisher = Publisher::new(Box::new(endpoint), PublishMode::Simulated);
    let publish_report = publisher.publish_file(&path).await?;

    assert_eq!(publish_report.articles, 2);
    assert_eq!(publish_report.simulated, 2);
    assert_eq!(tracker.lock().unwrap().call_count, 0);

    // The inserted image reference flows into the published content
    let enriched = std::fs::read_to_string(&path)?;
    assert!(enriched.contains("![木村伊兵衛 (Ihei Kimura)](https://img.example/found.jpg)"));
    Ok(())
}

/// Test that a second enrichment run over the same file changes nothing
#[tokio::test]
async fn test_pipeline_withRerun_shouldBeIdempotent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(&temp_dir.path().to_path_buf(), "history.md")?;

    let source = MockImageSource::returning("primary", "https://img.example/found.jpg");
    let enricher = Enricher::new(vec![Box::new(source)]);
    enricher.enrich_file(&path).await?;
    let first_pass = std::fs::read_to_string(&path)?;

    let source = MockImageSource::returning("primary", "https://img.example/found.jpg");
    let tracker = source.tracker();
    let enricher = Enricher::new(vec![Box::new(source)]);
    let report = enricher.enrich_file(&path).await?;
    let second_pass = std::fs::read_to_string(&path)?;

    assert_eq!(second_pass, first_pass);
    assert_eq!(report.skipped, 2);
    assert_eq!(tracker.lock().unwrap().call_count, 0);
    Ok(())
}

/// Test that live publishing after enrichment submits both articles
/// and a mid-batch failure is isolated to its article
#[tokio::test]
async fn test_pipeline_withLiveFailure_shouldIsolateFailedArticle() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_document(&temp_dir.path().to_path_buf(), "history.md")?;

    let enricher = Enricher::new(vec![Box::new(MockImageSource::empty("primary"))]);
    enricher.enrich_file(&path).await?;

    let endpoint = MockEndpoint::failing_on(vec![0]);
    let tracker = endpoint.tracker();
    let publisher = Publisher::new(Box::new(endpoint), PublishMode::Live);
    let report = publisher.publish_file(&path).await?;

    assert_eq!(report.articles, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.submitted, 1);
    assert_eq!(tracker.lock().unwrap().call_count, 2);
    Ok(())
}
