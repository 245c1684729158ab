//! End-to-end scans over image files on disk

use image::{Rgba, RgbaImage};
use spamlens_cli::{submissions, Report};
use spamlens_engine::{EngineConfig, JitterMode, SpamAnalyzer};
use std::path::{Path, PathBuf};

fn analyzer() -> SpamAnalyzer {
    let config = EngineConfig {
        jitter: JitterMode::None,
        max_parallel_images: 2,
        ..Default::default()
    };
    SpamAnalyzer::new(&config).unwrap()
}

fn write_png(dir: &Path, name: &str, color: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(100, 100, Rgba(color))
        .save(&path)
        .unwrap();
    path
}

#[tokio::test]
async fn test_scan_mixed_files() {
    let dir = tempfile::tempdir().unwrap();
    let poster = write_png(dir.path(), "poster.png", [255, 230, 0, 255]);
    let broken = dir.path().join("broken.png");
    std::fs::write(&broken, b"\x89PNG truncated").unwrap();
    let blank = write_png(dir.path(), "blank.png", [255, 255, 255, 255]);

    let batch = analyzer()
        .analyze_image_batch(submissions(&[poster, broken, blank]))
        .await;

    assert_eq!(batch.len(), 3);
    assert_eq!(batch.results[0].file_name, "poster.png");
    assert!(batch.results[0].analysis.is_spam);
    assert_eq!(batch.results[0].analysis.spam_probability, 55.0);

    assert_eq!(batch.results[1].image_id, "image-2");
    assert_eq!(batch.results[1].analysis.confidence, 0.0);
    assert!(batch.results[1].analysis.error.is_some());

    assert!(!batch.results[2].analysis.is_spam);
    assert_eq!(batch.results[2].analysis.confidence, 30.0);

    assert!((batch.average_confidence - 85.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_scan_report() {
    let dir = tempfile::tempdir().unwrap();
    let poster = write_png(dir.path(), "poster.png", [255, 230, 0, 255]);

    let analysis = analyzer()
        .analyze_both(
            Some("Quarterly planning notes attached for review."),
            submissions(&[poster]),
        )
        .await;
    let report = Report::from(analysis);

    assert!(report.any_spam);
    assert!(report.overall_confidence.is_none());

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["imageResults"]["results"][0]["fileName"], "poster.png");
    assert!(json["textResult"]["isSpam"].is_boolean());
    assert!(json["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .any(|r| r["text"] == "1 suspicious image(s) detected - do not trust content"));
}
