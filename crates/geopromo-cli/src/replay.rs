//! File-backed location provider.
//!
//! Reads a YAML list of samples and pushes them over a channel from a
//! background task, the way a device subscription would deliver them.

use std::path::Path;
use std::time::Duration;

use geopromo_core::Coordinate;
use geopromo_geofence::{LocationError, LocationSample};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;

const SAMPLE_BUFFER: usize = 16;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read samples file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse samples file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// One entry of a samples file: either a fix or a provider failure.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SampleEntry {
    Failure { error: LocationError },
    Fix(Coordinate),
}

impl SampleEntry {
    fn into_sample(self) -> LocationSample {
        match self {
            SampleEntry::Failure { error } => Err(error),
            SampleEntry::Fix(coordinate) => Ok(coordinate),
        }
    }
}

/// Load samples from a YAML file.
///
/// # Errors
///
/// Returns `ReplayError` if the file cannot be read or parsed.
pub fn load_samples(path: &Path) -> Result<Vec<LocationSample>, ReplayError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReplayError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_samples(&content)
}

/// Parse samples from YAML text.
///
/// # Errors
///
/// Returns `ReplayError::Parse` if the text is not a list of samples.
pub fn parse_samples(content: &str) -> Result<Vec<LocationSample>, ReplayError> {
    let entries: Vec<SampleEntry> = serde_yaml::from_str(content)?;
    Ok(entries.into_iter().map(SampleEntry::into_sample).collect())
}

/// Spawns a task that delivers `samples` in order, waiting `interval` between
/// consecutive samples. Dropping the receiver stops the task.
pub fn spawn_replay(
    samples: Vec<LocationSample>,
    interval: Duration,
) -> mpsc::Receiver<LocationSample> {
    let (tx, rx) = mpsc::channel(SAMPLE_BUFFER);
    tokio::spawn(async move {
        for (i, sample) in samples.into_iter().enumerate() {
            if i > 0 && !interval.is_zero() {
                tokio::time::sleep(interval).await;
            }
            if tx.send(sample).await.is_err() {
                tracing::debug!(delivered = i, "sample receiver dropped; stopping replay");
                return;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &str = r"
- { latitude: 11.0168, longitude: 76.9558, accuracy: 12.0 }
- { error: permission-denied }
- { latitude: 0.0, longitude: 0.0 }
- { error: timeout }
";

    #[test]
    fn parses_fixes_and_failures() {
        let samples = parse_samples(SAMPLES).unwrap();
        assert_eq!(
            samples,
            [
                Ok(Coordinate::new(11.0168, 76.9558, 12.0)),
                Err(LocationError::PermissionDenied),
                Ok(Coordinate::new(0.0, 0.0, 0.0)),
                Err(LocationError::Timeout),
            ]
        );
    }

    #[test]
    fn rejects_unknown_failure_class() {
        let err = parse_samples("- { error: gps-on-fire }").unwrap_err();
        assert!(matches!(err, ReplayError::Parse(_)));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = load_samples(Path::new("/nonexistent/samples.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/samples.yaml"));
    }

    #[test]
    fn shipped_samples_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("samples.yaml");
        let samples = load_samples(&path).unwrap();
        assert_eq!(samples.len(), 8);
        assert!(samples.iter().any(Result::is_err));
    }

    #[tokio::test]
    async fn replay_delivers_samples_in_order() {
        let samples = parse_samples(SAMPLES).unwrap();
        let mut rx = spawn_replay(samples.clone(), Duration::ZERO);

        let mut received = Vec::new();
        while let Some(sample) = rx.recv().await {
            received.push(sample);
        }
        assert_eq!(received, samples);
    }

    #[tokio::test(start_paused = true)]
    async fn replay_waits_between_samples() {
        let samples = parse_samples(SAMPLES).unwrap();
        let start = tokio::time::Instant::now();
        let mut rx = spawn_replay(samples, Duration::from_millis(500));

        let mut count = 0;
        while rx.recv().await.is_some() {
            count += 1;
        }
        assert_eq!(count, 4);
        assert!(start.elapsed() >= Duration::from_millis(1_500));
    }
}
