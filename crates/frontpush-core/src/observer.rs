//! Latency reporting for push calls.

use std::fmt;

/// Default histogram name used by [`MetricsHistogram`].
pub const DEFAULT_HISTOGRAM_NAME: &str = "frontpush_push_duration_ms";

/// Labels attached to a single latency observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushLabels<'a> {
    /// Path component of the target address, `/` when the address has none.
    pub route: &'a str,
    /// HTTP method used for the call.
    pub method: &'a str,
    /// Resulting status code (500 when no response was received).
    pub status: u16,
}

/// Receives one latency observation per push call.
pub trait LatencyObserver: Send + Sync {
    /// Records the elapsed wall-clock time of a call in whole milliseconds.
    fn observe(&self, labels: PushLabels<'_>, elapsed_ms: u64);
}

/// [`LatencyObserver`] backed by the `metrics` facade.
///
/// Observations go to whichever recorder the application installed; without
/// one they are dropped.
#[derive(Clone)]
pub struct MetricsHistogram {
    name: String,
}

impl MetricsHistogram {
    /// Creates a histogram sink with the given metric name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the metric name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for MetricsHistogram {
    fn default() -> Self {
        Self::new(DEFAULT_HISTOGRAM_NAME)
    }
}

impl fmt::Debug for MetricsHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricsHistogram")
            .field("name", &self.name)
            .finish()
    }
}

impl LatencyObserver for MetricsHistogram {
    fn observe(&self, labels: PushLabels<'_>, elapsed_ms: u64) {
        metrics::histogram!(
            self.name.clone(),
            "route" => labels.route.to_owned(),
            "method" => labels.method.to_owned(),
            "status" => labels.status.to_string()
        )
        .record(elapsed_ms as f64);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use metrics::{
        Counter, Gauge, Histogram, HistogramFn, Key, KeyName, Metadata, Recorder, SharedString,
        Unit,
    };

    use super::*;

    type Samples = Arc<Mutex<Vec<(Key, f64)>>>;

    /// Recorder keeping every histogram sample with its key.
    #[derive(Default)]
    struct CapturingRecorder {
        samples: Samples,
    }

    struct CapturedHistogram {
        key: Key,
        samples: Samples,
    }

    impl HistogramFn for CapturedHistogram {
        fn record(&self, value: f64) {
            self.samples
                .lock()
                .unwrap()
                .push((self.key.clone(), value));
        }
    }

    impl Recorder for CapturingRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, _: &Key, _: &Metadata<'_>) -> Counter {
            Counter::noop()
        }

        fn register_gauge(&self, _: &Key, _: &Metadata<'_>) -> Gauge {
            Gauge::noop()
        }

        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            Histogram::from_arc(Arc::new(CapturedHistogram {
                key: key.clone(),
                samples: Arc::clone(&self.samples),
            }))
        }
    }

    #[test]
    fn test_default_name() {
        assert_eq!(MetricsHistogram::default().name(), DEFAULT_HISTOGRAM_NAME);
    }

    #[test]
    fn test_observe_records_labelled_sample() {
        let recorder = CapturingRecorder::default();
        let histogram = MetricsHistogram::new("test_push_duration_ms");
        let labels = PushLabels {
            route: "/echo",
            method: "POST",
            status: 200,
        };

        metrics::with_local_recorder(&recorder, || histogram.observe(labels, 12));

        let samples = recorder.samples.lock().unwrap();
        assert_eq!(samples.len(), 1);

        let (key, value) = &samples[0];
        assert_eq!(key.name(), "test_push_duration_ms");
        assert_eq!(*value, 12.0);

        let recorded: Vec<_> = key
            .labels()
            .map(|label| (label.key().to_owned(), label.value().to_owned()))
            .collect();
        assert_eq!(
            recorded,
            [
                ("route".to_owned(), "/echo".to_owned()),
                ("method".to_owned(), "POST".to_owned()),
                ("status".to_owned(), "200".to_owned()),
            ]
        );
    }
}
