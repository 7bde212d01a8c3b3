//! Per-label tallies for a classification run.
//!
//! The aggregator keeps one bucket per label, zero-initialized, and
//! increments exactly one bucket per successful classification. The final
//! [`ClassificationReport`] is what the pipeline hands to the external
//! reporting collaborator.

use crate::core::LabelSet;
use crate::inference::Prediction;
use serde::Serialize;
use std::fmt;

/// Final per-label counts for a completed run.
///
/// Covers every label in the table, including those left at zero. The
/// `Display` rendering is the end-of-run console summary: labels with a
/// nonzero count, then the total.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    labels: Vec<String>,
    counts: Vec<usize>,
    total: usize,
}

impl ClassificationReport {
    /// Count recorded for `label`, or None if the label is not in the table.
    pub fn count(&self, label: &str) -> Option<usize> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.counts[i])
    }

    /// Total number of successfully processed files.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Iterates (label, count) pairs in label-table order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter().copied())
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Classification summary:")?;
        for (label, count) in self.entries() {
            if count > 0 {
                writeln!(f, "  {}: {}", label, count)?;
            }
        }
        write!(f, "  Total processed: {}", self.total)
    }
}

/// Tallies predictions into fixed per-label buckets.
#[derive(Debug)]
pub struct StatsAggregator {
    labels: LabelSet,
    counts: Vec<usize>,
}

impl StatsAggregator {
    /// Creates an aggregator with every bucket at zero.
    pub fn new(labels: LabelSet) -> Self {
        let counts = vec![0; labels.len()];
        Self { labels, counts }
    }

    /// Adds one successful classification to its label's bucket.
    pub fn record(&mut self, prediction: &Prediction) {
        if let Some(count) = self.counts.get_mut(prediction.class_id) {
            *count += 1;
        }
    }

    /// Snapshots the buckets into a final report.
    pub fn report(&self) -> ClassificationReport {
        ClassificationReport {
            labels: self.labels.iter().map(str::to_string).collect(),
            counts: self.counts.clone(),
            total: self.counts.iter().sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(class_id: usize) -> Prediction {
        Prediction {
            filename: format!("img{class_id}.png"),
            class_id,
            label: LabelSet::fashion_mnist().get(class_id).unwrap().to_string(),
            confidence: 80.0,
        }
    }

    #[test]
    fn report_is_zero_initialized_for_every_label() {
        let stats = StatsAggregator::new(LabelSet::fashion_mnist());
        let report = stats.report();

        assert_eq!(report.total(), 0);
        assert_eq!(report.entries().count(), 10);
        assert!(report.entries().all(|(_, count)| count == 0));
    }

    #[test]
    fn record_increments_exactly_one_bucket() {
        let mut stats = StatsAggregator::new(LabelSet::fashion_mnist());
        stats.record(&prediction(7));

        let report = stats.report();
        assert_eq!(report.count("Sneaker"), Some(1));
        assert_eq!(report.total(), 1);
        assert_eq!(
            report.entries().map(|(_, count)| count).sum::<usize>(),
            report.total()
        );
    }

    #[test]
    fn bucket_sum_matches_record_count() {
        let mut stats = StatsAggregator::new(LabelSet::fashion_mnist());
        for class_id in [0, 0, 3, 9, 9, 9] {
            stats.record(&prediction(class_id));
        }

        let report = stats.report();
        assert_eq!(report.total(), 6);
        assert_eq!(report.count("T-shirt/top"), Some(2));
        assert_eq!(report.count("Dress"), Some(1));
        assert_eq!(report.count("Ankle boot"), Some(3));
    }

    #[test]
    fn display_lists_only_nonzero_labels_plus_total() {
        let mut stats = StatsAggregator::new(LabelSet::fashion_mnist());
        stats.record(&prediction(1));
        stats.record(&prediction(1));

        let rendered = stats.report().to_string();
        assert!(rendered.contains("Trouser: 2"));
        assert!(!rendered.contains("Sandal"));
        assert!(rendered.contains("Total processed: 2"));
    }

    #[test]
    fn report_serializes_for_the_handoff() {
        let mut stats = StatsAggregator::new(LabelSet::fashion_mnist());
        stats.record(&prediction(5));

        let json = serde_json::to_value(stats.report()).unwrap();
        assert_eq!(json["total"], 1);
        assert_eq!(json["labels"][5], "Sandal");
        assert_eq!(json["counts"][5], 1);
    }
}
