//! Stored extraction records and running statistics.

use std::collections::{HashMap, VecDeque};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::extract::ExtractionResults;

/// Number of recent durations the rolling average covers.
pub const DURATION_WINDOW: usize = 100;

const ID_PREFIX: &str = "extraction-";

pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}

/// Issues `extraction-<epoch millis>` ids that never repeat: when the clock
/// has not moved past the last issued value, the next integer is used.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        self.next_at(epoch_millis())
    }

    fn next_at(&mut self, millis: u64) -> String {
        let value = if millis > self.last {
            millis
        } else {
            self.last + 1
        };
        self.last = value;
        format!("{ID_PREFIX}{value}")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionRecord {
    pub id: String,
    pub results: ExtractionResults,
    /// Wall-clock milliseconds.
    pub duration: f64,
    /// Epoch milliseconds at which the record was stored.
    pub timestamp: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub total_extractions: u64,
    pub total_strings: u64,
    pub total_functions: u64,
    pub total_variables: u64,
    pub total_classes: u64,
    pub total_imports: u64,
    pub total_exports: u64,
    /// Mean of the most recent durations, in milliseconds.
    pub average_extraction_time: f64,
}

#[derive(Debug, Default)]
pub struct ResultStore {
    records: Vec<ExtractionRecord>,
    index: HashMap<String, usize>,
    durations: VecDeque<f64>,
    statistics: Statistics,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a successful extraction and folds it into the statistics.
    /// Recording an id that is already stored replaces that record in place.
    pub fn record(
        &mut self,
        id: String,
        results: ExtractionResults,
        duration: f64,
    ) -> &ExtractionRecord {
        self.update_statistics(&results, duration);

        let record = ExtractionRecord {
            id,
            results,
            duration,
            timestamp: epoch_millis(),
        };
        let position = match self.index.get(&record.id) {
            Some(&position) => {
                self.records[position] = record;
                position
            }
            None => {
                let position = self.records.len();
                self.index.insert(record.id.clone(), position);
                self.records.push(record);
                position
            }
        };
        &self.records[position]
    }

    fn update_statistics(&mut self, results: &ExtractionResults, duration: f64) {
        let stats = &mut self.statistics;
        stats.total_extractions += 1;
        stats.total_strings += results.string_count() as u64;
        stats.total_functions += results.function_count() as u64;
        stats.total_variables += results.variable_count() as u64;
        stats.total_classes += results.class_count() as u64;
        stats.total_imports += results.import_count() as u64;
        stats.total_exports += results.export_count() as u64;

        self.durations.push_back(duration);
        while self.durations.len() > DURATION_WINDOW {
            self.durations.pop_front();
        }
        stats.average_extraction_time =
            self.durations.iter().sum::<f64>() / self.durations.len() as f64;
    }

    pub fn get(&self, id: &str) -> Option<&ExtractionRecord> {
        self.index.get(id).map(|&position| &self.records[position])
    }

    /// Every stored record, oldest first.
    pub fn all(&self) -> &[ExtractionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record and returns how many there were. Statistics are kept.
    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        self.index.clear();
        count
    }

    /// Drops records, the duration window and every counter.
    pub fn reset(&mut self) {
        self.clear();
        self.durations.clear();
        self.statistics = Statistics::default();
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics.clone()
    }
}
