//! Records the engine's structured events into in-memory column tables.
//!
//! Each `tracing` target becomes one [`EventTable`]; each event field becomes
//! a typed column. Fields missing from a row are filled with the column's
//! zero value so every column of a table has `row_count` entries.
//!
//! ```ignore
//! // In the engine:
//! tracing::info!(target: "task", day, slot, person_id, task_id);
//!
//! // In a test:
//! instrument::install_subscriber();
//! // ... play some days ...
//! let recorder = instrument::drain();
//! let tasks = recorder.table("task").unwrap();
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Record};
use tracing::{Event, Id, Metadata, Subscriber};

#[derive(Debug, Clone, PartialEq)]
pub enum EventColumn {
    U64(Vec<u64>),
    I64(Vec<i64>),
    F64(Vec<f64>),
    Bool(Vec<bool>),
    Str(Vec<String>),
}

impl EventColumn {
    pub fn len(&self) -> usize {
        match self {
            EventColumn::U64(v) => v.len(),
            EventColumn::I64(v) => v.len(),
            EventColumn::F64(v) => v.len(),
            EventColumn::Bool(v) => v.len(),
            EventColumn::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn pad_to(&mut self, rows: usize) {
        let missing = rows.saturating_sub(self.len());
        match self {
            EventColumn::U64(v) => v.extend(std::iter::repeat_n(0, missing)),
            EventColumn::I64(v) => v.extend(std::iter::repeat_n(0, missing)),
            EventColumn::F64(v) => v.extend(std::iter::repeat_n(0.0, missing)),
            EventColumn::Bool(v) => v.extend(std::iter::repeat_n(false, missing)),
            EventColumn::Str(v) => v.extend(std::iter::repeat_n(String::new(), missing)),
        }
    }
}

/// All events recorded under one target
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    pub columns: HashMap<String, EventColumn>,
    pub row_count: usize,
}

impl EventTable {
    fn align(&mut self) {
        for col in self.columns.values_mut() {
            col.pad_to(self.row_count);
        }
    }

    pub fn column(&self, name: &str) -> Option<&EventColumn> {
        self.columns.get(name)
    }

    pub fn u64s(&self, name: &str) -> Option<&[u64]> {
        match self.columns.get(name)? {
            EventColumn::U64(v) => Some(v),
            _ => None,
        }
    }

    pub fn i64s(&self, name: &str) -> Option<&[i64]> {
        match self.columns.get(name)? {
            EventColumn::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn f64s(&self, name: &str) -> Option<&[f64]> {
        match self.columns.get(name)? {
            EventColumn::F64(v) => Some(v),
            _ => None,
        }
    }

    pub fn strs(&self, name: &str) -> Option<&[String]> {
        match self.columns.get(name)? {
            EventColumn::Str(v) => Some(v),
            _ => None,
        }
    }
}

/// Tables keyed by tracing target
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub tables: HashMap<String, EventTable>,
}

impl Recorder {
    pub fn table(&self, target: &str) -> Option<&EventTable> {
        self.tables.get(target)
    }

    /// Rows recorded under `target`, zero if none
    pub fn row_count(&self, target: &str) -> usize {
        self.tables.get(target).map_or(0, |t| t.row_count)
    }
}

thread_local! {
    static RECORDER: RefCell<Recorder> = RefCell::default();
}

struct RowVisitor<'a> {
    table: &'a mut EventTable,
}

impl RowVisitor<'_> {
    /// Column for `field`, created pre-padded for earlier rows
    fn column(&mut self, field: &Field, empty: fn(usize) -> EventColumn) -> &mut EventColumn {
        let rows = self.table.row_count;
        self.table
            .columns
            .entry(field.name().to_string())
            .or_insert_with(|| empty(rows))
    }
}

impl Visit for RowVisitor<'_> {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if let EventColumn::U64(v) = self.column(field, |n| EventColumn::U64(vec![0; n])) {
            v.push(value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if let EventColumn::I64(v) = self.column(field, |n| EventColumn::I64(vec![0; n])) {
            v.push(value);
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let EventColumn::F64(v) = self.column(field, |n| EventColumn::F64(vec![0.0; n])) {
            v.push(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if let EventColumn::Bool(v) = self.column(field, |n| EventColumn::Bool(vec![false; n])) {
            v.push(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if let EventColumn::Str(v) =
            self.column(field, |n| EventColumn::Str(vec![String::new(); n]))
        {
            v.push(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, &format!("{:?}", value));
    }
}

/// Subscriber that appends every info-level event to the thread's recorder
pub struct TableSubscriber;

impl Subscriber for TableSubscriber {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        // Debug and trace events stay out of the tables
        metadata.is_event() && *metadata.level() <= tracing::Level::INFO
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let target = event.metadata().target().to_string();

        RECORDER.with(|r| {
            let mut recorder = r.borrow_mut();
            let table = recorder.tables.entry(target).or_default();

            table.align();
            event.record(&mut RowVisitor { table: &mut *table });
            table.row_count += 1;
            table.align();
        });
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

/// Install [`TableSubscriber`] as the global default. Later calls are no-ops.
pub fn install_subscriber() {
    let _ = tracing::subscriber::set_global_default(TableSubscriber);
}

/// Take everything recorded on this thread so far
pub fn drain() -> Recorder {
    RECORDER.with(|r| std::mem::take(&mut *r.borrow_mut()))
}

pub fn clear() {
    RECORDER.with(|r| *r.borrow_mut() = Recorder::default());
}

// === Polars Integration ===

use polars::prelude::*;

impl EventTable {
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut names: Vec<&String> = self.columns.keys().collect();
        names.sort();

        let columns: Vec<Column> = names
            .into_iter()
            .map(|name| match &self.columns[name] {
                EventColumn::U64(v) => Column::new(name.into(), v),
                EventColumn::I64(v) => Column::new(name.into(), v),
                EventColumn::F64(v) => Column::new(name.into(), v),
                EventColumn::Bool(v) => Column::new(name.into(), v),
                EventColumn::Str(v) => Column::new(name.into(), v),
            })
            .collect();

        DataFrame::new(columns)
    }
}

impl Recorder {
    pub fn to_dataframes(&self) -> PolarsResult<HashMap<String, DataFrame>> {
        self.tables
            .iter()
            .map(|(name, table)| Ok((name.clone(), table.to_dataframe()?)))
            .collect()
    }
}
