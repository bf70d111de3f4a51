//! Historical data sinks — one per persisted record type
//!
//! A `HistoricalDataService<V>` is a publish-only listener: every
//! notification becomes one appended line `(timestamp, record CSV)` in the
//! stream's file. A write failure is logged and the record dropped; the
//! pipeline never stops for a sink error.

use std::marker::PhantomData;

use soa::{Connector, ServiceListener};
use tracing::{debug, error};
use types::execution::ExecutionOrder;
use types::inquiry::Inquiry;
use types::position::Position;
use types::price::MidPrice;
use types::risk::Pv01;
use types::stream::PriceStream;

use crate::history::HistoryWriter;

/// A record that can be persisted to a history file.
pub trait HistoryRecord {
    /// Key the stream is persisted under (product, order, or inquiry id).
    fn persist_key(&self) -> String;

    /// CSV body of the persisted line.
    fn history_line(&self) -> String;
}

impl HistoryRecord for Position {
    fn persist_key(&self) -> String {
        self.product.to_string()
    }

    fn history_line(&self) -> String {
        self.to_string()
    }
}

impl HistoryRecord for Pv01 {
    fn persist_key(&self) -> String {
        self.product.to_string()
    }

    fn history_line(&self) -> String {
        self.to_string()
    }
}

impl HistoryRecord for ExecutionOrder {
    fn persist_key(&self) -> String {
        self.order_id.to_string()
    }

    fn history_line(&self) -> String {
        self.to_string()
    }
}

impl HistoryRecord for PriceStream {
    fn persist_key(&self) -> String {
        self.product.to_string()
    }

    fn history_line(&self) -> String {
        self.to_string()
    }
}

impl HistoryRecord for Inquiry {
    fn persist_key(&self) -> String {
        self.inquiry_id.to_string()
    }

    fn history_line(&self) -> String {
        self.to_string()
    }
}

/// Publish-only sink persisting one stream of records.
pub struct HistoricalDataService<V> {
    writer: HistoryWriter,
    _record: PhantomData<fn(&V)>,
}

impl<V: HistoryRecord> HistoricalDataService<V> {
    pub fn new(writer: HistoryWriter) -> Self {
        Self {
            writer,
            _record: PhantomData,
        }
    }

    /// Persist one record; failures are logged and dropped.
    pub fn persist(&mut self, record: &V) {
        let key = record.persist_key();
        match self.writer.append_timestamped(&record.history_line()) {
            Ok(()) => debug!(key = %key, path = %self.writer.path().display(), "record persisted"),
            Err(err) => {
                error!(key = %key, path = %self.writer.path().display(), %err, "persist failed, record dropped");
            }
        }
    }

    pub fn lines_written(&self) -> u64 {
        self.writer.lines_written()
    }
}

impl<V: HistoryRecord> ServiceListener<V> for HistoricalDataService<V> {
    fn process_add(&mut self, data: &V) {
        self.persist(data);
    }
}

/// GUI file sink: appends the throttled price lines to `gui.txt`.
pub struct GuiSink {
    writer: HistoryWriter,
}

impl GuiSink {
    pub fn new(writer: HistoryWriter) -> Self {
        Self { writer }
    }
}

impl Connector<MidPrice> for GuiSink {
    fn publish(&mut self, data: &MidPrice) {
        if let Err(err) = self.writer.append_timestamped(&data.to_string()) {
            error!(product = %data.product, %err, "gui line dropped");
        }
    }
}
