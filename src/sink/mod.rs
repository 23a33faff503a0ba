use crate::record::{Record, UploadDocument};
use crate::Result;
pub use elasticsearch::{bulk_body, decode_cloud_id, Credentials, ElasticsearchSink, Endpoint};

mod elasticsearch;

/// Destination for a batch of documents, written in a single call
pub trait BulkSink {
    fn bulk(&mut self, documents: &[UploadDocument]) -> Result<BulkSummary>;
}

/// What the sink reported back for a bulk call
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BulkSummary {
    pub documents: usize,
    pub failed: usize,
}

impl<S: BulkSink + ?Sized> BulkSink for &mut S {
    fn bulk(&mut self, documents: &[UploadDocument]) -> Result<BulkSummary> {
        (**self).bulk(documents)
    }
}

/// Sink that keeps every batch it receives
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub batches: Vec<Vec<(String, Record)>>,
}

impl InMemorySink {
    pub fn documents(&self) -> impl Iterator<Item = &(String, Record)> {
        self.batches.iter().flatten()
    }
}

impl BulkSink for InMemorySink {
    fn bulk(&mut self, documents: &[UploadDocument]) -> Result<BulkSummary> {
        self.batches.push(
            documents
                .iter()
                .map(|document| (document.index.to_string(), document.source.to_vec()))
                .collect(),
        );
        Ok(BulkSummary {
            documents: documents.len(),
            failed: 0,
        })
    }
}
