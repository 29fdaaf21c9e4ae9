use crate::fetcher::DocumentFetcher;
use crate::parsers::listing;
use crate::results::{ListingRecord, derive_listing_id};
use crate::sink::{RecordSink, SinkError};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Semaphore, mpsc};

/// Counts from a completed extraction pass.
#[derive(Debug)]
pub struct PipelineSummary {
    pub records_written: usize,
    pub failures: usize,
}

/// Extracts one `ListingRecord` per listing URL and appends it to the sink.
///
/// Fetch and parse run on a bounded worker pool; appends go through this
/// task alone, with an index-keyed buffer restoring discovery order so the
/// output matches the order the URLs were collected in, at any concurrency.
pub struct DetailPipeline<F> {
    fetcher: Arc<F>,
    sink: RecordSink,
    record_report_interval: usize,
    max_concurrency: usize,
}

impl<F: DocumentFetcher + Send + Sync + 'static> DetailPipeline<F> {
    pub fn new(
        fetcher: F,
        sink: RecordSink,
        record_report_interval: usize,
        max_concurrency: usize,
    ) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            sink,
            record_report_interval,
            max_concurrency,
        }
    }

    /// Processes every URL exactly once. Per-listing failures become Failure
    /// records; only sink errors abort the run.
    pub async fn run(mut self, urls: Vec<String>) -> Result<PipelineSummary, SinkError> {
        let total = urls.len();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency.max(1)));
        let (record_tx, mut record_rx) = mpsc::channel::<(usize, ListingRecord)>(64);

        for (index, url) in urls.into_iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let semaphore = Arc::clone(&semaphore);
            let record_tx = record_tx.clone();
            tokio::spawn(async move {
                let _permit = semaphore.acquire_owned().await.unwrap();
                let record = extract(fetcher.as_ref(), &url).await;
                if record_tx.send((index, record)).await.is_err() {
                    ::log::warn!("record receiver dropped before {} was delivered", url);
                }
            });
        }
        // Workers hold the remaining senders; the channel closes when the
        // last one finishes.
        drop(record_tx);

        let mut pending: BTreeMap<usize, ListingRecord> = BTreeMap::new();
        let mut next_index = 0usize;
        let mut written = 0usize;
        let mut failures = 0usize;

        while let Some((index, record)) = record_rx.recv().await {
            pending.insert(index, record);
            while let Some(record) = pending.remove(&next_index) {
                self.append(&record, total, &mut written, &mut failures)?;
                next_index += 1;
            }
        }
        // Normally empty by now; drains anything stranded by a lost worker
        for (_, record) in pending {
            self.append(&record, total, &mut written, &mut failures)?;
        }

        ::log::info!(
            "detail extraction finished: {} records written, {} failures",
            written,
            failures
        );
        Ok(PipelineSummary {
            records_written: written,
            failures,
        })
    }

    fn append(
        &mut self,
        record: &ListingRecord,
        total: usize,
        written: &mut usize,
        failures: &mut usize,
    ) -> Result<(), SinkError> {
        if !record.is_success() {
            *failures += 1;
        }
        self.sink.append(record)?;
        *written += 1;
        if self.record_report_interval > 0 && *written % self.record_report_interval == 0 {
            ::log::info!("extracted and stored {} of {} listings", written, total);
        }
        Ok(())
    }
}

/// Produces exactly one record for `url`, success or failure.
///
/// Both fetch-layer failures and missing structural anchors are isolated
/// here: a malformed or unreachable listing never aborts the batch.
pub async fn extract<F: DocumentFetcher>(fetcher: &F, url: &str) -> ListingRecord {
    let listing_id = derive_listing_id(url);
    match fetcher.fetch(url).await {
        Ok(body) => match listing::parse(&body) {
            Ok(fields) => ListingRecord::Success {
                listing_id,
                price: fields.price,
                area: fields.area,
                included: fields.included,
                city: fields.city,
                street: fields.street,
                details: fields.details,
                extracted_at: Utc::now().timestamp(),
            },
            Err(missing) => {
                ::log::warn!("error scraping listing at {}: {}", url, missing);
                ListingRecord::failure(listing_id, "Missing data")
            }
        },
        Err(e) => {
            ::log::warn!("fetch failed for {}: {}", url, e);
            ListingRecord::failure(listing_id, format!("Fetch failed: {}", e))
        }
    }
}
