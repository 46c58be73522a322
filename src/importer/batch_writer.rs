// ==========================================
// Tournament Scoring - Batch Writer
// ==========================================
// Buffers accepted records and hands them to the sink in chunks.
// Counting is optimistic: a record counts as created on push.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::repository::BatchSink;
use tracing::{debug, error};

pub struct BatchWriter<'a, T, S>
where
    S: BatchSink<T> + ?Sized,
{
    sink: &'a S,
    batch_size: usize,
    buffer: Vec<T>,
    accepted: usize,
    flushes: usize,
}

impl<'a, T, S> BatchWriter<'a, T, S>
where
    S: BatchSink<T> + ?Sized,
{
    /// # Arguments
    /// - sink: persistence target
    /// - batch_size: records per flush (values below 1 are treated as 1)
    pub fn new(sink: &'a S, batch_size: usize) -> Self {
        let batch_size = batch_size.max(1);
        Self {
            sink,
            batch_size,
            buffer: Vec::with_capacity(batch_size),
            accepted: 0,
            flushes: 0,
        }
    }

    /// Accepts one record, flushing when the buffer is full.
    pub fn push(&mut self, record: T) -> ImportResult<()> {
        self.buffer.push(record);
        self.accepted += 1;

        if self.buffer.len() >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    /// Flushes the remainder.
    ///
    /// # Returns
    /// - Ok(usize): records accepted over the writer's life
    pub fn finish(mut self) -> ImportResult<usize> {
        if !self.buffer.is_empty() {
            self.flush()?;
        }
        debug!(
            accepted = self.accepted,
            flushes = self.flushes,
            "batch writer finished"
        );
        Ok(self.accepted)
    }

    fn flush(&mut self) -> ImportResult<()> {
        let batch = self.flushes + 1;
        let size = self.buffer.len();

        match self.sink.save_batch(self.buffer.as_slice()) {
            Ok(written) => {
                debug!(batch = batch, size = size, written = written, "batch flushed");
                self.buffer.clear();
                self.flushes = batch;
                Ok(())
            }
            Err(e) => {
                error!(batch = batch, size = size, error = %e, "batch flush failed");
                Err(ImportError::BatchPersistence {
                    batch,
                    size,
                    source: e,
                })
            }
        }
    }
}
