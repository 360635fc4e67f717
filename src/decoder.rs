//! Decoder Module
//!
//! Turns a raw stack payload into a `ParsedPayload`.
//!
//! ## Responsibilities
//! - Split the frame into header and module segments
//! - Resolve and parse each segment
//! - Aggregate records in frame order
//! - Fail the whole frame on the first bad segment
//!
//! ## Fan-out
//! Segments are independent, so they can be parsed on scoped worker threads
//! (`FanOut::Parallel`). Whichever way they run, the result is the same:
//! records come back in frame order, and if several segments fail, the
//! error reported is the one of the earliest segment in the frame.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::collab::{HumidityCalibration, RawHumidity, RequestIdGenerator, UuidGenerator};
use crate::config::{DecoderConfig, FanOut};
use crate::error::{DecodeError, Result};
use crate::model::{ModuleRecord, ParsedPayload};
use crate::modules::{self, ParseContext};
use crate::protocol::split_frame;

/// Decoder for Thinking Things stack frames
///
/// Holds only immutable configuration and the injected collaborators, so a
/// single instance can be shared across threads and called concurrently.
pub struct Decoder {
    config: DecoderConfig,
    humidity: Box<dyn HumidityCalibration>,
    ids: Box<dyn RequestIdGenerator>,
}

impl Decoder {
    /// Create a decoder with the default collaborators
    /// (`RawHumidity`, `UuidGenerator`)
    pub fn new(config: DecoderConfig) -> Result<Self> {
        Self::with_collaborators(config, RawHumidity, UuidGenerator)
    }

    /// Create a decoder with explicit collaborators
    pub fn with_collaborators(
        config: DecoderConfig,
        humidity: impl HumidityCalibration + 'static,
        ids: impl RequestIdGenerator + 'static,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            humidity: Box::new(humidity),
            ids: Box::new(ids),
        })
    }

    /// Get the decoder configuration
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode one payload
    ///
    /// Either every segment decodes and the payload is returned with one
    /// record per segment, or the error of the first failing segment is.
    pub fn decode(&self, payload: &str) -> Result<ParsedPayload> {
        tracing::debug!(payload, "Parsing payload");

        let frame = split_frame(payload);
        let records = match self.config.fan_out {
            FanOut::Parallel {
                max_threads,
                min_segments,
            } if frame.segments.len() >= min_segments.max(2) && max_threads > 1 => {
                self.decode_parallel(frame.stack_id, &frame.segments, max_threads)
            }
            _ => self.decode_sequential(frame.stack_id, &frame.segments),
        };

        match records {
            Ok(modules) => Ok(ParsedPayload {
                id: frame.stack_id.to_string(),
                modules,
            }),
            Err(e) => {
                tracing::warn!(stack_id = frame.stack_id, error = %e, "Rejecting frame");
                Err(e)
            }
        }
    }

    /// Decode one segment into its record
    fn decode_segment(&self, stack_id: &str, segment: &str) -> Result<ModuleRecord> {
        let (code, fields) = modules::resolve(segment, stack_id, self.config.compact_segments)?;
        tracing::trace!(module = code.as_str(), fields = fields.len(), "Dispatching segment");

        let ctx = ParseContext {
            stack_id,
            sleep_policy: self.config.sleep_policy,
            humidity: self.humidity.as_ref(),
            ids: self.ids.as_ref(),
        };
        let delta = modules::parse(code, &fields, &ctx)?;

        // resolve() always yields at least one field
        let id = fields.first().copied().unwrap_or(stack_id);
        Ok(delta.into_record(id, code, stack_id))
    }

    /// `decode_segment`, with a panic in an injected collaborator reported
    /// as `WorkerPanicked` at this segment's position
    fn decode_segment_guarded(&self, stack_id: &str, segment: &str) -> Result<ModuleRecord> {
        panic::catch_unwind(AssertUnwindSafe(|| self.decode_segment(stack_id, segment)))
            .unwrap_or_else(|payload| Err(DecodeError::WorkerPanicked(panic_message(&*payload))))
    }

    fn decode_sequential(&self, stack_id: &str, segments: &[&str]) -> Result<Vec<ModuleRecord>> {
        segments
            .iter()
            .map(|segment| self.decode_segment_guarded(stack_id, segment))
            .collect()
    }

    /// Split the segments into contiguous chunks, one per worker
    ///
    /// `failed_at` holds the lowest segment index known to have failed.
    /// Workers skip segments past it, since their outcome can no longer
    /// change the result.
    fn decode_parallel(
        &self,
        stack_id: &str,
        segments: &[&str],
        max_threads: usize,
    ) -> Result<Vec<ModuleRecord>> {
        let chunk_size = segments.len().div_ceil(max_threads);
        let failed_at = AtomicUsize::new(usize::MAX);

        let outcome = crossbeam::thread::scope(|s| {
            let handles: Vec<_> = segments
                .chunks(chunk_size)
                .enumerate()
                .map(|(n, chunk)| {
                    let failed_at = &failed_at;
                    s.spawn(move |_| {
                        self.decode_chunk(stack_id, n * chunk_size, chunk, failed_at)
                    })
                })
                .collect();

            // Every chunk is joined, in frame order, so the first error
            // kept is the earliest one
            let mut records = Vec::with_capacity(segments.len());
            let mut first_error = None;
            for handle in handles {
                let joined = handle.join().unwrap_or_else(|payload| {
                    Err(DecodeError::WorkerPanicked(panic_message(&*payload)))
                });
                match joined {
                    Ok(mut chunk) if first_error.is_none() => records.append(&mut chunk),
                    Ok(_) => {}
                    Err(e) => {
                        first_error.get_or_insert(e);
                    }
                }
            }
            match first_error {
                Some(e) => Err(e),
                None => Ok(records),
            }
        });

        outcome.map_err(|_| DecodeError::WorkerPanicked("module fan-out aborted".to_string()))?
    }

    fn decode_chunk(
        &self,
        stack_id: &str,
        offset: usize,
        chunk: &[&str],
        failed_at: &AtomicUsize,
    ) -> Result<Vec<ModuleRecord>> {
        let mut records = Vec::with_capacity(chunk.len());
        for (i, segment) in chunk.iter().enumerate() {
            let index = offset + i;
            if failed_at.load(Ordering::Relaxed) < index {
                break;
            }
            match self.decode_segment_guarded(stack_id, segment) {
                Ok(record) => records.push(record),
                Err(e) => {
                    failed_at.fetch_min(index, Ordering::Relaxed);
                    return Err(e);
                }
            }
        }
        Ok(records)
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            config: DecoderConfig::default(),
            humidity: Box::new(RawHumidity),
            ids: Box::new(UuidGenerator),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "module parser panicked".to_string())
}

/// Decode a payload with a default `Decoder`
pub fn decode(payload: &str) -> Result<ParsedPayload> {
    Decoder::default().decode(payload)
}
