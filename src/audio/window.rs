//! Fixed-duration analysis windowing.
//!
//! Every detector and the streaming feeder cut audio through the same
//! [`SignalWindower`], so batch and live analysis see identical chunk
//! boundaries: chunks are non-overlapping, aligned to stream start, and only
//! the last one may be short.

use crate::audio::buffer::AudioBuffer;

/// One analysis chunk and its position in the stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisChunk<'a> {
    pub samples: &'a [f32],
    /// Index of the first sample in the source buffer.
    pub offset: usize,
    /// Offset of the first sample from stream start, in seconds.
    pub start_time: f64,
    sample_rate: u32,
}

impl AnalysisChunk<'_> {
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Index one past the last sample in the source buffer.
    pub fn end_offset(&self) -> usize {
        self.offset + self.samples.len()
    }

    pub fn end_time(&self) -> f64 {
        self.end_offset() as f64 / self.sample_rate as f64
    }
}

/// Slices an [`AudioBuffer`] into fixed-duration chunks.
#[derive(Debug, Clone, Copy)]
pub struct SignalWindower<'a> {
    buffer: AudioBuffer<'a>,
    chunk_len: usize,
}

impl<'a> SignalWindower<'a> {
    /// `chunk_duration` is rounded to whole samples, never below one.
    pub fn new(buffer: AudioBuffer<'a>, chunk_duration: f64) -> Self {
        let chunk_len = buffer.samples_for(chunk_duration).max(1);
        Self { buffer, chunk_len }
    }

    /// Samples per full chunk.
    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    /// Number of chunks holding exactly `chunk_len` samples.
    pub fn full_chunk_count(&self) -> usize {
        self.buffer.len() / self.chunk_len
    }

    /// True if `chunk` holds a full window of samples.
    pub fn is_full(&self, chunk: &AnalysisChunk<'_>) -> bool {
        chunk.samples.len() == self.chunk_len
    }

    /// A fresh pass over the buffer. Can be called any number of times.
    pub fn chunks(&self) -> Chunks<'a> {
        Chunks {
            buffer: self.buffer,
            chunk_len: self.chunk_len,
            cursor: 0,
        }
    }
}

impl<'a> IntoIterator for &SignalWindower<'a> {
    type Item = AnalysisChunk<'a>;
    type IntoIter = Chunks<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks()
    }
}

/// Lazy iterator returned by [`SignalWindower::chunks`].
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    buffer: AudioBuffer<'a>,
    chunk_len: usize,
    cursor: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = AnalysisChunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let samples = self.buffer.samples();
        if self.cursor >= samples.len() {
            return None;
        }

        let end = (self.cursor + self.chunk_len).min(samples.len());
        let chunk = AnalysisChunk {
            samples: &samples[self.cursor..end],
            offset: self.cursor,
            start_time: self.buffer.time_at(self.cursor),
            sample_rate: self.buffer.sample_rate(),
        };
        self.cursor = end;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.cursor);
        let count = remaining.div_ceil(self.chunk_len);
        (count, Some(count))
    }
}

impl ExactSizeIterator for Chunks<'_> {}
