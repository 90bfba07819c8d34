//! Streaming runs against the batch pipeline on truncated buffers.

use vmdrop::stream::is_settled;
use vmdrop::{
    AudioBuffer, DetectionConfig, StreamChunkFeeder, StreamConfig, StreamingAnalyzer,
    TriggerMethod, analyze,
};

const RATE: u32 = 8000;

fn noise(seconds: f64, seed: &mut u64) -> Vec<f32> {
    let n = (seconds * RATE as f64).round() as usize;
    (0..n)
        .map(|_| {
            *seed = seed
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = (*seed >> 33) as f64 / (1u64 << 31) as f64;
            ((unit * 2.0 - 1.0) * 0.2) as f32
        })
        .collect()
}

fn tone(freq: f64, seconds: f64) -> Vec<f32> {
    let n = (seconds * RATE as f64).round() as usize;
    (0..n)
        .map(|i| {
            let cycles = (freq * i as f64 / RATE as f64).fract();
            (0.6 * (std::f64::consts::TAU * cycles).sin()) as f32
        })
        .collect()
}

fn beep_greeting() -> Vec<f32> {
    let mut seed = 7;
    let mut samples = noise(2.0, &mut seed);
    samples.extend(tone(1000.0, 0.6));
    samples.extend(noise(4.4, &mut seed));
    samples
}

fn silence_greeting() -> Vec<f32> {
    let mut seed = 11;
    let mut samples = noise(5.0, &mut seed);
    samples.extend(vec![0.0; (0.4 * RATE as f64) as usize]);
    samples.extend(noise(4.6, &mut seed));
    samples
}

fn analyzer(config: &DetectionConfig) -> StreamingAnalyzer<'_> {
    StreamingAnalyzer::new(config, &StreamConfig::default()).unwrap()
}

#[test]
fn beep_settles_once_tone_has_ended() {
    let samples = beep_greeting();
    let buffer = AudioBuffer::new(&samples, RATE).unwrap();
    let config = DetectionConfig::default();

    let outcome = analyzer(&config).run(&buffer, None).unwrap();

    assert!(outcome.finalized);
    assert_eq!(outcome.decision.method, TriggerMethod::Beep);
    // The delivery ending at 2.5s still has the tone sounding.
    assert_eq!(outcome.progress.chunks_consumed, 6);
    assert!((outcome.decision.evidence.beep.end_time - 2.6).abs() < 1e-9);
    assert!((outcome.decision.timestamp - 3.1).abs() < 1e-9);
}

#[test]
fn streamed_decision_matches_batch_on_truncated_buffer() {
    let config = DetectionConfig::default();

    for samples in [beep_greeting(), silence_greeting()] {
        let buffer = AudioBuffer::new(&samples, RATE).unwrap();
        let outcome = analyzer(&config).run(&buffer, None).unwrap();
        assert!(outcome.finalized);

        let truncated = buffer.prefix(outcome.progress.samples_received);
        let batch = analyze(&truncated, None, &config).unwrap();
        assert_eq!(outcome.decision, batch);
    }
}

#[test]
fn settled_beep_matches_whole_buffer_decision() {
    let samples = beep_greeting();
    let buffer = AudioBuffer::new(&samples, RATE).unwrap();
    let config = DetectionConfig::default();

    let streamed = analyzer(&config).run(&buffer, None).unwrap();
    let batch = analyze(&buffer, None, &config).unwrap();

    assert_eq!(streamed.decision.method, batch.method);
    assert_eq!(streamed.decision.timestamp, batch.timestamp);
}

#[test]
fn silence_settles_without_reading_the_rest() {
    let samples = silence_greeting();
    let buffer = AudioBuffer::new(&samples, RATE).unwrap();
    let config = DetectionConfig::default();

    let outcome = analyzer(&config).run(&buffer, None).unwrap();

    assert!(outcome.finalized);
    assert_eq!(outcome.decision.method, TriggerMethod::Silence);
    assert!(outcome.progress.received_duration < buffer.duration());
    assert!((outcome.decision.timestamp - 5.2).abs() < 1e-9);
}

#[test]
fn phrase_fallback_never_settles_a_stream() {
    let mut seed = 3;
    let samples = noise(4.0, &mut seed);
    let buffer = AudioBuffer::new(&samples, RATE).unwrap();
    let config = DetectionConfig::default();

    let outcome = analyzer(&config)
        .run(&buffer, Some("leave a message after the tone"))
        .unwrap();

    assert!(!outcome.finalized);
    assert_eq!(outcome.decision.method, TriggerMethod::PhraseFallback);
    assert_eq!(outcome.progress.samples_received, samples.len());
    assert_eq!(
        outcome.decision,
        analyze(&buffer, Some("leave a message after the tone"), &config).unwrap()
    );
}

#[test]
fn caller_stop_condition_sees_every_evaluation() {
    let samples = beep_greeting();
    let buffer = AudioBuffer::new(&samples, RATE).unwrap();
    let config = DetectionConfig::default();
    let mut seen = Vec::new();

    let outcome = analyzer(&config)
        .run_until(&buffer, None, |decision, progress| {
            seen.push((decision.method, progress.chunks_consumed));
            is_settled(decision, progress, RATE)
        })
        .unwrap();

    assert_eq!(seen.len(), outcome.progress.chunks_consumed);
    assert_eq!(seen[0], (TriggerMethod::DurationFallback, 1));
    assert_eq!(seen[4].0, TriggerMethod::Beep);
}

#[test]
fn feeder_is_restartable() {
    let samples = beep_greeting();
    let buffer = AudioBuffer::new(&samples, RATE).unwrap();
    let mut feeder = StreamChunkFeeder::new(buffer, 0.5);

    let total: usize = feeder.by_ref().map(|chunk| chunk.samples.len()).sum();
    assert_eq!(total, samples.len());

    feeder.rewind();
    assert_eq!(feeder.next_chunk().map(|chunk| chunk.index), Some(0));
}
