//! Source nodes: a looping buffer player and a sine oscillator.

use std::f64::consts::TAU;

use shared_types::AutomationRate;

use crate::domain::block::{Channel, RENDER_QUANTUM};
use crate::domain::param::AudioParam;

/// Frequency of the shared source tone.
pub const SOURCE_FREQUENCY: f64 = 440.0;

/// A 440 Hz sine of `frames` frames.
pub fn sine_buffer(frames: usize, sample_rate: f32) -> Vec<f32> {
    let step = TAU * SOURCE_FREQUENCY / sample_rate as f64;
    (0..frames).map(|i| (step * i as f64).sin() as f32).collect()
}

/// Plays a buffer in a loop with a k-rate playback rate.
#[derive(Debug)]
pub struct LoopingBufferSource {
    buffer: Vec<f32>,
    playback_rate: AudioParam,
    position: f64,
    rates: Channel,
}

impl LoopingBufferSource {
    pub fn new(buffer: Vec<f32>) -> Self {
        Self {
            buffer,
            playback_rate: AudioParam::new(1.0, AutomationRate::KRate),
            position: 0.0,
            rates: [0.0; RENDER_QUANTUM],
        }
    }

    pub fn playback_rate_mut(&mut self) -> &mut AudioParam {
        &mut self.playback_rate
    }

    pub fn process(&mut self, out: &mut Channel, start_frame: u64, sample_rate: f32) {
        let len = self.buffer.len();
        if len == 0 {
            out.fill(0.0);
            return;
        }

        self.playback_rate.fill(start_frame, sample_rate, &mut self.rates);
        let rate = self.rates[0] as f64;

        if rate == 1.0 && self.position.fract() == 0.0 {
            let mut k = self.position as usize % len;
            for o in out.iter_mut() {
                *o = self.buffer[k];
                k += 1;
                if k == len {
                    k = 0;
                }
            }
            self.position = k as f64;
            return;
        }

        let span = len as f64;
        for o in out.iter_mut() {
            let k = self.position.floor() as usize % len;
            let frac = (self.position - self.position.floor()) as f32;
            let next = (k + 1) % len;
            *o = self.buffer[k] + (self.buffer[next] - self.buffer[k]) * frac;
            self.position = (self.position + rate).rem_euclid(span);
        }
    }
}

/// Sine oscillator with an automatable frequency.
#[derive(Debug)]
pub struct SineOscillator {
    frequency: AudioParam,
    phase: f64,
    frequencies: Channel,
}

impl SineOscillator {
    pub fn new(sample_rate: f32) -> Self {
        let nyquist = sample_rate / 2.0;
        Self {
            frequency: AudioParam::new(SOURCE_FREQUENCY as f32, AutomationRate::ARate)
                .with_range(-nyquist, nyquist),
            phase: 0.0,
            frequencies: [0.0; RENDER_QUANTUM],
        }
    }

    pub fn frequency_mut(&mut self) -> &mut AudioParam {
        &mut self.frequency
    }

    pub fn process(&mut self, out: &mut Channel, start_frame: u64, sample_rate: f32) {
        self.frequency.fill(start_frame, sample_rate, &mut self.frequencies);
        let inv = 1.0 / sample_rate as f64;
        for (o, &f) in out.iter_mut().zip(self.frequencies.iter()) {
            *o = (TAU * self.phase).sin() as f32;
            self.phase = (self.phase + f as f64 * inv).fract();
        }
    }
}
