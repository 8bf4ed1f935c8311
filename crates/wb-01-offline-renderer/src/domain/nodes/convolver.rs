//! FFT convolution.
//!
//! Uniformly partitioned overlap-save: the impulse response is cut into
//! quantum-sized partitions, each transformed once up front. Every quantum
//! costs one forward FFT, one multiply-accumulate per partition and one
//! inverse FFT, regardless of the response length.

use std::fmt;
use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::domain::block::{AudioBlock, Channel, RENDER_QUANTUM};

const FFT_SIZE: usize = 2 * RENDER_QUANTUM;

// Loudness calibration for normalized impulse responses.
const GAIN_CALIBRATION: f32 = 0.00125;
const MIN_POWER: f32 = 0.000125;

/// Scale that brings `response` to a calibrated loudness.
pub fn normalization_scale(response: &[f32]) -> f32 {
    if response.is_empty() {
        return 1.0;
    }
    let energy: f32 = response.iter().map(|s| s * s).sum();
    let power = (energy / response.len() as f32).sqrt();
    let power = if power.is_finite() && power >= MIN_POWER { power } else { MIN_POWER };
    GAIN_CALIBRATION / power
}

/// Streaming convolution of a mono signal with a fixed impulse response.
pub struct PartitionedConvolution {
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
    partitions: Vec<Vec<Complex<f32>>>,
    // Spectra of past input windows, newest at `head`.
    history: Vec<Vec<Complex<f32>>>,
    head: usize,
    window: Vec<f32>,
    spectrum: Vec<Complex<f32>>,
    accumulator: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl PartitionedConvolution {
    /// Prepares `response` scaled by `gain`.
    pub fn new(response: &[f32], gain: f32) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let forward = planner.plan_fft_forward(FFT_SIZE);
        let inverse = planner.plan_fft_inverse(FFT_SIZE);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());

        let partitions: Vec<Vec<Complex<f32>>> = response
            .chunks(RENDER_QUANTUM)
            .map(|chunk| {
                let mut buf = vec![Complex::new(0.0, 0.0); FFT_SIZE];
                for (slot, &s) in buf.iter_mut().zip(chunk.iter()) {
                    *slot = Complex::new(s * gain, 0.0);
                }
                forward.process(&mut buf);
                buf
            })
            .collect();
        let count = partitions.len().max(1);

        Self {
            forward,
            inverse,
            partitions,
            history: vec![vec![Complex::new(0.0, 0.0); FFT_SIZE]; count],
            head: 0,
            window: vec![0.0; FFT_SIZE],
            spectrum: vec![Complex::new(0.0, 0.0); FFT_SIZE],
            accumulator: vec![Complex::new(0.0, 0.0); FFT_SIZE],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        }
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    /// Convolve one quantum of `input` into `output`.
    pub fn process(&mut self, input: &Channel, output: &mut Channel) {
        if self.partitions.is_empty() {
            output.fill(0.0);
            return;
        }

        self.window.copy_within(RENDER_QUANTUM.., 0);
        self.window[RENDER_QUANTUM..].copy_from_slice(input);

        for (slot, &s) in self.spectrum.iter_mut().zip(self.window.iter()) {
            *slot = Complex::new(s, 0.0);
        }
        self.forward
            .process_with_scratch(&mut self.spectrum, &mut self.scratch);

        let count = self.history.len();
        self.head = (self.head + count - 1) % count;
        self.history[self.head].copy_from_slice(&self.spectrum);

        self.accumulator.fill(Complex::new(0.0, 0.0));
        for (p, partition) in self.partitions.iter().enumerate() {
            let past = &self.history[(self.head + p) % count];
            for ((acc, x), h) in self.accumulator.iter_mut().zip(past.iter()).zip(partition.iter()) {
                *acc += x * h;
            }
        }

        self.inverse
            .process_with_scratch(&mut self.accumulator, &mut self.scratch);
        let scale = 1.0 / FFT_SIZE as f32;
        for (o, y) in output.iter_mut().zip(self.accumulator[RENDER_QUANTUM..].iter()) {
            *o = y.re * scale;
        }
    }
}

impl fmt::Debug for PartitionedConvolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionedConvolution")
            .field("fft_size", &FFT_SIZE)
            .field("partitions", &self.partitions.len())
            .finish()
    }
}

/// Convolver node: mono downmix in, mono out.
#[derive(Debug)]
pub struct ConvolverNode {
    convolution: PartitionedConvolution,
    mono: Channel,
}

impl ConvolverNode {
    pub fn new(response: &[f32], normalize: bool) -> Self {
        let gain = if normalize { normalization_scale(response) } else { 1.0 };
        Self {
            convolution: PartitionedConvolution::new(response, gain),
            mono: [0.0; RENDER_QUANTUM],
        }
    }

    pub fn partition_count(&self) -> usize {
        self.convolution.partition_count()
    }

    pub fn process(&mut self, input: &AudioBlock, output: &mut AudioBlock) {
        input.downmix_into(&mut self.mono);
        output.set_channel_count(1);
        self.convolution.process(&self.mono, output.channel_mut(0));
    }
}
