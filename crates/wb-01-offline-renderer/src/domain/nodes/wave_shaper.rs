//! Wave shaper with optional oversampling.

use shared_types::Oversample;

use crate::domain::block::{AudioBlock, RENDER_QUANTUM};

/// Shaping curve used by every wave shaper workload.
pub const DEFAULT_CURVE: [f32; 8] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7];

/// Maps each sample through a lookup curve spanning [-1, 1].
#[derive(Debug)]
pub struct WaveShaperNode {
    curve: Vec<f32>,
    oversample: Oversample,
    // Last input sample per channel, for upsampling continuity.
    history: Vec<f32>,
    scratch: Vec<f32>,
}

impl WaveShaperNode {
    pub fn new(curve: &[f32], oversample: Oversample) -> Self {
        Self {
            curve: curve.to_vec(),
            oversample,
            history: Vec::new(),
            scratch: Vec::with_capacity(RENDER_QUANTUM * oversample.factor()),
        }
    }

    pub fn oversample(&self) -> Oversample {
        self.oversample
    }

    fn shape(curve: &[f32], x: f32) -> f32 {
        match curve.len() {
            0 => x,
            1 => curve[0],
            n => {
                let v = (n - 1) as f32 * (x + 1.0) / 2.0;
                if v <= 0.0 {
                    curve[0]
                } else if v >= (n - 1) as f32 {
                    curve[n - 1]
                } else {
                    let k = v.floor() as usize;
                    let f = v - k as f32;
                    curve[k] + (curve[k + 1] - curve[k]) * f
                }
            }
        }
    }

    pub fn process(&mut self, input: &AudioBlock, output: &mut AudioBlock) {
        let channels = input.channel_count();
        output.set_channel_count(channels);
        if self.history.len() < channels {
            self.history.resize(channels, 0.0);
        }

        let factor = self.oversample.factor();
        for ch in 0..channels {
            let inp = input.channel(ch);
            let out = output.channel_mut(ch);

            if factor == 1 {
                for (o, &x) in out.iter_mut().zip(inp.iter()) {
                    *o = Self::shape(&self.curve, x);
                }
                continue;
            }

            // Linear upsample, shape, then box-filter back down.
            self.scratch.clear();
            let mut prev = self.history[ch];
            for &x in inp.iter() {
                for step in 1..=factor {
                    let t = step as f32 / factor as f32;
                    self.scratch.push(Self::shape(&self.curve, prev + (x - prev) * t));
                }
                prev = x;
            }
            self.history[ch] = prev;

            let scale = 1.0 / factor as f32;
            for (o, chunk) in out.iter_mut().zip(self.scratch.chunks_exact(factor)) {
                *o = chunk.iter().sum::<f32>() * scale;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(value: f32) -> AudioBlock {
        let mut b = AudioBlock::mono();
        b.channel_mut(0).fill(value);
        b
    }

    #[test]
    fn test_curve_endpoints() {
        let mut node = WaveShaperNode::new(&DEFAULT_CURVE, Oversample::None);
        let mut out = AudioBlock::mono();
        node.process(&block(-1.0), &mut out);
        assert_eq!(out.channel(0)[0], 0.0);
        node.process(&block(1.0), &mut out);
        assert!((out.channel(0)[0] - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_curve_midpoint_interpolates() {
        let mut node = WaveShaperNode::new(&DEFAULT_CURVE, Oversample::None);
        let mut out = AudioBlock::mono();
        node.process(&block(0.0), &mut out);
        assert!((out.channel(0)[0] - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_oversampled_constant_matches_plain() {
        let mut node = WaveShaperNode::new(&DEFAULT_CURVE, Oversample::X4);
        let mut out = AudioBlock::mono();
        node.process(&block(0.0), &mut out);
        node.process(&block(0.0), &mut out);
        assert!(out.channel(0).iter().all(|&s| (s - 0.35).abs() < 1e-6));
    }
}
