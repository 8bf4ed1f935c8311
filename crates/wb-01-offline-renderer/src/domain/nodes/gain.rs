//! Gain node.

use shared_types::AutomationRate;

use super::RenderContext;
use crate::domain::block::{AudioBlock, Channel, RENDER_QUANTUM};
use crate::domain::param::AudioParam;

/// Multiplies its input by the `gain` parameter.
///
/// When modulated, the graph source signal is added to the computed gain
/// value, like an audio connection into the gain parameter.
#[derive(Debug)]
pub struct GainNode {
    gain: AudioParam,
    modulated: bool,
    values: Channel,
}

impl GainNode {
    pub fn new() -> Self {
        Self {
            gain: AudioParam::new(1.0, AutomationRate::ARate),
            modulated: false,
            values: [0.0; RENDER_QUANTUM],
        }
    }

    /// Builder-style method to drive the gain parameter with the source signal.
    pub fn with_source_modulation(mut self) -> Self {
        self.modulated = true;
        self
    }

    pub fn gain(&self) -> &AudioParam {
        &self.gain
    }

    pub fn gain_mut(&mut self) -> &mut AudioParam {
        &mut self.gain
    }

    pub fn process(&mut self, input: &AudioBlock, output: &mut AudioBlock, ctx: &RenderContext<'_>) {
        output.set_channel_count(input.channel_count());

        if !self.modulated && !self.gain.varies_per_frame() {
            let mut g = [0.0; RENDER_QUANTUM];
            self.gain.fill(ctx.start_frame, ctx.sample_rate, &mut g);
            let g = g[0];
            for (out, inp) in output.channels_mut().iter_mut().zip(input.channels()) {
                for (o, s) in out.iter_mut().zip(inp.iter()) {
                    *o = s * g;
                }
            }
            return;
        }

        self.gain.fill(ctx.start_frame, ctx.sample_rate, &mut self.values);
        if self.modulated {
            let modulation = ctx.source.channel(0);
            match self.gain.rate() {
                AutomationRate::ARate => {
                    for (v, m) in self.values.iter_mut().zip(modulation.iter()) {
                        *v += m;
                    }
                }
                AutomationRate::KRate => {
                    let m = modulation[0];
                    for v in self.values.iter_mut() {
                        *v += m;
                    }
                }
            }
        }

        for (out, inp) in output.channels_mut().iter_mut().zip(input.channels()) {
            for ((o, s), g) in out.iter_mut().zip(inp.iter()).zip(self.values.iter()) {
                *o = s * g;
            }
        }
    }
}

impl Default for GainNode {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(source: &AudioBlock) -> RenderContext<'_> {
        RenderContext {
            start_frame: 0,
            sample_rate: 44_100.0,
            source,
        }
    }

    #[test]
    fn test_constant_gain_scales_input() {
        let mut input = AudioBlock::mono();
        input.channel_mut(0).fill(1.0);
        let mut output = AudioBlock::mono();
        let mut node = GainNode::new();
        node.gain_mut().set_value(0.9);
        node.process(&input, &mut output, &ctx(&input));
        assert!(output.channel(0).iter().all(|&s| (s - 0.9).abs() < 1e-6));
    }

    #[test]
    fn test_preserves_channel_count() {
        let input = AudioBlock::new(2);
        let mut output = AudioBlock::mono();
        GainNode::new().process(&input, &mut output, &ctx(&input));
        assert_eq!(output.channel_count(), 2);
    }

    #[test]
    fn test_source_modulation_adds_to_gain() {
        let mut input = AudioBlock::mono();
        input.channel_mut(0).fill(1.0);
        let mut source = AudioBlock::mono();
        source.channel_mut(0).fill(0.5);
        let mut output = AudioBlock::mono();
        let mut node = GainNode::new().with_source_modulation();
        node.process(&input, &mut output, &ctx(&source));
        assert!(output.channel(0).iter().all(|&s| (s - 1.5).abs() < 1e-6));
    }

    #[test]
    fn test_k_rate_modulation_uses_first_frame() {
        let mut input = AudioBlock::mono();
        input.channel_mut(0).fill(1.0);
        let mut source = AudioBlock::mono();
        for (i, s) in source.channel_mut(0).iter_mut().enumerate() {
            *s = i as f32;
        }
        let mut output = AudioBlock::mono();
        let mut node = GainNode::new().with_source_modulation();
        node.gain_mut().set_rate(AutomationRate::KRate);
        node.process(&input, &mut output, &ctx(&source));
        assert!(output.channel(0).iter().all(|&s| (s - 1.0).abs() < 1e-6));
    }
}
