//! Render graphs.

use super::block::{AudioBlock, Channel, RENDER_QUANTUM};
use super::nodes::{Generator, LoopingBufferSource, ProcessingNode, RenderContext};

/// Mono destination signal of a finished render.
#[derive(Debug, Clone)]
pub struct RenderedAudio {
    pub samples: Vec<f32>,
}

impl RenderedAudio {
    pub fn frames(&self) -> usize {
        self.samples.len()
    }

    /// Largest absolute sample value.
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }
}

/// A looping source feeding a chain of processors, plus generators mixed
/// straight into the mono destination.
#[derive(Debug)]
pub struct RenderGraph {
    sample_rate: f32,
    source: LoopingBufferSource,
    chain: Vec<ProcessingNode>,
    generators: Vec<Generator>,
}

impl RenderGraph {
    pub fn new(source: LoopingBufferSource, sample_rate: f32) -> Self {
        Self {
            sample_rate,
            source,
            chain: Vec::new(),
            generators: Vec::new(),
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Append a processor to the end of the chain.
    pub fn push(&mut self, node: ProcessingNode) {
        self.chain.push(node);
    }

    /// Add a source mixed into the destination.
    pub fn add_generator(&mut self, generator: Generator) {
        self.generators.push(generator);
    }

    pub fn chain_len(&self) -> usize {
        self.chain.len()
    }

    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    /// Render `frames` frames of the destination.
    pub fn render(&mut self, frames: usize) -> RenderedAudio {
        let mut samples = Vec::with_capacity(frames);
        let mut source = AudioBlock::mono();
        let mut a = AudioBlock::mono();
        let mut b = AudioBlock::mono();
        let mut destination: Channel = [0.0; RENDER_QUANTUM];
        let mut generated: Channel = [0.0; RENDER_QUANTUM];

        let mut start_frame = 0u64;
        while samples.len() < frames {
            self.source
                .process(source.channel_mut(0), start_frame, self.sample_rate);
            let ctx = RenderContext {
                start_frame,
                sample_rate: self.sample_rate,
                source: &source,
            };

            a.copy_from(&source);
            for node in &mut self.chain {
                node.process(&a, &mut b, &ctx);
                std::mem::swap(&mut a, &mut b);
            }
            a.downmix_into(&mut destination);

            for generator in &mut self.generators {
                generator.process(&mut generated, &ctx);
                for (d, g) in destination.iter_mut().zip(generated.iter()) {
                    *d += g;
                }
            }

            let take = (frames - samples.len()).min(RENDER_QUANTUM);
            samples.extend_from_slice(&destination[..take]);
            start_frame += RENDER_QUANTUM as u64;
        }

        RenderedAudio { samples }
    }
}
