//! Processing nodes.
//!
//! Nodes are a closed set: `ProcessingNode` for processors chained after the
//! source and `Generator` for sources mixed into the destination. Dispatch is
//! a single `match`, no trait objects.

pub mod biquad;
pub mod compressor;
pub mod convolver;
pub mod delay;
pub mod gain;
pub mod panner;
pub mod routing;
pub mod sources;
pub mod wave_shaper;

pub use biquad::BiquadNode;
pub use compressor::CompressorNode;
pub use convolver::{ConvolverNode, PartitionedConvolution};
pub use delay::DelayNode;
pub use gain::GainNode;
pub use panner::{PannerNode, StereoPannerNode};
pub use routing::{AnalyserNode, ChannelMergerNode, ChannelSplitterNode};
pub use sources::{sine_buffer, LoopingBufferSource, SineOscillator};
pub use wave_shaper::WaveShaperNode;

use super::block::{AudioBlock, Channel};

/// Per-quantum rendering context handed to every node.
pub struct RenderContext<'a> {
    /// First frame of the current quantum.
    pub start_frame: u64,
    pub sample_rate: f32,
    /// Output of the graph source for this quantum (mono).
    pub source: &'a AudioBlock,
}

/// A processor chained after the graph source.
#[derive(Debug)]
pub enum ProcessingNode {
    Gain(GainNode),
    Biquad(BiquadNode),
    Delay(DelayNode),
    WaveShaper(WaveShaperNode),
    Compressor(CompressorNode),
    Convolver(Box<ConvolverNode>),
    Panner(Box<PannerNode>),
    StereoPanner(StereoPannerNode),
    ChannelSplitter(ChannelSplitterNode),
    ChannelMerger(ChannelMergerNode),
    Analyser(AnalyserNode),
}

impl ProcessingNode {
    pub fn process(&mut self, input: &AudioBlock, output: &mut AudioBlock, ctx: &RenderContext<'_>) {
        match self {
            ProcessingNode::Gain(node) => node.process(input, output, ctx),
            ProcessingNode::Biquad(node) => node.process(input, output, ctx),
            ProcessingNode::Delay(node) => node.process(input, output, ctx),
            ProcessingNode::WaveShaper(node) => node.process(input, output),
            ProcessingNode::Compressor(node) => node.process(input, output, ctx),
            ProcessingNode::Convolver(node) => node.process(input, output),
            ProcessingNode::Panner(node) => node.process(input, output),
            ProcessingNode::StereoPanner(node) => node.process(input, output, ctx),
            ProcessingNode::ChannelSplitter(node) => node.process(input, output),
            ProcessingNode::ChannelMerger(node) => node.process(input, output),
            ProcessingNode::Analyser(node) => node.process(input, output),
        }
    }
}

/// A source mixed straight into the destination.
#[derive(Debug)]
pub enum Generator {
    Oscillator(SineOscillator),
    BufferSource(LoopingBufferSource),
}

impl Generator {
    pub fn process(&mut self, out: &mut Channel, ctx: &RenderContext<'_>) {
        match self {
            Generator::Oscillator(node) => node.process(out, ctx.start_frame, ctx.sample_rate),
            Generator::BufferSource(node) => node.process(out, ctx.start_frame, ctx.sample_rate),
        }
    }
}
