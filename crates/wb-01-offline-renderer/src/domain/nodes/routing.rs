//! Channel routing and analysis nodes.

use crate::domain::block::{AudioBlock, RENDER_QUANTUM};

/// Window kept by the analyser.
pub const ANALYSER_FFT_SIZE: usize = 2048;

/// Two-way splitter; only the first output is connected, so it emits
/// channel 0 as mono.
#[derive(Debug, Default)]
pub struct ChannelSplitterNode;

impl ChannelSplitterNode {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&mut self, input: &AudioBlock, output: &mut AudioBlock) {
        output.set_channel_count(1);
        output.channel_mut(0).copy_from_slice(input.channel(0));
    }
}

/// Two-way merger fed on its first input only: the mono downmix lands in
/// channel 0 and channel 1 stays silent.
#[derive(Debug, Default)]
pub struct ChannelMergerNode;

impl ChannelMergerNode {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&mut self, input: &AudioBlock, output: &mut AudioBlock) {
        output.set_channel_count(2);
        input.downmix_into(output.channel_mut(0));
        output.channel_mut(1).fill(0.0);
    }
}

/// Pass-through node that records the most recent mono samples.
#[derive(Debug)]
pub struct AnalyserNode {
    window: Vec<f32>,
    write_index: usize,
    mono: [f32; RENDER_QUANTUM],
}

impl AnalyserNode {
    pub fn new() -> Self {
        Self {
            window: vec![0.0; ANALYSER_FFT_SIZE],
            write_index: 0,
            mono: [0.0; RENDER_QUANTUM],
        }
    }

    /// Recorded samples, oldest first.
    pub fn time_domain_data(&self) -> Vec<f32> {
        let (newer, older) = self.window.split_at(self.write_index);
        older.iter().chain(newer.iter()).copied().collect()
    }

    pub fn process(&mut self, input: &AudioBlock, output: &mut AudioBlock) {
        output.copy_from(input);
        input.downmix_into(&mut self.mono);
        let end = self.write_index + RENDER_QUANTUM;
        self.window[self.write_index..end].copy_from_slice(&self.mono);
        self.write_index = end % ANALYSER_FFT_SIZE;
    }
}

impl Default for AnalyserNode {
    fn default() -> Self {
        Self::new()
    }
}
