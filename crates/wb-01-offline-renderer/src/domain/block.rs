//! Render quantum buffers.

/// Frames processed per render quantum.
pub const RENDER_QUANTUM: usize = 128;

/// One channel of one render quantum.
pub type Channel = [f32; RENDER_QUANTUM];

/// A multi-channel render quantum. Always has at least one channel.
#[derive(Debug, Clone)]
pub struct AudioBlock {
    channels: Vec<Channel>,
}

impl AudioBlock {
    /// Silent block with `channel_count` channels (minimum 1).
    pub fn new(channel_count: usize) -> Self {
        Self {
            channels: vec![[0.0; RENDER_QUANTUM]; channel_count.max(1)],
        }
    }

    /// Silent mono block.
    pub fn mono() -> Self {
        Self::new(1)
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Grow or shrink to `channel_count` channels. New channels are silent.
    pub fn set_channel_count(&mut self, channel_count: usize) {
        self.channels
            .resize(channel_count.max(1), [0.0; RENDER_QUANTUM]);
    }

    pub fn channel(&self, index: usize) -> &Channel {
        &self.channels[index]
    }

    pub fn channel_mut(&mut self, index: usize) -> &mut Channel {
        &mut self.channels[index]
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn channels_mut(&mut self) -> &mut [Channel] {
        &mut self.channels
    }

    /// Zero every channel.
    pub fn silence(&mut self) {
        for channel in &mut self.channels {
            channel.fill(0.0);
        }
    }

    /// Make this block an exact copy of `other`.
    pub fn copy_from(&mut self, other: &AudioBlock) {
        self.set_channel_count(other.channel_count());
        self.channels.copy_from_slice(&other.channels);
    }

    /// Speaker downmix to mono: stereo is `0.5 * (L + R)`, wider layouts average.
    pub fn downmix_into(&self, out: &mut Channel) {
        match self.channels.as_slice() {
            [mono] => out.copy_from_slice(mono),
            channels => {
                let scale = 1.0 / channels.len() as f32;
                out.fill(0.0);
                for channel in channels {
                    for (o, s) in out.iter_mut().zip(channel.iter()) {
                        *o += s * scale;
                    }
                }
            }
        }
    }

    /// Largest absolute sample value across channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flat_map(|c| c.iter())
            .fold(0.0f32, |acc, s| acc.max(s.abs()))
    }
}

impl Default for AudioBlock {
    fn default() -> Self {
        Self::mono()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_one_channel() {
        assert_eq!(AudioBlock::new(0).channel_count(), 1);
        let mut block = AudioBlock::new(2);
        block.set_channel_count(0);
        assert_eq!(block.channel_count(), 1);
    }

    #[test]
    fn test_stereo_downmix_is_average() {
        let mut block = AudioBlock::new(2);
        block.channel_mut(0).fill(1.0);
        block.channel_mut(1).fill(0.5);
        let mut out = [0.0; RENDER_QUANTUM];
        block.downmix_into(&mut out);
        assert!(out.iter().all(|&s| (s - 0.75).abs() < 1e-6));
    }

    #[test]
    fn test_copy_from_adopts_channel_count() {
        let mut src = AudioBlock::new(2);
        src.channel_mut(1)[3] = -0.25;
        let mut dst = AudioBlock::mono();
        dst.copy_from(&src);
        assert_eq!(dst.channel_count(), 2);
        assert_eq!(dst.channel(1)[3], -0.25);
        assert_eq!(dst.peak(), 0.25);
    }
}
