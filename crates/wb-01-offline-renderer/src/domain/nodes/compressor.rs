//! Dynamics compressor.

use shared_types::AutomationRate;

use super::RenderContext;
use crate::domain::block::{AudioBlock, Channel, RENDER_QUANTUM};
use crate::domain::param::AudioParam;

const THRESHOLD_DB: f32 = -24.0;
const RATIO: f32 = 12.0;
const ATTACK_SECONDS: f32 = 0.003;
const RELEASE_SECONDS: f32 = 0.25;

// Level assigned to digital silence.
const FLOOR_DB: f32 = -120.0;

/// Feed-forward compressor with a soft knee and makeup gain.
///
/// Detection is peak-based on the mono downmix and the same gain is applied
/// to every channel.
#[derive(Debug)]
pub struct CompressorNode {
    knee: AudioParam,
    // Smoothed gain change in dB, always <= 0.
    envelope_db: f32,
    detector: Channel,
}

impl CompressorNode {
    pub fn new(knee_db: f32) -> Self {
        Self {
            knee: AudioParam::new(knee_db, AutomationRate::KRate).with_range(0.0, 40.0),
            envelope_db: 0.0,
            detector: [0.0; RENDER_QUANTUM],
        }
    }

    /// Current gain reduction in dB (zero or negative).
    pub fn reduction(&self) -> f32 {
        self.envelope_db
    }

    fn static_curve(level_db: f32, knee: f32) -> f32 {
        let over = level_db - THRESHOLD_DB;
        if 2.0 * over < -knee {
            level_db
        } else if knee > 0.0 && 2.0 * over.abs() <= knee {
            let x = over + knee / 2.0;
            level_db + (1.0 / RATIO - 1.0) * x * x / (2.0 * knee)
        } else {
            THRESHOLD_DB + over / RATIO
        }
    }

    pub fn process(&mut self, input: &AudioBlock, output: &mut AudioBlock, ctx: &RenderContext<'_>) {
        output.set_channel_count(input.channel_count());
        input.downmix_into(&mut self.detector);

        let knee = self.knee.value_at(ctx.start_frame as f64 / ctx.sample_rate as f64);
        let makeup_db = -0.6 * Self::static_curve(0.0, knee);
        let attack = (-1.0 / (ATTACK_SECONDS * ctx.sample_rate)).exp();
        let release = (-1.0 / (RELEASE_SECONDS * ctx.sample_rate)).exp();

        for i in 0..RENDER_QUANTUM {
            let level = self.detector[i].abs();
            let level_db = if level > 0.0 { 20.0 * level.log10() } else { FLOOR_DB };
            let target = Self::static_curve(level_db, knee) - level_db;

            let coeff = if target < self.envelope_db { attack } else { release };
            self.envelope_db = target + (self.envelope_db - target) * coeff;

            let gain = 10f32.powf((self.envelope_db + makeup_db) / 20.0);
            for ch in 0..input.channel_count() {
                output.channel_mut(ch)[i] = input.channel(ch)[i] * gain;
            }
        }
    }
}
