//! Spatial and stereo panners. Both take a mono downmix and emit stereo.

use std::f32::consts::FRAC_PI_2;

use shared_types::{AutomationRate, PanningModel};

use super::convolver::PartitionedConvolution;
use super::RenderContext;
use crate::domain::block::{AudioBlock, Channel, RENDER_QUANTUM};
use crate::domain::param::AudioParam;

// Length of the synthetic head-related impulse responses.
const HRIR_LENGTH: usize = RENDER_QUANTUM;

// Largest interaural delay, in seconds.
const MAX_ITD_SECONDS: f32 = 0.00066;

/// Equal-power gains for a position in [0, 1] from hard left to hard right.
fn equal_power(x: f32) -> (f32, f32) {
    let angle = x.clamp(0.0, 1.0) * FRAC_PI_2;
    (angle.cos(), angle.sin())
}

/// Azimuth and elevation in degrees of `position` for a listener at the
/// origin facing -z with +y up. Azimuth is 0 in front, positive to the right.
pub fn azimuth_elevation(position: [f32; 3]) -> (f32, f32) {
    let [x, y, z] = position;
    let len = (x * x + y * y + z * z).sqrt();
    if len == 0.0 {
        return (0.0, 0.0);
    }
    let (x, y, z) = (x / len, y / len, z / len);

    let elevation = y.clamp(-1.0, 1.0).asin().to_degrees();

    // Projection onto the horizontal plane.
    let plen = (x * x + z * z).sqrt();
    if plen == 0.0 {
        return (0.0, elevation);
    }
    let mut azimuth = (x / plen).clamp(-1.0, 1.0).acos().to_degrees();
    if -z / plen < 0.0 {
        azimuth = 360.0 - azimuth;
    }
    azimuth = if (0.0..=270.0).contains(&azimuth) {
        90.0 - azimuth
    } else {
        450.0 - azimuth
    };
    (azimuth, elevation)
}

/// Inverse distance attenuation with unit reference distance and rolloff.
pub fn inverse_distance_gain(position: [f32; 3]) -> f32 {
    let [x, y, z] = position;
    let d = (x * x + y * y + z * z).sqrt().max(1.0);
    1.0 / d
}

/// A pair of synthetic head-related impulse responses.
fn synthetic_hrir(azimuth: f32, sample_rate: f32) -> (Vec<f32>, Vec<f32>) {
    let side = azimuth.to_radians().sin();
    let delay = (side.abs() * MAX_ITD_SECONDS * sample_rate).round() as usize;
    let delay = delay.min(HRIR_LENGTH - 1);
    let (far_gain, near_gain) = equal_power((side.abs() + 1.0) / 2.0);

    let decay = |start: usize, gain: f32| -> Vec<f32> {
        (0..HRIR_LENGTH)
            .map(|i| {
                if i < start {
                    0.0
                } else {
                    gain * (-((i - start) as f32) / 8.0).exp() / 4.0
                }
            })
            .collect()
    };

    // Positive azimuth: right ear is near and hears first.
    if side >= 0.0 {
        (decay(delay, far_gain), decay(0, near_gain))
    } else {
        (decay(0, near_gain), decay(delay, far_gain))
    }
}

#[derive(Debug)]
enum Spatializer {
    EqualPower { left: f32, right: f32 },
    Hrtf {
        left: PartitionedConvolution,
        right: PartitionedConvolution,
    },
}

/// Positions a mono signal in 3D space.
#[derive(Debug)]
pub struct PannerNode {
    model: PanningModel,
    position: [f32; 3],
    spatializer: Spatializer,
    mono: Channel,
}

impl PannerNode {
    pub fn new(model: PanningModel, position: [f32; 3], sample_rate: f32) -> Self {
        let (azimuth, _) = azimuth_elevation(position);
        let distance_gain = inverse_distance_gain(position);

        let spatializer = match model {
            PanningModel::EqualPower => {
                // Fold rear positions onto the front half-plane.
                let az = if azimuth < -90.0 {
                    -180.0 - azimuth
                } else if azimuth > 90.0 {
                    180.0 - azimuth
                } else {
                    azimuth
                };
                let (left, right) = equal_power((az + 90.0) / 180.0);
                Spatializer::EqualPower {
                    left: left * distance_gain,
                    right: right * distance_gain,
                }
            }
            PanningModel::Hrtf => {
                let (left, right) = synthetic_hrir(azimuth, sample_rate);
                Spatializer::Hrtf {
                    left: PartitionedConvolution::new(&left, distance_gain),
                    right: PartitionedConvolution::new(&right, distance_gain),
                }
            }
        };

        Self {
            model,
            position,
            spatializer,
            mono: [0.0; RENDER_QUANTUM],
        }
    }

    pub fn model(&self) -> PanningModel {
        self.model
    }

    pub fn position(&self) -> [f32; 3] {
        self.position
    }

    pub fn process(&mut self, input: &AudioBlock, output: &mut AudioBlock) {
        input.downmix_into(&mut self.mono);
        output.set_channel_count(2);

        match &mut self.spatializer {
            Spatializer::EqualPower { left, right } => {
                for (ch, gain) in [*left, *right].into_iter().enumerate() {
                    for (o, s) in output.channel_mut(ch).iter_mut().zip(self.mono.iter()) {
                        *o = s * gain;
                    }
                }
            }
            Spatializer::Hrtf { left, right } => {
                left.process(&self.mono, output.channel_mut(0));
                right.process(&self.mono, output.channel_mut(1));
            }
        }
    }
}

/// Equal-power stereo panner driven by an a-rate `pan` parameter.
#[derive(Debug)]
pub struct StereoPannerNode {
    pan: AudioParam,
    mono: Channel,
    pans: Channel,
}

impl StereoPannerNode {
    pub fn new() -> Self {
        Self {
            pan: AudioParam::new(0.0, AutomationRate::ARate).with_range(-1.0, 1.0),
            mono: [0.0; RENDER_QUANTUM],
            pans: [0.0; RENDER_QUANTUM],
        }
    }

    pub fn pan_mut(&mut self) -> &mut AudioParam {
        &mut self.pan
    }

    pub fn process(&mut self, input: &AudioBlock, output: &mut AudioBlock, ctx: &RenderContext<'_>) {
        input.downmix_into(&mut self.mono);
        self.pan.fill(ctx.start_frame, ctx.sample_rate, &mut self.pans);
        output.set_channel_count(2);

        for i in 0..RENDER_QUANTUM {
            let (l, r) = equal_power((self.pans[i] + 1.0) / 2.0);
            let s = self.mono[i];
            output.channel_mut(0)[i] = s * l;
            output.channel_mut(1)[i] = s * r;
        }
    }
}

impl Default for StereoPannerNode {
    fn default() -> Self {
        Self::new()
    }
}
