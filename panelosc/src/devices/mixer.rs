/// Output gain applied to each side of the cross-fade
const OUTPUT_GAIN: f32 = 0.9;

/// Per-block smoothing coefficient for the mix
const SMOOTHING: f32 = 0.1;

/// A block-rate one-pole smoother for the cross-fade between the two
/// oscillators.
#[derive(Clone, Default, Debug)]
pub struct MixSmoother {
    mix: f32,
}

impl MixSmoother {
    /// Constructor, starting fully on the first oscillator
    pub fn new() -> Self {
        Default::default()
    }
    /// Move the mix a tenth of the way towards `target`, clamp it to
    /// `[0, 1]` and return it
    pub fn update(&mut self, target: f32) -> f32 {
        let mix = self.mix + (target - self.mix) * SMOOTHING;
        self.mix = mix.clamp(0.0, 1.0);
        self.mix
    }
    /// The current mix
    pub fn mix(&self) -> f32 {
        self.mix
    }
    /// The gains to apply to the first and second oscillator at the current
    /// mix
    pub fn gains(&self) -> (f32, f32) {
        ((1.0 - self.mix) * OUTPUT_GAIN, self.mix * OUTPUT_GAIN)
    }
}
