use std::f64::consts::PI;

use rustfft::num_complex::Complex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StemError};

/*
Butterworth band-pass, designed the classic way:

| step               | domain  | what happens                                     |
| ------------------ | ------- | ------------------------------------------------ |
| prototype          | s-plane | N poles evenly spaced on the left unit semicircle |
| prewarp            | s-plane | band edges mapped so the bilinear step lands them |
| low-pass→band-pass | s-plane | each pole splits in two around sqrt(wl × wh)      |
| bilinear           | z-plane | s → z, N zeros at z = +1 and N at z = -1          |
| sections           | z-plane | conjugate pole pairs become second-order sections |

An order-N design has 2N poles and runs as N biquads in series. Gain is
unity at the geometric centre of the band and -3 dB at both edges.

The band is static: the same coefficients filter the whole signal.
*/

/// Band-pass design parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub low_hz: f32,
    pub high_hz: f32,
    pub order: usize,
}

impl FilterSpec {
    pub const fn new(low_hz: f32, high_hz: f32, order: usize) -> Self {
        Self {
            low_hz,
            high_hz,
            order,
        }
    }

    /// Both edges must sit strictly between 0 Hz and Nyquist, low below high.
    pub fn validate(&self, sample_rate: u32) -> Result<()> {
        let nyquist = sample_rate as f32 / 2.0;
        if self.order == 0 {
            return Err(StemError::invalid("filter.order", "must be at least 1"));
        }
        for (name, hz) in [("filter.low_hz", self.low_hz), ("filter.high_hz", self.high_hz)] {
            if !hz.is_finite() || hz <= 0.0 {
                return Err(StemError::invalid(name, format!("must be positive, got {hz}")));
            }
            if hz >= nyquist {
                return Err(StemError::invalid(
                    name,
                    format!("{hz} Hz is at or above Nyquist ({nyquist} Hz)"),
                ));
            }
        }
        if self.low_hz >= self.high_hz {
            return Err(StemError::invalid(
                "filter.low_hz",
                format!(
                    "low edge {} Hz must be below high edge {} Hz",
                    self.low_hz, self.high_hz
                ),
            ));
        }
        Ok(())
    }
}

/// Direct Form II Transposed second-order section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    z1: f64,
    z2: f64,
}

impl Biquad {
    /// Coefficients normalised so that `a0 == 1`.
    pub fn new(b0: f64, b1: f64, b2: f64, a1: f64, a2: f64) -> Self {
        Self {
            b0,
            b1,
            b2,
            a1,
            a2,
            z1: 0.0,
            z2: 0.0,
        }
    }

    #[inline]
    pub fn next_sample(&mut self, x: f64) -> f64 {
        let y = self.b0 * x + self.z1;
        self.z1 = self.b1 * x - self.a1 * y + self.z2;
        self.z2 = self.b2 * x - self.a2 * y;
        y
    }

    pub fn reset(&mut self) {
        self.z1 = 0.0;
        self.z2 = 0.0;
    }

    /// Pole radius of this section; below 1.0 means stable.
    pub fn pole_radius(&self) -> f64 {
        let disc = Complex::new(self.a1 * self.a1 - 4.0 * self.a2, 0.0).sqrt();
        let p1 = (Complex::new(-self.a1, 0.0) + disc) * 0.5;
        let p2 = (Complex::new(-self.a1, 0.0) - disc) * 0.5;
        p1.norm().max(p2.norm())
    }
}

/// Cascade of biquads implementing a Butterworth band-pass.
#[derive(Debug, Clone)]
pub struct ButterworthBandpass {
    sections: Vec<Biquad>,
}

impl ButterworthBandpass {
    pub fn design(spec: FilterSpec, sample_rate: u32) -> Result<Self> {
        spec.validate(sample_rate)?;

        let fs2 = 2.0 * f64::from(sample_rate);
        let order = spec.order;

        // Prewarped analog band edges
        let wl = fs2 * (PI * f64::from(spec.low_hz) / f64::from(sample_rate)).tan();
        let wh = fs2 * (PI * f64::from(spec.high_hz) / f64::from(sample_rate)).tan();
        let bw = wh - wl;
        let w0_sq = wl * wh;

        let mut analog_poles = Vec::with_capacity(2 * order);
        for k in 0..order {
            let theta = PI * (2 * k + order + 1) as f64 / (2 * order) as f64;
            let prototype = Complex::from_polar(1.0, theta);
            let half = prototype * (bw / 2.0);
            let split = (half * half - w0_sq).sqrt();
            analog_poles.push(half + split);
            analog_poles.push(half - split);
        }

        // Analog gain bw^N with N zeros at s = 0, carried through the bilinear map
        let fs2_c = Complex::new(fs2, 0.0);
        let denominator = analog_poles
            .iter()
            .fold(Complex::new(1.0, 0.0), |acc, &p| acc * (fs2_c - p));
        let numerator = Complex::new(bw.powi(order as i32) * fs2.powi(order as i32), 0.0);
        let gain = (numerator / denominator).re;

        let digital_poles: Vec<Complex<f64>> = analog_poles
            .iter()
            .map(|&p| (fs2_c + p) / (fs2_c - p))
            .collect();

        let mut sections = pair_poles(&digital_poles);
        if let Some(first) = sections.first_mut() {
            first.b0 *= gain;
            first.b2 *= gain;
        }

        debug!(
            low_hz = spec.low_hz,
            high_hz = spec.high_hz,
            order,
            sections = sections.len(),
            "designed butterworth band-pass"
        );

        Ok(Self { sections })
    }

    pub fn sections(&self) -> &[Biquad] {
        &self.sections
    }

    /// Filter `buffer` in place, carrying state across calls.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let mut x = f64::from(*sample);
            for section in self.sections.iter_mut() {
                x = section.next_sample(x);
            }
            *sample = x as f32;
        }
    }

    pub fn reset(&mut self) {
        for section in self.sections.iter_mut() {
            section.reset();
        }
    }
}

/// Group z-plane poles into second-order sections with zeros at +1 and -1.
fn pair_poles(poles: &[Complex<f64>]) -> Vec<Biquad> {
    const IMAG_EPS: f64 = 1e-9;

    let mut sections = Vec::with_capacity(poles.len() / 2);
    let mut real_poles = Vec::new();

    for p in poles {
        if p.im > IMAG_EPS {
            // The conjugate (im < 0) is implied by this section
            sections.push(Biquad::new(1.0, 0.0, -1.0, -2.0 * p.re, p.norm_sqr()));
        } else if p.im.abs() <= IMAG_EPS {
            real_poles.push(p.re);
        }
    }

    real_poles.sort_by(f64::total_cmp);
    for pair in real_poles.chunks(2) {
        match *pair {
            [r1, r2] => sections.push(Biquad::new(1.0, 0.0, -1.0, -(r1 + r2), r1 * r2)),
            [r] => sections.push(Biquad::new(1.0, 0.0, -1.0, -r, 0.0)),
            _ => {}
        }
    }

    sections
}

/// Band-pass `signal` between `low_hz` and `high_hz` with an order-`order`
/// Butterworth design.
pub fn bandpass(
    signal: &[f32],
    low_hz: f32,
    high_hz: f32,
    sample_rate: u32,
    order: usize,
) -> Result<Vec<f32>> {
    let mut filter = ButterworthBandpass::design(FilterSpec::new(low_hz, high_hz, order), sample_rate)?;
    let mut output = signal.to_vec();
    filter.render(&mut output);
    Ok(output)
}
