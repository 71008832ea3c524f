// Scales mapping data domains onto pixel ranges and colors
use indexmap::IndexSet;

/// Maps discrete categories onto evenly spaced bands. Repeated categories
/// share the band of their first occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale {
    domain: IndexSet<String>,
    start: f64,
    step: f64,
    bandwidth: f64,
}

impl BandScale {
    /// `padding` applies both between bands and at the outer edges.
    pub fn new<I, S>(domain: I, range: (f64, f64), padding: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let domain: IndexSet<String> = domain.into_iter().map(Into::into).collect();
        let n = domain.len() as f64;
        let (r0, r1) = range;
        let step = (r1 - r0) / (n - padding + padding * 2.0).max(1.0);
        let start = r0 + (r1 - r0 - step * (n - padding)) * 0.5;

        Self {
            domain,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        }
    }

    pub fn position(&self, key: &str) -> Option<f64> {
        self.domain
            .get_index_of(key)
            .map(|index| self.start + self.step * index as f64)
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn domain(&self) -> &IndexSet<String> {
        &self.domain
    }
}

/// Maps a continuous domain onto a continuous range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Domain `[min - pad, max + pad]` where `pad` is `fraction` of the span,
    /// or `fallback` when every value is equal.
    pub fn padded(min: f64, max: f64, fraction: f64, fallback: f64, range: (f64, f64)) -> Self {
        let pad = (max - min) * fraction;
        let pad = if pad == 0.0 { fallback } else { pad };
        Self::new((min - pad, max + pad), range)
    }

    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let t = if d1 == d0 { 0.5 } else { (value - d0) / (d1 - d0) };
        r0 + t * (r1 - r0)
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Round tick values covering the domain, about `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = if self.domain.0 <= self.domain.1 {
            self.domain
        } else {
            (self.domain.1, self.domain.0)
        };
        if count == 0 || !lo.is_finite() || !hi.is_finite() {
            return Vec::new();
        }
        if lo == hi {
            return vec![lo];
        }

        let increment = tick_increment(lo, hi, count);
        if increment < 0.0 {
            let inv = -increment;
            let mut i0 = (lo * inv).round();
            let mut i1 = (hi * inv).round();
            if i0 / inv < lo {
                i0 += 1.0;
            }
            if i1 / inv > hi {
                i1 -= 1.0;
            }
            steps(i0, i1).map(|i| i / inv).collect()
        } else {
            let mut i0 = (lo / increment).round();
            let mut i1 = (hi / increment).round();
            if i0 * increment < lo {
                i0 += 1.0;
            }
            if i1 * increment > hi {
                i1 -= 1.0;
            }
            steps(i0, i1).map(|i| i * increment).collect()
        }
    }

    /// Decimal places needed to tell ticks apart.
    pub fn tick_precision(&self, count: usize) -> usize {
        let (lo, hi) = self.domain;
        let increment = tick_increment(lo.min(hi), lo.max(hi), count.max(1));
        if increment < 0.0 {
            (-increment).log10().ceil().max(0.0) as usize
        } else {
            0
        }
    }
}

fn steps(i0: f64, i1: f64) -> impl Iterator<Item = f64> {
    let n = if i1 >= i0 { (i1 - i0) as usize + 1 } else { 0 };
    (0..n).map(move |k| i0 + k as f64)
}

// Positive: step size. Negative: inverse of a fractional step size.
fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / count as f64;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };

    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -10f64.powf(-power) / factor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn mix(self, other: Rgb, t: f64) -> Rgb {
        let channel = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb::new(
            channel(self.r, other.r),
            channel(self.g, other.g),
            channel(self.b, other.b),
        )
    }
}

const REDS: [Rgb; 9] = [
    Rgb::new(0xff, 0xf5, 0xf0),
    Rgb::new(0xfe, 0xe0, 0xd2),
    Rgb::new(0xfc, 0xbb, 0xa1),
    Rgb::new(0xfc, 0x92, 0x72),
    Rgb::new(0xfb, 0x6a, 0x4a),
    Rgb::new(0xef, 0x3b, 0x2c),
    Rgb::new(0xcb, 0x18, 0x1d),
    Rgb::new(0xa5, 0x0f, 0x15),
    Rgb::new(0x67, 0x00, 0x0d),
];

/// Sequential white-to-dark-red ramp; `t` is clamped to [0, 1].
pub fn interpolate_reds(t: f64) -> Rgb {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (REDS.len() - 1) as f64;
    let index = (scaled.floor() as usize).min(REDS.len() - 2);
    REDS[index].mix(REDS[index + 1], scaled - index as f64)
}

/// Cyclical cubehelix rainbow.
pub fn interpolate_rainbow(t: f64) -> Rgb {
    let t = t - t.floor();
    let ts = (t - 0.5).abs();
    let hue = 360.0 * t - 100.0;
    let saturation = 1.5 - 1.5 * ts;
    let lightness = 0.8 - 0.9 * ts;
    cubehelix(hue, saturation, lightness)
}

fn cubehelix(hue: f64, saturation: f64, lightness: f64) -> Rgb {
    const A: f64 = -0.14861;
    const B: f64 = 1.78277;
    const C: f64 = -0.29227;
    const D: f64 = -0.90649;
    const E: f64 = 1.97294;

    let h = (hue + 120.0).to_radians();
    let amplitude = saturation * lightness * (1.0 - lightness);
    let (sin_h, cos_h) = h.sin_cos();
    let channel = |v: f64| (255.0 * v).round().clamp(0.0, 255.0) as u8;

    Rgb::new(
        channel(lightness + amplitude * (A * cos_h + B * sin_h)),
        channel(lightness + amplitude * (C * cos_h + D * sin_h)),
        channel(lightness + amplitude * (E * cos_h)),
    )
}

/// Maps a numeric domain onto a color ramp, clamping outside values.
#[derive(Debug, Clone, Copy)]
pub struct SequentialScale {
    domain: (f64, f64),
    interpolator: fn(f64) -> Rgb,
}

impl SequentialScale {
    pub fn new(domain: (f64, f64), interpolator: fn(f64) -> Rgb) -> Self {
        Self { domain, interpolator }
    }

    pub fn color(&self, value: f64) -> Rgb {
        let (d0, d1) = self.domain;
        let t = if d1 == d0 { 0.5 } else { (value - d0) / (d1 - d0) };
        (self.interpolator)(t)
    }
}
