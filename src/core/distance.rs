use super::color::{Color, Hsl};
use super::generator::Swatch;

pub const HUE_WEIGHT: f64 = 0.6;
pub const SATURATION_WEIGHT: f64 = 0.2;
pub const LIGHTNESS_WEIGHT: f64 = 0.2;

/// A symmetric, non-negative dissimilarity between two values.
pub trait Metric<T: ?Sized> {
    fn distance(&self, a: &T, b: &T) -> f64;
}

/// Weighted HSL distance with a circular hue axis. Used to order the palette.
#[derive(Clone, Copy, Debug, Default)]
pub struct PerceptualHsl;

/// Straight-line distance between RGB triples. Used at assignment time,
/// when colors are only known by their hex value.
#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanRgb;

/// `0.6 * hue + 0.2 * saturation + 0.2 * lightness`, where the hue term is
/// the shortest arc between the two hues (at most 0.5).
pub fn hsl_distance(a: Hsl, b: Hsl) -> f64 {
    let dh = (a.hue - b.hue).abs();
    let hue = dh.min(1.0 - dh);
    let saturation = (a.saturation - b.saturation).abs();
    let lightness = (a.lightness - b.lightness).abs();
    hue * HUE_WEIGHT + saturation * SATURATION_WEIGHT + lightness * LIGHTNESS_WEIGHT
}

pub fn rgb_distance(a: Color, b: Color) -> f64 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    ((dr * dr + dg * dg + db * db) as f64).sqrt()
}

impl Metric<Hsl> for PerceptualHsl {
    fn distance(&self, a: &Hsl, b: &Hsl) -> f64 {
        hsl_distance(*a, *b)
    }
}

impl Metric<Swatch> for PerceptualHsl {
    fn distance(&self, a: &Swatch, b: &Swatch) -> f64 {
        hsl_distance(a.hsl, b.hsl)
    }
}

impl Metric<Color> for EuclideanRgb {
    fn distance(&self, a: &Color, b: &Color) -> f64 {
        rgb_distance(*a, *b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn hue_takes_the_short_way_round() {
        let a = Hsl::new(0.05, 0.5, 0.5);
        let b = Hsl::new(0.95, 0.5, 0.5);
        assert!(close(hsl_distance(a, b), 0.1 * HUE_WEIGHT));

        let opposite = hsl_distance(Hsl::new(0.0, 0.5, 0.5), Hsl::new(0.5, 0.5, 0.5));
        assert!(close(opposite, 0.5 * HUE_WEIGHT));
    }

    #[test]
    fn hsl_weights() {
        let a = Hsl::new(0.0, 0.9, 0.6);
        let b = Hsl::new(0.0, 0.5, 0.8);
        assert!(close(hsl_distance(a, b), 0.4 * 0.2 + 0.2 * 0.2));
    }

    #[test]
    fn rgb_known_values() {
        let black = Color::rgb(0, 0, 0);
        let white = Color::rgb(255, 255, 255);
        assert!(close(rgb_distance(black, white), (3.0f64 * 255.0 * 255.0).sqrt()));
        assert!(close(rgb_distance(Color::rgb(3, 4, 0), black), 5.0));
    }

    #[test]
    fn metrics_are_symmetric_and_zero_on_identity() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let a = Hsl::new(rng.gen(), rng.gen(), rng.gen());
            let b = Hsl::new(rng.gen(), rng.gen(), rng.gen());
            assert_eq!(hsl_distance(a, b), hsl_distance(b, a));
            assert!(hsl_distance(a, b) >= 0.0);
            assert_eq!(hsl_distance(a, a), 0.0);

            let c = Color::from_rgb(rng.gen());
            let d = Color::from_rgb(rng.gen());
            assert_eq!(rgb_distance(c, d), rgb_distance(d, c));
            assert_eq!(rgb_distance(c, c), 0.0);
            assert_eq!(rgb_distance(c, d) == 0.0, c == d);
        }
    }

    #[test]
    fn trait_impls_agree_with_functions() {
        let a = Color::rgb(10, 20, 30);
        let b = Color::rgb(40, 0, 30);
        assert_eq!(EuclideanRgb.distance(&a, &b), rgb_distance(a, b));
        let (x, y) = (a.to_hsl(), b.to_hsl());
        assert_eq!(PerceptualHsl.distance(&x, &y), hsl_distance(x, y));
    }
}
