// Confetti burst played when a new quote lands
use moodjournal_core::Color;
use rand::Rng;
use std::time::Duration;

pub const PARTICLE_COUNT: usize = 100;
/// Full cone width around straight up
pub const SPREAD_DEGREES: f32 = 70.0;
/// Launch point as a fraction of the area
pub const ORIGIN_X: f32 = 0.5;
pub const ORIGIN_Y: f32 = 0.6;

/// Cells per second squared
const GRAVITY: f32 = 40.0;
/// Fraction of velocity lost per second
const DRAG: f32 = 0.6;
const MIN_SPEED: f32 = 20.0;
const MAX_SPEED: f32 = 45.0;
const MIN_LIFETIME_SECS: f32 = 1.5;
const MAX_LIFETIME_SECS: f32 = 3.0;
/// Terminal cells are about twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

const GLYPHS: [char; 6] = ['*', '+', '•', '▪', '◆', '●'];

const COLORS: [Color; 7] = [
    Color::rgb(0x26ccff),
    Color::rgb(0xa25afd),
    Color::rgb(0xff5e7e),
    Color::rgb(0x88ff5a),
    Color::rgb(0xfcff42),
    Color::rgb(0xffa62d),
    Color::rgb(0xff36ff),
];

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub age: f32,
    pub lifetime: f32,
    pub color: Color,
    pub glyph: char,
}

/// A set of particles living in a `width` x `height` cell area
#[derive(Debug, Clone, Default)]
pub struct Confetti {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
}

impl Confetti {
    pub fn new() -> Self {
        Self::default()
    }

    /// Throw a fresh burst, replacing whatever is still in the air
    pub fn launch<R: Rng + ?Sized>(&mut self, width: u16, height: u16, rng: &mut R) {
        self.width = width as f32;
        self.height = height as f32;
        self.clear();

        if width == 0 || height == 0 {
            return;
        }

        let origin_x = self.width * ORIGIN_X;
        let origin_y = self.height * ORIGIN_Y;
        let half_spread = SPREAD_DEGREES / 2.0;

        for _ in 0..PARTICLE_COUNT {
            let angle = (90.0 + rng.random_range(-half_spread..=half_spread)).to_radians();
            let speed = rng.random_range(MIN_SPEED..MAX_SPEED);

            self.particles.push(Particle {
                x: origin_x,
                y: origin_y,
                vx: speed * angle.cos() * CELL_ASPECT,
                vy: -speed * angle.sin(),
                age: 0.0,
                lifetime: rng.random_range(MIN_LIFETIME_SECS..MAX_LIFETIME_SECS),
                color: COLORS[rng.random_range(0..COLORS.len())],
                glyph: GLYPHS[rng.random_range(0..GLYPHS.len())],
            });
        }
    }

    /// Advance the simulation by `dt`
    pub fn tick(&mut self, dt: Duration) {
        let dt = dt.as_secs_f32();
        let damping = (1.0 - DRAG * dt).max(0.0);
        let (width, height) = (self.width, self.height);

        for p in &mut self.particles {
            p.vy += GRAVITY * dt;
            p.vx *= damping;
            p.vy *= damping;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.age += dt;
        }

        // Above the top edge is fine, they fall back in
        self.particles.retain(|p| {
            p.age < p.lifetime && p.y < height && p.x >= 0.0 && p.x < width
        });
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Drop every particle, e.g. when the area they were thrown in is gone
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn launched() -> Confetti {
        let mut confetti = Confetti::new();
        confetti.launch(100, 40, &mut StdRng::seed_from_u64(3));
        confetti
    }

    #[test]
    fn test_launch_from_origin() {
        let confetti = launched();
        assert!(confetti.is_active());
        assert_eq!(confetti.particles().len(), PARTICLE_COUNT);

        for p in confetti.particles() {
            assert!((p.x - 50.0).abs() < 1e-3);
            assert!((p.y - 24.0).abs() < 1e-3);
            // Every particle starts moving upward
            assert!(p.vy < 0.0);
            assert!(COLORS.contains(&p.color));
        }
    }

    #[test]
    fn test_spread_is_bounded() {
        let max_tan = (SPREAD_DEGREES / 2.0).to_radians().tan() * CELL_ASPECT;
        for p in launched().particles() {
            assert!((p.vx / -p.vy).abs() <= max_tan + 1e-3);
        }
    }

    #[test]
    fn test_particles_rise_then_fall() {
        let mut confetti = launched();
        let start_y = confetti.particles()[0].y;

        confetti.tick(Duration::from_millis(50));
        assert!(confetti.particles().iter().all(|p| p.y < start_y));

        for _ in 0..20 {
            confetti.tick(Duration::from_millis(50));
        }
        // Gravity has overtaken the launch speed by now
        assert!(confetti.is_active());
        assert!(confetti.particles().iter().all(|p| p.vy > 0.0));
    }

    #[test]
    fn test_burst_dies_out() {
        let mut confetti = launched();
        for _ in 0..100 {
            confetti.tick(Duration::from_millis(50));
        }
        assert!(!confetti.is_active());
    }

    #[test]
    fn test_zero_area_launches_nothing() {
        let mut confetti = Confetti::new();
        confetti.launch(0, 10, &mut StdRng::seed_from_u64(1));
        assert!(!confetti.is_active());
    }
}
