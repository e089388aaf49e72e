use rand::Rng;

use crate::config::ParticleSettings;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub alpha: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub distance: f64,
}

pub fn particle_count(width: f64, settings: &ParticleSettings) -> usize {
    let scaled = (width * settings.density).floor();
    let scaled = if scaled.is_finite() && scaled > 0.0 {
        scaled as usize
    } else {
        0
    };
    scaled.max(settings.min_count)
}

pub fn backing_size(width: f64, height: f64, device_pixel_ratio: f64) -> (u32, u32, f64) {
    let dpr = if device_pixel_ratio.is_finite() {
        device_pixel_ratio.max(1.0)
    } else {
        1.0
    };
    let pixel_w = (width.max(0.0) * dpr).floor() as u32;
    let pixel_h = (height.max(0.0) * dpr).floor() as u32;
    (pixel_w, pixel_h, dpr)
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    settings: ParticleSettings,
}

impl ParticleField {
    pub fn new(settings: ParticleSettings) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            particles: Vec::new(),
            settings,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn settings(&self) -> &ParticleSettings {
        &self.settings
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn reseed<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        let count = particle_count(self.width, &self.settings);
        let settings = &self.settings;
        let (width, height) = (self.width, self.height);
        self.particles = (0..count)
            .map(|_| Particle {
                x: rng.random_range(0.0..=width),
                y: rng.random_range(0.0..=height),
                radius: rng.random_range(settings.radius_min..=settings.radius_max),
                vx: rng.random_range(-settings.speed_max..=settings.speed_max),
                vy: rng.random_range(-settings.speed_max..=settings.speed_max),
                alpha: rng.random_range(settings.alpha_min..=settings.alpha_max),
            })
            .collect();
    }

    /// Applies a new logical size. A width change (or an empty field) reseeds
    /// the population; a height-only change keeps particles where they are.
    pub fn resize<R: Rng + ?Sized>(&mut self, width: f64, height: f64, rng: &mut R) -> bool {
        if self.particles.is_empty() || width != self.width {
            self.reseed(width, height, rng);
            return true;
        }
        self.height = height.max(0.0);
        false
    }

    pub fn step(&mut self) {
        let (width, height, margin) = (self.width, self.height, self.settings.wrap_margin);
        for particle in &mut self.particles {
            particle.x += particle.vx;
            particle.y += particle.vy;
            wrap_particle(particle, width, height, margin);
        }
    }

    pub fn links(&self) -> Vec<Link> {
        let limit = self.settings.link_distance;
        let mut links = Vec::new();
        for (a, p1) in self.particles.iter().enumerate() {
            for (offset, p2) in self.particles[a + 1..].iter().enumerate() {
                let dx = p1.x - p2.x;
                let dy = p1.y - p2.y;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance < limit {
                    links.push(Link {
                        a,
                        b: a + 1 + offset,
                        distance,
                    });
                }
            }
        }
        links
    }
}

/// Toroidal wrap: leaving by more than `margin` on one side re-enters at the
/// opposite side's margin.
pub fn wrap_particle(particle: &mut Particle, width: f64, height: f64, margin: f64) {
    if particle.x < -margin {
        particle.x = width + margin;
    }
    if particle.x > width + margin {
        particle.x = -margin;
    }
    if particle.y < -margin {
        particle.y = height + margin;
    }
    if particle.y > height + margin {
        particle.y = -margin;
    }
}
