//! Coherent noise capability for the flow-field sway

/// Smooth scalar field over `(x, y, t)` with values in `[0, 1]`
pub trait NoiseSource {
    fn sample(&self, x: f32, y: f32, t: f32) -> f32;
}

/// Constant field (0.5 means "no deflection")
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantNoise(pub f32);

impl NoiseSource for ConstantNoise {
    fn sample(&self, _x: f32, _y: f32, _t: f32) -> f32 {
        self.0
    }
}

/// Seeded lattice value noise with smoothstep interpolation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueNoise {
    seed: u32,
}

impl ValueNoise {
    pub fn new(seed: u64) -> Self {
        Self {
            seed: (seed ^ (seed >> 32)) as u32,
        }
    }

    /// Hash a lattice point to `[0, 1]`
    fn lattice(&self, x: i32, y: i32, z: i32) -> f32 {
        let mut h = self.seed
            ^ (x as u32).wrapping_mul(0x8da6_b343)
            ^ (y as u32).wrapping_mul(0xd816_3841)
            ^ (z as u32).wrapping_mul(0xcb1a_b31f);
        h = (h ^ (h >> 15)).wrapping_mul(2654435761);
        h ^= h >> 13;
        h = h.wrapping_mul(0x85eb_ca6b);
        h ^= h >> 16;
        (h & 0x00ff_ffff) as f32 / 0x00ff_ffff as f32
    }
}

#[inline]
fn smoothstep(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

impl NoiseSource for ValueNoise {
    fn sample(&self, x: f32, y: f32, t: f32) -> f32 {
        let (x0, y0, z0) = (x.floor(), y.floor(), t.floor());
        let fx = smoothstep(x - x0);
        let fy = smoothstep(y - y0);
        let fz = smoothstep(t - z0);
        let (ix, iy, iz) = (x0 as i32, y0 as i32, z0 as i32);

        let corner = |dx: i32, dy: i32, dz: i32| self.lattice(ix + dx, iy + dy, iz + dz);

        let front = lerp(
            lerp(corner(0, 0, 0), corner(1, 0, 0), fx),
            lerp(corner(0, 1, 0), corner(1, 1, 0), fx),
            fy,
        );
        let back = lerp(
            lerp(corner(0, 0, 1), corner(1, 0, 1), fx),
            lerp(corner(0, 1, 1), corner(1, 1, 1), fx),
            fy,
        );
        lerp(front, back, fz).clamp(0.0, 1.0)
    }
}
