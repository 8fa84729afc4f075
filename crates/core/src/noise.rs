//! Seeded 3D Perlin noise.
//!
//! [`NoiseField`] is classic gradient noise over a 256-periodic integer
//! lattice: a shuffled byte permutation (stored twice so lookups never wrap)
//! picks one of twelve edge gradients per cell corner, the corner
//! contributions are blended with the quintic fade curve. Output stays close
//! to [-1, 1] and is exactly zero on every lattice point.

use crate::prng::Xorshift64;

/// Edge-midpoint gradients of the unit cube.
const GRADIENTS: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Lattice period along every axis.
const PERIOD: usize = 256;

/// Deterministic 3D Perlin noise field.
///
/// Immutable after construction: [`NoiseField::noise`] is a pure function of
/// the permutation table and its input.
#[derive(Debug, Clone)]
pub struct NoiseField {
    perm: [u8; PERIOD * 2],
}

impl NoiseField {
    /// Builds a field whose permutation is a seeded shuffle of `0..=255`.
    pub fn new(seed: u64) -> Self {
        let mut base: [u8; PERIOD] = std::array::from_fn(|i| i as u8);
        Xorshift64::new(seed).shuffle(&mut base);
        Self {
            perm: std::array::from_fn(|i| base[i % PERIOD]),
        }
    }

    /// The duplicated 512-entry permutation table.
    pub fn permutation(&self) -> &[u8] {
        &self.perm
    }

    /// Samples the field at `(x, y, z)`.
    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let (x0, y0, z0) = (x.floor(), y.floor(), z.floor());
        let xi = lattice_index(x0);
        let yi = lattice_index(y0);
        let zi = lattice_index(z0);
        let (fx, fy, fz) = (x - x0, y - y0, z - z0);

        let corner = |dx: usize, dy: usize, dz: usize| -> f64 {
            let g = self.gradient_index(xi + dx, yi + dy, zi + dz);
            let [gx, gy, gz] = GRADIENTS[g];
            gx * (fx - dx as f64) + gy * (fy - dy as f64) + gz * (fz - dz as f64)
        };

        let n000 = corner(0, 0, 0);
        let n100 = corner(1, 0, 0);
        let n010 = corner(0, 1, 0);
        let n110 = corner(1, 1, 0);
        let n001 = corner(0, 0, 1);
        let n101 = corner(1, 0, 1);
        let n011 = corner(0, 1, 1);
        let n111 = corner(1, 1, 1);

        let u = fade(fx);
        let v = fade(fy);
        let w = fade(fz);

        let nx00 = lerp(n000, n100, u);
        let nx10 = lerp(n010, n110, u);
        let nx01 = lerp(n001, n101, u);
        let nx11 = lerp(n011, n111, u);

        let nxy0 = lerp(nx00, nx10, v);
        let nxy1 = lerp(nx01, nx11, v);

        lerp(nxy0, nxy1, w)
    }

    /// Double-hashes a corner through the permutation table.
    ///
    /// Inputs are at most 256, so every intermediate index is below 512.
    fn gradient_index(&self, x: usize, y: usize, z: usize) -> usize {
        let p = &self.perm;
        let hz = p[z] as usize;
        let hy = p[y + hz] as usize;
        p[x + hy] as usize % GRADIENTS.len()
    }
}

/// Wraps an already-floored coordinate into `0..256`.
fn lattice_index(floored: f64) -> usize {
    // `as` saturates for out-of-range and maps NaN to 0.
    (floored as i64).rem_euclid(PERIOD as i64) as usize
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
pub fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}
