use std::borrow::Cow;
use std::f32::consts::TAU;

/// Cosine/sine of `i * TAU / n` for `i in 0..n`.
#[derive(Debug, Clone, PartialEq)]
pub struct SinCosValues {
    cos: Vec<f32>,
    sin: Vec<f32>,
}

impl SinCosValues {
    pub fn new(sides: u32) -> Self {
        let (cos, sin) = (0..sides)
            .map(|i| {
                let angle = i as f32 * TAU / sides as f32;
                (angle.cos(), angle.sin())
            })
            .unzip();
        Self { cos, sin }
    }

    /// Number of polygon sides.
    #[inline]
    pub fn len(&self) -> usize {
        self.cos.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cos.is_empty()
    }

    #[inline]
    pub fn cos_at(&self, i: usize) -> f32 {
        self.cos[i]
    }

    #[inline]
    pub fn sin_at(&self, i: usize) -> f32 {
        self.sin[i]
    }
}

/// Precomputed values for a small, fixed set of polygon side counts.
#[derive(Debug, Clone)]
pub struct TrigTable {
    // Sorted by side count.
    entries: Vec<SinCosValues>,
}

impl TrigTable {
    pub fn new(sizes: &[u32]) -> Self {
        let mut sizes = sizes.to_vec();
        sizes.sort_unstable();
        sizes.dedup();
        Self { entries: sizes.into_iter().filter(|&n| n > 0).map(SinCosValues::new).collect() }
    }

    /// Smallest table entry with at least `min_sides` sides.
    ///
    /// Requests above the largest entry are computed exactly rather than capped.
    pub fn values_with_size_at_least(&self, min_sides: u32) -> Cow<'_, SinCosValues> {
        match self.entries.iter().find(|e| e.len() >= min_sides as usize) {
            Some(values) => Cow::Borrowed(values),
            None => Cow::Owned(SinCosValues::new(min_sides)),
        }
    }
}

impl Default for TrigTable {
    fn default() -> Self {
        Self::new(&[16, 32, 64, 128])
    }
}
