//! Weighted choice over the engine RNG
//!
//! Builds a cumulative-weight table and draws one uniform number per choice,
//! so every multinomial decision consumes the RNG the same way.

use rand::Rng;

/// Cumulative-weight sampler over `items`.
#[derive(Debug, Clone)]
pub struct WeightedSampler<T> {
    items: Vec<T>,
    cumulative: Vec<f32>,
    total: f32,
}

impl<T: Copy> WeightedSampler<T> {
    /// Non-finite and negative weights count as zero.
    pub fn new(entries: impl IntoIterator<Item = (T, f32)>) -> Self {
        let mut items = Vec::new();
        let mut cumulative = Vec::new();
        let mut total = 0.0f32;
        for (item, weight) in entries {
            let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
            total += weight;
            items.push(item);
            cumulative.push(total);
        }
        Self { items, cumulative, total }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    /// Item whose cumulative band contains `roll * total`. With an all-zero
    /// table the draw is uniform instead.
    pub fn pick(&self, roll: f32) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        if self.total <= 0.0 {
            let idx = ((roll * self.items.len() as f32) as usize).min(self.items.len() - 1);
            return Some(self.items[idx]);
        }
        let target = roll * self.total;
        let idx = self.cumulative.partition_point(|&c| c <= target);
        if idx < self.items.len() {
            return Some(self.items[idx]);
        }
        // Rounding pushed the roll onto the top edge: first item reaching the total
        let idx = self.cumulative.partition_point(|&c| c < self.total);
        Some(self.items[idx.min(self.items.len() - 1)])
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        self.pick(rng.gen::<f32>())
    }
}
