use crate::ModelError;
use rand::{
    rngs::{SmallRng, StdRng},
    Rng, SeedableRng,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Difficulty {
    pub num_items: usize,
    /// Spare capacity beyond the total item weight, as a percentage of it.
    pub capacity_margin_percent: u32,
}

/// A bin packing instance: item weights and a capacity shared by all bins.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Instance {
    pub weights: Vec<f64>,
    pub capacity: f64,
    pub num_bins: usize,
}

impl Instance {
    /// `num_bins` defaults to one bin per item, the trivial upper bound.
    pub fn new(weights: Vec<f64>, capacity: f64, num_bins: Option<usize>) -> Result<Self, ModelError> {
        let num_bins = num_bins.unwrap_or(weights.len());
        let instance = Self {
            weights,
            capacity,
            num_bins,
        };
        instance.validate()?;
        Ok(instance)
    }

    pub(crate) fn validate(&self) -> Result<(), ModelError> {
        if self.weights.is_empty() {
            return Err(ModelError::InvalidInput("at least one item is required".into()));
        }
        if let Some(weight) = self.weights.iter().find(|w| !(**w > 0.0)) {
            return Err(ModelError::InvalidInput(format!(
                "item weights must be positive, got {}",
                weight
            )));
        }
        if !(self.capacity > 0.0) {
            return Err(ModelError::InvalidInput(format!(
                "capacity must be positive, got {}",
                self.capacity
            )));
        }
        if self.num_bins == 0 {
            return Err(ModelError::InvalidInput("num_bins must be positive".into()));
        }
        Ok(())
    }

    pub fn num_items(&self) -> usize {
        self.weights.len()
    }

    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Minimum number of bits able to express any bin's unused capacity.
    ///
    /// Only defined when the capacity strictly exceeds the total weight;
    /// otherwise the log2 is taken of a non-positive margin and the
    /// instance cannot be encoded.
    pub fn slack_bits(&self) -> Result<usize, ModelError> {
        let margin = self.capacity - self.total_weight();
        if margin <= 0.0 {
            return Err(ModelError::InvalidCapacity {
                capacity: self.capacity,
                total_weight: self.total_weight(),
            });
        }
        Ok((margin.log2().ceil() as usize).max(1))
    }

    /// Deterministically generates a random instance from a seed.
    ///
    /// Weights are uniform in `[1, 50]`; the capacity is the total weight
    /// plus the difficulty's margin (at least 1), so generated instances
    /// always satisfy the capacity precondition.
    pub fn generate(seed: &[u8; 32], difficulty: &Difficulty) -> Result<Instance, ModelError> {
        let mut rng = SmallRng::from_seed(StdRng::from_seed(seed.clone()).gen());
        let weights: Vec<f64> = (0..difficulty.num_items)
            .map(|_| rng.gen_range(1..=50) as f64)
            .collect();
        let total: f64 = weights.iter().sum();
        let margin = (total * difficulty.capacity_margin_percent as f64 / 100.0)
            .ceil()
            .max(1.0);
        Instance::new(weights, total + margin, None)
    }
}
