use crate::{Instance, ModelError, Qubo, Sample, Variable};
use log::debug;
use serde::{Deserialize, Serialize};

/// A bin packing instance encoded as a QUBO, together with the metadata
/// needed to interpret solver samples against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    instance: Instance,
    lagrange: f64,
    slack_bits: usize,
    qubo: Qubo,
}

fn pow2(bit: usize) -> f64 {
    2f64.powi(bit as i32)
}

impl Model {
    /// Builds the cost map minimizing the number of bins used, subject to
    /// penalty-encoded constraints:
    ///
    /// 1. each item in exactly one bin: `(sum_i x_ij - 1)^2` per item;
    /// 2. per-bin capacity as a squared slack-augmented equality:
    ///    `(sum_j w_j x_ij - V y_i + sum_b 2^b k_ib)^2`, zero exactly when
    ///    the slack bits make up the bin's unused capacity;
    /// 3. `lagrange` on each `y_i` diagonal for the objective.
    ///
    /// The constraint penalties scale with `capacity^2` while the objective
    /// scales with `lagrange`; picking a ratio that makes constraint
    /// violations unprofitable is the caller's responsibility.
    pub fn encode(instance: &Instance, lagrange: f64) -> Result<Self, ModelError> {
        instance.validate()?;
        if !(lagrange > 0.0) {
            return Err(ModelError::InvalidInput(format!(
                "lagrange must be positive, got {}",
                lagrange
            )));
        }
        let slack_bits = instance.slack_bits()?;
        let num_items = instance.num_items();
        let num_bins = instance.num_bins;
        let capacity = instance.capacity;
        let weights = &instance.weights;
        let mut qubo = Qubo::new();

        // (sum_i x_ij - 1)^2 expands to -x_ij on the diagonal, +2 across
        // bin pairs, and a constant +1 per item.
        for item in 0..num_items {
            qubo.add_offset(1.0);
            for bin in 0..num_bins {
                qubo.add(Variable::assign(bin, item), Variable::assign(bin, item), -1.0);
                for other in bin + 1..num_bins {
                    qubo.add(Variable::assign(bin, item), Variable::assign(other, item), 2.0);
                }
            }
        }

        // (sum_j w_j x_ij - V y_i + sum_b 2^b k_ib)^2 per bin.
        for bin in 0..num_bins {
            qubo.add(Variable::used(bin), Variable::used(bin), capacity * capacity);
            for item in 0..num_items {
                let x = Variable::assign(bin, item);
                qubo.add(x, x, weights[item] * weights[item]);
                for other in item + 1..num_items {
                    qubo.add(x, Variable::assign(bin, other), 2.0 * weights[item] * weights[other]);
                }
                qubo.add(x, Variable::used(bin), -2.0 * capacity * weights[item]);
                for bit in 0..slack_bits {
                    qubo.add(x, Variable::slack(bin, bit), 2.0 * weights[item] * pow2(bit));
                }
            }
            for bit in 0..slack_bits {
                let k = Variable::slack(bin, bit);
                qubo.add(k, k, pow2(bit) * pow2(bit));
                for other in bit + 1..slack_bits {
                    qubo.add(k, Variable::slack(bin, other), 2.0 * pow2(bit) * pow2(other));
                }
                qubo.add(k, Variable::used(bin), -2.0 * capacity * pow2(bit));
            }
        }

        // Objective: one unit per used bin, on top of the capacity term
        // already sitting on the y diagonal.
        for bin in 0..num_bins {
            qubo.add(Variable::used(bin), Variable::used(bin), lagrange);
        }

        debug!(
            "encoded {} items x {} bins ({} slack bits) into {} terms",
            num_items,
            num_bins,
            slack_bits,
            qubo.len()
        );

        Ok(Model {
            instance: instance.clone(),
            lagrange,
            slack_bits,
            qubo,
        })
    }

    pub fn qubo(&self) -> &Qubo {
        &self.qubo
    }

    pub fn into_qubo(self) -> Qubo {
        self.qubo
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn lagrange(&self) -> f64 {
        self.lagrange
    }

    pub fn slack_bits(&self) -> usize {
        self.slack_bits
    }

    pub fn num_variables(&self) -> usize {
        let num_items = self.instance.num_items();
        let num_bins = self.instance.num_bins;
        num_items * num_bins + num_bins + num_bins * self.slack_bits
    }

    /// Bins the sample marks as used, ascending.
    pub fn used_bins(&self, sample: &Sample) -> Vec<usize> {
        (0..self.instance.num_bins)
            .filter(|&bin| sample.get(Variable::used(bin)))
            .collect()
    }

    /// Item indices the sample places in each bin.
    pub fn bin_contents(&self, sample: &Sample) -> Vec<Vec<usize>> {
        (0..self.instance.num_bins)
            .map(|bin| {
                (0..self.instance.num_items())
                    .filter(|&item| sample.get(Variable::assign(bin, item)))
                    .collect()
            })
            .collect()
    }

    pub fn bin_load(&self, bin: usize, sample: &Sample) -> f64 {
        (0..self.instance.num_items())
            .filter(|&item| sample.get(Variable::assign(bin, item)))
            .map(|item| self.instance.weights[item])
            .sum()
    }

    /// The slack value the sample's bits encode for `bin`.
    pub fn slack_value(&self, bin: usize, sample: &Sample) -> f64 {
        (0..self.slack_bits)
            .filter(|&bit| sample.get(Variable::slack(bin, bit)))
            .map(pow2)
            .sum()
    }

    pub fn energy(&self, sample: &Sample) -> f64 {
        self.qubo.energy(sample)
    }

    /// Penalty energy with the objective contribution removed. Exactly zero
    /// for a feasible assignment (every item in one bin, loads within
    /// capacity, slack bits and used flags consistent), strictly positive
    /// otherwise.
    pub fn constraint_energy(&self, sample: &Sample) -> f64 {
        self.qubo.energy(sample) - self.lagrange * self.used_bins(sample).len() as f64
    }

    pub fn is_feasible(&self, sample: &Sample) -> bool {
        self.constraint_energy(sample) == 0.0
    }
}
