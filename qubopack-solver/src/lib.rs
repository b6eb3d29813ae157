use anyhow::{anyhow, Result};
use log::debug;
use ndarray::Array2;
use qubopack_model::{Qubo, Sample, Variable};
use std::collections::BTreeMap;

/// Enumeration is O(2^n); beyond this many variables a heuristic sampler
/// should be used instead.
pub const MAX_BRUTE_FORCE_VARIABLES: usize = 24;

/// Exhaustively minimizes a cost map, returning a minimum-energy sample and
/// its energy (offset included).
///
/// Deterministic: among ties the assignment reached first in enumeration
/// order wins. Variables the map never mentions do not exist for the solver;
/// absent variables read as 0 when the sample is decoded.
pub fn solve_brute_force(qubo: &Qubo) -> Result<(Sample, f64)> {
    let variables: Vec<Variable> = qubo.variables().into_iter().collect();
    let num_vars = variables.len();
    if num_vars == 0 {
        return Err(anyhow!("cost map has no variables"));
    }
    if num_vars > MAX_BRUTE_FORCE_VARIABLES {
        return Err(anyhow!(
            "{} variables exceed the brute-force limit of {}",
            num_vars,
            MAX_BRUTE_FORCE_VARIABLES
        ));
    }

    // Dense upper-triangular matrix; the canonical (min, max) term keys land
    // on or above the diagonal because `variables` is sorted.
    let index: BTreeMap<Variable, usize> = variables
        .iter()
        .enumerate()
        .map(|(i, &var)| (var, i))
        .collect();
    let mut matrix = Array2::<f64>::zeros((num_vars, num_vars));
    for (a, b, coeff) in qubo.terms() {
        matrix[[index[&a], index[&b]]] += coeff;
    }

    let mut best_energy = f64::INFINITY;
    let mut best_mask = 0u64;
    for mask in 0u64..(1u64 << num_vars) {
        let mut energy = 0.0;
        for row in 0..num_vars {
            if mask >> row & 1 == 1 {
                energy += matrix[[row, row]];
                for col in row + 1..num_vars {
                    if mask >> col & 1 == 1 {
                        energy += matrix[[row, col]];
                    }
                }
            }
        }
        if energy < best_energy {
            best_energy = energy;
            best_mask = mask;
        }
    }

    debug!(
        "enumerated {} assignments over {} variables, best energy {}",
        1u64 << num_vars,
        num_vars,
        best_energy + qubo.offset()
    );

    let sample = variables
        .iter()
        .enumerate()
        .map(|(i, &var)| (var, best_mask >> i & 1 == 1))
        .collect();
    Ok((sample, best_energy + qubo.offset()))
}
