use crate::{Sample, Variable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};

/// Sparse pairwise cost map over binary [`Variable`]s.
///
/// Keys are unordered pairs stored in canonical `(min, max)` order, so
/// contributions from different constraint groups touching the same pair
/// accumulate onto one entry. Diagonal entries `(v, v)` are linear terms
/// (`v^2 = v` for binary `v`); absent keys have coefficient zero.
///
/// `offset` holds the constant produced when squared penalty expressions are
/// expanded. It never affects which sample minimizes the map, but with it
/// [`Qubo::energy`] reports true penalty values (zero for a satisfied
/// constraint group).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Qubo {
    terms: BTreeMap<(Variable, Variable), f64>,
    offset: f64,
}

impl Qubo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates `coeff` onto the unordered pair `(a, b)`.
    pub fn add(&mut self, a: Variable, b: Variable, coeff: f64) {
        *self.terms.entry(Self::key(a, b)).or_insert(0.0) += coeff;
    }

    pub fn add_offset(&mut self, constant: f64) {
        self.offset += constant;
    }

    /// Coefficient of the unordered pair `(a, b)`, zero if absent.
    pub fn coeff(&self, a: Variable, b: Variable) -> f64 {
        self.terms.get(&Self::key(a, b)).copied().unwrap_or(0.0)
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> impl Iterator<Item = (Variable, Variable, f64)> + '_ {
        self.terms.iter().map(|(&(a, b), &coeff)| (a, b, coeff))
    }

    pub fn variables(&self) -> BTreeSet<Variable> {
        self.terms.keys().flat_map(|&(a, b)| [a, b]).collect()
    }

    /// `offset + sum(coeff * a * b)` over all stored terms.
    pub fn energy(&self, sample: &Sample) -> f64 {
        let mut energy = self.offset;
        for (&(a, b), &coeff) in &self.terms {
            if sample.get(a) && sample.get(b) {
                energy += coeff;
            }
        }
        energy
    }

    fn key(a: Variable, b: Variable) -> (Variable, Variable) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

#[derive(Serialize, Deserialize)]
struct QuboRepr {
    offset: f64,
    terms: Vec<(Variable, Variable, f64)>,
}

impl Serialize for Qubo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        QuboRepr {
            offset: self.offset,
            terms: self.terms().collect(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Qubo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = QuboRepr::deserialize(deserializer)?;
        let mut qubo = Qubo::new();
        qubo.add_offset(repr.offset);
        for (a, b, coeff) in repr.terms {
            qubo.add(a, b, coeff);
        }
        Ok(qubo)
    }
}
