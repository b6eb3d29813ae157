use crate::{ModelError, Variable};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A binary assignment of QUBO variables, as returned by a solver.
///
/// Variables absent from the map read as 0; solvers commonly omit
/// zero-valued entries from their samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample(BTreeMap<Variable, bool>);

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, var: Variable, value: bool) {
        self.0.insert(var, value);
    }

    pub fn get(&self, var: Variable) -> bool {
        self.0.get(&var).copied().unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, bool)> + '_ {
        self.0.iter().map(|(&var, &value)| (var, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Variable, bool)> for Sample {
    fn from_iter<I: IntoIterator<Item = (Variable, bool)>>(iter: I) -> Self {
        Sample(iter.into_iter().collect())
    }
}

/// Raw solver output: a JSON object keyed by variable identity strings with
/// 0/1 (or boolean) values.
impl TryFrom<Map<String, Value>> for Sample {
    type Error = ModelError;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut sample = Sample::new();
        for (key, value) in &map {
            let var = Variable::from_str(key)?;
            let bit = match value {
                Value::Bool(b) => *b,
                Value::Number(n) if n.as_u64() == Some(0) => false,
                Value::Number(n) if n.as_u64() == Some(1) => true,
                _ => {
                    return Err(ModelError::MalformedSolution(format!(
                        "variable '{}' has non-binary value {}",
                        key, value
                    )))
                }
            };
            sample.set(var, bit);
        }
        Ok(sample)
    }
}

impl Serialize for Sample {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (var, value) in self.iter() {
            map.serialize_entry(&var.to_string(), &(value as u8))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Sample {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SampleVisitor;

        impl<'de> Visitor<'de> for SampleVisitor {
            type Value = Sample;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a map from variable identities to 0/1 values")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut sample = Sample::new();
                while let Some((var, value)) = access.next_entry::<Variable, u8>()? {
                    let bit = match value {
                        0 => false,
                        1 => true,
                        other => {
                            return Err(de::Error::custom(format!(
                                "variable '{}' has non-binary value {}",
                                var, other
                            )))
                        }
                    };
                    sample.set(var, bit);
                }
                Ok(sample)
            }
        }

        deserializer.deserialize_map(SampleVisitor)
    }
}
