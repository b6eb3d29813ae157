use crate::ModelError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A binary decision variable of the bin packing QUBO.
///
/// The string form produced by `Display` and accepted by `FromStr`
/// (`x_<bin>_<item>`, `y_<bin>`, `k_<bin>_<bit>`) is the identity under
/// which variables are exchanged with external solvers. Indices are
/// underscore-separated, so distinct index pairs can never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variable {
    /// `x[i][j]`: item `item` is placed in bin `bin`.
    Assign { bin: usize, item: usize },
    /// `y[i]`: bin `bin` holds at least one item.
    Used { bin: usize },
    /// `k[i][b]`: bit `bit` of the binary expansion of bin `bin`'s unused capacity.
    Slack { bin: usize, bit: usize },
}

impl Variable {
    pub fn assign(bin: usize, item: usize) -> Self {
        Variable::Assign { bin, item }
    }

    pub fn used(bin: usize) -> Self {
        Variable::Used { bin }
    }

    pub fn slack(bin: usize, bit: usize) -> Self {
        Variable::Slack { bin, bit }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variable::Assign { bin, item } => write!(f, "x_{}_{}", bin, item),
            Variable::Used { bin } => write!(f, "y_{}", bin),
            Variable::Slack { bin, bit } => write!(f, "k_{}_{}", bin, bit),
        }
    }
}

impl FromStr for Variable {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ModelError::MalformedSolution(format!("cannot parse variable identity '{}'", s));
        let mut parts = s.split('_');
        let family = parts.next().ok_or_else(malformed)?;
        let index = |part: Option<&str>| -> Result<usize, ModelError> {
            part.and_then(|p| p.parse().ok()).ok_or_else(malformed)
        };
        let var = match family {
            "x" => Variable::Assign {
                bin: index(parts.next())?,
                item: index(parts.next())?,
            },
            "y" => Variable::Used {
                bin: index(parts.next())?,
            },
            "k" => Variable::Slack {
                bin: index(parts.next())?,
                bit: index(parts.next())?,
            },
            _ => return Err(malformed()),
        };
        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(var)
    }
}

impl Serialize for Variable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl<'de> Deserialize<'de> for Variable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(s.as_str()).map_err(de::Error::custom)
    }
}
