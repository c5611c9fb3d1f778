//! Local search configuration.

use std::fmt;
use std::str::FromStr;

use crate::error::{PfspError, Result};
use crate::instance::InitializationMethod;
use crate::neighborhood::NeighborhoodMethod;

/// Which improving neighbor iterative improvement moves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pivot {
    /// Take the first strictly improving neighbor in enumeration order.
    FirstImprovement,
    /// Scan the whole neighborhood and take the strictly best neighbor;
    /// ties keep the one found first.
    BestImprovement,
}

impl fmt::Display for Pivot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstImprovement => write!(f, "first-improvement"),
            Self::BestImprovement => write!(f, "best-improvement"),
        }
    }
}

impl FromStr for Pivot {
    type Err = PfspError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "first" | "first-improvement" => Ok(Self::FirstImprovement),
            "best" | "best-improvement" => Ok(Self::BestImprovement),
            _ => Err(PfspError::UnknownEnumValue {
                kind: "pivot rule",
                value: s.to_string(),
            }),
        }
    }
}

/// Order in which VND visits the neighborhoods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborhoodOrder {
    /// transpose → exchange → insert
    #[default]
    TransposeExchangeInsert,
    /// transpose → insert → exchange
    TransposeInsertExchange,
}

impl NeighborhoodOrder {
    pub fn methods(self) -> [NeighborhoodMethod; 3] {
        use NeighborhoodMethod::*;
        match self {
            Self::TransposeExchangeInsert => [Transpose, Exchange, Insert],
            Self::TransposeInsertExchange => [Transpose, Insert, Exchange],
        }
    }
}

impl fmt::Display for NeighborhoodOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransposeExchangeInsert => write!(f, "transpose-exchange-insert"),
            Self::TransposeInsertExchange => write!(f, "transpose-insert-exchange"),
        }
    }
}

impl FromStr for NeighborhoodOrder {
    type Err = PfspError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tei" | "transpose-exchange-insert" => Ok(Self::TransposeExchangeInsert),
            "tie" | "transpose-insert-exchange" => Ok(Self::TransposeInsertExchange),
            _ => Err(PfspError::UnknownEnumValue {
                kind: "neighborhood order",
                value: s.to_string(),
            }),
        }
    }
}

/// Configuration for iterative improvement.
///
/// # Examples
///
/// ```
/// use u_flowshop::local_search::{IiConfig, Pivot};
/// use u_flowshop::neighborhood::NeighborhoodMethod;
///
/// let config = IiConfig::default()
///     .with_pivot(Pivot::BestImprovement)
///     .with_neighborhood(NeighborhoodMethod::Exchange)
///     .with_seed(7);
/// assert_eq!(config.pivot, Pivot::BestImprovement);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IiConfig {
    pub pivot: Pivot,
    pub neighborhood: NeighborhoodMethod,
    pub initialization: InitializationMethod,
    /// Seed for random initialization (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for IiConfig {
    fn default() -> Self {
        Self {
            pivot: Pivot::FirstImprovement,
            neighborhood: NeighborhoodMethod::Insert,
            initialization: InitializationMethod::RandomPermutation,
            seed: None,
        }
    }
}

impl IiConfig {
    pub fn with_pivot(mut self, pivot: Pivot) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_neighborhood(mut self, method: NeighborhoodMethod) -> Self {
        self.neighborhood = method;
        self
    }

    pub fn with_initialization(mut self, method: InitializationMethod) -> Self {
        self.initialization = method;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Configuration for variable neighborhood descent.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VndConfig {
    pub order: NeighborhoodOrder,
    pub initialization: InitializationMethod,
    /// Seed for random initialization (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for VndConfig {
    fn default() -> Self {
        Self {
            order: NeighborhoodOrder::TransposeExchangeInsert,
            initialization: InitializationMethod::RandomPermutation,
            seed: None,
        }
    }
}

impl VndConfig {
    pub fn with_order(mut self, order: NeighborhoodOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_initialization(mut self, method: InitializationMethod) -> Self {
        self.initialization = method;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
