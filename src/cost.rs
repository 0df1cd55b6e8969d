//! Edit-operation cost model for sequence comparison
//!
//! Substitution and indel costs derive from a handful of tuned parameters.
//! The full pairwise table is precomputed once into a dense 2-D array indexed
//! by the symbols' small-integer bucket ids, so the inner loop of the
//! distance engine is a pure array read.

use crate::element::{SequenceElement, ALPHABET_LEN, EPSILON_INDEX};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Errors for cost-model configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CostConfigError {
    #[error("size_substitute_divider must be nonzero")]
    ZeroDivider,

    #[error("size_insert must be nonzero, otherwise all Size edits are free")]
    ZeroSizeInsert,
}

/// Tunable parameters of the cost model
///
/// Defaults are the values found by hyperparameter optimization;
/// [`CostConfig::pre_optimization`] restores the hand-picked starting point.
///
/// # Example
/// ```
/// use dnsfp::cost::CostConfig;
///
/// let config = CostConfig::default();
/// assert_eq!(config.size_insert, 12);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostConfig {
    /// Cost of inserting or deleting any `Size(_)` symbol
    pub size_insert: usize,

    /// Multiplier applied to the gap bucket when inserting or deleting a `Gap`
    pub gap_insert_multiplier: usize,

    /// Divider applied to insert+delete cost for a `Size`/`Size` substitution
    pub size_substitute_divider: usize,

    /// Multiplier applied to the bucket difference for a `Gap`/`Gap` substitution
    pub gap_substitute_multiplier: usize,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            size_insert: 12,
            gap_insert_multiplier: 1,
            size_substitute_divider: 4,
            gap_substitute_multiplier: 3,
        }
    }
}

impl CostConfig {
    /// The hand-picked cost model used before hyperparameter optimization
    pub fn pre_optimization() -> Self {
        Self {
            size_insert: 20,
            gap_insert_multiplier: 5,
            size_substitute_divider: 3,
            gap_substitute_multiplier: 2,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), CostConfigError> {
        if self.size_substitute_divider == 0 {
            return Err(CostConfigError::ZeroDivider);
        }
        if self.size_insert == 0 {
            return Err(CostConfigError::ZeroSizeInsert);
        }
        Ok(())
    }

    fn insert_cost(&self, elem: SequenceElement) -> usize {
        match elem {
            SequenceElement::Size(_) => self.size_insert,
            SequenceElement::Gap(g) => g as usize * self.gap_insert_multiplier,
        }
    }

    fn substitute_cost(&self, a: SequenceElement, b: SequenceElement) -> usize {
        use SequenceElement::{Gap, Size};

        if a == b {
            return 0;
        }
        match (a, b) {
            (Size(_), Size(_)) => {
                (self.insert_cost(a) + self.insert_cost(b)) / self.size_substitute_divider
            }
            (Gap(g1), Gap(g2)) => {
                (g1.max(g2) - g1.min(g2)) as usize * self.gap_substitute_multiplier
            }
            (a, b) => self.insert_cost(a) + self.insert_cost(b),
        }
    }
}

/// Dense precomputed lookup table for all edit-operation costs
///
/// `indel[i]` is the cost of inserting or deleting the symbol with index `i`;
/// `substitute[i][j]` the cost of replacing symbol `i` with symbol `j`.
/// Index 0 is the epsilon column and always costs 0. Bounds are validated
/// once here; all later lookups are infallible.
#[derive(Debug, Clone)]
pub struct CostTable {
    indel: [usize; ALPHABET_LEN],
    substitute: [[usize; ALPHABET_LEN]; ALPHABET_LEN],
}

impl CostTable {
    /// Build the table from a validated [`CostConfig`]
    pub fn new(config: &CostConfig) -> Result<Self, CostConfigError> {
        config.validate()?;

        let mut indel = [0usize; ALPHABET_LEN];
        let mut substitute = [[0usize; ALPHABET_LEN]; ALPHABET_LEN];

        for i in 0..ALPHABET_LEN {
            let Some(a) = SequenceElement::from_index(i) else {
                continue;
            };
            indel[i] = config.insert_cost(a);
            for (j, cell) in substitute[i].iter_mut().enumerate() {
                if let Some(b) = SequenceElement::from_index(j) {
                    *cell = config.substitute_cost(a, b);
                }
            }
        }
        debug_assert_eq!(indel[EPSILON_INDEX], 0);

        Ok(CostTable { indel, substitute })
    }

    /// Table built from [`CostConfig::default`], shared process-wide
    pub fn shared_default() -> &'static CostTable {
        static DEFAULT: OnceLock<CostTable> = OnceLock::new();
        DEFAULT.get_or_init(|| {
            CostTable::new(&CostConfig::default()).expect("default cost config is valid")
        })
    }

    /// Cost of inserting `elem`
    #[inline]
    pub fn insert_cost(&self, elem: SequenceElement) -> usize {
        self.indel[elem.index()]
    }

    /// Cost of deleting `elem`
    ///
    /// Delete costs are identical to insert costs: there is no defined order
    /// in which two sequences are compared, so `xABCy -> xACy` must cost the
    /// same as `xACy -> xABCy`.
    #[inline]
    pub fn delete_cost(&self, elem: SequenceElement) -> usize {
        self.indel[elem.index()]
    }

    /// Cost of substituting `a` with `b`; zero for identical symbols
    #[inline]
    pub fn substitute_cost(&self, a: SequenceElement, b: SequenceElement) -> usize {
        self.substitute[a.index()][b.index()]
    }
}

impl Default for CostTable {
    fn default() -> Self {
        CostTable::shared_default().clone()
    }
}
