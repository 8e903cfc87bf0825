//! Load combinations

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A load combination defines how load cases are combined for analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Name of the load combination
    pub name: String,
    /// Factors for each load case (case_name -> factor)
    pub factors: HashMap<String, f64>,
    /// Optional tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,
}

impl LoadCombination {
    /// Create a new load combination
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            factors: HashMap::new(),
            tags: Vec::new(),
        }
    }

    /// Create a load combination with a single load case at factor 1.0
    pub fn single(name: &str, case: &str) -> Self {
        let mut combo = Self::new(name);
        combo.factors.insert(case.to_string(), 1.0);
        combo
    }

    /// Create a combination from (case, factor) pairs; a repeated case keeps the last factor
    pub fn from_factors<'a>(name: &str, factors: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        factors
            .into_iter()
            .fold(Self::new(name), |combo, (case, factor)| combo.with_case(case, factor))
    }

    /// Add a load case with a factor
    pub fn with_case(mut self, case: &str, factor: f64) -> Self {
        self.factors.insert(case.to_string(), factor);
        self
    }

    /// Add a tag
    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    /// Get the factor for a load case
    pub fn factor(&self, case: &str) -> f64 {
        *self.factors.get(case).unwrap_or(&0.0)
    }

    /// Whether the combination carries any of the given tags
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.tags.iter().any(|t| tags.contains(t))
    }

    /// Factor-weighted sum of load vectors tagged with their case
    pub fn combine<'a, const N: usize>(
        &self,
        loads: impl IntoIterator<Item = (&'a str, [f64; N])>,
    ) -> [f64; N] {
        let mut total = [0.0; N];
        for (case, values) in loads {
            let factor = self.factor(case);
            if factor == 0.0 {
                continue;
            }
            for (t, v) in total.iter_mut().zip(values) {
                *t += factor * v;
            }
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_weights_cases() {
        let combo = LoadCombination::from_factors("1.1D+1.2L", [("D", 1.1), ("L", 1.2)]);
        let loads = [
            ("D", [-1000.0, 160.0, 70.0]),
            ("L", [-500.0, 160.0, 70.0]),
            ("W", [10.0, 10.0, 10.0]),
        ];
        let total = combo.combine(loads);
        assert!((total[0] - (-1100.0 - 600.0)).abs() < 1e-9);
        assert!((total[1] - (176.0 + 192.0)).abs() < 1e-9);
        assert!((total[2] - (77.0 + 84.0)).abs() < 1e-9);
        assert_eq!(combo.factor("W"), 0.0);
    }

    #[test]
    fn test_unique_case_labels() {
        let combo = LoadCombination::new("c").with_case("D", 1.0).with_case("D", 1.35);
        assert_eq!(combo.factors.len(), 1);
        assert_eq!(combo.factor("D"), 1.35);
    }

    #[test]
    fn test_tags() {
        let combo = LoadCombination::single("c", "D").with_tag("uls");
        assert!(combo.has_any_tag(&["uls".to_string()]));
        assert!(!combo.has_any_tag(&["sls".to_string()]));
    }
}
