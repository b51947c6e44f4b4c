//! Engine configuration: the base rate, every scoring coefficient and
//! threshold, and the offer pricing constants. One immutable structure,
//! built once at startup and passed by reference into the engine.
//!
//! `Default` carries the production values; every field is individually
//! defaulted so a partial config file only overrides what it names.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Annual rate every pre-approval offer starts from, in percent.
    pub base_rate: Rate,
    pub scoring: ScoringConfig,
    pub offers: OfferConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            base_rate: dec!(15),
            scoring: ScoringConfig::default(),
            offers: OfferConfig::default(),
        }
    }
}

/// Correction coefficients (rate percentage points, sign included) and
/// rejection thresholds for the scoring rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub self_employed_correction: Rate,
    pub business_owner_correction: Rate,
    pub mid_manager_correction: Rate,
    pub top_manager_correction: Rate,
    pub married_correction: Rate,
    pub divorced_correction: Rate,
    pub non_binary_correction: Rate,
    pub male_preferred_age_correction: Rate,
    pub female_preferred_age_correction: Rate,
    /// Applied once when dependents exceed `preferred_dependent_amount_max`.
    pub dependent_amount_correction: Rate,
    /// Minimum total work experience, in months.
    pub min_total_experience: u32,
    /// Minimum experience at the current employer, in months.
    pub min_current_experience: u32,
    pub min_loan_age: u32,
    pub max_loan_age: u32,
    pub male_preferred_age_min: u32,
    pub male_preferred_age_max: u32,
    pub female_preferred_age_min: u32,
    pub female_preferred_age_max: u32,
    pub preferred_dependent_amount_max: u32,
    /// Requested amount may not exceed salary times this limit.
    pub salary_to_loan_rate_limit: Money,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            self_employed_correction: dec!(1),
            business_owner_correction: dec!(3),
            mid_manager_correction: dec!(-2),
            top_manager_correction: dec!(-4),
            married_correction: dec!(-3),
            divorced_correction: dec!(1),
            non_binary_correction: dec!(3),
            male_preferred_age_correction: dec!(-3),
            female_preferred_age_correction: dec!(-3),
            dependent_amount_correction: dec!(1),
            min_total_experience: 12,
            min_current_experience: 3,
            min_loan_age: 20,
            max_loan_age: 60,
            male_preferred_age_min: 30,
            male_preferred_age_max: 55,
            female_preferred_age_min: 35,
            female_preferred_age_max: 60,
            preferred_dependent_amount_max: 1,
            salary_to_loan_rate_limit: dec!(20),
        }
    }
}

/// Pricing constants for the four pre-approval offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferConfig {
    /// Flat cost added to the total repayment when insurance is enabled.
    pub insurance_cost: Money,
    /// Rate reduction for taking insurance, in percentage points.
    pub insurance_rate_discount: Rate,
    /// Rate reduction for salary clients, in percentage points.
    pub salary_client_rate_discount: Rate,
}

impl Default for OfferConfig {
    fn default() -> Self {
        OfferConfig {
            insurance_cost: dec!(100000),
            insurance_rate_discount: dec!(1),
            salary_client_rate_discount: dec!(3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_values_match_production_config() {
        let config = EngineConfig::default();
        assert_eq!(config.base_rate, dec!(15));
        assert_eq!(config.scoring.top_manager_correction, dec!(-4));
        assert_eq!(config.scoring.salary_to_loan_rate_limit, dec!(20));
        assert_eq!(config.scoring.male_preferred_age_min, 30);
        assert_eq!(config.scoring.female_preferred_age_max, 60);
        assert_eq!(config.offers.insurance_cost, dec!(100000));
        assert_eq!(config.offers.salary_client_rate_discount, dec!(3));
    }

    #[test]
    fn test_partial_config_keeps_remaining_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"base_rate": "12.5", "scoring": {"min_loan_age": 21}}"#)
                .unwrap();
        assert_eq!(config.base_rate, dec!(12.5));
        assert_eq!(config.scoring.min_loan_age, 21);
        assert_eq!(config.scoring.max_loan_age, 60);
        assert_eq!(config.offers.insurance_rate_discount, dec!(1));
    }
}
