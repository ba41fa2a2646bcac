//! Synthetic customer dataset generation.
//!
//! Builds the seven-column customer table described in the data model:
//! sequential IDs, uniform ages, genders, product categories, two-decimal
//! revenue figures, a daily purchase-date sequence, and a nullable rating
//! column where roughly one in six entries is missing.

use crate::config::ExplorationConfig;
use crate::error::Result;
use crate::utils::round2;
use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Column names of the generated table, in order.
pub const COL_CUSTOMER_ID: &str = "Customer_ID";
pub const COL_AGE: &str = "Age";
pub const COL_GENDER: &str = "Gender";
pub const COL_PRODUCT_CATEGORY: &str = "Product_Category";
pub const COL_SALES_REVENUE: &str = "Sales_Revenue";
pub const COL_PURCHASE_DATE: &str = "Purchase_Date";
pub const COL_CUSTOMER_RATING: &str = "Customer_Rating";

/// All column names in table order.
pub const ALL_COLUMNS: [&str; 7] = [
    COL_CUSTOMER_ID,
    COL_AGE,
    COL_GENDER,
    COL_PRODUCT_CATEGORY,
    COL_SALES_REVENUE,
    COL_PURCHASE_DATE,
    COL_CUSTOMER_RATING,
];

/// Gender values sampled uniformly.
pub const GENDERS: [&str; 2] = ["Male", "Female"];

/// Product categories sampled uniformly.
pub const PRODUCT_CATEGORIES: [&str; 4] = ["Electronics", "Clothing", "Home Decor", "Books"];

/// Rating choices sampled uniformly; `None` models a missing rating.
const RATING_CHOICES: [Option<f64>; 6] = [
    Some(1.0),
    Some(2.0),
    Some(3.0),
    Some(4.0),
    Some(5.0),
    None,
];

/// Generator for the synthetic customer dataset.
pub struct DatasetGenerator;

impl DatasetGenerator {
    /// Generate the customer table per the configuration.
    ///
    /// When `config.seed` is set the output is fully deterministic;
    /// otherwise the RNG is seeded from entropy and tables differ run
    /// to run.
    pub fn generate(config: &ExplorationConfig) -> Result<DataFrame> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::generate_with_rng(config, &mut rng)
    }

    fn generate_with_rng(config: &ExplorationConfig, rng: &mut impl Rng) -> Result<DataFrame> {
        let rows = config.rows;

        let ids: Vec<i64> = (1..=rows as i64).collect();

        let ages: Vec<i64> = (0..rows).map(|_| rng.gen_range(18..65)).collect();

        let genders: Vec<&str> = (0..rows)
            .map(|_| *GENDERS.choose(rng).unwrap_or(&GENDERS[0]))
            .collect();

        let categories: Vec<&str> = (0..rows)
            .map(|_| *PRODUCT_CATEGORIES.choose(rng).unwrap_or(&PRODUCT_CATEGORIES[0]))
            .collect();

        let revenue: Vec<f64> = (0..rows)
            .map(|_| round2(rng.gen_range(20.0..500.0)))
            .collect();

        let dates: Vec<NaiveDate> = (0..rows)
            .map(|i| config.start_date + Duration::days(i as i64))
            .collect();

        let ratings: Vec<Option<f64>> = (0..rows)
            .map(|_| *RATING_CHOICES.choose(rng).unwrap_or(&None))
            .collect();

        let date_series =
            DateChunked::from_naive_date(COL_PURCHASE_DATE.into(), dates).into_series();

        let df = DataFrame::new(vec![
            Column::new(COL_CUSTOMER_ID.into(), ids),
            Column::new(COL_AGE.into(), ages),
            Column::new(COL_GENDER.into(), genders),
            Column::new(COL_PRODUCT_CATEGORY.into(), categories),
            Column::new(COL_SALES_REVENUE.into(), revenue),
            date_series.into_column(),
            Column::new(COL_CUSTOMER_RATING.into(), ratings),
        ])?;

        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExplorationConfig;

    fn seeded_config(seed: u64) -> ExplorationConfig {
        ExplorationConfig::builder()
            .seed(seed)
            .render_charts(false)
            .build()
            .unwrap()
    }

    #[test]
    fn test_shape_and_column_names() {
        let df = DatasetGenerator::generate(&seeded_config(1)).unwrap();
        assert_eq!(df.shape(), (100, 7));

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, ALL_COLUMNS.map(String::from).to_vec());
    }

    #[test]
    fn test_customer_id_is_sequential() {
        let df = DatasetGenerator::generate(&seeded_config(2)).unwrap();
        let ids = df.column(COL_CUSTOMER_ID).unwrap();
        for (i, value) in ids.as_materialized_series().i64().unwrap().into_iter().enumerate() {
            assert_eq!(value, Some(i as i64 + 1));
        }
    }

    #[test]
    fn test_age_within_bounds() {
        let df = DatasetGenerator::generate(&seeded_config(3)).unwrap();
        let ages = df.column(COL_AGE).unwrap();
        for age in ages.as_materialized_series().i64().unwrap().into_iter().flatten() {
            assert!((18..65).contains(&age), "age out of range: {}", age);
        }
    }

    #[test]
    fn test_revenue_bounds_and_rounding() {
        let df = DatasetGenerator::generate(&seeded_config(4)).unwrap();
        let revenue = df.column(COL_SALES_REVENUE).unwrap();
        for value in revenue.as_materialized_series().f64().unwrap().into_iter().flatten() {
            assert!((20.0..500.0001).contains(&value), "revenue out of range: {}", value);
            let cents = value * 100.0;
            assert!(
                (cents - cents.round()).abs() < 1e-6,
                "revenue not rounded to 2 decimals: {}",
                value
            );
        }
    }

    #[test]
    fn test_purchase_dates_daily_sequence() {
        let df = DatasetGenerator::generate(&seeded_config(5)).unwrap();
        let dates = df.column(COL_PURCHASE_DATE).unwrap();
        // Date is stored as days since epoch; consecutive rows differ by 1.
        let days = dates
            .as_materialized_series()
            .cast(&DataType::Int32)
            .unwrap();
        let days: Vec<i32> = days.i32().unwrap().into_iter().flatten().collect();
        assert_eq!(days.len(), 100);
        for pair in days.windows(2) {
            assert_eq!(pair[1] - pair[0], 1);
        }
    }

    #[test]
    fn test_ratings_domain() {
        let df = DatasetGenerator::generate(&seeded_config(6)).unwrap();
        let ratings = df.column(COL_CUSTOMER_RATING).unwrap();
        for value in ratings.as_materialized_series().f64().unwrap().into_iter().flatten() {
            assert!(
                [1.0, 2.0, 3.0, 4.0, 5.0].contains(&value),
                "unexpected rating: {}",
                value
            );
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let a = DatasetGenerator::generate(&seeded_config(42)).unwrap();
        let b = DatasetGenerator::generate(&seeded_config(42)).unwrap();
        assert!(a.equals_missing(&b));
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = DatasetGenerator::generate(&seeded_config(1)).unwrap();
        let b = DatasetGenerator::generate(&seeded_config(2)).unwrap();
        assert!(!a.equals_missing(&b));
    }

    #[test]
    fn test_custom_row_count() {
        let config = ExplorationConfig::builder()
            .rows(25)
            .seed(7)
            .build()
            .unwrap();
        let df = DatasetGenerator::generate(&config).unwrap();
        assert_eq!(df.height(), 25);
    }
}
