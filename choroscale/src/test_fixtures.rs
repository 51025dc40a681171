//! Synthetic demographic fixtures for tests and examples.
//!
//! These build small in-memory tract tables with the field vocabulary real
//! demographic services use (`medhinc_cy`, `totpop_cy`, `unemprt_cy`, and
//! friends) plus centroid coordinates for viewport filtering. Generation is
//! seeded, so every run sees identical data.

use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use datafusion::datasource::MemTable;
use datafusion::prelude::SessionContext;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use crate::error::Result;

/// Number of synthetic tracts [`create_tract_context`] registers.
///
/// A handful of `medhinc_cy` rows are null, mirroring suppressed census
/// values, so statistics see slightly fewer rows than this.
pub const TRACT_ROW_COUNT: usize = 120;

const TRACT_SEED: u64 = 2_024;

/// Builds the deterministic synthetic tract batch.
pub fn tract_batch() -> Result<RecordBatch> {
    let mut rng = StdRng::seed_from_u64(TRACT_SEED);

    let mut medhinc = Vec::with_capacity(TRACT_ROW_COUNT);
    let mut totpop = Vec::with_capacity(TRACT_ROW_COUNT);
    let mut unemprt = Vec::with_capacity(TRACT_ROW_COUNT);
    let mut medage = Vec::with_capacity(TRACT_ROW_COUNT);
    let mut divindx = Vec::with_capacity(TRACT_ROW_COUNT);
    let mut popdens = Vec::with_capacity(TRACT_ROW_COUNT);
    let mut longitude = Vec::with_capacity(TRACT_ROW_COUNT);
    let mut latitude = Vec::with_capacity(TRACT_ROW_COUNT);

    for row in 0..TRACT_ROW_COUNT {
        // Incomes and densities skew right, like the real distributions.
        let income = 30_000.0 + rng.random_range(0.0_f64..1.0).powi(2) * 160_000.0;
        let density = 200.0 + rng.random_range(0.0_f64..1.0).powi(2) * 24_800.0;

        medhinc.push(if row % 17 == 16 {
            None
        } else {
            Some(income.round())
        });
        totpop.push(rng.random_range(800_i64..9_000));
        unemprt.push(tenths(rng.random_range(1.5..18.0)));
        medage.push(tenths(rng.random_range(24.0..58.0)));
        divindx.push(tenths(rng.random_range(10.0..95.0)));
        popdens.push(density.round());
        longitude.push(rng.random_range(-117.60..-116.90));
        latitude.push(rng.random_range(33.00..34.20));
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("medhinc_cy", DataType::Float64, true),
        Field::new("totpop_cy", DataType::Int64, false),
        Field::new("unemprt_cy", DataType::Float64, false),
        Field::new("medage_cy", DataType::Float64, false),
        Field::new("divindx_cy", DataType::Float64, false),
        Field::new("popdens_cy", DataType::Float64, false),
        Field::new("longitude", DataType::Float64, false),
        Field::new("latitude", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Float64Array::from(medhinc)),
            Arc::new(Int64Array::from(totpop)),
            Arc::new(Float64Array::from(unemprt)),
            Arc::new(Float64Array::from(medage)),
            Arc::new(Float64Array::from(divindx)),
            Arc::new(Float64Array::from(popdens)),
            Arc::new(Float64Array::from(longitude)),
            Arc::new(Float64Array::from(latitude)),
        ],
    )?;
    Ok(batch)
}

/// Creates a context with the synthetic tract table registered as `tracts`.
pub async fn create_tract_context() -> Result<SessionContext> {
    let ctx = SessionContext::new();
    register_tract_table(&ctx, "tracts").await?;
    Ok(ctx)
}

/// Registers the synthetic tract table under the given name.
pub async fn register_tract_table(ctx: &SessionContext, table_name: &str) -> Result<()> {
    let batch = tract_batch()?;
    let table = MemTable::try_new(batch.schema(), vec![vec![batch]])?;
    ctx.register_table(table_name, Arc::new(table))?;
    Ok(())
}

/// Creates a context whose `tracts` table has a constant `medhinc_cy`,
/// for exercising the insufficient-variation fallback.
pub async fn create_flat_tract_context() -> Result<SessionContext> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("medhinc_cy", DataType::Float64, false),
        Field::new("longitude", DataType::Float64, false),
        Field::new("latitude", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Float64Array::from(vec![55_000.0; 8])),
            Arc::new(Float64Array::from(vec![-117.2; 8])),
            Arc::new(Float64Array::from(vec![33.4; 8])),
        ],
    )?;

    let ctx = SessionContext::new();
    ctx.register_batch("tracts", batch)?;
    Ok(ctx)
}

fn tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_is_deterministic() {
        let first = tract_batch().unwrap();
        let second = tract_batch().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.num_rows(), TRACT_ROW_COUNT);
    }

    #[test]
    fn values_stay_in_plausible_ranges() {
        let batch = tract_batch().unwrap();
        let incomes = batch
            .column(0)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();

        let mut nulls = 0;
        for row in 0..batch.num_rows() {
            if incomes.is_null(row) {
                nulls += 1;
            } else {
                let income = incomes.value(row);
                assert!((30_000.0..=190_000.0).contains(&income));
            }
        }
        assert!(nulls > 0, "fixture should include suppressed rows");
    }

    #[tokio::test]
    async fn tract_context_exposes_expected_schema() {
        let ctx = create_tract_context().await.unwrap();
        let df = ctx.table("tracts").await.unwrap();
        let names: Vec<&str> = df
            .schema()
            .fields()
            .iter()
            .map(|field| field.name().as_str())
            .collect();

        assert_eq!(
            names,
            vec![
                "medhinc_cy",
                "totpop_cy",
                "unemprt_cy",
                "medage_cy",
                "divindx_cy",
                "popdens_cy",
                "longitude",
                "latitude"
            ]
        );
    }
}
