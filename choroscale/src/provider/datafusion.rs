//! In-process provider backed by DataFusion.
//!
//! Statistics are computed in a single aggregate query per request; value
//! listings use an ordered, capped scan. Any table registered on the
//! [`SessionContext`] (memory batches, CSV, Parquet) works unchanged.

use arrow::array::{Float64Array, Int64Array};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;
use datafusion::prelude::SessionContext;
use tracing::{debug, instrument};

use crate::classify::GeographyContext;
use crate::error::{ClassifyError, Result};

use super::{sql, FieldStatistics, FieldStatsProvider, ViewportFilter};

/// Default cap on how many rows a value listing returns.
pub const DEFAULT_MAX_SAMPLE_ROWS: usize = 2_000;

const DEFAULT_LONGITUDE_COLUMN: &str = "longitude";
const DEFAULT_LATITUDE_COLUMN: &str = "latitude";

/// [`FieldStatsProvider`] implementation over a DataFusion [`SessionContext`].
///
/// The geography's `dataset` names a table registered on the context. Every
/// identifier is validated and escaped before it reaches query text.
///
/// # Example
///
/// ```rust,ignore
/// use choroscale::provider::{DataFusionProvider, FieldStatsProvider};
/// use choroscale::classify::{AreaType, GeographyContext};
/// use datafusion::prelude::SessionContext;
///
/// # async fn example() -> choroscale::Result<()> {
/// let ctx = SessionContext::new();
/// // Register your tract table on the context first.
///
/// let provider = DataFusionProvider::builder(ctx)
///     .geometry_columns("lon", "lat")
///     .max_sample_rows(500)
///     .build();
///
/// let geography = GeographyContext::new("tracts", AreaType::Tract);
/// let stats = provider.field_statistics(&geography, "medhinc_cy", None).await?;
/// println!("median income spans {} to {}", stats.min, stats.max);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DataFusionProvider {
    ctx: SessionContext,
    longitude_column: String,
    latitude_column: String,
    max_sample_rows: usize,
}

impl std::fmt::Debug for DataFusionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataFusionProvider")
            .field("longitude_column", &self.longitude_column)
            .field("latitude_column", &self.latitude_column)
            .field("max_sample_rows", &self.max_sample_rows)
            .finish_non_exhaustive()
    }
}

impl DataFusionProvider {
    /// Creates a provider with default geometry columns (`longitude`,
    /// `latitude`) and the default value-listing cap.
    pub fn new(ctx: SessionContext) -> Self {
        Self::builder(ctx).build()
    }

    /// Returns a builder for customizing geometry columns and the row cap.
    pub fn builder(ctx: SessionContext) -> DataFusionProviderBuilder {
        DataFusionProviderBuilder::new(ctx)
    }

    /// The cap applied to value listings.
    pub fn max_sample_rows(&self) -> usize {
        self.max_sample_rows
    }

    fn bbox_predicate(&self, bounds: &ViewportFilter) -> Result<String> {
        let lon = sql::escape_identifier(&self.longitude_column)?;
        let lat = sql::escape_identifier(&self.latitude_column)?;
        Ok(format!(
            " AND {lon} BETWEEN {} AND {} AND {lat} BETWEEN {} AND {}",
            bounds.xmin, bounds.xmax, bounds.ymin, bounds.ymax
        ))
    }
}

/// Builder for [`DataFusionProvider`].
pub struct DataFusionProviderBuilder {
    ctx: SessionContext,
    longitude_column: String,
    latitude_column: String,
    max_sample_rows: usize,
}

impl DataFusionProviderBuilder {
    fn new(ctx: SessionContext) -> Self {
        Self {
            ctx,
            longitude_column: DEFAULT_LONGITUDE_COLUMN.to_string(),
            latitude_column: DEFAULT_LATITUDE_COLUMN.to_string(),
            max_sample_rows: DEFAULT_MAX_SAMPLE_ROWS,
        }
    }

    /// Sets the centroid column names used for viewport filtering.
    pub fn geometry_columns(
        mut self,
        longitude: impl Into<String>,
        latitude: impl Into<String>,
    ) -> Self {
        self.longitude_column = longitude.into();
        self.latitude_column = latitude.into();
        self
    }

    /// Caps how many rows a value listing returns. Zero is coerced to one.
    pub fn max_sample_rows(mut self, cap: usize) -> Self {
        self.max_sample_rows = cap.max(1);
        self
    }

    /// Finishes construction.
    pub fn build(self) -> DataFusionProvider {
        DataFusionProvider {
            ctx: self.ctx,
            longitude_column: self.longitude_column,
            latitude_column: self.latitude_column,
            max_sample_rows: self.max_sample_rows,
        }
    }
}

#[async_trait]
impl FieldStatsProvider for DataFusionProvider {
    #[instrument(skip(self, geography), fields(dataset = %geography.dataset))]
    async fn field_names(&self, geography: &GeographyContext) -> Result<Vec<String>> {
        sql::validate_identifier(&geography.dataset)?;
        let df = self.ctx.table(geography.dataset.as_str()).await?;
        Ok(df
            .schema()
            .fields()
            .iter()
            .map(|field| field.name().clone())
            .collect())
    }

    #[instrument(
        skip(self, geography, viewport),
        fields(dataset = %geography.dataset, field = %field, filtered = viewport.is_some())
    )]
    async fn field_statistics(
        &self,
        geography: &GeographyContext,
        field: &str,
        viewport: Option<&ViewportFilter>,
    ) -> Result<FieldStatistics> {
        let table = sql::escape_identifier(&geography.dataset)?;
        let column = sql::escape_identifier(field)?;

        let mut query = format!(
            "SELECT MIN({column}) AS min_value, MAX({column}) AS max_value, \
             COUNT({column}) AS value_count, AVG({column}) AS avg_value, \
             STDDEV({column}) AS stddev_value \
             FROM {table} WHERE {column} IS NOT NULL"
        );
        if let Some(bounds) = viewport {
            query.push_str(&self.bbox_predicate(bounds)?);
        }

        let batches = self.ctx.sql(&query).await?.collect().await?;
        let batch = batches
            .iter()
            .find(|batch| batch.num_rows() > 0)
            .ok_or_else(|| ClassifyError::malformed("statistics query returned no rows"))?;

        let min = scalar_f64(batch, 0)?;
        let max = scalar_f64(batch, 1)?;
        let count = scalar_count(batch, 2)?;
        let avg = scalar_f64(batch, 3)?;
        let stddev = scalar_f64(batch, 4)?;

        let (Some(min), Some(max), Some(avg)) = (min, max, avg) else {
            return Err(ClassifyError::no_data(field));
        };

        debug!(min, max, count, "computed field statistics");
        Ok(FieldStatistics {
            min,
            max,
            count,
            avg,
            stddev,
        })
    }

    #[instrument(
        skip(self, geography, viewport),
        fields(dataset = %geography.dataset, field = %field, filtered = viewport.is_some())
    )]
    async fn field_values(
        &self,
        geography: &GeographyContext,
        field: &str,
        viewport: Option<&ViewportFilter>,
    ) -> Result<Vec<f64>> {
        let table = sql::escape_identifier(&geography.dataset)?;
        let column = sql::escape_identifier(field)?;

        let mut query = format!("SELECT {column} FROM {table} WHERE {column} IS NOT NULL");
        if let Some(bounds) = viewport {
            query.push_str(&self.bbox_predicate(bounds)?);
        }
        query.push_str(&format!(
            " ORDER BY {column} ASC LIMIT {}",
            self.max_sample_rows
        ));

        let batches = self.ctx.sql(&query).await?.collect().await?;

        let mut values = Vec::new();
        for batch in &batches {
            if batch.num_rows() == 0 {
                continue;
            }
            let column_data = batch.column(0);
            if let Some(floats) = column_data.as_any().downcast_ref::<Float64Array>() {
                values.extend(floats.iter().flatten());
            } else if let Some(ints) = column_data.as_any().downcast_ref::<Int64Array>() {
                values.extend(ints.iter().flatten().map(|v| v as f64));
            } else {
                return Err(ClassifyError::malformed(format!(
                    "expected a numeric column for '{field}', got {:?}",
                    column_data.data_type()
                )));
            }
        }

        debug!(count = values.len(), "listed field values");
        Ok(values)
    }
}

/// Reads the first row of a numeric aggregate column, tolerating both
/// Float64 and Int64 results (integer columns aggregate as Int64).
fn scalar_f64(batch: &RecordBatch, index: usize) -> Result<Option<f64>> {
    let column = batch.column(index);
    if column.is_null(0) {
        return Ok(None);
    }
    if let Some(values) = column.as_any().downcast_ref::<Float64Array>() {
        Ok(Some(values.value(0)))
    } else if let Some(values) = column.as_any().downcast_ref::<Int64Array>() {
        Ok(Some(values.value(0) as f64))
    } else {
        Err(ClassifyError::malformed(format!(
            "expected a numeric aggregate at column {index}, got {:?}",
            column.data_type()
        )))
    }
}

fn scalar_count(batch: &RecordBatch, index: usize) -> Result<u64> {
    let column = batch.column(index);
    if column.is_null(0) {
        return Ok(0);
    }
    column
        .as_any()
        .downcast_ref::<Int64Array>()
        .map(|values| values.value(0).max(0) as u64)
        .ok_or_else(|| {
            ClassifyError::malformed(format!(
                "expected an Int64 count at column {index}, got {:?}",
                column.data_type()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::AreaType;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn tract_geography() -> GeographyContext {
        GeographyContext::new("tracts", AreaType::Tract)
    }

    fn tract_context() -> SessionContext {
        let schema = Arc::new(Schema::new(vec![
            Field::new("medhinc_cy", DataType::Float64, true),
            Field::new("totpop_cy", DataType::Int64, true),
            Field::new("vacancy_rt", DataType::Float64, true),
            Field::new("longitude", DataType::Float64, false),
            Field::new("latitude", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Float64Array::from(vec![
                    Some(42_000.0),
                    Some(58_500.0),
                    Some(61_250.0),
                    None,
                    Some(75_000.0),
                    Some(39_800.0),
                ])),
                Arc::new(Int64Array::from(vec![
                    Some(3_200),
                    Some(4_100),
                    Some(2_850),
                    Some(5_000),
                    Some(3_675),
                    Some(2_210),
                ])),
                Arc::new(Float64Array::from(vec![
                    None::<f64>,
                    None,
                    None,
                    None,
                    None,
                    None,
                ])),
                Arc::new(Float64Array::from(vec![
                    -117.10, -117.20, -117.30, -117.40, -117.50, -117.60,
                ])),
                Arc::new(Float64Array::from(vec![
                    33.10, 33.20, 33.30, 33.40, 33.50, 33.60,
                ])),
            ],
        )
        .unwrap();

        let ctx = SessionContext::new();
        ctx.register_batch("tracts", batch).unwrap();
        ctx
    }

    #[tokio::test]
    async fn statistics_skip_null_rows() {
        let provider = DataFusionProvider::new(tract_context());
        let stats = provider
            .field_statistics(&tract_geography(), "medhinc_cy", None)
            .await
            .unwrap();

        assert_eq!(stats.count, 5);
        assert_eq!(stats.min, 39_800.0);
        assert_eq!(stats.max, 75_000.0);
        assert_eq!(stats.avg, 55_310.0);
        assert!(stats.stddev.map_or(false, |s| s > 0.0));
        assert!(stats.has_variation());
    }

    #[tokio::test]
    async fn statistics_respect_viewport() {
        let provider = DataFusionProvider::new(tract_context());
        let bounds = ViewportFilter::new(-117.35, 33.05, -117.05, 33.35);
        let stats = provider
            .field_statistics(&tract_geography(), "medhinc_cy", Some(&bounds))
            .await
            .unwrap();

        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, 42_000.0);
        assert_eq!(stats.max, 61_250.0);
    }

    #[tokio::test]
    async fn values_come_back_sorted_and_capped() {
        let provider = DataFusionProvider::builder(tract_context())
            .max_sample_rows(3)
            .build();
        let values = provider
            .field_values(&tract_geography(), "medhinc_cy", None)
            .await
            .unwrap();

        assert_eq!(values, vec![39_800.0, 42_000.0, 58_500.0]);
    }

    #[tokio::test]
    async fn integer_columns_surface_as_floats() {
        let provider = DataFusionProvider::new(tract_context());
        let values = provider
            .field_values(&tract_geography(), "totpop_cy", None)
            .await
            .unwrap();

        assert_eq!(
            values,
            vec![2_210.0, 2_850.0, 3_200.0, 3_675.0, 4_100.0, 5_000.0]
        );
    }

    #[tokio::test]
    async fn all_null_column_reports_no_data() {
        let provider = DataFusionProvider::new(tract_context());
        let err = provider
            .field_statistics(&tract_geography(), "vacancy_rt", None)
            .await
            .unwrap_err();

        assert!(matches!(err, ClassifyError::NoData { .. }));
    }

    #[tokio::test]
    async fn bad_identifiers_and_missing_tables_error() {
        let provider = DataFusionProvider::new(tract_context());

        let err = provider
            .field_statistics(&tract_geography(), "med hinc", None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::InvalidIdentifier(_)));

        let missing = GeographyContext::new("nosuch", AreaType::County);
        assert!(provider.field_names(&missing).await.is_err());
        assert!(provider
            .field_statistics(&tract_geography(), "nosuch_cy", None)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn field_names_follow_schema_order() {
        let provider = DataFusionProvider::new(tract_context());
        let names = provider.field_names(&tract_geography()).await.unwrap();

        assert_eq!(
            names,
            vec![
                "medhinc_cy",
                "totpop_cy",
                "vacancy_rt",
                "longitude",
                "latitude"
            ]
        );
    }
}
