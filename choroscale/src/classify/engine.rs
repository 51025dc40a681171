//! The classification orchestrator.
//!
//! One request flows through a one-way state machine: resolve the field
//! against the provider's schema, fetch statistics, then either compute
//! data-driven breaks or fall back to a pre-baked table. Every path ends in
//! a valid [`ClassificationResult`]; nothing here is fatal to the caller.
//!
//! ```text
//! INIT -> RESOLVE_FIELD -> FETCH_STATS -> DATA_DRIVEN -> DONE
//!              |                |              |
//!              +----------------+--------------+--> FALLBACK -> DONE
//! ```

use tracing::{debug, info, instrument, warn};

use crate::breaks::{
    optimal_break_count, quantile_breaks, resolve_domain, BreakRange, Domain,
    DEFAULT_DOMAIN_HEADROOM, MAX_BREAK_COUNT,
};
use crate::classify::fallback;
use crate::classify::geography::GeographyContext;
use crate::classify::result::{ClassDescriptor, ClassificationResult, Provenance};
use crate::format::{detect_semantics, range_label, FieldSemantics};
use crate::provider::{resolve_field, FieldStatsProvider, ViewportFilter};
use crate::style::{marker_entry, SizeScale};

/// Which symbology a classification is being prepared for.
///
/// Colors always come from the marker palette on the data-driven path; the
/// style only decides whether per-class marker sizes are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleKind {
    /// Graduated fills for polygon layers (choropleth).
    #[default]
    Fill,
    /// Graduated markers for point layers; sizes are attached per class.
    Marker,
}

/// Everything needed to classify one field.
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    /// Field name as the caller knows it; resolved against the schema.
    pub field: String,
    /// Dataset and market-area level to classify within.
    pub geography: GeographyContext,
    /// Optional bounding box restricting the rows considered.
    pub viewport: Option<ViewportFilter>,
    /// Target symbology.
    pub style: StyleKind,
}

impl ClassificationRequest {
    /// Creates a request for the given field with no viewport and fill
    /// styling.
    pub fn new(field: impl Into<String>, geography: GeographyContext) -> Self {
        Self {
            field: field.into(),
            geography,
            viewport: None,
            style: StyleKind::default(),
        }
    }

    /// Restricts the classification to rows inside the viewport.
    pub fn with_viewport(mut self, viewport: ViewportFilter) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Selects the target symbology.
    pub fn with_style(mut self, style: StyleKind) -> Self {
        self.style = style;
        self
    }
}

/// Classifies fields into renderable legends.
///
/// The engine holds configuration only; one instance can serve concurrent
/// requests without locking.
///
/// # Example
///
/// ```rust,ignore
/// use choroscale::classify::{AreaType, ClassificationEngine, ClassificationRequest, GeographyContext};
/// use choroscale::provider::DataFusionProvider;
///
/// # async fn example(provider: DataFusionProvider) {
/// let engine = ClassificationEngine::new();
/// let request = ClassificationRequest::new(
///     "medhinc_cy",
///     GeographyContext::new("tracts", AreaType::Tract),
/// );
/// let result = engine.classify(&provider, &request).await;
/// for class in result.classes() {
///     println!("{}", class.label);
/// }
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClassificationEngine {
    size_scale: SizeScale,
    domain_headroom: f64,
}

impl Default for ClassificationEngine {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ClassificationEngine {
    /// Creates an engine with the default size scale and domain headroom.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a builder for customizing the engine.
    pub fn builder() -> ClassificationEngineBuilder {
        ClassificationEngineBuilder::default()
    }

    /// Classifies a remote field into a complete, renderable result.
    ///
    /// This never fails: any resolution, transport, or data problem routes
    /// to the fallback tables with the reason recorded in provenance.
    #[instrument(
        skip(self, provider, request),
        fields(
            field = %request.field,
            dataset = %request.geography.dataset,
            area_type = %request.geography.area_type,
            style = ?request.style,
        )
    )]
    pub async fn classify<P>(
        &self,
        provider: &P,
        request: &ClassificationRequest,
    ) -> ClassificationResult
    where
        P: FieldStatsProvider + ?Sized,
    {
        let semantics = detect_semantics(&request.field);

        match self.try_data_driven(provider, request, semantics).await {
            Ok(result) => {
                info!(classes = result.len(), "data-driven classification complete");
                result
            }
            Err(cause) => {
                warn!(
                    field = %cause.field,
                    reason = %cause.reason,
                    "data-driven classification unavailable, using fallback"
                );
                fallback::fallback_result(
                    &cause.field,
                    semantics,
                    cause.reason,
                    request.viewport.is_some(),
                )
            }
        }
    }

    /// Computes quantile breaks directly over caller-supplied values,
    /// bypassing the provider.
    ///
    /// Non-finite values are dropped first. Returns `None` when nothing
    /// numeric remains, and a single degenerate range when every value is
    /// identical. The domain is the observed `[min, max]`; bare local data
    /// carries no field semantics, so no synthetic ceiling is applied.
    pub fn classify_local_dataset(
        &self,
        values: &[f64],
        break_count: Option<usize>,
    ) -> Option<Vec<BreakRange>> {
        let sample: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sample.is_empty() {
            return None;
        }

        let observed_min = sample.iter().copied().fold(f64::INFINITY, f64::min);
        let observed_max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if observed_min == observed_max {
            return Some(vec![BreakRange::new(observed_min, observed_max)]);
        }

        let target = break_count
            .unwrap_or_else(|| optimal_break_count(sample.len() as u64))
            .clamp(1, MAX_BREAK_COUNT);
        debug!(
            count = sample.len(),
            target, "classifying local dataset over observed domain"
        );

        let domain = Domain::new(observed_min, observed_max);
        Some(quantile_breaks(&sample, target, domain))
    }

    async fn try_data_driven<P>(
        &self,
        provider: &P,
        request: &ClassificationRequest,
        semantics: FieldSemantics,
    ) -> Result<ClassificationResult, FallbackCause>
    where
        P: FieldStatsProvider + ?Sized,
    {
        let names = provider
            .field_names(&request.geography)
            .await
            .map_err(|err| FallbackCause::new(&request.field, err.to_string()))?;
        let field = resolve_field(&request.field, &names)
            .ok_or_else(|| FallbackCause::new(&request.field, "field not found"))?;

        let viewport = request.viewport.as_ref();
        let stats = provider
            .field_statistics(&request.geography, &field, viewport)
            .await
            .map_err(|err| FallbackCause::new(&field, err.to_string()))?;
        if !stats.has_variation() {
            return Err(FallbackCause::new(&field, "insufficient variation"));
        }

        let target = optimal_break_count(stats.count);
        let values = provider
            .field_values(&request.geography, &field, viewport)
            .await
            .map_err(|err| FallbackCause::new(&field, err.to_string()))?;
        let sample: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        if sample.is_empty() {
            return Err(FallbackCause::new(
                &field,
                "value listing returned no numeric data",
            ));
        }

        let observed_min = sample.iter().copied().fold(f64::INFINITY, f64::min);
        let observed_max = sample.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if observed_min == observed_max {
            return Err(FallbackCause::new(&field, "insufficient variation"));
        }

        let domain = resolve_domain(stats.min, stats.max, semantics, self.domain_headroom);
        let ranges = quantile_breaks(&sample, target, domain);
        if ranges.is_empty() {
            return Err(FallbackCause::new(
                &field,
                "break computation produced no ranges",
            ));
        }

        let format = semantics.value_format();
        let total = ranges.len();
        let classes: Vec<ClassDescriptor> = ranges
            .iter()
            .enumerate()
            .map(|(index, range)| {
                let size = match request.style {
                    StyleKind::Marker => Some(self.size_scale.size_for(index, total)),
                    StyleKind::Fill => None,
                };
                ClassDescriptor {
                    min_value: range.min,
                    max_value: range.max,
                    label: range_label(range.min, range.max, index, total, &format),
                    color: marker_entry(index, total).rgba(),
                    size,
                }
            })
            .collect();

        debug!(target, classes = total, "assembled data-driven classes");
        Ok(ClassificationResult::new(
            classes,
            Provenance::data_driven(field, stats.count, request.viewport.is_some()),
        ))
    }
}

/// Builder for [`ClassificationEngine`].
#[derive(Debug, Clone)]
pub struct ClassificationEngineBuilder {
    size_scale: SizeScale,
    domain_headroom: f64,
}

impl Default for ClassificationEngineBuilder {
    fn default() -> Self {
        Self {
            size_scale: SizeScale::default(),
            domain_headroom: DEFAULT_DOMAIN_HEADROOM,
        }
    }
}

impl ClassificationEngineBuilder {
    /// Sets the marker size scale.
    pub fn size_scale(mut self, scale: SizeScale) -> Self {
        self.size_scale = scale;
        self
    }

    /// Sets the headroom multiplier applied to the observed maximum when a
    /// field has no natural ceiling. Values below 1.0 are coerced to 1.0 so
    /// the ceiling never undercuts the data.
    pub fn domain_headroom(mut self, headroom: f64) -> Self {
        self.domain_headroom = headroom.max(1.0);
        self
    }

    /// Finishes construction.
    pub fn build(self) -> ClassificationEngine {
        ClassificationEngine {
            size_scale: self.size_scale,
            domain_headroom: self.domain_headroom,
        }
    }
}

struct FallbackCause {
    field: String,
    reason: String,
}

impl FallbackCause {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
