use prometheus::{
    HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

// ============================================================================
// Metrics Module - Prometheus metrics for the order workflow
// ============================================================================
//
// Provides:
// - Orders created and failed (by reason)
// - Units taken out of stock
// - Workflow duration by outcome
//
// The registry is rendered in the Prometheus text format on demand.
// ============================================================================

pub struct OrderMetrics {
    registry: Registry,

    pub orders_created: IntCounter,
    pub orders_failed: IntCounterVec,
    pub units_reserved: IntCounter,
    pub order_duration: HistogramVec,
}

impl OrderMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounter::new(
            "orders_created_total",
            "Total orders created",
        )?;
        registry.register(Box::new(orders_created.clone()))?;

        let orders_failed = IntCounterVec::new(
            Opts::new("orders_failed_total", "Total order requests rejected or failed"),
            &["reason"],
        )?;
        registry.register(Box::new(orders_failed.clone()))?;

        let units_reserved = IntCounter::new(
            "order_units_reserved_total",
            "Total product units taken out of stock by created orders",
        )?;
        registry.register(Box::new(units_reserved.clone()))?;

        let order_duration = HistogramVec::new(
            HistogramOpts::new("order_creation_duration_seconds", "Order creation duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["outcome"],
        )?;
        registry.register(Box::new(order_duration.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            orders_failed,
            units_reserved,
            order_duration,
        })
    }

    pub fn record_order_created(&self, units: u64, duration_secs: f64) {
        self.orders_created.inc();
        self.units_reserved.inc_by(units);
        self.order_duration.with_label_values(&["created"]).observe(duration_secs);
    }

    pub fn record_order_failed(&self, reason: &str, duration_secs: f64) {
        self.orders_failed.with_label_values(&[reason]).inc();
        self.order_duration.with_label_values(&["failed"]).observe(duration_secs);
    }

    /// Render all metrics in the Prometheus text exposition format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        Ok(encoder.encode_to_string(&self.registry.gather())?)
    }
}
