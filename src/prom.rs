use once_cell::sync::OnceCell;
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

static REGISTRY: OnceCell<Registry> = OnceCell::new();
static METRICS: OnceCell<Option<Metrics>> = OnceCell::new();

struct Metrics {
    messages_total: IntCounterVec,
    response_status: IntCounterVec,
    send_histo: HistogramVec,
}

impl Metrics {
    fn register(registry: &Registry) -> prometheus::Result<Self> {
        let messages_total = IntCounterVec::new(
            Opts::new("slackhook_messages_total", "Webhook messages by outcome"),
            &["outcome"],
        )?;

        let response_status = IntCounterVec::new(
            Opts::new("slackhook_response_status_total", "Webhook responses by HTTP status"),
            &["status"],
        )?;

        let send_histo = HistogramVec::new(
            HistogramOpts::new("slackhook_send_duration_seconds", "Webhook send duration (s)")
                .buckets(default_buckets_seconds()),
            &["outcome"],
        )?;

        registry.register(Box::new(messages_total.clone()))?;
        registry.register(Box::new(response_status.clone()))?;
        registry.register(Box::new(send_histo.clone()))?;

        Ok(Self {
            messages_total,
            response_status,
            send_histo,
        })
    }
}

fn default_buckets_seconds() -> Vec<f64> {
    // Prometheus-default-ish buckets for latency (seconds)
    vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
}

fn metrics() -> Option<&'static Metrics> {
    METRICS
        .get_or_init(|| match Metrics::register(registry()) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!(target = "slackhook::prom", "metrics registration failed: {}", e);
                None
            }
        })
        .as_ref()
}

/// Register slackhook's metrics. Safe to call repeatedly.
pub fn init_prometheus() {
    let _ = metrics();
}

// Called by Client::send
pub fn observe_send(outcome: &str, dur_seconds: f64) {
    if let Some(m) = metrics() {
        m.messages_total.with_label_values(&[outcome]).inc();
        m.send_histo.with_label_values(&[outcome]).observe(dur_seconds);
    }
}

pub fn observe_status(status: u16) {
    if let Some(m) = metrics() {
        let status = status.to_string();
        m.response_status.with_label_values(&[status.as_str()]).inc();
    }
}

/// Registry holding slackhook's metrics, for hosts that gather it themselves.
pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

/// Text exposition of every slackhook metric.
pub fn render() -> String {
    init_prometheus();
    let encoder = TextEncoder::new();
    let mf = registry().gather();
    let mut buf = Vec::new();
    if let Err(e) = encoder.encode(&mf, &mut buf) {
        tracing::warn!(target = "slackhook::prom", "metrics encode failed: {}", e);
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}
