//! Records decoded from the Logstash monitoring API.
//!
//! Two independent record families are decoded:
//! - [`NodeOverview`] from `GET /_node`, carrying per-pipeline configuration
//! - [`PipelineAnswer`] from `GET /_node/stats/pipelines`, carrying live stats
//!
//! They only meet through the pipeline name key. Every field defaults to
//! zero/empty when missing and unknown fields are ignored, so decoding never
//! fails on schema drift, only on malformed JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` as the type's default instead of failing.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// =============================================================================
// Flow series
// =============================================================================

/// A flow metric: the current rate plus server-computed rolling averages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowSeries {
    #[serde(deserialize_with = "null_as_default")]
    pub current: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_1_minute: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_5_minutes: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_15_minutes: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub last_1_hour: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub lifetime: f64,
}

impl FlowSeries {
    /// Difference between the current value and the lifetime average.
    pub fn delta(&self) -> f64 {
        self.current - self.lifetime
    }
}

/// Worker flows reported by filter and output plugins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerFlow {
    #[serde(deserialize_with = "null_as_default")]
    pub worker_utilization: FlowSeries,
    #[serde(deserialize_with = "null_as_default")]
    pub worker_millis_per_event: FlowSeries,
}

/// Which worker flow the detail tables display for filters and outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerMetric {
    /// Fraction of worker time spent in the plugin
    #[default]
    Utilization,
    /// Milliseconds of worker time per processed event
    MillisPerEvent,
}

impl WorkerMetric {
    /// All selectable metrics in cycle order.
    pub const ALL: [WorkerMetric; 2] = [WorkerMetric::Utilization, WorkerMetric::MillisPerEvent];

    /// The next metric in the cycle, wrapping around.
    pub fn next(self) -> WorkerMetric {
        match self {
            WorkerMetric::Utilization => WorkerMetric::MillisPerEvent,
            WorkerMetric::MillisPerEvent => WorkerMetric::Utilization,
        }
    }

    /// Column header; fits the 15-character numeric column.
    pub fn display_name(self) -> &'static str {
        match self {
            WorkerMetric::Utilization => "Wor Utilization",
            WorkerMetric::MillisPerEvent => "Wor Mil Per Eve",
        }
    }

    /// Extract the flow this metric refers to.
    pub fn series(self, flow: &WorkerFlow) -> &FlowSeries {
        match self {
            WorkerMetric::Utilization => &flow.worker_utilization,
            WorkerMetric::MillisPerEvent => &flow.worker_millis_per_event,
        }
    }
}

// =============================================================================
// Node overview (GET /_node)
// =============================================================================

/// Node-wide default pipeline settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineDefaults {
    pub workers: u64,
    pub batch_size: u64,
    pub batch_delay: u64,
}

/// Configuration of one pipeline as reported by `/_node`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfiguration {
    pub ephemeral_id: String,
    pub hash: String,
    pub workers: u64,
    pub batch_size: u64,
    pub batch_delay: u64,
    pub config_reload_automatic: bool,
    pub config_reload_interval: i64,
    pub dead_letter_queue_enabled: bool,
}

/// Operating system details, passed through unused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsInfo {
    pub name: String,
    pub arch: String,
    pub version: String,
    pub available_processors: u64,
}

/// JVM memory settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JvmMemory {
    pub heap_init_in_bytes: u64,
    pub heap_max_in_bytes: u64,
    pub non_heap_init_in_bytes: u64,
    pub non_heap_max_in_bytes: u64,
}

/// JVM details, passed through unused.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JvmInfo {
    pub pid: u64,
    pub version: String,
    pub vm_version: String,
    pub vm_vendor: String,
    pub vm_name: String,
    pub start_time_in_millis: i64,
    pub mem: JvmMemory,
    pub gc_collectors: Vec<String>,
}

/// Node identity and per-pipeline configuration.
///
/// Fetched once at startup; only used to cross-reference configuration
/// values against live stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeOverview {
    pub host: String,
    pub version: String,
    pub http_address: String,
    pub id: String,
    pub name: String,
    pub ephemeral_id: String,
    pub status: String,
    pub snapshot: bool,
    pub pipeline: PipelineDefaults,
    pub pipelines: BTreeMap<String, PipelineConfiguration>,
    pub os: OsInfo,
    pub jvm: JvmInfo,
}

impl NodeOverview {
    /// Configuration for a pipeline, if the node reported one.
    pub fn pipeline_config(&self, name: &str) -> Option<&PipelineConfiguration> {
        self.pipelines.get(name)
    }
}

// =============================================================================
// Pipeline stats (GET /_node/stats/pipelines)
// =============================================================================

/// Pipeline-level event counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventCounts {
    pub queue_push_duration_in_millis: u64,
    pub r#in: u64,
    pub filtered: u64,
    pub out: u64,
    pub duration_in_millis: u64,
}

impl EventCounts {
    /// Add another pipeline's in/filtered/out counters to this one.
    pub fn accumulate(&mut self, other: &EventCounts) {
        self.r#in = self.r#in.saturating_add(other.r#in);
        self.filtered = self.filtered.saturating_add(other.filtered);
        self.out = self.out.saturating_add(other.out);
    }
}

/// Pipeline-level flow metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineFlow {
    #[serde(deserialize_with = "null_as_default")]
    pub queue_persisted_growth_events: FlowSeries,
    #[serde(deserialize_with = "null_as_default")]
    pub queue_persisted_growth_bytes: FlowSeries,
    #[serde(deserialize_with = "null_as_default")]
    pub output_throughput: FlowSeries,
    #[serde(deserialize_with = "null_as_default")]
    pub queue_backpressure: FlowSeries,
    #[serde(deserialize_with = "null_as_default")]
    pub input_throughput: FlowSeries,
    #[serde(deserialize_with = "null_as_default")]
    pub filter_throughput: FlowSeries,
    #[serde(deserialize_with = "null_as_default")]
    pub worker_concurrency: FlowSeries,
}

/// Event counters of an input plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputEvents {
    pub queue_push_duration_in_millis: u64,
    pub out: u64,
}

/// Flow metrics of an input plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFlow {
    #[serde(deserialize_with = "null_as_default")]
    pub throughput: FlowSeries,
}

/// An input plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputPlugin {
    pub id: String,
    pub name: String,
    pub events: InputEvents,
    pub flow: InputFlow,
}

/// Codec encode counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecEncode {
    pub writes_in: u64,
    pub duration_in_millis: u64,
}

/// Codec decode counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecDecode {
    pub writes_in: u64,
    pub out: u64,
    pub duration_in_millis: u64,
}

/// A codec plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecPlugin {
    pub id: String,
    pub name: String,
    pub encode: CodecEncode,
    pub decode: CodecDecode,
}

/// Event counters of a filter or output plugin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerEvents {
    pub r#in: u64,
    pub out: u64,
    pub duration_in_millis: u64,
}

/// A filter or output plugin; both run on pipeline workers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerPlugin {
    pub id: String,
    pub name: String,
    pub events: WorkerEvents,
    pub flow: WorkerFlow,
}

/// Plugin stats grouped by stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plugins {
    pub inputs: Vec<InputPlugin>,
    pub codecs: Vec<CodecPlugin>,
    pub filters: Vec<WorkerPlugin>,
    pub outputs: Vec<WorkerPlugin>,
}

/// Config reload statistics. Timestamps and the last error are passed through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reloads {
    pub last_failure_timestamp: serde_json::Value,
    pub failures: u64,
    pub last_success_timestamp: serde_json::Value,
    pub successes: u64,
    pub last_error: serde_json::Value,
}

/// Persisted queue storage details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueData {
    pub path: String,
    pub free_space_in_bytes: i64,
    pub storage_type: String,
}

/// Persisted queue capacity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueCapacity {
    pub max_queue_size_in_bytes: u64,
    pub queue_size_in_bytes: u64,
    pub max_unread_events: u64,
    pub page_capacity_in_bytes: u64,
}

/// Queue statistics; `type` is `memory` or `persisted`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueStats {
    pub data: QueueData,
    pub events: u64,
    pub capacity: QueueCapacity,
    #[serde(rename = "type")]
    pub queue_type: String,
    pub events_count: u64,
    pub queue_size_in_bytes: u64,
    pub max_queue_size_in_bytes: u64,
}

/// Live statistics of a single pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineData {
    pub events: EventCounts,
    pub flow: PipelineFlow,
    pub plugins: Plugins,
    pub reloads: Reloads,
    pub queue: QueueStats,
    pub hash: String,
    pub ephemeral_id: String,
}

/// One snapshot of `/_node/stats/pipelines`.
///
/// Each fetch produces a new value; snapshots are never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineAnswer {
    pub host: String,
    pub version: String,
    pub http_address: String,
    pub id: String,
    pub name: String,
    pub ephemeral_id: String,
    pub status: String,
    pub snapshot: bool,
    pub pipeline: PipelineDefaults,
    pub pipelines: BTreeMap<String, PipelineData>,
}

impl PipelineAnswer {
    /// Live stats for a pipeline, if present in this snapshot.
    pub fn pipeline(&self, name: &str) -> Option<&PipelineData> {
        self.pipelines.get(name)
    }

    /// Pipeline names in key order.
    pub fn pipeline_names(&self) -> impl Iterator<Item = &str> {
        self.pipelines.keys().map(String::as_str)
    }
}

/// Display name of a plugin: its configured name, or its id when unnamed.
pub fn plugin_label<'a>(name: &'a str, id: &'a str) -> &'a str {
    if name.is_empty() { id } else { name }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_series_missing_fields_default_to_zero() {
        let flow: FlowSeries = serde_json::from_str(r#"{"current": 2.5}"#).unwrap();
        assert_eq!(flow.current, 2.5);
        assert_eq!(flow.lifetime, 0.0);
        assert_eq!(flow.last_1_hour, 0.0);
    }

    #[test]
    fn test_flow_series_null_values_default_to_zero() {
        let flow: FlowSeries =
            serde_json::from_str(r#"{"current": null, "lifetime": 1.5, "last_1_minute": null}"#)
                .unwrap();
        assert_eq!(flow.current, 0.0);
        assert_eq!(flow.lifetime, 1.5);
        assert_eq!(flow.last_1_minute, 0.0);
    }

    #[test]
    fn test_delta_is_zero_when_current_equals_lifetime() {
        for value in [0.0, 1.0, 0.1, 123.456, -7.25, 1e-12] {
            let flow = FlowSeries {
                current: value,
                lifetime: value,
                ..FlowSeries::default()
            };
            assert_eq!(flow.delta(), 0.0);
        }
    }

    #[test]
    fn test_worker_metric_cycles_through_both_variants() {
        let start = WorkerMetric::default();
        assert_eq!(start, WorkerMetric::Utilization);
        assert_eq!(start.next(), WorkerMetric::MillisPerEvent);
        assert_eq!(start.next().next(), start);
        assert_eq!(WorkerMetric::ALL.len(), 2);
    }

    #[test]
    fn test_worker_metric_selects_matching_series() {
        let flow = WorkerFlow {
            worker_utilization: FlowSeries {
                current: 42.0,
                ..FlowSeries::default()
            },
            worker_millis_per_event: FlowSeries {
                current: 0.5,
                ..FlowSeries::default()
            },
        };
        assert_eq!(WorkerMetric::Utilization.series(&flow).current, 42.0);
        assert_eq!(WorkerMetric::MillisPerEvent.series(&flow).current, 0.5);
    }

    #[test]
    fn test_worker_metric_display_names_fit_numeric_column() {
        for metric in WorkerMetric::ALL {
            assert!(metric.display_name().chars().count() <= 15);
        }
    }

    #[test]
    fn test_pipeline_answer_decodes_and_ignores_unknown_fields() {
        let json = r#"{
            "host": "node-1",
            "version": "8.12.0",
            "unexpected": {"nested": true},
            "pipelines": {
                "main": {
                    "events": {"in": 10, "filtered": 8, "out": 7, "duration_in_millis": 99},
                    "flow": {"worker_concurrency": {"current": 1.5, "lifetime": 0.9}},
                    "plugins": {
                        "inputs": [{"id": "in-1", "name": "beats", "flow": {"throughput": {"current": 3.0}}}],
                        "filters": [{"id": "f-1", "name": "grok", "flow": {"worker_utilization": {"current": 12.0}}}],
                        "outputs": []
                    },
                    "queue": {"type": "memory"},
                    "reloads": {"failures": 1, "last_error": null}
                }
            }
        }"#;

        let answer: PipelineAnswer = serde_json::from_str(json).unwrap();
        assert_eq!(answer.host, "node-1");
        let main = answer.pipeline("main").unwrap();
        assert_eq!(main.events.r#in, 10);
        assert_eq!(main.events.filtered, 8);
        assert_eq!(main.flow.worker_concurrency.current, 1.5);
        assert_eq!(main.flow.queue_backpressure, FlowSeries::default());
        assert_eq!(main.plugins.inputs[0].flow.throughput.current, 3.0);
        assert_eq!(main.plugins.filters[0].flow.worker_utilization.current, 12.0);
        assert_eq!(main.queue.queue_type, "memory");
        assert_eq!(main.reloads.failures, 1);
    }

    #[test]
    fn test_empty_object_decodes_to_empty_snapshot() {
        let answer: PipelineAnswer = serde_json::from_str("{}").unwrap();
        assert_eq!(answer, PipelineAnswer::default());
        assert_eq!(answer.pipeline_names().count(), 0);
    }

    #[test]
    fn test_node_overview_decodes_pipeline_configuration() {
        let json = r#"{
            "host": "node-1",
            "pipelines": {
                "main": {"workers": 4, "batch_size": 125, "batch_delay": 50, "dead_letter_queue_enabled": true}
            },
            "jvm": {"pid": 42, "gc_collectors": ["G1 Young Generation"]}
        }"#;

        let node: NodeOverview = serde_json::from_str(json).unwrap();
        let main = node.pipeline_config("main").unwrap();
        assert_eq!(main.workers, 4);
        assert_eq!(main.batch_size, 125);
        assert_eq!(main.batch_delay, 50);
        assert!(main.dead_letter_queue_enabled);
        assert_eq!(node.jvm.gc_collectors.len(), 1);
        assert!(node.pipeline_config("missing").is_none());
    }

    #[test]
    fn test_event_counts_accumulate() {
        let mut total = EventCounts::default();
        total.accumulate(&EventCounts {
            r#in: 10,
            filtered: 8,
            out: 8,
            ..EventCounts::default()
        });
        total.accumulate(&EventCounts {
            r#in: 5,
            filtered: 5,
            out: 4,
            ..EventCounts::default()
        });
        assert_eq!((total.r#in, total.filtered, total.out), (15, 13, 12));
    }

    #[test]
    fn test_plugin_label_falls_back_to_id() {
        assert_eq!(plugin_label("grok", "abc"), "grok");
        assert_eq!(plugin_label("", "abc"), "abc");
    }
}
