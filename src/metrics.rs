//! Prometheus metric descriptors and text exposition.
//!
//! The exporter follows the pull model end to end: every scrape builds a
//! fresh registry from the cycle's sample set and renders it once, so no
//! metric state survives between scrapes. `up` is emitted for every host;
//! the per-device series are emitted only when the device answered.

use prometheus::{GaugeVec, Opts, Registry, TextEncoder};

use crate::types::TelemetrySample;

/// Prefix shared by every exported series.
pub const METRIC_PREFIX: &str = "leontp_";

/// Static description of one exported metric series.
#[derive(Debug, Clone, Copy)]
pub struct MetricDesc {
    /// Fully prefixed series name.
    pub name: &'static str,
    /// Help text for the exposition format.
    pub help: &'static str,
    /// Whether the series carries the `serial` label in addition to `host`.
    pub per_serial: bool,
}

/// All series this exporter can produce.
pub const DESCRIPTORS: &[MetricDesc] = &[
    MetricDesc {
        name: "leontp_up",
        help: "Scrape was successful",
        per_serial: false,
    },
    MetricDesc {
        name: "leontp_satellites_count",
        help: "Active satellites",
        per_serial: true,
    },
    MetricDesc {
        name: "leontp_uptime_seconds",
        help: "Uptime",
        per_serial: true,
    },
    MetricDesc {
        name: "leontp_lock_time_seconds",
        help: "GPS lock time",
        per_serial: true,
    },
    MetricDesc {
        name: "leontp_ntp_requests_count",
        help: "NTP requests served",
        per_serial: true,
    },
    MetricDesc {
        name: "leontp_ntp_time",
        help: "NTP time",
        per_serial: true,
    },
];

fn gauge(registry: &Registry, desc: &MetricDesc) -> Result<GaugeVec, prometheus::Error> {
    let labels: &[&str] = if desc.per_serial {
        &["host", "serial"]
    } else {
        &["host"]
    };
    let vec = GaugeVec::new(Opts::new(desc.name, desc.help), labels)?;
    registry.register(Box::new(vec.clone()))?;
    Ok(vec)
}

/// Render a complete sample set as Prometheus text exposition.
///
/// # Errors
/// Returns a [`prometheus::Error`] if registration or encoding fails,
/// which with the static descriptor table should not happen in practice.
pub fn render(samples: &[TelemetrySample]) -> Result<String, prometheus::Error> {
    let registry = Registry::new();
    let up = gauge(&registry, &DESCRIPTORS[0])?;
    let satellites = gauge(&registry, &DESCRIPTORS[1])?;
    let uptime = gauge(&registry, &DESCRIPTORS[2])?;
    let lock_time = gauge(&registry, &DESCRIPTORS[3])?;
    let ntp_requests = gauge(&registry, &DESCRIPTORS[4])?;
    let ntp_time = gauge(&registry, &DESCRIPTORS[5])?;

    for sample in samples {
        if let Some(reply) = &sample.telemetry {
            up.with_label_values(&[&sample.host]).set(1.0);

            let serial = reply.serial.to_string();
            let labels = [sample.host.as_str(), serial.as_str()];
            satellites
                .with_label_values(&labels)
                .set(f64::from(reply.satellites));
            uptime
                .with_label_values(&labels)
                .set(f64::from(reply.uptime_seconds));
            lock_time
                .with_label_values(&labels)
                .set(f64::from(reply.lock_time_seconds));
            ntp_requests
                .with_label_values(&labels)
                .set(f64::from(reply.ntp_requests_served));
            ntp_time.with_label_values(&labels).set(reply.ntp_time());
        } else {
            up.with_label_values(&[&sample.host]).set(0.0);
        }
    }

    let mut body = String::new();
    TextEncoder::new().encode_utf8(&registry.gather(), &mut body)?;
    Ok(body)
}
