use anyhow::Result;

use crate::config::Config;
use crate::heartbeat::HeartbeatMonitor;

/// Drive the liveness monitor for a fixed number of beats at a fixed
/// cadence, printing each classification. A demonstration runner; hosting
/// systems normally signal the monitor from their own scheduler.
pub async fn run(config: &Config, beats: u32, interval_secs: Option<f64>) -> Result<()> {
    let persona = config.resolve_persona();
    let mut monitor = HeartbeatMonitor::new(config.heartbeat.policy());

    let cadence = interval_secs.unwrap_or(config.heartbeat.interval_secs);
    let period = std::time::Duration::from_secs_f64(cadence.max(0.1));
    let mut interval = tokio::time::interval(period);

    tracing::info!(
        persona = %persona.name,
        cadence_secs = cadence,
        beats,
        "starting heartbeat runner"
    );

    for beat in 1..=beats {
        interval.tick().await;
        let status = monitor.signal();
        println!("[{beat}/{beats}] {status}");
    }

    Ok(())
}
