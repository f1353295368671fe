//! VoiceZone Host – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und spielt das
//! Szenario ab.

use anyhow::Result;
use voicezone_host::{config::HostConfig, Simulation};
use voicezone_observability::logging_initialisieren;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Konfigurationsdatei-Pfad aus Umgebungsvariable oder Standard
    let config_pfad = std::env::var("VOICEZONE_CONFIG")
        .unwrap_or_else(|_| "voicezone.toml".into());

    // Konfiguration laden (Standardwerte falls Datei fehlt)
    let config = HostConfig::laden(&config_pfad)?;

    logging_initialisieren(&config.logging.level, &config.logging.format);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        "VoiceZone Host wird initialisiert"
    );

    let ergebnis = Simulation::neu(config).starten().await?;

    for t in &ergebnis.endzustand {
        let zone = t.zone.map(|z| z.to_string()).unwrap_or_else(|| "-".into());
        match t.parameter {
            Some(p) => tracing::info!(
                teilnehmer = %t.name,
                zone = %zone,
                gain = p.gain,
                distanz_fern = p.distanz_fern,
                tiefpass = p.tiefpass,
                "Endzustand"
            ),
            None => tracing::info!(
                teilnehmer = %t.name,
                zone = %zone,
                "Endzustand (keine Parameter gesetzt)"
            ),
        }
    }

    Ok(())
}
