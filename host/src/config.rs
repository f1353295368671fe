//! Host-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Neben den Zonen enthaelt sie
//! ein Szenario: welche Teilnehmer wann beitreten, sich bewegen und gehen.
//! Alle Abschnitte haben Standardwerte.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use voicezone_core::{Result, VoicezoneError};
use voicezone_observability::{log_format_gueltig, log_level_gueltig};
use voicezone_zones::ZonenKonfig;

/// Vollstaendige Host-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
    /// Zonen, Profile und Abgleich-Intervall
    pub zonen: ZonenKonfig,
    /// Ablauf der Simulation
    pub simulation: SimulationsEinstellungen,
    /// Teilnehmer des Szenarios
    pub teilnehmer: Vec<TeilnehmerEinstellung>,
    /// Geplante Bewegungen
    pub bewegungen: Vec<BewegungsEinstellung>,
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level ("trace" .. "error") oder Filter-Ausdruck
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// Ablauf der Simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationsEinstellungen {
    /// Laenge eines Frames in Millisekunden
    pub tick_ms: u64,
    /// Gesamtdauer in Sekunden
    pub dauer_sekunden: f64,
    /// Name des lokalen Beobachters (Standard: erster Teilnehmer)
    pub lokal: Option<String>,
}

impl Default for SimulationsEinstellungen {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            dauer_sekunden: 10.0,
            lokal: None,
        }
    }
}

/// Ein Teilnehmer im Szenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeilnehmerEinstellung {
    pub name: String,
    pub position: Vec3,
    /// Beitrittszeitpunkt in Sekunden (0 = von Anfang an da)
    #[serde(default)]
    pub beitritt: f64,
    /// Zeitpunkt des Verlassens in Sekunden
    #[serde(default)]
    pub verlassen: Option<f64>,
}

/// Eine Positionsaenderung im Szenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BewegungsEinstellung {
    /// Zeitpunkt in Sekunden
    pub zeit: f64,
    pub teilnehmer: String,
    pub position: Vec3,
}

impl HostConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Prueft das Szenario auf Konsistenz
    ///
    /// Die Zonen selbst werden hier nicht geprueft: eine fehlerhafte
    /// Zonen-Konfiguration deaktiviert nur die Zonen-Logik, nicht den Host.
    pub fn validieren(&self) -> Result<()> {
        if !log_level_gueltig(&self.logging.level) {
            return Err(VoicezoneError::konfiguration(format!(
                "logging.level '{}' ist ungueltig",
                self.logging.level
            )));
        }
        if !log_format_gueltig(&self.logging.format) {
            return Err(VoicezoneError::konfiguration(format!(
                "logging.format '{}' ist ungueltig (text oder json)",
                self.logging.format
            )));
        }
        if self.simulation.tick_ms == 0 {
            return Err(VoicezoneError::konfiguration("simulation.tick_ms muss > 0 sein"));
        }
        zeit_pruefen("simulation.dauer_sekunden", self.simulation.dauer_sekunden)?;

        let mut namen = HashSet::new();
        for t in &self.teilnehmer {
            if !namen.insert(t.name.as_str()) {
                return Err(VoicezoneError::konfiguration(format!(
                    "Teilnehmer '{}' ist doppelt angegeben",
                    t.name
                )));
            }
            zeit_pruefen("teilnehmer.beitritt", t.beitritt)?;
            if let Some(verlassen) = t.verlassen {
                zeit_pruefen("teilnehmer.verlassen", verlassen)?;
                if verlassen < t.beitritt {
                    return Err(VoicezoneError::konfiguration(format!(
                        "Teilnehmer '{}' verlaesst den Raum vor dem Beitritt",
                        t.name
                    )));
                }
            }
        }

        for b in &self.bewegungen {
            zeit_pruefen("bewegungen.zeit", b.zeit)?;
            if !namen.contains(b.teilnehmer.as_str()) {
                return Err(VoicezoneError::konfiguration(format!(
                    "Bewegung fuer unbekannten Teilnehmer '{}'",
                    b.teilnehmer
                )));
            }
        }

        let lokal = self.lokaler_name().ok_or_else(|| {
            VoicezoneError::konfiguration("Szenario enthaelt keine Teilnehmer")
        })?;
        if !namen.contains(lokal) {
            return Err(VoicezoneError::konfiguration(format!(
                "Lokaler Teilnehmer '{lokal}' fehlt in [[teilnehmer]]"
            )));
        }
        Ok(())
    }

    /// Name des lokalen Beobachters
    pub fn lokaler_name(&self) -> Option<&str> {
        self.simulation
            .lokal
            .as_deref()
            .or_else(|| self.teilnehmer.first().map(|t| t.name.as_str()))
    }
}

fn zeit_pruefen(feld: &str, wert: f64) -> Result<()> {
    if wert.is_finite() && wert >= 0.0 {
        Ok(())
    } else {
        Err(VoicezoneError::konfiguration(format!(
            "{feld}={wert} muss endlich und >= 0 sein"
        )))
    }
}
