//! Zonen-Konfiguration
//!
//! Wird vom Host aus TOML geladen. Alle Felder haben Standardwerte; nur die
//! Regionen muessen angegeben werden, sonst bleibt die Zonen-Stummschaltung
//! inaktiv. Ein Intervall von 0 gleicht bei jedem Tick ab.

use crate::error::{ZonenError, ZonenResult};
use crate::region::Volumen;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Konfiguration der Zonen-Logik
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZonenKonfig {
    /// Gain fuer Teilnehmer derselben Zone
    pub innen_gain: f32,
    /// Reichweite fuer Teilnehmer derselben Zone
    pub innen_distanz_fern: f32,
    /// Gain fuer Teilnehmer anderer Zonen
    pub aussen_gain: f32,
    /// Reichweite fuer Teilnehmer anderer Zonen
    pub aussen_distanz_fern: f32,
    /// Abgleich-Intervall in Sekunden (0 = jeder Tick)
    pub intervall_sekunden: f64,
    /// Regionen in Zonen-Reihenfolge
    pub regionen: Vec<RegionKonfig>,
}

impl Default for ZonenKonfig {
    fn default() -> Self {
        Self {
            innen_gain: 15.0,
            innen_distanz_fern: 25.0,
            aussen_gain: 0.0,
            aussen_distanz_fern: 0.0,
            intervall_sekunden: 1.0,
            regionen: Vec::new(),
        }
    }
}

impl ZonenKonfig {
    /// Abgleich-Intervall als Duration; muss endlich und >= 0 sein
    pub fn intervall(&self) -> ZonenResult<Duration> {
        Duration::try_from_secs_f64(self.intervall_sekunden)
            .map_err(|_| ZonenError::UngueltigesIntervall(self.intervall_sekunden))
    }

    /// Abgleich-Intervall; ungueltige Werte fallen mit Warnung auf den Standard zurueck
    pub fn intervall_oder_standard(&self) -> Duration {
        self.intervall().unwrap_or_else(|e| {
            let standard = Self::default().intervall_sekunden;
            tracing::warn!(fehler = %e, standard_s = standard, "Verwende Standard-Intervall");
            Duration::from_secs_f64(standard)
        })
    }
}

/// Eine Region in der Konfiguration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionKonfig {
    /// Anzeigename fuer Logs
    #[serde(default)]
    pub name: Option<String>,
    /// Deaktivierte Regionen behalten ihren Index, enthalten aber nichts
    #[serde(default = "standard_aktiv")]
    pub aktiv: bool,
    pub volumen: Volumen,
}

fn standard_aktiv() -> bool {
    true
}
