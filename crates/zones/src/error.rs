//! Fehlertypen fuer die Zonen-Logik
//!
//! Alle Varianten sind Konfigurationsfehler. Abbrechen laesst den Start nur
//! eine fehlende oder leere Regionsmenge; ungueltige Intervalle und
//! Profilwerte fallen auf Standardwerte zurueck. Zur Laufzeit gibt die Logik
//! keine Fehler nach aussen: ungueltige Teilnehmer werden uebersprungen.

use thiserror::Error;

/// Konfigurationsfehler der Zonen-Logik
#[derive(Debug, Error, PartialEq)]
pub enum ZonenError {
    #[error("Keine Zonen-Regionen konfiguriert")]
    KeineRegionen,

    #[error("Alle {0} Zonen-Regionen sind deaktiviert")]
    KeineAktivenRegionen(usize),

    #[error("Ungueltiges Volumen fuer Region {index}: {grund}")]
    UngueltigesVolumen { index: usize, grund: String },

    #[error("Ungueltiges Abgleich-Intervall: {0} (muss endlich und >= 0 sein)")]
    UngueltigesIntervall(f64),

    #[error("Ungueltiger Profilwert {feld}={wert} (muss endlich und >= 0 sein)")]
    UngueltigerProfilwert { feld: &'static str, wert: f32 },
}

pub type ZonenResult<T> = Result<T, ZonenError>;
