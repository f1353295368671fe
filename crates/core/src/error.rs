//! Fehlertypen fuer VoiceZone
//!
//! Zentraler Fehler-Enum fuer Operationen auf den externen Kollaborateuren
//! (Teilnehmer-Register, Voice-Kanal) und die Konfiguration.
//! Die Zonen-Logik definiert zusaetzlich eigene Fehler in `voicezone-zones`.

use thiserror::Error;

/// Globaler Result-Alias fuer VoiceZone
pub type Result<T> = std::result::Result<T, VoicezoneError>;

/// Alle moeglichen Fehler ausserhalb der Zonen-Logik
#[derive(Debug, Error)]
pub enum VoicezoneError {
    // --- Teilnehmer ---
    #[error("Teilnehmer nicht gefunden: {0}")]
    TeilnehmerNichtGefunden(String),

    #[error("Teilnehmer bereits registriert: {0}")]
    TeilnehmerBereitsRegistriert(String),

    // --- Konfiguration ---
    #[error("Konfigurationsfehler: {0}")]
    Konfiguration(String),
}

impl VoicezoneError {
    /// Erstellt einen Konfigurationsfehler
    pub fn konfiguration(msg: impl Into<String>) -> Self {
        Self::Konfiguration(msg.into())
    }

    /// Gibt true zurueck wenn der Fehler einen unbekannten Teilnehmer betrifft
    ///
    /// Solche Fehler sind transient: der Teilnehmer hat den Raum zwischen
    /// Aufzaehlung und Zugriff verlassen.
    pub fn ist_transient(&self) -> bool {
        matches!(self, Self::TeilnehmerNichtGefunden(_))
    }
}
