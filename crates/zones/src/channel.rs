//! Voice-Kanal – Schnittstelle zum Stimm-Subsystem der Plattform
//!
//! Die Zonen-Logik schreibt nur Parameter pro Ziel-Teilnehmer. Avatar-Audio
//! ist bewusst nicht Teil dieser Schnittstelle.

use crate::policy::StimmParameter;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use voicezone_core::TeilnehmerId;

/// Schreibender Zugriff auf den externen Voice-Kanal
pub trait VoiceKanal {
    /// Setzt die Stimmparameter des Ziels aus Sicht des lokalen Beobachters
    fn parameter_setzen(&self, ziel: &TeilnehmerId, parameter: &StimmParameter);
}

// ---------------------------------------------------------------------------
// SpeicherKanal
// ---------------------------------------------------------------------------

/// In-Memory Voice-Kanal
///
/// Haelt den zuletzt gesetzten Zustand pro Ziel und protokolliert jeden
/// Schreibvorgang. `Clone` teilt den inneren Zustand.
#[derive(Clone, Default)]
pub struct SpeicherKanal {
    inner: Arc<SpeicherKanalInner>,
}

#[derive(Default)]
struct SpeicherKanalInner {
    aktuell: DashMap<TeilnehmerId, StimmParameter>,
    protokoll: Mutex<Vec<(TeilnehmerId, StimmParameter)>>,
}

impl SpeicherKanal {
    pub fn neu() -> Self {
        Self::default()
    }

    /// Zuletzt gesetzte Parameter eines Ziels
    pub fn parameter_von(&self, ziel: &TeilnehmerId) -> Option<StimmParameter> {
        self.inner.aktuell.get(ziel).map(|p| *p)
    }

    /// Anzahl aller bisherigen Schreibvorgaenge
    pub fn schreibvorgaenge(&self) -> usize {
        self.inner.protokoll.lock().len()
    }

    /// Kopie des Schreibprotokolls in Reihenfolge
    pub fn protokoll(&self) -> Vec<(TeilnehmerId, StimmParameter)> {
        self.inner.protokoll.lock().clone()
    }

    /// Alle Ziele mit ihren aktuellen Parametern
    pub fn alle(&self) -> Vec<(TeilnehmerId, StimmParameter)> {
        self.inner
            .aktuell
            .iter()
            .map(|e| (*e.key(), *e.value()))
            .collect()
    }
}

impl VoiceKanal for SpeicherKanal {
    fn parameter_setzen(&self, ziel: &TeilnehmerId, parameter: &StimmParameter) {
        self.inner.aktuell.insert(*ziel, *parameter);
        self.inner.protokoll.lock().push((*ziel, *parameter));
    }
}
