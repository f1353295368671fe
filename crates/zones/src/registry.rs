//! Teilnehmer-Register – Schnittstelle zur Host-Plattform
//!
//! Die Zonen-Logik besitzt keine Teilnehmer. Sie haelt nur `TeilnehmerId`s
//! und loest diese bei jedem Zugriff gegen das Register auf. Verlaesst ein
//! Teilnehmer den Raum mitten im Zyklus, liefert das Register einfach
//! `ist_gueltig == false`.
//!
//! [`SpeicherRegister`] ist eine In-Memory-Implementierung fuer den
//! Simulations-Host und Tests. Positionen duerfen von anderen Subsystemen
//! jederzeit geschrieben werden (DashMap, per-Entry-Lock).

use dashmap::DashMap;
use glam::Vec3;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use voicezone_core::{Result, TeilnehmerId, VoicezoneError};

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Lesender Zugriff auf das externe Teilnehmer-Register
pub trait TeilnehmerRegister {
    /// Anzahl der aktuell gelisteten Teilnehmer
    fn anzahl(&self) -> usize;

    /// Alle aktuell gelisteten Teilnehmer
    fn auflisten(&self) -> Vec<TeilnehmerId>;

    /// Ist der Handle noch gueltig?
    fn ist_gueltig(&self, id: &TeilnehmerId) -> bool;

    /// Aktuelle Position (None wenn unbekannt oder ungueltig)
    fn position(&self, id: &TeilnehmerId) -> Option<Vec3>;

    /// Anzeigename fuer Log-Ausgaben
    fn anzeigename(&self, _id: &TeilnehmerId) -> Option<String> {
        None
    }
}

/// Bezeichnung eines Teilnehmers fuer Logs: Anzeigename oder ID
pub(crate) fn bezeichnung<R>(register: &R, id: &TeilnehmerId) -> String
where
    R: TeilnehmerRegister + ?Sized,
{
    register
        .anzeigename(id)
        .unwrap_or_else(|| id.to_string())
}

// ---------------------------------------------------------------------------
// SpeicherRegister
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Eintrag {
    name: String,
    position: Vec3,
    gueltig: bool,
    /// Beitritts-Reihenfolge, bestimmt die Reihenfolge von `auflisten`
    sequenz: u64,
}

/// In-Memory Teilnehmer-Register
///
/// `Clone` teilt den inneren Zustand (Arc).
#[derive(Clone, Default)]
pub struct SpeicherRegister {
    inner: Arc<SpeicherRegisterInner>,
}

#[derive(Default)]
struct SpeicherRegisterInner {
    teilnehmer: DashMap<TeilnehmerId, Eintrag>,
    naechste_sequenz: AtomicU64,
}

impl SpeicherRegister {
    /// Erstellt ein leeres Register
    pub fn neu() -> Self {
        Self::default()
    }

    /// Registriert einen Teilnehmer an der gegebenen Position
    pub fn beitreten(
        &self,
        id: TeilnehmerId,
        name: impl Into<String>,
        position: Vec3,
    ) -> Result<()> {
        if self.inner.teilnehmer.contains_key(&id) {
            return Err(VoicezoneError::TeilnehmerBereitsRegistriert(id.to_string()));
        }
        let sequenz = self.inner.naechste_sequenz.fetch_add(1, Ordering::Relaxed);
        let name = name.into();
        tracing::debug!(teilnehmer = %id, name = %name, "Teilnehmer registriert");
        self.inner.teilnehmer.insert(
            id,
            Eintrag {
                name,
                position,
                gueltig: true,
                sequenz,
            },
        );
        Ok(())
    }

    /// Entfernt einen Teilnehmer; sein Handle wird ungueltig
    pub fn verlassen(&self, id: &TeilnehmerId) -> Result<()> {
        match self.inner.teilnehmer.remove(id) {
            Some(_) => {
                tracing::debug!(teilnehmer = %id, "Teilnehmer entfernt");
                Ok(())
            }
            None => Err(VoicezoneError::TeilnehmerNichtGefunden(id.to_string())),
        }
    }

    /// Markiert einen Teilnehmer als ungueltig, ohne ihn aus der Liste zu nehmen
    ///
    /// Entspricht einem Handle, das noch aufgezaehlt wird, dessen Teilnehmer
    /// aber bereits weg ist.
    pub fn ungueltig_markieren(&self, id: &TeilnehmerId) -> bool {
        match self.inner.teilnehmer.get_mut(id) {
            Some(mut eintrag) => {
                eintrag.gueltig = false;
                true
            }
            None => false,
        }
    }

    /// Setzt die Position eines Teilnehmers (Bewegung)
    pub fn position_setzen(&self, id: &TeilnehmerId, position: Vec3) -> Result<()> {
        match self.inner.teilnehmer.get_mut(id) {
            Some(mut eintrag) => {
                eintrag.position = position;
                Ok(())
            }
            None => Err(VoicezoneError::TeilnehmerNichtGefunden(id.to_string())),
        }
    }
}

impl TeilnehmerRegister for SpeicherRegister {
    fn anzahl(&self) -> usize {
        self.inner.teilnehmer.len()
    }

    fn auflisten(&self) -> Vec<TeilnehmerId> {
        let mut liste: Vec<(u64, TeilnehmerId)> = self
            .inner
            .teilnehmer
            .iter()
            .map(|e| (e.sequenz, *e.key()))
            .collect();
        liste.sort_unstable_by_key(|(sequenz, _)| *sequenz);
        liste.into_iter().map(|(_, id)| id).collect()
    }

    fn ist_gueltig(&self, id: &TeilnehmerId) -> bool {
        self.inner
            .teilnehmer
            .get(id)
            .map(|e| e.gueltig)
            .unwrap_or(false)
    }

    fn position(&self, id: &TeilnehmerId) -> Option<Vec3> {
        self.inner
            .teilnehmer
            .get(id)
            .filter(|e| e.gueltig)
            .map(|e| e.position)
    }

    fn anzeigename(&self, id: &TeilnehmerId) -> Option<String> {
        self.inner.teilnehmer.get(id).map(|e| e.name.clone())
    }
}
