//! Zonen-Klassifizierung
//!
//! Bildet eine Position auf eine Zone ab. Regionen werden in Index-Reihenfolge
//! geprueft, die erste passende gewinnt. Ueberlappende Regionen loesen sich
//! dadurch immer zugunsten des kleinsten Index auf.

use crate::region::RegionSet;
use crate::registry::TeilnehmerRegister;
use glam::Vec3;
use voicezone_core::TeilnehmerId;

/// Zone eines Teilnehmers
///
/// `Keine` ist ein gueltiger Zustand (ausserhalb aller Regionen), kein Fehler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Ausserhalb aller Regionen
    #[default]
    Keine,
    /// In der Region mit diesem Index
    Bereich(usize),
}

impl Zone {
    /// Index wie in der Plattform-Konvention (-1 = keine Zone)
    pub fn als_index(&self) -> i64 {
        match self {
            Self::Keine => -1,
            Self::Bereich(i) => *i as i64,
        }
    }

    pub fn ist_keine(&self) -> bool {
        matches!(self, Self::Keine)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.als_index())
    }
}

/// Klassifiziert eine Position gegen die Regionsmenge
pub fn klassifizieren(position: Vec3, regionen: &RegionSet) -> Zone {
    regionen
        .iter()
        .find(|(_, slot)| slot.region().is_some_and(|r| r.enthaelt(position)))
        .map(|(index, _)| Zone::Bereich(index))
        .unwrap_or(Zone::Keine)
}

/// Klassifiziert einen Teilnehmer anhand seiner aktuellen Position
///
/// Die Position wird bei jedem Aufruf frisch aus dem Register gelesen.
/// Ungueltige oder unbekannte Teilnehmer liegen in keiner Zone.
pub fn teilnehmer_klassifizieren<R>(register: &R, id: &TeilnehmerId, regionen: &RegionSet) -> Zone
where
    R: TeilnehmerRegister + ?Sized,
{
    if !register.ist_gueltig(id) {
        return Zone::Keine;
    }
    match register.position(id) {
        Some(position) => klassifizieren(position, regionen),
        None => Zone::Keine,
    }
}
