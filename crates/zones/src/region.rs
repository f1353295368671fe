//! Regionen – raeumliche Volumen die Zonen definieren
//!
//! Die Reihenfolge der Regionen ist ihre Identitaet: Region `i` definiert
//! Zone `i`. Eine `RegionSet` ist nach dem Laden unveraenderlich und nie leer.
//!
//! Einzelne Plaetze duerfen unbelegt sein (`RegionSlot::leer`). Sie behalten
//! ihren Index, enthalten aber keinen Punkt.

use crate::config::RegionKonfig;
use crate::error::{ZonenError, ZonenResult};
use glam::Vec3;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Region-Trait
// ---------------------------------------------------------------------------

/// Ein raeumliches Volumen mit Punkt-Test
///
/// Die Zonen-Logik fragt nur "liegt P in R?" – Kollision oder Physik
/// liegen beim Host.
pub trait Region: std::fmt::Debug + Send + Sync {
    /// Prueft ob der Punkt im Volumen liegt
    fn enthaelt(&self, punkt: Vec3) -> bool;
}

// ---------------------------------------------------------------------------
// Volumen
// ---------------------------------------------------------------------------

/// Konfigurierbare Standard-Volumen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum Volumen {
    /// Achsenparalleler Quader, Rand inklusive
    Quader { min: Vec3, max: Vec3 },
    /// Kugel, Rand inklusive
    Kugel { zentrum: Vec3, radius: f32 },
}

impl Volumen {
    /// Prueft die Geometrie auf Plausibilitaet
    pub fn pruefen(&self) -> Result<(), String> {
        match self {
            Self::Quader { min, max } => {
                if !min.is_finite() || !max.is_finite() {
                    return Err("Quader-Ecken muessen endlich sein".into());
                }
                if !min.cmple(*max).all() {
                    return Err(format!("min {min} liegt nicht unterhalb von max {max}"));
                }
                Ok(())
            }
            Self::Kugel { zentrum, radius } => {
                if !zentrum.is_finite() {
                    return Err("Kugel-Zentrum muss endlich sein".into());
                }
                if !radius.is_finite() || *radius < 0.0 {
                    return Err(format!("Kugel-Radius {radius} muss endlich und >= 0 sein"));
                }
                Ok(())
            }
        }
    }
}

impl Region for Volumen {
    fn enthaelt(&self, punkt: Vec3) -> bool {
        match self {
            Self::Quader { min, max } => punkt.cmpge(*min).all() && punkt.cmple(*max).all(),
            Self::Kugel { zentrum, radius } => punkt.distance_squared(*zentrum) <= radius * radius,
        }
    }
}

// ---------------------------------------------------------------------------
// RegionSlot
// ---------------------------------------------------------------------------

/// Ein Platz in der Regionsmenge (belegt oder leer)
#[derive(Debug)]
pub struct RegionSlot {
    name: Option<String>,
    region: Option<Box<dyn Region>>,
}

impl RegionSlot {
    /// Belegter Platz ohne Namen
    pub fn aktiv(region: impl Region + 'static) -> Self {
        Self {
            name: None,
            region: Some(Box::new(region)),
        }
    }

    /// Belegter Platz mit Anzeigenamen fuer Logs
    pub fn benannt(name: impl Into<String>, region: impl Region + 'static) -> Self {
        Self {
            name: Some(name.into()),
            region: Some(Box::new(region)),
        }
    }

    /// Unbelegter Platz – behaelt seinen Index, enthaelt nie einen Punkt
    pub fn leer() -> Self {
        Self {
            name: None,
            region: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn region(&self) -> Option<&dyn Region> {
        self.region.as_deref()
    }

    pub fn ist_aktiv(&self) -> bool {
        self.region.is_some()
    }
}

// ---------------------------------------------------------------------------
// RegionSet
// ---------------------------------------------------------------------------

/// Geordnete, nicht-leere Menge von Regionen
#[derive(Debug)]
pub struct RegionSet {
    slots: Vec<RegionSlot>,
}

impl RegionSet {
    /// Erstellt eine Regionsmenge
    ///
    /// Schlaegt fehl wenn keine Plaetze vorhanden sind oder keiner belegt ist.
    pub fn neu(slots: Vec<RegionSlot>) -> ZonenResult<Self> {
        if slots.is_empty() {
            return Err(ZonenError::KeineRegionen);
        }
        if !slots.iter().any(RegionSlot::ist_aktiv) {
            return Err(ZonenError::KeineAktivenRegionen(slots.len()));
        }
        Ok(Self { slots })
    }

    /// Erstellt eine Regionsmenge aus Standard-Volumen (alle belegt)
    pub fn aus_volumen(volumen: impl IntoIterator<Item = Volumen>) -> ZonenResult<Self> {
        let mut slots = Vec::new();
        for (index, v) in volumen.into_iter().enumerate() {
            v.pruefen()
                .map_err(|grund| ZonenError::UngueltigesVolumen { index, grund })?;
            slots.push(RegionSlot::aktiv(v));
        }
        Self::neu(slots)
    }

    /// Erstellt eine Regionsmenge aus der Konfiguration
    ///
    /// Deaktivierte Eintraege werden zu leeren Plaetzen; ihre Geometrie wird
    /// nicht geprueft.
    pub fn aus_konfig(regionen: &[RegionKonfig]) -> ZonenResult<Self> {
        let mut slots = Vec::with_capacity(regionen.len());
        for (index, r) in regionen.iter().enumerate() {
            if !r.aktiv {
                slots.push(RegionSlot::leer());
                continue;
            }
            r.volumen
                .pruefen()
                .map_err(|grund| ZonenError::UngueltigesVolumen { index, grund })?;
            let slot = match &r.name {
                Some(name) => RegionSlot::benannt(name.clone(), r.volumen),
                None => RegionSlot::aktiv(r.volumen),
            };
            slots.push(slot);
        }
        Self::neu(slots)
    }

    /// Anzahl der Plaetze (= Anzahl moeglicher Zonen)
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Immer false – eine leere Menge laesst sich nicht erstellen
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Anzahl der belegten Plaetze
    pub fn aktive_anzahl(&self) -> usize {
        self.slots.iter().filter(|s| s.ist_aktiv()).count()
    }

    /// Iteriert in Index-Reihenfolge ueber alle Plaetze
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RegionSlot)> {
        self.slots.iter().enumerate()
    }

    /// Anzeigename der Region mit dem gegebenen Index
    pub fn name(&self, index: usize) -> Option<&str> {
        self.slots.get(index).and_then(RegionSlot::name)
    }
}
