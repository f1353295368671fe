//! Zonen-Tracker – Zuordnung Teilnehmer -> Zone
//!
//! Haelt einen nicht-besitzenden Schnappschuss des Rosters (nur IDs) und
//! pro gueltigem Teilnehmer genau eine Zone.
//!
//! - `roster_neu_aufbauen` ersetzt Schnappschuss und Zuordnung komplett
//!   (bei Join, Leave und Start). Eintraege verlassener Teilnehmer fallen
//!   dabei weg, sie werden nie einzeln geloescht.
//! - `abgleichen` klassifiziert jeden gueltigen Teilnehmer neu und meldet,
//!   ob sich irgendeine Zone geaendert hat. Ungueltige Teilnehmer werden
//!   uebersprungen; ihr alter Wert bleibt bis zum naechsten Neuaufbau.

use crate::classifier::{teilnehmer_klassifizieren, Zone};
use crate::region::RegionSet;
use crate::registry::{bezeichnung, TeilnehmerRegister};
use std::collections::HashMap;
use voicezone_core::TeilnehmerId;

/// Zonen-Zuordnung aller verfolgten Teilnehmer
#[derive(Debug, Default)]
pub struct ZonenTracker {
    /// Roster-Schnappschuss in Aufzaehlungs-Reihenfolge
    roster: Vec<TeilnehmerId>,
    /// Zone pro gueltigem Teilnehmer
    zonen: HashMap<TeilnehmerId, Zone>,
}

impl ZonenTracker {
    pub fn neu() -> Self {
        Self::default()
    }

    /// Zaehlt alle Teilnehmer neu auf und klassifiziert sie sofort
    pub fn roster_neu_aufbauen<R>(&mut self, register: &R, regionen: &RegionSet)
    where
        R: TeilnehmerRegister + ?Sized,
    {
        let roster = register.auflisten();
        let mut zonen = HashMap::with_capacity(roster.len());

        for id in &roster {
            if !register.ist_gueltig(id) {
                tracing::trace!(teilnehmer = %id, "Ungueltiger Teilnehmer beim Neuaufbau");
                continue;
            }
            zonen.insert(*id, teilnehmer_klassifizieren(register, id, regionen));
        }

        tracing::debug!(
            gelistet = roster.len(),
            zugeordnet = zonen.len(),
            "Roster neu aufgebaut"
        );

        self.roster = roster;
        self.zonen = zonen;
    }

    /// Klassifiziert alle gueltigen Teilnehmer neu; true bei mindestens einer Aenderung
    pub fn abgleichen<R>(&mut self, register: &R, regionen: &RegionSet) -> bool
    where
        R: TeilnehmerRegister + ?Sized,
    {
        let mut geaendert = false;

        for id in &self.roster {
            if !register.ist_gueltig(id) {
                continue;
            }

            let neu = teilnehmer_klassifizieren(register, id, regionen);
            let alt = self.zonen.insert(*id, neu).unwrap_or_default();
            if alt != neu {
                tracing::info!(
                    teilnehmer = %bezeichnung(register, id),
                    von = %alt,
                    nach = %neu,
                    region = regionsname(regionen, neu),
                    "Teilnehmer hat die Zone gewechselt"
                );
                geaendert = true;
            }
        }

        geaendert
    }

    /// Gespeicherte Zone eines Teilnehmers (None wenn nicht zugeordnet)
    pub fn zone_von(&self, id: &TeilnehmerId) -> Option<Zone> {
        self.zonen.get(id).copied()
    }

    /// Roster-Schnappschuss
    pub fn roster(&self) -> &[TeilnehmerId] {
        &self.roster
    }

    /// Anzahl der Zuordnungen
    pub fn zuordnungen(&self) -> usize {
        self.zonen.len()
    }
}

/// Anzeigename der Region einer Zone fuer Logs
fn regionsname(regionen: &RegionSet, zone: Zone) -> &str {
    match zone {
        Zone::Bereich(index) => regionen.name(index).unwrap_or("-"),
        Zone::Keine => "-",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{RegionSlot, Volumen};
    use crate::registry::SpeicherRegister;
    use glam::Vec3;

    fn regionen() -> RegionSet {
        RegionSet::aus_volumen(vec![
            Volumen::Quader {
                min: Vec3::ZERO,
                max: Vec3::splat(10.0),
            },
            Volumen::Quader {
                min: Vec3::new(20.0, 0.0, 0.0),
                max: Vec3::new(30.0, 10.0, 10.0),
            },
        ])
        .unwrap()
    }

    fn id(n: u128) -> TeilnehmerId {
        TeilnehmerId::aus_zahl(n)
    }

    #[test]
    fn neuaufbau_klassifiziert_sofort() {
        let set = regionen();
        let register = SpeicherRegister::neu();
        register.beitreten(id(1), "A", Vec3::splat(5.0)).unwrap();
        register.beitreten(id(2), "B", Vec3::new(25.0, 5.0, 5.0)).unwrap();
        register.beitreten(id(3), "C", Vec3::splat(-50.0)).unwrap();

        let mut tracker = ZonenTracker::neu();
        tracker.roster_neu_aufbauen(&register, &set);

        assert_eq!(tracker.roster().len(), 3);
        assert_eq!(tracker.zone_von(&id(1)), Some(Zone::Bereich(0)));
        assert_eq!(tracker.zone_von(&id(2)), Some(Zone::Bereich(1)));
        assert_eq!(tracker.zone_von(&id(3)), Some(Zone::Keine));
    }

    #[test]
    fn neuaufbau_verwirft_alte_eintraege() {
        let set = regionen();
        let register = SpeicherRegister::neu();
        register.beitreten(id(1), "A", Vec3::splat(5.0)).unwrap();
        register.beitreten(id(2), "B", Vec3::splat(5.0)).unwrap();

        let mut tracker = ZonenTracker::neu();
        tracker.roster_neu_aufbauen(&register, &set);
        assert_eq!(tracker.zuordnungen(), 2);

        register.verlassen(&id(2)).unwrap();
        tracker.roster_neu_aufbauen(&register, &set);

        assert_eq!(tracker.zuordnungen(), 1);
        assert_eq!(tracker.zone_von(&id(2)), None);
        assert_eq!(tracker.roster(), &[id(1)]);
    }

    #[test]
    fn ungueltige_bekommen_keine_zuordnung() {
        let set = regionen();
        let register = SpeicherRegister::neu();
        register.beitreten(id(1), "A", Vec3::splat(5.0)).unwrap();
        register.beitreten(id(2), "B", Vec3::splat(5.0)).unwrap();
        register.ungueltig_markieren(&id(2));

        let mut tracker = ZonenTracker::neu();
        tracker.roster_neu_aufbauen(&register, &set);

        assert_eq!(tracker.roster().len(), 2);
        assert_eq!(tracker.zone_von(&id(2)), None);
        assert_eq!(tracker.zuordnungen(), 1);
    }

    #[test]
    fn abgleich_erkennt_wechsel() {
        let set = regionen();
        let register = SpeicherRegister::neu();
        register.beitreten(id(1), "A", Vec3::splat(5.0)).unwrap();

        let mut tracker = ZonenTracker::neu();
        tracker.roster_neu_aufbauen(&register, &set);

        register.position_setzen(&id(1), Vec3::new(25.0, 5.0, 5.0)).unwrap();
        assert!(tracker.abgleichen(&register, &set));
        assert_eq!(tracker.zone_von(&id(1)), Some(Zone::Bereich(1)));
    }

    #[test]
    fn abgleich_ist_idempotent() {
        let set = regionen();
        let register = SpeicherRegister::neu();
        register.beitreten(id(1), "A", Vec3::splat(5.0)).unwrap();

        let mut tracker = ZonenTracker::neu();
        tracker.roster_neu_aufbauen(&register, &set);

        register.position_setzen(&id(1), Vec3::splat(-1.0)).unwrap();
        assert!(tracker.abgleichen(&register, &set));
        assert!(!tracker.abgleichen(&register, &set));
    }

    #[test]
    fn bewegung_innerhalb_der_zone_ist_keine_aenderung() {
        let set = regionen();
        let register = SpeicherRegister::neu();
        register.beitreten(id(1), "A", Vec3::splat(1.0)).unwrap();

        let mut tracker = ZonenTracker::neu();
        tracker.roster_neu_aufbauen(&register, &set);

        register.position_setzen(&id(1), Vec3::splat(9.0)).unwrap();
        assert!(!tracker.abgleichen(&register, &set));
    }

    #[test]
    fn abgleich_ueberspringt_ungueltige_und_behaelt_alten_wert() {
        let set = regionen();
        let register = SpeicherRegister::neu();
        register.beitreten(id(1), "A", Vec3::splat(5.0)).unwrap();

        let mut tracker = ZonenTracker::neu();
        tracker.roster_neu_aufbauen(&register, &set);

        register.verlassen(&id(1)).unwrap();
        assert!(!tracker.abgleichen(&register, &set));
        assert_eq!(tracker.zone_von(&id(1)), Some(Zone::Bereich(0)));
    }

    #[test]
    fn regionsname_fuer_logs() {
        let set = RegionSet::neu(vec![
            RegionSlot::benannt(
                "Buehne",
                Volumen::Quader {
                    min: Vec3::ZERO,
                    max: Vec3::ONE,
                },
            ),
            RegionSlot::aktiv(Volumen::Kugel {
                zentrum: Vec3::splat(5.0),
                radius: 1.0,
            }),
        ])
        .unwrap();
        assert_eq!(regionsname(&set, Zone::Bereich(0)), "Buehne");
        assert_eq!(regionsname(&set, Zone::Bereich(1)), "-");
        assert_eq!(regionsname(&set, Zone::Keine), "-");
    }
}
