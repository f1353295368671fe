//! Zonen-Steuerung – Taktgeber der Zonen-Logik
//!
//! Zwei Ausloeser:
//! - **Periodisch**: `tick` akkumuliert die vergangene Zeit. Erreicht der
//!   Akkumulator das Intervall, wird er auf 0 gesetzt und ein Zyklus laeuft.
//!   Ueberlaeufe werden nicht nachgeholt.
//! - **Ereignis**: Join/Leave baut den Roster sofort neu auf und setzt die
//!   Hoerbarkeit fuer alle Teilnehmer neu, am Akkumulator vorbei.
//!
//! Ein Zyklus gleicht die Zonen ab und fuehrt den paarweisen Durchlauf nur
//! aus, wenn sich mindestens eine Zone geaendert hat.
//!
//! ## Fehlerverhalten
//! Fehlende oder leere Regionen werden beim Start protokolliert; die
//! Steuerung bleibt dann `Deaktiviert` und ignoriert alle Ticks und
//! Ereignisse. Die Standard-Stimmparameter der Plattform bleiben unangetastet
//! (fail-open). Ungueltige Intervalle oder Profilwerte deaktivieren nichts,
//! sie fallen mit Warnung auf die Standardwerte zurueck.
//!
//! Ausfuehrung ist single-threaded: ein Aufrufer treibt Ticks und Ereignisse.

use crate::applier::anwenden;
use crate::channel::VoiceKanal;
use crate::classifier::{teilnehmer_klassifizieren, Zone};
use crate::config::ZonenKonfig;
use crate::policy::{kann_hoeren, HoerProfile};
use crate::region::RegionSet;
use crate::registry::{bezeichnung, TeilnehmerRegister};
use crate::tracker::ZonenTracker;
use std::time::Duration;
use voicezone_core::{TeilnehmerEreignis, TeilnehmerId};

// ---------------------------------------------------------------------------
// Zustand und Bericht
// ---------------------------------------------------------------------------

/// Lebenszyklus der Steuerung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SteuerungsZustand {
    /// Regionen geladen, Ticks und Ereignisse werden verarbeitet
    Aktiv,
    /// Konfigurationsfehler beim Start – nichts wird je geschrieben
    Deaktiviert,
}

/// Ergebnis eines Ticks oder Ereignisses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZyklusBericht {
    /// Lief ein Abgleich oder Neuaufbau?
    pub ausgefuehrt: bool,
    /// Hat sich die Zonen-Zuordnung geaendert (bei Ereignissen immer true)?
    pub geaendert: bool,
    /// Anzahl der Parameter-Schreibvorgaenge
    pub schreibvorgaenge: usize,
}

/// Laufzeitdaten einer aktiven Steuerung
#[derive(Debug)]
struct Betrieb {
    regionen: RegionSet,
    profile: HoerProfile,
    intervall: Duration,
}

// ---------------------------------------------------------------------------
// ZonenSteuerung
// ---------------------------------------------------------------------------

/// Zonen-Steuerung aus Sicht eines lokalen Beobachters
pub struct ZonenSteuerung<R, K> {
    register: R,
    kanal: K,
    lokal: TeilnehmerId,
    tracker: ZonenTracker,
    betrieb: Option<Betrieb>,
    akkumulator: Duration,
}

impl<R, K> ZonenSteuerung<R, K>
where
    R: TeilnehmerRegister,
    K: VoiceKanal,
{
    /// Startet die Steuerung aus der Konfiguration
    ///
    /// Bei ungueltiger Konfiguration wird der Fehler protokolliert und eine
    /// deaktivierte Steuerung zurueckgegeben.
    pub fn starten(konfig: &ZonenKonfig, lokal: TeilnehmerId, register: R, kanal: K) -> Self {
        match RegionSet::aus_konfig(&konfig.regionen) {
            Ok(regionen) => {
                let profile = HoerProfile::aus_konfig_oder_standard(konfig);
                let intervall = konfig.intervall_oder_standard();
                Self::mit_regionen(regionen, profile, intervall, lokal, register, kanal)
            }
            Err(e) => {
                tracing::error!(
                    fehler = %e,
                    "Zonen-Konfiguration ungueltig – Zonen-Stummschaltung wird nicht aktiviert"
                );
                Self {
                    register,
                    kanal,
                    lokal,
                    tracker: ZonenTracker::neu(),
                    betrieb: None,
                    akkumulator: Duration::ZERO,
                }
            }
        }
    }

    /// Startet die Steuerung mit bereits validierten Regionen
    ///
    /// Baut den Roster auf und setzt die Hoerbarkeit einmal fuer alle.
    pub fn mit_regionen(
        regionen: RegionSet,
        profile: HoerProfile,
        intervall: Duration,
        lokal: TeilnehmerId,
        register: R,
        kanal: K,
    ) -> Self {
        tracing::info!(
            regionen = regionen.len(),
            aktiv = regionen.aktive_anzahl(),
            intervall_ms = intervall.as_millis() as u64,
            lokal = %lokal,
            "Zonen-Steuerung gestartet"
        );

        let mut steuerung = Self {
            register,
            kanal,
            lokal,
            tracker: ZonenTracker::neu(),
            betrieb: Some(Betrieb {
                regionen,
                profile,
                intervall,
            }),
            akkumulator: Duration::ZERO,
        };
        steuerung.neu_aufbauen_und_anwenden();
        steuerung
    }

    // -----------------------------------------------------------------------
    // Ausloeser
    // -----------------------------------------------------------------------

    /// Periodischer Takt; `vergangen` ist die Zeit seit dem letzten Aufruf
    pub fn tick(&mut self, vergangen: Duration) -> ZyklusBericht {
        let Some(intervall) = self.betrieb.as_ref().map(|b| b.intervall) else {
            return ZyklusBericht::default();
        };

        self.akkumulator += vergangen;
        if self.akkumulator < intervall {
            return ZyklusBericht::default();
        }
        self.akkumulator = Duration::ZERO;

        self.zyklus()
    }

    /// Verarbeitet eine Join/Leave-Benachrichtigung synchron
    pub fn ereignis_verarbeiten(&mut self, ereignis: TeilnehmerEreignis) -> ZyklusBericht {
        if self.betrieb.is_none() {
            return ZyklusBericht::default();
        }

        tracing::info!(
            teilnehmer = %ereignis.teilnehmer(),
            art = ereignis.art(),
            anzahl = self.register.anzahl(),
            "Roster-Aenderung"
        );

        let schreibvorgaenge = self.neu_aufbauen_und_anwenden();
        ZyklusBericht {
            ausgefuehrt: true,
            geaendert: true,
            schreibvorgaenge,
        }
    }

    pub fn teilnehmer_beigetreten(&mut self, teilnehmer: TeilnehmerId) -> ZyklusBericht {
        self.ereignis_verarbeiten(TeilnehmerEreignis::Beigetreten { teilnehmer })
    }

    pub fn teilnehmer_verlassen(&mut self, teilnehmer: TeilnehmerId) -> ZyklusBericht {
        self.ereignis_verarbeiten(TeilnehmerEreignis::Verlassen { teilnehmer })
    }

    // -----------------------------------------------------------------------
    // Interne Ablaeufe
    // -----------------------------------------------------------------------

    /// Abgleich und – nur bei Aenderung – paarweiser Durchlauf
    fn zyklus(&mut self) -> ZyklusBericht {
        let Some(betrieb) = self.betrieb.as_ref() else {
            return ZyklusBericht::default();
        };

        let geaendert = self.tracker.abgleichen(&self.register, &betrieb.regionen);
        let schreibvorgaenge = if geaendert {
            self.hoerbarkeit_aktualisieren()
        } else {
            tracing::trace!("Keine Zonen-Aenderung – paarweiser Durchlauf entfaellt");
            0
        };

        ZyklusBericht {
            ausgefuehrt: true,
            geaendert,
            schreibvorgaenge,
        }
    }

    fn neu_aufbauen_und_anwenden(&mut self) -> usize {
        let Some(betrieb) = self.betrieb.as_ref() else {
            return 0;
        };
        self.tracker.roster_neu_aufbauen(&self.register, &betrieb.regionen);
        self.hoerbarkeit_aktualisieren()
    }

    /// Setzt die Stimmparameter aller anderen Teilnehmer aus Sicht des lokalen Beobachters
    ///
    /// Die Zone des Beobachters wird frisch klassifiziert, die der Ziele
    /// kommt aus dem Tracker. Ist der Beobachter selbst ungueltig, entfaellt
    /// der Durchlauf.
    fn hoerbarkeit_aktualisieren(&self) -> usize {
        let Some(betrieb) = self.betrieb.as_ref() else {
            return 0;
        };

        if !self.register.ist_gueltig(&self.lokal) {
            tracing::debug!(
                lokal = %self.lokal,
                "Lokaler Teilnehmer ungueltig – Durchlauf uebersprungen"
            );
            return 0;
        }

        let lokale_zone = teilnehmer_klassifizieren(&self.register, &self.lokal, &betrieb.regionen);
        tracing::info!(zone = %lokale_zone, "Aktualisiere Stimmparameter");

        let mut schreibvorgaenge = 0;
        for ziel in self.tracker.roster() {
            if *ziel == self.lokal || !self.register.ist_gueltig(ziel) {
                continue;
            }

            let ziel_zone = self.tracker.zone_von(ziel).unwrap_or_default();
            let hoerbar = kann_hoeren(lokale_zone, ziel_zone);

            tracing::debug!(
                teilnehmer = %bezeichnung(&self.register, ziel),
                zone = %ziel_zone,
                hoerbar,
                "Hoerbarkeit bestimmt"
            );

            if anwenden(&self.register, &self.kanal, ziel, betrieb.profile.profil(hoerbar)) {
                schreibvorgaenge += 1;
            }
        }
        schreibvorgaenge
    }

    // -----------------------------------------------------------------------
    // Abfragen
    // -----------------------------------------------------------------------

    pub fn zustand(&self) -> SteuerungsZustand {
        if self.betrieb.is_some() {
            SteuerungsZustand::Aktiv
        } else {
            SteuerungsZustand::Deaktiviert
        }
    }

    pub fn ist_aktiv(&self) -> bool {
        self.zustand() == SteuerungsZustand::Aktiv
    }

    /// Gespeicherte Zone eines Teilnehmers
    pub fn zone_von(&self, id: &TeilnehmerId) -> Option<Zone> {
        self.tracker.zone_von(id)
    }

    pub fn tracker(&self) -> &ZonenTracker {
        &self.tracker
    }

    /// Konfiguriertes Intervall (None wenn deaktiviert)
    pub fn intervall(&self) -> Option<Duration> {
        self.betrieb.as_ref().map(|b| b.intervall)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::SpeicherKanal;
    use crate::config::RegionKonfig;
    use crate::region::Volumen;
    use crate::registry::SpeicherRegister;
    use glam::Vec3;

    fn id(n: u128) -> TeilnehmerId {
        TeilnehmerId::aus_zahl(n)
    }

    fn konfig() -> ZonenKonfig {
        ZonenKonfig {
            regionen: vec![
                RegionKonfig {
                    name: Some("R0".into()),
                    aktiv: true,
                    volumen: Volumen::Quader {
                        min: Vec3::ZERO,
                        max: Vec3::splat(10.0),
                    },
                },
                RegionKonfig {
                    name: Some("R1".into()),
                    aktiv: true,
                    volumen: Volumen::Quader {
                        min: Vec3::new(20.0, 0.0, 0.0),
                        max: Vec3::new(30.0, 10.0, 10.0),
                    },
                },
            ],
            ..Default::default()
        }
    }

    fn aufbau() -> (SpeicherRegister, SpeicherKanal) {
        let register = SpeicherRegister::neu();
        register.beitreten(id(1), "A", Vec3::splat(5.0)).unwrap();
        register.beitreten(id(2), "B", Vec3::splat(6.0)).unwrap();
        (register, SpeicherKanal::neu())
    }

    #[test]
    fn ohne_regionen_deaktiviert() {
        let (register, kanal) = aufbau();
        let mut s =
            ZonenSteuerung::starten(&ZonenKonfig::default(), id(1), register, kanal.clone());

        assert_eq!(s.zustand(), SteuerungsZustand::Deaktiviert);
        assert_eq!(s.intervall(), None);
        assert_eq!(s.tick(Duration::from_secs(10)), ZyklusBericht::default());
        assert_eq!(s.teilnehmer_beigetreten(id(3)), ZyklusBericht::default());
        assert_eq!(kanal.schreibvorgaenge(), 0, "Deaktiviert darf nie schreiben");
    }

    #[test]
    fn start_setzt_hoerbarkeit_einmal() {
        let (register, kanal) = aufbau();
        let s = ZonenSteuerung::starten(&konfig(), id(1), register, kanal.clone());

        assert!(s.ist_aktiv());
        assert_eq!(kanal.schreibvorgaenge(), 1, "Nur B wird geschrieben, nie der Beobachter");
        assert!(kanal.parameter_von(&id(1)).is_none());
        assert!(!kanal.parameter_von(&id(2)).unwrap().tiefpass);
    }

    #[test]
    fn tick_unter_intervall_tut_nichts() {
        let (register, kanal) = aufbau();
        let mut s = ZonenSteuerung::starten(&konfig(), id(1), register.clone(), kanal.clone());

        register.position_setzen(&id(2), Vec3::new(25.0, 5.0, 5.0)).unwrap();
        let bericht = s.tick(Duration::from_millis(400));
        assert!(!bericht.ausgefuehrt);
        assert_eq!(s.zone_von(&id(2)), Some(Zone::Bereich(0)));

        let bericht = s.tick(Duration::from_millis(600));
        assert!(bericht.ausgefuehrt);
        assert!(bericht.geaendert);
        assert_eq!(bericht.schreibvorgaenge, 1);
        assert_eq!(s.zone_von(&id(2)), Some(Zone::Bereich(1)));
        assert!(kanal.parameter_von(&id(2)).unwrap().tiefpass);
    }

    #[test]
    fn kein_nachholen_bei_ueberlauf() {
        let (register, kanal) = aufbau();
        let mut s = ZonenSteuerung::starten(&konfig(), id(1), register, kanal);

        assert!(s.tick(Duration::from_secs(5)).ausgefuehrt);
        // Akkumulator wurde auf 0 gesetzt, nicht auf 4s
        assert!(!s.tick(Duration::from_millis(500)).ausgefuehrt);
    }

    #[test]
    fn ohne_aenderung_kein_paarweiser_durchlauf() {
        let (register, kanal) = aufbau();
        let mut s = ZonenSteuerung::starten(&konfig(), id(1), register, kanal.clone());
        let vorher = kanal.schreibvorgaenge();

        let bericht = s.tick(Duration::from_secs(1));
        assert!(bericht.ausgefuehrt);
        assert!(!bericht.geaendert);
        assert_eq!(kanal.schreibvorgaenge(), vorher);
    }

    #[test]
    fn ereignis_umgeht_akkumulator() {
        let (register, kanal) = aufbau();
        let mut s = ZonenSteuerung::starten(&konfig(), id(1), register.clone(), kanal.clone());

        register.beitreten(id(3), "C", Vec3::splat(7.0)).unwrap();
        let bericht = s.teilnehmer_beigetreten(id(3));

        assert!(bericht.ausgefuehrt);
        assert_eq!(bericht.schreibvorgaenge, 2);
        assert_eq!(s.zone_von(&id(3)), Some(Zone::Bereich(0)));
        assert!(!kanal.parameter_von(&id(3)).unwrap().tiefpass);
    }

    #[test]
    fn ungueltiger_beobachter_ueberspringt_durchlauf() {
        let (register, kanal) = aufbau();
        let mut s = ZonenSteuerung::starten(&konfig(), id(1), register.clone(), kanal.clone());
        let vorher = kanal.schreibvorgaenge();

        register.ungueltig_markieren(&id(1));
        register.position_setzen(&id(2), Vec3::new(25.0, 5.0, 5.0)).unwrap();
        let bericht = s.tick(Duration::from_secs(1));

        assert!(bericht.geaendert);
        assert_eq!(bericht.schreibvorgaenge, 0);
        assert_eq!(kanal.schreibvorgaenge(), vorher);
    }

    #[test]
    fn intervall_null_gleicht_bei_jedem_tick_ab() {
        let (register, kanal) = aufbau();
        let k = ZonenKonfig {
            intervall_sekunden: 0.0,
            ..konfig()
        };
        let mut s = ZonenSteuerung::starten(&k, id(1), register.clone(), kanal.clone());
        assert!(s.ist_aktiv());
        assert_eq!(s.intervall(), Some(Duration::ZERO));

        register.position_setzen(&id(2), Vec3::new(25.0, 5.0, 5.0)).unwrap();
        let bericht = s.tick(Duration::from_millis(16));
        assert!(bericht.ausgefuehrt);
        assert!(bericht.geaendert);
        assert_eq!(bericht.schreibvorgaenge, 1);
        assert!(kanal.parameter_von(&id(2)).unwrap().tiefpass);

        // Jeder weitere Tick gleicht ab, auch ohne Aenderung
        let bericht = s.tick(Duration::from_millis(16));
        assert!(bericht.ausgefuehrt);
        assert!(!bericht.geaendert);
    }

    #[test]
    fn ungueltige_werte_deaktivieren_nicht() {
        let (register, kanal) = aufbau();
        let k = ZonenKonfig {
            intervall_sekunden: -1.0,
            innen_gain: f32::NAN,
            ..konfig()
        };
        let mut s = ZonenSteuerung::starten(&k, id(1), register, kanal.clone());

        assert!(s.ist_aktiv());
        assert_eq!(s.intervall(), Some(Duration::from_secs(1)));
        let p = kanal.parameter_von(&id(2)).unwrap();
        assert_eq!(p.gain, 15.0, "Standardprofil statt NaN");
        assert!(!s.tick(Duration::from_millis(500)).ausgefuehrt);
    }
}
