//! Hoerbarkeits-Regel und Parameter-Profile
//!
//! Zwei Teilnehmer hoeren einander genau dann, wenn sie in derselben Zone
//! sind und diese Zone nicht `Keine` ist. Ausserhalb aller Zonen ist man fuer
//! alle stumm.
//!
//! Es gibt nur zwei Profile: "hoerbar" und "stumm". Nah-Distanz und
//! Volumen-Radius sind in beiden immer 0 – gesteuert werden nur Gain,
//! Reichweite und Tiefpass, nie die Form des Abfalls.

use crate::classifier::Zone;
use crate::config::ZonenKonfig;
use crate::error::{ZonenError, ZonenResult};
use serde::{Deserialize, Serialize};

/// Hoert der Beobachter das Ziel?
pub fn kann_hoeren(beobachter: Zone, ziel: Zone) -> bool {
    beobachter == ziel && !beobachter.ist_keine()
}

/// Stimmparameter eines Ziel-Teilnehmers aus Sicht des lokalen Beobachters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StimmParameter {
    pub gain: f32,
    pub distanz_fern: f32,
    pub distanz_nah: f32,
    pub volumen_radius: f32,
    pub tiefpass: bool,
}

impl StimmParameter {
    fn profil(gain: f32, distanz_fern: f32, hoerbar: bool) -> Self {
        Self {
            gain,
            distanz_fern,
            distanz_nah: 0.0,
            volumen_radius: 0.0,
            tiefpass: !hoerbar,
        }
    }
}

/// Die beiden Parameter-Profile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoerProfile {
    hoerbar: StimmParameter,
    stumm: StimmParameter,
}

impl HoerProfile {
    /// Erstellt die Profile; alle Werte muessen endlich und >= 0 sein
    pub fn neu(
        innen_gain: f32,
        innen_distanz_fern: f32,
        aussen_gain: f32,
        aussen_distanz_fern: f32,
    ) -> ZonenResult<Self> {
        for (feld, wert) in [
            ("innen_gain", innen_gain),
            ("innen_distanz_fern", innen_distanz_fern),
            ("aussen_gain", aussen_gain),
            ("aussen_distanz_fern", aussen_distanz_fern),
        ] {
            if !wert.is_finite() || wert < 0.0 {
                return Err(ZonenError::UngueltigerProfilwert { feld, wert });
            }
        }
        Ok(Self {
            hoerbar: StimmParameter::profil(innen_gain, innen_distanz_fern, true),
            stumm: StimmParameter::profil(aussen_gain, aussen_distanz_fern, false),
        })
    }

    /// Profile aus der Zonen-Konfiguration
    pub fn aus_konfig(konfig: &ZonenKonfig) -> ZonenResult<Self> {
        Self::neu(
            konfig.innen_gain,
            konfig.innen_distanz_fern,
            konfig.aussen_gain,
            konfig.aussen_distanz_fern,
        )
    }

    /// Profile aus der Konfiguration; bei ungueltigen Werten mit Warnung die Standardprofile
    pub fn aus_konfig_oder_standard(konfig: &ZonenKonfig) -> Self {
        Self::aus_konfig(konfig).unwrap_or_else(|e| {
            tracing::warn!(fehler = %e, "Verwende Standard-Stimmprofile");
            Self::default()
        })
    }

    /// Waehlt das Profil fuer das Ergebnis der Hoerbarkeits-Regel
    pub fn profil(&self, kann_hoeren: bool) -> &StimmParameter {
        if kann_hoeren {
            &self.hoerbar
        } else {
            &self.stumm
        }
    }
}

impl Default for HoerProfile {
    fn default() -> Self {
        let k = ZonenKonfig::default();
        Self {
            hoerbar: StimmParameter::profil(k.innen_gain, k.innen_distanz_fern, true),
            stumm: StimmParameter::profil(k.aussen_gain, k.aussen_distanz_fern, false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONEN: [Zone; 4] = [Zone::Keine, Zone::Bereich(0), Zone::Bereich(1), Zone::Bereich(2)];

    #[test]
    fn gleiche_zone_hoert() {
        assert!(kann_hoeren(Zone::Bereich(0), Zone::Bereich(0)));
        assert!(!kann_hoeren(Zone::Bereich(0), Zone::Bereich(1)));
    }

    #[test]
    fn keine_zone_hoert_niemanden() {
        for z in ZONEN {
            assert!(!kann_hoeren(Zone::Keine, z));
            assert!(!kann_hoeren(z, Zone::Keine));
        }
    }

    #[test]
    fn regel_ist_symmetrisch() {
        for a in ZONEN {
            for b in ZONEN {
                assert_eq!(kann_hoeren(a, b), kann_hoeren(b, a));
                assert_eq!(kann_hoeren(a, b), a == b && a != Zone::Keine);
            }
        }
    }

    #[test]
    fn profile_erfuellen_invarianten() {
        let p = HoerProfile::neu(15.0, 25.0, 0.5, 2.0).unwrap();

        let hoerbar = p.profil(true);
        assert_eq!(hoerbar.gain, 15.0);
        assert_eq!(hoerbar.distanz_fern, 25.0);
        assert!(!hoerbar.tiefpass);

        let stumm = p.profil(false);
        assert_eq!(stumm.gain, 0.5);
        assert_eq!(stumm.distanz_fern, 2.0);
        assert!(stumm.tiefpass);

        for s in [hoerbar, stumm] {
            assert_eq!(s.distanz_nah, 0.0);
            assert_eq!(s.volumen_radius, 0.0);
        }
    }

    #[test]
    fn standard_profile() {
        let p = HoerProfile::default();
        assert_eq!(p.profil(true).gain, 15.0);
        assert_eq!(p.profil(true).distanz_fern, 25.0);
        assert_eq!(p.profil(false).gain, 0.0);
        assert_eq!(p.profil(false).distanz_fern, 0.0);
    }

    #[test]
    fn negative_werte_werden_abgelehnt() {
        let err = HoerProfile::neu(15.0, -1.0, 0.0, 0.0).unwrap_err();
        assert_eq!(
            err,
            ZonenError::UngueltigerProfilwert {
                feld: "innen_distanz_fern",
                wert: -1.0
            }
        );
        assert!(HoerProfile::neu(f32::NAN, 1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn ungueltige_konfig_faellt_auf_standard_zurueck() {
        let k = ZonenKonfig {
            aussen_gain: -3.0,
            ..Default::default()
        };
        assert_eq!(HoerProfile::aus_konfig_oder_standard(&k), HoerProfile::default());

        let k = ZonenKonfig {
            innen_gain: 8.0,
            ..Default::default()
        };
        assert_eq!(HoerProfile::aus_konfig_oder_standard(&k).profil(true).gain, 8.0);
    }
}
