//! Szenario – zeitlich sortierte Schritte aus der Host-Konfiguration
//!
//! Beitritte, Bewegungen und Austritte werden zu einer Liste von Schritten
//! zusammengefuehrt und nach Zeit sortiert. Bei gleicher Zeit gilt:
//! Beitritt vor Bewegung vor Austritt.

use crate::config::HostConfig;
use glam::Vec3;
use std::time::Duration;

/// Was zu einem Zeitpunkt passiert
#[derive(Debug, Clone, PartialEq)]
pub enum Aktion {
    Beitreten { name: String, position: Vec3 },
    Bewegen { name: String, position: Vec3 },
    Verlassen { name: String },
}

impl Aktion {
    fn rang(&self) -> u8 {
        match self {
            Self::Beitreten { .. } => 0,
            Self::Bewegen { .. } => 1,
            Self::Verlassen { .. } => 2,
        }
    }
}

/// Ein geplanter Schritt
#[derive(Debug, Clone, PartialEq)]
pub struct Schritt {
    pub zeit: Duration,
    pub aktion: Aktion,
}

/// Abspielbares Szenario
#[derive(Debug, Default)]
pub struct Szenario {
    schritte: Vec<Schritt>,
    naechster: usize,
}

impl Szenario {
    /// Erstellt das Szenario aus einer validierten Konfiguration
    pub fn aus_konfig(config: &HostConfig) -> Self {
        let mut schritte = Vec::new();

        for t in &config.teilnehmer {
            schritte.push(Schritt {
                zeit: sekunden(t.beitritt),
                aktion: Aktion::Beitreten {
                    name: t.name.clone(),
                    position: t.position,
                },
            });
            if let Some(verlassen) = t.verlassen {
                schritte.push(Schritt {
                    zeit: sekunden(verlassen),
                    aktion: Aktion::Verlassen {
                        name: t.name.clone(),
                    },
                });
            }
        }

        for b in &config.bewegungen {
            schritte.push(Schritt {
                zeit: sekunden(b.zeit),
                aktion: Aktion::Bewegen {
                    name: b.teilnehmer.clone(),
                    position: b.position,
                },
            });
        }

        // Stabil: gleiche Zeit und gleicher Rang behalten die Konfig-Reihenfolge
        schritte.sort_by_key(|s| (s.zeit, s.aktion.rang()));

        Self {
            schritte,
            naechster: 0,
        }
    }

    /// Entnimmt alle Schritte mit `zeit <= jetzt`
    pub fn faellige(&mut self, jetzt: Duration) -> Vec<Schritt> {
        let start = self.naechster;
        while self
            .schritte
            .get(self.naechster)
            .is_some_and(|s| s.zeit <= jetzt)
        {
            self.naechster += 1;
        }
        self.schritte[start..self.naechster].to_vec()
    }

    /// Anzahl noch ausstehender Schritte
    pub fn ausstehend(&self) -> usize {
        self.schritte.len() - self.naechster
    }
}

/// Sekunden -> Duration; ungueltige Werte wurden bei der Validierung abgelehnt
fn sekunden(wert: f64) -> Duration {
    Duration::try_from_secs_f64(wert).unwrap_or(Duration::ZERO)
}
