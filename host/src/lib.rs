//! voicezone-host – Bibliotheks-Root
//!
//! Simulations-Host fuer die Zonen-Logik. Er spielt ein Szenario aus der
//! Konfiguration gegen In-Memory-Register und -Kanal ab:
//! Beitritte und Austritte gehen als Ereignisse an die Steuerung,
//! Bewegungen werden nur ins Register geschrieben und beim naechsten
//! periodischen Abgleich erkannt.

pub mod config;
pub mod scenario;

use anyhow::Result;
use config::HostConfig;
use scenario::{Aktion, Szenario};
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior};
use voicezone_core::{TeilnehmerEreignis, TeilnehmerId};
use voicezone_zones::{SpeicherKanal, SpeicherRegister, StimmParameter, Zone, ZonenSteuerung};

/// Endzustand eines Teilnehmers nach der Simulation
#[derive(Debug, Clone, PartialEq)]
pub struct Endzustand {
    pub name: String,
    pub zone: Option<Zone>,
    pub parameter: Option<StimmParameter>,
}

/// Zusammenfassung eines Simulationslaufs
#[derive(Debug, Clone, Default)]
pub struct SimulationsErgebnis {
    /// War die Zonen-Logik aktiv (gueltige Zonen-Konfiguration)?
    pub zonen_aktiv: bool,
    pub ticks: u64,
    /// Periodische Abgleiche
    pub zyklen: u64,
    /// Abgleiche mit mindestens einem Zonenwechsel
    pub zyklen_mit_aenderung: u64,
    /// Verarbeitete Join/Leave-Ereignisse
    pub ereignisse: u64,
    /// Parameter-Schreibvorgaenge insgesamt (inkl. Start)
    pub schreibvorgaenge: usize,
    /// Pro Teilnehmer in Konfig-Reihenfolge
    pub endzustand: Vec<Endzustand>,
}

/// Haelt die Konfiguration eines Simulationslaufs
pub struct Simulation {
    pub config: HostConfig,
}

impl Simulation {
    pub fn neu(config: HostConfig) -> Self {
        Self { config }
    }

    /// Spielt das Szenario ab, bis die Dauer erreicht ist oder Ctrl-C kommt
    ///
    /// Ablauf:
    /// 1. Konfiguration validieren, Teilnehmer-IDs vergeben
    /// 2. Schritte bei t=0 ins Register schreiben
    /// 3. Zonen-Steuerung starten (baut Roster auf)
    /// 4. Pro Frame: faellige Schritte anwenden, dann `tick`
    pub async fn starten(self) -> Result<SimulationsErgebnis> {
        self.config.validieren()?;

        let register = SpeicherRegister::neu();
        let kanal = SpeicherKanal::neu();
        let ids: HashMap<String, TeilnehmerId> = self
            .config
            .teilnehmer
            .iter()
            .map(|t| (t.name.clone(), TeilnehmerId::new()))
            .collect();

        let lokal = self
            .config
            .lokaler_name()
            .and_then(|name| ids.get(name).copied())
            .ok_or_else(|| anyhow::anyhow!("Lokaler Teilnehmer nicht gefunden"))?;

        let mut szenario = Szenario::aus_konfig(&self.config);
        for schritt in szenario.faellige(Duration::ZERO) {
            register_aktualisieren(&register, &ids, &schritt.aktion);
        }

        let mut steuerung =
            ZonenSteuerung::starten(&self.config.zonen, lokal, register.clone(), kanal.clone());
        let mut ergebnis = SimulationsErgebnis {
            zonen_aktiv: steuerung.ist_aktiv(),
            ..Default::default()
        };

        let tick = Duration::from_millis(self.config.simulation.tick_ms);
        let dauer = Duration::try_from_secs_f64(self.config.simulation.dauer_sekunden)?;

        tracing::info!(
            teilnehmer = self.config.teilnehmer.len(),
            tick_ms = self.config.simulation.tick_ms,
            dauer_s = self.config.simulation.dauer_sekunden,
            zonen_aktiv = ergebnis.zonen_aktiv,
            "Simulation startet"
        );

        let mut intervall = tokio::time::interval(tick);
        intervall.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // Erster Tick kommt sofort
        intervall.tick().await;

        let abbruch = tokio::signal::ctrl_c();
        tokio::pin!(abbruch);

        let start = Instant::now();
        let mut letzter = start;

        loop {
            tokio::select! {
                _ = intervall.tick() => {}
                _ = &mut abbruch => {
                    tracing::info!("Abbruch-Signal empfangen, Simulation wird beendet");
                    break;
                }
            }

            let jetzt = Instant::now();
            let vergangen = jetzt - letzter;
            letzter = jetzt;
            let simulationszeit = jetzt - start;

            for schritt in szenario.faellige(simulationszeit) {
                if let Some(ereignis) = register_aktualisieren(&register, &ids, &schritt.aktion) {
                    steuerung.ereignis_verarbeiten(ereignis);
                    ergebnis.ereignisse += 1;
                }
            }

            let bericht = steuerung.tick(vergangen);
            ergebnis.ticks += 1;
            if bericht.ausgefuehrt {
                ergebnis.zyklen += 1;
            }
            if bericht.geaendert {
                ergebnis.zyklen_mit_aenderung += 1;
            }

            if simulationszeit >= dauer {
                break;
            }
        }

        ergebnis.schreibvorgaenge = kanal.schreibvorgaenge();
        ergebnis.endzustand = self
            .config
            .teilnehmer
            .iter()
            .map(|t| {
                let id = ids[&t.name];
                Endzustand {
                    name: t.name.clone(),
                    zone: steuerung.zone_von(&id),
                    parameter: kanal.parameter_von(&id),
                }
            })
            .collect();

        tracing::info!(
            ticks = ergebnis.ticks,
            zyklen = ergebnis.zyklen,
            aenderungen = ergebnis.zyklen_mit_aenderung,
            ereignisse = ergebnis.ereignisse,
            schreibvorgaenge = ergebnis.schreibvorgaenge,
            ausstehend = szenario.ausstehend(),
            "Simulation beendet"
        );

        Ok(ergebnis)
    }
}

/// Schreibt einen Schritt ins Register; gibt das zugehoerige Ereignis zurueck
///
/// Fehler werden nur protokolliert. Unbekannte Teilnehmer (z.B. Bewegung
/// nach dem Austritt) sind erwartbar und landen auf `debug`.
fn register_aktualisieren(
    register: &SpeicherRegister,
    ids: &HashMap<String, TeilnehmerId>,
    aktion: &Aktion,
) -> Option<TeilnehmerEreignis> {
    let name = match aktion {
        Aktion::Beitreten { name, .. }
        | Aktion::Bewegen { name, .. }
        | Aktion::Verlassen { name } => name,
    };
    let Some(&id) = ids.get(name) else {
        tracing::warn!(name = %name, "Unbekannter Teilnehmer im Szenario");
        return None;
    };

    let ergebnis = match aktion {
        Aktion::Beitreten { position, .. } => register
            .beitreten(id, name.clone(), *position)
            .map(|_| Some(TeilnehmerEreignis::Beigetreten { teilnehmer: id })),
        Aktion::Bewegen { position, .. } => register.position_setzen(&id, *position).map(|_| None),
        Aktion::Verlassen { .. } => register
            .verlassen(&id)
            .map(|_| Some(TeilnehmerEreignis::Verlassen { teilnehmer: id })),
    };

    match ergebnis {
        Ok(ereignis) => ereignis,
        Err(e) if e.ist_transient() => {
            tracing::debug!(name = %name, fehler = %e, "Szenario-Schritt uebersprungen");
            None
        }
        Err(e) => {
            tracing::warn!(name = %name, fehler = %e, "Szenario-Schritt uebersprungen");
            None
        }
    }
}
