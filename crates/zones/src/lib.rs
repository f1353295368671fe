//! voicezone-zones – Zonenbasierte Stummschaltung fuer Voice-Kanaele
//!
//! Teilt die Teilnehmer eines virtuellen Raums anhand raeumlicher Regionen in
//! Zonen ein und setzt pro Teilnehmer die Stimmparameter (Gain, Reichweite,
//! Tiefpass) so, dass nur Teilnehmer derselben Zone einander hoeren.
//! Audio selbst wird nie angefasst – nur die Parameter des externen Kanals.
//!
//! ## Module
//! - [`region`] – Raeumliche Volumen und die geordnete Regionsmenge
//! - [`classifier`] – Position -> Zone (erste passende Region gewinnt)
//! - [`tracker`] – Zonen-Zuordnung pro Teilnehmer, Aenderungserkennung
//! - [`policy`] – Hoerbarkeits-Regel und Parameter-Profile
//! - [`applier`] – Schreibt Profile auf den externen Voice-Kanal
//! - [`scheduler`] – Periodischer Abgleich und Join/Leave-Reaktion
//! - [`config`] – Serde-Konfiguration der Zonen
//! - [`registry`] – Schnittstelle zum Teilnehmer-Register + In-Memory-Variante
//! - [`channel`] – Schnittstelle zum Voice-Kanal + In-Memory-Variante
//!
//! ## Annahme
//! Jede Instanz rechnet aus Sicht genau eines lokalen Beobachters. Globale
//! Korrektheit entsteht dadurch, dass jeder Client die Logik selbst ausfuehrt.

pub mod applier;
pub mod channel;
pub mod classifier;
pub mod config;
pub mod error;
pub mod policy;
pub mod region;
pub mod registry;
pub mod scheduler;
pub mod tracker;

pub use channel::{SpeicherKanal, VoiceKanal};
pub use classifier::Zone;
pub use config::{RegionKonfig, ZonenKonfig};
pub use error::{ZonenError, ZonenResult};
pub use policy::{HoerProfile, StimmParameter};
pub use region::{Region, RegionSet, RegionSlot, Volumen};
pub use registry::{SpeicherRegister, TeilnehmerRegister};
pub use scheduler::{SteuerungsZustand, ZonenSteuerung, ZyklusBericht};
pub use tracker::ZonenTracker;
