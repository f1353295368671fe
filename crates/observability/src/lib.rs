//! # voicezone-observability
//!
//! Structured Logging fuer VoiceZone via tracing-subscriber (Text oder JSON).
//! Die Zonen-Logik selbst loggt nur ueber `tracing`-Makros; dieses Crate
//! installiert den Subscriber im Host.

pub mod logging;

pub use logging::{log_format_gueltig, log_level_gueltig, logging_initialisieren};
