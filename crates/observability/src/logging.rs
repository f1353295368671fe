//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable:
//! - `VZ_LOG_LEVEL`: Log-Level oder Filter-Ausdruck, Standard: info
//! - `VZ_LOG_FORMAT`: Format (text/json), Standard: text
//!
//! Auf `debug` erscheint jede einzelne Parameter-Anwendung,
//! auf `info` nur Zonenwechsel und Neuberechnungen.

use tracing_subscriber::{EnvFilter, fmt};

/// Umgebungsvariable fuer den Log-Level
pub const ENV_LOG_LEVEL: &str = "VZ_LOG_LEVEL";

/// Umgebungsvariable fuer das Log-Format
pub const ENV_LOG_FORMAT: &str = "VZ_LOG_FORMAT";

const STUFEN: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Initialisiert das Logging-System.
///
/// Umgebungsvariablen haben Vorrang vor den uebergebenen Werten.
/// Ungueltige Werte fallen auf `info` / `text` zurueck.
/// Ein bereits installierter Subscriber bleibt bestehen.
pub fn logging_initialisieren(level: &str, format: &str) {
    let level = log_level_aus_env(level);
    let format = log_format_aus_env(format);

    let filter = if log_level_gueltig(&level) {
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("info")
    };

    let ergebnis = match format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_current_span(true)
            .try_init(),
        _ => fmt().with_env_filter(filter).with_target(true).try_init(),
    };

    if ergebnis.is_err() {
        tracing::debug!("Logging bereits initialisiert");
        return;
    }

    if !log_level_gueltig(&level) {
        tracing::warn!(level = %level, "Ungueltiger Log-Level, verwende info");
    }
    if !log_format_gueltig(&format) {
        tracing::warn!(format = %format, "Ungueltiges Log-Format, verwende text");
    }
}

/// Log-Level aus der Umgebung, sonst der uebergebene Wert
pub fn log_level_aus_env(standard: &str) -> String {
    wert_aus_env(ENV_LOG_LEVEL, standard)
}

/// Log-Format aus der Umgebung, sonst der uebergebene Wert
pub fn log_format_aus_env(standard: &str) -> String {
    wert_aus_env(ENV_LOG_FORMAT, standard)
}

fn wert_aus_env(variable: &str, standard: &str) -> String {
    std::env::var(variable).unwrap_or_else(|_| standard.to_string())
}

/// Validiert einen Log-Level oder Filter-Ausdruck.
///
/// Erlaubt sind eine Stufe (`debug`) oder kommagetrennte Direktiven
/// (`voicezone_zones=debug,info`).
pub fn log_level_gueltig(level: &str) -> bool {
    !level.is_empty()
        && level.split(',').all(|direktive| {
            let stufe = direktive.rsplit_once('=').map_or(direktive, |(_, s)| s);
            STUFEN.contains(&stufe)
        })
}

/// Validiert ob ein Log-Format-String gueltig ist.
pub fn log_format_gueltig(format: &str) -> bool {
    matches!(format, "text" | "json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_gueltige_werte() {
        for level in STUFEN {
            assert!(log_level_gueltig(level));
        }
        assert!(log_level_gueltig("voicezone_zones=debug"));
        assert!(log_level_gueltig("voicezone_zones=trace,info"));
    }

    #[test]
    fn log_level_ungueltige_werte() {
        assert!(!log_level_gueltig("verbose"));
        assert!(!log_level_gueltig("INFO")); // Gross-/Kleinschreibung
        assert!(!log_level_gueltig(""));
        assert!(!log_level_gueltig("voicezone_zones=laut"));
        assert!(!log_level_gueltig("debug,"));
    }

    #[test]
    fn log_format_werte() {
        assert!(log_format_gueltig("text"));
        assert!(log_format_gueltig("json"));
        assert!(!log_format_gueltig("xml"));
        assert!(!log_format_gueltig("JSON"));
    }

    // Eigene Variable, die kein anderer Test liest
    #[test]
    fn wert_aus_env_mit_standard() {
        assert_eq!(wert_aus_env("VZ_TEST_NIE_GESETZT", "text"), "text");
        assert_eq!(wert_aus_env("VZ_TEST_NIE_GESETZT", "json"), "json");
    }

    #[test]
    fn initialisieren_mehrfach_ist_harmlos() {
        logging_initialisieren("warn", "text");
        logging_initialisieren("unsinn", "xml");
    }
}
