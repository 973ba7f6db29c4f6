//! Language tables for spoken announcements.
//!
//! Display language codes (`en`, `hi`, `kn`, `ta`, `ml`) map to the speech
//! locales the host synthesizer understands. Hazard message templates exist
//! for English and Hindi; other languages fall back to English, and an
//! unrecognized hazard falls back to a generic alert line.

use gramvox_core::AlertKind;

/// Display language codes and their speech-synthesis locales.
pub const SPEECH_LOCALES: [(&str, &str); 5] = [
    ("en", "en-US"),
    ("hi", "hi-IN"),
    ("kn", "kn-IN"),
    ("ta", "ta-IN"),
    ("ml", "ml-IN"),
];

/// Locale used when a language code is not in [`SPEECH_LOCALES`].
pub const FALLBACK_LOCALE: &str = "en-US";

/// Resolve a display language code to its speech locale.
#[must_use]
pub fn speech_locale(language: &str) -> &'static str {
    SPEECH_LOCALES
        .iter()
        .find(|(code, _)| *code == language)
        .map_or(FALLBACK_LOCALE, |(_, locale)| *locale)
}

/// Urgency marker prefixed to emergency announcements.
///
/// Unknown language codes get the English marker.
#[must_use]
pub fn urgency_marker(language: &str) -> &'static str {
    match language {
        "hi" => "आपातकाल!",
        "kn" => "ತುರ್ತು!",
        "ta" => "அவசரம்!",
        "ml" => "അടിയന്തിരം!",
        _ => "Emergency Alert!",
    }
}

/// Spoken message for a hazard alert on a village, in the requested language.
#[must_use]
pub fn hazard_message(kind: AlertKind, village_name: &str, language: &str) -> String {
    hazard_template(language, kind)
        .or_else(|| hazard_template("en", kind))
        .map_or_else(
            || format!("Alert for {village_name}"),
            |template| template.replace("{village}", village_name),
        )
}

fn hazard_template(language: &str, kind: AlertKind) -> Option<&'static str> {
    match (language, kind) {
        ("en", AlertKind::Drought) => {
            Some("Drought alert for {village}. Immediate irrigation required.")
        }
        ("en", AlertKind::Flood) => {
            Some("Flood warning for {village}. Prepare evacuation if necessary.")
        }
        ("en", AlertKind::Pest) => {
            Some("Pest infestation detected in {village}. Contact agricultural officer.")
        }
        ("en", AlertKind::Disease) => {
            Some("Crop disease outbreak in {village}. Take immediate action.")
        }
        ("hi", AlertKind::Drought) => Some(
            "{village} में सूखे की चेतावनी। तत्काल सिंचाई की आवश्यकता है।",
        ),
        ("hi", AlertKind::Flood) => Some(
            "{village} में बाढ़ की चेतावनी। आवश्यक हो तो निकासी की तैयारी करें।",
        ),
        ("hi", AlertKind::Pest) => Some(
            "{village} में कीट प्रकोप का पता चला है। कृषि अधिकारी से संपर्क करें।",
        ),
        ("hi", AlertKind::Disease) => Some(
            "{village} में फसल रोग का प्रकोप। तुरंत कार्रवाई करें।",
        ),
        _ => None,
    }
}
