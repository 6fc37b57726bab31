//! Mood-to-theme resolution.
//!
//! A [`ThemeProvider`] turns free text into a [`GardenTheme`]. Provider
//! failures never reach the garden: [`resolve_theme`] always yields a
//! complete theme, falling back to [`GardenTheme::fallback`].

use std::future::Future;

use crate::core::{Color, Error, Result};

use super::theme::GardenTheme;

/// Failure talking to a theme provider.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("theme provider API key is not set")]
    MissingApiKey,

    #[error("network error: {0}")]
    Network(String),

    #[error("theme request timed out")]
    Timeout,

    #[error("theme provider returned HTTP {0}")]
    Http(u16),

    #[error("malformed theme payload: {0}")]
    Malformed(String),

    #[error("theme payload failed validation: {0}")]
    Schema(String),
}

/// Source of mood themes.
pub trait ThemeProvider: Send + Sync {
    fn request_theme(&self, mood: &str) -> impl Future<Output = std::result::Result<GardenTheme, ThemeError>> + Send;
}

const THEME_FIELDS: [&str; 5] = ["primaryColor", "secondaryColor", "groundColor", "skyColor", "moodDescription"];

/// Parse and validate a provider's JSON theme payload.
///
/// Every field must be present. Colors must be `#rrggbb`; the description
/// must not be blank.
pub fn parse_theme_payload(text: &str) -> std::result::Result<GardenTheme, ThemeError> {
    let value: serde_json::Value =
        serde_json::from_str(text.trim()).map_err(|e| ThemeError::Malformed(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| ThemeError::Schema("payload is not an object".into()))?;

    let field = |name: &str| -> std::result::Result<&str, ThemeError> {
        object
            .get(name)
            .and_then(|v| v.as_str())
            .ok_or_else(|| ThemeError::Schema(format!("missing string field {name}")))
    };
    let color = |name: &str| -> std::result::Result<Color, ThemeError> {
        field(name)?
            .parse()
            .map_err(|e: Error| ThemeError::Schema(format!("{name}: {e}")))
    };

    let description = field(THEME_FIELDS[4])?.trim();
    if description.is_empty() {
        return Err(ThemeError::Schema("moodDescription is empty".into()));
    }

    Ok(GardenTheme {
        primary_color: color(THEME_FIELDS[0])?,
        secondary_color: color(THEME_FIELDS[1])?,
        ground_color: color(THEME_FIELDS[2])?,
        sky_color: color(THEME_FIELDS[3])?,
        mood_description: description.to_string(),
    })
}

/// Ask `provider` for a theme. Any failure yields the fallback theme.
pub async fn resolve_theme<P: ThemeProvider>(provider: &P, mood: &str) -> GardenTheme {
    match provider.request_theme(mood).await {
        Ok(theme) => {
            log::info!("Mood \"{}\" -> {}", mood, theme.mood_description);
            theme
        }
        Err(e) => {
            log::warn!("Theme provider failed ({}), using fallback theme", e);
            GardenTheme::fallback()
        }
    }
}

/// Guards mood submission: one request in flight at a time.
#[derive(Debug, Default)]
pub struct MoodWeaver {
    in_flight: bool,
    last_mood: Option<String>,
}

impl MoodWeaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `mood` for resolution and mark a request in flight. Blank
    /// moods and submissions while a request is pending are rejected.
    pub fn submit(&mut self, mood: &str) -> Result<String> {
        let mood = mood.trim();
        if mood.is_empty() {
            return Err(Error::EmptyMood);
        }
        if self.in_flight {
            return Err(Error::MoodInFlight);
        }
        self.in_flight = true;
        self.last_mood = Some(mood.to_string());
        Ok(mood.to_string())
    }

    /// Clear the in-flight flag once the request has completed.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn last_mood(&self) -> Option<&str> {
        self.last_mood.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(GardenTheme);

    impl ThemeProvider for FixedProvider {
        async fn request_theme(&self, _mood: &str) -> std::result::Result<GardenTheme, ThemeError> {
            Ok(self.0.clone())
        }
    }

    struct FailingProvider;

    impl ThemeProvider for FailingProvider {
        async fn request_theme(&self, _mood: &str) -> std::result::Result<GardenTheme, ThemeError> {
            Err(ThemeError::Network("connection refused".into()))
        }
    }

    struct PayloadProvider(&'static str);

    impl ThemeProvider for PayloadProvider {
        async fn request_theme(&self, _mood: &str) -> std::result::Result<GardenTheme, ThemeError> {
            parse_theme_payload(self.0)
        }
    }

    const GOOD: &str = r##"{
        "primaryColor": "#112233",
        "secondaryColor": "#445566",
        "groundColor": "#778899",
        "skyColor": "#aabbcc",
        "moodDescription": "Rain on warm stone."
    }"##;

    #[test]
    fn test_parse_valid_payload() {
        let theme = parse_theme_payload(GOOD).unwrap();
        assert_eq!(theme.primary_color, Color::rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.mood_description, "Rain on warm stone.");
    }

    #[test]
    fn test_parse_rejects_bad_payloads() {
        assert!(matches!(parse_theme_payload("not json"), Err(ThemeError::Malformed(_))));
        assert!(matches!(parse_theme_payload("[1,2]"), Err(ThemeError::Schema(_))));
        let missing = r##"{"primaryColor":"#112233"}"##;
        assert!(matches!(parse_theme_payload(missing), Err(ThemeError::Schema(_))));
        let bad_color = GOOD.replace("#445566", "teal");
        assert!(matches!(parse_theme_payload(&bad_color), Err(ThemeError::Schema(_))));
        let blank = GOOD.replace("Rain on warm stone.", "   ");
        assert!(matches!(parse_theme_payload(&blank), Err(ThemeError::Schema(_))));
    }

    #[tokio::test]
    async fn test_provider_failure_yields_fallback() {
        let theme = resolve_theme(&FailingProvider, "stormy").await;
        assert_eq!(theme, GardenTheme::fallback());
    }

    #[tokio::test]
    async fn test_malformed_payload_yields_fallback() {
        let theme = resolve_theme(&PayloadProvider("{\"primaryColor\": 3}"), "odd").await;
        assert_eq!(theme, GardenTheme::fallback());
    }

    #[tokio::test]
    async fn test_success_replaces_theme() {
        let wanted = parse_theme_payload(GOOD).unwrap();
        let theme = resolve_theme(&FixedProvider(wanted.clone()), "calm").await;
        assert_eq!(theme, wanted);
    }

    #[test]
    fn test_weaver_rejects_blank_and_concurrent() {
        let mut weaver = MoodWeaver::new();
        assert!(matches!(weaver.submit("   "), Err(Error::EmptyMood)));
        assert!(!weaver.is_in_flight());

        assert_eq!(weaver.submit("  sleepy sunday ").unwrap(), "sleepy sunday");
        assert!(weaver.is_in_flight());
        assert!(matches!(weaver.submit("another"), Err(Error::MoodInFlight)));
        assert_eq!(weaver.last_mood(), Some("sleepy sunday"));

        weaver.finish();
        assert!(weaver.submit("another").is_ok());
    }
}
