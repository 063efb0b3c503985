use serde::{Deserialize, Serialize};

/// Temperature unit in the upstream provider's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    /// Map a caller-supplied unit token onto the upstream vocabulary.
    ///
    /// `C`/`metric` and `F`/`imperial` are recognised case-insensitively.
    /// Anything else resolves to celsius: an unknown unit never blocks a
    /// forecast request.
    pub fn resolve(token: &str) -> Self {
        let lower = token.trim().to_lowercase();

        match lower.as_str() {
            "c" | "metric" => TemperatureUnit::Celsius,
            "f" | "imperial" => TemperatureUnit::Fahrenheit,
            _ => {
                tracing::debug!(token, "unrecognised unit token, falling back to celsius");
                TemperatureUnit::Celsius
            }
        }
    }

    /// Same as [`TemperatureUnit::resolve`], treating an absent token as the default.
    pub fn resolve_opt(token: Option<&str>) -> Self {
        token.map(Self::resolve).unwrap_or_default()
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
