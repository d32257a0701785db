use serde::{Deserialize, Serialize};

/// The four situational tags a recommendation is requested for
///
/// Tags are free text. Values the scorer does not know simply earn no bonus.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Situation {
    pub mood: String,
    pub occasion: String,
    #[serde(alias = "time")]
    pub time_of_day: String,
    pub weather: String,
}

impl Situation {
    pub fn new(
        mood: impl Into<String>,
        occasion: impl Into<String>,
        time_of_day: impl Into<String>,
        weather: impl Into<String>,
    ) -> Self {
        Self {
            mood: mood.into(),
            occasion: occasion.into(),
            time_of_day: time_of_day.into(),
            weather: weather.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_alias() {
        let situation: Situation = serde_json::from_str(
            r#"{"mood":"calm","occasion":"date","time":"evening","weather":"warm"}"#,
        )
        .unwrap();
        assert_eq!(situation, Situation::new("calm", "date", "evening", "warm"));
    }
}
