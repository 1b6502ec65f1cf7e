//! Canned explanations of weather patterns.

const CLIMATE_CHANGE_EXPLANATION: &str = "Climate change is closely linked to extreme weather events.\n\n\
As global temperatures rise due to increased greenhouse gas emissions:\n\
- Heatwaves become more frequent and intense\n\
- Warmer air holds more moisture, increasing heavy rainfall and flooding\n\
- Changing ocean temperatures fuel stronger hurricanes\n\
- Shifting weather patterns cause droughts in some areas and floods in others\n\n\
These changes are backed by scientific studies and observed trends over recent decades.";

const GENERAL_EXPLANATION: &str = "Weather patterns are influenced by air pressure, temperature, humidity, wind, and solar radiation.\n\n\
For example:\n\
- Jet streams influence weather across continents\n\
- Mountains can create rain shadows (wet on one side, dry on the other)\n\
- Seasonal patterns cause monsoons and dry seasons in some regions\n\n\
Feel free to ask me more about a specific weather phenomenon!";

/// Pick the explanation matching a free-text question.
///
/// Questions mentioning both "climate change" and "extreme weather"
/// (case-insensitive) get the climate explanation; everything else gets the
/// general one.
pub fn explain_weather_pattern(question: &str) -> &'static str {
    let question = question.to_lowercase();
    if question.contains("climate change") && question.contains("extreme weather") {
        CLIMATE_CHANGE_EXPLANATION
    } else {
        GENERAL_EXPLANATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_climate_question_gets_climate_text() {
        let text = explain_weather_pattern("How does climate change cause extreme weather?");
        assert_eq!(text, CLIMATE_CHANGE_EXPLANATION);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let text = explain_weather_pattern("CLIMATE CHANGE and Extreme Weather");
        assert_eq!(text, CLIMATE_CHANGE_EXPLANATION);
    }

    #[test]
    fn test_both_phrases_are_required() {
        assert_eq!(
            explain_weather_pattern("Is climate change real?"),
            GENERAL_EXPLANATION
        );
        assert_eq!(
            explain_weather_pattern("What counts as extreme weather?"),
            GENERAL_EXPLANATION
        );
    }

    #[test]
    fn test_other_questions_get_general_text() {
        let text = explain_weather_pattern("What is a jet stream?");
        assert_eq!(text, GENERAL_EXPLANATION);
        assert!(text.contains("Jet streams"));
        assert!(text.contains("monsoons"));
    }

    #[test]
    fn test_empty_question_still_answers() {
        assert!(!explain_weather_pattern("").is_empty());
    }
}
