//! The sleep-habits question bank.

/// A multiple-choice quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepQuestion {
    pub question: &'static str,
    pub options: &'static [&'static str],
}

const fn q(question: &'static str, options: &'static [&'static str]) -> SleepQuestion {
    SleepQuestion { question, options }
}

const FREQUENCY: &[&str] = &["Never", "Sometimes", "Often", "Always"];
const OCCURRENCE: &[&str] = &["Never", "Rarely", "Sometimes", "Often"];
const REGULARITY: &[&str] = &["Always", "Usually", "Sometimes", "Rarely"];

/// The questions asked, in order.
pub const QUESTIONS: [SleepQuestion; 20] = [
    q(
        "How many hours of sleep do you typically get per night?",
        &["Less than 6 hours", "6-7 hours", "7-8 hours", "More than 8 hours"],
    ),
    q(
        "How long does it usually take you to fall asleep?",
        &["Less than 15 minutes", "15-30 minutes", "30-60 minutes", "More than 60 minutes"],
    ),
    q(
        "How often do you wake up during the night?",
        &["Never", "Once", "2-3 times", "More than 3 times"],
    ),
    q("Do you feel refreshed when you wake up?", REGULARITY),
    q(
        "How would you rate your sleep quality?",
        &["Excellent", "Good", "Fair", "Poor"],
    ),
    q("Do you use electronic devices before bed?", FREQUENCY),
    q("Do you consume caffeine after 2 PM?", FREQUENCY),
    q(
        "Do you exercise regularly?",
        &["Daily", "3-4 times per week", "1-2 times per week", "Never"],
    ),
    q("Do you have a consistent sleep schedule?", REGULARITY),
    q(
        "How would you describe your stress levels?",
        &["Very low", "Low", "Moderate", "High"],
    ),
    q("Do you take naps during the day?", FREQUENCY),
    q("Do you use sleep aids or supplements?", FREQUENCY),
    q(
        "How would you describe your bedroom environment?",
        &["Very comfortable", "Comfortable", "Uncomfortable", "Very uncomfortable"],
    ),
    q("Do you experience sleep paralysis?", OCCURRENCE),
    q("Do you snore?", FREQUENCY),
    q("Do you experience nightmares?", OCCURRENCE),
    q(
        "How would you rate your daytime energy levels?",
        &["Very high", "High", "Moderate", "Low"],
    ),
    q("Do you work night shifts?", FREQUENCY),
    q("Do you have trouble staying awake while driving?", OCCURRENCE),
    q(
        "How would you rate your overall sleep satisfaction?",
        &["Very satisfied", "Satisfied", "Dissatisfied", "Very dissatisfied"],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_question_has_four_options() {
        for question in QUESTIONS {
            assert_eq!(question.options.len(), 4, "{}", question.question);
        }
    }

    #[test]
    fn test_questions_are_unique() {
        let mut texts: Vec<&str> = QUESTIONS.iter().map(|q| q.question).collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), QUESTIONS.len());
    }
}
