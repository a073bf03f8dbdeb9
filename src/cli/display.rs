//! Display utilities for the drowsii CLI.
//!
//! This module provides formatted output for:
//! - The sound catalog
//! - Session summaries and countdown progress
//! - Quiz questions, status and recommendations
//! - Notices and error messages

use crate::catalog::SoundCategory;
use crate::quiz::SleepQuestion;
use crate::recommendation::RecommendationResponse;
use crate::session::{SessionNotice, SessionSummary};
use crate::types::format_duration;

// ============================================================================
// Display
// ============================================================================

/// Display utilities for CLI output.
pub struct Display;

impl Display {
    /// Formats the sounds of each category.
    pub fn format_catalog(categories: &[SoundCategory]) -> String {
        let mut out = String::new();
        for (i, category) in categories.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("{} [{}]\n", category.label(), category.icon()));
            for sound in category.sounds() {
                out.push_str(&format!(
                    "  {:<16} {}\n",
                    sound.display_name(),
                    sound.icon()
                ));
            }
        }
        out
    }

    /// Shows the catalog.
    pub fn show_catalog(categories: &[SoundCategory]) {
        print!("{}", Self::format_catalog(categories));
    }

    /// Formats a session summary.
    pub fn format_summary(summary: &SessionSummary) -> String {
        let mut out = String::new();
        out.push_str(&format!("Session: {}\n", summary.category.label()));
        out.push_str("─────────────────────────────\n");
        for row in &summary.tracks {
            out.push_str(&format!(
                "  {:<16} volume {:>3}%\n",
                row.name,
                (row.volume * 100.0).round() as u32
            ));
        }
        out.push_str(&format!("Duration: {}\n", summary.duration_label));
        if let Some(alarm) = &summary.alarm {
            out.push_str(&format!("Alarm: {}\n", alarm));
        }
        out
    }

    /// Shows a session summary.
    pub fn show_summary(summary: &SessionSummary) {
        print!("{}", Self::format_summary(summary));
    }

    /// Shows the remaining time on a single, rewritten line.
    pub fn show_remaining(remaining_seconds: u32) {
        use std::io::Write;

        print!("\r> {} remaining ", format_duration(remaining_seconds));
        let _ = std::io::stdout().flush();
    }

    /// Shows that the session finished.
    pub fn show_finished() {
        println!("\n* Session complete. Sleep well.");
    }

    /// Shows that the session was stopped early.
    pub fn show_stopped(remaining_seconds: u32) {
        println!(
            "\n[] Session stopped with {} remaining",
            format_duration(remaining_seconds)
        );
    }

    /// Formats a notice.
    pub fn format_notice(notice: &SessionNotice) -> String {
        let prefix = if notice.is_error() { "Error" } else { "Warning" };
        format!("{}: {} ({})", prefix, notice.message(), notice.suggestion())
    }

    /// Shows a notice on stderr.
    pub fn show_notice(notice: &SessionNotice) {
        eprintln!("{}", Self::format_notice(notice));
    }

    /// Formats one quiz question with numbered options.
    pub fn format_question(number: usize, total: usize, question: &SleepQuestion) -> String {
        let mut out = format!("[{}/{}] {}\n", number, total, question.question);
        for (i, option) in question.options.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, option));
        }
        out
    }

    /// Shows one quiz question.
    pub fn show_question(number: usize, total: usize, question: &SleepQuestion) {
        print!("{}", Self::format_question(number, total, question));
    }

    /// Formats saved quiz answers as question/answer pairs.
    pub fn format_answers(pairs: &[(&str, &str)]) -> String {
        pairs
            .iter()
            .map(|(question, answer)| format!("  {}\n    -> {}\n", question, answer))
            .collect()
    }

    /// Shows the quiz status.
    pub fn show_quiz_status(pairs: &[(&str, &str)]) {
        if pairs.is_empty() {
            println!("The sleep quiz has not been completed.");
            println!("  Run `drowsii quiz take` to answer it.");
        } else {
            println!("Sleep quiz answers");
            println!("─────────────────────────────");
            print!("{}", Self::format_answers(pairs));
        }
    }

    /// Formats a recommendation.
    pub fn format_recommendation(response: &RecommendationResponse) -> String {
        let sound = &response.recommended_sound;
        let mut out = format!("Recommended: {}\n", sound.sound_category);
        if !sound.example_sounds.is_empty() {
            out.push_str(&format!("  Try: {}\n", sound.example_sounds.join(", ")));
        }
        out.push_str(&format!("  Why: {}\n", sound.reason));
        for tip in &response.additional_tips {
            out.push_str(&format!("  [{}] {}\n", tip.category, tip.tip));
        }
        out
    }

    /// Shows a recommendation.
    pub fn show_recommendation(response: &RecommendationResponse) {
        print!("{}", Self::format_recommendation(response));
    }

    /// Shows a success message.
    pub fn show_success(message: &str) {
        println!("* {}", message);
    }

    /// Shows an error message.
    pub fn show_error(message: &str) {
        eprintln!("Error: {}", message);
    }
}

// ============================================================================
// Tests
// ============================================================================
