//! Prompt/response record lines and their evaluation.
//!
//! A record line is `<prompt marker><config><response marker><formula><end
//! marker>`. The prompt is decoded, the response replayed on top of it and
//! the result judged solved or not. Every failure along the way downgrades
//! to [`Outcome::Invalid`] so one bad line never stops a scan.

use std::{fmt::Display, ops::AddAssign};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Error, codec::decode, formula::Formula};

/// The literal markers framing a record line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFormat {
    pub prompt_marker: String,
    pub response_marker: String,
    pub end_marker: String,
}

impl Default for RecordFormat {
    fn default() -> Self {
        RecordFormat {
            prompt_marker: "<|startoftext|>[WP]".to_owned(),
            response_marker: "[RESPONSE]".to_owned(),
            end_marker: "<|endoftext|>".to_owned(),
        }
    }
}

impl RecordFormat {
    /// Split a record line into its prompt and response.
    ///
    /// Markers are matched literally. The line must start with the prompt
    /// marker; the response marker and end marker are taken at their last
    /// occurrences, and anything after the end marker is ignored.
    ///
    /// # Errors
    ///
    /// `ParseFailure` if a marker is missing or out of order.
    pub fn parse_record<'a>(&self, line: &'a str) -> Result<(&'a str, &'a str), Error> {
        let failure = || Error::ParseFailure(line.to_owned());

        let rest = line
            .trim()
            .strip_prefix(self.prompt_marker.as_str())
            .ok_or_else(failure)?;
        let end = rest.rfind(self.end_marker.as_str()).ok_or_else(failure)?;
        let body = &rest[..end];
        let split = body
            .rfind(self.response_marker.as_str())
            .ok_or_else(failure)?;

        Ok((
            &body[..split],
            &body[split + self.response_marker.len()..],
        ))
    }

    /// Render a prompt and response as a record line.
    pub fn render(&self, prompt: &str, response: &str) -> String {
        format!(
            "{}{prompt}{}{response}{}",
            self.prompt_marker, self.response_marker, self.end_marker
        )
    }

    pub fn evaluate_line(&self, line: &str) -> Outcome {
        match self.parse_record(line) {
            Ok((prompt, response)) => classify(prompt, response),
            Err(e) => {
                debug!(target: "evaluate", "{e}");
                Outcome::Invalid
            }
        }
    }

    /// Classify every line and count the outcomes.
    pub fn evaluate_lines<'a>(&self, lines: impl IntoIterator<Item = &'a str>) -> Tally {
        lines
            .into_iter()
            .map(|line| self.evaluate_line(line))
            .collect()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The response solves the prompt's cube.
    Correct,
    /// The response is a valid formula that leaves the cube unsolved.
    Incorrect,
    /// The record, prompt or response could not be understood.
    Invalid,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Outcome::Correct => "Correct",
            Outcome::Incorrect => "Incorrect",
            Outcome::Invalid => "Invalid",
        })
    }
}

fn try_classify(prompt: &str, response: &str) -> Result<Outcome, Error> {
    let mut cube = decode(prompt)?;
    let response = response.parse::<Formula>()?;
    cube.apply(&response);

    Ok(if cube.is_solved() {
        Outcome::Correct
    } else {
        Outcome::Incorrect
    })
}

/// Decode `prompt`, replay `response` on it and judge the result.
pub fn classify(prompt: &str, response: &str) -> Outcome {
    try_classify(prompt, response).unwrap_or_else(|e| {
        debug!(target: "evaluate", "Invalid record: {e}");
        Outcome::Invalid
    })
}

/// Outcome counts over a batch of records.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub correct: usize,
    pub incorrect: usize,
    pub invalid: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.correct + self.incorrect + self.invalid
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::Correct => self.correct,
            Outcome::Incorrect => self.incorrect,
            Outcome::Invalid => self.invalid,
        }
    }

    /// Share of records with `outcome`, zero for an empty tally.
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self, outcome: Outcome) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(outcome) as f64 / total as f64,
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Correct => self.correct += 1,
            Outcome::Incorrect => self.incorrect += 1,
            Outcome::Invalid => self.invalid += 1,
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        self.correct += rhs.correct;
        self.incorrect += rhs.incorrect;
        self.invalid += rhs.invalid;
    }
}

impl FromIterator<Outcome> for Tally {
    fn from_iter<T: IntoIterator<Item = Outcome>>(iter: T) -> Self {
        let mut tally = Tally::default();
        for outcome in iter {
            tally.record(outcome);
        }
        tally
    }
}
