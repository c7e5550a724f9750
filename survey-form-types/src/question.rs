use serde::{Deserialize, Serialize};

use crate::{AnswerValue, FormError, QuestionId};

/// Largest number of stepped values a slider reports as choices.
const MAX_SLIDER_CHOICES: usize = 1000;
/// Most decimal places a slider value is rounded to.
const MAX_SLIDER_DECIMALS: i32 = 9;

/// Which way a left/right key moves through a question's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A single question in a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuestionSpec", into = "QuestionSpec")]
pub struct Question {
    /// Key of this question's answer in `Answers`.
    id: QuestionId,

    /// The question text shown in the row.
    text: String,

    /// The input variant and its parameters.
    kind: QuestionKind,
}

impl Question {
    /// Create a new question.
    pub fn new(id: u64, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: QuestionId::new(id),
            text: text.into(),
            kind,
        }
    }

    /// Create a radio question.
    pub fn radio<I, S>(id: u64, text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(id, text, QuestionKind::Radio(ChoiceQuestion::new(options)))
    }

    /// Create a toggle question.
    pub fn toggle<I, S>(id: u64, text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(id, text, QuestionKind::Toggle(ChoiceQuestion::new(options)))
    }

    /// Create a slider question.
    pub fn slider(id: u64, text: impl Into<String>, min: f64, max: f64, step: f64) -> Self {
        Self::new(id, text, QuestionKind::Slider(SliderQuestion::new(min, max, step)))
    }

    /// Get the question id.
    pub fn id(&self) -> QuestionId {
        self.id
    }

    /// Get the question text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the question kind.
    pub fn kind(&self) -> &QuestionKind {
        &self.kind
    }

    /// The option labels of a radio or toggle question.
    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            QuestionKind::Radio(choice) | QuestionKind::Toggle(choice) => Some(&choice.options),
            QuestionKind::Slider(_) => None,
        }
    }

    pub fn is_radio(&self) -> bool {
        matches!(self.kind, QuestionKind::Radio(_))
    }

    /// The answer a freshly loaded form holds for this question.
    ///
    /// Radio: the first option. Slider: the minimum. Toggle: unset.
    pub fn initial_answer(&self) -> Option<AnswerValue> {
        match &self.kind {
            QuestionKind::Radio(choice) => choice.first().map(AnswerValue::from),
            QuestionKind::Slider(slider) => Some(AnswerValue::Number(slider.min)),
            QuestionKind::Toggle(_) => None,
        }
    }

    /// The values this question can take, rendered as text.
    ///
    /// Option labels for radio/toggle; the stepped values from min to max for sliders.
    pub fn choices(&self) -> Vec<String> {
        match &self.kind {
            QuestionKind::Radio(choice) | QuestionKind::Toggle(choice) => choice.options.clone(),
            QuestionKind::Slider(slider) => slider
                .values()
                .map(|v| AnswerValue::Number(v).to_string())
                .collect(),
        }
    }

    /// Check the question's parameters.
    pub fn validate(&self) -> Result<(), FormError> {
        match &self.kind {
            QuestionKind::Radio(choice) | QuestionKind::Toggle(choice) => {
                if choice.options.is_empty() {
                    return Err(FormError::invalid(format!(
                        "question {} has no options",
                        self.id
                    )));
                }
            }
            QuestionKind::Slider(slider) => {
                if !(slider.min.is_finite() && slider.max.is_finite()) || slider.min > slider.max {
                    return Err(FormError::invalid(format!(
                        "question {} has an empty range {}..{}",
                        self.id, slider.min, slider.max
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The input variant of a question.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionKind {
    /// Pick exactly one option from a row of radio buttons.
    Radio(ChoiceQuestion),

    /// Pick a numeric value between bounds.
    Slider(SliderQuestion),

    /// Pick one option from a segmented toggle. May stay unset.
    Toggle(ChoiceQuestion),
}

/// Configuration for a radio or toggle question.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceQuestion {
    /// The option labels, in display order.
    pub options: Vec<String>,
}

impl ChoiceQuestion {
    /// Create a new choice question with the given options.
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// The first option, if any.
    pub fn first(&self) -> Option<&str> {
        self.options.first().map(String::as_str)
    }

    /// Position of a label in the option list.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.options.iter().position(|o| o == label)
    }

    /// The option one step away from `current`, wrapping around at both ends.
    ///
    /// With no current option (or one not in the list) moving forward lands on
    /// the first option and moving backward on the last.
    pub fn cycle(&self, current: Option<&str>, direction: Direction) -> Option<&str> {
        let len = self.options.len();
        if len == 0 {
            return None;
        }
        let next = match (current.and_then(|c| self.position(c)), direction) {
            (Some(idx), Direction::Forward) => (idx + 1) % len,
            (Some(idx), Direction::Backward) => (idx + len - 1) % len,
            (None, Direction::Forward) => 0,
            (None, Direction::Backward) => len - 1,
        };
        self.options.get(next).map(String::as_str)
    }
}

/// Configuration for a slider question.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderQuestion {
    pub min: f64,
    pub max: f64,
    /// Always positive.
    pub step: f64,
}

impl SliderQuestion {
    /// Create a slider; a non-positive or non-finite step becomes 1.
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            1.0
        };
        Self { min, max, step }
    }

    /// Move `current` one step, clamped to `[min, max]`.
    pub fn step_from(&self, current: f64, direction: Direction) -> f64 {
        match direction {
            Direction::Forward => self.snap(current + self.step).min(self.max),
            Direction::Backward => self.snap(current - self.step).max(self.min),
        }
    }

    /// The stepped values from min up to max.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        let span = (self.max - self.min).max(0.0);
        let count = ((span / self.step + 1e-9).floor() as usize)
            .saturating_add(1)
            .min(MAX_SLIDER_CHOICES);
        let decimals = self.decimals();
        (0..count).map(move |i| round_to(self.min + self.step * i as f64, decimals))
    }

    /// The nearest `min + k * step`, without float drift.
    fn snap(&self, value: f64) -> f64 {
        let k = ((value - self.min) / self.step).round();
        round_to(self.min + k * self.step, self.decimals())
    }

    /// Decimal places needed to write both `min` and `step` exactly.
    fn decimals(&self) -> i32 {
        decimal_places(self.min).max(decimal_places(self.step))
    }
}

fn decimal_places(x: f64) -> i32 {
    (0..MAX_SLIDER_DECIMALS)
        .find(|&d| {
            let scaled = x * 10f64.powi(d);
            (scaled - scaled.round()).abs() < 1e-6
        })
        .unwrap_or(MAX_SLIDER_DECIMALS)
}

fn round_to(x: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (x * factor).round() / factor
}

/// Flat on-disk shape of a question, e.g. a TOML `[[questions]]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct QuestionSpec {
    id: QuestionId,
    text: String,
    #[serde(rename = "type", default)]
    kind: KindTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    step: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum KindTag {
    #[default]
    Radio,
    Slider,
    Toggle,
}

impl TryFrom<QuestionSpec> for Question {
    type Error = FormError;

    fn try_from(spec: QuestionSpec) -> Result<Self, Self::Error> {
        let kind = match spec.kind {
            KindTag::Radio | KindTag::Toggle => {
                let options = spec.options.ok_or_else(|| {
                    FormError::invalid(format!("question {} is missing `options`", spec.id))
                })?;
                let choice = ChoiceQuestion::new(options);
                if matches!(spec.kind, KindTag::Toggle) {
                    QuestionKind::Toggle(choice)
                } else {
                    QuestionKind::Radio(choice)
                }
            }
            KindTag::Slider => {
                let (Some(min), Some(max)) = (spec.min, spec.max) else {
                    return Err(FormError::invalid(format!(
                        "slider question {} needs `min` and `max`",
                        spec.id
                    )));
                };
                QuestionKind::Slider(SliderQuestion::new(min, max, spec.step.unwrap_or(1.0)))
            }
        };
        let question = Question::new(spec.id.get(), spec.text, kind);
        question.validate()?;
        Ok(question)
    }
}

impl From<Question> for QuestionSpec {
    fn from(question: Question) -> Self {
        let (kind, options, min, max, step) = match question.kind {
            QuestionKind::Radio(c) => (KindTag::Radio, Some(c.options), None, None, None),
            QuestionKind::Toggle(c) => (KindTag::Toggle, Some(c.options), None, None, None),
            QuestionKind::Slider(s) => {
                (KindTag::Slider, None, Some(s.min), Some(s.max), Some(s.step))
            }
        };
        Self {
            id: question.id,
            text: question.text,
            kind,
            options,
            min,
            max,
            step,
        }
    }
}
