//! The form session controller.
//!
//! Holds the question list, answers, visited rows and the focus index, and
//! applies every key, click and network result to them.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use survey_form_types::{
    AnswerValue, Answers, Direction, EnhancePromptRequest, EnhancePromptResponse, FormDefinition,
    FormError, HealthReport, InferenceReport, Question, QuestionId, QuestionKind, WireQuestion,
};

use crate::{
    ClickTarget, Command, FormBackend, Input, InstructionField, NavKey, Outcome, Submission,
    TextEdit,
};

/// How long the submit control shows its acknowledgment.
pub const SUBMIT_FLASH: Duration = Duration::from_millis(200);

/// Everything a session is constructed from.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub definition: FormDefinition,
    pub system_instruction: String,
}

impl SessionConfig {
    pub fn new(definition: FormDefinition) -> Self {
        Self {
            definition,
            system_instruction: String::new(),
        }
    }

    /// Pre-fill the instruction field.
    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }
}

/// The focus target as a frontend sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Row(usize),
    Submit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A dismissible message; cleared by the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Sequence numbers for one probe kind. Responses older than the newest
/// applied one are dropped.
#[derive(Debug, Clone, Copy, Default)]
struct ProbeSequence {
    issued: u64,
    applied: Option<u64>,
}

impl ProbeSequence {
    fn next(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn accept(&mut self, seq: u64) -> bool {
        let fresh = seq <= self.issued && self.applied.is_none_or(|applied| seq >= applied);
        if fresh {
            self.applied = Some(seq);
        }
        fresh
    }
}

/// State of one form session.
#[derive(Debug)]
pub struct FormSession {
    definition: FormDefinition,
    answers: Answers,
    visited: HashSet<QuestionId>,
    /// `0..len` addresses a row, `len` the submit control.
    focus: usize,
    instruction: InstructionField,
    instruction_active: bool,
    /// Instruction sent with the last successful enhancement.
    previous_instruction: String,
    /// Instruction sent with the enhancement request in flight.
    pending_instruction: Option<String>,
    health: Option<HealthReport>,
    inference: Option<InferenceReport>,
    health_seq: ProbeSequence,
    inference_seq: ProbeSequence,
    notice: Option<Notice>,
    last_submission: Option<Submission>,
    flash_started: Option<Instant>,
}

impl FormSession {
    /// Create a session; radio and slider rows start with their default answers.
    pub fn new(config: SessionConfig) -> Result<Self, FormError> {
        config.definition.validate()?;

        let mut session = Self {
            definition: config.definition,
            answers: Answers::new(),
            visited: HashSet::new(),
            focus: 0,
            instruction: InstructionField::new(config.system_instruction),
            instruction_active: false,
            previous_instruction: String::new(),
            pending_instruction: None,
            health: None,
            inference: None,
            health_seq: ProbeSequence::default(),
            inference_seq: ProbeSequence::default(),
            notice: None,
            last_submission: None,
            flash_started: None,
        };
        session.initialize_answers();
        Ok(session)
    }

    fn initialize_answers(&mut self) {
        for question in &self.definition.questions {
            if let Some(initial) = question.initial_answer() {
                self.answers.insert(question.id(), initial);
            }
        }
    }

    /// Run this session on a backend until the user leaves it.
    pub fn run<B: FormBackend>(&mut self, backend: &B) -> Result<Option<&Submission>, FormError> {
        backend.run(self).map_err(FormError::backend)?;
        Ok(self.last_submission.as_ref())
    }

    // === Read access for frontends ===

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn questions(&self) -> &[Question] {
        &self.definition.questions
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn answer(&self, id: QuestionId) -> Option<&AnswerValue> {
        self.answers.get(id)
    }

    pub fn is_visited(&self, id: QuestionId) -> bool {
        self.visited.contains(&id)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Raw focus index; equals the question count when submit is focused.
    pub fn focus_index(&self) -> usize {
        self.focus
    }

    pub fn focus(&self) -> Focus {
        if self.focus < self.questions().len() {
            Focus::Row(self.focus)
        } else {
            Focus::Submit
        }
    }

    pub fn instruction(&self) -> &InstructionField {
        &self.instruction
    }

    pub fn instruction_active(&self) -> bool {
        self.instruction_active
    }

    pub fn enhancement_pending(&self) -> bool {
        self.pending_instruction.is_some()
    }

    pub fn health(&self) -> Option<&HealthReport> {
        self.health.as_ref()
    }

    pub fn inference_health(&self) -> Option<&InferenceReport> {
        self.inference.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn last_submission(&self) -> Option<&Submission> {
        self.last_submission.as_ref()
    }

    /// Whether the submit acknowledgment is still showing at `now`.
    pub fn submit_flash_active(&self, now: Instant) -> bool {
        self.flash_started
            .is_some_and(|started| now.saturating_duration_since(started) < SUBMIT_FLASH)
    }

    // === Input ===

    /// Handle one input event to completion, returning the commands it triggered.
    pub fn handle(&mut self, input: Input) -> Vec<Command> {
        if matches!(input, Input::Key(_) | Input::Edit(_)) {
            self.notice = None;
        }

        match input {
            Input::Key(key) if self.instruction_active => {
                let edit = match key {
                    NavKey::Left => Some(TextEdit::Left),
                    NavKey::Right => Some(TextEdit::Right),
                    NavKey::Enter => Some(TextEdit::Newline),
                    NavKey::Up | NavKey::Down => None,
                };
                if let Some(edit) = edit {
                    self.instruction.apply(edit);
                }
                Vec::new()
            }
            Input::Key(key) => {
                self.key(key);
                Vec::new()
            }
            Input::Edit(edit) => {
                if self.instruction_active {
                    self.instruction.apply(edit);
                }
                Vec::new()
            }
            Input::Click(target) => self.click(target),
            Input::FocusInstruction => {
                self.instruction_active = true;
                Vec::new()
            }
            Input::LeaveInstruction => {
                self.instruction_active = false;
                Vec::new()
            }
            Input::Enhance => self.request_enhancement().into_iter().collect(),
            Input::CheckHealth => self.request_health_checks(),
        }
    }

    /// Apply a navigation key to the focused row or the submit control.
    pub fn key(&mut self, key: NavKey) {
        let len = self.questions().len();

        if self.focus >= len {
            match key {
                NavKey::Up if len > 0 => self.move_focus(len - 1),
                NavKey::Enter => {
                    self.submit();
                }
                _ => {}
            }
            return;
        }

        match key {
            NavKey::Down => {
                if self.focus + 1 < len {
                    self.move_focus(self.focus + 1);
                } else {
                    self.focus = len;
                    tracing::debug!("focus moved to submit");
                }
            }
            NavKey::Up => {
                if self.focus > 0 {
                    self.move_focus(self.focus - 1);
                }
            }
            NavKey::Right => self.step_row(self.focus, Direction::Forward),
            NavKey::Left => self.step_row(self.focus, Direction::Backward),
            NavKey::Enter => {}
        }
    }

    /// Focus a row, giving an unvisited radio row its held answer or first option.
    fn move_focus(&mut self, row: usize) {
        self.focus = row;
        tracing::debug!(row, "focus moved");

        let Some(question) = self.definition.questions.get(row) else {
            return;
        };
        if !question.is_radio() || self.visited.contains(&question.id()) {
            return;
        }
        let id = question.id();
        let answer = self
            .answers
            .get(id)
            .cloned()
            .or_else(|| question.initial_answer());
        if let Some(answer) = answer {
            self.set_answer(id, answer);
        }
    }

    fn step_row(&mut self, row: usize, direction: Direction) {
        let Some(question) = self.definition.questions.get(row) else {
            return;
        };
        let id = question.id();

        let next = match question.kind() {
            QuestionKind::Slider(slider) => {
                let current = self
                    .answers
                    .get(id)
                    .and_then(AnswerValue::as_number)
                    .unwrap_or(slider.min);
                Some(AnswerValue::Number(slider.step_from(current, direction)))
            }
            QuestionKind::Radio(choice) | QuestionKind::Toggle(choice) => {
                let current = self.answers.get(id).and_then(AnswerValue::as_label);
                choice.cycle(current, direction).map(AnswerValue::from)
            }
        };

        if let Some(value) = next {
            self.set_answer(id, value);
        }
    }

    fn set_answer(&mut self, id: QuestionId, value: AnswerValue) {
        self.answers.insert(id, value);
        self.visited.insert(id);
    }

    /// Apply a pointer press. Focus is never taken from the click position.
    pub fn click(&mut self, target: ClickTarget) -> Vec<Command> {
        match target {
            ClickTarget::Instruction => {
                self.instruction_active = true;
                Vec::new()
            }
            ClickTarget::Option { row, option } => {
                self.instruction_active = false;
                let choice = self
                    .definition
                    .questions
                    .get(row)
                    .and_then(|q| Some((q.id(), q.options()?.get(option)?.clone())));
                if let Some((id, label)) = choice {
                    self.set_answer(id, AnswerValue::Label(label));
                }
                Vec::new()
            }
            ClickTarget::Enhance => {
                self.instruction_active = false;
                self.request_enhancement().into_iter().collect()
            }
            ClickTarget::Submit => {
                self.instruction_active = false;
                self.submit();
                Vec::new()
            }
            ClickTarget::Background => {
                self.instruction_active = false;
                Vec::new()
            }
        }
    }

    /// Package the instruction and the answer set, and start the acknowledgment.
    pub fn submit(&mut self) -> &Submission {
        let submission = Submission::new(self.instruction.text(), self.answers.clone());
        tracing::info!(
            answers = submission.answers.len(),
            instruction_len = submission.system_instruction.len(),
            "form submitted"
        );
        self.flash_started = Some(Instant::now());
        self.last_submission.insert(submission)
    }

    // === Enhancement ===

    /// Build the enhancement request, unless one is already in flight.
    pub fn request_enhancement(&mut self) -> Option<Command> {
        if self.pending_instruction.is_some() {
            tracing::debug!("enhancement already in flight; ignoring request");
            return None;
        }
        let sent = self.instruction.text().to_string();
        self.pending_instruction = Some(sent.clone());

        let questions = self
            .questions()
            .iter()
            .map(|q| WireQuestion::from_question(q, self.answers.get(q.id())))
            .collect();
        Some(Command::Enhance(EnhancePromptRequest {
            current_sys_prompt: sent,
            previous_sys_prompt: self.previous_instruction.clone(),
            questions,
        }))
    }

    /// Apply the enhancement service's answer. Failures leave the form untouched.
    pub fn apply_enhancement(&mut self, result: Result<EnhancePromptResponse, anyhow::Error>) {
        let sent = self.pending_instruction.take().unwrap_or_default();

        let applied = result.and_then(|response| {
            let questions = response.to_questions()?;
            Ok((questions, response.revised_instruction().map(str::to_string)))
        });

        match applied {
            Ok((questions, revised)) => {
                tracing::info!(questions = questions.len(), "prompt enhanced");
                self.previous_instruction = sent;
                if let Some(revised) = revised {
                    self.instruction.set_text(revised);
                }
                self.replace_questions(questions);
                self.notice = Some(Notice {
                    level: NoticeLevel::Info,
                    message: "Questions updated".to_string(),
                });
            }
            Err(err) => {
                tracing::error!(error = %err, "error enhancing prompt");
                self.notice = Some(Notice {
                    level: NoticeLevel::Error,
                    message: format!("Enhancement failed: {err}"),
                });
            }
        }
    }

    /// Swap in a new question list; answers and visited rows start empty.
    fn replace_questions(&mut self, questions: Vec<Question>) {
        self.definition.questions = questions;
        self.answers.clear();
        self.visited.clear();
        self.focus = 0;
    }

    // === Health probes ===

    /// Issue both probes, tagged with fresh sequence numbers.
    pub fn request_health_checks(&mut self) -> Vec<Command> {
        vec![
            Command::CheckHealth {
                seq: self.health_seq.next(),
            },
            Command::CheckInference {
                seq: self.inference_seq.next(),
            },
        ]
    }

    pub fn apply_health(&mut self, seq: u64, report: HealthReport) {
        if !self.health_seq.accept(seq) {
            tracing::debug!(seq, "discarding stale health check response");
            return;
        }
        tracing::info!(status = %report.status, "health check");
        self.health = Some(report);
    }

    pub fn apply_inference_health(&mut self, seq: u64, report: InferenceReport) {
        if !self.inference_seq.accept(seq) {
            tracing::debug!(seq, "discarding stale inference health response");
            return;
        }
        tracing::info!(status = %report.status, "inference health check");
        self.inference = Some(report);
    }

    /// Apply any command result.
    pub fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Enhanced(result) => self.apply_enhancement(result),
            Outcome::Health { seq, report } => self.apply_health(seq, report),
            Outcome::Inference { seq, report } => self.apply_inference_health(seq, report),
        }
    }
}
