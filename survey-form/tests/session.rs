//! Integration tests for the form session controller

use pretty_assertions::assert_eq;
use survey_form::{
    AnswerValue, ClickTarget, Command, EnhancePromptResponse, Focus, FormDefinition, FormSession,
    HealthReport, InferenceReport, InferenceStatus, Input, NavKey, NoticeLevel, Question,
    QuestionId, ScriptedBackend, ScriptedBackendError, ServiceStatus, SessionConfig, TextEdit,
    WireQuestion,
};

fn session_for(questions: Vec<Question>) -> FormSession {
    FormSession::new(SessionConfig::new(FormDefinition::new(questions))).unwrap()
}

fn builtin() -> FormSession {
    FormSession::new(SessionConfig::new(FormDefinition::builtin())).unwrap()
}

fn id(n: u64) -> QuestionId {
    QuestionId::new(n)
}

fn wire(question: &str, choices: &[&str]) -> WireQuestion {
    WireQuestion {
        question: question.to_string(),
        choices: choices.iter().map(|c| c.to_string()).collect(),
        answer: String::new(),
    }
}

#[test]
fn test_initial_answers() {
    let session = builtin();

    assert_eq!(session.answers().get_label(id(1)).unwrap(), "Red");
    assert_eq!(session.answers().get_label(id(2)).unwrap(), "Daily");
    assert_eq!(session.answers().get_number(id(3)).unwrap(), 1.0);
    assert!(session.answer(id(4)).is_none());
    assert_eq!(session.focus(), Focus::Row(0));
    assert_eq!(session.visited_count(), 0);
}

#[test]
fn test_two_right_presses_select_third_option() {
    let mut session = session_for(vec![Question::radio(
        1,
        "Color?",
        ["Red", "Blue", "Green", "Yellow"],
    )]);

    session.key(NavKey::Right);
    session.key(NavKey::Right);

    assert_eq!(session.answers().get_label(id(1)).unwrap(), "Green");
    assert!(session.is_visited(id(1)));
}

#[test]
fn test_full_cycle_returns_to_start() {
    let mut session = builtin();
    for _ in 0..4 {
        session.key(NavKey::Right);
    }
    assert_eq!(session.answers().get_label(id(1)).unwrap(), "Red");

    session.key(NavKey::Left);
    assert_eq!(session.answers().get_label(id(1)).unwrap(), "Yellow");
}

#[test]
fn test_slider_steps_and_clamps() {
    let mut session = session_for(vec![Question::slider(1, "Scale?", 1.0, 10.0, 1.0)]);

    for _ in 0..5 {
        session.key(NavKey::Right);
    }
    assert_eq!(session.answers().get_number(id(1)).unwrap(), 6.0);

    for _ in 0..20 {
        session.key(NavKey::Right);
    }
    assert_eq!(session.answers().get_number(id(1)).unwrap(), 10.0);

    for _ in 0..20 {
        session.key(NavKey::Left);
    }
    assert_eq!(session.answers().get_number(id(1)).unwrap(), 1.0);
}

#[test]
fn test_toggle_starts_unset_and_cycles() {
    let mut session = builtin();
    for _ in 0..3 {
        session.key(NavKey::Down);
    }
    assert_eq!(session.focus(), Focus::Row(3));
    assert!(session.answer(id(4)).is_none());

    session.key(NavKey::Right);
    assert_eq!(session.answers().get_label(id(4)).unwrap(), "Poor");
    for _ in 0..3 {
        session.key(NavKey::Right);
    }
    assert_eq!(session.answers().get_label(id(4)).unwrap(), "Poor");
}

#[test]
fn test_down_from_last_row_focuses_submit_and_up_returns() {
    let mut session = builtin();
    for _ in 0..4 {
        session.key(NavKey::Down);
    }
    assert_eq!(session.focus(), Focus::Submit);
    assert_eq!(session.focus_index(), 4);

    session.key(NavKey::Down);
    session.key(NavKey::Right);
    assert_eq!(session.focus(), Focus::Submit);

    session.key(NavKey::Up);
    assert_eq!(session.focus(), Focus::Row(3));
}

#[test]
fn test_up_on_first_row_is_noop() {
    let mut session = builtin();
    session.key(NavKey::Up);
    assert_eq!(session.focus(), Focus::Row(0));
    assert_eq!(session.visited_count(), 0);
}

#[test]
fn test_revisit_keeps_explicit_choice() {
    let mut session = builtin();
    session.key(NavKey::Down);
    session.key(NavKey::Right);
    assert_eq!(session.answers().get_label(id(2)).unwrap(), "Weekly");

    session.key(NavKey::Up);
    session.key(NavKey::Down);
    assert_eq!(session.answers().get_label(id(2)).unwrap(), "Weekly");
}

#[test]
fn test_arriving_on_radio_marks_it_visited() {
    let mut session = builtin();
    session.key(NavKey::Down);
    assert!(session.is_visited(id(2)));
    assert_eq!(session.answers().get_label(id(2)).unwrap(), "Daily");

    // Sliders get no default on arrival
    session.key(NavKey::Down);
    assert!(!session.is_visited(id(3)));
}

#[test]
fn test_enter_on_submit_packages_answers() {
    let mut session = builtin().tap_instruction("Be concise");
    session.key(NavKey::Right);
    for _ in 0..4 {
        session.key(NavKey::Down);
    }
    session.key(NavKey::Enter);

    let submission = session.last_submission().unwrap();
    assert_eq!(submission.system_instruction, "Be concise");
    assert_eq!(submission.answers.get_label(id(1)).unwrap(), "Blue");
    assert_eq!(submission.answers.len(), 3);

    let json = serde_json::to_value(submission).unwrap();
    assert_eq!(json["systemInstruction"], "Be concise");
    assert_eq!(json["answers"]["1"], "Blue");
    assert_eq!(json["answers"]["3"], 1.0);
}

#[test]
fn test_enter_on_row_does_not_submit() {
    let mut session = builtin();
    session.key(NavKey::Enter);
    assert!(session.last_submission().is_none());
}

#[test]
fn test_background_click_keeps_focus() {
    let mut session = builtin();
    session.key(NavKey::Down);
    session.handle(Input::Click(ClickTarget::Instruction));
    assert!(session.instruction_active());

    session.handle(Input::Click(ClickTarget::Background));
    assert!(!session.instruction_active());
    assert_eq!(session.focus(), Focus::Row(1));
}

#[test]
fn test_option_click_selects_without_moving_focus() {
    let mut session = builtin();
    session.handle(Input::Click(ClickTarget::Option { row: 3, option: 2 }));

    assert_eq!(session.answers().get_label(id(4)).unwrap(), "Excellent");
    assert!(session.is_visited(id(4)));
    assert_eq!(session.focus(), Focus::Row(0));

    // Out of range clicks are ignored
    session.handle(Input::Click(ClickTarget::Option { row: 2, option: 0 }));
    session.handle(Input::Click(ClickTarget::Option { row: 9, option: 0 }));
    assert_eq!(session.answers().get_number(id(3)).unwrap(), 1.0);
}

#[test]
fn test_keys_edit_instruction_while_active() {
    let mut session = builtin();
    session.handle(Input::FocusInstruction);
    for c in "hi".chars() {
        session.handle(Input::Edit(TextEdit::Insert(c)));
    }
    session.handle(Input::Key(NavKey::Left));
    session.handle(Input::Key(NavKey::Down));
    session.handle(Input::Edit(TextEdit::Insert('!')));

    assert_eq!(session.instruction().text(), "h!i");
    assert_eq!(session.focus(), Focus::Row(0));
    assert_eq!(session.answers().get_label(id(1)).unwrap(), "Red");

    session.handle(Input::LeaveInstruction);
    session.handle(Input::Edit(TextEdit::Insert('x')));
    assert_eq!(session.instruction().text(), "h!i");
}

#[test]
fn test_enhancement_request_describes_questions() {
    let mut session = builtin().tap_instruction("You are a helpful assistant");
    session.key(NavKey::Right);

    let command = session.request_enhancement().unwrap();
    let Command::Enhance(request) = command else {
        panic!("expected an enhance command");
    };

    assert_eq!(request.current_sys_prompt, "You are a helpful assistant");
    assert_eq!(request.previous_sys_prompt, "");
    assert_eq!(request.questions.len(), 4);
    assert_eq!(request.questions[0].answer, "Blue");
    assert_eq!(request.questions[2].answer, "1");
    assert_eq!(request.questions[2].choices.len(), 10);
    assert_eq!(request.questions[3].answer, "");
    assert_eq!(
        request.questions[3].choices,
        vec!["Poor", "Average", "Excellent"]
    );

    // A second request while the first is pending is ignored
    assert!(session.request_enhancement().is_none());
}

#[test]
fn test_successful_enhancement_resets_state() {
    let mut session = builtin().tap_instruction("v1");
    session.key(NavKey::Down);
    session.key(NavKey::Down);
    session.key(NavKey::Right);
    session.request_enhancement();

    session.apply_enhancement(Ok(EnhancePromptResponse {
        new_sys_prompt: Some("v2".to_string()),
        questions: vec![
            wire("Tone?", &["Formal", "Casual"]),
            wire("Length?", &["Short", "Long"]),
        ],
    }));

    assert_eq!(session.questions().len(), 2);
    assert!(session.answers().is_empty());
    assert_eq!(session.visited_count(), 0);
    assert_eq!(session.focus(), Focus::Row(0));
    assert_eq!(session.instruction().text(), "v2");
    assert!(!session.enhancement_pending());
    assert_eq!(session.notice().unwrap().level, NoticeLevel::Info);

    // The next request carries the previously sent instruction
    let Some(Command::Enhance(request)) = session.request_enhancement() else {
        panic!("expected an enhance command");
    };
    assert_eq!(request.previous_sys_prompt, "v1");
    assert_eq!(request.current_sys_prompt, "v2");
    assert_eq!(request.questions[0].answer, "");
}

#[test]
fn test_edits_during_enhancement_are_not_recorded_as_sent() {
    let mut session = builtin().tap_instruction("v1");
    session.request_enhancement();

    session.handle(Input::FocusInstruction);
    session.handle(Input::Edit(TextEdit::Insert('X')));
    session.handle(Input::LeaveInstruction);

    session.apply_enhancement(Ok(EnhancePromptResponse {
        new_sys_prompt: None,
        questions: vec![wire("Tone?", &["Formal", "Casual"])],
    }));
    assert_eq!(session.instruction().text(), "v1X");

    let Some(Command::Enhance(request)) = session.request_enhancement() else {
        panic!("expected an enhance command");
    };
    assert_eq!(request.previous_sys_prompt, "v1");
    assert_eq!(request.current_sys_prompt, "v1X");
}

#[test]
fn test_failed_enhancement_keeps_previous_instruction() {
    let mut session = builtin().tap_instruction("v1");
    session.request_enhancement();
    session.apply_enhancement(Ok(EnhancePromptResponse {
        new_sys_prompt: Some("v2".to_string()),
        questions: vec![wire("Tone?", &["Formal", "Casual"])],
    }));

    session.request_enhancement();
    session.apply_enhancement(Err(anyhow::anyhow!("timeout")));

    let Some(Command::Enhance(request)) = session.request_enhancement() else {
        panic!("expected an enhance command");
    };
    assert_eq!(request.previous_sys_prompt, "v1");
}

#[test]
fn test_rows_after_enhancement_fill_on_navigation() {
    let mut session = builtin();
    session.request_enhancement();
    session.apply_enhancement(Ok(EnhancePromptResponse {
        new_sys_prompt: None,
        questions: vec![wire("A?", &["a1", "a2"]), wire("B?", &["b1", "b2", "b3"])],
    }));

    session.key(NavKey::Down);
    assert_eq!(session.answers().get_label(id(2)).unwrap(), "b1");

    session.key(NavKey::Up);
    assert_eq!(session.answers().get_label(id(1)).unwrap(), "a1");
}

#[test]
fn test_failed_enhancement_preserves_state() {
    let mut session = builtin().tap_instruction("keep me");
    session.key(NavKey::Right);
    session.key(NavKey::Down);
    let before_answers = session.answers().clone();

    session.request_enhancement();
    session.apply_enhancement(Err(anyhow::anyhow!("HTTP 500")));

    assert_eq!(session.questions().len(), 4);
    assert_eq!(session.answers(), &before_answers);
    assert_eq!(session.focus(), Focus::Row(1));
    assert_eq!(session.instruction().text(), "keep me");
    let notice = session.notice().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("HTTP 500"));
}

#[test]
fn test_enhancement_with_unusable_questions_is_a_failure() {
    let mut session = builtin();
    session.request_enhancement();
    session.apply_enhancement(Ok(EnhancePromptResponse {
        new_sys_prompt: Some("ignored".to_string()),
        questions: vec![wire("Open question?", &[])],
    }));

    assert_eq!(session.questions().len(), 4);
    assert_eq!(session.instruction().text(), "");
    assert_eq!(session.notice().unwrap().level, NoticeLevel::Error);
}

#[test]
fn test_invalid_definition_is_rejected() {
    let result = FormSession::new(SessionConfig::new(FormDefinition::new(vec![
        Question::radio(1, "A?", ["x"]),
        Question::toggle(1, "B?", ["y"]),
    ])));
    assert!(result.is_err());
}

#[test]
fn test_scripted_run_with_enhancement_and_probes() {
    let mut session = builtin();
    let backend = ScriptedBackend::new()
        .with_input(Input::CheckHealth)
        .with_typed_instruction("Summarize")
        .with_click(ClickTarget::Enhance)
        .with_keys([NavKey::Right, NavKey::Right, NavKey::Down, NavKey::Enter])
        .with_enhancement(EnhancePromptResponse {
            new_sys_prompt: None,
            questions: vec![wire("Audience?", &["Experts", "Novices"])],
        })
        .with_health(HealthReport::new(ServiceStatus::Alive, r#"{"status":"healthy"}"#))
        .with_inference_health(InferenceReport::new(InferenceStatus::Healthy, "pong"));

    let submission = session.run(&backend).unwrap().unwrap().clone();

    assert_eq!(submission.system_instruction, "Summarize");
    assert_eq!(
        submission.answers.get(id(1)),
        Some(&AnswerValue::from("Novices"))
    );
    assert_eq!(session.health().unwrap().status, ServiceStatus::Alive);
    assert_eq!(
        session.inference_health().unwrap().status,
        InferenceStatus::Healthy
    );

    let sent = backend.sent_commands();
    assert_eq!(sent.len(), 3);
    assert!(matches!(sent[2], Command::Enhance(_)));
}

#[test]
fn test_scripted_probe_without_reply_reports_down() {
    let mut session = builtin();
    let backend = ScriptedBackend::new().with_input(Input::CheckHealth);
    session.run(&backend).unwrap();

    let health = session.health().unwrap();
    assert_eq!(health.status, ServiceStatus::Down);
    assert_eq!(health.response, "no scripted reply");
    assert_eq!(
        session.inference_health().unwrap().status,
        InferenceStatus::Unhealthy
    );
}

#[test]
fn test_scripted_enhancement_without_reply_fails() {
    let mut session = builtin();
    let backend = ScriptedBackend::new().with_input(Input::Enhance);
    let err = session.run(&backend).unwrap_err();
    assert!(err.to_string().contains("enhancement request #1"));

    let direct = ScriptedBackendError::MissingEnhanceReply(1);
    assert_eq!(
        direct.to_string(),
        "No scripted reply left for enhancement request #1"
    );
}

trait TapInstruction {
    fn tap_instruction(self, text: &str) -> Self;
}

impl TapInstruction for FormSession {
    fn tap_instruction(mut self, text: &str) -> Self {
        self.handle(Input::FocusInstruction);
        for c in text.chars() {
            self.handle(Input::Edit(TextEdit::Insert(c)));
        }
        self.handle(Input::LeaveInstruction);
        self
    }
}
