//! Interview session aggregate.
//!
//! The aggregate root for one candidate's end-to-end interview attempt.
//! All mutation goes through methods that enforce the lifecycle state
//! machine; callers re-derive idempotency from persisted state rather than
//! trusting client-supplied flags.
//!
//! # Invariants
//!
//! - `id` is unique and immutable
//! - status only moves forward: `created -> in_progress -> completed`
//! - the question list is immutable in length once generated
//! - `current_question_index` stays in `[0, questions.len() - 1]` once
//!   questions exist
//! - at most one evaluation per question id
//! - the score summary is recomputed from the evaluation list on every
//!   mutation, never mutated independently

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DomainError, ErrorCode, InterviewStatus, SessionId, ShareToken, TemplateId, Timestamp,
    ValidationError,
};
use crate::domain::integrity::{IntegrityWindow, SecurityEvent};

use super::evaluation::{Answer, Evaluation};
use super::question::Question;
use super::report::{IntegritySummary, Report};
use super::summary::ScoreSummary;

/// Minimum length of the seed text used to generate questions.
pub const MIN_SEED_TEXT_LENGTH: usize = 50;

/// Minimum length of an acceptable answer.
pub const MIN_ANSWER_LENGTH: usize = 10;

/// Bounds for the requested question count.
pub const MIN_QUESTION_COUNT: usize = 1;
pub const MAX_QUESTION_COUNT: usize = 20;

/// How the session's question context was seeded.
///
/// The mode fixes which optional intake fields are required but not the
/// state machine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewMode {
    /// A recruiter seeds one candidate with role and level context.
    RecruiterLed,
    /// Bulk intake from a shared question template.
    Cohort,
    /// Candidate self-serves with their own seed material.
    SelfServe,
}

impl std::fmt::Display for InterviewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InterviewMode::RecruiterLed => "recruiter_led",
            InterviewMode::Cohort => "cohort",
            InterviewMode::SelfServe => "self_serve",
        };
        write!(f, "{}", s)
    }
}

/// Mode-dependent intake context captured at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct IntakeContext {
    /// Candidate display name, when known.
    pub candidate_name: Option<String>,
    /// Target role, required for recruiter-led sessions.
    pub role: Option<String>,
    /// Target seniority, required for recruiter-led sessions.
    pub level: Option<String>,
    /// Question template, required for cohort sessions.
    pub template_id: Option<TemplateId>,
    /// Job description text, when provided.
    pub job_description: Option<String>,
}

/// Outcome of recording an evaluated answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Cursor advanced to the next question.
    Advanced { next_index: usize },
    /// The last question was answered; the session is now completed.
    Completed,
}

/// Direction for manual navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationDirection {
    Next,
    Previous,
}

/// Outcome of ingesting an integrity signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Event entered the window; `audit_worthy` marks critical events.
    Recorded { audit_worthy: bool },
    /// Session is completed; the window is frozen and the event dropped.
    WindowFrozen,
}

/// Interview session aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    id: SessionId,
    mode: InterviewMode,
    status: InterviewStatus,
    intake: IntakeContext,
    /// Context text the question generation prompt is seeded from.
    seed_text: String,
    /// How many questions to generate.
    target_question_count: usize,
    questions: Vec<Question>,
    current_question_index: usize,
    answers: Vec<Answer>,
    evaluations: Vec<Evaluation>,
    summary: ScoreSummary,
    report: Option<Report>,
    share_token: Option<ShareToken>,
    integrity: IntegrityWindow,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl InterviewSession {
    /// Creates a new session in the `created` state.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the seed text is shorter than
    ///   [`MIN_SEED_TEXT_LENGTH`], the question count is out of bounds, or a
    ///   mode-required intake field is missing
    pub fn new(
        id: SessionId,
        mode: InterviewMode,
        intake: IntakeContext,
        seed_text: String,
        target_question_count: usize,
    ) -> Result<Self, DomainError> {
        Self::validate_seed_text(&seed_text)?;
        Self::validate_question_count(target_question_count)?;
        Self::validate_intake(mode, &intake)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            mode,
            status: InterviewStatus::Created,
            intake,
            seed_text,
            target_question_count,
            questions: Vec::new(),
            current_question_index: 0,
            answers: Vec::new(),
            evaluations: Vec::new(),
            summary: ScoreSummary::default(),
            report: None,
            share_token: None,
            integrity: IntegrityWindow::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        mode: InterviewMode,
        status: InterviewStatus,
        intake: IntakeContext,
        seed_text: String,
        target_question_count: usize,
        questions: Vec<Question>,
        current_question_index: usize,
        answers: Vec<Answer>,
        evaluations: Vec<Evaluation>,
        report: Option<Report>,
        share_token: Option<ShareToken>,
        integrity: IntegrityWindow,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        let summary = ScoreSummary::from_evaluations(&evaluations);
        Self {
            id,
            mode,
            status,
            intake,
            seed_text,
            target_question_count,
            questions,
            current_question_index,
            answers,
            evaluations,
            summary,
            report,
            share_token,
            integrity,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn mode(&self) -> InterviewMode {
        self.mode
    }

    pub fn status(&self) -> InterviewStatus {
        self.status
    }

    pub fn intake(&self) -> &IntakeContext {
        &self.intake
    }

    pub fn seed_text(&self) -> &str {
        &self.seed_text
    }

    pub fn target_question_count(&self) -> usize {
        self.target_question_count
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    /// The question the cursor points at, if questions exist.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    pub fn summary(&self) -> &ScoreSummary {
        &self.summary
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn share_token(&self) -> Option<&ShareToken> {
        self.share_token.as_ref()
    }

    pub fn integrity(&self) -> &IntegrityWindow {
        &self.integrity
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true if an evaluation exists for the given question id.
    pub fn has_evaluation_for(&self, question_id: &str) -> bool {
        self.evaluations.iter().any(|e| e.question_id == question_id)
    }

    /// The report's integrity block, when any signal was recorded.
    pub fn integrity_summary(&self) -> Option<IntegritySummary> {
        self.integrity.summary()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Guards used by callers before external calls
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks that an answer submission would currently be accepted.
    ///
    /// Callers run this before the reasoning-service round trip so invalid
    /// input never costs an upstream call. The same conditions are
    /// re-checked inside [`record_evaluation`](Self::record_evaluation)
    /// because the state may have moved between read and write.
    pub fn ensure_answer_acceptable(&self, answer_text: &str) -> Result<&Question, DomainError> {
        match self.status {
            InterviewStatus::Completed => {
                return Err(DomainError::new(
                    ErrorCode::SessionCompleted,
                    "Interview is completed",
                ))
            }
            InterviewStatus::Created => {
                return Err(DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    "Questions have not been generated",
                ))
            }
            InterviewStatus::InProgress => {}
        }

        let trimmed = answer_text.trim();
        if trimmed.chars().count() < MIN_ANSWER_LENGTH {
            return Err(ValidationError::too_short(
                "answer",
                MIN_ANSWER_LENGTH,
                trimmed.chars().count(),
            )
            .into());
        }

        let question = self.current_question().ok_or_else(|| {
            DomainError::new(ErrorCode::QuestionNotFound, "No current question")
        })?;

        if self.has_evaluation_for(&question.id) {
            return Err(DomainError::new(
                ErrorCode::DuplicateEvaluation,
                format!("Question '{}' already evaluated", question.id),
            )
            .with_detail("question_id", question.id.clone()));
        }

        Ok(question)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Attaches the generated question set and moves to `in_progress`.
    ///
    /// # Errors
    ///
    /// - `QuestionsAlreadyGenerated` if a question set already exists
    /// - `ValidationFailed` if the set is empty
    pub fn attach_questions(&mut self, questions: Vec<Question>) -> Result<(), DomainError> {
        if !self.questions.is_empty() {
            return Err(DomainError::new(
                ErrorCode::QuestionsAlreadyGenerated,
                "Question set already exists",
            ));
        }
        if questions.is_empty() {
            return Err(DomainError::validation(
                "questions",
                "Generated question set is empty",
            ));
        }

        self.questions = questions;
        self.current_question_index = 0;
        self.status = InterviewStatus::InProgress;
        self.touch();
        Ok(())
    }

    /// Records an evaluated answer for the current question and advances.
    ///
    /// The answer and evaluation must target the cursor's current question.
    /// Answering the last question completes the session and leaves the
    /// cursor in place; any earlier question advances the cursor by one.
    ///
    /// # Errors
    ///
    /// - `SessionCompleted` / `InvalidStateTransition` for wrong status
    /// - `DuplicateEvaluation` if the question already has an evaluation
    /// - `InternalError` if answer/evaluation target a different question
    pub fn record_evaluation(
        &mut self,
        answer: Answer,
        evaluation: Evaluation,
    ) -> Result<SubmissionOutcome, DomainError> {
        let current_id = self.ensure_answer_acceptable(&answer.text)?.id.clone();

        if answer.question_id != current_id || evaluation.question_id != current_id {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Answer and evaluation must target the current question",
            ));
        }

        self.answers.push(answer);
        self.evaluations.push(evaluation);
        self.summary = ScoreSummary::from_evaluations(&self.evaluations);

        let outcome = if self.current_question_index + 1 == self.questions.len() {
            self.status = InterviewStatus::Completed;
            SubmissionOutcome::Completed
        } else {
            self.current_question_index += 1;
            SubmissionOutcome::Advanced {
                next_index: self.current_question_index,
            }
        };

        self.touch();
        Ok(outcome)
    }

    /// Moves the cursor one step without re-evaluating anything.
    ///
    /// Allowed in any status once questions exist, including `completed`,
    /// so reviewers can walk the transcript.
    ///
    /// # Errors
    ///
    /// - `QuestionsNotGenerated` before generation
    /// - `CursorOutOfRange` when the move would leave `[0, len - 1]`
    pub fn navigate(&mut self, direction: NavigationDirection) -> Result<usize, DomainError> {
        if self.questions.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Questions have not been generated",
            ));
        }

        let requested: i64 = match direction {
            NavigationDirection::Next => self.current_question_index as i64 + 1,
            NavigationDirection::Previous => self.current_question_index as i64 - 1,
        };

        if requested < 0 || requested as usize >= self.questions.len() {
            return Err(DomainError::new(
                ErrorCode::CursorOutOfRange,
                "Navigation would leave the question range",
            )
            .with_detail("requested", requested.to_string())
            .with_detail("length", self.questions.len().to_string()));
        }

        self.current_question_index = requested as usize;
        self.touch();
        Ok(self.current_question_index)
    }

    /// Caches the generated report, minting the share token only if absent.
    ///
    /// # Errors
    ///
    /// - `ReportNotReady` unless the session is completed
    pub fn attach_report(
        &mut self,
        report: Report,
        token: ShareToken,
    ) -> Result<(), DomainError> {
        if self.status != InterviewStatus::Completed {
            return Err(DomainError::new(
                ErrorCode::ReportNotReady,
                "Interview is not completed",
            ));
        }

        self.report = Some(report);
        if self.share_token.is_none() {
            self.share_token = Some(token);
        }
        self.touch();
        Ok(())
    }

    /// Ingests an integrity signal.
    ///
    /// Signals are accepted in `created` and `in_progress` (some originate
    /// during setup, before generation). A completed session's window is
    /// frozen: the event is dropped and reported as such, which callers
    /// treat as an accepted no-op rather than an error.
    pub fn record_security_event(&mut self, event: SecurityEvent) -> IngestOutcome {
        if self.status.is_terminal() {
            return IngestOutcome::WindowFrozen;
        }
        let audit_worthy = event.is_critical();
        self.integrity.record(event);
        self.touch();
        IngestOutcome::Recorded { audit_worthy }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }

    fn validate_seed_text(seed_text: &str) -> Result<(), DomainError> {
        let len = seed_text.trim().chars().count();
        if len < MIN_SEED_TEXT_LENGTH {
            return Err(
                ValidationError::too_short("seed_text", MIN_SEED_TEXT_LENGTH, len).into(),
            );
        }
        Ok(())
    }

    fn validate_question_count(count: usize) -> Result<(), DomainError> {
        if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&count) {
            return Err(ValidationError::out_of_range(
                "target_question_count",
                MIN_QUESTION_COUNT as i32,
                MAX_QUESTION_COUNT as i32,
                count as i32,
            )
            .into());
        }
        Ok(())
    }

    fn validate_intake(mode: InterviewMode, intake: &IntakeContext) -> Result<(), DomainError> {
        let missing = |field: &str| -> DomainError {
            DomainError::validation(
                field,
                format!("Field '{}' is required for {} sessions", field, mode),
            )
        };

        match mode {
            InterviewMode::RecruiterLed => {
                if intake.role.as_deref().map_or(true, |s| s.trim().is_empty()) {
                    return Err(missing("role"));
                }
                if intake.level.as_deref().map_or(true, |s| s.trim().is_empty()) {
                    return Err(missing("level"));
                }
            }
            InterviewMode::Cohort => {
                if intake.template_id.is_none() {
                    return Err(missing("template_id"));
                }
            }
            InterviewMode::SelfServe => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Score;
    use crate::domain::integrity::TAB_BLUR;
    use crate::domain::interview::question::{Difficulty, QuestionCategory};

    fn seed() -> String {
        "Senior backend engineer with eight years of Rust and distributed systems.".to_string()
    }

    fn recruiter_intake() -> IntakeContext {
        IntakeContext {
            candidate_name: Some("Jordan".to_string()),
            role: Some("Backend Engineer".to_string()),
            level: Some("Senior".to_string()),
            template_id: None,
            job_description: None,
        }
    }

    fn test_session() -> InterviewSession {
        InterviewSession::new(
            SessionId::new(),
            InterviewMode::RecruiterLed,
            recruiter_intake(),
            seed(),
            3,
        )
        .unwrap()
    }

    fn question(n: usize) -> Question {
        Question {
            id: Question::fallback_id(n),
            text: format!("Question number {}?", n),
            category: QuestionCategory::Technical,
            difficulty: Difficulty::Medium,
        }
    }

    fn evaluation(question_id: &str, overall: u8) -> Evaluation {
        Evaluation {
            question_id: question_id.to_string(),
            technical: Score::try_new(overall).unwrap(),
            communication: Score::try_new(overall).unwrap(),
            problem_solving: Score::try_new(overall).unwrap(),
            overall: Score::try_new(overall).unwrap(),
            strengths: vec!["clear".to_string()],
            gaps: vec![],
            follow_up: "How would this scale?".to_string(),
            evaluated_at: Timestamp::now(),
        }
    }

    fn session_with_questions() -> InterviewSession {
        let mut session = test_session();
        session
            .attach_questions(vec![question(1), question(2), question(3)])
            .unwrap();
        session
    }

    fn submit(session: &mut InterviewSession, overall: u8) -> SubmissionOutcome {
        let qid = session.current_question().unwrap().id.clone();
        session
            .record_evaluation(
                Answer::new(qid.clone(), "A sufficiently long answer."),
                evaluation(&qid, overall),
            )
            .unwrap()
    }

    // Construction tests

    #[test]
    fn new_session_starts_created_and_empty() {
        let session = test_session();
        assert_eq!(session.status(), InterviewStatus::Created);
        assert!(session.questions().is_empty());
        assert_eq!(session.summary().count_evaluated, 0);
        assert!(session.report().is_none());
        assert!(session.share_token().is_none());
    }

    #[test]
    fn new_session_rejects_short_seed() {
        let result = InterviewSession::new(
            SessionId::new(),
            InterviewMode::SelfServe,
            IntakeContext::default(),
            "too short".to_string(),
            3,
        );
        assert!(result.is_err());
    }

    #[test]
    fn new_session_rejects_zero_question_count() {
        let result = InterviewSession::new(
            SessionId::new(),
            InterviewMode::SelfServe,
            IntakeContext::default(),
            seed(),
            0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn recruiter_led_requires_role_and_level() {
        let result = InterviewSession::new(
            SessionId::new(),
            InterviewMode::RecruiterLed,
            IntakeContext::default(),
            seed(),
            3,
        );
        assert!(result.is_err());
    }

    #[test]
    fn cohort_requires_template_id() {
        let result = InterviewSession::new(
            SessionId::new(),
            InterviewMode::Cohort,
            IntakeContext::default(),
            seed(),
            3,
        );
        assert!(result.is_err());

        let intake = IntakeContext {
            template_id: Some(TemplateId::new("t-1").unwrap()),
            ..Default::default()
        };
        let result =
            InterviewSession::new(SessionId::new(), InterviewMode::Cohort, intake, seed(), 3);
        assert!(result.is_ok());
    }

    #[test]
    fn self_serve_needs_only_seed() {
        let result = InterviewSession::new(
            SessionId::new(),
            InterviewMode::SelfServe,
            IntakeContext::default(),
            seed(),
            5,
        );
        assert!(result.is_ok());
    }

    // Question attachment tests

    #[test]
    fn attach_questions_moves_to_in_progress() {
        let session = session_with_questions();
        assert_eq!(session.status(), InterviewStatus::InProgress);
        assert_eq!(session.current_question_index(), 0);
        assert_eq!(session.current_question().unwrap().id, "q1");
    }

    #[test]
    fn attach_questions_twice_fails() {
        let mut session = session_with_questions();
        let result = session.attach_questions(vec![question(1)]);
        assert!(result.is_err());
        assert_eq!(session.questions().len(), 3);
    }

    #[test]
    fn attach_empty_question_set_fails() {
        let mut session = test_session();
        assert!(session.attach_questions(vec![]).is_err());
        assert_eq!(session.status(), InterviewStatus::Created);
    }

    // Submission tests

    #[test]
    fn submission_advances_cursor_and_recomputes_summary() {
        let mut session = session_with_questions();
        let outcome = submit(&mut session, 6);
        assert_eq!(outcome, SubmissionOutcome::Advanced { next_index: 1 });
        assert_eq!(session.status(), InterviewStatus::InProgress);
        assert_eq!(session.summary().count_evaluated, 1);
        assert_eq!(session.summary().avg_overall, 6.0);
    }

    #[test]
    fn answering_last_question_completes_without_moving_cursor() {
        let mut session = session_with_questions();
        submit(&mut session, 6);
        submit(&mut session, 8);
        let outcome = submit(&mut session, 10);
        assert_eq!(outcome, SubmissionOutcome::Completed);
        assert_eq!(session.status(), InterviewStatus::Completed);
        assert_eq!(session.current_question_index(), 2);
        assert_eq!(session.summary().count_evaluated, 3);
        assert_eq!(session.summary().avg_overall, 8.0);
    }

    #[test]
    fn duplicate_evaluation_is_rejected() {
        let mut session = session_with_questions();
        submit(&mut session, 6);
        // Walk back to the already-evaluated question.
        session.navigate(NavigationDirection::Previous).unwrap();
        let err = session
            .ensure_answer_acceptable("another perfectly fine answer")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateEvaluation);
        assert_eq!(session.evaluations().len(), 1);
    }

    #[test]
    fn short_answer_is_rejected_before_recording() {
        let session = session_with_questions();
        let err = session.ensure_answer_acceptable("short").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn completed_session_rejects_submissions() {
        let mut session = session_with_questions();
        submit(&mut session, 6);
        submit(&mut session, 8);
        submit(&mut session, 10);
        let err = session
            .ensure_answer_acceptable("a perfectly reasonable answer")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionCompleted);
    }

    #[test]
    fn created_session_rejects_submissions() {
        let session = test_session();
        let err = session
            .ensure_answer_acceptable("a perfectly reasonable answer")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn mismatched_question_target_is_internal_error() {
        let mut session = session_with_questions();
        let err = session
            .record_evaluation(
                Answer::new("q3", "a perfectly reasonable answer"),
                evaluation("q3", 7),
            )
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    // Navigation tests

    #[test]
    fn navigation_moves_within_bounds() {
        let mut session = session_with_questions();
        assert_eq!(session.navigate(NavigationDirection::Next).unwrap(), 1);
        assert_eq!(session.navigate(NavigationDirection::Previous).unwrap(), 0);
    }

    #[test]
    fn navigation_rejects_out_of_range() {
        let mut session = session_with_questions();
        let err = session.navigate(NavigationDirection::Previous).unwrap_err();
        assert_eq!(err.code, ErrorCode::CursorOutOfRange);

        session.navigate(NavigationDirection::Next).unwrap();
        session.navigate(NavigationDirection::Next).unwrap();
        let err = session.navigate(NavigationDirection::Next).unwrap_err();
        assert_eq!(err.code, ErrorCode::CursorOutOfRange);
        assert_eq!(session.current_question_index(), 2);
    }

    #[test]
    fn navigation_before_generation_fails() {
        let mut session = test_session();
        assert!(session.navigate(NavigationDirection::Next).is_err());
    }

    #[test]
    fn navigation_remains_allowed_after_completion() {
        let mut session = session_with_questions();
        submit(&mut session, 6);
        submit(&mut session, 8);
        submit(&mut session, 10);
        assert_eq!(session.navigate(NavigationDirection::Previous).unwrap(), 1);
        assert_eq!(session.status(), InterviewStatus::Completed);
    }

    // Report tests

    #[test]
    fn attach_report_requires_completion() {
        let mut session = session_with_questions();
        let report = sample_report();
        let err = session
            .attach_report(report, ShareToken::mint())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ReportNotReady);
    }

    #[test]
    fn attach_report_mints_token_only_once() {
        let mut session = session_with_questions();
        submit(&mut session, 6);
        submit(&mut session, 8);
        submit(&mut session, 10);

        let first_token = ShareToken::mint();
        session
            .attach_report(sample_report(), first_token.clone())
            .unwrap();
        assert_eq!(session.share_token(), Some(&first_token));

        // Regeneration replaces the report but keeps the original token.
        session
            .attach_report(sample_report(), ShareToken::mint())
            .unwrap();
        assert_eq!(session.share_token(), Some(&first_token));
    }

    fn sample_report() -> Report {
        Report {
            recommendation: crate::domain::interview::Recommendation::Hire,
            confidence: 80,
            executive_summary: "Solid performance.".to_string(),
            strengths: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            gaps: vec!["w".into(), "x".into(), "y".into(), "z".into()],
            evidence: vec![],
            next_round_focus: vec!["system design deep dive".into()],
            integrity: None,
            generated_at: Timestamp::now(),
        }
    }

    // Integrity tests

    #[test]
    fn events_accepted_before_generation() {
        let mut session = test_session();
        let outcome = session.record_security_event(SecurityEvent::new(TAB_BLUR, None));
        assert_eq!(outcome, IngestOutcome::Recorded { audit_worthy: false });
        assert_eq!(session.integrity().tab_switch_count(), 1);
    }

    #[test]
    fn critical_events_are_flagged_audit_worthy() {
        let mut session = session_with_questions();
        let outcome =
            session.record_security_event(SecurityEvent::new("devtools_open", None));
        assert_eq!(outcome, IngestOutcome::Recorded { audit_worthy: true });
    }

    #[test]
    fn completed_session_freezes_the_window() {
        let mut session = session_with_questions();
        submit(&mut session, 6);
        submit(&mut session, 8);
        submit(&mut session, 10);
        let before = session.integrity().len();
        let outcome = session.record_security_event(SecurityEvent::new(TAB_BLUR, None));
        assert_eq!(outcome, IngestOutcome::WindowFrozen);
        assert_eq!(session.integrity().len(), before);
    }

    #[test]
    fn integrity_summary_present_only_with_signals() {
        let mut session = session_with_questions();
        assert!(session.integrity_summary().is_none());
        session.record_security_event(SecurityEvent::new(TAB_BLUR, None));
        let summary = session.integrity_summary().unwrap();
        assert_eq!(summary.tab_switches, 1);
    }
}
