//! Prompt assembly for the three reasoning-service calls.
//!
//! Prompts carry the full session context (mode, role/level, job
//! description, seed text) plus explicit JSON shape instructions, since
//! the response is parsed with a fixed-shape expectation. Exact wording is
//! not load-bearing; the shape contracts are.

use crate::domain::interview::{InterviewMode, InterviewSession, Question};

/// System instruction for question generation.
pub const QUESTION_SYSTEM_PROMPT: &str =
    "You are an expert technical interviewer. Respond with JSON only, no prose.";

/// System instruction for answer evaluation.
pub const EVALUATION_SYSTEM_PROMPT: &str =
    "You are a rigorous interview evaluator. Respond with JSON only, no prose.";

/// System instruction for report synthesis.
pub const REPORT_SYSTEM_PROMPT: &str =
    "You are a hiring committee writer. Respond with JSON only, no prose.";

/// Builds the question-generation prompt from the session's seed context.
pub fn build_question_prompt(session: &InterviewSession) -> String {
    let mut prompt = String::new();
    prompt.push_str(&format!(
        "Generate exactly {} interview questions for the following candidate context.\n\n",
        session.target_question_count()
    ));
    push_context(&mut prompt, session);
    prompt.push_str(&format!("Candidate context:\n{}\n\n", session.seed_text()));
    prompt.push_str(
        "Return JSON of the shape:\n\
         {\"questions\": [{\"id\": \"q1\", \"text\": \"...\", \
         \"category\": \"technical|behavioral|problem_solving|system_design\", \
         \"difficulty\": \"easy|medium|hard\"}]}\n",
    );
    prompt
}

/// Builds the per-answer evaluation prompt.
pub fn build_evaluation_prompt(
    session: &InterviewSession,
    question: &Question,
    answer_text: &str,
) -> String {
    let mut prompt = String::new();
    prompt.push_str("Evaluate one interview answer.\n\n");
    push_context(&mut prompt, session);
    prompt.push_str(&format!(
        "Question ({}, {}): {}\n\nAnswer:\n{}\n\n",
        question.category, question.difficulty, question.text, answer_text
    ));
    prompt.push_str(
        "Score each dimension as an integer from 0 to 10. Return JSON of the shape:\n\
         {\"technical\": 0, \"communication\": 0, \"problem_solving\": 0, \"overall\": 0, \
         \"strengths\": [\"...\"], \"gaps\": [\"...\"], \"follow_up\": \"...\"}\n",
    );
    prompt
}

/// Builds the report prompt from the full transcript.
pub fn build_report_prompt(session: &InterviewSession) -> String {
    let mut prompt = String::new();
    prompt.push_str("Write a final interview report from the transcript below.\n\n");
    push_context(&mut prompt, session);

    let summary = session.summary();
    prompt.push_str(&format!(
        "Score summary: {} answers evaluated; averages technical {:.1}, \
         communication {:.1}, problem solving {:.1}, overall {:.1} (of 10).\n\n",
        summary.count_evaluated,
        summary.avg_technical,
        summary.avg_communication,
        summary.avg_problem_solving,
        summary.avg_overall
    ));

    prompt.push_str("Transcript:\n");
    for question in session.questions() {
        prompt.push_str(&format!("Q [{}]: {}\n", question.id, question.text));
        if let Some(answer) = session
            .answers()
            .iter()
            .find(|a| a.question_id == question.id)
        {
            prompt.push_str(&format!("A: {}\n", answer.text));
        }
        if let Some(eval) = session
            .evaluations()
            .iter()
            .find(|e| e.question_id == question.id)
        {
            prompt.push_str(&format!(
                "Scores: technical {}, communication {}, problem solving {}, overall {}\n",
                eval.technical, eval.communication, eval.problem_solving, eval.overall
            ));
        }
        prompt.push('\n');
    }

    if let Some(integrity) = session.integrity_summary() {
        prompt.push_str(&format!(
            "Integrity signals: {} tab switches, {} security events, critical: [{}]\n\n",
            integrity.tab_switches,
            integrity.security_event_count,
            integrity.critical_events.join(", ")
        ));
    }

    prompt.push_str(
        "Return JSON of the shape:\n\
         {\"recommendation\": \"strong_hire|hire|borderline|no_hire\", \"confidence\": 0, \
         \"executive_summary\": \"...\", \"strengths\": [\"...\"], \"gaps\": [\"...\"], \
         \"evidence\": [{\"kind\": \"answer_excerpt|score_pattern|communication_style|integrity_signal\", \
         \"note\": \"...\"}], \"next_round_focus\": [\"...\"]}\n",
    );
    prompt
}

fn push_context(prompt: &mut String, session: &InterviewSession) {
    let intake = session.intake();
    match session.mode() {
        InterviewMode::RecruiterLed => {
            prompt.push_str(&format!(
                "Interview mode: recruiter-led. Role: {}. Level: {}.\n",
                intake.role.as_deref().unwrap_or("unspecified"),
                intake.level.as_deref().unwrap_or("unspecified"),
            ));
        }
        InterviewMode::Cohort => {
            prompt.push_str(&format!(
                "Interview mode: cohort screening (template {}).\n",
                intake
                    .template_id
                    .as_ref()
                    .map(|t| t.as_str().to_string())
                    .unwrap_or_else(|| "unspecified".to_string()),
            ));
        }
        InterviewMode::SelfServe => {
            prompt.push_str("Interview mode: self-serve practice session.\n");
        }
    }
    if let Some(job_description) = &intake.job_description {
        prompt.push_str(&format!("Job description:\n{}\n", job_description));
    }
    prompt.push('\n');
}
