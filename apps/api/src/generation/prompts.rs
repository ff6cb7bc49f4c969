// All LLM prompt templates for the generation handlers.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Substitutes `{name}` placeholders in a single left-to-right pass.
/// Substituted text is never rescanned, so user input containing a placeholder
/// stays literal. Unknown `{...}` sequences are kept as-is.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = values
            .iter()
            .find(|(name, _)| tail.starts_with(name) && tail[name.len()..].starts_with('}'));
        match hit {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Profile synthesis prompt. Replace `{user_details}` before sending.
pub const PROFILE_SYNTHESIS_PROMPT: &str = r#"Synthesize a professional tech identity for the student described below.

STUDENT DETAILS (JSON):
{user_details}

Return a JSON object with:
- "headline": one line positioning the student for campus placements
- "summary": 2-3 sentences on who they are and what they are aiming for
- "keySkills": the strongest, most marketable skills, most relevant first
- "preparationStage": one of "beginner", "intermediate", "placement-ready"
- "suggestedFocusAreas": 3-5 concrete areas to work on next"#;

/// Briefing prompt. Replace `{profile}` before sending.
pub const BRIEFING_PROMPT: &str = r#"Generate a career briefing for the dashboard of the student whose profile is below.

PROFILE (JSON):
{profile}

Return a JSON object with:
- "welcomeMessage": a short, direct greeting that names the student's target role
- "strengths": 3-4 strengths visible in the profile
- "focusAreas": 3-4 gaps to close before placements
- "nextSteps": 3-5 concrete actions for this week
- "sessionSummary": one sentence summarising where the student stands"#;

/// System instruction for the career assistant chat.
pub const CHAT_SYSTEM: &str = "You are a direct, expert career coach. \
    Provide sharp, professional advice for placement prep. \
    Avoid fluff. Do not use emojis.";

/// Resume analysis prompt. Replace `{resume_text}` and `{job_description}`.
pub const RESUME_ANALYSIS_PROMPT: &str = r#"Analyze the match between this Resume and Job Description.

RESUME:
{resume_text}

JOB DESCRIPTION:
{job_description}

Return a JSON object with:
- "matchScore": 0-100, how well the resume fits the role as written
- "strengths": what already lines up with the role
- "risks": reasons a recruiter might reject this resume for this role
- "matchedSkills": skills the job asks for that the resume demonstrates
- "missingSkills": skills the job asks for that the resume does not show
- "improvementSuggestions": specific edits to raise the match"#;

/// Resume generation prompt. Replace `{user_details}` and `{template_type}`.
pub const RESUME_GENERATION_PROMPT: &str = r#"Generate a detailed professional resume for the candidate below.

CANDIDATE DETAILS (JSON):
{user_details}

TEMPLATE: {template_type}

Write achievement-oriented bullets with strong action verbs. Keep the summary under 60 words.
Return a JSON object with "header" (name, title, contact), "summary", "skills",
"experience" (role, company, duration, achievements) and "education"."#;

/// Assessment prompt. Replace `{count}`, `{topic}` and `{difficulty}`.
pub const ASSESSMENT_PROMPT: &str = r#"Write {count} multiple-choice questions for a placement assessment.

TOPIC: {topic}
DIFFICULTY: {difficulty}

Return a JSON array. Each element has:
- "question": the question text
- "options": exactly 4 answer options
- "correctIndex": the 0-based index of the correct option
- "explanation": one or two sentences on why that option is correct

Questions must be unambiguous and test understanding, not trivia."#;
