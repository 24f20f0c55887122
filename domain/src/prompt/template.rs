//! Prompt templates for planning, critique and topic analysis

use crate::planning::critique::Critique;
use crate::planning::expert::ExpertDomain;
use crate::planning::plan::Plan;

/// Inputs for one subtopic analysis prompt.
#[derive(Debug, Clone, Copy)]
pub struct SubtopicBrief<'a> {
    pub subject: &'a str,
    pub context: &'a str,
    pub topic: &'a str,
    pub description: &'a str,
    pub subtopic: &'a str,
    pub processed: &'a [String],
    pub remaining: &'a [String],
}

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for plan generation
    pub fn planning_system(subject: &str, context: &str) -> String {
        format!(
            r#"You are an elite business strategist with extensive experience in conceptualizing, setting up, launching and managing businesses worldwide.
You lead a team of experts covering all functional areas of business:
{}

Your job is to identify the critical areas of research required to establish a {} in {}.
Consider market conditions, competition, socio-economic factors, infrastructure, regulations and cultural nuances specific to {}."#,
            ExpertDomain::roster(),
            subject,
            context,
            context
        )
    }

    /// User prompt for the initial plan
    pub fn planning(subject: &str, context: &str) -> String {
        format!(
            r#"List the research topics for launching a {subject} in {context}.

For each topic provide:
- topic: the name of the research area
- reason: why this topic is critical for launching a {subject} in {context}
- subtopics: actionable subtopics (KPIs, estimates, dependencies, risks, regulations, localization notes)

Each topic must be self-contained so a dedicated expert can research it independently.
Prioritize by strategic importance. Do not give generic or global advice.

{}"#,
            Self::plan_format()
        )
    }

    /// User prompt for a refinement delta: only new topics addressing the critique
    pub fn planning_with_feedback(
        subject: &str,
        context: &str,
        prior: &Plan,
        critique: &Critique,
    ) -> String {
        format!(
            r#"These topics were already identified for launching a {subject} in {context}:

{}
A critical review of them found:

Overall assessment:
{}

Strengths:
{}
Weaknesses / gaps:
{}
Suggestions for improvement:
{}
Additional recommendations:
{}
IMPORTANT: Only provide the NEW topics, not the existing ones.
The new topics must address the gaps above and must not duplicate any existing topic.

{}"#,
            prior.outline(),
            critique.assessment(),
            Self::bullets(critique.strengths()),
            Self::bullets(critique.weaknesses()),
            Self::bullets(critique.suggestions()),
            Self::bullets(critique.recommendations()),
            Self::plan_format()
        )
    }

    /// System prompt for plan critique
    pub fn critique_system() -> &'static str {
        r#"You are a critical reviewer of business research plans.
Be specific, precise and critical. Cite the submitted topics and subtopics wherever possible.
Focus solely on the research topics, not on implementation strategies."#
    }

    /// User prompt for plan critique
    pub fn critique(subject: &str, context: &str, plan: &Plan) -> String {
        format!(
            r#"A team of experts submitted these research topics for establishing a {subject} in {context}:

{}
Evaluate the list for strategic relevance, completeness of subtopics, localization to {context},
actionability, risk coverage, KPIs, quantitative estimates, dependencies and regulatory considerations.

Respond with a JSON object:
{{
    "assessment": "<high-level judgment>",
    "strengths": ["<strong areas>"],
    "weaknesses": ["<missing areas, overlaps, vague guidance>"],
    "suggestions": ["<actionable steps to fix the weaknesses>"],
    "recommendations": ["<optional further insights>"],
    "score": <1-10>
}}

Score bands: poor (1-3), adequate (4-6), good (7-8), excellent (9-10).
More weaknesses, suggestions and recommendations should mean a lower score."#,
            plan.outline()
        )
    }

    /// Prompt asking which expert should analyze a subtopic
    pub fn expert_router(topic: &str, subtopic: &str) -> String {
        format!(
            r#"Assign the request below to the single most suitable expert.

Available experts:
{}

Request: analyze "{subtopic}" as part of "{topic}".

Respond with JSON only: {{"expert": "<expert key from the list>"}}"#,
            ExpertDomain::roster()
        )
    }

    /// System prompt for an expert analyst
    pub fn expert_system(expert: ExpertDomain) -> String {
        format!(
            r#"You are a world-class {}, recognized for your expertise in {}.
You give structured, evidence-based and actionable analysis suitable for executives and investors.
Use the available search tools when you need current facts, figures or regulations."#,
            expert.role_name(),
            expert.description()
        )
    }

    /// User prompt for analyzing one subtopic
    pub fn subtopic_analysis(brief: &SubtopicBrief<'_>) -> String {
        format!(
            r#"Analyze "{}" in the context of "{}" for a {} in {}.

Topic description:
{}

Previously analyzed topics (do not repeat their insights):
{}
Topics still to be analyzed:
{}
Identify key drivers, dependencies, risks and success factors, back them with data where possible,
and conclude with strategic implications and actionable recommendations."#,
            brief.subtopic,
            brief.topic,
            brief.subject,
            brief.context,
            brief.description,
            Self::bullets(brief.processed),
            Self::bullets(brief.remaining)
        )
    }

    /// System prompt for report synthesis
    pub fn report_system() -> &'static str {
        r#"You integrate multiple analyses into one cohesive strategic report.
Do not merely summarize: merge, deepen and connect the insights, removing redundancy.
Write for executives and investors."#
    }

    /// User prompt for the per-topic report
    pub fn report(
        subject: &str,
        context: &str,
        topic: &str,
        analyses: &[(String, String)],
        raw_information: &[String],
    ) -> String {
        let mut prompt = format!(
            "Write the report on \"{}\" for a {} business in {}.\n\n<analyses>\n",
            topic, subject, context
        );
        for (subtopic, analysis) in analyses {
            prompt.push_str(&format!("\n--- {} ---\n{}\n", subtopic, analysis));
        }
        prompt.push_str("</analyses>\n");

        if !raw_information.is_empty() {
            prompt.push_str("\n<research_notes>\n");
            for info in raw_information {
                prompt.push_str(info);
                prompt.push('\n');
            }
            prompt.push_str("</research_notes>\n");
        }

        prompt
    }

    fn plan_format() -> &'static str {
        r#"Respond with JSON only, in this format:
{
    "topics": [
        {
            "topic": "<topic name>",
            "reason": "<why this topic is critical>",
            "subtopics": ["<subtopic 1>", "<subtopic 2>"]
        }
    ]
}"#
    }

    fn bullets(items: &[String]) -> String {
        if items.is_empty() {
            return "- (none)\n".to_string();
        }
        items.iter().map(|i| format!("- {}\n", i)).collect()
    }
}
