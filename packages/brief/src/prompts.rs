// ABOUTME: Prompt, system instruction, and response schema for brief refinement
// ABOUTME: The schema is sent to the model as a structured output contract

use rockspace_ai::Schema;

pub const SYSTEM_INSTRUCTION: &str = "You are helpful, professional, and concise. \
You turn vague ideas into concrete technical proposals.";

/// Build the brief-refinement prompt. The idea is embedded verbatim.
pub fn brief_prompt(idea: &str) -> String {
    format!(
        r#"You are a senior technical solution architect for Rockspace, a premium web agency.
Analyze this client's rough project idea and structure it into a professional brief to help them understand what they need.

Client Idea: "{}"

Provide a refined technical brief, a suggested tech stack, and a rough timeline estimation."#,
        idea
    )
}

/// Response schema with exactly three required keys
pub fn brief_schema() -> Schema {
    Schema::object()
        .required_property(
            "refinedBrief",
            Schema::string()
                .describe("A professional, technical reformulation of the client's idea."),
        )
        .required_property(
            "suggestedStack",
            Schema::array(Schema::string())
                .describe("List of recommended technologies (e.g., React, Node.js, AWS)."),
        )
        .required_property(
            "estimatedTimeline",
            Schema::string().describe("A rough estimated timeline string (e.g., '3-4 months')."),
        )
}
