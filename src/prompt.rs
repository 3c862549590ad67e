//! Prompt construction for outreach messages.
//!
//! A record describing the recipient is rendered into a single instruction prompt. Random
//! choices (opening line, closing line, fallback topic) come from a caller-supplied RNG so
//! rendering is reproducible under a seeded generator.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const SNIPPET_MAX_CHARS: usize = 400;

const TOPICS: &[&str] = &[
    "leadership in tech",
    "AI innovation",
    "team culture",
    "marketing strategy",
    "career growth",
    "product design",
    "creative storytelling",
    "customer engagement",
    "data-driven insights",
];

const OPENERS: &[&str] = &["Hi {name},", "Hey {name},", "Hello {name},", "Hi there {name},", "Good day {name},"];

const CLOSINGS: &[&str] = &[
    "Would love to exchange ideas sometime.",
    "Maybe we could set up a short chat soon.",
    "Hope we can connect and share thoughts.",
    "Looking forward to staying in touch.",
    "Would be great to learn more about your work.",
    "Let's stay connected and exchange ideas.",
];

/// Purpose of the outreach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Hiring,
    Marketing,
    Sales,
    Partnership,
    Networking,
    Collaboration,
    Default,
}

impl Intent {
    pub const ALL: [Intent; 7] = [
        Intent::Hiring,
        Intent::Marketing,
        Intent::Sales,
        Intent::Partnership,
        Intent::Networking,
        Intent::Collaboration,
        Intent::Default,
    ];

    /// Case-insensitive; anything unrecognized is `Default`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "hiring" => Intent::Hiring,
            "marketing" => Intent::Marketing,
            "sales" => Intent::Sales,
            "partnership" => Intent::Partnership,
            "networking" => Intent::Networking,
            "collaboration" => Intent::Collaboration,
            _ => Intent::Default,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::Hiring => "hiring",
            Intent::Marketing => "marketing",
            Intent::Sales => "sales",
            Intent::Partnership => "partnership",
            Intent::Networking => "networking",
            Intent::Collaboration => "collaboration",
            Intent::Default => "default",
        }
    }

    fn framing(self) -> &'static str {
        match self {
            Intent::Hiring => "You are getting in touch about hiring or a career opportunity.",
            Intent::Marketing => "You are opening a friendly conversation about a marketing or brand partnership.",
            Intent::Sales => "You are introducing a product or service that could help with their goals.",
            Intent::Partnership => "You are exploring a possible business partnership.",
            Intent::Networking => "You are growing your professional network around shared interests.",
            Intent::Collaboration => "You are proposing to collaborate on a project or research idea.",
            Intent::Default => "You are sending a warm, professional connection request.",
        }
    }
}

/// Who is sending the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderPerspective {
    JobApplicant,
    Recruiter,
    Peer,
    Networker,
}

impl Default for SenderPerspective {
    fn default() -> Self {
        SenderPerspective::JobApplicant
    }
}

impl SenderPerspective {
    /// Case-insensitive, accepts spaces or underscores; anything unrecognized is `Networker`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().replace('_', " ").as_str() {
            "job applicant" | "applicant" => SenderPerspective::JobApplicant,
            "recruiter" => SenderPerspective::Recruiter,
            "peer" => SenderPerspective::Peer,
            _ => SenderPerspective::Networker,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SenderPerspective::JobApplicant => "job applicant",
            SenderPerspective::Recruiter => "recruiter",
            SenderPerspective::Peer => "peer",
            SenderPerspective::Networker => "networker",
        }
    }

    fn framing(self) -> &'static str {
        match self {
            SenderPerspective::JobApplicant => {
                "You write as a prospective applicant with a genuine interest in their work."
            }
            SenderPerspective::Recruiter => {
                "You write as a recruiter who values the recipient's expertise."
            }
            SenderPerspective::Peer => {
                "You write as a fellow professional hoping to discuss topics you both care about."
            }
            SenderPerspective::Networker => {
                "You write simply to connect and trade perspectives."
            }
        }
    }
}

/// One recipient to write to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachRequest {
    pub name: String,
    pub job_role: String,
    pub company: String,
    pub intent: Intent,
    #[serde(default)]
    pub post_or_profile: Option<String>,
    #[serde(default)]
    pub sender_perspective: SenderPerspective,
}

impl OutreachRequest {
    pub fn new(
        name: impl Into<String>,
        job_role: impl Into<String>,
        company: impl Into<String>,
        intent: Intent,
    ) -> Self {
        Self {
            name: name.into(),
            job_role: job_role.into(),
            company: company.into(),
            intent,
            post_or_profile: None,
            sender_perspective: SenderPerspective::default(),
        }
    }

    pub fn with_post(mut self, post: impl Into<String>) -> Self {
        let post = post.into();
        self.post_or_profile = if post.trim().is_empty() { None } else { Some(post) };
        self
    }

    pub fn with_perspective(mut self, perspective: SenderPerspective) -> Self {
        self.sender_perspective = perspective;
        self
    }
}

/// Renders [`OutreachRequest`]s into prompts.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Render with thread-local randomness.
    pub fn render(&self, request: &OutreachRequest) -> String {
        self.render_with(request, &mut rand::thread_rng())
    }

    pub fn render_with<R: Rng + ?Sized>(&self, request: &OutreachRequest, rng: &mut R) -> String {
        let context = match &request.post_or_profile {
            Some(post) => format!(
                "Here is text from their post or profile:\n\"{}\"",
                snippet(post)
            ),
            None => {
                let topic = TOPICS.choose(rng).copied().unwrap_or("their work");
                format!("Work in a natural mention of {}.", topic)
            }
        };
        let opener = OPENERS
            .choose(rng)
            .copied()
            .unwrap_or("Hi {name},")
            .replace("{name}", request.name.trim());
        let closing = CLOSINGS.choose(rng).copied().unwrap_or(CLOSINGS[0]);

        format!(
            "Write a personalized LinkedIn outreach message of two or three sentences.\n\
             {intent}\n\
             {perspective}\n\
             The recipient is {role} at {company}; keep the message relevant to {company}'s field.\n\
             Sound conversational and respectful, and avoid stock compliments.\n\
             \n\
             {context}\n\
             \n\
             Begin with: {opener}\n\
             Finish with: {closing}\n\
             \n\
             Reply with the message text only.",
            intent = request.intent.framing(),
            perspective = request.sender_perspective.framing(),
            role = request.job_role.trim(),
            company = request.company.trim(),
            context = context,
            opener = opener,
            closing = closing,
        )
    }
}

/// Trimmed post text, cut to the first 400 characters with a trailing `...`.
fn snippet(post: &str) -> String {
    let trimmed = post.trim();
    if trimmed.chars().count() > SNIPPET_MAX_CHARS {
        let cut: String = trimmed.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{}...", cut)
    } else {
        trimmed.to_string()
    }
}
