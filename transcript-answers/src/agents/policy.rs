// Citation suppression policy

/// Queries starting with this marker are internal tasks issued by the chat
/// frontend (titles, tags, follow-ups), not user questions.
pub const SYSTEM_TASK_MARKER: &str = "### Task:";

/// Lowercased fragments of the canned replies from the system prompt.
pub const CANNED_REPLY_FRAGMENTS: [&str; 4] = [
    "assalamualaikum",
    "wailikum assalam",
    "allah and his messenger know best",
    "that's not important — what truly matters is who created us all",
];

pub fn is_system_task(user_query: &str) -> bool {
    user_query.trim().starts_with(SYSTEM_TASK_MARKER)
}

pub fn is_canned_reply(answer: &str) -> bool {
    let answer = answer.to_lowercase();
    CANNED_REPLY_FRAGMENTS
        .iter()
        .any(|fragment| answer.contains(fragment))
}

/// Whether the Sources footer may be appended to `answer`.
pub fn should_attach_sources(user_query: &str, answer: &str) -> bool {
    !is_system_task(user_query) && !is_canned_reply(answer)
}
