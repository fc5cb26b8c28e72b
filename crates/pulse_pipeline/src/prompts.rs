//! Prompt builders. The article prompt pins the `title:` / `body:` output
//! contract and the section headers the parser scans for; changing either
//! side means changing both.

use pulse_core::{GenerationOptions, NewsItem, SummaryKind};

pub const ARTICLE_OPTS: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    max_tokens: 4000,
};

pub const DIGEST_OPTS: GenerationOptions = GenerationOptions {
    temperature: 0.7,
    max_tokens: 120,
};

/// Long-form article prompt over a numbered list of item descriptions.
pub fn article_prompt(items: &[NewsItem]) -> String {
    let numbered = items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("[{}] {}", i + 1, item.description))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Generate a complete financial news article with title and body based on the following data:\n\
        \n\
        NEWS DATA:\n\
        {numbered}\n\
        \n\
        STRUCTURE:\n\
        Open the body with a short lead paragraph on why this matters, then these sections, \
        each introduced by its header on its own line exactly as written:\n\
        The Facts:\n\
        Market Impact:\n\
        Expert Roundtable:\n\
        Long-Term Consequences:\n\
        Key Takeaways:\n\
        The last section is 3-5 bullet points.\n\
        \n\
        STYLE:\n\
        Professional financial journalism tone, paragraphs of 3-5 sentences, \
        no markdown or special formatting, no first-person pronouns.\n\
        \n\
        OUTPUT FORMAT:\n\
        title: [generated headline here]\n\
        body: [generated article content here]"
    )
}

/// Short digest prompt over newline-joined headlines.
pub fn digest_prompt(kind: SummaryKind, headlines: &str) -> String {
    format!(
        "Write a single {kind} market digest under 280 characters, plain text, \
        no hashtags and no links, based on these headlines:\n{headlines}"
    )
}
