//! Turns generated prose into a stable document shape.
//!
//! The generator is asked for `title:` / `body:` output with named section
//! headers; this module is the reverse mapping and the only place that knows
//! the line grammar. Pure string processing, no I/O.

use chrono::{DateTime, FixedOffset};

use crate::error::ParseError;
use crate::types::{Section, SectionContent, StructuredArticle};

/// Implicit section holding body text that precedes the first header.
pub const PREAMBLE_SECTION: &str = "Summary";

const HEADER_MIN: usize = 4;
const HEADER_MAX: usize = 100;

/// Parse generated text into a [`StructuredArticle`].
///
/// Total over its error cases: any input yields an article or one of the
/// [`ParseError`] variants.
pub fn parse(
    raw: &str,
    id: String,
    created_at: DateTime<FixedOffset>,
) -> Result<StructuredArticle, ParseError> {
    let title = find_title(raw).ok_or(ParseError::MissingTitle)?;
    let body = find_body(raw).ok_or(ParseError::MissingBody)?;
    let sections = split_sections(&body);

    Ok(StructuredArticle {
        id,
        title,
        sections,
        created_at,
    })
}

/// Case-insensitive line-anchored prefix match; returns the rest of the line.
fn strip_prefix_ci<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    let line = line.trim_start();
    if line.len() >= prefix.len() && line[..prefix.len()].eq_ignore_ascii_case(prefix) {
        Some(&line[prefix.len()..])
    } else {
        None
    }
}

/// Generators leak markdown residue around the title even when told not to.
fn clean_markup(text: &str) -> String {
    text.replace("**", "").replace('#', "").trim().to_string()
}

fn find_title(raw: &str) -> Option<String> {
    for line in raw.lines() {
        if let Some(rest) = strip_prefix_ci(line, "title:") {
            let title = clean_markup(rest);
            if title.is_empty() {
                return None;
            }
            return Some(title);
        }
    }
    None
}

/// Everything after the first `body:` line; text on that line after the
/// colon belongs to the body.
fn find_body(raw: &str) -> Option<String> {
    let mut offset = 0;
    for line in raw.split_inclusive('\n') {
        let bare = line.trim_end_matches(['\r', '\n']);
        if let Some(rest) = strip_prefix_ci(bare, "body:") {
            let mut body = String::new();
            let rest = rest.trim();
            if !rest.is_empty() {
                body.push_str(rest);
                body.push('\n');
            }
            body.push_str(&raw[offset + line.len()..]);
            return Some(body);
        }
        offset += line.len();
    }
    None
}

/// A header line is a capitalized 4-100 character phrase followed by a single
/// trailing colon, alone on its line.
fn header_name(line: &str) -> Option<String> {
    let name = line.trim().strip_suffix(':')?;
    if name.len() < HEADER_MIN || name.len() > HEADER_MAX {
        return None;
    }
    if !name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        return None;
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '&' | '\''))
    {
        return None;
    }
    Some(name.to_string())
}

/// Two-pass scan: locate header lines in text order, then slice the content
/// between consecutive headers.
fn split_sections(body: &str) -> Vec<Section> {
    let lines: Vec<&str> = body.lines().collect();

    let headers: Vec<(usize, String)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| header_name(line).map(|name| (i, name)))
        .collect();

    let mut sections = Vec::new();

    // Text ahead of the first header keeps its place as an implicit summary.
    let preamble_end = headers.first().map_or(lines.len(), |&(i, _)| i);
    let preamble = lines[..preamble_end].join("\n");
    let preamble = preamble.trim();
    if !preamble.is_empty() {
        sections.push(Section {
            name: PREAMBLE_SECTION.to_string(),
            content: SectionContent::Text(preamble.to_string()),
        });
    }

    for (idx, (line_no, name)) in headers.iter().enumerate() {
        let end = headers.get(idx + 1).map_or(lines.len(), |&(next, _)| next);
        let chunk = lines[line_no + 1..end].join("\n");
        let content = if name.to_ascii_lowercase().contains("takeaway") {
            SectionContent::List(bullet_items(&chunk))
        } else {
            SectionContent::Text(chunk.trim().to_string())
        };
        sections.push(Section {
            name: name.clone(),
            content,
        });
    }

    sections
}

fn bullet_items(chunk: &str) -> Vec<String> {
    chunk
        .lines()
        .map(strip_bullet)
        .filter(|item| !item.is_empty())
        .collect()
}

fn strip_bullet(line: &str) -> String {
    let line = line.trim();
    line.strip_prefix('-')
        .or_else(|| line.strip_prefix('•'))
        .unwrap_or(line)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::market_now;

    fn parse_ok(raw: &str) -> StructuredArticle {
        parse(raw, "test-id".to_string(), market_now()).unwrap()
    }

    #[test]
    fn parses_titled_sections_and_takeaways() {
        let article = parse_ok(
            "title: Rates Rise\nbody:\nThe Facts:\nline1\nline2\nKey Takeaways:\n- a\n- b\n",
        );

        assert_eq!(article.title, "Rates Rise");
        assert_eq!(article.sections.len(), 2);
        assert_eq!(article.sections[0].name, "The Facts");
        assert_eq!(
            article.section("The Facts"),
            Some(&SectionContent::Text("line1\nline2".to_string()))
        );
        assert_eq!(
            article.section("Key Takeaways"),
            Some(&SectionContent::List(vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[test]
    fn missing_title_is_reported() {
        let err = parse("body:\nsome text\n", "id".into(), market_now()).unwrap_err();
        assert_eq!(err, ParseError::MissingTitle);
    }

    #[test]
    fn empty_title_counts_as_missing() {
        let err = parse("title:\nbody:\ntext\n", "id".into(), market_now()).unwrap_err();
        assert_eq!(err, ParseError::MissingTitle);
    }

    #[test]
    fn missing_body_is_reported() {
        let err = parse("title: Markets Stall\nno body here\n", "id".into(), market_now())
            .unwrap_err();
        assert_eq!(err, ParseError::MissingBody);
    }

    #[test]
    fn title_prefix_is_case_insensitive_and_cleaned() {
        let article = parse_ok("TITLE: ## **Fed Holds Steady**\nBody:\ncontent\n");
        assert_eq!(article.title, "Fed Holds Steady");
    }

    #[test]
    fn preamble_becomes_summary_section() {
        let article = parse_ok(
            "title: T1\nbody:\nlead paragraph\nsecond line\nMarket Impact:\ndetail\n",
        );

        assert_eq!(article.sections[0].name, PREAMBLE_SECTION);
        assert_eq!(
            article.sections[0].content,
            SectionContent::Text("lead paragraph\nsecond line".to_string())
        );
        assert_eq!(article.sections[1].name, "Market Impact");
    }

    #[test]
    fn headerless_body_is_one_summary_section() {
        let article = parse_ok("title: T1\nbody: only prose here\nand more\n");
        assert_eq!(article.sections.len(), 1);
        assert_eq!(article.sections[0].name, PREAMBLE_SECTION);
        assert_eq!(
            article.sections[0].content,
            SectionContent::Text("only prose here\nand more".to_string())
        );
    }

    #[test]
    fn unicode_bullets_and_blank_lines_are_stripped() {
        let article = parse_ok(
            "title: T1\nbody:\nMain Takeaways:\n• first\n\n- second\nthird\n",
        );
        assert_eq!(
            article.section("Main Takeaways"),
            Some(&SectionContent::List(vec![
                "first".to_string(),
                "second".to_string(),
                "third".to_string(),
            ]))
        );
    }

    #[test]
    fn header_grammar_is_bounded() {
        // Lowercase start, too short, embedded colon, over-long: none are headers.
        assert!(header_name("facts about rates:").is_none());
        assert!(header_name("Ab:").is_none());
        assert!(header_name("The: Facts:").is_none());
        assert!(header_name(&format!("{}:", "A".repeat(101))).is_none());

        assert_eq!(header_name("The Facts:"), Some("The Facts".to_string()));
        assert_eq!(
            header_name("  Long-Term Consequences:  "),
            Some("Long-Term Consequences".to_string())
        );
    }

    #[test]
    fn mid_sentence_colons_do_not_split_sections() {
        let article = parse_ok(
            "title: T1\nbody:\nThe Facts:\nAnalysts said: rates will rise.\nNote the caveat: inflation.\n",
        );
        assert_eq!(article.sections.len(), 1);
        assert_eq!(
            article.section("The Facts"),
            Some(&SectionContent::Text(
                "Analysts said: rates will rise.\nNote the caveat: inflation.".to_string()
            ))
        );
    }

    #[test]
    fn section_order_follows_text_order() {
        let article = parse_ok(
            "title: T1\nbody:\nMarket Impact:\na\nExpert Roundtable:\nb\nThe Facts:\nc\n",
        );
        let names: Vec<&str> = article.sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Market Impact", "Expert Roundtable", "The Facts"]);
    }

    #[test]
    fn parsing_is_deterministic() {
        let raw = "title: Same\nbody:\nThe Facts:\nsame text\n";
        let a = parse_ok(raw);
        let b = parse_ok(raw);
        assert_eq!(a.title, b.title);
        assert_eq!(a.sections, b.sections);
    }
}
