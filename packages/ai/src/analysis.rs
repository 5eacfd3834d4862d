// ABOUTME: Parser for analysis replies in the Summary / Insights / Recommendations format
// ABOUTME: Tolerates numbering, bullets and multi-line summaries

use finadvisor_documents::DocumentAnalysis;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Summary,
    Insights,
    Recommendations,
}

const SUMMARY_MARKERS: [&str; 1] = ["Summary:"];
const INSIGHT_MARKERS: [&str; 2] = ["Key Insights:", "Key Risk Factors:"];
const RECOMMENDATION_MARKERS: [&str; 2] = ["Recommendations:", "Risk Mitigation Recommendations:"];

/// Split a model reply into summary, insights and recommendations.
///
/// A header only counts at the start of a line, optionally after numbering
/// such as `2.` or `3)`. Lines before the first header are ignored. Inside the
/// insight and recommendation sections only list items count; inside the
/// summary every non-empty line is appended.
pub fn parse_analysis(text: &str) -> DocumentAnalysis {
    let mut summary = String::new();
    let mut insights = Vec::new();
    let mut recommendations = Vec::new();
    let mut section: Option<Section> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(rest) = header_rest(line, &SUMMARY_MARKERS) {
            section = Some(Section::Summary);
            summary = rest.to_string();
            continue;
        }
        if let Some(rest) = header_rest(line, &INSIGHT_MARKERS) {
            section = Some(Section::Insights);
            push_item(&mut insights, rest);
            continue;
        }
        if let Some(rest) = header_rest(line, &RECOMMENDATION_MARKERS) {
            section = Some(Section::Recommendations);
            push_item(&mut recommendations, rest);
            continue;
        }

        match section {
            Some(Section::Summary) => {
                if !summary.is_empty() {
                    summary.push(' ');
                }
                summary.push_str(line);
            }
            Some(Section::Insights) if is_list_item(line) => push_item(&mut insights, line),
            Some(Section::Recommendations) if is_list_item(line) => {
                push_item(&mut recommendations, line)
            }
            _ => {}
        }
    }

    DocumentAnalysis {
        summary,
        insights,
        recommendations,
    }
}

fn header_rest<'a>(line: &'a str, markers: &[&str]) -> Option<&'a str> {
    let unnumbered = strip_numbering(line).unwrap_or(line);
    markers
        .iter()
        .find_map(|marker| unnumbered.strip_prefix(marker))
        .map(str::trim)
}

/// The text after a leading `12.` or `12)` followed by whitespace. A value
/// such as `1.5%` is not numbering.
fn strip_numbering(line: &str) -> Option<&str> {
    let after_digits = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if after_digits.len() == line.len() {
        return None;
    }
    let rest = after_digits
        .strip_prefix('.')
        .or_else(|| after_digits.strip_prefix(')'))?;
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim_start())
}

fn is_list_item(line: &str) -> bool {
    line.starts_with("- ")
        || line.starts_with("* ")
        || line.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Store an item without its list marker. Only one marker is removed, so
/// text such as "80C limits" or "15% CAGR" keeps its leading number.
fn push_item(items: &mut Vec<String>, raw: &str) {
    let cleaned = raw
        .strip_prefix("- ")
        .or_else(|| raw.strip_prefix("* "))
        .or_else(|| strip_numbering(raw))
        .unwrap_or(raw)
        .trim();
    if !cleaned.is_empty() {
        items.push(cleaned.to_string());
    }
}
