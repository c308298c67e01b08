//! Cleanup of model-generated narrative text before it is laid out.
//!
//! The model is asked for plain numbered prose but routinely returns
//! Markdown decoration, pictographs and stray numbering. The rules run in
//! this order, each over every line:
//!
//! 1. drop characters the PDF font encoding cannot carry (anything above
//!    U+FFFF, emoji variation selectors, joiners, control characters) and
//!    normalize line endings
//! 2. strip leading `#` heading markers; turn horizontal rules into blank
//!    lines
//! 3. strip "主治医コメント：" style labels and drop lines that only restate
//!    the report title, which the renderer draws itself
//! 4. remove `*` / `＊` emphasis markers, keeping a leading `* ` list marker
//! 5. turn `-` / `*` / `•` list markers into `・`, except in front of a
//!    numbered item
//! 6. join a bare `1.` line with the line after it
//! 7. collapse runs of more than two blank lines and trim the ends
//!
//! Later rules can expose input for earlier ones (removing `**` around a
//! label, for instance), so [`sanitize`] repeats the sequence until the text
//! stops changing. That is what makes it idempotent.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

/// Bullet that replaces Markdown list markers.
pub const BULLET: char = '・';

/// Most consecutive blank lines kept in the output.
const MAX_BLANK_RUN: usize = 2;

/// Passes over the rule sequence before giving up on a fixpoint.
///
/// No rule adds decoration. Later passes only pick up markers that an earlier
/// removal exposed, such as a heading behind emphasis, so real input settles
/// by the third or fourth pass.
const MAX_PASSES: usize = 8;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[ \t\u{3000}]*#+[ \t\u{3000}]*)+").expect("heading regex is valid")
});

static RULE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t\u{3000}]*(?:-{3,}|_{3,}|={3,})[ \t\u{3000}]*$")
        .expect("rule regex is valid")
});

static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[ \t\u{3000}]*#+[ \t\u{3000}]*|[ \t\u{3000}]*[【\[]?(?:IT)?(?:主治医|診断|AI)(?:の)?(?:コメント|所見)[】\]]?[ \t\u{3000}]*[:：][ \t\u{3000}]*)+",
    )
    .expect("label regex is valid")
});

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[ \t\u{3000}]*[【\[]?[ \t\u{3000}]*IT主治医(?:診断(?:レポート|結果)?|コメント|カルテ|レポート)(?:[（(][^）)]*[）)])?[ \t\u{3000}]*[】\]]?[ \t\u{3000}]*[:：]?[ \t\u{3000}]*$",
    )
    .expect("title regex is valid")
});

static LIST_STAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([ \t\u{3000}]*\*[ \t\u{3000}]+)(.*)$").expect("list star regex is valid")
});

static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t\u{3000}]*[-*•・][ \t\u{3000}]+(.*)$").expect("bullet regex is valid")
});

static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)．）、]").expect("numbered regex is valid"));

static ORPHAN_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t\u{3000}]*(\d+)[.)．）、][ \t\u{3000}]*$")
        .expect("orphan number regex is valid")
});

/// Clean generated narrative text for rendering.
pub fn sanitize(raw: &str) -> String {
    match settle(raw) {
        Ok((text, _)) => text,
        Err(text) => {
            warn!(passes = MAX_PASSES, "narrative sanitizer did not settle");
            text
        }
    }
}

/// Run the rules until the text stops changing. Returns the text and the
/// number of passes that changed it, or the last text if it had not settled
/// within the pass limit.
pub fn settle(raw: &str) -> Result<(String, usize), String> {
    let mut current = apply_rules(raw);
    for pass in 1..MAX_PASSES {
        let next = apply_rules(&current);
        if next == current {
            return Ok((current, pass));
        }
        current = next;
    }
    Err(current)
}

/// Whether the PDF font encoding can carry `c`.
pub fn is_renderable(c: char) -> bool {
    u32::from(c) <= 0xFFFF
        && !c.is_control()
        && !matches!(c, '\u{200D}' | '\u{FE00}'..='\u{FE0F}' | '\u{FEFF}')
}

/// Drop every character [`is_renderable`] rejects. Used directly for text
/// that does not go through [`sanitize`], such as category labels.
pub fn retain_renderable(text: &str) -> String {
    text.chars().filter(|&c| is_renderable(c)).collect()
}

fn apply_rules(text: &str) -> String {
    let lines = split_renderable_lines(text);
    let lines = strip_headings(lines);
    let lines = strip_title_lines(lines);
    let lines = strip_emphasis(lines);
    let lines = normalize_bullets(lines);
    let lines = rejoin_numbered(lines);
    collapse_blank_lines(lines)
}

fn split_renderable_lines(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .split('\n')
        .map(|line| {
            retain_renderable(&line.replace('\t', " "))
                .trim_end()
                .to_string()
        })
        .collect()
}

fn strip_headings(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            if RULE_RE.is_match(&line) {
                String::new()
            } else {
                HEADING_RE.replace(&line, "").into_owned()
            }
        })
        .collect()
}

fn strip_title_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .filter_map(|line| {
            let stripped = LABEL_RE.replace(&line, "");
            // A label with nothing after it is a title line of its own.
            if stripped.len() != line.len() && stripped.trim().is_empty() {
                return None;
            }
            if TITLE_RE.is_match(&stripped) {
                return None;
            }
            Some(stripped.into_owned())
        })
        .collect()
}

fn strip_emphasis(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            let kept_marker = LIST_STAR_RE
                .captures(&line)
                .map(|caps| format!("{}{}", &caps[1], remove_asterisks(&caps[2])));
            kept_marker.unwrap_or_else(|| remove_asterisks(&line))
        })
        .collect()
}

fn remove_asterisks(text: &str) -> String {
    let removed: String = text.chars().filter(|c| !matches!(c, '*' | '＊')).collect();
    removed.trim_end().to_string()
}

fn normalize_bullets(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| {
            let replaced = BULLET_RE.captures(&line).map(|caps| {
                let body = &caps[1];
                if NUMBERED_RE.is_match(body) {
                    body.to_string()
                } else {
                    format!("{BULLET}{body}")
                }
            });
            replaced.unwrap_or(line)
        })
        .collect()
}

fn rejoin_numbered(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut iter = lines.into_iter().peekable();

    while let Some(line) = iter.next() {
        let number = ORPHAN_NUMBER_RE
            .captures(&line)
            .map(|caps| caps[1].to_string());

        match number {
            Some(n) if iter.peek().is_some_and(|next| !next.trim().is_empty()) => {
                let body = iter.next().unwrap_or_default();
                out.push(format!("{n}. {}", body.trim_start()));
            }
            _ => out.push(line),
        }
    }

    out
}

fn collapse_blank_lines(lines: Vec<String>) -> String {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut blank_run = 0;

    for line in lines {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run <= MAX_BLANK_RUN {
                out.push(String::new());
            }
        } else {
            blank_run = 0;
            out.push(line);
        }
    }

    out.join("\n").trim().to_string()
}
