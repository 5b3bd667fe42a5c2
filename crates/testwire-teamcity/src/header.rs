// SPDX-License-Identifier: MIT OR Apache-2.0
//! Plain-text diagnostic header printed above the first failure in a
//! section scope.

use std::io::{self, Write};

use testwire_events::SectionInfo;

/// Print the test-case-and-section header.
///
/// `sections` is the active stack, outermost first; the outermost
/// entry is the test case itself, so it is named by `test_case_name`
/// rather than repeated, and only its source location is used.
pub(crate) fn print<W: Write>(
    out: &mut W,
    test_case_name: &str,
    sections: &[SectionInfo],
    width: usize,
) -> io::Result<()> {
    writeln!(out, "{}", rule('-', width))?;
    print_wrapped(out, test_case_name, 0, width)?;

    for (depth, section) in sections.iter().skip(1).enumerate() {
        print_wrapped(out, &section.name, 2 * (depth + 1), width)?;
    }

    if let Some(location) = sections.first().and_then(|s| s.location.as_ref()) {
        if !location.is_empty() {
            writeln!(out, "{}", rule('-', width))?;
            writeln!(out, "{location}")?;
        }
    }

    writeln!(out, "{}", rule('.', width))?;
    writeln!(out)
}

/// A horizontal rule one column short of the console width.
fn rule(fill: char, width: usize) -> String {
    String::from(fill).repeat(width.saturating_sub(1))
}

/// Greedy word-wrap at `width`, first line indented by `indent`.
///
/// If the text contains `": "`, continuation lines pick up a hanging
/// indent just past it, so a parametrized name like
/// `"Scenario: lots of nested sections"` wraps with the description
/// aligned under itself.
fn print_wrapped<W: Write>(
    out: &mut W,
    text: &str,
    indent: usize,
    width: usize,
) -> io::Result<()> {
    let limit = width.saturating_sub(1).max(indent + 1);
    // Columns are counted in characters, not bytes, so multibyte names
    // wrap at the console width rather than before it.
    let hanging = indent + text.find(": ").map_or(0, |i| text[..i].chars().count() + 2);
    let mut line = " ".repeat(indent);
    let mut columns = indent;
    let mut has_content = false;

    for word in text.split(' ') {
        let word_columns = word.chars().count();
        if has_content && columns + 1 + word_columns > limit {
            writeln!(out, "{line}")?;
            line = " ".repeat(hanging);
            columns = hanging;
            has_content = false;
        }
        if has_content {
            line.push(' ');
            columns += 1;
        }
        line.push_str(word);
        columns += word_columns;
        has_content = true;
    }
    writeln!(out, "{line}")
}
