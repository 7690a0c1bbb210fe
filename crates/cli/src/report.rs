use rapport_assessment::Report;

const MAX_NAME_CHARS: usize = 40;

pub fn render_markdown_report(report: &Report) -> String {
    let p1 = one_line(&report.partner1, MAX_NAME_CHARS);
    let p2 = one_line(&report.partner2, MAX_NAME_CHARS);
    let overall = report.overall();

    let mut md = String::new();
    md.push_str(&format!("# Rapport report: {p1} & {p2}\n\n"));
    md.push_str(&format!(
        "- Overall: {p1} `{:.2}` / {p2} `{:.2}` (out of 5)\n",
        overall.partner1, overall.partner2
    ));
    md.push_str(&format!("- Categories: `{}`\n\n", report.scores.len()));

    md.push_str("## Scores\n\n");
    md.push_str(&format!(
        "| category | {} | {} | alignment |\n",
        escape_cell(&p1),
        escape_cell(&p2)
    ));
    md.push_str("|---|---:|---:|---|\n");
    for score in &report.scores {
        md.push_str(&format!(
            "| {} | `{:.2}` | `{:.2}` | {} |\n",
            escape_cell(score.category.name()),
            score.partner1_score,
            score.partner2_score,
            score.alignment.label()
        ));
    }
    md.push('\n');

    md.push_str("## Insights\n\n");
    for score in &report.scores {
        md.push_str(&format!("### {}\n\n", score.category.title()));
        md.push_str(&format!("{}\n\n", score.insight.reflection));
        if let Some(action) = &score.insight.action {
            md.push_str(&format!("**Next step:** {action}\n\n"));
        }
    }

    let [first, second] = report.summary.paragraphs();
    md.push_str("## Summary\n\n");
    md.push_str(&format!("{first}\n\n{second}\n\n{}\n", report.summary.closing));

    md
}

fn one_line(text: &str, max_chars: usize) -> String {
    let s = text
        .replace(['\n', '\r', '\t'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if s.chars().count() <= max_chars {
        return s;
    }
    let truncated: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{truncated}…")
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapport_assessment::{AnswerSet, Catalog};
    use rapport_codec::unpack;

    fn report(p1: char, p2: char) -> Report {
        let catalog = Catalog::standard();
        let answers = |c: char| -> AnswerSet { unpack(&c.to_string().repeat(catalog.len())) };
        Report::build(catalog, "Ana", &answers(p1), "Ben | Co", &answers(p2))
    }

    #[test]
    fn renders_headers_and_one_row_per_category() {
        let md = render_markdown_report(&report('5', '5'));
        assert!(md.starts_with("# Rapport report: Ana & Ben | Co\n"));
        assert!(md.contains("| category | Ana | Ben \\| Co | alignment |"));
        assert_eq!(md.matches("| Aligned |").count(), 12);
        assert!(md.contains("- Overall: Ana `5.00` / Ben | Co `5.00`"));
        assert!(md.contains("## Summary"));
    }

    #[test]
    fn misaligned_report_lists_next_steps() {
        let md = render_markdown_report(&report('5', '1'));
        assert_eq!(md.matches("| Misaligned |").count(), 12);
        assert!(md.contains("**Next step:**"));
        assert!(md.contains("The primary threat to your long-term harmony"));
    }

    #[test]
    fn long_names_are_shortened() {
        let name = "x".repeat(80);
        assert_eq!(one_line(&name, 10).chars().count(), 10);
        assert_eq!(one_line("a\n b\tc", 10), "a b c");
    }
}
