use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::CaseResult;

#[allow(clippy::cast_precision_loss)]
fn success_rate(passed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (passed as f64 / total as f64) * 100.0
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[CaseResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Puzzle Sweep Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "=======================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = total - passed;

    writeln!(out, "Total puzzles: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", failed.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(passed, total))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(out, "{status} {}", result.label().bold())?;
        if result.played_as != result.difficulty {
            writeln!(out, "   Played as: {}", result.played_as)?;
        }
        writeln!(out, "   Seed: {}", result.seed)?;
        writeln!(out, "   Route: {}", result.route.join(" -> "))?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
    }

    if let (Some(fastest), Some(slowest)) = (
        results.iter().min_by_key(|r| r.duration),
        results.iter().max_by_key(|r| r.duration),
    ) {
        writeln!(out)?;
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Fastest: {} ({:?})",
            fastest.label().green(),
            fastest.duration
        )?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            slowest.label().yellow(),
            slowest.duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[CaseResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[CaseResult]) -> Result<()> {
    writeln!(out, "# Waypoint Puzzle Sweep\n")?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total puzzles**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(
        out,
        "- **Success rate**: {:.1}%\n",
        success_rate(passed, total)
    )?;

    writeln!(out, "## Detailed Results\n")?;
    writeln!(out, "| Status | Date | Difficulty | Route |")?;
    writeln!(out, "| --- | --- | --- | --- |")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "| {status} | {} | {} | {} |",
            result.date,
            result.played_as,
            result.route.join(" → ")
        )?;
    }

    let failing: Vec<&CaseResult> = results.iter().filter(|r| !r.passed).collect();
    if !failing.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for result in failing {
            writeln!(out, "### {}\n", result.label())?;
            for failure in &result.failures {
                writeln!(out, "- {failure}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use waypoint_game::Difficulty;

    fn sample(passed: bool) -> CaseResult {
        CaseResult {
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            difficulty: Difficulty::Medium,
            played_as: Difficulty::Medium,
            seed: "2025-06-012".to_string(),
            route: vec!["Lyon".to_string(), "Geneva".to_string()],
            passed,
            failures: if passed {
                Vec::new()
            } else {
                vec!["stop 1 repeats a clue type".to_string()]
            },
            duration: Duration::from_millis(3),
        }
    }

    #[test]
    fn markdown_lists_failures() {
        let mut buf = Vec::new();
        generate_markdown_report(&mut buf, &[sample(true), sample(false)]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("**Failed**: 1"));
        assert!(text.contains("Lyon → Geneva"));
        assert!(text.contains("- stop 1 repeats a clue type"));
    }

    #[test]
    fn json_round_trips_fields() {
        let mut buf = Vec::new();
        generate_json_report(&mut buf, &[sample(true)]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["difficulty"], "medium");
        assert_eq!(value[0]["passed"], true);
    }

    #[test]
    fn console_report_handles_empty_input() {
        let mut buf = Vec::new();
        generate_console_report(&mut buf, &[], Duration::ZERO).unwrap();
        assert!(String::from_utf8_lossy(&buf).contains("Total puzzles: 0"));
    }
}
