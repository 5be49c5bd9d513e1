use anyhow::{Context, Result, bail};
use chrono::{Days, Local, NaiveDate};
use std::collections::BTreeSet;
use waypoint_game::Difficulty;

/// Resolve CLI date tokens into a sorted, de-duplicated sweep.
///
/// Each token is an ISO date or `today`; every start date is followed by
/// `days - 1` consecutive days.
pub fn resolve_dates(tokens: &[String], days: u32) -> Result<Vec<NaiveDate>> {
    let mut dates = BTreeSet::new();
    let span = u64::from(days.max(1));
    for token in tokens {
        let start = if token.eq_ignore_ascii_case("today") {
            Local::now().date_naive()
        } else {
            NaiveDate::parse_from_str(token, "%Y-%m-%d")
                .with_context(|| format!("Unrecognized date: {token}"))?
        };
        for offset in 0..span {
            let day = start
                .checked_add_days(Days::new(offset))
                .with_context(|| format!("date overflow after {start}"))?;
            dates.insert(day);
        }
    }
    if dates.is_empty() {
        bail!("no dates to sweep");
    }
    Ok(dates.into_iter().collect())
}

/// Parse difficulty keys. Festive puzzles are chosen by date, so the key is
/// rejected here.
pub fn resolve_difficulties(tokens: &[String]) -> Result<Vec<Difficulty>> {
    let mut resolved: Vec<Difficulty> = Vec::new();
    for token in tokens {
        let difficulty = Difficulty::from_key(token)
            .with_context(|| format!("Unrecognized difficulty: {token}"))?;
        if difficulty == Difficulty::Festive {
            bail!("festive puzzles are selected by date; request easy, medium or hard");
        }
        if !resolved.contains(&difficulty) {
            resolved.push(difficulty);
        }
    }
    if resolved.is_empty() {
        bail!("no difficulties to sweep");
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn dates_expand_and_dedupe() {
        let dates = resolve_dates(&tokens(&["2025-06-02", "2025-06-01"]), 3).unwrap();
        let rendered: Vec<String> = dates.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            ["2025-06-01", "2025-06-02", "2025-06-03", "2025-06-04"]
        );
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = resolve_dates(&tokens(&["June 1st"]), 1).unwrap_err();
        assert!(err.to_string().contains("June 1st"));
    }

    #[test]
    fn difficulties_parse_case_insensitively() {
        let parsed = resolve_difficulties(&tokens(&["EASY", "hard", "easy"])).unwrap();
        assert_eq!(parsed, vec![Difficulty::Easy, Difficulty::Hard]);
        assert!(resolve_difficulties(&tokens(&["festive"])).is_err());
        assert!(resolve_difficulties(&tokens(&["nightmare"])).is_err());
    }
}
