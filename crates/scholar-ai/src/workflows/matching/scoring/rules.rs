//! Criterion-level checks shared by the match and rank scorers.

/// Assessment-form income brackets, ascending. The top bracket has no upper
/// bound, so it never fits under a scholarship's income ceiling.
pub(crate) struct IncomeBracket {
    pub(crate) label: &'static str,
    pub(crate) upper_bound: Option<f64>,
}

pub(crate) const INCOME_BRACKETS: [IncomeBracket; 5] = [
    IncomeBracket {
        label: "Below 10,000",
        upper_bound: Some(10_000.0),
    },
    IncomeBracket {
        label: "10,000 - 20,000",
        upper_bound: Some(20_000.0),
    },
    IncomeBracket {
        label: "20,001 - 30,000",
        upper_bound: Some(30_000.0),
    },
    IncomeBracket {
        label: "30,001 - 40,000",
        upper_bound: Some(40_000.0),
    },
    IncomeBracket {
        label: "Above 40,000",
        upper_bound: None,
    },
];

pub(crate) fn safe_numeric(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Case-insensitive substring containment in either direction, so
/// "Computer Science" satisfies an eligible-course entry of "BS Computer
/// Science" and vice versa.
fn permits(list: &[String], value: &str) -> bool {
    let needle = value.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    list.iter().any(|entry| {
        let entry = entry.trim().to_lowercase();
        !entry.is_empty() && (entry.contains(&needle) || needle.contains(&entry))
    })
}

pub(crate) fn course_permits(eligible_courses: &[String], course: &str) -> bool {
    permits(eligible_courses, course)
}

pub(crate) fn year_level_permits(eligible_year_levels: &[String], year_level: &str) -> bool {
    permits(eligible_year_levels, year_level)
}

fn bracket_index(label: &str) -> Option<usize> {
    INCOME_BRACKETS
        .iter()
        .position(|bracket| bracket.label.eq_ignore_ascii_case(label.trim()))
}

/// Maps an income bracket to a 0-100 need score: the lowest bracket scores
/// 100, the highest 0, with even steps between. Unknown labels score the
/// neutral 50.
pub(crate) fn financial_need_score(label: &str) -> f64 {
    match bracket_index(label) {
        Some(index) => {
            let last = INCOME_BRACKETS.len() - 1;
            (last - index) as f64 * (100.0 / last as f64)
        }
        None => 50.0,
    }
}

/// Whether the bracket fits under a scholarship's income ceiling. No
/// ceiling, or an unrecognized bracket label, counts as within.
pub(crate) fn bracket_within_ceiling(label: &str, ceiling: Option<f64>) -> bool {
    let Some(ceiling) = ceiling else {
        return true;
    };
    match bracket_index(label) {
        Some(index) => match INCOME_BRACKETS[index].upper_bound {
            Some(upper) => upper <= ceiling,
            None => false,
        },
        None => true,
    }
}

/// True when the scholarship lists no required skills, or any required
/// skill appears in the student's free-text skills.
pub(crate) fn skills_covered(required: &[String], skills_text: &str) -> bool {
    if required.is_empty() {
        return true;
    }
    let haystack = skills_text.to_lowercase();
    required.iter().any(|skill| {
        let skill = skill.trim().to_lowercase();
        !skill.is_empty() && haystack.contains(&skill)
    })
}
