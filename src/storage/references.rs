use regex::{Captures, Regex};
use std::sync::LazyLock;

static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<qualifier>(?P<sheet>[A-Za-z_][A-Za-z0-9_]*|'[^']+')!)?(?P<column>\$?[A-Z]{1,3})(?P<absolute>\$?)(?P<row>\d+)")
        .expect("reference pattern is a valid regex")
});

/// A structural edit of a sheet that moves the rows below it.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RowShift {
    Inserted { at: usize, count: usize },
    Deleted { at: usize, count: usize }
}

impl RowShift {
    /// New number of `row` after the edit, or `None` when the row was deleted.
    pub fn apply(&self, row: usize) -> Option<usize> {
        match *self {
            RowShift::Inserted { at, count } if row >= at => Some(row + count),
            RowShift::Inserted { .. } => Some(row),
            RowShift::Deleted { at, .. } if row < at => Some(row),
            RowShift::Deleted { at, count } if row < at + count => None,
            RowShift::Deleted { count, .. } => Some(row - count)
        }
    }
}

/// Rewrites the A1 references of `formula` whose sheet qualifier satisfies `targets`.
///
/// `targets` receives the unquoted sheet name, or `None` for an unqualified reference.
/// References into deleted rows become `#REF!`.
pub fn shift_references(formula: &str, shift: RowShift, targets: impl Fn(Option<&str>) -> bool) -> String {
    REFERENCE.replace_all(formula, |captures: &Captures| {
        let whole = &captures[0];

        if !is_reference(formula, captures) {
            return whole.to_string();
        }

        let sheet = captures.name("sheet").map(|sheet| sheet.as_str().trim_matches('\''));
        if !targets(sheet) {
            return whole.to_string();
        }

        let Ok(row) = captures["row"].parse::<usize>() else {
            return whole.to_string();
        };

        match shift.apply(row) {
            Some(row) => format!(
                "{}{}{}{}",
                captures.name("qualifier").map_or("", |qualifier| qualifier.as_str()),
                &captures["column"],
                &captures["absolute"],
                row
            ),
            None => "#REF!".to_string()
        }
    }).into_owned()
}

// Function names such as LOG10( and identifiers such as X_A1 look like references.
fn is_reference(formula: &str, captures: &Captures) -> bool {
    let Some(whole) = captures.get(0) else {
        return false;
    };

    let before = formula[..whole.start()].chars().next_back();
    let after = formula[whole.end()..].chars().next();

    let glued_before = before.is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.');
    let glued_after = after.is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '(');

    !glued_before && !glued_after
}
