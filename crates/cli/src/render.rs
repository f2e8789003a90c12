// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text rendering for the terminal.

use shiftboard::{CalendarGrid, HighlightReport, SlotWarning};
use shiftboard_app::Notice;
use shiftboard_domain::{Engineer, Pattern, Period, Shift};
use std::fmt::Write;

const EMPTY_PATTERN_CELL: &str = "—";
const WEEKEND_MARK: &str = "*";

fn warning_mark(warning: SlotWarning) -> char {
    match warning {
        SlotWarning::ThreeShifts => '!',
        SlotWarning::ConsecutiveDays => '+',
    }
}

fn header() -> Vec<String> {
    std::iter::once(String::from("Day"))
        .chain(Shift::ALL.iter().map(|shift| shift.label().to_string()))
        .collect()
}

/// Lays out rows as a `|`-separated table padded to the widest cell.
fn table(rows: &[Vec<String>]) -> String {
    let columns: usize = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out: String = String::new();
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join(" | ").trim_end());
        out.push('\n');
    }
    out
}

/// Renders every workplace of a grid, with weekend and warning markers.
pub fn grid(grid: &CalendarGrid, highlights: &HighlightReport) -> String {
    let period: Period = grid.period();
    let mut out: String = String::new();

    for section in grid.workplaces() {
        let _ = writeln!(
            out,
            "{} - {} {}",
            section.workplace(),
            period.month_name(),
            period.year()
        );
        let mut rows: Vec<Vec<String>> = vec![header()];
        for day in grid.rows() {
            let mut row: Vec<String> = Vec::with_capacity(4);
            row.push(if day.is_weekend {
                format!("{} {WEEKEND_MARK}", day.label)
            } else {
                day.label.clone()
            });
            for shift in Shift::ALL {
                let cell: String = section
                    .slot(day.day(), shift)
                    .map(|slot| {
                        let marks: String =
                            slot.warnings().iter().copied().map(warning_mark).collect();
                        format!("{}{marks}", slot.value().unwrap_or_default())
                    })
                    .unwrap_or_default();
                row.push(cell);
            }
            rows.push(row);
        }
        out.push_str(&table(&rows));
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "{} of {} slots filled. {WEEKEND_MARK} weekend, ! one engineer on all three shifts, + too many consecutive days",
        grid.filled_count(),
        grid.workplaces().len() * usize::from(grid.days_in_month()) * Shift::ALL.len()
    );
    if !highlights.is_clean() {
        let _ = writeln!(
            out,
            "Highlighted: {} three-shift day(s), {} consecutive-day run(s)",
            highlights.three_shift_days, highlights.consecutive_runs
        );
    }
    out
}

/// Renders a pattern as a day table up to its last day.
///
/// Empty cells show as a dash.
pub fn pattern(pattern: &Pattern) -> String {
    let Some(last_day) = pattern.last_day() else {
        return String::from("Pattern is empty\n");
    };
    let mut rows: Vec<Vec<String>> = vec![header()];
    for day in 1..=last_day {
        let mut row: Vec<String> = vec![day.to_string()];
        row.extend(Shift::ALL.iter().map(|&shift| {
            pattern
                .get(day, shift)
                .unwrap_or(EMPTY_PATTERN_CELL)
                .to_string()
        }));
        rows.push(row);
    }
    table(&rows)
}

/// Renders the roster with quotas and limitations.
pub fn roster(engineers: &[Engineer]) -> String {
    if engineers.is_empty() {
        return String::from("No engineers\n");
    }
    let mut rows: Vec<Vec<String>> = vec![
        ["Name", "Workplaces", "Min", "Max", "Limitations"]
            .iter()
            .map(|h| (*h).to_string())
            .collect(),
    ];
    for engineer in engineers {
        let workplaces: Vec<&str> = engineer.workplaces.iter().map(|w| w.name()).collect();
        let limitations: Vec<String> = engineer
            .limitations
            .iter()
            .map(|(day, shifts)| {
                let keys: Vec<&str> = shifts.iter().map(|s| s.key()).collect();
                format!("{day}: {}", keys.join(","))
            })
            .collect();
        rows.push(vec![
            engineer.name.clone(),
            workplaces.join(", "),
            engineer.effective_min_shifts().to_string(),
            engineer.effective_max_shifts().to_string(),
            limitations.join("; "),
        ]);
    }
    table(&rows)
}

/// Renders the current period and the years around it.
pub fn today(current: Period, years: &[i32]) -> String {
    let years: Vec<String> = years.iter().map(ToString::to_string).collect();
    format!(
        "Current period: {} {} ({current})\nSelectable years: {}\n",
        current.month_name(),
        current.year(),
        years.join(", ")
    )
}

/// Renders notices one per line.
pub fn notices(notices: &[Notice]) -> String {
    notices.iter().map(|notice| format!("{notice}\n")).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use shiftboard_domain::Workplace;

    #[test]
    fn test_table_pads_columns() {
        let rows: Vec<Vec<String>> = vec![
            vec![String::from("a"), String::from("bb")],
            vec![String::from("ccc"), String::new()],
        ];
        assert_eq!(table(&rows), "a   | bb\nccc |\n");
    }

    #[test]
    fn test_pattern_uses_dash_for_empty_cells() {
        let mut pattern: Pattern = Pattern::new();
        pattern.insert(1, Shift::First, "A");
        pattern.insert(2, Shift::Third, "B");
        let text: String = super::pattern(&pattern);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Day | Shift 1 | Shift 2 | Shift 3");
        assert_eq!(lines[1], "1   | A       | —       | —");
        assert_eq!(lines[2], "2   | —       | —       | B");
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(super::pattern(&Pattern::new()), "Pattern is empty\n");
    }

    #[test]
    fn test_roster_lists_limitations() {
        let engineer: Engineer = Engineer::new("A", vec![Workplace::new("Lab")])
            .with_quota(10, 12)
            .with_limitation(5, Shift::Second);
        let text: String = roster(&[engineer]);
        assert!(text.contains("A    | Lab        | 10  | 12  | 5: shift2"));
    }

    #[test]
    fn test_today_lists_years() {
        let current: Period = Period::new(1403, 7).unwrap();
        let text: String = today(current, &current.selectable_years(1));
        assert_eq!(
            text,
            "Current period: مهر 1403 (1403-7)\nSelectable years: 1402, 1403, 1404\n"
        );
    }

    #[test]
    fn test_notice_lines() {
        let text: String = notices(&[Notice::new(
            shiftboard_app::NoticeLevel::Success,
            "Schedule saved successfully!",
        )]);
        assert_eq!(text, "[success] Schedule saved successfully!\n");
    }
}
