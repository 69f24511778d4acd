use crate::cli::output;
use crate::domain::ExpenseRecord;

const NAME_WIDTH: usize = 24;
const CATEGORY_WIDTH: usize = 14;

pub(crate) fn print_items(items: &[ExpenseRecord]) {
    output::section("Expenses");
    for row in rows(items) {
        output::line(row);
    }
}

pub(crate) fn rows(items: &[ExpenseRecord]) -> Vec<String> {
    if items.is_empty() {
        return vec![String::from("  (no expenses)")];
    }
    let mut rows: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(index, record)| {
            format!(
                "  {:>3}. {:<name$} {:<category$} {:>10.2}",
                index + 1,
                clip(record.name(), NAME_WIDTH),
                clip(record.category(), CATEGORY_WIDTH),
                record.amount(),
                name = NAME_WIDTH,
                category = CATEGORY_WIDTH,
            )
        })
        .collect();
    let total: f64 = items.iter().map(ExpenseRecord::amount).sum();
    rows.push(format!(
        "       {:<name$} {:<category$} {:>10.2}",
        "Total",
        "",
        total,
        name = NAME_WIDTH,
        category = CATEGORY_WIDTH,
    ));
    rows
}

fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
        clipped.push('~');
        clipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_has_placeholder_row() {
        assert_eq!(rows(&[]), vec!["  (no expenses)".to_string()]);
    }

    #[test]
    fn rows_are_numbered_from_one_with_total() {
        let items = vec![
            ExpenseRecord::new("Lunch", "personal", 5.0),
            ExpenseRecord::new("Taxi", "travel", 12.0),
        ];
        let rows = rows(&items);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].trim_start().starts_with("1. Lunch"));
        assert!(rows[1].trim_start().starts_with("2. Taxi"));
        assert!(rows[2].contains("Total") && rows[2].ends_with("17.00"));
    }

    #[test]
    fn long_names_are_clipped() {
        assert_eq!(clip("abcdef", 4), "abc~");
        assert_eq!(clip("abc", 4), "abc");
    }
}
