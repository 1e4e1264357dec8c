//! Category list display

use crate::models::TransactionKind;

/// List the categories for the given kinds, one heading per kind
pub fn format_category_list(kinds: &[TransactionKind]) -> String {
    let mut output = String::new();

    for (i, kind) in kinds.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("{} categories:\n", kind));
        for category in kind.categories() {
            output.push_str(&format!("  {}\n", category));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_category_list() {
        let output = format_category_list(&TransactionKind::all());
        assert!(output.starts_with("Income categories:\n  Salary\n"));
        assert!(output.contains("Expense categories:\n  Food\n"));
        assert!(output.contains("  Healthcare\n"));
    }

    #[test]
    fn test_single_kind() {
        let output = format_category_list(&[TransactionKind::Expense]);
        assert!(!output.contains("Salary"));
    }
}
