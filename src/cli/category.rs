//! Category CLI commands

use crate::display::format_category_list;
use crate::error::TrackerResult;
use crate::models::TransactionKind;

use super::KindArg;

/// Print the fixed category lists, optionally for one kind only
pub fn handle_categories_command(kind: Option<KindArg>) -> TrackerResult<()> {
    let kinds: Vec<TransactionKind> = match kind {
        Some(kind) => vec![kind.into()],
        None => TransactionKind::all().to_vec(),
    };

    print!("{}", format_category_list(&kinds));
    Ok(())
}
