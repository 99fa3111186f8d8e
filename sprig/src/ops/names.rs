//! Names operation - show the identifier forms for a name.

use sprig_core::InvalidName;

use crate::reports::NamesReport;

/// Execute the names operation.
pub fn names(raw: &str) -> Result<NamesReport, InvalidName> {
    let forms = sprig_core::derive(raw)?;
    Ok(NamesReport {
        raw: raw.to_string(),
        forms,
    })
}
