//! Audit log viewer

use crate::audit::AuditLogger;
use crate::error::FintrackResult;

pub fn handle_audit_command(logger: &AuditLogger, count: usize) -> FintrackResult<()> {
    let entries = logger.read_recent(count)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }
    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
