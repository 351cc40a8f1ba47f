use crate::domain::model::FlowCellCheckReport;
use crate::utils::error::Result;
use std::io::{self, Write};

/// Prints the result of a flow cell check and returns the process exit code.
///
/// The report and the two instrument-state messages go to `out`. Everything
/// else is a failure of the client and goes to `err` with a recovery hint.
pub fn write_outcome<O, E>(
    result: Result<FlowCellCheckReport>,
    out: &mut O,
    err: &mut E,
) -> io::Result<i32>
where
    O: Write,
    E: Write,
{
    let e = match result {
        Ok(report) => {
            write!(out, "{}", report)?;
            out.flush()?;
            return Ok(0);
        }
        Err(e) => e,
    };

    if e.is_instrument_state() {
        writeln!(out, "{}", e)?;
        out.flush()?;
    } else {
        tracing::error!("❌ start-flow-cell-check failed: {}", e);
        writeln!(err, "❌ {}", e.user_friendly_message())?;
        let suggestion = e.recovery_suggestion();
        if !suggestion.is_empty() {
            writeln!(err, "💡 {}", suggestion)?;
        }
        err.flush()?;
    }
    Ok(e.exit_code())
}
