//! Output formatting utilities for the statistics report.

use std::io::{self, Write};

use repostat::StatsError;
use repostat::stats::{AuthorActivity, QueryParams, ResultSet, StateCounts};

/// Writes the human-readable report to the given writer.
///
/// # Errors
///
/// Returns [`StatsError::Io`] when the writer fails.
pub fn write_report_to<W: Write>(
    writer: &mut W,
    params: &QueryParams,
    result: &ResultSet,
) -> Result<(), StatsError> {
    let locator = params.locator();
    writeln!(
        writer,
        "Repository {}/{} (branch {})",
        locator.owner().as_str(),
        locator.repository().as_str(),
        params.branch()
    )
    .map_err(|e| io_error(&e))?;
    writeln!(writer, "Window: {}", describe_window(params)).map_err(|e| io_error(&e))?;

    if let Some(activity) = &result.commit_activity {
        writeln!(writer).map_err(|e| io_error(&e))?;
        write_commit_activity(writer, activity)?;
    }
    if let Some(counts) = &result.pull_requests {
        writeln!(writer).map_err(|e| io_error(&e))?;
        write_counts(writer, "Pull requests", counts)?;
    }
    if let Some(counts) = &result.issues {
        writeln!(writer).map_err(|e| io_error(&e))?;
        write_counts(writer, "Issues", counts)?;
    }

    Ok(())
}

/// Writes the result set as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`StatsError::Io`] when serialisation or the writer fails.
pub fn write_json_to<W: Write>(writer: &mut W, result: &ResultSet) -> Result<(), StatsError> {
    serde_json::to_writer_pretty(&mut *writer, result).map_err(|error| StatsError::Io {
        message: error.to_string(),
    })?;
    writeln!(writer).map_err(|e| io_error(&e))
}

fn describe_window(params: &QueryParams) -> String {
    let bound = |date: Option<chrono::NaiveDate>, open: &str| {
        date.map_or_else(
            || open.to_owned(),
            |day| day.format(repostat::stats::window::DATE_FORMAT).to_string(),
        )
    };
    format!(
        "{} to {}",
        bound(params.begin(), "the beginning"),
        bound(params.end(), "today")
    )
}

fn write_commit_activity<W: Write>(
    writer: &mut W,
    activity: &[AuthorActivity],
) -> Result<(), StatsError> {
    writeln!(writer, "Commit statistics:").map_err(|e| io_error(&e))?;
    if activity.is_empty() {
        return writeln!(writer, "  no commits by linked accounts").map_err(|e| io_error(&e));
    }

    let width = activity
        .iter()
        .map(|entry| entry.author.chars().count())
        .max()
        .unwrap_or_default();
    for entry in activity {
        writeln!(
            writer,
            "  {author:<width$}  {commits}",
            author = entry.author,
            commits = entry.commits
        )
        .map_err(|e| io_error(&e))?;
    }
    Ok(())
}

fn write_counts<W: Write>(
    writer: &mut W,
    heading: &str,
    counts: &StateCounts,
) -> Result<(), StatsError> {
    writeln!(writer, "{heading}:").map_err(|e| io_error(&e))?;
    writeln!(writer, "  open    {}", counts.open).map_err(|e| io_error(&e))?;
    writeln!(writer, "  closed  {}", counts.closed).map_err(|e| io_error(&e))?;
    writeln!(writer, "  old     {}", counts.old).map_err(|e| io_error(&e))
}

/// Converts an I/O error to a [`StatsError::Io`].
pub(crate) fn io_error(error: &io::Error) -> StatsError {
    StatsError::Io {
        message: error.to_string(),
    }
}
