use crate::api::{EpisodeTitleMap, SearchPage, SubjectMetadata};
use crate::rename::{ExecutionReport, RenamePlan};
use std::io::{self, Write};

/// Display subject details and its episode list
pub fn display_subject(
    subject: &SubjectMetadata,
    episodes: &EpisodeTitleMap,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Title:    {}", subject.display_title())?;
    if !subject.name_cn.is_empty() && subject.name_cn != subject.name {
        writeln!(writer, "Original: {}", subject.name)?;
    }
    if let Some(date) = subject.air_date {
        writeln!(writer, "Aired:    {}", date.format("%Y-%m-%d"))?;
    }
    if let Some(total) = subject.total_episodes.filter(|n| *n > 0) {
        writeln!(writer, "Length:   {} episodes", total)?;
    }
    if let Some(rating) = &subject.rating {
        match rating.rank {
            Some(rank) => writeln!(
                writer,
                "Rating:   {:.1} ({} votes, rank #{})",
                rating.score, rating.total, rank
            )?,
            None => writeln!(writer, "Rating:   {:.1} ({} votes)", rating.score, rating.total)?,
        }
    }
    if !subject.tags.is_empty() {
        let tags: Vec<&str> = subject.tags.iter().take(10).map(String::as_str).collect();
        writeln!(writer, "Tags:     {}", tags.join(", "))?;
    }

    writeln!(writer)?;
    if subject.summary.trim().is_empty() {
        writeln!(writer, "No summary available.")?;
    } else {
        writeln!(writer, "{}", subject.summary.trim())?;
    }

    writeln!(writer)?;
    if episodes.is_empty() {
        writeln!(writer, "No episode titles found.")?;
    } else {
        writeln!(writer, "Episodes:")?;
        for (number, title) in episodes.iter() {
            writeln!(writer, "  {:>3}. {}", number, title)?;
        }
    }

    Ok(())
}

/// Display one page of search results, numbered for selection
pub fn display_search_page(page: &SearchPage, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;

    if page.results.is_empty() {
        writeln!(writer, "No results.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "Page {}/{} ({} results)",
        page.page, page.total_pages, page.total_results
    )?;

    for (i, result) in page.results.iter().enumerate() {
        let aired = result.air_date.as_deref().unwrap_or("unknown");
        writeln!(
            writer,
            "  {:>2}. {} [id {}, aired {}]",
            i + 1,
            result.display_title(),
            result.id,
            aired
        )?;
    }

    Ok(())
}

/// Display the rename preview, including files that will be left alone
pub fn display_plan(plan: &RenamePlan, dry_run: bool, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    if dry_run {
        writeln!(writer, "              DRY RUN")?;
    } else {
        writeln!(writer, "           RENAME PREVIEW")?;
    }
    writeln!(writer, "========================================")?;
    writeln!(writer)?;

    if !plan.skipped.is_empty() {
        writeln!(writer, "Skipped files:")?;
        for skipped in &plan.skipped {
            writeln!(writer, "  - {} ({})", skipped.name, skipped.reason.description())?;
        }
        writeln!(writer)?;
    }

    if plan.entries.is_empty() {
        writeln!(writer, "No files to rename.")?;
        return Ok(());
    }

    writeln!(writer, "Planned changes:")?;
    writeln!(writer)?;

    for (i, entry) in plan.entries.iter().enumerate() {
        writeln!(writer, "  {}. From: {}", i + 1, entry.original_name)?;
        writeln!(writer, "     To:   {}", entry.proposed_name)?;
    }

    writeln!(writer)?;
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(writer, "  {} files would be renamed", plan.len())?;
    if plan.skipped_count() > 0 {
        writeln!(writer, "  {} files skipped", plan.skipped_count())?;
    }

    if dry_run {
        writeln!(writer)?;
        writeln!(writer, "Run without --dry to apply these changes.")?;
    }

    Ok(())
}

/// Display execution results
pub fn display_execution_report(report: &ExecutionReport, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;

    for failure in &report.failed {
        writeln!(
            writer,
            "Failed: {} -> {} ({})",
            failure.entry.original_name, failure.entry.proposed_name, failure.message
        )?;
    }

    writeln!(writer, "Successfully renamed {} files.", report.renamed.len())?;

    if !report.failed.is_empty() {
        writeln!(writer, "  {} renames failed.", report.failed.len())?;
    }

    Ok(())
}
