use super::Cli;
use crate::compare::Counts;
use crate::config::TextEncoding;
use colored::Colorize;

const RULE_WIDTH: usize = 40;

/// Display names of the two inputs.
pub(super) struct Names {
    pub before: String,
    pub after: String,
}

pub(super) fn print_text(names: &Names, counts: &Counts) {
    let rule = "-".repeat(RULE_WIDTH);

    println!("{}", "Comparison Summary".bold());
    println!("{}", rule.dimmed());

    println!("{}", "Duplicates within a file".bold());
    println!(
        "  {} {}",
        format!("Duplicated lines in '{}':", names.before).dimmed(),
        counts.duplicates_in_first.to_string().yellow()
    );
    println!(
        "  {} {}",
        format!("Duplicated lines in '{}':", names.after).dimmed(),
        counts.duplicates_in_second.to_string().yellow()
    );
    println!();

    println!("{}", "Between files".bold());
    println!(
        "  {} {}",
        format!("Only in '{}':", names.before).dimmed(),
        counts.only_in_first.to_string().red()
    );
    println!(
        "  {} {}",
        format!("Only in '{}':", names.after).dimmed(),
        counts.only_in_second.to_string().green()
    );
    println!(
        "  {} {}",
        "In both files:".dimmed(),
        counts.in_both.to_string().cyan()
    );
    println!("{}", rule.dimmed());
}

pub(super) fn print_json(cli: &Cli, encoding: TextEncoding, counts: &Counts) {
    let output = serde_json::json!({
        "before": cli.before.display().to_string(),
        "after": cli.after.display().to_string(),
        "output_dir": cli.output_dir.display().to_string(),
        "encoding": encoding.name(),
        "counts": counts,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&output).expect("failed to serialize JSON output")
    );
}
