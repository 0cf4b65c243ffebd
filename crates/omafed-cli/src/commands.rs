use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use omafed_core::{
    discover, find_named, Acquirer, Item, RewriteReport, Rewriter, RuleSet, ScriptFilter,
};
use omafed_term::{AppStateProps, ConvertScope, SessionOutcome};

pub struct InteractiveOptions {
    pub repo_dir: PathBuf,
    pub filter: ScriptFilter,
    pub window_size: usize,
    pub scope: ConvertScope,
    pub skip_clone: bool,
}

/// Acquire, pick, convert. Cancelling leaves every file as it was.
pub async fn run_interactive(
    acquirer: &dyn Acquirer,
    options: InteractiveOptions,
    out: &mut impl Write,
) -> Result<()> {
    let items = prepare_items(acquirer, &options)?;

    std::panic::set_hook(Box::new(|panic_info| {
        omafed_term::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let outcome = omafed_term::run(AppStateProps {
        items,
        window_size: options.window_size,
        repo_dir: options.repo_dir.display().to_string(),
        scope: options.scope,
        show_welcome: true,
    })
    .await?;

    finish_session(outcome, &options, out)
}

pub fn prepare_items(acquirer: &dyn Acquirer, options: &InteractiveOptions) -> Result<Vec<Item>> {
    if options.skip_clone {
        log::info!("Skipping clone, using {}", options.repo_dir.display());
    } else {
        acquirer.acquire(&options.repo_dir)?;
    }

    let items = discover(&options.repo_dir, &options.filter)?;
    log::info!(
        "Found {} script(s) in {}",
        items.len(),
        options.repo_dir.display()
    );
    Ok(items)
}

pub fn finish_session(
    outcome: SessionOutcome,
    options: &InteractiveOptions,
    out: &mut impl Write,
) -> Result<()> {
    let selected = match outcome {
        SessionOutcome::Cancelled => {
            writeln!(out, "Thanks for using. Bye!")?;
            return Ok(());
        }
        SessionOutcome::Confirmed(selected) => selected,
    };

    writeln!(out, "Keeping {} application(s):", selected.len())?;
    for item in &selected {
        writeln!(out, "  {}", item.name)?;
    }

    let kept = kept_paths(options, &selected)?;
    convert(&options.repo_dir, &options.filter, &kept, out)
}

/// Files a conversion must leave alone for the configured scope. A kept name
/// keeps every script carrying it, not only the one the picker listed.
pub fn kept_paths(options: &InteractiveOptions, selected: &[Item]) -> Result<HashSet<PathBuf>> {
    match options.scope {
        ConvertScope::All => Ok(HashSet::new()),
        ConvertScope::Unselected => {
            let names = selected.iter().map(|item| item.name.clone()).collect();
            Ok(find_named(&options.repo_dir, &options.filter, &names)?)
        }
    }
}

pub fn run_convert(dir: &Path, filter: &ScriptFilter, out: &mut impl Write) -> Result<()> {
    convert(dir, filter, &HashSet::new(), out)
}

pub fn run_list(dir: &Path, filter: &ScriptFilter, out: &mut impl Write) -> Result<()> {
    for item in discover(dir, filter)? {
        writeln!(out, "{}\t{}", item.name, item.source_path.display())?;
    }
    Ok(())
}

pub fn run_clone(acquirer: &dyn Acquirer, dest: &Path, out: &mut impl Write) -> Result<()> {
    acquirer.acquire(dest)?;
    writeln!(out, "Cloned into {}", dest.display())?;
    Ok(())
}

fn convert(
    dir: &Path,
    filter: &ScriptFilter,
    kept: &HashSet<PathBuf>,
    out: &mut impl Write,
) -> Result<()> {
    let rewriter = Rewriter::new(RuleSet::apt_to_dnf(), filter.clone());

    match rewriter.rewrite_excluding(dir, kept) {
        Ok(report) => print_report(&report, out),
        Err(err) => {
            print_report(&err.report, out)?;
            Err(err).with_context(|| format!("conversion of {} stopped early", dir.display()))
        }
    }
}

fn print_report(report: &RewriteReport, out: &mut impl Write) -> Result<()> {
    for outcome in &report.outcomes {
        if let Some(error) = &outcome.error {
            writeln!(out, "Failed    {}: {error}", outcome.path.display())?;
        } else if outcome.changed {
            writeln!(out, "Converted {}", outcome.path.display())?;
        }
    }

    writeln!(
        out,
        "{} of {} script(s) converted to Fedora equivalents.",
        report.changed().count(),
        report.outcomes.len()
    )?;
    Ok(())
}
