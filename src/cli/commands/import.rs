//! `import` command handler: the end-to-end pipeline from raw text to
//! persisted guide content.

use std::io::Read;

use colored::Colorize;

use crate::app::AppContext;
use crate::cli::ImportArgs;
use crate::error::{GuideError, Result};
use crate::import::{GuideImportRequest, ImportFormat, ImportResult, import_structure};
use crate::storage::GuideStore;

pub fn run(ctx: &AppContext, args: &ImportArgs) -> Result<()> {
    let raw_text = read_input(args)?;

    let limit = ctx.config.import.max_import_bytes;
    if raw_text.len() > limit {
        return Err(GuideError::InputTooLarge {
            size: raw_text.len(),
            limit,
        });
    }

    let format = resolve_format(args)?;

    let mut db = ctx.open_db()?;
    if db.guide(args.guide)?.is_none() {
        return Err(GuideError::GuideNotFound(args.guide));
    }

    let request = GuideImportRequest {
        guide_id: args.guide,
        format,
        raw_text,
        base_position: db.next_flow_box_position(args.guide)?,
    };

    let (result, outcome) = import_structure(&request);
    if let Some(outcome) = outcome {
        if args.dry_run {
            tracing::info!("dry run: nothing persisted");
        } else {
            db.persist_import(args.guide, &outcome.flows)?;
        }
    }

    print_result(ctx, args, &result)?;
    // Parse failures travel inside the result envelope; only pre-parse and
    // storage errors escape as command errors.
    Ok(())
}

fn read_input(args: &ImportArgs) -> Result<String> {
    match &args.file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn resolve_format(args: &ImportArgs) -> Result<ImportFormat> {
    if let Some(format) = args.format {
        return Ok(format.into());
    }
    args.file
        .as_deref()
        .and_then(ImportFormat::from_path)
        .ok_or_else(|| {
            GuideError::MalformedInput(
                "cannot determine input format; pass --format csv|markdown".into(),
            )
        })
}

fn print_result(ctx: &AppContext, args: &ImportArgs, result: &ImportResult) -> Result<()> {
    if ctx.robot {
        println!("{}", serde_json::to_string(result)?);
        return Ok(());
    }

    if !result.success {
        println!("{} {}", "Import failed:".red().bold(), result.message);
        return Ok(());
    }

    let verb = if args.dry_run { "Parsed" } else { "Imported" };
    println!(
        "{} {} flow box(es), {} step(s)",
        verb.green().bold(),
        result.results.flow_boxes_created,
        result.results.steps_created
    );
    for flow in &result.results.flows {
        println!("  {} ({} steps)", flow.name, flow.step_count);
    }
    if result.results.rows_skipped > 0 {
        println!(
            "{}",
            format!("  {} row(s) skipped (empty step title)", result.results.rows_skipped)
                .yellow()
        );
    }
    Ok(())
}
