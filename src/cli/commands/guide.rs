//! `guide create|list|show` command handlers.

use colored::Colorize;
use serde_json::json;

use crate::app::AppContext;
use crate::cli::{GuideCommand, GuideCreateArgs, GuideShowArgs};
use crate::error::{GuideError, Result};
use crate::storage::GuideStore;

pub fn run(ctx: &AppContext, command: &GuideCommand) -> Result<()> {
    match command {
        GuideCommand::Create(args) => create(ctx, args),
        GuideCommand::List => list(ctx),
        GuideCommand::Show(args) => show(ctx, args),
    }
}

fn create(ctx: &AppContext, args: &GuideCreateArgs) -> Result<()> {
    let mut db = ctx.open_db()?;
    let id = db.create_guide(&args.title)?;
    if ctx.robot {
        println!("{}", serde_json::to_string(&json!({ "id": id }))?);
    } else {
        println!("Created guide {} ({})", args.title.bold(), id);
    }
    Ok(())
}

fn list(ctx: &AppContext) -> Result<()> {
    let db = ctx.open_db()?;
    let guides = db.list_guides()?;
    if ctx.robot {
        let rows: Vec<_> = guides
            .iter()
            .map(|g| json!({ "id": g.id, "title": g.title, "createdAt": g.created_at }))
            .collect();
        println!("{}", serde_json::to_string(&rows)?);
        return Ok(());
    }
    if guides.is_empty() {
        println!("No guides yet. Create one with `guidesmith guide create <title>`.");
        return Ok(());
    }
    for guide in guides {
        println!("{:>4}  {}", guide.id, guide.title);
    }
    Ok(())
}

fn show(ctx: &AppContext, args: &GuideShowArgs) -> Result<()> {
    let db = ctx.open_db()?;
    let guide = db
        .guide(args.guide)?
        .ok_or(GuideError::GuideNotFound(args.guide))?;
    let flow_boxes = db.flow_boxes(guide.id)?;

    if ctx.robot {
        let mut flows = Vec::with_capacity(flow_boxes.len());
        for flow in &flow_boxes {
            let steps: Vec<_> = db
                .steps(flow.id)?
                .into_iter()
                .map(|s| json!({ "title": s.title, "position": s.position }))
                .collect();
            flows.push(json!({
                "title": flow.title,
                "description": flow.description,
                "position": flow.position,
                "steps": steps,
            }));
        }
        println!(
            "{}",
            serde_json::to_string(&json!({
                "id": guide.id,
                "title": guide.title,
                "flows": flows,
            }))?
        );
        return Ok(());
    }

    println!("{} (guide {})", guide.title.bold(), guide.id);
    for flow in &flow_boxes {
        if flow.description.is_empty() {
            println!("  [{}] {}", flow.position, flow.title.bold());
        } else {
            println!(
                "  [{}] {} {}",
                flow.position,
                flow.title.bold(),
                format!("- {}", flow.description).dimmed()
            );
        }
        for step in db.steps(flow.id)? {
            println!("       {}. {}", step.position, step.title);
        }
    }
    Ok(())
}
