use std::path::PathBuf;

use clap::Parser;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use crate::config::GallerySettings;
use crate::runtime::{AppContext, Result, parse_selection};
use crate::tools::EllipseCtf;

use super::types::{Cli, Commands, CtfArgs, SheetArgs};

pub fn run_cli() -> std::result::Result<(), String> {
    let cli = Cli::parse();
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app = AppContext::new();
    let report = match cli.command {
        Commands::Info { input, config } => info(&app, input, config),
        Commands::Sheet(args) => sheet(&app, args),
        Commands::Export {
            input,
            output,
            select,
        } => export(&app, input, output, &select),
        Commands::Ctf(args) => ctf(&app, args),
    }
    .map_err(|error| error.to_string())?;

    println!(
        "{}",
        serde_json::to_string_pretty(&report).map_err(|error| error.to_string())?
    );
    Ok(())
}

fn info(app: &AppContext, input: PathBuf, config: Option<PathBuf>) -> Result<Value> {
    let service = app.gallery_service();
    let settings = service.load_settings(config.as_deref())?;
    let model = service.open(&[input], &settings)?;
    Ok(json!(service.summary(&model)))
}

fn sheet(app: &AppContext, args: SheetArgs) -> Result<Value> {
    let service = app.gallery_service();
    let settings = sheet_settings(service.load_settings(args.config.as_deref())?, &args);
    let mut model = service.open(&args.inputs, &settings)?;
    if let Some(spec) = &args.select {
        let indices = parse_selection(spec, model.item_count())?;
        service.select(&mut model, &indices)?;
    }
    let layout = service.render(&mut model, &args.output, args.layout.as_deref())?;
    Ok(json!({
        "status": "ok",
        "output": args.output,
        "title": layout.title,
        "rows": layout.rows,
        "columns": layout.columns,
        "cells": layout.cells.len(),
        "selected": model.selected_indices(),
    }))
}

/// Command line flags override the settings file.
fn sheet_settings(mut settings: GallerySettings, args: &SheetArgs) -> GallerySettings {
    if args.columns.is_some() || args.rows.is_some() || args.width.is_some() {
        settings.columns = args.columns;
        settings.rows = args.rows;
        settings.width = args.width;
    }
    if let Some(zoom) = args.zoom {
        settings.zoom = zoom;
    }
    settings.show_labels |= args.labels;
    settings.normalize |= args.normalize;
    settings
}

fn export(app: &AppContext, input: PathBuf, output: PathBuf, select: &str) -> Result<Value> {
    let service = app.gallery_service();
    let mut model = service.open(&[input], &GallerySettings::default())?;
    let indices = parse_selection(select, model.item_count())?;
    service.select(&mut model, &indices)?;
    let written = service.export_selection(&model, &output)?;
    Ok(json!({"status": "ok", "output": output, "planes": written}))
}

fn ctf(app: &AppContext, args: CtfArgs) -> Result<Value> {
    let ellipse = EllipseCtf {
        sampling_rate: args.sampling_rate,
        voltage: args.kv,
        spherical_aberration: args.cs,
        defocus_u: args.defocus_u,
        defocus_v: args.defocus_v,
    };
    let task = app
        .tool_service()
        .ctf_task(&ellipse, args.angle, &args.psd, args.row);
    if args.dry_run {
        return Ok(json!({"row": task.row(), "command": task.command().to_string()}));
    }
    let outcome = app.tool_service().run_task(&task)?;
    Ok(json!(outcome))
}
