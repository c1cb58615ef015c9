//! CLI smoke entry point.
//!
//! # Responsibility
//! - Drive a short scripted session against `checklist_core`.
//! - Print one line per notification so core wiring can be eyeballed.
//!
//! Set `CHECKLIST_LOG_DIR` to an absolute path to also write core logs.

use checklist_core::{
    core_version, default_log_level, init_logging, Checklist, ItemPatch, SeedConfig,
};
use log::info;
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Ok(log_dir) = std::env::var("CHECKLIST_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("checklist_cli failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), checklist_core::StoreError> {
    println!("checklist_core version={}", core_version());

    let mut store = Checklist::new(SeedConfig::default())?;
    store.subscribe(|store: &Checklist| {
        let summary = store
            .category_sections()
            .iter()
            .map(|section| {
                let names: Vec<String> = section
                    .items
                    .iter()
                    .map(|item| {
                        let mark = if item.bought { "x" } else { " " };
                        format!("[{mark}] {} x{}", item.name, item.quantity)
                    })
                    .collect();
                format!(
                    "{} {}: {}",
                    section.category.icon,
                    section.category.name,
                    names.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join(" | ");
        println!(
            "notify mode={:?} undo={} redo={} :: {}",
            store.current_mode(),
            store.can_undo(),
            store.can_redo(),
            summary
        );
    });

    let bread = store.create_item("Bread", 2)?;
    store.update_item(bread, ItemPatch::bought(true))?;
    store.enter_edit_categories_mode();
    store.update_item_category("Bread", 1)?;
    store.exit_edit_categories_mode();
    store.undo();
    store.undo();
    store.redo();
    store.delete_item(bread)?;
    store.undo();

    info!("event=cli_session module=cli status=ok");
    Ok(())
}
