//! Interactive terminal client for EmberWiki.
//!
//! # Responsibility
//! - Own all prompt text, menu navigation and stdin handling.
//! - Wire logging and the filesystem repository into the core service.
//!
//! Every recoverable failure is printed and returns to the menu; only
//! startup problems end the process.

use clap::Parser;
use colored::Colorize;
use emberwiki_core::{
    core_version, default_log_level, init_logging, ActionRegistry, CommunityMetadata,
    FsWikiRepository, ReplayStatus, StoreError, WikiService, WikiServiceError,
};
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "emberwiki", version, about = "File-backed community wiki")]
struct Cli {
    /// Wiki root directory holding the community folders.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Log level for the rotating file log.
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for log files; file logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

type Service = WikiService<FsWikiRepository>;

fn main() {
    let cli = Cli::parse();

    if let Some(dir) = &cli.log_dir {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &dir.to_string_lossy()) {
            eprintln!("logging disabled: {err}");
        }
    }

    let service = WikiService::new(FsWikiRepository::new(&cli.root));
    let stdin = io::stdin();
    let mut input = stdin.lock();
    main_menu(&service, &mut input);
}

fn main_menu(service: &Service, input: &mut impl BufRead) {
    loop {
        println!();
        println!("{} v{}", "EmberWiki".bold().blue(), core_version());
        println!("1. List communities");
        println!("2. Create community");
        println!("3. Manage community");
        println!("4. Rename community");
        println!("5. Delete community");
        println!("q. Quit");

        let Some(choice) = prompt(input, "> ") else {
            return;
        };
        let result = match choice.as_str() {
            "1" => list_communities(service),
            "2" => create_community(service, input),
            "3" => manage_community(service, input),
            "4" => rename_community(service, input),
            "5" => delete_community(service, input),
            "q" => return,
            _ => {
                println!("Invalid selection.");
                Ok(())
            }
        };
        report(result);
    }
}

fn list_communities(service: &Service) -> Result<(), WikiServiceError> {
    let communities = service.list_communities()?;
    if communities.is_empty() {
        println!("No communities available.");
        return Ok(());
    }
    println!("Communities:");
    for (index, name) in communities.iter().enumerate() {
        println!("{}. {name}", index + 1);
    }
    Ok(())
}

fn create_community(service: &Service, input: &mut impl BufRead) -> Result<(), WikiServiceError> {
    let Some(name) = prompt(input, "Community Name: ") else {
        return Ok(());
    };
    let genre = prompt_optional(input, "Genre");
    let description = prompt_optional(input, "Description");
    let age = prompt_optional(input, "Age Restriction");

    let metadata = CommunityMetadata::with_details(name.clone(), genre, description, age);
    service.create_community(&metadata)?;
    println!("Community \"{name}\" created.");
    Ok(())
}

fn rename_community(service: &Service, input: &mut impl BufRead) -> Result<(), WikiServiceError> {
    let Some(community) = select_community(service, input)? else {
        return Ok(());
    };
    let Some(new_name) = prompt(input, "New name: ") else {
        return Ok(());
    };
    let renamed = service.rename_community(&community, &new_name)?;
    println!("Community renamed to \"{renamed}\".");
    Ok(())
}

fn delete_community(service: &Service, input: &mut impl BufRead) -> Result<(), WikiServiceError> {
    let Some(community) = select_community(service, input)? else {
        return Ok(());
    };
    service.delete_community(&community)?;
    println!("Deleted.");
    Ok(())
}

fn manage_community(service: &Service, input: &mut impl BufRead) -> Result<(), WikiServiceError> {
    let Some(community) = select_community(service, input)? else {
        return Ok(());
    };
    loop {
        println!();
        println!("Managing Community: {}", community.bold());
        println!("1. Edit page");
        println!("2. Rename page");
        println!("3. View page");
        println!("4. Page information");
        println!("5. Version history");
        println!("6. Restore version");
        println!("7. Replay macro");
        println!("8. Export POSIX");
        println!("q. Back");

        let Some(choice) = prompt(input, "> ") else {
            return Ok(());
        };
        let result = match choice.as_str() {
            "1" => edit_page(service, input, &community),
            "2" => rename_page(service, input, &community),
            "3" => view_page(service, input, &community),
            "4" => page_info(service, input, &community),
            "5" => version_history(service, input, &community),
            "6" => restore_version(service, input, &community),
            "7" => replay_macro(service, input, &community),
            "8" => export_posix(service, &community),
            "q" => return Ok(()),
            _ => {
                println!("Invalid selection.");
                Ok(())
            }
        };
        report(result);
    }
}

fn edit_page(
    service: &Service,
    input: &mut impl BufRead,
    community: &str,
) -> Result<(), WikiServiceError> {
    let pages = service.list_pages(community)?;
    if !pages.is_empty() {
        println!("Pages:");
        for (index, page) in pages.iter().enumerate() {
            println!("{}. {page}", index + 1);
        }
    }
    let Some(choice) = prompt(input, "Enter page number or new page name: ") else {
        return Ok(());
    };
    let page = resolve_choice(&pages, &choice).unwrap_or(choice);

    if let Ok(current) = service.read_page(community, &page) {
        println!("--- Current Content ---");
        println!("{}", emberwiki_core::render(&current, &ActionRegistry::builtin()));
    }
    println!("--- Enter new content or macro commands (end with ---) ---");

    let lines = input.by_ref().lines().map_while(Result::ok);
    let outcome = service.edit_page(community, &page, lines)?;
    if !outcome.recorded_macros.is_empty() {
        println!("Recorded macros: {}", outcome.recorded_macros.join(", "));
    }
    println!("Saved.");
    Ok(())
}

fn rename_page(
    service: &Service,
    input: &mut impl BufRead,
    community: &str,
) -> Result<(), WikiServiceError> {
    let Some(page) = select_page(service, input, community, "Select page to rename")? else {
        return Ok(());
    };
    let Some(new_name) = prompt(input, "New page name (with .md): ") else {
        return Ok(());
    };
    let outcome = service.rename_page(community, &page, &new_name)?;
    println!("Page renamed to {}.", outcome.new_page);
    Ok(())
}

fn view_page(
    service: &Service,
    input: &mut impl BufRead,
    community: &str,
) -> Result<(), WikiServiceError> {
    let Some(page) = select_page(service, input, community, "Select page to view")? else {
        return Ok(());
    };
    let outcome = service.view_page(community, &page, &ActionRegistry::builtin())?;
    for replay in &outcome.replays {
        match replay.status {
            ReplayStatus::Applied { .. } => {
                println!("Macro \"{}\" applied to {}.", replay.name, outcome.page)
            }
            ReplayStatus::UnknownMacro => println!("Macro not found: {}", replay.name),
        }
    }
    println!("--- {} ---", outcome.page);
    println!("{}", outcome.rendered);
    Ok(())
}

fn page_info(
    service: &Service,
    input: &mut impl BufRead,
    community: &str,
) -> Result<(), WikiServiceError> {
    let Some(page) = select_page(service, input, community, "Select page for information")? else {
        return Ok(());
    };
    let info = service.page_info(community, &page)?;
    println!();
    println!("Page Information: {}", info.name);
    println!("Size: {} bytes", info.size_bytes);
    println!("Version History: {} saved versions", info.version_count);
    if let Some(last) = &info.last_version {
        println!("Last Version: {last}");
    }
    Ok(())
}

fn version_history(
    service: &Service,
    input: &mut impl BufRead,
    community: &str,
) -> Result<(), WikiServiceError> {
    let Some(page) = select_page(service, input, community, "Select page for version history")?
    else {
        return Ok(());
    };
    print_history(service, community, &page)
}

fn print_history(service: &Service, community: &str, page: &str) -> Result<(), WikiServiceError> {
    let records = service.list_versions(community, page)?;
    if records.is_empty() {
        println!("No version history for this page.");
        return Ok(());
    }
    println!();
    println!("Version History for {page}:");
    for (index, record) in records.iter().rev().enumerate() {
        println!(
            "{}. {} - {} - Hash: {}",
            index + 1,
            record.timestamp,
            record.operation,
            record.hash
        );
    }
    Ok(())
}

fn restore_version(
    service: &Service,
    input: &mut impl BufRead,
    community: &str,
) -> Result<(), WikiServiceError> {
    let Some(page) = select_page(service, input, community, "Select page to restore version")?
    else {
        return Ok(());
    };
    print_history(service, community, &page)?;

    let Some(choice) = prompt(input, "Select version to restore (number): ") else {
        return Ok(());
    };
    let Ok(selector) = choice.parse::<usize>() else {
        println!("Invalid input.");
        return Ok(());
    };
    let outcome = service.restore_version(community, &page, selector)?;
    println!(
        "Version {} restored successfully.",
        outcome.restored_from.timestamp
    );
    Ok(())
}

fn replay_macro(
    service: &Service,
    input: &mut impl BufRead,
    community: &str,
) -> Result<(), WikiServiceError> {
    let Some(page) = select_page(service, input, community, "Select page for macro")? else {
        return Ok(());
    };
    let Some(name) = prompt(input, "Macro name: ") else {
        return Ok(());
    };
    let report = service.replay_macro(community, &name, &page)?;
    match report.status {
        ReplayStatus::Applied { .. } => println!("Macro \"{name}\" applied to {page}."),
        ReplayStatus::UnknownMacro => println!("Macro not found."),
    }
    Ok(())
}

fn export_posix(service: &Service, community: &str) -> Result<(), WikiServiceError> {
    let path = service.export_posix(community)?;
    println!("Exported interactive POSIX script: {}", path.display());
    Ok(())
}

// --- selection and prompt helpers --------------------------------------

fn select_community(
    service: &Service,
    input: &mut impl BufRead,
) -> Result<Option<String>, WikiServiceError> {
    let communities = service.list_communities()?;
    if communities.is_empty() {
        println!("No communities available.");
        return Ok(None);
    }
    println!("Communities:");
    for (index, name) in communities.iter().enumerate() {
        println!("{}. {name}", index + 1);
    }
    let Some(choice) = prompt(input, "Select community (number or name): ") else {
        return Ok(None);
    };
    match resolve_choice(&communities, &choice) {
        Some(name) => Ok(Some(name)),
        None => {
            println!("Community not found");
            Ok(None)
        }
    }
}

fn select_page(
    service: &Service,
    input: &mut impl BufRead,
    community: &str,
    verb: &str,
) -> Result<Option<String>, WikiServiceError> {
    let pages = service.list_pages(community)?;
    if pages.is_empty() {
        println!("No pages available.");
        return Ok(None);
    }
    println!("Pages:");
    for (index, page) in pages.iter().enumerate() {
        println!("{}. {page}", index + 1);
    }
    let Some(choice) = prompt(input, &format!("{verb} (number or name): ")) else {
        return Ok(None);
    };
    match resolve_choice(&pages, &choice) {
        Some(page) => Ok(Some(page)),
        None => {
            println!("Page not found");
            Ok(None)
        }
    }
}

/// Resolves a 1-based number or an exact name against a listing.
fn resolve_choice(options: &[String], choice: &str) -> Option<String> {
    if let Ok(index) = choice.parse::<usize>() {
        if index >= 1 && index <= options.len() {
            return Some(options[index - 1].clone());
        }
        return None;
    }
    options.iter().find(|name| *name == choice).cloned()
}

fn prompt(input: &mut impl BufRead, text: &str) -> Option<String> {
    print!("{text}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

fn prompt_optional(input: &mut impl BufRead, label: &str) -> Option<String> {
    let value = prompt(input, &format!("{label} (optional): "))?;
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn report(result: Result<(), WikiServiceError>) {
    if let Err(err) = result {
        match &err {
            WikiServiceError::InvalidSelection { .. } => println!("Invalid selection."),
            WikiServiceError::Store(StoreError::ArtifactMissing { .. }) => {
                println!("Version file not found.")
            }
            _ => println!("{}", format!("error: {err}").red()),
        }
        log::warn!("event=cli_operation module=cli status=error error={err}");
    }
}
