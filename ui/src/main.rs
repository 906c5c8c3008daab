use chatlist::config::{self, ConfigValidationError};
use chatlist::renderer::TextRenderer;
use chatlist::{ChatSession, clipboard, conversation, logger};
use clap::Parser;
use std::path::PathBuf;
use store::format::DefaultDateLabelFormatter;

/// View a chat transcript with date headers, select messages, copy or delete them.
#[derive(Parser, Debug)]
#[command(name = "chatlist", version, about)]
struct Args {
    /// Conversation file: a JSON array of messages
    conversation: PathBuf,

    /// Id of the local user; their messages are shown as outgoing
    #[arg(long = "me", value_name = "ID")]
    local_user_id: Option<String>,

    /// Select a message by id (repeatable)
    #[arg(long = "select", value_name = "ID")]
    select: Vec<String>,

    /// Copy the selected messages to the clipboard
    #[arg(long, conflicts_with = "delete_selected")]
    copy: bool,

    /// Delete the selected messages before printing
    #[arg(long)]
    delete_selected: bool,

    /// Configuration file to use instead of the default locations
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn report_validation_errors(errors: &[ConfigValidationError]) {
    for error in errors {
        eprintln!("{}\n", error.user_message());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut app_config = config::load_config(args.config.as_deref()).into_result()?;
    if let Some(id) = args.local_user_id {
        app_config.set_local_user_id(id);
    }
    if let Err(errors) = app_config.validate() {
        report_validation_errors(&errors);
        return Err(format!("{} configuration error(s)", errors.len()).into());
    }

    if let Err(e) = logger::setup_logger(app_config.logging()) {
        eprintln!("Failed to initialize logger: {e}");
    }

    let messages = conversation::load_conversation(&args.conversation)?;
    let mut session = ChatSession::from_config(&app_config)?;
    session.load(messages);

    for id in &args.select {
        session.select(id);
    }

    if args.copy {
        let count = session.selection_count();
        match session.copy_selected() {
            Some(text) => {
                clipboard::copy_to_clipboard(&text)?;
                println!("Copied {count} message(s) to the clipboard");
            }
            None => println!("Nothing selected to copy"),
        }
    }

    if args.delete_selected {
        let removed = session.delete_selected();
        println!("Deleted {removed} message(s)");
    }

    let renderer = TextRenderer::new(DefaultDateLabelFormatter::new(app_config.time_zone()));
    for line in renderer.render_session(&session) {
        println!("{line}");
    }

    log::info!("Rendered {} entries", session.store().len());
    Ok(())
}
