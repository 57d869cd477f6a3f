//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments and runs the render, play and
//! config commands.

pub mod settings;

use std::error::Error;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use ratatui::text::Span;
use tracing::debug;

use crate::core::board::RevealBoard;
use crate::core::config::data::path_display;
use crate::core::config::Config;
use crate::core::message::{Message, MessageId, Role};
use crate::core::reveal::TickOutcome;
use crate::core::view::MessageView;
use crate::logging::init_tracing;
use crate::ui::markdown::MessageRenderer;
use crate::ui::terminal::AnsiWriter;
use crate::ui::theme::Theme;

const MESSAGE_ID: MessageId = 1;

#[derive(Parser)]
#[command(name = "revealer")]
#[command(about = "Render chat messages with a typewriter reveal")]
#[command(
    long_about = "Revealer renders a chat message the way a chat view shows it: an optional \
<Thinking>...</Thinking> block is split out as reasoning, assistant text is revealed one \
character per tick, and the result is rendered as markdown with highlighted code blocks.\n\n\
Environment Variables:\n\
  RUST_LOG          Log filter for diagnostics (default: warn)"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Read configuration from this file instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Render code blocks without syntax highlighting
    #[arg(long, global = true)]
    pub no_syntax: bool,

    /// Show message text as-is instead of rendering markdown
    #[arg(long, global = true)]
    pub no_markdown: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the fully revealed message
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Print only the text of this code block (0 is the first)
        #[arg(long, value_name = "N")]
        code_block: Option<usize>,
    },
    /// Reveal the message character by character, then render it
    Play {
        #[command(flatten)]
        input: InputArgs,

        /// Delay between characters in milliseconds (overrides config)
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
    },
    /// Inspect or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args)]
pub struct InputArgs {
    /// Message file; reads stdin when omitted or "-"
    pub file: Option<PathBuf>,

    /// Role of the message author
    #[arg(long, default_value = "assistant")]
    pub role: Role,

    /// Treat the input as a TOML message record (role, content, is_typing)
    #[arg(long)]
    pub toml: bool,

    /// Expand the reasoning block, if the message has one
    #[arg(long)]
    pub show_reasoning: bool,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the current configuration
    Show,
    /// Set a configuration value
    Set { key: String, value: String },
    /// Reset a configuration value to its default
    Unset { key: String },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;

    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?
        .block_on(async_main(args))
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    let config = Config::load(args.config.as_deref())?;
    let mut render_config = config.render_config();
    if args.no_markdown {
        render_config.markdown = false;
    }
    if args.no_syntax {
        render_config.syntax_highlighting = false;
    }
    let renderer = MessageRenderer::new(Theme::from_name(config.theme_name()), render_config);

    match args.command {
        Commands::Render { input, code_block } => {
            let message = read_message(&input)?;
            let mut view = MessageView::new(&message);
            view.set_show_reasoning(input.show_reasoning);
            while view.needs_tick() {
                view.tick(view.reveal().cycle());
            }
            match code_block {
                Some(index) => {
                    println!("{}", code_block_text(&view, &renderer, index)?);
                    Ok(())
                }
                None => print_display(&view, &renderer),
            }
        }
        Commands::Play { input, interval_ms } => {
            let message = read_message(&input)?;
            let interval = interval_ms
                .map(|ms| Duration::from_millis(ms.max(1)))
                .unwrap_or_else(|| config.tick_interval());
            play(&message, input.show_reasoning, interval, &renderer).await
        }
        Commands::Config { action } => run_config(action, args.config.as_deref()),
    }
}

async fn play(
    message: &Message,
    show_reasoning: bool,
    interval: Duration,
    renderer: &MessageRenderer,
) -> Result<(), Box<dyn Error>> {
    let mut board = RevealBoard::new(interval);
    board.upsert(message);
    if show_reasoning {
        board.toggle_reasoning(message.id);
    }

    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    let mut out = AnsiWriter::new(stdout.lock(), styled);
    let text_style = renderer.theme().md_paragraph_style();
    let mut revealed_any = false;

    while let Some((id, outcome)) = board.step().await {
        if let TickOutcome::Advanced { ch, .. } = outcome {
            out.write_span(&Span::styled(ch.to_string(), text_style))?;
            out.flush()?;
            revealed_any = true;
        } else {
            debug!(id, ?outcome, "tick produced no character");
        }
    }
    if revealed_any {
        out.write_line(&Default::default())?;
    }
    drop(out);

    let view = board
        .view(message.id)
        .ok_or("message disappeared from the reveal board")?;
    print_display(view, renderer)
}

fn print_display(view: &MessageView, renderer: &MessageRenderer) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let styled = stdout.is_terminal();
    let mut out = AnsiWriter::new(stdout.lock(), styled);
    out.write_display(&view.display(renderer), renderer.theme())?;
    Ok(())
}

/// Raw text of one code block from the revealed body, for piping into
/// other tools.
fn code_block_text(
    view: &MessageView,
    renderer: &MessageRenderer,
    index: usize,
) -> Result<String, Box<dyn Error>> {
    let tree = renderer.render(view.revealed());
    tree.code_block_content(index).ok_or_else(|| {
        let count = tree.code_blocks().len();
        format!("no code block {index}; the message has {count}").into()
    })
}

fn run_config(action: ConfigAction, override_path: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let path = Config::resolve_path(override_path)?;
    match action {
        ConfigAction::Path => println!("{}", path_display(&path)),
        ConfigAction::Show => Config::load_from_path(&path)?.print_all(),
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from_path(&path)?;
            let message = settings::set(&mut config, &key, &value)?;
            config.save_to_path(&path)?;
            println!("{message}");
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load_from_path(&path)?;
            let message = settings::unset(&mut config, &key)?;
            config.save_to_path(&path)?;
            println!("{message}");
        }
    }
    Ok(())
}

fn read_message(input: &InputArgs) -> Result<Message, Box<dyn Error>> {
    let raw = match input.file.as_deref() {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_message(&raw, input.role, input.toml)
}

/// A TOML record carries its own role; plain text takes the `--role` flag.
fn parse_message(raw: &str, role: Role, as_toml: bool) -> Result<Message, Box<dyn Error>> {
    if as_toml {
        let mut message: Message = toml::from_str(raw)?;
        message.id = MESSAGE_ID;
        Ok(message)
    } else {
        Ok(Message::new(MESSAGE_ID, role, raw))
    }
}
