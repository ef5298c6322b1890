use std::io::{BufRead, IsTerminal, Write};
use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::{debug, warn};

use crate::config::HistoryConfig;
use crate::error::Result;

use super::{
    PipelineCompleter, PipelineHighlighter, PipelineHinter, PipelinePrompt, ReplCommand,
    ReplSession,
};

const COMPLETION_MENU: &str = "completion_menu";

/// Interactive loop around a [`ReplSession`]
pub struct ReplEngine {
    session: ReplSession,
    history_config: HistoryConfig,
    highlighting_enabled: bool,
    detail_level: usize,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `session` - Session evaluating submitted lines
    /// * `history_config` - History configuration
    /// * `highlighting_enabled` - Enable syntax highlighting and colored hints
    /// * `detail_level` - Maximum number of menu entries (0 for unlimited)
    pub fn new(
        session: ReplSession,
        history_config: HistoryConfig,
        highlighting_enabled: bool,
        detail_level: usize,
    ) -> Self {
        Self {
            session,
            history_config,
            highlighting_enabled,
            detail_level,
        }
    }

    /// Run the shell; falls back to plain line reading when stdin is not a terminal
    pub fn run(&self) -> Result<()> {
        if std::io::stdin().is_terminal() {
            self.run_interactive()
        } else {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            self.run_lines(stdin.lock(), stdout.lock())
        }
    }

    fn run_interactive(&self) -> Result<()> {
        let mut editor = self.create_editor()?;
        let mut prompt = PipelinePrompt::default();

        println!(
            "pipeline-complete {} - type 'help' for commands, Tab to complete",
            env!("CARGO_PKG_VERSION")
        );

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let Some(command) = ReplCommand::parse(&line) else {
                        continue;
                    };
                    if matches!(command, ReplCommand::Definition(_)) {
                        prompt.record_check();
                    }
                    match self.session.execute(command) {
                        Ok(Some(output)) => println!("{output}"),
                        Ok(None) => break,
                        Err(e) => eprintln!("Error: {e}"),
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                _ => {
                    println!();
                    break;
                }
            }
        }

        Ok(())
    }

    /// Evaluate newline-separated commands from a reader
    ///
    /// # Arguments
    /// * `input` - Source of command lines
    /// * `output` - Destination for command output
    pub fn run_lines<R: BufRead, W: Write>(&self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let Some(command) = ReplCommand::parse(&line) else {
                continue;
            };
            match self.session.execute(command)? {
                Some(text) => writeln!(output, "{text}")?,
                None => break,
            }
        }
        output.flush()?;
        Ok(())
    }

    fn create_editor(&self) -> Result<Reedline> {
        let engine = Arc::clone(self.session.engine());

        let completer = Box::new(PipelineCompleter::new(
            Arc::clone(&engine),
            self.detail_level,
        ));
        let menu = Box::new(ColumnarMenu::default().with_name(COMPLETION_MENU));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let editor = Reedline::create()
            .with_history(self.create_history()?)
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(menu))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_highlighter(Box::new(PipelineHighlighter::new(
                self.highlighting_enabled,
            )))
            .with_hinter(Box::new(PipelineHinter::new(engine)))
            .with_ansi_colors(self.highlighting_enabled);

        Ok(editor)
    }

    fn create_history(&self) -> Result<Box<FileBackedHistory>> {
        let capacity = self.history_config.max_size;
        if self.history_config.persist {
            let path = self.history_config.file_path.clone();
            match FileBackedHistory::with_file(capacity, path.clone()) {
                Ok(history) => {
                    debug!("Using history file {}", path.display());
                    return Ok(Box::new(history));
                }
                Err(e) => warn!("Failed to open history file {}: {}", path.display(), e),
            }
        }
        Ok(Box::new(FileBackedHistory::new(capacity)?))
    }
}
