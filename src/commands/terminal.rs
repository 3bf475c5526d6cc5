use std::io::{self, BufRead, Write};

use crate::services::interaction::{Notice, NoticeKind, UserInteraction};

/// Terminal stand-in for browser alerts and confirmation dialogs.
pub struct TerminalInteraction {
    assume_yes: bool,
}

impl TerminalInteraction {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

pub(crate) fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl UserInteraction for TerminalInteraction {
    fn notify(&self, notice: &Notice) {
        match notice.kind {
            NoticeKind::Success => eprintln!("{}", notice.message),
            NoticeKind::Failure => eprintln!("error: {}", notice.message),
        }
    }

    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        eprint!("{question} [y/N] ");
        let _ = io::stderr().flush();

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(_) => false,
        }
    }
}
