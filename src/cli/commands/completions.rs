//! Shell completions generation.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::MypaError;

/// Generate the completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, MypaError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "mypa", &mut buf);
    String::from_utf8(buf).map_err(|e| MypaError::Parse(format!("UTF-8 error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_mention_subcommands() {
        let script = completions(Shell::Bash).unwrap();
        assert!(script.contains("mypa"));
        assert!(script.contains("focus"));
        assert!(script.contains("plan"));
    }

    #[test]
    fn test_zsh_completions() {
        assert!(completions(Shell::Zsh).unwrap().contains("#compdef mypa"));
    }
}
