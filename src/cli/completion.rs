//! Shell completion generation
//!
//! Both tools accept `--completions <shell>` and print a script for bash, zsh,
//! fish, elvish or PowerShell.

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{Shell, generate};

/// Write the completion script of `C` for `shell`.
pub fn write_completions<C: CommandFactory>(shell: Shell, bin_name: &str, out: &mut dyn Write) {
    let mut cmd = C::command();
    generate(shell, &mut cmd, bin_name, out);
}

/// Print the completion script of `C` to stdout.
pub fn print_completions<C: CommandFactory>(shell: Shell, bin_name: &str) {
    write_completions::<C>(shell, bin_name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ExportArgs, ImportArgs};

    #[test]
    fn test_bash_completion_lists_flags() {
        let mut buffer = Vec::new();
        write_completions::<ImportArgs>(Shell::Bash, "firestore-import", &mut buffer);
        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("firestore-import"));
        assert!(script.contains("--dry-run"));
        assert!(script.contains("--database"));
    }

    #[test]
    fn test_fish_completion_for_export() {
        let mut buffer = Vec::new();
        write_completions::<ExportArgs>(Shell::Fish, "firestore-export", &mut buffer);
        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("sample-limit"));
    }
}
