//! Interactive selection and confirmation
//!
//! All console reads go through [`PromptProvider`], so the dialogs can be
//! driven by a script in tests. End of input is always an error.

use std::io::{self, BufRead, Write};

use crate::config::DEFAULT_DATABASE_NAME;
use crate::error::Result;
use crate::store::firestore::DEFAULT_DATABASE_ID;

/// Line-oriented console.
pub trait PromptProvider {
    /// Print `question` and read one line, without the trailing newline.
    fn ask(&mut self, question: &str) -> Result<String>;

    /// Print one line.
    fn show(&mut self, line: &str);
}

/// Console backed by stdin and stdout.
#[derive(Debug, Default)]
pub struct StdioPrompt;

impl PromptProvider for StdioPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{question}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input").into());
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn show(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Answer to the selection menu.
#[derive(Debug, PartialEq, Eq)]
enum Selection {
    All,
    Quit,
    Indices(Vec<usize>),
}

/// Parse a selection; indices are 1-based and duplicates are collapsed.
fn parse_selection(input: &str, available: usize) -> std::result::Result<Selection, String> {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "all" => return Ok(Selection::All),
        "quit" => return Ok(Selection::Quit),
        _ => {}
    }

    let mut indices = Vec::new();
    for part in input.split(',') {
        let index: usize = part.trim().parse().map_err(|_| {
            "Invalid input. Please enter numbers separated by commas, 'all', or 'quit'.".to_string()
        })?;
        if index == 0 || index > available {
            return Err(format!("Invalid selection: {index}. Please try again."));
        }
        if !indices.contains(&(index - 1)) {
            indices.push(index - 1);
        }
    }
    Ok(Selection::Indices(indices))
}

/// Let the user pick collections from a numbered menu.
///
/// Returns an empty list when nothing is available or the user quits.
pub fn select_collections(
    available: &[String],
    prompt: &mut dyn PromptProvider,
) -> Result<Vec<String>> {
    if available.is_empty() {
        prompt.show("❌ No collections available for import.");
        return Ok(Vec::new());
    }

    prompt.show("");
    prompt.show("📋 Available collections for import:");
    for (i, name) in available.iter().enumerate() {
        prompt.show(&format!("  {:2}. {}", i + 1, name));
    }
    prompt.show("");
    prompt.show(&format!(
        "💡 Enter collection numbers (1-{}) separated by commas,",
        available.len()
    ));
    prompt.show("   or 'all' to import all collections, or 'quit' to exit:");

    loop {
        let answer = prompt.ask("👉 Your selection: ")?;
        match parse_selection(&answer, available.len()) {
            Ok(Selection::All) => return Ok(available.to_vec()),
            Ok(Selection::Quit) => return Ok(Vec::new()),
            Ok(Selection::Indices(indices)) => {
                return Ok(indices.into_iter().map(|i| available[i].clone()).collect());
            }
            Err(message) => prompt.show(&format!("❌ {message}")),
        }
    }
}

/// Show what is about to happen and ask for confirmation.
///
/// An empty selection is never confirmed; a dry run needs no confirmation.
pub fn confirm_import(
    selected: &[String],
    project_id: &str,
    database_name: &str,
    dry_run: bool,
    prompt: &mut dyn PromptProvider,
) -> Result<bool> {
    if selected.is_empty() {
        return Ok(false);
    }

    let named_database = database_name != DEFAULT_DATABASE_NAME && database_name != DEFAULT_DATABASE_ID;
    let mode = if dry_run { "DRY-RUN (no changes will be made)" } else { "LIVE IMPORT" };

    prompt.show("");
    prompt.show("🔍 Import Summary:");
    prompt.show(&format!("   Target Project: {project_id}"));
    if named_database {
        prompt.show(&format!("   Database: {database_name}"));
    }
    prompt.show(&format!("   Mode: {mode}"));
    prompt.show(&format!("   Collections to import ({}):", selected.len()));
    for name in selected {
        prompt.show(&format!("     - {name}"));
    }

    if dry_run {
        return Ok(true);
    }

    let db_info = if named_database {
        format!(" (database: {database_name})")
    } else {
        String::new()
    };
    prompt.show("");
    prompt.show(&format!(
        "⚠️  This will import data to the '{project_id}' project{db_info}."
    ));
    prompt.show("   Existing documents may be overwritten if you choose to overwrite.");

    loop {
        let answer = prompt.ask("👉 Proceed with import? (yes/no): ")?;
        match answer.trim().to_lowercase().as_str() {
            "yes" | "y" => return Ok(true),
            "no" | "n" => return Ok(false),
            _ => prompt.show("Please enter 'yes' or 'no'."),
        }
    }
}

/// Ask whether existing documents should be replaced.
pub fn ask_overwrite(prompt: &mut dyn PromptProvider) -> Result<bool> {
    let answer = prompt.ask("👉 Overwrite existing documents? (yes/no): ")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "yes" | "y"))
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;
    use std::io;

    use super::PromptProvider;
    use crate::error::Result;

    /// Prompt answering from a fixed script and capturing output.
    pub(crate) struct ScriptedPrompt {
        pub(crate) answers: VecDeque<&'static str>,
        pub(crate) questions: Vec<String>,
        pub(crate) output: Vec<String>,
    }

    impl ScriptedPrompt {
        pub(crate) fn new(answers: &[&'static str]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                questions: Vec::new(),
                output: Vec::new(),
            }
        }
    }

    impl PromptProvider for ScriptedPrompt {
        fn ask(&mut self, question: &str) -> Result<String> {
            self.questions.push(question.to_string());
            self.answers
                .pop_front()
                .map(str::to_string)
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script ended").into())
        }

        fn show(&mut self, line: &str) {
            self.output.push(line.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::scripted::ScriptedPrompt;
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("ALL", 3), Ok(Selection::All));
        assert_eq!(parse_selection(" quit ", 3), Ok(Selection::Quit));
        assert_eq!(
            parse_selection("3, 1,3", 3),
            Ok(Selection::Indices(vec![2, 0]))
        );
        assert!(parse_selection("0", 3).is_err());
        assert!(parse_selection("4", 3).is_err());
        assert!(parse_selection("1,x", 3).is_err());
        assert!(parse_selection("", 3).is_err());
    }

    #[test]
    fn test_select_reprompts_until_valid() {
        let available = names(&["orders", "products", "users"]);
        let mut prompt = ScriptedPrompt::new(&["9", "abc", "3,1"]);
        let selected = select_collections(&available, &mut prompt).unwrap();
        assert_eq!(selected, names(&["users", "orders"]));
        assert_eq!(prompt.questions.len(), 3);
        assert!(prompt.output.iter().any(|l| l.contains("Invalid selection: 9")));
        assert!(prompt.output.iter().any(|l| l.contains("  1. orders")));
    }

    #[test]
    fn test_select_all_and_quit() {
        let available = names(&["a", "b"]);
        assert_eq!(
            select_collections(&available, &mut ScriptedPrompt::new(&["all"])).unwrap(),
            available
        );
        assert!(
            select_collections(&available, &mut ScriptedPrompt::new(&["Quit"]))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_select_with_nothing_available_does_not_ask() {
        let mut prompt = ScriptedPrompt::new(&[]);
        assert!(select_collections(&[], &mut prompt).unwrap().is_empty());
        assert_eq!(prompt.questions.len(), 0);
    }

    #[test]
    fn test_select_end_of_input_is_error() {
        let mut prompt = ScriptedPrompt::new(&["7"]);
        assert!(select_collections(&names(&["a"]), &mut prompt).is_err());
    }

    #[test]
    fn test_confirm_dry_run_needs_no_answer() {
        let mut prompt = ScriptedPrompt::new(&[]);
        assert!(confirm_import(&names(&["a"]), "staging", "default", true, &mut prompt).unwrap());
        assert_eq!(prompt.questions.len(), 0);
        assert!(prompt.output.iter().any(|l| l.contains("DRY-RUN")));
        assert!(!prompt.output.iter().any(|l| l.contains("Database:")));
    }

    #[test]
    fn test_confirm_empty_selection_is_declined() {
        let mut prompt = ScriptedPrompt::new(&["yes"]);
        assert!(!confirm_import(&[], "staging", "default", false, &mut prompt).unwrap());
        assert_eq!(prompt.questions.len(), 0);
    }

    #[test]
    fn test_confirm_live_reprompts() {
        let mut prompt = ScriptedPrompt::new(&["maybe", "Y"]);
        assert!(confirm_import(&names(&["a"]), "staging", "analytics", false, &mut prompt).unwrap());
        assert_eq!(prompt.questions.len(), 2);
        assert!(prompt.output.iter().any(|l| l == "   Database: analytics"));

        let mut prompt = ScriptedPrompt::new(&["no"]);
        assert!(!confirm_import(&names(&["a"]), "staging", "default", false, &mut prompt).unwrap());
    }

    #[test]
    fn test_ask_overwrite() {
        assert!(ask_overwrite(&mut ScriptedPrompt::new(&["y"])).unwrap());
        assert!(ask_overwrite(&mut ScriptedPrompt::new(&["YES"])).unwrap());
        assert!(!ask_overwrite(&mut ScriptedPrompt::new(&["no"])).unwrap());
        assert!(!ask_overwrite(&mut ScriptedPrompt::new(&["whatever"])).unwrap());
        assert!(ask_overwrite(&mut ScriptedPrompt::new(&[])).is_err());
    }
}
