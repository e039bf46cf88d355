//! Interactive column/term selection.
//!
//! The controller alternates between choosing a column and choosing a term
//! for it until the operator declines to pick a column. Menus are drawn by a
//! [`Presenter`], so the loop runs equally against a terminal or a script.

use std::collections::VecDeque;
use std::io::{BufRead, StdinLock, Stdout, Write};

use tracing::{debug, info};

use crate::purl::tools::association::AssociationStore;
use crate::purl::tools::catalog::OntologyCatalog;
use crate::purl::tools::error::Result;
use crate::purl::tools::model::{Column, Term};

/// Visible width of a term label in the column menu.
pub const COLUMN_LABEL_WIDTH: usize = 40;
/// Visible width of a term label in the term menu.
pub const TERM_LABEL_WIDTH: usize = 45;

const ELLIPSIS: &str = "...";

/// Shortens `text` to at most `max_len` characters, marking the cut with
/// `...`. Text that already fits, and any text when `max_len <= 3`, is
/// returned unchanged.
pub fn truncate(text: &str, max_len: usize) -> String {
    if max_len <= ELLIPSIS.len() || text.chars().count() <= max_len {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max_len - ELLIPSIS.len()).collect();
    shortened.push_str(ELLIPSIS);
    shortened
}

/// Menu line for a column: its name plus the associated term, if any.
pub fn column_line(column: &Column) -> String {
    match &column.term {
        Some(term) => format!(
            "{} => \"{}\" ({})",
            column.name,
            term.accession,
            truncate(&term.label, COLUMN_LABEL_WIDTH)
        ),
        None => column.name.clone(),
    }
}

/// Menu line for a catalog term.
pub fn term_line(term: &Term) -> String {
    format!(
        "{} ({})",
        truncate(&term.label, TERM_LABEL_WIDTH),
        term.accession
    )
}

/// Something that shows a titled list and reports the chosen index, or
/// `None` when the operator makes no selection.
pub trait Presenter {
    fn present(&mut self, title: &str, items: &[String]) -> Result<Option<usize>>;
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn present(&mut self, title: &str, items: &[String]) -> Result<Option<usize>> {
        (**self).present(title, items)
    }
}

/// Where the selection loop currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    ChoosingColumn,
    ChoosingTerm { column: usize },
    Terminal,
}

/// Outcome of a finished selection loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionSummary {
    /// Terms committed onto columns, counting overwrites.
    pub committed: usize,
    /// Term menus dismissed without a choice.
    pub declined: usize,
}

/// Drives the column-then-term selection loop over an [`AssociationStore`].
pub struct SelectionController<'a, P> {
    presenter: P,
    catalog: &'a OntologyCatalog,
    state: SelectionState,
}

impl<'a, P: Presenter> SelectionController<'a, P> {
    pub fn new(presenter: P, catalog: &'a OntologyCatalog) -> Self {
        Self {
            presenter,
            catalog,
            state: SelectionState::ChoosingColumn,
        }
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Runs until the operator declines the column menu.
    pub fn run(&mut self, store: &mut AssociationStore) -> Result<SelectionSummary> {
        let mut summary = SelectionSummary::default();
        self.state = SelectionState::ChoosingColumn;

        while self.state != SelectionState::Terminal {
            self.step(store, &mut summary)?;
        }

        info!(
            committed = summary.committed,
            declined = summary.declined,
            "selection finished"
        );
        Ok(summary)
    }

    /// Performs one menu interaction and advances the state.
    pub fn step(
        &mut self,
        store: &mut AssociationStore,
        summary: &mut SelectionSummary,
    ) -> Result<SelectionState> {
        self.state = match self.state {
            SelectionState::ChoosingColumn => {
                let items: Vec<String> = store.columns().iter().map(column_line).collect();
                match self.choose("Select a column", &items)? {
                    Some(column) => SelectionState::ChoosingTerm { column },
                    None => SelectionState::Terminal,
                }
            }
            SelectionState::ChoosingTerm { column } => {
                let name = store
                    .column(column)
                    .map(|column| column.name.clone())
                    .unwrap_or_default();
                let items: Vec<String> = self.catalog.terms().iter().map(term_line).collect();
                let title = format!("Select ontology term for \"{name}\"");
                match self.choose(&title, &items)? {
                    Some(index) => {
                        if let Some(term) = self.catalog.get(index) {
                            if store.associate(column, term.clone()) {
                                debug!(column = %name, accession = %term.accession, "associated term");
                                summary.committed += 1;
                            }
                        }
                    }
                    None => summary.declined += 1,
                }
                SelectionState::ChoosingColumn
            }
            SelectionState::Terminal => SelectionState::Terminal,
        };
        Ok(self.state)
    }

    fn choose(&mut self, title: &str, items: &[String]) -> Result<Option<usize>> {
        let choice = self.presenter.present(title, items)?;
        Ok(choice.filter(|&index| index < items.len()))
    }
}

/// Replays a fixed list of responses; once exhausted every menu is declined.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPresenter {
    responses: VecDeque<Option<usize>>,
    presented: Vec<(String, Vec<String>)>,
}

impl ScriptedPresenter {
    pub fn new(responses: impl IntoIterator<Item = Option<usize>>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            presented: Vec::new(),
        }
    }

    /// Menus shown so far, as `(title, items)`.
    pub fn presented(&self) -> &[(String, Vec<String>)] {
        &self.presented
    }

    /// Responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl Presenter for ScriptedPresenter {
    fn present(&mut self, title: &str, items: &[String]) -> Result<Option<usize>> {
        self.presented.push((title.to_string(), items.to_vec()));
        Ok(self.responses.pop_front().flatten())
    }
}

/// Numbered text menu over any line reader and writer.
///
/// Items are numbered from 1 and followed by an `Exit` entry. Entering the
/// exit number, a blank line, `q`, `quit`, `exit`, or reaching end of input
/// means no selection.
pub struct TerminalPresenter<R, W> {
    input: R,
    output: W,
}

impl TerminalPresenter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPresenter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Presenter for TerminalPresenter<R, W> {
    fn present(&mut self, title: &str, items: &[String]) -> Result<Option<usize>> {
        writeln!(self.output)?;
        writeln!(self.output, "{title}")?;
        for (index, item) in items.iter().enumerate() {
            writeln!(self.output, "{:>4}. {item}", index + 1)?;
        }
        let exit = items.len() + 1;
        writeln!(self.output, "{exit:>4}. Exit")?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            let answer = line.trim();
            if answer.is_empty() || matches!(answer, "q" | "quit" | "exit") {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(number) if number == exit => return Ok(None),
                Ok(number) if (1..exit).contains(&number) => return Ok(Some(number - 1)),
                _ => writeln!(self.output, "Enter a number between 1 and {exit}")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("", 3), "");
        assert_eq!(truncate("foo", 3), "foo");
        assert_eq!(truncate("foobar", 6), "foobar");
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("foobar", 5), "fo...");
        assert_eq!(truncate("foobarbaz", 4), "f...");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("ééééé", 5), "ééééé");
        assert_eq!(truncate("éééééé", 5), "éé...");
    }
}
