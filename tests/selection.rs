use std::io::Cursor;

use purl_tools::association::AssociationStore;
use purl_tools::catalog::OntologyCatalog;
use purl_tools::model::{Column, Term};
use purl_tools::select::{
    Presenter, ScriptedPresenter, SelectionController, SelectionState, TerminalPresenter,
    column_line, term_line, truncate,
};

fn term(accession: &str, label: &str) -> Term {
    Term {
        accession: accession.to_string(),
        purl: format!("http://purl.obolibrary.org/obo/{accession}"),
        label: label.to_string(),
        unit_label: String::new(),
        unit_purl: String::new(),
    }
}

fn catalog() -> OntologyCatalog {
    OntologyCatalog::from_terms(vec![
        term("TO_0000207", "plant height"),
        term("PATO_0000146", "color"),
        term("PO_0000003", "whole plant"),
    ])
}

fn accession(store: &AssociationStore, index: usize) -> Option<&str> {
    store
        .column(index)
        .and_then(|column| column.term.as_ref())
        .map(|term| term.accession.as_str())
}

#[test]
fn two_picks_commit_two_associations() {
    let catalog = catalog();
    let mut store = AssociationStore::new(["site", "height", "color"]);
    let mut presenter = ScriptedPresenter::new([Some(0), Some(2), Some(1), Some(0), None]);

    let mut controller = SelectionController::new(&mut presenter, &catalog);
    let summary = controller.run(&mut store).expect("selection ran");

    assert_eq!(controller.state(), SelectionState::Terminal);
    assert_eq!(summary.committed, 2);
    assert_eq!(store.associated_count(), 2);
    assert_eq!(accession(&store, 0), Some("PO_0000003"));
    assert_eq!(accession(&store, 1), Some("TO_0000207"));
    assert_eq!(accession(&store, 2), None);
    assert_eq!(presenter.remaining(), 0);
}

#[test]
fn cancel_after_column_pick_declines_term_and_exhausted_script_exits() {
    let catalog = catalog();
    let mut store = AssociationStore::new(["site", "height"]);
    let mut presenter = ScriptedPresenter::new([Some(0), Some(2), Some(1), None]);

    let mut controller = SelectionController::new(&mut presenter, &catalog);
    let summary = controller.run(&mut store).expect("selection ran");

    assert_eq!(controller.state(), SelectionState::Terminal);
    assert_eq!(summary.committed, 1);
    assert_eq!(summary.declined, 1);
    assert_eq!(accession(&store, 0), Some("PO_0000003"));
    assert_eq!(accession(&store, 1), None);
    assert_eq!(presenter.remaining(), 0);
    assert_eq!(presenter.presented().len(), 5);
}

#[test]
fn declining_a_term_returns_to_column_menu() {
    let catalog = catalog();
    let mut store = AssociationStore::new(["site", "height"]);
    let mut presenter = ScriptedPresenter::new([Some(0), Some(2), Some(1), None, None]);

    let summary = SelectionController::new(&mut presenter, &catalog)
        .run(&mut store)
        .expect("selection ran");

    assert_eq!(summary.committed, 1);
    assert_eq!(summary.declined, 1);
    assert_eq!(accession(&store, 1), None);

    let titles: Vec<&str> = presenter
        .presented()
        .iter()
        .map(|(title, _)| title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec![
            "Select a column",
            "Select ontology term for \"site\"",
            "Select a column",
            "Select ontology term for \"height\"",
            "Select a column",
        ]
    );
}

#[test]
fn cancel_at_first_menu_ends_without_changes() {
    let catalog = catalog();
    let mut store = AssociationStore::new(["site", "height"]);
    let mut presenter = ScriptedPresenter::new([None]);

    let summary = SelectionController::new(&mut presenter, &catalog)
        .run(&mut store)
        .expect("selection ran");

    assert_eq!(summary.committed, 0);
    assert_eq!(store.associated_count(), 0);
    assert_eq!(presenter.presented().len(), 1);
}

#[test]
fn out_of_range_choice_counts_as_no_selection() {
    let catalog = catalog();
    let mut store = AssociationStore::new(["site"]);
    let mut presenter = ScriptedPresenter::new([Some(0), Some(3), Some(1)]);

    let summary = SelectionController::new(&mut presenter, &catalog)
        .run(&mut store)
        .expect("selection ran");

    assert_eq!(summary.committed, 0);
    assert_eq!(summary.declined, 1);
    assert_eq!(store.associated_count(), 0);
}

#[test]
fn new_pick_overwrites_existing_association() {
    let catalog = catalog();
    let mut store = AssociationStore::new(["height"]);
    store.associate(0, catalog.terms()[1].clone());
    let mut presenter = ScriptedPresenter::new([Some(0), Some(0)]);

    SelectionController::new(&mut presenter, &catalog)
        .run(&mut store)
        .expect("selection ran");

    assert_eq!(accession(&store, 0), Some("TO_0000207"));
    let (_, items) = &presenter.presented()[0];
    assert_eq!(items, &vec!["height => \"PATO_0000146\" (color)".to_string()]);
}

#[test]
fn step_walks_the_state_machine() {
    let catalog = catalog();
    let mut store = AssociationStore::new(["site"]);
    let mut summary = Default::default();
    let mut controller =
        SelectionController::new(ScriptedPresenter::new([Some(0), Some(1), None]), &catalog);

    assert_eq!(controller.state(), SelectionState::ChoosingColumn);
    let state = controller.step(&mut store, &mut summary).expect("column step");
    assert_eq!(state, SelectionState::ChoosingTerm { column: 0 });
    let state = controller.step(&mut store, &mut summary).expect("term step");
    assert_eq!(state, SelectionState::ChoosingColumn);
    let state = controller.step(&mut store, &mut summary).expect("exit step");
    assert_eq!(state, SelectionState::Terminal);
    assert_eq!(summary.committed, 1);
}

#[test]
fn menu_lines_truncate_long_labels() {
    let long_label = "a".repeat(60);
    let mut column = Column::new("height");
    column.associate(term("TO_0000207", &long_label));

    let line = column_line(&column);
    assert_eq!(
        line,
        format!("height => \"TO_0000207\" ({}...)", "a".repeat(37))
    );
    assert_eq!(
        term_line(&term("TO_0000207", &long_label)),
        format!("{}... (TO_0000207)", "a".repeat(42))
    );
    assert_eq!(column_line(&Column::new("site")), "site");
}

#[test]
fn truncate_respects_maximum_length() {
    assert_eq!(truncate("", 3), "");
    assert_eq!(truncate("foo", 3), "foo");
    assert_eq!(truncate("foobar", 6), "foobar");
    assert_eq!(truncate("foobar", 5), "fo...");

    let text = "the quick brown fox jumps over the lazy dog";
    for max_len in 4..text.len() + 2 {
        let shortened = truncate(text, max_len);
        assert!(shortened.chars().count() <= max_len);
        if text.len() > max_len {
            assert!(shortened.ends_with("..."));
            assert_eq!(&shortened[..max_len - 3], &text[..max_len - 3]);
        } else {
            assert_eq!(shortened, text);
        }
    }
}

#[test]
fn terminal_presenter_reads_numbered_choice() {
    let items = vec!["site".to_string(), "height".to_string()];
    let mut presenter = TerminalPresenter::new(Cursor::new("2\n"), Vec::new());

    let choice = presenter.present("Select a column", &items).expect("menu shown");

    assert_eq!(choice, Some(1));
    let output = String::from_utf8(presenter.into_output()).expect("utf-8 output");
    assert!(output.contains("Select a column"));
    assert!(output.contains("   1. site"));
    assert!(output.contains("   2. height"));
    assert!(output.contains("   3. Exit"));
}

#[test]
fn terminal_presenter_reprompts_then_exits() {
    let items = vec!["site".to_string(), "height".to_string()];
    let mut presenter = TerminalPresenter::new(Cursor::new("banana\n7\n3\n"), Vec::new());

    let choice = presenter.present("Select a column", &items).expect("menu shown");

    assert_eq!(choice, None);
    let output = String::from_utf8(presenter.into_output()).expect("utf-8 output");
    assert_eq!(output.matches("Enter a number between 1 and 3").count(), 2);
}

#[test]
fn terminal_presenter_treats_blank_and_eof_as_cancel() {
    let items = vec!["site".to_string()];

    let mut blank = TerminalPresenter::new(Cursor::new("\n"), Vec::new());
    assert_eq!(blank.present("menu", &items).expect("menu shown"), None);

    let mut quit = TerminalPresenter::new(Cursor::new("q\n"), Vec::new());
    assert_eq!(quit.present("menu", &items).expect("menu shown"), None);

    let mut eof = TerminalPresenter::new(Cursor::new(""), Vec::new());
    assert_eq!(eof.present("menu", &items).expect("menu shown"), None);
}
