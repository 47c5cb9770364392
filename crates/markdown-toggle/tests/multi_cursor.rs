//! Multi-cursor toggle validation
//!
//! 1. Independence: toggling every selection at once must give the same text as toggling them
//!    one at a time, bottom-to-top.
//! 2. Stability: the resulting selections come back in the caller's order and still cover the
//!    text they covered before.

use markdown_toggle::{
    DelimiterPair, EditorHost, EditorSession, MarkdownStyle, Position, Selection, toggle_style,
    toggle_wrap_smart,
};
use pretty_assertions::assert_eq;
use rand::Rng;
use rand::seq::SliceRandom;

fn sel(l1: usize, c1: usize, l2: usize, c2: usize) -> Selection {
    Selection::forward(Position::new(l1, c1), Position::new(l2, c2))
}

fn caret(line: usize, column: usize) -> Selection {
    Selection::caret(Position::new(line, column))
}

fn session_with(text: &str, selections: Vec<Selection>) -> EditorSession {
    let mut session = EditorSession::new(text);
    session.set_selections(selections);
    session
}

/// Toggle each selection on its own, bottom-to-top, and return the final text.
fn toggle_one_at_a_time(text: &str, selections: &[Selection], pair: &DelimiterPair) -> String {
    let mut ordered = selections.to_vec();
    ordered.sort_by(|a, b| b.start.cmp(&a.start).then(b.end.cmp(&a.end)));

    let mut session = EditorSession::new(text);
    for selection in ordered {
        session.set_selection(selection);
        toggle_wrap_smart(&mut session, pair).unwrap();
    }
    session.text()
}

#[test]
fn test_words_on_one_line() {
    let mut session = session_with("alpha beta gamma", vec![sel(1, 1, 1, 6), sel(1, 12, 1, 17)]);
    toggle_style(&mut session, MarkdownStyle::Bold).unwrap();

    assert_eq!(session.text(), "**alpha** beta **gamma**");
    assert_eq!(
        session.selections_ref(),
        &[sel(1, 3, 1, 8), sel(1, 18, 1, 23)]
    );
}

#[test]
fn test_results_follow_input_order() {
    let top_first = vec![sel(1, 1, 1, 4), sel(2, 1, 2, 4)];
    let bottom_first = vec![sel(2, 1, 2, 4), sel(1, 1, 1, 4)];

    let mut a = session_with("one\ntwo", top_first);
    let mut b = session_with("one\ntwo", bottom_first);
    toggle_style(&mut a, MarkdownStyle::InlineCode).unwrap();
    toggle_style(&mut b, MarkdownStyle::InlineCode).unwrap();

    assert_eq!(a.text(), "`one`\n`two`");
    assert_eq!(a.text(), b.text());
    assert_eq!(a.selections_ref(), &[sel(1, 2, 1, 5), sel(2, 2, 2, 5)]);
    assert_eq!(b.selections_ref(), &[sel(2, 2, 2, 5), sel(1, 2, 1, 5)]);
}

#[test]
fn test_two_carets_on_one_line() {
    let mut session = session_with("ab cd", vec![caret(1, 3), caret(1, 6)]);
    toggle_style(&mut session, MarkdownStyle::Italic).unwrap();

    assert_eq!(session.text(), "ab__ cd__");
    assert_eq!(session.selections_ref(), &[caret(1, 4), caret(1, 9)]);

    toggle_style(&mut session, MarkdownStyle::Italic).unwrap();
    assert_eq!(session.text(), "ab cd");
    assert_eq!(session.selections_ref(), &[caret(1, 3), caret(1, 6)]);
}

#[test]
fn test_mixed_actions_across_lines() {
    let text = "plain\n~~struck~~\n~~near~~\n";
    let selections = vec![
        // wrap
        sel(1, 1, 1, 6),
        // explicit unwrap
        sel(2, 1, 2, 11),
        // adjacent unwrap
        sel(3, 3, 3, 7),
        // caret wrap on the trailing empty line
        caret(4, 1),
    ];
    let pair = MarkdownStyle::Strikethrough.delimiters();
    let expected = toggle_one_at_a_time(text, &selections, &pair);

    let mut session = session_with(text, selections);
    toggle_wrap_smart(&mut session, &pair).unwrap();

    assert_eq!(session.text(), "~~plain~~\nstruck\nnear\n~~~~");
    assert_eq!(session.text(), expected);
    assert_eq!(
        session.selections_ref(),
        &[sel(1, 3, 1, 8), sel(2, 1, 2, 7), sel(3, 1, 3, 5), caret(4, 3)]
    );
}

#[test]
fn test_empty_selection_list_is_noop() {
    let mut session = session_with("text", Vec::new());
    toggle_style(&mut session, MarkdownStyle::Bold).unwrap();
    assert_eq!(session.text(), "text");
    assert!(session.selections_ref().is_empty());
    assert!(!session.buffer().unwrap().can_undo());
}

/// Random lowercase words over a few lines, returned with each word's selection.
fn random_document(rng: &mut impl Rng) -> (String, Vec<(Selection, String)>) {
    let mut text = String::new();
    let mut words = Vec::new();
    let line_count = rng.gen_range(1..=6);

    for line in 1..=line_count {
        if line > 1 {
            text.push('\n');
        }
        let mut column = 1;
        for i in 0..rng.gen_range(1..=8) {
            if i > 0 {
                text.push(' ');
                column += 1;
            }
            let len = rng.gen_range(1..=6);
            let word: String = (0..len)
                .map(|_| rng.gen_range(b'a'..=b'e') as char)
                .collect();
            text.push_str(&word);
            words.push((sel(line, column, line, column + len), word));
            column += len;
        }
    }
    (text, words)
}

#[test]
fn test_random_word_selections_round_trip() {
    let mut rng = rand::thread_rng();
    let pairs = [
        DelimiterPair::symmetric("**"),
        DelimiterPair::symmetric("_"),
        DelimiterPair::new("<kbd>", "</kbd>"),
    ];

    for _ in 0..200 {
        let (text, mut words) = random_document(&mut rng);
        words.shuffle(&mut rng);
        let keep = rng.gen_range(1..=words.len());
        words.truncate(keep);

        let selections: Vec<Selection> = words.iter().map(|(s, _)| *s).collect();
        let pair = pairs.choose(&mut rng).unwrap();

        let mut session = session_with(&text, selections.clone());
        toggle_wrap_smart(&mut session, pair).unwrap();

        assert_eq!(
            session.text(),
            toggle_one_at_a_time(&text, &selections, pair),
            "text: {text:?}"
        );
        for (selection, (_, word)) in session.selections_ref().iter().zip(&words) {
            assert_eq!(session.selected_text(selection).as_deref(), Some(word.as_str()));
        }

        toggle_wrap_smart(&mut session, pair).unwrap();
        assert_eq!(session.text(), text);
        assert_eq!(session.selections_ref(), selections.as_slice());
    }
}
