use markdown_toggle::{
    DelimiterPair, EditorHost, EditorSession, MarkdownStyle, Position, Selection, toggle_style,
    toggle_wrap_smart,
};

fn main() {
    let mut session = EditorSession::new("Bright flat\nclose to the metro\n");

    // One cursor per line, each over a single word.
    session.set_selections(vec![
        Selection::forward(Position::new(1, 1), Position::new(1, 7)),
        Selection::forward(Position::new(2, 14), Position::new(2, 19)),
    ]);
    toggle_style(&mut session, MarkdownStyle::Bold).unwrap();
    assert_eq!(session.text(), "**Bright** flat\nclose to the **metro**\n");

    // The selections still cover the words, so the same toggle unwraps them.
    toggle_style(&mut session, MarkdownStyle::Bold).unwrap();
    assert_eq!(session.text(), "Bright flat\nclose to the metro\n");

    // Any pair works, including asymmetric ones.
    let kbd = DelimiterPair::new("<kbd>", "</kbd>");
    session.set_selection(Selection::caret(Position::new(2, 1)));
    toggle_wrap_smart(&mut session, &kbd).unwrap();
    assert_eq!(
        session.text(),
        "Bright flat\n<kbd></kbd>close to the metro\n"
    );
    assert_eq!(
        session.selections_ref(),
        &[Selection::caret(Position::new(2, 6))]
    );

    // One undo reverts the whole toggle.
    session.undo();
    assert_eq!(session.text(), "Bright flat\nclose to the metro\n");
}
