use shujii_export::error::ExportError;
use shujii_export::layout::{Canvas, DrawOp, char_columns, display_columns, wrap_text};
use shujii_export::styles::DocumentStyles;

#[test]
fn empty_text_is_one_blank_line() {
    assert_eq!(wrap_text("", 10), vec![String::new()]);
}

#[test]
fn empty_paragraphs_are_kept() {
    assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
}

#[test]
fn full_width_text_breaks_anywhere() {
    assert_eq!(wrap_text("あいうえおか", 10), vec!["あいうえお", "か"]);
}

#[test]
fn closing_punctuation_hangs() {
    assert_eq!(wrap_text("あいうえお。かき", 10), vec!["あいうえお。", "かき"]);
}

#[test]
fn only_one_mark_hangs_per_line() {
    assert_eq!(
        wrap_text("あいうえお。。か", 10),
        vec!["あいうえお。", "。か"]
    );
}

#[test]
fn punctuation_runs_stay_near_the_margin() {
    for text in ["ー".repeat(80), format!("{}{}", "あ".repeat(49), "。".repeat(30))] {
        let lines = wrap_text(&text, 100);
        assert!(lines.len() > 1, "{text}");
        for line in &lines {
            assert!(display_columns(line) <= 102, "{line}");
        }
        assert_eq!(lines.concat(), text);
    }
}

#[test]
fn ascii_words_break_at_spaces() {
    assert_eq!(wrap_text("hello world foo", 11), vec!["hello world", "foo"]);
}

#[test]
fn overlong_words_are_split() {
    assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
}

#[test]
fn mixed_text_stays_within_width() {
    let text = "Q6: 1  - 経営会議では「Excelで加工し直した資料」ではなく、システムデータそのままを使っていますか？";
    for line in wrap_text(text, 40) {
        // one hanging punctuation mark may exceed the limit
        assert!(display_columns(&line) <= 42, "{line}");
    }
}

#[test]
fn column_widths() {
    assert_eq!(char_columns('a'), 1);
    assert_eq!(char_columns('ｱ'), 1);
    assert_eq!(char_columns('あ'), 2);
    assert_eq!(char_columns('（'), 2);
    assert_eq!(display_columns("8 / 10点"), 8);
}

#[test]
fn default_styles_columns() {
    let styles = DocumentStyles::default();
    assert_eq!(styles.max_columns(styles.body_size), 100);
    assert_eq!(styles.max_columns(styles.summary_size), 90);
    assert!(styles.top_y() > styles.min_y);
}

#[test]
fn drawing_requires_a_font() {
    let mut canvas = Canvas::new();
    let err = canvas.draw_string(40.0, 800.0, "x").unwrap_err();
    assert!(matches!(err, ExportError::NoFontSelected { page: 1 }));
}

#[test]
fn font_does_not_survive_page_break() {
    let mut canvas = Canvas::new();
    canvas.set_font(10.0);
    canvas.draw_string(40.0, 800.0, "first").unwrap();
    canvas.show_page();

    let err = canvas.draw_string(40.0, 800.0, "second").unwrap_err();
    assert!(matches!(err, ExportError::NoFontSelected { page: 2 }));

    canvas.set_font(10.0);
    canvas.draw_string(40.0, 800.0, "second").unwrap();

    let pages = canvas.finish();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].ops[0], DrawOp::SetFont { size: 10.0 });
}

#[test]
fn repeated_font_selection_is_recorded_once() {
    let mut canvas = Canvas::new();
    canvas.set_font(10.0);
    canvas.set_font(10.0);
    canvas.set_font(11.0);
    let pages = canvas.finish();
    assert_eq!(pages[0].ops.len(), 2);
}

#[test]
fn empty_canvas_has_one_page() {
    let canvas = Canvas::new();
    assert_eq!(canvas.page_count(), 0);
    assert_eq!(canvas.finish().len(), 1);
}
