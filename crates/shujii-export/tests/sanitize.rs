use shujii_export::sanitize::{is_renderable, retain_renderable, sanitize};

#[test]
fn strips_heading_and_emphasis_markers() {
    assert_eq!(sanitize("### Title\n**bold** text"), "Title\nbold text");
}

#[test]
fn rejoins_orphan_number_with_next_line() {
    assert_eq!(sanitize("1.\nFoo bar\n"), "1. Foo bar");
}

#[test]
fn rejoins_full_width_and_indented_numbers() {
    let raw = "  2．\n  症状の整理です。\n3)\n処方箋です。";
    assert_eq!(sanitize(raw), "2. 症状の整理です。\n3. 処方箋です。");
}

#[test]
fn leaves_orphan_number_before_blank_line() {
    assert_eq!(sanitize("本文\n1.\n\n次の段落"), "本文\n1.\n\n次の段落");
}

#[test]
fn drops_characters_above_bmp() {
    assert_eq!(sanitize("順調🏃です"), "順調です");
}

#[test]
fn drops_variation_selectors_and_joiners() {
    assert_eq!(sanitize("⚠\u{FE0F} 注意\u{200D}点"), "⚠ 注意点");
}

#[test]
fn strips_comment_label_but_keeps_body() {
    assert_eq!(
        sanitize("主治医コメント：全体として良好です。"),
        "全体として良好です。"
    );
    assert_eq!(sanitize("診断コメント: 次の一歩です。"), "次の一歩です。");
}

#[test]
fn drops_lines_restating_the_title() {
    let raw = "【IT主治医コメント】\n# IT主治医診断レポート\nIT主治医カルテ：\n1. 総評です。";
    assert_eq!(sanitize(raw), "1. 総評です。");
}

#[test]
fn keeps_title_phrase_inside_prose() {
    let raw = "IT主治医コメントとして、まずは入力の徹底をおすすめします。";
    assert_eq!(sanitize(raw), raw);
}

#[test]
fn drops_bold_label_lines() {
    assert_eq!(sanitize("**主治医コメント：**\n本文です。"), "本文です。");
}

#[test]
fn converts_list_markers_to_bullets() {
    let raw = "- 項目A\n* 項目B\n• 項目C\n　－ 全角ダッシュは対象外";
    assert_eq!(
        sanitize(raw),
        "・項目A\n・項目B\n・項目C\n　－ 全角ダッシュは対象外"
    );
}

#[test]
fn list_marker_before_number_is_removed() {
    assert_eq!(sanitize("- 1. 最初の手順"), "1. 最初の手順");
}

#[test]
fn removes_full_width_asterisks() {
    assert_eq!(sanitize("＊重要＊なポイント"), "重要なポイント");
}

#[test]
fn heading_before_numbered_section() {
    assert_eq!(sanitize("## 1. 総評\n本文"), "1. 総評\n本文");
}

#[test]
fn horizontal_rules_become_blank_lines() {
    assert_eq!(sanitize("前半\n---\n後半"), "前半\n\n後半");
}

#[test]
fn collapses_long_blank_runs_to_two() {
    assert_eq!(sanitize("a\n\n\n\n\n\nb"), "a\n\n\nb");
    assert_eq!(sanitize("a\n\nb"), "a\n\nb");
}

#[test]
fn normalizes_line_endings_and_tabs() {
    assert_eq!(sanitize("一行目\r\n二行目\r三行目\t末尾"), "一行目\n二行目\n三行目 末尾");
}

#[test]
fn trims_surrounding_blank_lines() {
    assert_eq!(sanitize("\n\n  \n本文\n\n"), "本文");
}

#[test]
fn plain_text_is_unchanged() {
    let raw = "1. 総評\n仕組みづくりは進んでいます。\n\n2. 症状\nマスター更新が滞りがちです。";
    assert_eq!(sanitize(raw), raw);
}

#[test]
fn typical_model_output() {
    let raw = "# IT主治医コメント\n\n\
               **1.**\n\
               **総評**：回復期に入っています 🏃\n\n\
               2.\n\
               - 実績入力の抜け漏れ\n\
               - マスター更新の遅れ\n\n\n\n\
               3. 自由記述から見える課題\n";
    let expected = "1. 総評：回復期に入っています\n\n2. ・実績入力の抜け漏れ\n・マスター更新の遅れ\n\n\n3. 自由記述から見える課題";
    assert_eq!(sanitize(raw), expected);
}

#[test]
fn sanitize_is_idempotent_on_messy_input() {
    let raw = "*#*# 主治医コメント：**\n\n1.\n\n2.\n- - x\n＊＊\n🎉\u{FE0F}\n\n\n\n";
    let once = sanitize(raw);
    assert_eq!(sanitize(&once), once);
}

#[test]
fn renderable_characters() {
    assert!(is_renderable('あ'));
    assert!(is_renderable('A'));
    assert!(is_renderable('⚠'));
    assert!(!is_renderable('🏃'));
    assert!(!is_renderable('\u{FE0F}'));
    assert!(!is_renderable('\u{7}'));
    assert_eq!(retain_renderable("🚨 IT機能不全"), " IT機能不全");
}
