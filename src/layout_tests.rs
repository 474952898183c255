    use super::*;
    use crate::demo;
    use crate::tokenizer::tokenize;

    fn rows_text(rows: &[VisualRow<'_>]) -> Vec<String> {
        rows.iter()
            .map(|r| r.segments.iter().map(|s| s.text).collect())
            .collect()
    }

    #[test]
    fn test_layout_empty_tokens() {
        let layout = layout(&[], false);
        assert!(layout.lines.is_empty());
        assert_eq!(layout.max_width(), 0);
    }

    #[test]
    fn test_layout_splits_at_newlines() {
        let tokens = tokenize("let a = 1;\nlet b = 2;", "javascript");
        let layout = layout(&tokens, false);
        assert_eq!(layout.lines.len(), 2);
        assert_eq!(layout.lines[0].number(), 1);
        assert_eq!(layout.lines[1].number(), 2);
        assert!(layout.lines[0].tokens.last().is_some_and(Token::is_newline));
    }

    #[test]
    fn test_layout_trailing_newline_begins_empty_line() {
        let tokens = tokenize("a\n", "text");
        let layout = layout(&tokens, false);
        assert_eq!(layout.lines.len(), 2);
        assert_eq!(layout.lines[1].number(), 2);
        assert!(layout.lines[1].tokens.is_empty());
        assert_eq!(visual_rows(&layout.lines[1], 80, true).len(), 1);

        let tokens = tokenize("a\n\nb", "text");
        let layout = super::layout(&tokens, false);
        assert_eq!(layout.lines.len(), 3);
        assert_eq!(layout.lines[1].width(), 0, "blank middle line is kept");

        let tokens = tokenize("a\r\n", "text");
        assert_eq!(super::layout(&tokens, false).lines.len(), 2);
    }

    #[test]
    fn test_line_count_matches_layout() {
        for code in ["", "a", "a\n", "a\nb", "\n", "\n\n", "x\r\ny\r\n", "a\rb"] {
            let tokens = tokenize(code, "text");
            assert_eq!(line_count(code), layout(&tokens, false).lines.len(), "{code:?}");
            assert_eq!(source_lines(code).count(), line_count(code), "{code:?}");
        }
    }

    #[test]
    fn test_source_lines_strip_terminators() {
        let lines: Vec<&str> = source_lines("one\r\ntwo\n").collect();
        assert_eq!(lines, vec!["one", "two", ""]);
        assert_eq!(source_lines("").count(), 0);
        assert_eq!(source_lines("a\rb").collect::<Vec<_>>(), vec!["a\rb"]);
    }

    #[test]
    fn test_layout_is_a_partition_of_the_tokens() {
        for block in demo::sample_blocks() {
            let tokens = tokenize(block.code(), block.language());
            let layout = layout(&tokens, false);
            let flattened: Vec<Token> = layout
                .lines
                .iter()
                .flat_map(|l| l.tokens.iter().cloned())
                .collect();
            assert_eq!(flattened, tokens);
            assert_eq!(layout.token_count(), tokens.len());
            assert_eq!(layout.char_count(), block.code().chars().count());
            assert_eq!(layout.lines.len(), line_count(block.code()));
        }
    }

    #[test]
    fn test_layout_wrap_flag_does_not_change_lines() {
        let block = &demo::sample_blocks()[2];
        let tokens = tokenize(block.code(), block.language());
        let off = layout(&tokens, false);
        let on = layout(&tokens, true);
        assert_eq!(off.lines, on.lines);
        assert!(on.wrap_enabled);
        assert!(!off.wrap_enabled);
    }

    #[test]
    fn test_visual_rows_unwrapped_is_one_row_per_line() {
        let tokens = tokenize(&"x".repeat(200), "text");
        let layout = layout(&tokens, false);
        let rows = layout.visual_rows(20);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows_text(&rows)[0].len(), 200);
    }

    #[test]
    fn test_visual_rows_wrap_breaks_at_width() {
        let tokens = tokenize(&"x".repeat(50), "text");
        let layout = layout(&tokens, true);
        let rows = layout.visual_rows(20);
        assert_eq!(rows.len(), 3);
        assert!(!rows[0].continuation);
        assert!(rows[1].continuation && rows[2].continuation);
        let text = rows_text(&rows);
        assert_eq!(text[0].len(), 20);
        assert_eq!(text[2].len(), 10);
    }

    #[test]
    fn test_visual_rows_wrap_splits_inside_tokens_keeping_kinds() {
        let tokens = tokenize("let value = 12345;", "javascript");
        let layout = layout(&tokens, true);
        let rows = visual_rows(&layout.lines[0], 8, true);
        let text = rows_text(&rows);
        assert_eq!(text.concat(), "let value = 12345;");
        assert!(text.iter().all(|t| str_width(t) <= 8));
        // "value" straddles the first break and keeps its kind on both sides.
        assert_eq!(
            rows[0].segments.last().map(|s| (s.kind, s.text)),
            Some((TokenKind::Identifier, "valu"))
        );
        assert_eq!(
            rows[1].segments.first().map(|s| (s.kind, s.text)),
            Some((TokenKind::Identifier, "e"))
        );
    }

    #[test]
    fn test_visual_rows_exact_fit_has_no_empty_continuation() {
        let tokens = tokenize(&"y".repeat(16), "text");
        let layout = layout(&tokens, true);
        assert_eq!(layout.visual_rows(8).len(), 2);
    }

    #[test]
    fn test_visual_rows_wide_chars_respect_columns() {
        let tokens = tokenize("日本語のテキスト", "text");
        let layout = layout(&tokens, true);
        let rows = layout.visual_rows(5);
        for text in rows_text(&rows) {
            assert!(str_width(&text) <= 5, "row {text:?} overflows");
        }
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_visual_rows_char_wider_than_row_gets_own_row() {
        let tokens = tokenize("日a", "text");
        let layout = layout(&tokens, true);
        let rows = layout.visual_rows(1);
        assert_eq!(rows_text(&rows), vec!["日".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_visual_rows_zero_width_disables_wrap() {
        let tokens = tokenize("abcdef", "text");
        let layout = layout(&tokens, true);
        assert_eq!(layout.visual_rows(0).len(), 1);
    }

    #[test]
    fn test_visual_rows_hide_newline_tokens() {
        let tokens = tokenize("a\nb\n", "text");
        let layout = layout(&tokens, false);
        for row in layout.visual_rows(80) {
            assert!(row.segments.iter().all(|s| s.text != "\n"));
        }
    }

    #[test]
    fn test_line_width_expands_tabs() {
        let tokens = tokenize("\tx", "text");
        let layout = layout(&tokens, false);
        assert_eq!(layout.lines[0].width(), TAB_WIDTH + 1);
    }

    #[test]
    fn test_gutter_width() {
        assert_eq!(gutter_width(0), 1);
        assert_eq!(gutter_width(9), 1);
        assert_eq!(gutter_width(10), 2);
        assert_eq!(gutter_width(1234), 4);
    }
