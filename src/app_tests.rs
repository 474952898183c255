    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::clipboard::NoClipboard;
    use crate::controller::{CopyState, DEFAULT_COPY_FEEDBACK};
    use crate::host::{ClipboardError, NotificationKind};

    /// Clipboard whose writes stay observable after it moves into the app.
    #[derive(Clone, Default)]
    struct SharedClipboard(Rc<RefCell<Vec<String>>>);

    impl Clipboard for SharedClipboard {
        fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
            self.0.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    /// `n` lines without a trailing newline, so the block has exactly `n` rows.
    fn numbered_lines(n: usize) -> String {
        (1..=n)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn make_app_with(sources: Vec<SourceBlock>, config: BlockConfig, viewport: usize) -> App {
        let mut app = App::new(
            sources,
            config,
            Theme::Dark,
            "test".to_string(),
            Box::new(NoClipboard),
        );
        app.resize(80, viewport);
        app
    }

    /// One block of `code_lines` lines: the page is `code_lines + 1` rows.
    fn make_app(code_lines: usize, viewport: usize) -> App {
        make_app_with(
            vec![SourceBlock::new(numbered_lines(code_lines), "text")],
            BlockConfig::default(),
            viewport,
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_app_page_height_includes_headers_and_spacers() {
        let app = make_app_with(
            vec![
                SourceBlock::new("a\nb", "text"),
                SourceBlock::new("c", "text"),
            ],
            BlockConfig::default(),
            10,
        );
        // header + 2, spacer, header + 1
        assert_eq!(app.document.total_height, 6);
        assert_eq!(app.document.block_rows, vec![0..3, 4..6]);
    }

    #[test]
    fn test_app_scroll_down_clamped() {
        let mut app = make_app(10, 5);
        app.scroll_down(100);
        // max_scroll = 11 - 5 = 6
        assert_eq!(app.scroll_offset, 6);
    }

    #[test]
    fn test_app_scroll_up_floor_at_zero() {
        let mut app = make_app(10, 5);
        app.scroll_offset = 2;
        app.scroll_up(100);
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_app_max_scroll_short_page() {
        let app = make_app(3, 10);
        assert_eq!(app.max_scroll(), 0);
        assert_eq!(app.scroll_percent(), 100);
    }

    #[test]
    fn test_app_visible_range() {
        let mut app = make_app(19, 5);
        assert_eq!(app.visible_range(), 0..5);
        app.scroll_to_bottom();
        assert_eq!(app.visible_range(), 15..20);
        assert_eq!(app.scroll_percent(), 100);
        app.scroll_to_top();
        assert_eq!(app.scroll_percent(), 0);
    }

    #[test]
    fn test_app_resize_clamps_scroll() {
        let mut app = make_app(19, 5);
        app.scroll_to_bottom();
        app.resize(80, 15);
        assert_eq!(app.scroll_offset, 5);
    }

    #[test]
    fn test_app_handle_key_scrolling() {
        let mut app = make_app(30, 10);
        app.handle_key(key(KeyCode::Char('j')));
        assert_eq!(app.scroll_offset, 1);
        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(app.scroll_offset, 6);
        app.handle_key(key(KeyCode::Char('k')));
        assert_eq!(app.scroll_offset, 5);
        app.handle_key(key(KeyCode::Char('G')));
        assert_eq!(app.scroll_offset, app.max_scroll());
        app.handle_key(key(KeyCode::Home));
        assert_eq!(app.scroll_offset, 0);
    }

    #[test]
    fn test_app_horizontal_scroll_saturates() {
        let mut app = make_app_with(
            vec![SourceBlock::new("x".repeat(200), "text")],
            BlockConfig::default(),
            10,
        );
        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.h_scroll, H_SCROLL_STEP);
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.h_scroll, 0);
    }

    #[test]
    fn test_app_horizontal_scroll_stops_at_widest_row() {
        let mut app = make_app_with(
            vec![SourceBlock::new("x".repeat(200), "text")],
            BlockConfig::default(),
            10,
        );
        // 80 columns minus a 1-digit gutter and its padding leaves 76.
        assert_eq!(app.max_h_scroll(), 200 - 76);
        for _ in 0..100 {
            app.handle_key(key(KeyCode::Right));
        }
        assert_eq!(app.h_scroll, 124);

        app.resize(100, 10);
        assert_eq!(app.h_scroll, 200 - 96, "wider terminal clamps the offset");

        app.handle_key(key(KeyCode::Char('w')));
        assert_eq!(app.max_h_scroll(), 0);
        assert_eq!(app.h_scroll, 0, "wrapped rows do not scroll sideways");
    }

    #[test]
    fn test_app_short_rows_do_not_scroll_sideways() {
        let mut app = make_app(3, 10);
        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.h_scroll, 0);
    }

    #[test]
    fn test_app_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            let mut app = make_app(1, 10);
            app.handle_key(key(code));
            assert!(app.quit);
        }
        let mut app = make_app(1, 10);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.quit);
        assert!(!app.has_pending_work(), "ctrl-c does not copy");
    }

    #[test]
    fn test_app_help_overlay_swallows_next_key() {
        let mut app = make_app(30, 10);
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);
        app.handle_key(key(KeyCode::Char('j')));
        assert!(!app.show_help);
        assert_eq!(app.scroll_offset, 0);

        app.handle_key(key(KeyCode::Char('?')));
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.quit);
    }

    #[test]
    fn test_app_focus_cycles_and_reveals_block() {
        let sources = (0..3)
            .map(|i| SourceBlock::new(numbered_lines(10), "text").with_key(format!("b{i}")))
            .collect();
        let mut app = make_app_with(sources, BlockConfig::default(), 5);

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, 1);
        assert_eq!(app.scroll_offset, app.document.block_rows[1].start);

        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, 0, "focus wraps around");
        assert_eq!(app.scroll_offset, 0);

        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.focus, 2);
    }

    #[test]
    fn test_app_copy_runs_after_frame() {
        let clipboard = SharedClipboard::default();
        let mut app = App::new(
            vec![SourceBlock::new("let a = 1;\n", "javascript")],
            BlockConfig::default(),
            Theme::Dark,
            "test".to_string(),
            Box::new(clipboard.clone()),
        );
        app.resize(80, 10);
        let t0 = Instant::now();

        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(app.blocks[0].state().copy_state, CopyState::Copying);
        assert!(app.has_pending_work());
        assert!(clipboard.0.borrow().is_empty(), "nothing written before the frame");

        assert!(app.run_pending(t0));
        assert_eq!(*clipboard.0.borrow(), vec!["let a = 1;\n".to_string()]);
        assert_eq!(app.blocks[0].state().copy_state, CopyState::Succeeded);
        assert_eq!(app.toasts.len(), 1);
        assert_eq!(
            app.toasts.latest().map(|t| t.notification.kind),
            Some(NotificationKind::Success)
        );
        assert!(!app.run_pending(t0), "nothing left to run");

        // Copy feedback (2s) is due before the toast (3s).
        assert_eq!(app.next_deadline(), Some(t0 + DEFAULT_COPY_FEEDBACK));
        assert!(app.tick(t0 + DEFAULT_COPY_FEEDBACK));
        assert_eq!(app.blocks[0].state().copy_state, CopyState::Idle);
        assert_eq!(app.toasts.len(), 1);
        assert!(app.tick(t0 + TOAST_DURATION));
        assert!(app.toasts.is_empty());
        assert!(app.next_deadline().is_none());
    }

    #[test]
    fn test_app_copy_without_clipboard_reports_failure() {
        let mut app = make_app(1, 10);
        app.handle_key(key(KeyCode::Char('y')));
        app.run_pending(Instant::now());
        assert_eq!(app.blocks[0].state().copy_state, CopyState::Failed);
        assert_eq!(
            app.toasts.latest().map(|t| t.notification.kind),
            Some(NotificationKind::Failure)
        );
    }

    #[test]
    fn test_app_theme_toggle_reaches_every_block() {
        let mut app = make_app_with(
            vec![SourceBlock::new("a", "text"), SourceBlock::new("b", "text")],
            BlockConfig::default(),
            10,
        );
        let height = app.document.total_height;
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.theme, Theme::Light);
        assert!(app.blocks.iter().all(|b| b.state().theme == Theme::Light));
        assert_eq!(app.document.total_height, height);
    }

    #[test]
    fn test_app_wrap_toggle_relayouts_focused_block() {
        let mut app = make_app_with(
            vec![SourceBlock::new("x".repeat(200), "text")],
            BlockConfig::default(),
            10,
        );
        assert_eq!(app.document.total_height, 2);
        app.handle_key(key(KeyCode::Char('w')));
        assert!(app.blocks[0].state().wrap_enabled);
        // 80 columns minus a 1-digit gutter and its padding leaves 76.
        assert_eq!(app.document.total_height, 1 + 3);
    }

    #[test]
    fn test_app_lazy_block_loads_when_scrolled_into_view() {
        let config = BlockConfig {
            lazy_threshold: 64,
            ..BlockConfig::default()
        };
        let mut app = make_app_with(
            vec![
                SourceBlock::new(numbered_lines(20), "text"),
                SourceBlock::new(numbered_lines(20), "rust"),
            ],
            config,
            5,
        );
        assert!(!app.blocks[0].is_loaded());
        assert!(!app.blocks[1].is_loaded());

        app.signal_visible_blocks();
        assert!(app.run_pending(Instant::now()));
        assert!(app.blocks[0].is_loaded());
        assert!(!app.blocks[1].is_loaded(), "off-screen block stays deferred");

        app.scroll_to_bottom();
        app.signal_visible_blocks();
        app.run_pending(Instant::now());
        assert!(app.blocks[1].is_loaded());
    }

    #[test]
    fn test_app_enter_materializes_focused_block() {
        let config = BlockConfig {
            lazy_threshold: 1,
            ..BlockConfig::default()
        };
        let mut app = make_app_with(vec![SourceBlock::new("fn a() {}", "rust")], config, 10);
        app.handle_key(key(KeyCode::Enter));
        assert!(app.has_pending_work());
        app.run_pending(Instant::now());
        assert!(app.blocks[0].is_loaded());
        assert!(matches!(
            app.document.lines[1],
            crate::document::DocumentLine::Code { .. }
        ));
    }

    #[test]
    fn test_app_unmount_drops_pending_work() {
        let mut app = make_app(1, 10);
        app.handle_key(key(KeyCode::Char('c')));
        app.unmount();
        assert!(!app.has_pending_work());
        assert!(!app.run_pending(Instant::now()));
    }

    #[test]
    fn test_app_empty_page() {
        let mut app = make_app_with(Vec::new(), BlockConfig::default(), 10);
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(app.focus, 0);
        assert_eq!(app.document.total_height, 0);
        assert!(!app.has_pending_work());
    }
