    use super::*;

    #[test]
    fn test_osc52_writes_base64_sequence() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write("<div>").expect("write to Vec cannot fail");
        let out = String::from_utf8(clipboard.into_inner()).expect("sequence is ASCII");
        assert_eq!(out, format!("\x1b]52;c;{}\x07", STANDARD.encode("<div>")));
    }

    #[test]
    fn test_osc52_tmux_passthrough_doubles_escapes() {
        let mut clipboard = Osc52Clipboard::new(Vec::new()).with_tmux_passthrough(true);
        clipboard.write("x").expect("write to Vec cannot fail");
        let out = String::from_utf8(clipboard.into_inner()).expect("sequence is ASCII");
        assert!(out.starts_with("\x1bPtmux;\x1b\x1b]52;c;"));
        assert!(out.ends_with("\x07\x1b\\"));
    }

    #[test]
    fn test_osc52_rejects_oversized_payload() {
        let mut clipboard = Osc52Clipboard::new(Vec::new()).with_max_payload(8);
        let err = clipboard.write("this is far too long").unwrap_err();
        assert!(matches!(err, ClipboardError::Write(_)));
        assert!(clipboard.into_inner().is_empty(), "nothing should be written");
    }

    #[test]
    fn test_no_clipboard_is_unavailable() {
        assert_eq!(NoClipboard.write("x"), Err(ClipboardError::Unavailable));
    }
