    use super::*;

    #[test]
    fn test_parse_fenced_code_block_language() {
        let blocks = extract_code_blocks("# Title\n\n```rust\nfn main() {}\n```\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language(), "rust");
        assert_eq!(blocks[0].code(), "fn main() {}\n");
    }

    #[test]
    fn test_parse_skips_prose() {
        let md = "Some *text* and `inline code`.\n\n- a list\n\n> quote\n";
        assert!(extract_code_blocks(md).is_empty());
    }

    #[test]
    fn test_parse_multiple_blocks_in_order() {
        let md = "```js\nconsole.log('x')\n```\n\ntext\n\n```python\nprint('y')\n```\n";
        let blocks = extract_code_blocks(md);
        let languages: Vec<_> = blocks.iter().map(SourceBlock::language).collect();
        assert_eq!(languages, vec!["js", "python"]);
        assert_eq!(blocks[1].code(), "print('y')\n");
    }

    #[test]
    fn test_parse_info_string_takes_first_word() {
        let md = "```rust,ignore\nlet x = 1;\n```\n\n```python title=\"a.py\"\npass\n```\n";
        let blocks = extract_code_blocks(md);
        assert_eq!(blocks[0].language(), "rust");
        assert_eq!(blocks[1].language(), "python");
    }

    #[test]
    fn test_parse_fence_without_language() {
        let blocks = extract_code_blocks("```\nplain text\n```\n");
        assert_eq!(blocks[0].language(), "");
        assert_eq!(blocks[0].display_language(), "text");
    }

    #[test]
    fn test_parse_indented_code_block() {
        let blocks = extract_code_blocks("para\n\n    indented line\n    second\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code(), "indented line\nsecond\n");
    }

    #[test]
    fn test_parse_code_keeps_markup_verbatim() {
        let md = "```html\n<div>&amp;</div>\n```\n";
        let blocks = extract_code_blocks(md);
        assert_eq!(blocks[0].code(), "<div>&amp;</div>\n");
    }

    #[test]
    fn test_parse_identical_blocks_get_distinct_keys() {
        let md = "```sh\nls\n```\n\n```sh\nls\n```\n";
        let blocks = extract_code_blocks(md);
        assert_eq!(blocks.len(), 2);
        assert_ne!(blocks[0].instance_key(), blocks[1].instance_key());
        assert!(blocks[0].instance_key().starts_with("sh-ls"));
    }

    #[test]
    fn test_parse_empty_fence() {
        let blocks = extract_code_blocks("```rust\n```\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].code(), "");
    }

    #[test]
    fn test_language_for_path() {
        assert_eq!(language_for_path("src/main.rs"), "rs");
        assert_eq!(language_for_path("app.PY"), "py");
        assert_eq!(language_for_path("/home/u/.bashrc"), "bash");
        assert_eq!(language_for_path("Makefile"), "");
    }

    #[test]
    fn test_is_markdown() {
        assert!(is_markdown("README.md"));
        assert!(is_markdown("notes.Markdown"));
        assert!(!is_markdown("main.rs"));
        assert!(!is_markdown("-"));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = load("/definitely/not/here.rs", None).unwrap_err();
        assert!(matches!(err, InputError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.rs"));
    }

    #[test]
    fn test_load_source_file_is_one_block() {
        let path = std::env::temp_dir().join(format!("codeink-load-{}.py", std::process::id()));
        std::fs::write(&path, "print('hi')\n").expect("write temp file");
        let path_str = path.to_string_lossy().into_owned();

        let blocks = load(&path_str, None).expect("load");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language(), "py");
        assert_eq!(blocks[0].code(), "print('hi')\n");

        let overridden = load(&path_str, Some("text")).expect("load");
        assert_eq!(overridden[0].language(), "text");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_markdown_extracts_blocks_unless_overridden() {
        let path = std::env::temp_dir().join(format!("codeink-load-{}.md", std::process::id()));
        let md = "# Demo\n\n```js\nlet a = 1;\n```\n";
        std::fs::write(&path, md).expect("write temp file");
        let path_str = path.to_string_lossy().into_owned();

        let blocks = load(&path_str, None).expect("load");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language(), "js");

        let raw = load(&path_str, Some("markdown")).expect("load");
        assert_eq!(raw[0].code(), md);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_markdown_without_code_is_shown_whole() {
        let path = std::env::temp_dir().join(format!("codeink-prose-{}.md", std::process::id()));
        std::fs::write(&path, "just prose\n").expect("write temp file");
        let path_str = path.to_string_lossy().into_owned();

        let blocks = load(&path_str, None).expect("load");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language(), "md");

        std::fs::remove_file(&path).ok();
    }
