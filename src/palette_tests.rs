    use super::*;

    #[test]
    fn test_palette_every_kind_has_an_entry() {
        for theme in [Theme::Light, Theme::Dark] {
            for kind in TokenKind::ALL {
                let style = style_for(kind, theme);
                assert!(style.fg.is_some(), "{kind:?} has no color under {theme:?}");
                assert_eq!(style.bg, Some(theme.background()));
            }
        }
    }

    #[test]
    fn test_palette_comment_is_italic_keyword_is_bold() {
        for theme in [Theme::Light, Theme::Dark] {
            let comment = style_for(TokenKind::Comment, theme);
            let keyword = style_for(TokenKind::Keyword, theme);
            assert!(comment.add_modifier.contains(Modifier::ITALIC));
            assert!(keyword.add_modifier.contains(Modifier::BOLD));
        }
    }

    #[test]
    fn test_palette_themes_differ() {
        for kind in TokenKind::ALL {
            assert_ne!(
                style_for(kind, Theme::Light).fg,
                style_for(kind, Theme::Dark).fg,
                "{kind:?} should change color with the theme"
            );
        }
    }

    #[test]
    fn test_palette_toggle_round_trips() {
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Light.toggle().toggle(), Theme::Light);
    }
