#[cfg(test)]
mod verify {
    use std::path::Path;

    use otf::language::*;
    use otf::parsing::{self, ParsingError};

    #[test]
    fn missing_file() {
        let filename = Path::new("tests/samples/does-not-exist.toml");
        let result = parsing::load(filename);

        match result {
            Err(error) => {
                assert_eq!(error.problem, "File not found");
                assert_eq!(error.filename, filename);
            }
            Ok(_) => panic!("expected a loading error"),
        }
    }

    #[test]
    fn workspace_blocks_in_order() {
        let filename = Path::new("tests/samples/fireball.toml");
        let content = parsing::load(filename).unwrap();
        let workspace = parsing::parse(filename, &content).unwrap();

        assert_eq!(workspace.flags, Flags::new(true, false));
        assert_eq!(
            workspace.blocks,
            vec![
                Block::new(BlockKind::Spells, "Fireball"),
                Block::new(BlockKind::Based, "IQ"),
                Block::new(BlockKind::Costs, "2 FP"),
            ]
        );
        assert_eq!(workspace.tags(), vec!["spells", "based", "costs"]);
        assert_eq!(
            workspace
                .offsets
                .len(),
            3
        );
    }

    #[test]
    fn text_defaults_to_empty() {
        let content = r#"
[[block]]
type = "if"
        "#;

        let workspace = parsing::parse(Path::new("inline.toml"), content).unwrap();
        assert_eq!(workspace.blocks, vec![Block::new(BlockKind::If, "")]);
    }

    #[test]
    fn unknown_block_types_are_all_reported() {
        let filename = Path::new("tests/broken/unknown.toml");
        let content = parsing::load(filename).unwrap();

        let errors = parsing::parse(filename, &content).unwrap_err();
        assert_eq!(errors.len(), 2);

        match &errors[0] {
            ParsingError::UnknownBlock(offset, tag) => {
                assert_eq!(tag, "sword");
                assert!(content[*offset..]
                    .trim_start_matches('"')
                    .starts_with("sword"));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(errors[1].message(), "unknown block type 'shield'");
    }

    #[test]
    fn invalid_syntax() {
        let filename = Path::new("tests/broken/syntax.toml");
        let content = parsing::load(filename).unwrap();

        let errors = parsing::parse(filename, &content).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ParsingError::InvalidSyntax(_, _)));
    }

    #[test]
    fn unexpected_fields_are_rejected() {
        let content = r#"
[[block]]
type = "skills"
colour = "red"
        "#;

        let result = parsing::parse(Path::new("inline.toml"), content);
        assert!(result.is_err());
    }
}
