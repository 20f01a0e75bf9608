#[cfg(test)]
mod verify {
    use otf::formatting::*;
    use otf::language::*;

    const NORMAL: Flags = Flags {
        blind: false,
        formula: false,
    };

    const BLIND: Flags = Flags {
        blind: true,
        formula: false,
    };

    const FORMULA: Flags = Flags {
        blind: false,
        formula: true,
    };

    fn block(kind: BlockKind, text: &str) -> Block {
        Block::new(kind, text)
    }

    fn combine(fragments: Vec<(Syntax, std::borrow::Cow<'_, str>)>) -> String {
        let mut result = String::new();
        for fragment in fragments {
            result.push_str(&fragment.1);
        }
        result
    }

    #[test]
    fn empty_workspace() {
        assert_eq!(generate(&[], NORMAL), "");
        assert_eq!(generate(&[], BLIND), "");
        assert_eq!(generate(&[], FORMULA), "");
    }

    #[test]
    fn only_empty_blocks() {
        let blocks = vec![block(BlockKind::Skills, "   "), block(BlockKind::Text, "")];
        assert_eq!(generate(&blocks, NORMAL), "");
        assert_eq!(generate(&blocks, FORMULA), "");
    }

    #[test]
    fn data_blocks() {
        let blocks = vec![block(BlockKind::Skills, "Fu")];
        assert_eq!(generate(&blocks, NORMAL), "[Sk:Fu]");
        assert_eq!(generate(&blocks, BLIND), "[!Sk:Fu]");

        let blocks = vec![block(BlockKind::Spells, "Fireball")];
        assert_eq!(generate(&blocks, NORMAL), "[S: Fireball]");
        assert_eq!(generate(&blocks, BLIND), "[!S: Fireball]");

        let blocks = vec![block(BlockKind::Attributes, "ST")];
        assert_eq!(generate(&blocks, NORMAL), "[ST]");
        assert_eq!(generate(&blocks, BLIND), "[!ST]");
    }

    #[test]
    fn combat_blocks() {
        let blocks = vec![
            block(BlockKind::Ranged, "12"),
            block(BlockKind::Melee, "14"),
            block(BlockKind::WeaponDamage, "2d+1 cut"),
            block(BlockKind::Parry, "10"),
            block(BlockKind::Costs, "2 FP"),
            block(BlockKind::Damage, "1d"),
        ];

        assert_eq!(
            generate(&blocks, NORMAL),
            r#"[R:12 M:14 D:"2d+1 cut" P:10 *Costs 2 FP 1d]"#
        );
        // blind only marks the character data blocks
        assert_eq!(generate(&blocks, BLIND), generate(&blocks, NORMAL));
    }

    #[test]
    fn whitespace_is_trimmed() {
        let blocks = vec![
            block(BlockKind::Skills, "  Fu \t"),
            block(BlockKind::Text, "\n hello "),
        ];
        assert_eq!(generate(&blocks, NORMAL), r#"[Sk:Fu "hello"]"#);
    }

    #[test]
    fn fixed_blocks_ignore_text() {
        let blocks = vec![
            block(BlockKind::Or, "ignored"),
            block(BlockKind::Check, ""),
            block(BlockKind::Line, "  "),
        ];
        assert_eq!(generate(&blocks, NORMAL), "[| ? /]");
        assert_eq!(generate(&blocks, FORMULA), "[|] [?] [/]");
    }

    #[test]
    fn consecutive_text_is_comma_separated() {
        let blocks = vec![block(BlockKind::Text, "a"), block(BlockKind::Text, "b")];
        assert_eq!(generate(&blocks, NORMAL), r#"["a", "b"]"#);
        assert_eq!(generate(&blocks, FORMULA), "[a], [b]");
    }

    #[test]
    fn empty_block_between_text_is_not_a_neighbour() {
        let blocks = vec![
            block(BlockKind::Text, "a"),
            block(BlockKind::Skills, " "),
            block(BlockKind::Text, "b"),
        ];
        assert_eq!(generate(&blocks, NORMAL), r#"["a", "b"]"#);
    }

    #[test]
    fn labels_are_not_comma_separated() {
        let blocks = vec![block(BlockKind::Label, "a"), block(BlockKind::Text, "b")];
        assert_eq!(generate(&blocks, NORMAL), r#"["a" "b"]"#);

        let blocks = vec![block(BlockKind::Label, "a"), block(BlockKind::Label, "b")];
        assert_eq!(generate(&blocks, NORMAL), r#"["a" "b"]"#);
    }

    #[test]
    fn empty_blocks_contribute_nothing() {
        let rest = vec![
            block(BlockKind::Label, "Attack"),
            block(BlockKind::Skills, "Broadsword"),
            block(BlockKind::Modifier, "+2"),
        ];

        for kind in [BlockKind::Text, BlockKind::Skills, BlockKind::Label, BlockKind::Based] {
            let mut blocks = vec![block(kind, "  ")];
            blocks.extend(rest.iter().cloned());

            assert_eq!(generate(&blocks, NORMAL), generate(&rest, NORMAL));
            assert_eq!(generate(&blocks, FORMULA), generate(&rest, FORMULA));
        }
    }

    #[test]
    fn based_attaches_to_predecessor() {
        let blocks = vec![block(BlockKind::Skills, "Fu"), block(BlockKind::Based, "DX")];
        assert_eq!(generate(&blocks, NORMAL), "[Sk:Fu (Based:DX)]");
        assert_eq!(generate(&blocks, FORMULA), "[Sk:Fu (Based:DX)]");

        let blocks = vec![
            block(BlockKind::Spells, "Fireball"),
            block(BlockKind::Based, "IQ"),
        ];
        assert_eq!(generate(&blocks, BLIND), "[!S: Fireball (Based:IQ)]");
    }

    #[test]
    fn based_stands_alone() {
        let blocks = vec![block(BlockKind::Text, "a"), block(BlockKind::Based, "IQ")];
        assert_eq!(generate(&blocks, NORMAL), r#"["a" (Based:IQ)]"#);
        assert_eq!(generate(&blocks, FORMULA), "[a] (Based:IQ)");

        let blocks = vec![block(BlockKind::Based, "HT")];
        assert_eq!(generate(&blocks, NORMAL), "[(Based:HT)]");
        assert_eq!(generate(&blocks, FORMULA), "(Based:HT)");
    }

    #[test]
    fn second_based_stands_alone() {
        let blocks = vec![
            block(BlockKind::Melee, "Axe"),
            block(BlockKind::Based, "ST"),
            block(BlockKind::Based, "DX"),
        ];
        assert_eq!(generate(&blocks, NORMAL), "[M:Axe (Based:ST) (Based:DX)]");
    }

    #[test]
    fn conditionals_prevent_wrapping() {
        let blocks = vec![block(BlockKind::Skills, "Fu"), block(BlockKind::If, "")];
        assert_eq!(generate(&blocks, NORMAL), "Sk:Fu /if");

        let blocks = vec![block(BlockKind::Check, ""), block(BlockKind::Else, "")];
        assert_eq!(generate(&blocks, NORMAL), "? /else");
    }

    #[test]
    fn label_and_if_wrap_everything() {
        let blocks = vec![block(BlockKind::Label, "X"), block(BlockKind::If, "")];
        assert_eq!(generate(&blocks, NORMAL), r#"["X" /if]"#);

        let blocks = vec![
            block(BlockKind::Label, "X"),
            block(BlockKind::If, ""),
            block(BlockKind::Skills, "Fu"),
        ];
        assert_eq!(generate(&blocks, FORMULA), r#"["X" /if [Sk:Fu]]"#);
    }

    #[test]
    fn empty_label_does_not_count() {
        let blocks = vec![
            block(BlockKind::Label, " "),
            block(BlockKind::Skills, "Fu"),
            block(BlockKind::If, ""),
        ];
        assert_eq!(generate(&blocks, NORMAL), "Sk:Fu /if");
    }

    #[test]
    fn formula_mode_wraps_each_block() {
        let blocks = vec![
            block(BlockKind::Label, "L"),
            block(BlockKind::Skills, "Fu"),
            block(BlockKind::Text, "hello"),
            block(BlockKind::Else, ""),
            block(BlockKind::WeaponDamage, "1d"),
        ];
        assert_eq!(
            generate(&blocks, FORMULA),
            r#""L" [Sk:Fu] [hello] /else [D:"1d"]"#
        );
    }

    #[test]
    fn formula_mode_honours_blind_when_asked() {
        let blocks = vec![block(BlockKind::Skills, "Fu")];
        let flags = Flags::new(true, true);
        assert_eq!(generate(&blocks, flags), "[!Sk:Fu]");
        assert_eq!(generate(&blocks, flags.effective()), "[Sk:Fu]");
    }

    #[test]
    fn groups() {
        let blocks = vec![
            block(BlockKind::GroupStart, ""),
            block(BlockKind::Modifier, "+1"),
            block(BlockKind::GroupEnd, ""),
        ];
        assert_eq!(generate(&blocks, FORMULA), "{ [+1] }");
        assert_eq!(generate(&blocks, NORMAL), "[{ +1 }]");

        let blocks = vec![
            block(BlockKind::GroupStart, ""),
            block(BlockKind::GroupStart, ""),
            block(BlockKind::Modifier, "+1"),
            block(BlockKind::GroupEnd, ""),
            block(BlockKind::GroupEnd, ""),
            block(BlockKind::Modifier, "+2"),
        ];
        assert_eq!(generate(&blocks, FORMULA), "{ { [+1] } } [+2]");
    }

    #[test]
    fn unbalanced_groups_still_render() {
        let blocks = vec![
            block(BlockKind::GroupStart, ""),
            block(BlockKind::Skills, "Fu"),
        ];
        assert_eq!(generate(&blocks, NORMAL), "[{ Sk:Fu]");

        let blocks = vec![
            block(BlockKind::GroupEnd, ""),
            block(BlockKind::GroupEnd, ""),
        ];
        assert_eq!(generate(&blocks, FORMULA), "} }");
    }

    #[test]
    fn fragments_combine_to_plain_output() {
        let blocks = vec![
            block(BlockKind::Label, "Attack"),
            block(BlockKind::Skills, "Fu"),
            block(BlockKind::Based, "DX"),
            block(BlockKind::Text, "a"),
            block(BlockKind::Text, "b"),
            block(BlockKind::Modifier, "+1"),
            block(BlockKind::And, ""),
            block(BlockKind::Modifier, "+2"),
            block(BlockKind::If, ""),
        ];

        for flags in [NORMAL, BLIND, FORMULA] {
            let fragments = format_to_fragments(&blocks, flags);
            assert_eq!(combine(fragments), generate(&blocks, flags));
        }
    }

    #[test]
    fn terminal_rendering_keeps_content() {
        let blocks = vec![block(BlockKind::Skills, "Fu")];
        let plain = render(&Identity, &blocks, NORMAL);
        let coloured = render(&Terminal, &blocks, NORMAL);

        assert_eq!(plain, "[Sk:Fu]");
        assert_ne!(coloured, plain);
        assert!(coloured.contains("Sk:"));
        assert!(coloured.contains("Fu"));
    }
}
