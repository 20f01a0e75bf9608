use otf::parsing::Workspace;
use otf::validation::Issue;
use serde::Serialize;
use tinytemplate::TinyTemplate;
use tracing::debug;

static EXPLANATIONS: &[(&str, &str)] = &[
    (
        "consecutive-if",
        r#"
Block {position} is an If that immediately follows another If. A second
condition usually belongs after an Else, or the two conditions can be
combined into one.
        "#,
    ),
    (
        "consecutive-skills-after-label",
        r#"
Block {position} is a second Skills block after a Label. The label only
describes the first skill; give each skill its own label or join the
skills with an Or block.
        "#,
    ),
    (
        "multiple-consecutive-skills",
        r#"
Block {position} is the third {label} block in a row. A roll against
that many skills at once is hard to read. Separate them with Or blocks or
split the formula in two.
        "#,
    ),
    (
        "consecutive-attributes",
        r#"
Block {position} is an {label} block directly after another one. Attribute
rolls are usually made against a single attribute; join alternatives with
an Or block.
        "#,
    ),
    (
        "damage-before-attack",
        r#"
Block {position} is Damage placed before a Melee attack. Damage is
normally written after the attack it belongs to.
        "#,
    ),
    (
        "damage-before-ranged",
        r#"
Block {position} is Damage placed before a Ranged attack. Damage is
normally written after the attack it belongs to.
        "#,
    ),
    (
        "unmatched-group-start",
        r#"
Block {position} opens a group that is never closed. Add a Group End after
the blocks that belong to this group.
        "#,
    ),
    (
        "unmatched-group-end",
        r#"
Block {position} closes a group that was never opened. Remove it or add a
Group Start before the blocks it should enclose.
        "#,
    ),
];

#[derive(Serialize)]
struct Context {
    position: usize,
    label: &'static str,
}

/// Generate the problem and detail messages for a validation issue.
pub fn generate_issue_message(issue: &Issue, workspace: &Workspace) -> (String, String) {
    let rule = issue.rule();

    let problem = match rule {
        Some(rule) => rule
            .name
            .to_string(),
        None => issue
            .rule_id
            .to_string(),
    };

    let details = explain(issue, workspace).unwrap_or_else(|| match rule {
        Some(rule) => rule
            .description
            .to_string(),
        None => String::new(),
    });

    (problem, details)
}

fn explain(issue: &Issue, workspace: &Workspace) -> Option<String> {
    let block = workspace
        .blocks
        .get(issue.index)?;
    let definition = block
        .kind
        .definition();

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    for (id, template) in EXPLANATIONS {
        if let Err(error) = tt.add_template(*id, *template) {
            debug!(?error);
            return None;
        }
    }

    let context = Context {
        position: issue.index + 1,
        label: definition.label,
    };

    match tt.render(issue.rule_id, &context) {
        Ok(rendered) => Some(
            rendered
                .trim_ascii()
                .to_string(),
        ),
        Err(error) => {
            debug!(?error);
            None
        }
    }
}
