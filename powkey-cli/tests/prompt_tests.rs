use powkey_cli::{collect_identity, IdentityAnswers, UsageType};
use pretty_assertions::assert_eq;
use std::io::Cursor;

fn run(
    input: &str,
    usage: Option<UsageType>,
    name: Option<&str>,
    project: Option<&str>,
) -> (anyhow::Result<IdentityAnswers>, String) {
    let mut input = Cursor::new(input.as_bytes().to_vec());
    let mut output = Vec::new();
    let result = collect_identity(
        &mut input,
        &mut output,
        usage,
        name.map(String::from),
        project.map(String::from),
    );
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn usage_answers() {
    assert_eq!(UsageType::from_answer("company"), UsageType::Company);
    assert_eq!(UsageType::from_answer("  COMPANY \n"), UsageType::Company);
    assert_eq!(UsageType::from_answer("personal"), UsageType::Personal);
    assert_eq!(UsageType::from_answer("whatever"), UsageType::Personal);
    assert_eq!(UsageType::from_answer(""), UsageType::Personal);
}

#[test]
fn prompts_for_everything() {
    let (result, output) = run("company\n  Acme Corp \nRocket\n", None, None, None);
    assert_eq!(
        result.unwrap(),
        IdentityAnswers {
            usage: UsageType::Company,
            name: "Acme Corp".to_string(),
            project: "Rocket".to_string(),
        }
    );
    assert!(output.contains("personal or company"));
    assert!(output.contains("Enter your company name: "));
    assert!(output.contains("Enter the project name: "));
}

#[test]
fn personal_prompt_asks_for_name() {
    let (result, output) = run("personal\nAlice\nWidget\n", None, None, None);
    assert_eq!(result.unwrap().name, "Alice");
    assert!(output.contains("Enter your name: "));
}

#[test]
fn flags_skip_prompts() {
    let (result, output) = run("", Some(UsageType::Personal), Some(" Alice "), Some("Widget"));
    let answers = result.unwrap();
    assert_eq!(answers.name, "Alice");
    assert_eq!(answers.project, "Widget");
    assert!(output.is_empty());
}

#[test]
fn empty_answer_is_passed_through() {
    let (result, _) = run("personal\nAlice\n\n", None, None, None);
    assert_eq!(result.unwrap().project, "");
}

#[test]
fn closed_input_is_an_error() {
    let (result, _) = run("personal\nAlice\n", None, None, None);
    let err = result.unwrap_err();
    assert!(format!("{err}").contains("input closed"));
}
