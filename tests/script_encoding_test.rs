//! Integration tests for workflow script encoding and parsing

use test_case::test_case;
use tma_export::core::export::export_call;
use tma_export::core::script::{parse_call, parse_script, ScriptCall, ScriptValue};
use tma_export::domain::ScriptError;

#[test_case("/data/out" ; "plain unix path")]
#[test_case(r"C:\Users\lab\TMA exports" ; "windows path")]
#[test_case(r"\\server\share\tma" ; "unc path")]
#[test_case(r#"/data/"quoted" dir"# ; "quotes")]
#[test_case("/data/line\nbreak" ; "newline")]
#[test_case("/data/\u{1}ctrl" ; "control character")]
#[test_case("/data/trailing\\" ; "trailing backslash")]
#[test_case("/données/échantillons/核心" ; "non ascii")]
fn test_export_call_round_trips(directory: &str) {
    let call = export_call(std::path::Path::new(directory), 4.0).unwrap();
    let rendered = call.to_string();

    assert!(!rendered.contains('\n'));
    let parsed = parse_call(&rendered).unwrap();
    assert_eq!(parsed, call);
    assert_eq!(parsed.arguments[0].as_str(), Some(directory));
}

#[test_case(4.0, "4.0")]
#[test_case(0.5, "0.5")]
#[test_case(1e-7, "0.0000001")]
#[test_case(f64::NAN, "NaN")]
#[test_case(f64::INFINITY, "Infinity")]
#[test_case(f64::NEG_INFINITY, "-Infinity")]
fn test_downsample_rendering(downsample: f64, expected: &str) {
    let call = export_call(std::path::Path::new("/out"), downsample).unwrap();
    assert_eq!(call.to_string(), format!("exportTMAData(\"/out\", {expected})"));
    assert_eq!(parse_call(&call.to_string()).unwrap(), call);
}

#[test]
fn test_parse_script_with_comments_and_separators() {
    let script = r#"
// recorded workflow
setImageType("BRIGHTFIELD_H_E");
exportTMAData("/out/a", 4.0)

exportTMAData("/out/b", 2.0); runPlugin(true, null)
"#;
    let calls = parse_script(script).unwrap();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0].function, "setImageType");
    assert_eq!(calls[2].arguments[1], ScriptValue::number(2.0));
    assert_eq!(
        calls[3],
        ScriptCall::new("runPlugin")
            .arg(ScriptValue::Boolean(true))
            .arg(ScriptValue::Null)
    );
}

#[test]
fn test_parse_errors_carry_offsets() {
    let err = parse_call(r#"exportTMAData("/out, 4.0)"#).unwrap_err();
    assert!(matches!(err, ScriptError::UnterminatedString { offset: 14 }));

    let err = parse_call(r#"exportTMAData("/out" 4.0)"#).unwrap_err();
    assert!(matches!(err, ScriptError::UnexpectedToken { offset: 21, .. }));

    assert!(parse_call("").is_err());
    assert!(parse_call("a() b()").is_err());
}

#[test]
fn test_history_script_parses_back() {
    use tma_export::domain::{WorkflowHistory, WorkflowStep};

    let mut history = WorkflowHistory::new();
    for dir in ["/a", r"C:\b", "/c \"d\""] {
        let call = export_call(std::path::Path::new(dir), 1.0).unwrap();
        history.add_step(WorkflowStep::scriptable("Export TMA data", call.to_string()));
    }

    let calls = parse_script(&history.to_script()).unwrap();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[2].arguments[0].as_str(), Some("/c \"d\""));
}
