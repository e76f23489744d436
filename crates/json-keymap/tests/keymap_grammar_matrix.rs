use json_keymap::{compile, compile_with, CompileOptions, GrammarError, Keymap, PathStep};

fn key(name: &str) -> PathStep {
    PathStep::Key(name.to_string())
}

fn keys(names: &[&str]) -> PathStep {
    PathStep::KeyList(names.iter().map(|n| n.to_string()).collect())
}

#[test]
fn grammar_documented_shapes_matrix() {
    let cases: Vec<(&str, Vec<Vec<PathStep>>)> = vec![
        ("id", vec![vec![key("id")]]),
        ("id,email", vec![vec![keys(&["id", "email"])]]),
        ("user:id", vec![vec![key("user"), key("id")]]),
        ("user:id,email", vec![vec![key("user"), keys(&["id", "email"])]]),
        (
            "user:orders[id,status]",
            vec![vec![
                key("user"),
                key("orders"),
                PathStep::Subarray(vec![keys(&["id", "status"])]),
            ]],
        ),
        (
            "user:orders[details:id]",
            vec![vec![
                key("user"),
                key("orders"),
                PathStep::Subarray(vec![key("details"), key("id")]),
            ]],
        ),
        ("[id,email]", vec![vec![PathStep::Subarray(vec![keys(&["id", "email"])])]]),
        (
            "user:id,email|order:number,type",
            vec![
                vec![key("user"), keys(&["id", "email"])],
                vec![key("order"), keys(&["number", "type"])],
            ],
        ),
        ("[]", vec![vec![PathStep::Push]]),
        ("list:[]", vec![vec![key("list"), PathStep::Push]]),
    ];

    for (text, expected) in cases {
        let keymap = compile(text).unwrap_or_else(|e| panic!("{text:?} failed: {e}"));
        let actual: Vec<Vec<PathStep>> = keymap.iter().map(|p| p.steps().to_vec()).collect();
        assert_eq!(actual, expected, "keymap {text:?}");
    }
}

#[test]
fn grammar_compile_is_pure() {
    for text in ["user:id,email", "user:orders[details:id]", "a|b[c[d]]"] {
        assert_eq!(compile(text).unwrap(), compile(text).unwrap());
        let parsed: Keymap = text.parse().unwrap();
        assert_eq!(parsed, compile(text).unwrap());
    }
}

#[test]
fn grammar_error_matrix() {
    let cases = [
        ("a,b:c", "comma"),
        ("a:b,c:d", "comma"),
        ("a[b", "bracket"),
        ("a]", "bracket"),
        ("a[b]c", "trailing"),
        ("a[b]:c|d", "trailing"),
        ("x,y[z]", "keylist"),
        ("a[b|c]", "union"),
    ];
    for (text, kind) in cases {
        let err = compile(text).expect_err(text);
        let matched = match kind {
            "comma" => matches!(err, GrammarError::CommaInNonTerminal(_)),
            "bracket" => matches!(err, GrammarError::UnbalancedBracket(_)),
            "trailing" => matches!(err, GrammarError::TrailingAfterSubarray(_)),
            "keylist" => matches!(err, GrammarError::KeyListBeforeSubarray(_)),
            "union" => matches!(err, GrammarError::UnionInSubarray(_)),
            _ => false,
        };
        assert!(matched, "{text:?} gave {err:?}, expected {kind}");
    }
}

#[test]
fn grammar_error_messages_carry_input() {
    let err = compile("a,b:c").unwrap_err();
    assert!(err.to_string().contains("a,b:c"));
}

#[test]
fn grammar_depth_limit_is_configurable() {
    let deep = format!("{}x{}", "a[".repeat(40), "]".repeat(40));
    assert_eq!(compile(&deep), Err(GrammarError::TooDeep { max_depth: 32 }));
    assert!(compile_with(&deep, &CompileOptions { max_depth: 40 }).is_ok());
}

#[test]
fn grammar_long_key_chains_compile() {
    let text = vec!["k"; 10_000].join(":");
    let keymap = compile(&text).unwrap();
    assert_eq!(keymap.paths()[0].len(), 10_000);
}
