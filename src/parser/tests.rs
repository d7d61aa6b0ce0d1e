use super::*;
use crate::error::{ErrorCategory, MalformedReason, OptionError};
use std::cell::{Cell, RefCell};

fn combining() -> ParserConfig {
    ParserConfig::builder()
        .short_option_combination(true)
        .build()
}

#[test]
fn short_flag_sets_once_and_leaves_positionals() {
    let hits = Cell::new(0);
    let mut op = OptionParser::new();
    op.add_flag('f', || hits.set(hits.get() + 1), "Set a flag")
        .unwrap();

    let positionals = op.parse_args(["program"]).unwrap();
    assert_eq!(positionals, vec!["program"]);
    assert_eq!(hits.get(), 0);

    let positionals = op.parse_args(["program", "-f"]).unwrap();
    assert_eq!(positionals, vec!["program"]);
    assert_eq!(hits.get(), 1);
}

#[test]
fn long_flag_sets_once() {
    let hits = Cell::new(0);
    let mut op = OptionParser::new();
    op.add_flag("flag", || hits.set(hits.get() + 1), "Set a flag")
        .unwrap();

    let positionals = op.parse_args(["program", "--flag"]).unwrap();
    assert_eq!(positionals, vec!["program"]);
    assert_eq!(hits.get(), 1);
}

#[test]
fn short_value_with_equals() {
    let mut i = 0;
    {
        let mut op = OptionParser::new();
        op.add_store('i', &mut i, "Set an integer").unwrap();

        let error = op.parse_args(["program", "-i"]).unwrap_err();
        assert!(matches!(error, OptionError::MissingValue { ref arg } if arg == "-i"));

        let error = op.parse_args(["program", "-i="]).unwrap_err();
        assert_eq!(error.category(), ErrorCategory::Value);

        op.parse_args(["program", "-i=52"]).unwrap();
    }
    assert_eq!(i, 52);
}

#[test]
fn short_value_as_next_argument() {
    let mut i = 0;
    {
        let mut op = OptionParser::new();
        op.add_store('i', &mut i, "Set an integer").unwrap();
        let positionals = op.parse_args(["program", "-i", "52", "rest"]).unwrap();
        assert_eq!(positionals, vec!["program", "rest"]);
    }
    assert_eq!(i, 52);
}

#[test]
fn short_value_without_equals_when_enabled() {
    let value = Cell::new(0);
    let mut op = OptionParser::new();
    op.set_allow_short_value_without_equals(true);
    op.add_value('i', |i: i32| value.set(i), "Set an integer")
        .unwrap();

    assert!(op.parse_args(["program", "-i"]).is_err());
    assert!(op.parse_args(["program", "-i="]).is_err());
    assert_eq!(value.get(), 0);

    op.parse_args(["program", "-i52"]).unwrap();
    assert_eq!(value.get(), 52);

    value.set(0);
    op.parse_args(["program", "-i=52"]).unwrap();
    assert_eq!(value.get(), 52);
}

#[test]
fn short_value_glued_is_malformed_by_default() {
    let mut op = OptionParser::new();
    op.add_value('i', |_: i32| {}, "Set an integer").unwrap();

    let error = op.parse_args(["program", "-i52"]).unwrap_err();
    assert!(matches!(
        error,
        OptionError::Malformed {
            reason: MalformedReason::WrongDashCount,
            ..
        }
    ));
}

#[test]
fn long_value_forms() {
    let mut number = 0;
    let mut name = String::from("unset");
    {
        let mut op = OptionParser::new();
        op.add_store("integer", &mut number, "Set an integer")
            .unwrap();
        op.add_store("name", &mut name, "Set a name").unwrap();

        let error = op.parse_args(["program", "--integer"]).unwrap_err();
        assert_eq!(error.to_string(), "Missing value for '--integer'");

        op.parse_args(["program", "--integer=52", "--name="]).unwrap();
    }
    assert_eq!(number, 52);
    assert_eq!(name, "");
}

#[test]
fn long_value_callback_as_next_argument() {
    let seen = RefCell::new(Vec::new());
    let mut op = OptionParser::new();
    op.add_value("integer", |i: i64| seen.borrow_mut().push(i), "Set an integer")
        .unwrap();

    assert!(op.parse_args(["program", "--integer"]).is_err());
    op.parse_args(["program", "--integer", "17", "--integer=-3"])
        .unwrap();
    assert_eq!(*seen.borrow(), vec![17, -3]);
}

#[test]
fn value_forms_are_equivalent() {
    let forms: [&[&str]; 5] = [
        &["-n", "7"],
        &["-n=7"],
        &["-n7"],
        &["--number", "7"],
        &["--number=7"],
    ];
    for form in forms {
        let mut number = 0u32;
        {
            let mut op = OptionParser::new();
            op.set_allow_short_value_without_equals(true);
            op.add_store(["n", "number"], &mut number, "A number")
                .unwrap();
            op.parse_args(form.iter().copied()).unwrap();
        }
        assert_eq!(number, 7, "form {form:?}");
    }
}

#[test]
fn positionals_only() {
    let args = ["program", "foo", "bar", "baz quux"];
    let mut op = OptionParser::new();
    assert_eq!(op.parse_args(args).unwrap(), args);
}

#[test]
fn positional_order_is_preserved() {
    let short = Cell::new(false);
    let long = Cell::new(false);
    let mut op = OptionParser::new();
    op.add_flag('f', || short.set(true), "Short flag").unwrap();
    op.add_flag("flag", || long.set(true), "Long flag").unwrap();

    let positionals = op
        .parse_args(["prog", "foo", "-f", "bar", "--flag", "baz"])
        .unwrap();
    assert_eq!(positionals, vec!["prog", "foo", "bar", "baz"]);
    assert!(short.get() && long.get());
}

#[test]
fn positionals_and_options() {
    let flag = Cell::new(false);
    let mut number = 0;
    let positionals = {
        let mut op = OptionParser::new();
        op.add_flag('f', || flag.set(true), "Set a flag").unwrap();
        op.add_store("integer", &mut number, "Set an integer")
            .unwrap();
        op.parse_args([
            "program",
            "foo",
            "-f",
            "bar",
            "--integer",
            "17",
            "baz quux",
        ])
        .unwrap()
    };
    assert_eq!(positionals, vec!["program", "foo", "bar", "baz quux"]);
    assert!(flag.get());
    assert_eq!(number, 17);
}

#[test]
fn unknown_options_fail_without_mutation() {
    let flag = Cell::new(false);
    let mut op = OptionParser::new();
    op.add_flag('f', || flag.set(true), "Set a flag").unwrap();

    let error = op.parse_args(["prog", "-z"]).unwrap_err();
    assert_eq!(error.to_string(), "Unknown option: 'z' in '-z'");
    assert_eq!(error.option(), Some("z"));

    let error = op.parse_args(["prog", "--zed=1"]).unwrap_err();
    assert!(matches!(error, OptionError::UnknownOption { ref option, .. } if option == "zed"));
    assert!(!flag.get());
}

#[test]
fn earlier_side_effects_survive_a_failure() {
    let flag = Cell::new(false);
    let mut op = OptionParser::new();
    op.add_flag('f', || flag.set(true), "Set a flag").unwrap();

    assert!(op.parse_args(["prog", "-f", "--missing"]).is_err());
    assert!(flag.get());
}

#[test]
fn trailing_value_option_is_missing_value() {
    let mut op = OptionParser::new();
    op.add_value("name", |_: String| {}, "A name").unwrap();
    op.add_config_file('c', "Config").unwrap();

    let error = op.parse_args(["prog", "--name"]).unwrap_err();
    assert!(matches!(error, OptionError::MissingValue { .. }));
    let error = op.parse_args(["prog", "-c"]).unwrap_err();
    assert!(matches!(error, OptionError::MissingValue { ref arg } if arg == "-c"));
}

#[test]
fn terminator_makes_the_rest_positional() {
    let f = Cell::new(false);
    let g = Cell::new(false);
    let mut op = OptionParser::with_config(ParserConfig::builder().option_terminator(true).build());
    op.add_flag('f', || f.set(true), "F").unwrap();
    op.add_flag('g', || g.set(true), "G").unwrap();

    let positionals = op
        .parse_args(["prog", "-f", "--", "-g", "baz", "--"])
        .unwrap();
    assert_eq!(positionals, vec!["prog", "-g", "baz", "--"]);
    assert!(f.get());
    assert!(!g.get());
}

#[test]
fn double_dash_is_positional_without_terminator() {
    let mut op = OptionParser::new();
    assert!(!op.allows_option_terminator());
    let positionals = op.parse_args(["prog", "--", "x"]).unwrap();
    assert_eq!(positionals, vec!["prog", "--", "x"]);
}

#[test]
fn combined_flags_run_left_to_right() {
    let order = RefCell::new(String::new());
    let mut op = OptionParser::with_config(combining());
    op.add_flag('f', || order.borrow_mut().push('f'), "F").unwrap();
    op.add_flag('g', || order.borrow_mut().push('g'), "G").unwrap();

    op.parse_args(["prog", "-fg"]).unwrap();
    assert_eq!(*order.borrow(), "fg");

    op.parse_args(["prog", "-gfg"]).unwrap();
    assert_eq!(*order.borrow(), "fggfg");
}

#[test]
fn combined_flags_are_malformed_when_disabled() {
    let order = RefCell::new(String::new());
    let mut op = OptionParser::new();
    op.add_flag('f', || order.borrow_mut().push('f'), "F").unwrap();
    op.add_flag('g', || order.borrow_mut().push('g'), "G").unwrap();

    let error = op.parse_args(["prog", "-fg"]).unwrap_err();
    assert_eq!(error.category(), ErrorCategory::Syntax);
    assert!(order.borrow().is_empty());

    op.set_allow_short_value_without_equals(true);
    let error = op.parse_args(["prog", "-fg"]).unwrap_err();
    assert!(matches!(
        error,
        OptionError::Malformed {
            reason: MalformedReason::UnexpectedValue,
            ..
        }
    ));
    assert!(order.borrow().is_empty());
}

#[test]
fn combination_stops_at_value_option() {
    let flag = Cell::new(false);
    let other = Cell::new(false);
    let name = RefCell::new(String::new());
    let mut op = OptionParser::with_config(combining());
    op.add_flag('f', || flag.set(true), "F").unwrap();
    op.add_flag('g', || other.set(true), "G").unwrap();
    op.add_value('n', |n: String| *name.borrow_mut() = n, "Name")
        .unwrap();

    op.parse_args(["prog", "-fng"]).unwrap();
    assert!(flag.get());
    assert!(!other.get());
    assert_eq!(*name.borrow(), "g");

    op.parse_args(["prog", "-fn=x"]).unwrap();
    assert_eq!(*name.borrow(), "x");

    let positionals = op.parse_args(["prog", "-fn", "y", "z"]).unwrap();
    assert_eq!(*name.borrow(), "y");
    assert_eq!(positionals, vec!["prog", "z"]);
}

#[test]
fn combination_reports_unknown_letter() {
    let flag = Cell::new(false);
    let mut op = OptionParser::with_config(combining());
    op.add_flag('f', || flag.set(true), "F").unwrap();

    let error = op.parse_args(["prog", "-fq"]).unwrap_err();
    assert_eq!(error.to_string(), "Unknown option: 'q' in '-fq'");
    assert!(flag.get());
}

#[test]
fn malformed_option_syntax() {
    let mut op = OptionParser::new();
    op.add_flag('f', || {}, "F").unwrap();
    op.add_flag("flag", || {}, "Flag").unwrap();

    let cases = [
        ("--f", MalformedReason::WrongDashCount),
        ("-flag", MalformedReason::WrongDashCount),
        ("-=x", MalformedReason::EmptyName),
        ("--=x", MalformedReason::EmptyName),
        ("--flag=x", MalformedReason::UnexpectedValue),
        ("-f=x", MalformedReason::UnexpectedValue),
    ];
    for (arg, expected) in cases {
        match op.parse_args(["prog", arg]) {
            Err(OptionError::Malformed { reason, .. }) => assert_eq!(reason, expected, "{arg}"),
            other => panic!("expected malformed error for {arg}, got {other:?}"),
        }
    }
}

#[test]
fn odd_dash_shapes_are_positional() {
    let mut op = OptionParser::new();
    let positionals = op.parse_args(["-", "---x", "---", "x-y"]).unwrap();
    assert_eq!(positionals, vec!["-", "---x", "---", "x-y"]);

    let error = op.parse_args(["-1"]).unwrap_err();
    assert!(matches!(error, OptionError::UnknownOption { .. }));
}

#[test]
fn help_options_print_usage() {
    for arg in ["-h", "-?", "--help", "--usage"] {
        let mut op = OptionParser::new();
        op.set_base_usage("Test program");
        assert!(!op.did_print_usage());
        let positionals = op.parse_args(["prog", arg]).unwrap();
        assert_eq!(positionals, vec!["prog"]);
        assert!(op.did_print_usage(), "{arg} should print usage");
    }
}

#[test]
fn help_can_be_suppressed() {
    let mut op = OptionParser::with_config(ParserConfig::builder().automatic_help(false).build());
    assert!(op.parse_args(["prog", "--help"]).is_err());
    assert!(!op.did_print_usage());

    op.add_flag('h', || {}, "Something else").unwrap();
    op.parse_args(["prog", "-h"]).unwrap();
    assert!(!op.did_print_usage());
}

#[test]
fn duplicate_registration_fails_at_setup() {
    let mut op = OptionParser::new();
    op.add_flag(["v", "verbose"], || {}, "Verbose").unwrap();

    let error = op.add_value("verbose", |_: u8| {}, "Level").unwrap_err();
    assert!(error.is_setup_error());
    let error = op.add_config_file("h", "Clashes with help").unwrap_err();
    assert_eq!(error.to_string(), "Attempt to redefine option 'h'");
    let error = op.add_flag("bad=name", || {}, "Invalid").unwrap_err();
    assert!(matches!(error, OptionError::InvalidIdentifier { .. }));
}

#[test]
fn conversion_error_names_option_and_text() {
    let mut op = OptionParser::new();
    op.add_value(["n", "count"], |_: u16| {}, "Count").unwrap();

    let error = op.parse_args(["prog", "--count=lots"]).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("\"lots\""), "{message}");
    assert!(message.contains("'count'"), "{message}");

    let error = op.parse_args(["prog", "-n", "-1"]).unwrap_err();
    assert_eq!(error.option(), Some("n"));
}

#[test]
fn boolean_values() {
    let mut enabled = false;
    {
        let mut op = OptionParser::new();
        op.add_store("enabled", &mut enabled, "Toggle").unwrap();
        assert!(op.parse_args(["--enabled=yes"]).is_err());
        op.parse_args(["--enabled", "true"]).unwrap();
    }
    assert!(enabled);
}

#[test]
fn usage_lists_options_in_registration_order() {
    let mut count = 3;
    let mut op = OptionParser::new();
    op.set_use_ansi_codes(false);
    op.set_base_usage("Demo");
    op.add_store(["c", "count"], &mut count, "How many").unwrap();
    op.add_config_file("config", "More options").unwrap();

    assert_eq!(
        op.usage(),
        "Demo\n \
         -h, -?, --help, --usage: Print usage information.\n \
         -c, --count value: How many\n    (default: 3)\n \
         --config file: More options\n"
    );
}

#[test]
fn parse_str_splits_like_a_shell() {
    let name = RefCell::new(String::new());
    let mut op = OptionParser::new();
    op.add_value("name", |n: String| *name.borrow_mut() = n, "Name")
        .unwrap();

    let positionals = op.parse_str(r#"--name "Ada Lovelace" one\ arg"#).unwrap();
    assert_eq!(*name.borrow(), "Ada Lovelace");
    assert_eq!(positionals, vec!["one arg"]);
}

#[test]
fn parse_reader_reads_lines_lazily() {
    let hits = Cell::new(0);
    let mut op = OptionParser::new();
    op.add_flag('f', || hits.set(hits.get() + 1), "F").unwrap();

    let input = std::io::Cursor::new("-f\n  pos\n-f 'a\nb'\n");
    let positionals = op.parse_reader(input).unwrap();
    assert_eq!(positionals, vec!["pos", "a\nb"]);
    assert_eq!(hits.get(), 2);
}

#[test]
fn missing_config_file_is_unreadable() {
    let mut op = OptionParser::new();
    op.add_config_file(["c", "config"], "Config").unwrap();

    let error = op
        .parse_args(["prog", "--config=/nonexistent/clopts/none.cfg"])
        .unwrap_err();
    assert!(matches!(error, OptionError::Unreadable { .. }));
    assert!(error.to_string().starts_with("Unable to read /nonexistent/clopts/none.cfg"));
}

#[test]
fn parse_with_config_runs_setup_first() {
    let flag = Cell::new(false);
    let positionals = parse_with_config(
        combining(),
        |op| {
            op.add_flag('a', || flag.set(true), "A")?;
            op.add_flag('b', || {}, "B")?;
            Ok(())
        },
        ["prog", "-ab", "x"],
    )
    .unwrap();
    assert_eq!(positionals, vec!["prog", "x"]);
    assert!(flag.get());
}

#[test]
fn setters_reflect_config() {
    let mut op = OptionParser::new();
    assert!(op.uses_ansi_codes());
    op.set_allow_short_option_combination(true);
    op.set_allow_option_terminator(true);
    assert!(op.allows_short_option_combination());
    assert!(op.allows_option_terminator());
    assert!(!op.allows_short_value_without_equals());
    assert!(op.config().allow_option_terminator);
}
