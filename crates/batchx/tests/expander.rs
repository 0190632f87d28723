//! Integration tests for template expansion.

use std::path::Path;
use std::thread;

use batchx::interpreter::{DEFAULT_MAX_STEPS, GeneratorError, UnresolvedReason};
use batchx::{
    ExpansionWarning, Expander, FileProperties, NoProperties, Span, TemplateError, expand,
    properties,
};

fn test_file() -> FileProperties {
    FileProperties::builder()
        .directory_name(r"C:\SomeDirectory\Here")
        .name("Test-File")
        .extension("ts")
        .full_name(r"C:\SomeDirectory\Here\Test-File.ts")
        .build()
}

fn assert_send_sync<T: Send + Sync>() {}

fn steps(template: &str) -> Vec<String> {
    expand(template, &test_file()).unwrap().into_steps()
}

// =============================================================================
// Placeholders
// =============================================================================

#[test]
fn expand_placeholders_only() {
    let file = FileProperties::builder()
        .directory_name(r"C:\D")
        .name("F")
        .extension("ts")
        .build();
    let result = expand(r#"-i "{DirectoryName}\{Name}.{Extension}""#, &file).unwrap();
    assert_eq!(result.steps(), [r#"-i "C:\D\F.ts""#]);
    assert!(result.warnings().is_empty());
}

#[test]
fn expand_several_placeholders() {
    assert_eq!(
        steps(r#"-i "{DirectoryName}\{Name}.{Extension}" -o "{DirectoryName}\{Name}.dgi" -e -h -a"#),
        [r#"-i "C:\SomeDirectory\Here\Test-File.ts" -o "C:\SomeDirectory\Here\Test-File.dgi" -e -h -a"#]
    );
}

#[test]
fn expand_path_aliases_full_name() {
    assert_eq!(steps("{Path}|{FullName}"), [
        r"C:\SomeDirectory\Here\Test-File.ts|C:\SomeDirectory\Here\Test-File.ts"
    ]);
}

#[test]
fn unknown_property_renders_empty_with_warning() {
    let result = expand("[{Missing}] [{Missing}]", &NoProperties).unwrap();
    assert_eq!(result.steps(), ["[] []"]);
    assert_eq!(
        result.warnings(),
        [ExpansionWarning::UnknownProperty {
            name: "Missing".into(),
        }]
    );
}

#[test]
fn property_names_are_case_sensitive() {
    let result = expand("{name}", &test_file()).unwrap();
    assert_eq!(result.steps(), [""]);
    assert_eq!(result.warnings().len(), 1);
}

#[test]
fn strict_mode_rejects_unknown_property() {
    let expander = Expander::builder().strict_properties(true).build();
    let err = expander.expand("{Missing}", &NoProperties).unwrap_err();
    assert_eq!(
        err,
        TemplateError::UnknownProperty {
            name: "Missing".into(),
        }
    );
}

#[test]
fn unknown_property_ignores_its_format() {
    let result = expand("-o [{Missing:>5}].ts", &NoProperties).unwrap();
    assert_eq!(result.steps(), ["-o [].ts"]);
    assert_eq!(result.warnings().len(), 1);
}

#[test]
fn placeholder_formats() {
    let p = properties! { "Take" => 7, "Title" => "episode" };
    let result = expand("{Take:03} [{Title:>9}] [{Title:.3}] [{Take:<3}]", &p).unwrap();
    assert_eq!(result.steps(), ["007 [  episode] [epi] [7  ]"]);
}

#[test]
fn invalid_format_is_an_error() {
    let err = expand("{Name:abc}", &test_file()).unwrap_err();
    assert_eq!(
        err,
        TemplateError::InvalidFormatSpec {
            property: "Name".into(),
            spec: "abc".into(),
        }
    );
}

#[test]
fn file_properties_from_path() {
    let file = FileProperties::from_path(Path::new("/videos/show/clip.part1.ts"));
    let result = expand("{DirectoryName}|{Name}|{Extension}", &file).unwrap();
    assert_eq!(result.steps(), ["/videos/show|clip.part1|ts"]);
}

// =============================================================================
// Function Calls
// =============================================================================

#[test]
fn expand_number_calls() {
    assert_eq!(steps(">{number(4, 2, 2)}<"), [">2<", ">4<", ">6<", ">8<"]);
    assert_eq!(steps(">{number(4, 3, 3)}<"), [">3<", ">6<", ">9<", ">12<"]);
    assert_eq!(
        steps(">{number(5, 5, 5)}<"),
        [">5<", ">10<", ">15<", ">20<", ">25<"]
    );
    assert_eq!(steps(">{number(4, 1, 1, 1)}<"), [">1<", ">1<", ">2<", ">2<"]);
}

#[test]
fn expand_range_calls() {
    assert_eq!(
        steps(">{range(3, 280, 14)}<"),
        [">0-13<", ">280-293<", ">560-573<"]
    );
    assert_eq!(
        steps(">{Range(3, 280, 0, 14)}<"),
        [">0-13<", ">280-293<", ">560-573<"]
    );
}

#[test]
fn expand_several_calls_in_one_template() {
    assert_eq!(
        steps(
            "mplayer2 -nocache -dvd-device <filename> dvdnav://{number(2, 1, 1, 1)} \
             -chapter {range(2, 2, 1, 2)} -dumpstream -dumpfile {number(2, 1, 1)}.vob"
        ),
        [
            "mplayer2 -nocache -dvd-device <filename> dvdnav://1 -chapter 1-2 -dumpstream -dumpfile 1.vob",
            "mplayer2 -nocache -dvd-device <filename> dvdnav://1 -chapter 3-4 -dumpstream -dumpfile 2.vob",
        ]
    );
}

#[test]
fn shorter_sequences_repeat_cyclically() {
    let result = expand("{number(2, 1)}:{number(3, 10)}", &NoProperties).unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result.steps(), ["0:0", "1:10", "0:20"]);
}

#[test]
fn replacements_of_different_widths() {
    let result = expand("{number(3, 1000, 1)} {number(3, 1)} end", &NoProperties).unwrap();
    assert_eq!(result.steps(), ["1 0 end", "1001 1 end", "2001 2 end"]);
}

#[test]
fn template_without_calls_is_one_step() {
    let result = expand("plain {braces} stay { }", &NoProperties).unwrap();
    assert_eq!(result.steps(), ["plain  stay { }"]);

    let result = expand("", &NoProperties).unwrap();
    assert_eq!(result.steps(), [""]);
    assert_eq!(result.first(), Some(""));
}

#[test]
fn property_values_are_scanned_for_calls() {
    let p = properties! { "Start" => "{number(2, 5)}" };
    let result = expand("-ss {Start}", &p).unwrap();
    assert_eq!(result.steps(), ["-ss 0", "-ss 5"]);
}

#[test]
fn skipped_arguments_produce_warnings() {
    let result = expand("{number(2, x, 1)}", &NoProperties).unwrap();
    assert_eq!(result.steps(), ["0", "1"]);
    assert_eq!(
        result.warnings(),
        [ExpansionWarning::SkippedArgument {
            function: "number".into(),
            text: "x".into(),
        }]
    );
}

#[test]
fn expansion_is_idempotent() {
    let expander = Expander::new();
    let template = "{Name} {range(3, 10, 1, 4)} {number(2, 1)}";
    let first = expander.expand(template, &test_file()).unwrap();
    let second = expander.expand(template, &test_file()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn result_iteration_and_indexing() {
    let result = expand("{number(3, 1)}", &NoProperties).unwrap();
    assert_eq!(&result[1], "1");
    let collected: Vec<&String> = result.iter().collect();
    assert_eq!(collected.len(), 3);
    let owned: Vec<String> = result.into_iter().collect();
    assert_eq!(owned, ["0", "1", "2"]);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unknown_function_is_unresolved() {
    let err = expand("a {numbr(1, 1)}", &NoProperties).unwrap_err();
    assert_eq!(
        err,
        TemplateError::UnresolvedFunction {
            name: "numbr".into(),
            shape: "int, int".into(),
            reason: UnresolvedReason::UnknownName {
                suggestions: vec!["Number".into()],
            },
            span: Span::new(2, 13),
        }
    );
    insta::assert_snapshot!(
        err.to_string(),
        @"unresolved function 'numbr(int, int)': unknown function, did you mean 'Number'?"
    );
}

#[test]
fn unsupported_arity_is_unresolved() {
    let err = expand("{range(1)}", &NoProperties).unwrap_err();
    assert!(matches!(
        err,
        TemplateError::UnresolvedFunction {
            reason: UnresolvedReason::NoMatchingArity { arity: 1 },
            ..
        }
    ));
    insta::assert_snapshot!(
        err.to_string(),
        @"unresolved function 'range(int)': no signature takes 1 argument"
    );
}

#[test]
fn wrong_argument_kinds_are_malformed() {
    let err = expand(r#"{range(1, "a", 2)}"#, &NoProperties).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"malformed arguments for 'range(int, string, int)', expected (int, int, int)"
    );
    assert_eq!(err.span(), Some(Span::new(0, 18)));
}

#[test]
fn zero_steps_is_an_empty_sequence() {
    let err = expand("x {number(0, 1)}", &NoProperties).unwrap_err();
    assert_eq!(
        err,
        TemplateError::EmptySequence {
            name: "number".into(),
            span: Span::new(2, 14),
        }
    );
}

#[test]
fn invalid_generator_arguments() {
    let err = expand("{range(2, 1, 0, 0)}", &NoProperties).unwrap_err();
    assert_eq!(
        err,
        TemplateError::InvalidGeneratorArguments {
            name: "range".into(),
            span: Span::new(0, 19),
            source: GeneratorError::NonPositiveLength {
                parameter: "length",
                value: 0,
            },
        }
    );
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid arguments for 'range': length must be at least 1, got 0"
    );
}

#[test]
fn too_many_steps() {
    let expander = Expander::builder().max_steps(2).build();
    let err = expander.expand("{number(3, 1)}", &NoProperties).unwrap_err();
    assert_eq!(err, TemplateError::TooManySteps { steps: 3, max: 2 });
}

#[test]
fn unsupported_arity_message_counts_arguments() {
    let err = expand("{range(1, 2)}", &NoProperties).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"unresolved function 'range(int, int)': no signature takes 2 arguments"
    );
}

#[test]
fn first_error_wins() {
    let err = expand("{bogus(1)} {number(-1, 1)}", &NoProperties).unwrap_err();
    assert!(matches!(err, TemplateError::UnresolvedFunction { .. }));
}

#[test]
fn substitute_leaves_calls_in_place() {
    let expander = Expander::new();
    let text = expander
        .substitute("{Name} {number(2, 1)}", &test_file())
        .unwrap();
    assert_eq!(text, "Test-File {number(2, 1)}");
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn default_configuration() {
    let expander = Expander::new();
    assert_eq!(expander.max_steps(), DEFAULT_MAX_STEPS);
    assert!(!expander.strict_properties());

    let custom = Expander::builder()
        .max_steps(5)
        .strict_properties(true)
        .build();
    assert_eq!(custom.max_steps(), 5);
    assert!(custom.strict_properties());
}

#[test]
fn expander_is_shared_between_threads() {
    assert_send_sync::<Expander>();

    let expander = Expander::new();
    let names = ["a", "b", "c"];
    let results: Vec<Vec<String>> = thread::scope(|scope| {
        let handles: Vec<_> = names
            .iter()
            .map(|name| {
                let expander = &expander;
                scope.spawn(move || {
                    expander
                        .expand("{Name}-{number(2, 1)}", &properties! { "Name" => name })
                        .unwrap()
                        .into_steps()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        results,
        vec![vec!["a-0", "a-1"], vec!["b-0", "b-1"], vec!["c-0", "c-1"]]
    );
}
