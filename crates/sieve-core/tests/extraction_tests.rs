//! End-to-end extraction over inline sources and the JavaScript fixtures.

use std::cell::Cell;
use std::fs;
use std::path::Path;

use insta::assert_json_snapshot;
use sieve_core::extract::{
    DeclarationKind, ExportKind, FunctionKind, ImportKind, ImportSpecifierEntry,
};
use sieve_core::parser::{ParseError, ParseOptions, ParsedSource, SourceParser, SwcParser};
use sieve_core::{ErrorKind, Extractor, ExtractorOptions, OptionsUpdate};

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../tests/fixtures");

fn read_fixture(relative_path: &str) -> String {
    let path = Path::new(FIXTURES_DIR).join(relative_path);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Delegates to SWC and counts how often it was asked to parse.
#[derive(Default)]
struct CountingParser {
    calls: Cell<usize>,
}

impl SourceParser for CountingParser {
    fn parse(&self, code: &str, options: &ParseOptions) -> Result<ParsedSource, ParseError> {
        self.calls.set(self.calls.get() + 1);
        SwcParser::new().parse(code, options)
    }
}

#[test]
fn rejected_input_never_reaches_the_parser() {
    let spy = CountingParser::default();
    let mut extractor = Extractor::with_parser(
        &spy,
        ExtractorOptions {
            max_file_size: 16,
            ..ExtractorOptions::default()
        },
    );

    let empty = extractor.extract("").unwrap_err();
    let oversized = extractor.extract(&"x".repeat(17)).unwrap_err();

    assert_eq!(empty.kind(), ErrorKind::InvalidInput);
    assert_eq!(oversized.kind(), ErrorKind::SizeExceeded);
    assert!(oversized.to_string().contains("exceeds maximum allowed size"));
    assert_eq!(spy.calls.get(), 0, "parser must not run for rejected input");

    extractor.extract("let a = 1;").unwrap();
    assert_eq!(spy.calls.get(), 1, "one parse per accepted extraction");
}

#[test]
fn url_string_function_and_const() {
    let mut extractor = Extractor::new();

    let output = extractor
        .extract("const x = 'https://example.com'; function f(a,b){ if(a) return b; }")
        .unwrap();
    let results = &output.results;

    let strings = results.strings.as_ref().unwrap();
    assert_eq!(strings.urls.len(), 1);
    assert_eq!(strings.urls[0].value, "https://example.com");
    assert_eq!(strings.all.len(), 1);

    let functions = results.functions.as_ref().unwrap();
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].name, "f");
    assert_eq!(functions[0].kind, FunctionKind::Declaration);
    assert_eq!(functions[0].param_count, 2);
    assert_eq!(functions[0].complexity, Some(2));

    let variables = results.variables.as_ref().unwrap();
    assert_eq!(variables.constants.len(), 1);
    assert_eq!(variables.constants[0].name.as_deref(), Some("x"));
    assert_eq!(variables.constants[0].declaration_kind, DeclarationKind::Const);
}

#[test]
fn aliased_import_and_require() {
    let mut extractor = Extractor::new();

    let output = extractor
        .extract("import {a as b} from './m'; const y = require('./n');")
        .unwrap();
    let imports = output.results.imports.unwrap();

    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0].kind, ImportKind::Import);
    assert_eq!(imports[0].source, "./m");
    assert!(imports[0].is_local);
    assert_eq!(
        imports[0].specifiers,
        vec![ImportSpecifierEntry::Named {
            imported: "a".to_string(),
            local: "b".to_string(),
        }]
    );
    assert_eq!(imports[1].kind, ImportKind::Require);
    assert_eq!(imports[1].source, "./n");
    assert!(imports[1].is_local);
    assert!(imports[1].specifiers.is_empty());
}

#[test]
fn string_categories_partition_every_fixture() {
    let mut extractor = Extractor::new();

    for fixture in [
        "javascript/module.js",
        "javascript/commonjs.cjs",
        "javascript/component.jsx",
        "javascript/server.mjs",
    ] {
        let output = extractor.extract(&read_fixture(fixture)).unwrap();
        let strings = output.results.strings.unwrap();

        let bucketed = strings.urls.len()
            + strings.paths.len()
            + strings.messages.len()
            + strings.identifiers.len()
            + strings.other.len();
        assert_eq!(bucketed, strings.all.len(), "partition broken for {}", fixture);
    }
}

#[test]
fn module_fixture_inventory() {
    let mut extractor = Extractor::new();

    let output = extractor.extract(&read_fixture("javascript/module.js")).unwrap();
    let results = &output.results;

    assert!(results.metadata.has_use_strict);
    assert!(!results.metadata.top_level_await);

    let classes = results.classes.as_ref().unwrap();
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].name, "Client");
    assert_eq!(classes[0].super_class_name.as_deref(), Some("Base"));
    let body = classes[0].body.as_ref().unwrap();
    assert_eq!(body.method_count, 3);
    assert_eq!(body.property_count, 2);

    let exports = results.exports.as_ref().unwrap();
    let named: Vec<&str> = exports
        .iter()
        .filter(|e| e.kind == ExportKind::Named)
        .filter_map(|e| e.name.as_deref())
        .collect();
    // `export class Client` is reported under classes, not exports
    assert_eq!(named, vec!["createClient", "toQuery", "useState", "memoized"]);
    assert!(exports.iter().any(|e| e.kind == ExportKind::Default
        && e.name.as_deref() == Some("main")));
    assert!(exports.iter().any(|e| e.kind == ExportKind::All
        && e.source.as_deref() == Some("./helpers")));

    let strings = results.strings.as_ref().unwrap();
    assert_eq!(strings.urls[0].value, "https://api.example.com/v1");
    assert_eq!(strings.messages.len(), 1);
    assert!(
        strings.all.iter().all(|s| s.value != "use strict"),
        "directive prologue is not a string literal"
    );

    let emails = results.patterns.get("email").unwrap();
    assert_eq!(emails[0].value, "support@example.com");
    assert_eq!(results.comments.len(), 2);

    let variables = results.variables.as_ref().unwrap();
    let retries = variables
        .all
        .iter()
        .find(|v| v.name.as_deref() == Some("retries"))
        .unwrap();
    assert_eq!(retries.mutation_count, Some(1));
}

#[test]
fn commonjs_fixture_requires_and_complexity() {
    let mut extractor = Extractor::new();

    let output = extractor.extract(&read_fixture("javascript/commonjs.cjs")).unwrap();
    let results = &output.results;

    let sources: Vec<&str> = results
        .imports
        .as_ref()
        .unwrap()
        .iter()
        .map(|i| i.source.as_str())
        .collect();
    assert_eq!(sources, vec!["fs", "path", "./parser"]);

    let read_config = &results.functions.as_ref().unwrap()[0];
    assert_eq!(read_config.name, "readConfig");
    // if + two switch cases; for-of does not count
    assert_eq!(read_config.complexity, Some(4));
    assert!(results.exports.as_ref().unwrap().is_empty());
}

#[test]
fn server_fixture_top_level_await() {
    let mut extractor = Extractor::new();

    let output = extractor.extract(&read_fixture("javascript/server.mjs")).unwrap();

    assert!(output.results.metadata.top_level_await);
    assert_eq!(
        output.results.patterns.get("ip").unwrap()[0].value,
        "127.0.0.1"
    );
}

#[test]
fn statistics_grow_monotonically_until_reset() {
    let mut extractor = Extractor::new();
    let sources = [
        "const a = 'x';",
        "function f() {} class A {}",
        "import b from 'b'; export const c = b;",
    ];

    let mut previous = extractor.get_statistics();
    for source in sources {
        extractor.extract(source).unwrap();
        let current = extractor.get_statistics();
        assert!(current.total_extractions > previous.total_extractions);
        assert!(current.total_strings >= previous.total_strings);
        assert!(current.total_functions >= previous.total_functions);
        assert!(current.total_variables >= previous.total_variables);
        assert!(current.total_classes >= previous.total_classes);
        assert!(current.total_imports >= previous.total_imports);
        assert!(current.total_exports >= previous.total_exports);
        previous = current;
    }

    assert_eq!(previous.total_extractions, 3);
    assert_eq!(previous.total_classes, 1);
    assert_eq!(extractor.get_all_results().len(), 3);

    extractor.reset();
    let zeroed = extractor.get_statistics();
    assert_eq!(zeroed.total_extractions, 0);
    assert_eq!(zeroed.total_strings, 0);
    assert_eq!(zeroed.average_extraction_time, 0.0);
    assert!(extractor.get_all_results().is_empty());
}

#[test]
fn ids_are_unique_across_rapid_calls() {
    let mut extractor = Extractor::new();

    let ids: Vec<String> = (0..20)
        .map(|_| extractor.extract("let a;").unwrap().id)
        .collect();

    let mut deduped = ids.clone();
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
    assert!(ids.iter().all(|id| id.starts_with("extraction-")));
    assert_eq!(extractor.get_all_results().len(), 20);
}

#[test]
fn pattern_round_trip() {
    let mut extractor = Extractor::new();

    extractor.register_pattern_source("foo", "foo").unwrap();
    assert_eq!(extractor.get_pattern("foo").unwrap().as_str(), "foo");

    assert!(extractor.unregister_pattern("foo"));
    assert!(extractor.get_pattern("foo").is_none());
}

#[test]
fn toggled_off_categories_do_not_count() {
    let mut extractor = Extractor::new();
    let update = OptionsUpdate {
        extract_functions: Some(false),
        ..OptionsUpdate::default()
    };

    extractor
        .extract_with("function f() {} function g() {}", &update)
        .unwrap();

    assert_eq!(extractor.get_statistics().total_functions, 0);
}

#[test]
fn function_entry_shape() {
    let mut extractor = Extractor::new();

    let output = extractor
        .extract("function add(a, b) { return a + b; }")
        .unwrap();

    assert_json_snapshot!(output.results.functions, @r#"
    [
      {
        "name": "add",
        "kind": "declaration",
        "is_async": false,
        "is_generator": false,
        "param_count": 2,
        "location": {
          "line": 1,
          "column": 1,
          "end_line": 1,
          "end_column": 37
        },
        "body": {
          "statement_count": 1,
          "has_return": true
        },
        "complexity": 1
      }
    ]
    "#);
}
