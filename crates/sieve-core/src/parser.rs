//! Parser module for JavaScript/TypeScript source code
//!
//! Integrates with SWC for parsing source text into an AST. Extraction only
//! talks to the parser through [`SourceParser`], so tests can substitute it.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use swc_common::comments::{Comment, SingleThreadedComments};
use swc_common::sync::Lrc;
use swc_common::{BytePos, FileName, SourceMap, Span, Spanned};
use swc_ecma_parser::{EsSyntax, Syntax, TsSyntax, parse_file_as_module, parse_file_as_script};

pub use swc_ecma_ast::{EsVersion, Module, ModuleItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
}

pub fn detect_language(filename: &str) -> Language {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match ext.as_str() {
        "ts" | "mts" | "cts" => Language::TypeScript,
        "tsx" => Language::Tsx,
        "jsx" => Language::Jsx,
        _ => Language::JavaScript,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Module,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plugin {
    Jsx,
    Typescript,
    Decorators,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub source_type: SourceType,
    pub plugins: Vec<Plugin>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::Module,
            plugins: vec![Plugin::Jsx, Plugin::Typescript],
        }
    }
}

impl ParseOptions {
    pub fn for_language(language: Language) -> Self {
        let plugins = match language {
            Language::JavaScript => vec![],
            Language::TypeScript => vec![Plugin::Typescript],
            Language::Jsx => vec![Plugin::Jsx],
            Language::Tsx => vec![Plugin::Jsx, Plugin::Typescript],
        };
        Self {
            source_type: SourceType::Module,
            plugins,
        }
    }

    pub fn for_file(filename: &str) -> Self {
        Self::for_language(detect_language(filename))
    }

    pub fn has_plugin(&self, plugin: Plugin) -> bool {
        self.plugins.contains(&plugin)
    }

    pub fn syntax(&self) -> Syntax {
        let jsx = self.has_plugin(Plugin::Jsx);
        let decorators = self.has_plugin(Plugin::Decorators);

        if self.has_plugin(Plugin::Typescript) {
            Syntax::Typescript(TsSyntax {
                tsx: jsx,
                decorators,
                ..Default::default()
            })
        } else {
            Syntax::Es(EsSyntax {
                jsx,
                decorators,
                ..Default::default()
            })
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{message} at {line}:{column}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub span_lo: u32,
    pub span_hi: u32,
    pub message: String,
}

/// Line/column range of a node. Lines and columns are 1-based; columns count bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

/// Turns source text into a [`ParsedSource`].
pub trait SourceParser {
    fn parse(&self, code: &str, options: &ParseOptions) -> Result<ParsedSource, ParseError>;
}

impl<T: SourceParser + ?Sized> SourceParser for &T {
    fn parse(&self, code: &str, options: &ParseOptions) -> Result<ParsedSource, ParseError> {
        (**self).parse(code, options)
    }
}

/// Strict SWC parser: any syntax error, recovered or not, fails the parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwcParser;

impl SwcParser {
    pub fn new() -> Self {
        Self
    }
}

impl SourceParser for SwcParser {
    fn parse(&self, code: &str, options: &ParseOptions) -> Result<ParsedSource, ParseError> {
        let source_map: Lrc<SourceMap> = Default::default();
        let fm = source_map
            .new_source_file(FileName::Custom("input.js".into()).into(), code.to_string());
        let comments = SingleThreadedComments::default();
        let mut recovered_errors = Vec::new();

        let to_parse_error = |e: swc_ecma_parser::error::Error| {
            let span = e.span();
            let loc = source_map.lookup_char_pos(span.lo);
            ParseError {
                line: loc.line,
                column: loc.col_display,
                span_lo: span.lo.0,
                span_hi: span.hi.0,
                message: e.kind().msg().to_string(),
            }
        };

        let result = match options.source_type {
            SourceType::Module => parse_file_as_module(
                &fm,
                options.syntax(),
                EsVersion::latest(),
                Some(&comments),
                &mut recovered_errors,
            ),
            SourceType::Script => parse_file_as_script(
                &fm,
                options.syntax(),
                EsVersion::latest(),
                Some(&comments),
                &mut recovered_errors,
            )
            .map(|script| Module {
                span: script.span,
                body: script.body.into_iter().map(ModuleItem::Stmt).collect(),
                shebang: script.shebang,
            }),
        };

        let module = result.map_err(&to_parse_error)?;
        if let Some(first) = recovered_errors.into_iter().next() {
            return Err(to_parse_error(first));
        }

        let (leading, trailing) = comments.take_all();
        let mut collected: Vec<Comment> = leading
            .borrow()
            .values()
            .chain(trailing.borrow().values())
            .flatten()
            .cloned()
            .collect();
        collected.sort_by_key(|c| c.span.lo.0);
        collected.dedup_by_key(|c| c.span);

        tracing::trace!(
            items = module.body.len(),
            comments = collected.len(),
            "parsed source"
        );

        Ok(ParsedSource {
            source: code.to_string(),
            module,
            comments: collected,
            base: fm.start_pos.0,
            line_starts: OnceLock::new(),
        })
    }
}

pub struct ParsedSource {
    source: String,
    module: Module,
    comments: Vec<Comment>,
    base: u32,
    line_starts: OnceLock<Vec<usize>>,
}

impl std::fmt::Debug for ParsedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedSource")
            .field("len", &self.source.len())
            .field("items", &self.module.body.len())
            .field("comment_count", &self.comments.len())
            .finish()
    }
}

impl ParsedSource {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Byte offset of `pos` inside the source text.
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0.saturating_sub(self.base) as usize).min(self.source.len())
    }

    pub fn text(&self, span: Span) -> Option<&str> {
        let lo = self.offset(span.lo);
        let hi = self.offset(span.hi);
        if lo <= hi {
            self.source.get(lo..hi)
        } else {
            None
        }
    }

    pub fn location(&self, span: Span) -> Location {
        let (line, column) = self.line_column(self.offset(span.lo));
        let (end_line, end_column) = self.line_column(self.offset(span.hi));
        Location {
            line,
            column,
            end_line,
            end_column,
        }
    }

    fn line_column(&self, offset: usize) -> (usize, usize) {
        let starts = self.line_starts.get_or_init(|| self.build_line_starts());
        let index = match starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };
        (index + 1, offset - starts[index] + 1)
    }

    fn build_line_starts(&self) -> Vec<usize> {
        let mut starts = vec![0];
        for (i, c) in self.source.char_indices() {
            if c == '\n' {
                starts.push(i + 1);
            }
        }
        starts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> Result<ParsedSource, ParseError> {
        SwcParser::new().parse(code, &ParseOptions::default())
    }

    #[test]
    fn parse_simple_variable_declaration() {
        let parsed = parse("const x = 1;").unwrap();

        assert_eq!(parsed.module().body.len(), 1);
    }

    #[test]
    fn parse_invalid_syntax_returns_error() {
        let result = parse("const = ;");

        assert!(result.is_err());
        let error = result.unwrap_err();
        assert_eq!(error.line, 1);
        assert!(!error.message.is_empty());
    }

    #[test]
    fn recoverable_errors_still_fail() {
        let result = parse("function foo() {\n    const x = 1;\n");

        assert!(result.is_err());
    }

    #[test]
    fn default_options_accept_jsx_and_types() {
        let parsed = parse("const el: JSX.Element = <div>Hello</div>;");

        assert!(parsed.is_ok());
    }

    #[test]
    fn plain_javascript_rejects_type_annotations() {
        let options = ParseOptions::for_file("script.js");
        let result = SwcParser::new().parse("const x: number = 1;", &options);

        assert!(result.is_err());
    }

    #[test]
    fn script_source_type_parses_into_module_body() {
        let options = ParseOptions {
            source_type: SourceType::Script,
            plugins: vec![],
        };
        let parsed = SwcParser::new()
            .parse("var a = 1; with (a) {}", &options)
            .unwrap();

        assert_eq!(parsed.module().body.len(), 2);
    }

    #[test]
    fn collects_comments_in_source_order() {
        let parsed = parse("// first\nconst x = 1; /* second */\n// third\n").unwrap();

        let texts: Vec<String> = parsed
            .comments()
            .iter()
            .map(|c| c.text.to_string())
            .collect();
        assert_eq!(texts, vec![" first", " second ", " third"]);
    }

    #[test]
    fn location_is_relative_to_source_start() {
        let code = "const x = 1;\nconst y = 2;";
        let parsed = parse(code).unwrap();

        let second = parsed.module().body[1].span();
        let location = parsed.location(second);

        assert_eq!(location.line, 2);
        assert_eq!(location.column, 1);
        assert_eq!(location.end_line, 2);
        assert_eq!(parsed.text(second), Some("const y = 2;"));
    }

    #[test]
    fn detect_language_from_extension() {
        assert_eq!(detect_language("file.js"), Language::JavaScript);
        assert_eq!(detect_language("file.mjs"), Language::JavaScript);
        assert_eq!(detect_language("file.jsx"), Language::Jsx);
        assert_eq!(detect_language("file.ts"), Language::TypeScript);
        assert_eq!(detect_language("file.cts"), Language::TypeScript);
        assert_eq!(detect_language("file.tsx"), Language::Tsx);
        assert_eq!(detect_language("unknown"), Language::JavaScript);
    }

    #[test]
    fn options_for_file_pick_plugins() {
        assert_eq!(ParseOptions::for_file("a.js").plugins, vec![]);
        assert_eq!(
            ParseOptions::for_file("a.tsx").plugins,
            vec![Plugin::Jsx, Plugin::Typescript]
        );
    }

    #[test]
    fn default_options_match_babel_style_defaults() {
        let options = ParseOptions::default();

        assert_eq!(options.source_type, SourceType::Module);
        assert!(options.has_plugin(Plugin::Jsx));
        assert!(options.has_plugin(Plugin::Typescript));
        assert!(!options.has_plugin(Plugin::Decorators));
    }
}
