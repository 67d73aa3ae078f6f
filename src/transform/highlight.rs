//! Syntax highlighting for fenced code blocks.
//!
//! Each supported language has a small regex grammar: an ordered list of
//! rules compiled into one alternation. Identifiers are classified after
//! matching (keyword, function, property) by looking at the text around
//! them, which keeps the patterns free of look-around.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::hast::{Element, Node, Properties};
use crate::render::visitor::{walk_mut, VisitorAction};
use crate::render::PipelineStats;

use super::HtmlTransform;

/// Options for code highlighting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Language used for code blocks without one
    pub default_language: Option<String>,

    /// Number lines with a `line` attribute and `line-number` class
    pub show_line_numbers: bool,
}

impl HighlightOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback language.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = Some(language.into());
        self
    }

    /// Enable or disable line numbers.
    pub fn with_line_numbers(mut self, show: bool) -> Self {
        self.show_line_numbers = show;
        self
    }
}

/// HTML stage highlighting `pre > code` blocks.
///
/// The `pre` gets the block's `language-x` class and the `code` gets
/// `code-highlight`. Every line is wrapped in `<span class="code-line">`
/// followed by a newline, and tokens of known languages become
/// `<span class="token kind">`.
#[derive(Debug, Clone, Default)]
pub struct Highlight {
    options: HighlightOptions,
}

impl Highlight {
    /// Create the stage with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the stage with custom options.
    pub fn with_options(options: HighlightOptions) -> Self {
        Self { options }
    }

    /// Highlight one `code` element inside `pre`. Returns whether a
    /// grammar was applied.
    fn highlight_block(&self, pre: &mut Properties, code: &mut Element) -> bool {
        let language = language_of(&code.properties).or_else(|| {
            self.options
                .default_language
                .as_ref()
                .map(|lang| lang.to_lowercase())
        });

        if let Some(lang) = &language {
            let class = format!("language-{}", lang);
            pre.add_class(&class);
            code.properties.add_class(&class);
        }
        code.properties.add_class("code-highlight");

        let grammar = language.as_deref().and_then(grammar_for);
        if let (Some(lang), None) = (&language, grammar) {
            log::warn!("No grammar for language '{}', wrapping lines only", lang);
        }

        let source = code.text_content();
        let segments = match grammar {
            Some(grammar) => grammar.tokenize(&source),
            None => vec![Segment::plain(&source)],
        };

        let mut children = Vec::new();
        for (index, line) in into_lines(segments).into_iter().enumerate() {
            let mut span = Element::new("span").with_class("code-line");
            if self.options.show_line_numbers {
                span.properties.add_class("line-number");
                span.properties.set("line", (index + 1).to_string());
            }
            span.children = line;
            children.push(span.into());
            children.push(Node::text("\n"));
        }
        code.children = children;

        grammar.is_some()
    }
}

impl HtmlTransform for Highlight {
    fn name(&self) -> &'static str {
        "highlight"
    }

    fn transform(&self, tree: &mut Node, stats: &mut PipelineStats) {
        walk_mut(tree, |node, _ctx| {
            let Some(pre) = node.as_element_mut() else {
                return VisitorAction::Continue;
            };
            if pre.tag_name != "pre" {
                return VisitorAction::Continue;
            }

            let Element {
                properties,
                children,
                ..
            } = pre;
            for child in children.iter_mut() {
                if let Some(code) = child.as_element_mut().filter(|el| el.tag_name == "code") {
                    if self.highlight_block(properties, code) {
                        stats.add_code_block();
                    }
                }
            }
            VisitorAction::Skip
        });
    }
}

/// Language named by a `language-x` or `lang-x` class.
fn language_of(properties: &Properties) -> Option<String> {
    properties.classes().into_iter().find_map(|class| {
        class
            .strip_prefix("language-")
            .or_else(|| class.strip_prefix("lang-"))
            .filter(|lang| !lang.is_empty())
            .map(str::to_lowercase)
    })
}

/// A run of source text with an optional token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment<'a> {
    kind: Option<&'static str>,
    text: &'a str,
}

impl<'a> Segment<'a> {
    fn plain(text: &'a str) -> Self {
        Self { kind: None, text }
    }
}

/// Split segments into lines of nodes. A trailing empty line is dropped.
fn into_lines(segments: Vec<Segment<'_>>) -> Vec<Vec<Node>> {
    let mut lines: Vec<Vec<Node>> = vec![Vec::new()];
    for segment in segments {
        for (index, part) in segment.text.split('\n').enumerate() {
            if index > 0 {
                lines.push(Vec::new());
            }
            if part.is_empty() {
                continue;
            }
            let node = match segment.kind {
                Some(kind) => token(kind, part),
                None => Node::text(part),
            };
            if let Some(line) = lines.last_mut() {
                line.push(node);
            }
        }
    }
    if lines.len() > 1 && lines.last().is_some_and(Vec::is_empty) {
        lines.pop();
    }
    lines
}

fn token(kind: &str, text: &str) -> Node {
    let mut span = Element::new("span").with_class("token");
    for class in kind.split_whitespace() {
        span.properties.add_class(class);
    }
    span.with_children(vec![Node::text(text)]).into()
}

#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Fixed token kind
    Token(&'static str),
    /// Word classified by [`Grammar::classify`]
    Identifier,
    /// String that is a `property` when followed by `:`
    Key,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Script,
    Shell,
    Css,
    Json,
}

struct Grammar {
    dialect: Dialect,
    pattern: Regex,
    rules: Vec<Rule>,
    keywords: &'static [&'static str],
    builtins: &'static [&'static str],
}

impl Grammar {
    fn new(
        dialect: Dialect,
        rules: &[(Rule, &str)],
        keywords: &'static [&'static str],
        builtins: &'static [&'static str],
    ) -> Self {
        let alternation = rules
            .iter()
            .map(|(_, pattern)| format!("({})", pattern))
            .collect::<Vec<_>>()
            .join("|");
        Self {
            dialect,
            pattern: Regex::new(&alternation).expect("grammar patterns are valid"),
            rules: rules.iter().map(|(rule, _)| *rule).collect(),
            keywords,
            builtins,
        }
    }

    fn tokenize<'a>(&self, source: &'a str) -> Vec<Segment<'a>> {
        let mut segments = Vec::new();
        let mut plain_start = 0;
        let mut depth = 0usize;

        for caps in self.pattern.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let text = whole.as_str();
            let rest = &source[whole.end()..];
            let rule = (1..caps.len())
                .find(|&group| caps.get(group).is_some())
                .and_then(|group| self.rules.get(group - 1));

            let kind = match rule {
                Some(Rule::Token(kind)) => Some(*kind),
                Some(Rule::Identifier) => self.classify(text, rest, depth),
                Some(Rule::Key) if rest.trim_start().starts_with(':') => Some("property"),
                Some(Rule::Key) => Some("string"),
                None => None,
            };
            match text {
                "{" => depth += 1,
                "}" => depth = depth.saturating_sub(1),
                _ => {}
            }

            if let Some(kind) = kind {
                if whole.start() > plain_start {
                    segments.push(Segment::plain(&source[plain_start..whole.start()]));
                }
                segments.push(Segment { kind: Some(kind), text });
                plain_start = whole.end();
            }
        }

        if plain_start < source.len() {
            segments.push(Segment::plain(&source[plain_start..]));
        }
        segments
    }

    fn classify(&self, word: &str, rest: &str, depth: usize) -> Option<&'static str> {
        let called = rest.trim_start().starts_with('(');
        match self.dialect {
            Dialect::Script => {
                if word == "true" || word == "false" {
                    Some("boolean")
                } else if self.keywords.contains(&word) {
                    Some("keyword")
                } else if called {
                    Some("function")
                } else {
                    None
                }
            }
            Dialect::Shell => {
                if word == "true" || word == "false" {
                    Some("boolean")
                } else if self.keywords.contains(&word) {
                    Some("keyword")
                } else if self.builtins.contains(&word) {
                    Some("function")
                } else {
                    None
                }
            }
            Dialect::Css => {
                if called {
                    Some("function")
                } else if depth == 0 {
                    Some("selector")
                } else if rest.trim_start().starts_with(':') {
                    Some("property")
                } else {
                    None
                }
            }
            Dialect::Json => match word {
                "true" | "false" => Some("boolean"),
                "null" => Some("null keyword"),
                _ => None,
            },
        }
    }
}

const DOUBLE_QUOTED: &str = r#""(?:[^"\\\n]|\\.)*""#;
const SINGLE_QUOTED: &str = r"'(?:[^'\\\n]|\\.)*'";

const JS_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "finally", "for", "from", "function",
    "get", "if", "import", "in", "instanceof", "let", "new", "null", "of", "return", "set",
    "static", "super", "switch", "this", "throw", "try", "typeof", "undefined", "var", "void",
    "while", "with", "yield",
];

const TS_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "break", "case", "catch", "class", "const", "continue",
    "declare", "default", "delete", "do", "else", "enum", "export", "extends", "finally", "for",
    "from", "function", "get", "if", "implements", "import", "in", "instanceof", "interface",
    "is", "keyof", "let", "namespace", "new", "null", "of", "private", "protected", "public",
    "readonly", "return", "set", "static", "super", "switch", "this", "throw", "try", "type",
    "typeof", "undefined", "var", "void", "while", "with", "yield",
];

const SHELL_KEYWORDS: &[&str] = &[
    "case", "do", "done", "elif", "else", "esac", "fi", "for", "function", "if", "in", "return",
    "select", "then", "until", "while",
];

const SHELL_BUILTINS: &[&str] = &[
    "alias", "brew", "cat", "cd", "cp", "curl", "echo", "exit", "export", "git", "local", "ls",
    "mkdir", "mv", "npm", "npx", "pnpm", "printf", "read", "rm", "set", "source", "sudo",
    "unset", "yarn",
];

fn script_rules() -> Vec<(Rule, String)> {
    vec![
        (Rule::Token("comment"), r"//[^\n]*|/\*[\s\S]*?\*/".to_string()),
        (
            Rule::Token("template-string"),
            r"`(?:[^`\\]|\\[\s\S])*`".to_string(),
        ),
        (
            Rule::Token("string"),
            format!("{}|{}", DOUBLE_QUOTED, SINGLE_QUOTED),
        ),
        (
            Rule::Token("number"),
            r"\b(?:0[xX][\da-fA-F]+|\d+(?:\.\d+)?(?:[eE][+-]?\d+)?)\b".to_string(),
        ),
        (Rule::Identifier, r"[A-Za-z_$][\w$]*".to_string()),
        (Rule::Token("operator"), r"=>|[-+*/%=!<>&|^~?]+".to_string()),
        (Rule::Token("punctuation"), r"[{}\[\]();,.:]".to_string()),
    ]
}

fn build(
    dialect: Dialect,
    rules: Vec<(Rule, String)>,
    keywords: &'static [&'static str],
    builtins: &'static [&'static str],
) -> Grammar {
    let rules: Vec<(Rule, &str)> = rules
        .iter()
        .map(|(rule, pattern)| (*rule, pattern.as_str()))
        .collect();
    Grammar::new(dialect, &rules, keywords, builtins)
}

static JAVASCRIPT: Lazy<Grammar> =
    Lazy::new(|| build(Dialect::Script, script_rules(), JS_KEYWORDS, &[]));

static TYPESCRIPT: Lazy<Grammar> =
    Lazy::new(|| build(Dialect::Script, script_rules(), TS_KEYWORDS, &[]));

static JSON: Lazy<Grammar> = Lazy::new(|| {
    build(
        Dialect::Json,
        vec![
            (Rule::Key, DOUBLE_QUOTED.to_string()),
            (
                Rule::Token("number"),
                r"-?\b\d+(?:\.\d+)?(?:[eE][+-]?\d+)?\b".to_string(),
            ),
            (Rule::Identifier, r"[A-Za-z_]\w*".to_string()),
            (Rule::Token("operator"), ":".to_string()),
            (Rule::Token("punctuation"), r"[{}\[\],]".to_string()),
        ],
        &[],
        &[],
    )
});

static SHELL: Lazy<Grammar> = Lazy::new(|| {
    build(
        Dialect::Shell,
        vec![
            (Rule::Token("comment"), r"#[^\n]*".to_string()),
            (
                Rule::Token("string"),
                r#""(?:[^"\\]|\\[\s\S])*"|'[^']*'"#.to_string(),
            ),
            (
                Rule::Token("variable"),
                r"\$(?:\{[^}\n]*\}|[A-Za-z_]\w*|[0-9@#?$!*-])".to_string(),
            ),
            (Rule::Token("number"), r"\b\d+\b".to_string()),
            (Rule::Identifier, r"[A-Za-z_][\w.-]*".to_string()),
            (Rule::Token("operator"), r"&&|\|\||;;|[|&;<>=]".to_string()),
            (Rule::Token("punctuation"), r"[{}\[\]()]".to_string()),
        ],
        SHELL_KEYWORDS,
        SHELL_BUILTINS,
    )
});

static CSS: Lazy<Grammar> = Lazy::new(|| {
    build(
        Dialect::Css,
        vec![
            (Rule::Token("comment"), r"/\*[\s\S]*?\*/".to_string()),
            (Rule::Token("atrule"), r"@[\w-]+".to_string()),
            (
                Rule::Token("string"),
                format!("{}|{}", DOUBLE_QUOTED, SINGLE_QUOTED),
            ),
            (Rule::Token("important"), r"!important\b".to_string()),
            (
                Rule::Token("number"),
                r"-?(?:\d+(?:\.\d+)?|\.\d+)(?:%|[A-Za-z]+)?".to_string(),
            ),
            (Rule::Identifier, r"-?[A-Za-z_][\w-]*".to_string()),
            (Rule::Token("punctuation"), r"[{}();:,]".to_string()),
        ],
        &[],
        &[],
    )
});

fn grammar_for(language: &str) -> Option<&'static Grammar> {
    match language {
        "javascript" | "js" | "jsx" | "mjs" | "cjs" => Some(&*JAVASCRIPT),
        "typescript" | "ts" | "tsx" | "mts" | "cts" => Some(&*TYPESCRIPT),
        "json" => Some(&*JSON),
        "bash" | "sh" | "shell" | "zsh" => Some(&*SHELL),
        "css" => Some(&*CSS),
        _ => None,
    }
}
