//! Stylesheet sinks.
//!
//! The resolver never touches a stylesheet. Class-name compilation and global
//! style injection go through a [`StyleSink`], a small capability the host
//! provides. [`MemorySink`] keeps the sheet in memory and is what the
//! process-wide [`default_sink`] uses.
//!
//! ```rust
//! use propstyle::{css, global, MemorySink};
//!
//! let sink = MemorySink::new();
//! let class = css(&sink, "color: red; padding: 10px;");
//! global(&sink, "body { margin: 0; }");
//!
//! assert!(class.starts_with("css-"));
//! assert!(sink.text().contains("color:red;padding:10px;"));
//! assert!(sink.text().contains("body{margin:0;}"));
//! ```
//!
//! Style text is read with `cssparser`'s tokenizer, so quoted strings,
//! escapes and comments never confuse block or declaration boundaries.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cssparser::{ParseError, Parser, ParserInput, ToCss, Token};
use once_cell::sync::Lazy;

/// Where compiled and global styles end up.
pub trait StyleSink: Send + Sync {
    /// Registers scoped style text and returns the class name that applies it.
    fn compile(&self, css_text: &str) -> String;

    /// Appends unscoped style text to the sheet.
    fn inject(&self, css_text: &str);
}

/// Compiles style text into a class name.
pub fn css(sink: &dyn StyleSink, css_text: &str) -> String {
    sink.compile(css_text)
}

/// Injects global style text.
pub fn global(sink: &dyn StyleSink, css_text: &str) {
    sink.inject(css_text)
}

static DEFAULT_SINK: Lazy<MemorySink> = Lazy::new(MemorySink::new);

/// The process-wide sheet.
pub fn default_sink() -> &'static MemorySink {
    &DEFAULT_SINK
}

#[derive(Debug, Default)]
struct Sheet {
    rules: Vec<String>,
    seen: HashSet<String>,
}

/// A thread-safe in-memory stylesheet.
///
/// Text is minified before it is stored. Identical text compiles to the same
/// class name and is stored once.
#[derive(Debug, Default)]
pub struct MemorySink {
    sheet: Mutex<Sheet>,
}

impl MemorySink {
    /// Creates an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// All rules in insertion order.
    pub fn rules(&self) -> Vec<String> {
        self.lock().rules.clone()
    }

    /// The whole sheet as one string.
    pub fn text(&self) -> String {
        self.lock().rules.concat()
    }

    /// Removes every rule.
    pub fn clear(&self) {
        let mut sheet = self.lock();
        sheet.rules.clear();
        sheet.seen.clear();
    }

    fn lock(&self) -> MutexGuard<'_, Sheet> {
        self.sheet.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, key: String, rules: Vec<String>) {
        let mut sheet = self.lock();
        if sheet.seen.insert(key) {
            sheet.rules.extend(rules);
        }
    }
}

impl StyleSink for MemorySink {
    fn compile(&self, css_text: &str) -> String {
        let minified = minify(css_text);
        let class = class_name(&minified);
        tracing::trace!("compiled {} ({} bytes)", class, minified.len());
        let rules = scope_rules(&class, &minified);
        self.push(class.clone(), rules);
        class
    }

    fn inject(&self, css_text: &str) {
        let minified = minify(css_text);
        if minified.is_empty() {
            return;
        }
        self.push(format!("global:{}", minified), vec![minified]);
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// `css-` plus the 64-bit FNV-1a hash of the minified text, so the same text
/// names the same class across builds and processes.
fn class_name(minified: &str) -> String {
    let hash = minified
        .bytes()
        .fold(FNV_OFFSET, |hash, byte| (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME));
    format!("css-{:x}", hash)
}

/// Strips comments and insignificant whitespace, and closes every block's
/// last declaration with `;`.
///
/// Whitespace between two tokens is kept as one space unless it follows an
/// opening bracket or one of `} ; , :`, or precedes `;`, `,`, `{` or `!`.
/// Whitespace before `:` is kept, so `div :first-child` stays a descendant
/// selector.
pub fn minify(css_text: &str) -> String {
    let mut input = ParserInput::new(css_text);
    let mut parser = Parser::new(&mut input);
    let mut writer = Writer::default();
    while let Some(token) = next_token(&mut parser) {
        writer.write(&mut parser, &token);
    }
    writer.out
}

/// Splits minified text into a rule for the class itself plus one rule per
/// nested block, scoped under the class. `&` in a nested selector stands for
/// the class.
fn scope_rules(class: &str, minified: &str) -> Vec<String> {
    let scope = format!(".{}", class);
    let mut input = ParserInput::new(minified);
    let mut parser = Parser::new(&mut input);
    let mut own = String::new();
    let mut nested = Vec::new();
    let mut current = Writer::default();

    while let Some(token) = next_token(&mut parser) {
        match token {
            Token::Semicolon => end_declaration(&mut own, &mut current),
            Token::CurlyBracketBlock => {
                let selector = std::mem::take(&mut current).out;
                let mut body = Writer::default();
                body.push(&token);
                body.block(&mut parser, '}');
                let scoped = if selector.contains('&') {
                    selector.replace('&', &scope)
                } else {
                    format!("{} {}", scope, selector)
                };
                nested.push(format!("{}{}", scoped, body.out));
            }
            _ => current.write(&mut parser, &token),
        }
    }
    end_declaration(&mut own, &mut current);

    let mut rules = Vec::with_capacity(nested.len() + 1);
    if !own.is_empty() {
        rules.push(format!("{}{{{}}}", scope, own));
    }
    rules.extend(nested);
    rules
}

fn end_declaration(own: &mut String, current: &mut Writer) {
    let declaration = std::mem::take(current).out;
    if !declaration.is_empty() {
        own.push_str(&declaration);
        own.push(';');
    }
}

fn next_token<'i>(input: &mut Parser<'i, '_>) -> Option<Token<'i>> {
    input.next_including_whitespace_and_comments().ok().cloned()
}

/// Closing character for tokens that open a block.
fn closer(token: &Token<'_>) -> Option<char> {
    match token {
        Token::Function(_) | Token::ParenthesisBlock => Some(')'),
        Token::SquareBracketBlock => Some(']'),
        Token::CurlyBracketBlock => Some('}'),
        _ => None,
    }
}

/// Serializes tokens back into compact style text.
#[derive(Debug, Default)]
struct Writer {
    out: String,
    space: bool,
}

impl Writer {
    fn write<'i>(&mut self, input: &mut Parser<'i, '_>, token: &Token<'i>) {
        match token {
            Token::WhiteSpace(_) | Token::Comment(_) => self.space = true,
            _ => {
                self.push(token);
                if let Some(close) = closer(token) {
                    self.block(input, close);
                }
            }
        }
    }

    fn push(&mut self, token: &Token<'_>) {
        if self.space && self.needs_space(token) {
            self.out.push(' ');
        }
        self.space = false;
        self.out.push_str(&token.to_css_string());
    }

    fn needs_space(&self, next: &Token<'_>) -> bool {
        let after_open = matches!(
            self.out.chars().last(),
            None | Some('{' | '}' | ';' | ',' | ':' | '(' | '[')
        );
        let before_close = matches!(
            next,
            Token::Semicolon | Token::Comma | Token::CurlyBracketBlock | Token::Delim('!')
        );
        !after_open && !before_close
    }

    /// Writes the contents of the block just opened, then its closer.
    fn block<'i>(&mut self, input: &mut Parser<'i, '_>, close: char) {
        let _ = input.parse_nested_block(|nested| {
            while let Some(token) = next_token(nested) {
                self.write(nested, &token);
            }
            Ok::<(), ParseError<'i, ()>>(())
        });
        if close == '}' && !matches!(self.out.chars().last(), Some(';' | '{' | '}')) {
            self.out.push(';');
        }
        self.space = false;
        self.out.push(close);
    }
}
