//! Minifier adapters for JS and CSS bundles.
//!
//! Uses oxc for JavaScript and lightningcss for CSS. Both are treated as
//! black boxes: text in, minified text out, or an error message on
//! malformed input.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier as OxcMinifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::BundleKind;

/// A text → text minifier for one content kind.
pub trait Minifier: Send + Sync {
    /// Minify `source`, returning a human readable message on failure.
    fn minify(&self, source: &str) -> Result<String, String>;

    /// Whether this minifier leaves a copy of its output in the working
    /// directory, which the pipeline then has to clean up.
    fn writes_to_cwd(&self) -> bool {
        false
    }
}

/// JavaScript minifier backed by oxc.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsMinifier;

impl Minifier for JsMinifier {
    fn minify(&self, source: &str) -> Result<String, String> {
        minify_js(source)
    }
}

/// CSS minifier backed by lightningcss.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssMinifier;

impl Minifier for CssMinifier {
    fn minify(&self, source: &str) -> Result<String, String> {
        minify_css(source)
    }
}

/// Returns its input untouched (`minify = false`).
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl Minifier for Passthrough {
    fn minify(&self, source: &str) -> Result<String, String> {
        Ok(source.to_string())
    }
}

/// The pair of minifiers a pipeline uses.
pub struct Minifiers {
    pub js: Box<dyn Minifier>,
    pub css: Box<dyn Minifier>,
}

impl Minifiers {
    /// oxc + lightningcss.
    pub fn standard() -> Self {
        Self {
            js: Box::new(JsMinifier),
            css: Box::new(CssMinifier),
        }
    }

    /// No minification at all.
    pub fn passthrough() -> Self {
        Self {
            js: Box::new(Passthrough),
            css: Box::new(Passthrough),
        }
    }

    /// Pick standard or passthrough from the `build.minify` flag.
    pub fn from_flag(minify: bool) -> Self {
        if minify {
            Self::standard()
        } else {
            Self::passthrough()
        }
    }

    pub fn for_kind(&self, kind: BundleKind) -> &dyn Minifier {
        match kind {
            BundleKind::Js => self.js.as_ref(),
            BundleKind::Css => self.css.as_ref(),
        }
    }
}

/// Minify JavaScript source code.
pub fn minify_js(source: &str) -> Result<String, String> {
    let allocator = Allocator::default();
    let source_type = SourceType::mjs();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if !ret.errors.is_empty() {
        let messages: Vec<String> = ret.errors.iter().map(ToString::to_string).collect();
        return Err(messages.join("; "));
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = OxcMinifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Result<String, String> {
    let stylesheet =
        StyleSheet::parse(source, ParserOptions::default()).map_err(|e| e.to_string())?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| e.to_string())?;
    Ok(result.code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_js_shrinks() {
        let source = "function greet(name) {\n    // say hi\n    console.log('hi ' + name);\n}\ngreet('x');\n";
        let minified = minify_js(source).unwrap();
        assert!(minified.len() < source.len());
        assert!(!minified.contains("say hi"));
        assert!(minified.contains("console.log"));
    }

    #[test]
    fn test_minify_js_syntax_error() {
        assert!(minify_js("function ( {").is_err());
    }

    #[test]
    fn test_minify_css_shrinks() {
        let source = "body {\n    color: red;\n}\n\n.a  .b {\n    margin: 0px;\n}\n";
        let minified = minify_css(source).unwrap();
        assert!(minified.len() < source.len());
        assert!(minified.contains("body{color:red}"));
    }

    #[test]
    fn test_minify_css_syntax_error() {
        assert!(minify_css("..broken { color: red }").is_err());
    }

    #[test]
    fn test_passthrough() {
        let minifiers = Minifiers::from_flag(false);
        let js = minifiers.for_kind(BundleKind::Js);
        assert_eq!(js.minify("let a = 1;").unwrap(), "let a = 1;");
        assert!(!js.writes_to_cwd());
    }
}
