//! Declarative HTML rewriting of upstream pages.
//!
//! # Responsibilities
//! - Hold the ordered list of selector rules applied to every page
//! - Apply them to the parsed document, one rule after another
//!
//! # Design Decisions
//! - Selectors are validated when the rewriter is built, never per request
//! - Pages go through an HTML5 tree builder, so implied end tags are honored
//! - Text replacement is escaped as text, never parsed as markup

use dom_query::{Document, Matcher, Selection};

use crate::upstream::error::{UpstreamError, UpstreamResult};

/// What a rule does to each element its selector matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleAction {
    /// Replace all children with a single text node.
    SetText(String),
    /// Drop the element and everything inside it.
    Remove,
    /// Prefix the attribute with `origin` unless it already starts with `http`.
    PrefixRelative { attribute: String, origin: String },
}

impl RuleAction {
    fn apply(&self, matches: &Selection<'_>) {
        match self {
            RuleAction::SetText(text) => matches.set_text(text),
            RuleAction::Remove => matches.remove(),
            RuleAction::PrefixRelative { attribute, origin } => {
                for node in matches.nodes() {
                    if let Some(value) = node.attr(attribute) {
                        if !value.starts_with("http") {
                            node.set_attr(attribute, &format!("{origin}{value}"));
                        }
                    }
                }
            }
        }
    }
}

/// A CSS selector paired with the action applied to its matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub selector: String,
    pub action: RuleAction,
}

impl RewriteRule {
    pub fn set_text(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            action: RuleAction::SetText(text.into()),
        }
    }

    pub fn remove(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            action: RuleAction::Remove,
        }
    }

    pub fn prefix_relative(
        selector: impl Into<String>,
        attribute: impl Into<String>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            selector: selector.into(),
            action: RuleAction::PrefixRelative {
                attribute: attribute.into(),
                origin: origin.into(),
            },
        }
    }

    fn matcher(&self) -> UpstreamResult<Matcher> {
        Matcher::new(&self.selector).map_err(|e| {
            UpstreamError::Rewrite(format!("invalid selector '{}': {:?}", self.selector, e))
        })
    }
}

/// Applies an ordered rule list to HTML documents.
#[derive(Debug, Clone)]
pub struct PageRewriter {
    rules: Vec<RewriteRule>,
}

impl PageRewriter {
    /// Build a rewriter, rejecting any selector that does not parse.
    pub fn new(rules: Vec<RewriteRule>) -> UpstreamResult<Self> {
        for rule in &rules {
            rule.matcher()?;
        }
        Ok(Self { rules })
    }

    /// The rule set for bimmercode.app catalog pages.
    ///
    /// Root-relative stylesheet links are pointed back at `origin` so the
    /// page keeps its styling when served from this host.
    pub fn catalog_pages(origin: &str) -> UpstreamResult<Self> {
        Self::new(vec![
            RewriteRule::set_text(".result-title.positive", "O seu carro é suportado!"),
            RewriteRule::set_text("a.btn.btn-outline-primary.btn-lg.btn-cars", "Opções disponíveis"),
            RewriteRule::remove(".print.d-print-none.align-self-center"),
            RewriteRule::remove(r#"a[href^="/adapters/"]"#),
            RewriteRule::set_text("h1.display-4", "BIMMER SERVICES"),
            RewriteRule::set_text(
                "p.lead",
                "Bem-Vindo, veja na lista abaixo se o seu carro é suportado!",
            ),
            RewriteRule::remove(".footer.fixed-bottom"),
            RewriteRule::remove(".row.justify-content-center.no-margin.no-padding"),
            RewriteRule::remove("#cookies-note"),
            RewriteRule::prefix_relative(r#"link[rel="stylesheet"]"#, "href", origin),
        ])
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    /// Rewrite a complete HTML document and serialize it back.
    pub fn rewrite(&self, html: &str) -> UpstreamResult<String> {
        let document = Document::from(html);

        for rule in &self.rules {
            let matcher = rule.matcher()?;
            let matches = document.select_matcher(&matcher);
            if matches.exists() {
                rule.action.apply(&matches);
            }
        }

        Ok(document.html().to_string())
    }
}
