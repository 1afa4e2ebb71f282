/*!
 * Markup-safe segmentation.
 *
 * Extracts the human-readable text spans out of a markup-bearing string and
 * replaces each with a unique `{{TEXT_<n>}}` token, producing the tokenized
 * markup plus the ordered token -> original-text mapping. Tags and
 * attributes are left structurally intact, so the tokenized string can be
 * sent through translation and reassembled without touching the markup.
 *
 * Parsing and serialization are hidden behind the `MarkupTree` trait so the
 * segmenter itself is not coupled to one markup engine.
 */

use html5ever::parse_fragment;
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{namespace_url, ns, LocalName, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

use crate::errors::TranslationError;

/// Ordered mapping from placeholder token to text fragment.
///
/// Iteration order is insertion order; the numbered-list protocol relies on
/// it to map response ordinals back to tokens positionally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceholderMap {
    entries: Vec<(String, String)>,
}

impl PlaceholderMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a token's text
    pub fn insert(&mut self, token: impl Into<String>, text: impl Into<String>) {
        let token = token.into();
        let text = text.into();
        if let Some(entry) = self.entries.iter_mut().find(|(t, _)| *t == token) {
            entry.1 = text;
        } else {
            self.entries.push((token, text));
        }
    }

    /// Look up the text for a token
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, text)| text.as_str())
    }

    /// Number of tokens in the map
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no tokens
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tokens in insertion order
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(token, _)| token.as_str())
    }

    /// (token, text) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(token, text)| (token.as_str(), text.as_str()))
    }
}

/// Capability abstraction over a parsed markup tree: visit text leaves in
/// document order, optionally replacing their content, then serialize.
pub trait MarkupTree {
    /// Visit every text leaf in document order; a returned `Some(new)`
    /// replaces the leaf's content
    fn replace_text_leaves(&mut self, replace: &mut dyn FnMut(&str) -> Option<String>);

    /// Serialize the tree back to markup
    fn to_markup(&self) -> Result<String, TranslationError>;
}

/// HTML implementation of `MarkupTree` backed by html5ever's rcdom
pub struct HtmlTree {
    /// Element wrapping the parsed fragment nodes
    fragment_root: Handle,
    // The dom owns nothing beyond the shared handles; kept so errors carry context
    _dom: RcDom,
}

impl HtmlTree {
    /// Parse a markup fragment.
    ///
    /// Catalog strings are fragments, not documents; fragment parsing avoids
    /// the implicit `<html><head><body>` scaffolding that document parsing
    /// would wrap them in, so serialization round-trips the input shape.
    pub fn parse(markup: &str) -> Self {
        let dom = parse_fragment(
            RcDom::default(),
            Default::default(),
            QualName::new(None, ns!(html), LocalName::from("div")),
            Vec::new(),
        )
        .one(markup);

        // The fragment's nodes hang off a synthetic <html> element
        let fragment_root = dom.document.children.borrow()[0].clone();

        Self {
            fragment_root,
            _dom: dom,
        }
    }

    fn walk(node: &Handle, replace: &mut dyn FnMut(&str) -> Option<String>) {
        if let NodeData::Text { ref contents } = node.data {
            let current = contents.borrow().to_string();
            if let Some(replacement) = replace(&current) {
                let mut contents = contents.borrow_mut();
                contents.clear();
                contents.push_slice(&replacement);
            }
            return;
        }

        for child in node.children.borrow().iter() {
            Self::walk(child, replace);
        }
    }
}

impl MarkupTree for HtmlTree {
    fn replace_text_leaves(&mut self, replace: &mut dyn FnMut(&str) -> Option<String>) {
        Self::walk(&self.fragment_root, replace);
    }

    fn to_markup(&self) -> Result<String, TranslationError> {
        let mut buf: Vec<u8> = Vec::new();
        let serializable: SerializableHandle = self.fragment_root.clone().into();
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..Default::default()
        };

        serialize(&mut buf, &serializable, opts)
            .map_err(|e| TranslationError::Markup(format!("Failed to serialize markup: {}", e)))?;

        String::from_utf8(buf)
            .map_err(|e| TranslationError::Markup(format!("Serialized markup is not UTF-8: {}", e)))
    }
}

/// Build the n-th placeholder token (`{{TEXT_<n>}}`, 1-based)
pub fn placeholder_token(n: usize) -> String {
    format!("{{{{TEXT_{}}}}}", n)
}

/// Whether a text carries markup worth segmenting
pub fn has_markup(text: &str) -> bool {
    text.contains('<') && text.contains('>')
}

/// Segment a markup string, tokenizing every text leaf with non-blank content.
///
/// Returns the serialized markup with tokens in place of prose plus the
/// ordered token -> original-text map. Whitespace-only leaves are left
/// untouched; an input with no text leaves yields an empty map and the
/// caller treats the string as already translated.
pub fn segment(markup: &str) -> Result<(String, PlaceholderMap), TranslationError> {
    let mut tree = HtmlTree::parse(markup);
    segment_tree(&mut tree)
}

/// Segment any `MarkupTree` implementation
pub fn segment_tree(
    tree: &mut dyn MarkupTree,
) -> Result<(String, PlaceholderMap), TranslationError> {
    let mut map = PlaceholderMap::new();
    let mut counter = 0usize;

    tree.replace_text_leaves(&mut |text| {
        if text.trim().is_empty() {
            return None;
        }
        counter += 1;
        let token = placeholder_token(counter);
        map.insert(token.clone(), text);
        Some(token)
    });

    Ok((tree.to_markup()?, map))
}
