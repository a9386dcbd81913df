use crate::listing::Property;

pub const PROPERTY_CLASS: &str = "property";
pub const PRICE_CLASS: &str = "price";
pub const ADDRESS_CLASS: &str = "address";
pub const BED_COUNT_CLASS: &str = "bed-count";
pub const BATH_COUNT_CLASS: &str = "bath-count";
pub const SIZE_VALUE_CLASS: &str = "size-value";

const FALLBACK_KIND: &str = "home";

/// Structured marker content, rendered by the client through DOM node APIs.
/// Text never passes through an HTML parser.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Element(ElementNode),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: &'static str,
    pub classes: Vec<String>,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<ContentNode>,
}

impl ElementNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn child(mut self, node: ElementNode) -> Self {
        self.children.push(ContentNode::Element(node));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(ContentNode::Text(text.into()));
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Number of elements in this subtree (self included) carrying `class`.
    pub fn count_class(&self, class: &str) -> usize {
        let own = usize::from(self.has_class(class));
        own + self
            .children
            .iter()
            .map(|child| match child {
                ContentNode::Element(el) => el.count_class(class),
                ContentNode::Text(_) => 0,
            })
            .sum::<usize>()
    }

    /// First element in document order carrying `class`.
    pub fn find_class(&self, class: &str) -> Option<&ElementNode> {
        if self.has_class(class) {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            ContentNode::Element(el) => el.find_class(class),
            ContentNode::Text(_) => None,
        })
    }

    /// Concatenated text of the subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                ContentNode::Element(el) => el.collect_text(out),
                ContentNode::Text(text) => out.push_str(text),
            }
        }
    }
}

/// Reduce a free-form property type to a CSS class token.
pub fn kind_token(kind: &str) -> String {
    let token: String = kind
        .trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    let token = token.trim_matches('-');
    if token.is_empty() {
        FALLBACK_KIND.to_owned()
    } else {
        token.to_owned()
    }
}

fn feature(
    icon: &str,
    label: &'static str,
    value_class: &str,
    value: Vec<ContentNode>,
) -> ElementNode {
    let mut value_span = ElementNode::new("span").class(value_class);
    value_span.children = value;
    ElementNode::new("div")
        .child(
            ElementNode::new("i")
                .class("fa")
                .class(format!("fa-{icon}"))
                .class("fa-lg")
                .class(icon_class(label))
                .attr("aria-hidden", "true")
                .attr("title", label),
        )
        .child(ElementNode::new("span").class("fa-sr-only").text(label))
        .child(value_span)
}

fn icon_class(label: &str) -> &'static str {
    match label {
        "bedroom" => "bed",
        "bathroom" => "bath",
        _ => "size",
    }
}

/// Build the custom marker content for a property listing.
pub fn build_property_content(property: &Property) -> ElementNode {
    let kind = kind_token(&property.kind);
    let label = if property.kind.trim().is_empty() {
        FALLBACK_KIND.to_owned()
    } else {
        property.kind.trim().to_owned()
    };

    let icon = ElementNode::new("div")
        .class("icon")
        .child(
            ElementNode::new("i")
                .class("fa")
                .class("fa-icon")
                .class(format!("fa-{kind}"))
                .attr("aria-hidden", "true")
                .attr("title", label.clone()),
        )
        .child(ElementNode::new("span").class("fa-sr-only").text(label));

    let bed = feature(
        "bed",
        "bedroom",
        BED_COUNT_CLASS,
        vec![ContentNode::Text(property.bed.to_string())],
    );
    let bath = feature(
        "bath",
        "bathroom",
        BATH_COUNT_CLASS,
        vec![ContentNode::Text(property.bath.to_string())],
    );
    let size = feature(
        "ruler",
        "size",
        SIZE_VALUE_CLASS,
        vec![
            ContentNode::Text(format!("{} ft", property.size)),
            ContentNode::Element(ElementNode::new("sup").text("2")),
        ],
    );

    let details = ElementNode::new("div")
        .class("details")
        .child(
            ElementNode::new("div")
                .class(PRICE_CLASS)
                .text(property.price.to_string()),
        )
        .child(
            ElementNode::new("div")
                .class(ADDRESS_CLASS)
                .text(property.address.clone()),
        )
        .child(
            ElementNode::new("div")
                .class("features")
                .child(bed)
                .child(bath)
                .child(size),
        );

    ElementNode::new("div")
        .class(PROPERTY_CLASS)
        .child(icon)
        .child(details)
}
