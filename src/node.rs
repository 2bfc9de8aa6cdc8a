use crate::error::Error;

/// Tag used for image leaves, which carry their content in attributes.
pub const IMAGE_TAG: &str = "img";

/// Ordered attribute list, rendered in insertion order.
pub type Attributes = Vec<(String, String)>;

/// A markup element or a run of literal text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        tag: Option<String>,
        value: String,
        attributes: Attributes,
    },
    Parent {
        tag: Option<String>,
        children: Vec<Node>,
        attributes: Attributes,
    },
}

impl Node {
    /// Untagged leaf, rendered as its value.
    pub fn raw(value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: None,
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn parent(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Parent {
            tag: Some(tag.into()),
            children,
            attributes: Attributes::new(),
        }
    }

    /// Replace the attributes of a freshly built node.
    pub fn with_attributes<K, V>(mut self, attrs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let new: Attributes = attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        match &mut self {
            Node::Leaf { attributes, .. } | Node::Parent { attributes, .. } => *attributes = new,
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Leaf { tag, .. } | Node::Parent { tag, .. } => tag.as_deref(),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        match self {
            Node::Leaf { attributes, .. } | Node::Parent { attributes, .. } => attributes,
        }
    }

    /// Children of a parent node; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Leaf { .. } => &[],
            Node::Parent { children, .. } => children,
        }
    }

    /// Serialize this node and everything below it to HTML.
    pub fn render(&self) -> Result<String, Error> {
        let mut out = String::new();
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<(), Error> {
        match self {
            Node::Leaf {
                tag,
                value,
                attributes,
            } => {
                if value.is_empty() && tag.as_deref() != Some(IMAGE_TAG) {
                    return Err(Error::MissingValue);
                }
                match tag {
                    None => out.push_str(value),
                    Some(tag) => {
                        open_tag(tag, attributes, out);
                        out.push_str(value);
                        close_tag(tag, out);
                    }
                }
            }
            Node::Parent {
                tag,
                children,
                attributes,
            } => {
                let tag = tag.as_deref().ok_or(Error::MissingTag)?;
                if children.is_empty() {
                    return Err(Error::MissingChildren);
                }
                open_tag(tag, attributes, out);
                for child in children {
                    child.render_into(out)?;
                }
                close_tag(tag, out);
            }
        }
        Ok(())
    }
}

fn open_tag(tag: &str, attributes: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (key, value) in attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
