use crate::error::Error;
use crate::inline::text_to_leaves;
use crate::node::Node;

/// Tag of the container node that holds every block of a document
pub const ROOT_TAG: &str = "div";

const CODE_FENCE: &str = "```";
const MAX_HEADING_LEVEL: usize = 6;

/// Structural kind of a blank-line-separated block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Heading,
    Code,
    Quote,
    UnorderedList,
    OrderedList,
    Paragraph,
}

/// Split markdown into trimmed, non-empty blocks separated by empty lines.
pub fn markdown_to_blocks(markdown: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = None;
    let mut offset = 0;

    for line in markdown.split_inclusive('\n') {
        // Only truly empty lines separate; whitespace-only lines stay inside a block
        if line.trim_end_matches(['\r', '\n']).is_empty() {
            if let Some(s) = start.take() {
                push_block(&mut blocks, &markdown[s..offset]);
            }
        } else if start.is_none() {
            start = Some(offset);
        }
        offset += line.len();
    }
    if let Some(s) = start {
        push_block(&mut blocks, &markdown[s..]);
    }

    blocks
}

fn push_block<'a>(blocks: &mut Vec<&'a str>, block: &'a str) {
    let block = block.trim();
    if !block.is_empty() {
        blocks.push(block);
    }
}

/// Classify a block. The checks run in a fixed order and the first match wins.
pub fn block_to_block_type(block: &str) -> BlockType {
    if heading_level(block).is_some() {
        return BlockType::Heading;
    }

    if block.len() >= 2 * CODE_FENCE.len()
        && block.starts_with(CODE_FENCE)
        && block.ends_with(CODE_FENCE)
    {
        return BlockType::Code;
    }

    let lines: Vec<&str> = block.split('\n').collect();

    if lines.iter().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }

    if lines
        .iter()
        .all(|line| line.starts_with("* ") || line.starts_with("- "))
    {
        return BlockType::UnorderedList;
    }

    if lines
        .iter()
        .enumerate()
        .all(|(i, line)| line.starts_with(&ordered_marker(i)))
    {
        return BlockType::OrderedList;
    }

    BlockType::Paragraph
}

/// Parse a whole document into a node tree rooted at a `div`.
pub fn markdown_to_tree(markdown: &str) -> Result<Node, Error> {
    let children = markdown_to_blocks(markdown)
        .into_iter()
        .map(|block| block_to_node(block, block_to_block_type(block)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Node::parent(ROOT_TAG, children))
}

fn block_to_node(block: &str, block_type: BlockType) -> Result<Node, Error> {
    match block_type {
        BlockType::Heading => heading_to_node(block),
        BlockType::Code => code_to_node(block),
        BlockType::Quote => quote_to_node(block),
        BlockType::UnorderedList => list_to_node(block, "ul", |_, line| &line[2..]),
        BlockType::OrderedList => list_to_node(block, "ol", |i, line| {
            line.strip_prefix(&ordered_marker(i)).unwrap_or(line)
        }),
        BlockType::Paragraph => Ok(Node::parent("p", text_to_leaves(block)?)),
    }
}

/// Number of leading `#` when followed by a space, if within heading range.
fn heading_level(block: &str) -> Option<usize> {
    let level = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=MAX_HEADING_LEVEL).contains(&level) && block[level..].starts_with(' ') {
        Some(level)
    } else {
        None
    }
}

fn ordered_marker(index: usize) -> String {
    format!("{}. ", index + 1)
}

fn heading_to_node(block: &str) -> Result<Node, Error> {
    let level = heading_level(block).unwrap_or(1);
    let text = &block[level + 1..];
    Ok(Node::parent(format!("h{level}"), text_to_leaves(text)?))
}

fn code_to_node(block: &str) -> Result<Node, Error> {
    let inner = &block[CODE_FENCE.len()..block.len() - CODE_FENCE.len()];
    let code = Node::parent("code", text_to_leaves(inner)?);
    Ok(Node::parent("pre", vec![code]))
}

fn quote_to_node(block: &str) -> Result<Node, Error> {
    let text = block
        .split('\n')
        .map(|line| {
            let line = line.strip_prefix('>').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Node::parent("blockquote", text_to_leaves(&text)?))
}

fn list_to_node<'a>(
    block: &'a str,
    tag: &str,
    item_text: impl Fn(usize, &'a str) -> &'a str,
) -> Result<Node, Error> {
    let items = block
        .split('\n')
        .enumerate()
        .map(|(i, line)| -> Result<Node, Error> {
            Ok(Node::parent("li", text_to_leaves(item_text(i, line))?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Node::parent(tag, items))
}
