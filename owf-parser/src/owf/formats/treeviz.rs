//! Treeviz formatter for workout documents
//!
//! Treeviz prints one line per node, so a document can be scanned at a glance. Nesting is
//! drawn with box connectors and each line reads `<connector> <icon> <label>`, with the
//! label truncated to 30 characters.
//!
//!     ⧉ 2 workouts
//!     ├─ ≔ Variables
//!     │ └─ = FTP: 250W
//!     └─ ⊤ Intervals [bike]
//!       ├─ → warmup 10min
//!       ├─ ↻ 5x:
//!       │ ├─ → bike 3min @80% of FTP
//!       │ └─ ‖ rest 1min
//!       └─ ¶ Keep cadence high
//!
//! Icons
//!     Document: ⧉
//!     Variables: ≔    Variable: =
//!     Session: §      Workout: ⊤
//!     Block: ↻
//!     EnduranceStep: →
//!     StrengthStep: ▲
//!     RestStep: ‖
//!     IncludeStep: ⊕
//!     Note: ¶

use super::serializer::leaf_content;
use crate::owf::ast::{AstNode, Container, Document, Step, Workout};
use std::collections::HashMap;

/// A display node, detached from the AST
#[derive(Debug, Clone)]
struct TreeNode {
    node_type: &'static str,
    label: String,
    line: Option<usize>,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn new(node_type: &'static str, label: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            node_type,
            label: label.into(),
            line,
            children: Vec::new(),
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node_type: &str) -> &'static str {
    match node_type {
        "Document" => "⧉",
        "Variables" => "≔",
        "Variable" => "=",
        "Session" => "§",
        "Workout" => "⊤",
        "Block" => "↻",
        "EnduranceStep" => "→",
        "StrengthStep" => "▲",
        "RestStep" => "‖",
        "IncludeStep" => "⊕",
        "Note" => "¶",
        _ => "○",
    }
}

fn notes_nodes(notes: &[String]) -> impl Iterator<Item = TreeNode> + '_ {
    notes.iter().map(|note| TreeNode::new("Note", note.as_str(), None))
}

fn workout_label(workout: &Workout) -> String {
    let mut label = workout.label();
    if let Some(workout_type) = &workout.workout_type {
        if !label.is_empty() {
            label.push(' ');
        }
        label.push_str(&format!("[{}]", workout_type));
    }
    label
}

fn workout_node(workout: &Workout) -> TreeNode {
    let mut node = TreeNode::new(
        workout.node_type(),
        workout_label(workout),
        Some(workout.span().line),
    );
    node.children.extend(workout.children().iter().map(step_node));
    node.children.extend(notes_nodes(workout.notes()));
    node
}

fn step_node(step: &Step) -> TreeNode {
    let line = Some(AstNode::span(step).line);
    match step {
        Step::Workout(workout) => workout_node(workout),
        Step::Block(block) => {
            let mut node = TreeNode::new(step.node_type(), block.label(), line);
            node.children.extend(notes_nodes(block.notes()));
            node.children.extend(block.children().iter().map(step_node));
            node
        }
        Step::Include(include) => {
            let mut node = TreeNode::new(step.node_type(), leaf_content(step), line);
            node.children.extend(notes_nodes(step.notes()));
            if let Some(resolved) = &include.resolved {
                node.children.extend(resolved.steps.iter().map(step_node));
            }
            node
        }
        _ => {
            let mut node = TreeNode::new(step.node_type(), leaf_content(step), line);
            node.children.extend(notes_nodes(step.notes()));
            node
        }
    }
}

fn document_node(doc: &Document) -> TreeNode {
    let count = doc.workouts.len();
    let label = format!("{} workout{}", count, if count == 1 { "" } else { "s" });
    let mut root = TreeNode::new("Document", label, None);

    if !doc.variables.is_empty() {
        let mut variables = TreeNode::new("Variables", "Variables", None);
        variables.children.extend(
            doc.variables
                .iter()
                .map(|(key, value)| TreeNode::new("Variable", format!("{}: {}", key, value), None)),
        );
        root.children.push(variables);
    }
    root.children.extend(doc.workouts.iter().map(workout_node));
    root
}

fn format_node(
    node: &TreeNode,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    show_linum: bool,
) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let linum_prefix = match (show_linum, node.line) {
        (true, Some(line)) => format!("{:02} ", line),
        (true, None) => "   ".to_string(),
        (false, _) => String::new(),
    };

    output.push_str(&format!(
        "{}{}{} {} {}\n",
        linum_prefix,
        prefix,
        connector,
        get_icon(node.node_type),
        truncate(&node.label, 30)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        output.push_str(&format_node(child, &child_prefix, i, child_count, show_linum));
    }

    output
}

pub fn to_treeviz_str(doc: &Document) -> String {
    to_treeviz_str_with_params(doc, &HashMap::new())
}

/// Supported params: `show-linum` prefixes each node with its source line
pub fn to_treeviz_str_with_params(doc: &Document, params: &HashMap<String, String>) -> String {
    let show_linum = params
        .get("show-linum")
        .map(|v| v != "false")
        .unwrap_or(false);

    let root = document_node(doc);
    let mut output = format!("{} {}\n", get_icon(root.node_type), root.label);
    let child_count = root.children.len();
    for (i, child) in root.children.iter().enumerate() {
        output.push_str(&format_node(child, "", i, child_count, show_linum));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owf::parsing::parse_document;

    #[test]
    fn test_treeviz_layout() {
        let doc = parse_document(
            "---\nFTP: 250W\n---\n# Intervals [bike]\n- warmup 10min\n- 5x:\n  - bike 3min @80% of FTP\n  - rest 1min\n\n> Keep cadence high\n> Sit down\n",
        )
        .unwrap();
        insta::assert_snapshot!(to_treeviz_str(&doc).trim_end(), @r"
⧉ 1 workout
├─ ≔ Variables
│ └─ = FTP: 250W
└─ ⊤ Intervals [bike]
  ├─ → warmup 10min
  ├─ ↻ 5x:
  │ ├─ → bike 3min @80% of FTP
  │ └─ ‖ rest 1min
  ├─ ¶ Keep cadence high
  └─ ¶ Sit down
");
    }

    #[test]
    fn sessions_show_nested_workouts() {
        let doc = parse_document("## Brick\n# Ride [bike]\n- bike 1h\n# Run [run]\n- run 5km\n")
            .unwrap();
        let output = to_treeviz_str(&doc);
        assert!(output.contains("└─ § Brick [combination]"));
        assert!(output.contains("  ├─ ⊤ Ride [bike]"));
        assert!(output.contains("  └─ ⊤ Run [run]"));
    }

    #[test]
    fn long_labels_are_truncated() {
        let doc = parse_document("# W\n- a very long exercise name that keeps going 3x8\n").unwrap();
        let output = to_treeviz_str(&doc);
        assert!(output.contains("▲ a very long exercise name that..."));
    }

    #[test]
    fn test_line_numbers() {
        let doc = parse_document("# Run\n- run 5km\n").unwrap();
        let mut params = HashMap::new();
        params.insert("show-linum".to_string(), "true".to_string());
        let output = to_treeviz_str_with_params(&doc, &params);
        assert!(output.contains("01 └─ ⊤ Run"));
        assert!(output.contains("02   └─ → run 5km"));
    }
}
