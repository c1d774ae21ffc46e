//! Java method extraction using tree-sitter
//!
//! Finds methods and constructors with their line ranges, then decides which
//! of them a diff touched.

use anyhow::{Context, Result};
use rustc_hash::FxHashSet;
use tree_sitter::{Node, Parser};

use crate::model::ChangedMethod;

/// A method declaration and the lines it spans (1-based, inclusive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpan {
    pub long_name: String,
    pub line_start: usize,
    pub line_end: usize,
}

impl MethodSpan {
    pub fn contains(&self, line: usize) -> bool {
        self.line_start <= line && line <= self.line_end
    }
}

/// Extract every method and constructor declared in a compilation unit.
///
/// Long names are `package.Outer.Inner::name(ParamType, ...)`.
pub fn extract_methods(source: &str) -> Result<Vec<MethodSpan>> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .context("Failed to set Java language")?;

    let tree = parser
        .parse(source, None)
        .context("Failed to parse Java source")?;

    let root = tree.root_node();
    let bytes = source.as_bytes();
    let package = package_name(&root, bytes);

    let mut methods = Vec::new();
    collect_types(&root, bytes, package.as_deref(), &mut methods);
    Ok(methods)
}

/// Methods touched by a diff.
///
/// A post-image method is changed if it contains an added line; a pre-image
/// method is changed if it contains a deleted line. Results are unique by
/// long name, post-image matches first.
pub fn changed_methods(
    before: Option<&str>,
    after: Option<&str>,
    added_lines: &[usize],
    deleted_lines: &[usize],
) -> Result<Vec<ChangedMethod>> {
    let mut seen = FxHashSet::default();
    let mut changed = Vec::new();

    let sides = [(after, added_lines), (before, deleted_lines)];
    for (source, lines) in sides {
        let Some(source) = source else { continue };
        if lines.is_empty() {
            continue;
        }
        for span in extract_methods(source)? {
            if lines.iter().any(|&l| span.contains(l)) && seen.insert(span.long_name.clone()) {
                changed.push(ChangedMethod::new(span.long_name));
            }
        }
    }

    Ok(changed)
}

fn package_name(root: &Node, source: &[u8]) -> Option<String> {
    let decl = root
        .children(&mut root.walk())
        .find(|c| c.kind() == "package_declaration")?;
    let name = decl
        .children(&mut decl.walk())
        .find(|c| c.kind() == "scoped_identifier" || c.kind() == "identifier")?;
    name.utf8_text(source).ok().map(collapse_whitespace)
}

fn is_type_declaration(kind: &str) -> bool {
    matches!(
        kind,
        "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration"
            | "annotation_type_declaration"
    )
}

/// Walk type declarations below `node`, qualifying names with `prefix`
fn collect_types(node: &Node, source: &[u8], prefix: Option<&str>, out: &mut Vec<MethodSpan>) {
    for child in node.children(&mut node.walk()) {
        if !is_type_declaration(child.kind()) {
            continue;
        }
        let Some(name) = child
            .child_by_field_name("name")
            .and_then(|n| n.utf8_text(source).ok())
        else {
            continue;
        };

        let qualified = match prefix {
            Some(p) => format!("{}.{}", p, name),
            None => name.to_string(),
        };

        // Compact constructors take the record header's components
        let components = match child.kind() {
            "record_declaration" => child.child_by_field_name("parameters"),
            _ => None,
        };

        if let Some(body) = child.child_by_field_name("body") {
            let owner = Owner {
                qualified: &qualified,
                simple_name: name,
                components,
            };
            collect_members(&body, source, &owner, out);
        }
    }
}

/// The type whose body is being walked
struct Owner<'a, 't> {
    qualified: &'a str,
    simple_name: &'a str,
    components: Option<Node<'t>>,
}

fn collect_members(body: &Node, source: &[u8], owner: &Owner, out: &mut Vec<MethodSpan>) {
    for member in body.children(&mut body.walk()) {
        match member.kind() {
            "method_declaration" => {
                let name = member
                    .child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok());
                if let Some(name) = name {
                    let params = member.child_by_field_name("parameters");
                    out.push(span(&member, source, owner.qualified, name, params));
                }
            }
            "constructor_declaration" => {
                let params = member.child_by_field_name("parameters");
                out.push(span(&member, source, owner.qualified, owner.simple_name, params));
            }
            "compact_constructor_declaration" => {
                out.push(span(
                    &member,
                    source,
                    owner.qualified,
                    owner.simple_name,
                    owner.components,
                ));
            }
            // Constant bodies are anonymous subclasses, named `Enum.CONSTANT`
            "enum_constant" => {
                let name = member
                    .child_by_field_name("name")
                    .and_then(|n| n.utf8_text(source).ok());
                if let (Some(name), Some(class_body)) = (name, member.child_by_field_name("body")) {
                    let qualified = format!("{}.{}", owner.qualified, name);
                    let constant = Owner {
                        qualified: &qualified,
                        simple_name: name,
                        components: None,
                    };
                    collect_members(&class_body, source, &constant, out);
                }
            }
            // Enum constants come first, members live in this wrapper
            "enum_body_declarations" => {
                collect_members(&member, source, owner, out);
            }
            _ => {}
        }
    }
    collect_types(body, source, Some(owner.qualified), out);
}

fn span(
    node: &Node,
    source: &[u8],
    qualified: &str,
    name: &str,
    params: Option<Node>,
) -> MethodSpan {
    let params = parameter_types(params, source);
    MethodSpan {
        long_name: format!("{}::{}({})", qualified, name, params.join(", ")),
        line_start: node.start_position().row + 1,
        line_end: node.end_position().row + 1,
    }
}

fn parameter_types(params_node: Option<Node>, source: &[u8]) -> Vec<String> {
    let Some(node) = params_node else {
        return vec![];
    };

    let mut types = Vec::new();
    for child in node.children(&mut node.walk()) {
        match child.kind() {
            "formal_parameter" => {
                if let Some(text) = child
                    .child_by_field_name("type")
                    .and_then(|t| t.utf8_text(source).ok())
                {
                    // C-style `String args[]` keeps its brackets on the name
                    let dims = child
                        .child_by_field_name("dimensions")
                        .and_then(|d| d.utf8_text(source).ok())
                        .map(|d| d.split_whitespace().collect::<String>())
                        .unwrap_or_default();
                    types.push(format!("{}{}", collapse_whitespace(text), dims));
                }
            }
            "spread_parameter" => {
                let ty = child
                    .named_children(&mut child.walk())
                    .find(|c| c.kind() != "modifiers" && c.kind() != "variable_declarator")
                    .and_then(|t| t.utf8_text(source).ok());
                if let Some(text) = ty {
                    types.push(format!("{}...", collapse_whitespace(text)));
                }
            }
            _ => {}
        }
    }
    types
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
