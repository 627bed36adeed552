// src/frontend/normalize.rs
//! Identifier normalization for rename-resilient comparison.
//!
//! Builds both renderings of a unit in one pass over its syntax subtree. The
//! normalized form replaces every identifier declared inside the unit with a
//! per-category positional placeholder (`__t0__` for types, `__f0__` fields,
//! `__m0__` methods, `__p0__` parameters, `__v0__` locals), numbered in
//! declaration order. Identifiers the unit does not declare (library calls,
//! external types) keep their text, so two submissions differing only in
//! their own naming normalize to identical renderings.

use std::collections::HashMap;

use tree_sitter::Node;

use crate::lang::Lang;

use super::unit::UnitForm;

/// Leaf node kinds that carry user-chosen identifier text.
const IDENTIFIER_KINDS: &[&str] = &["identifier", "type_identifier"];

pub(crate) struct BuiltForms {
    pub original: UnitForm,
    pub normalized: UnitForm,
    pub element_count: usize,
}

/// Builds the original and normalized forms of the unit rooted at `node`.
pub(crate) fn build_forms(lang: Lang, node: Node, source: &str) -> BuiltForms {
    let renames = declared_identifiers(lang, node, source);

    let mut walk = WalkState::default();
    visit(node, source, &renames, &mut walk);

    let base = node.start_byte();
    let end = node.end_byte();
    let original_text = source[base..end].to_string();
    let normalized_text = splice(source, base, end, &walk.replacements);

    BuiltForms {
        original: UnitForm {
            text: original_text,
            outline: walk.original_outline,
        },
        normalized: UnitForm {
            text: normalized_text,
            outline: walk.normalized_outline,
        },
        element_count: walk.element_count,
    }
}

#[derive(Default)]
struct WalkState {
    element_count: usize,
    original_outline: Vec<String>,
    normalized_outline: Vec<String>,
    // (start_byte, end_byte, placeholder) in ascending byte order.
    replacements: Vec<(usize, usize, String)>,
}

fn visit(node: Node, source: &str, renames: &HashMap<String, String>, out: &mut WalkState) {
    let kind = node.kind();

    // Comments are not structure: they never enter the outlines or the
    // element count, and the normalized rendering drops them, so commentary
    // edits cannot mask or fake similarity.
    if matches!(kind, "line_comment" | "block_comment" | "comment") {
        out.replacements
            .push((node.start_byte(), node.end_byte(), String::new()));
        return;
    }

    out.element_count += 1;

    if node.child_count() == 0 {
        let text = node.utf8_text(source.as_bytes()).unwrap_or_default();
        out.original_outline.push(format!("{kind}:{text}"));

        let mapped = IDENTIFIER_KINDS
            .contains(&kind)
            .then(|| renames.get(text))
            .flatten();
        if let Some(placeholder) = mapped {
            out.normalized_outline.push(format!("{kind}:{placeholder}"));
            out.replacements
                .push((node.start_byte(), node.end_byte(), placeholder.clone()));
        } else {
            out.normalized_outline.push(format!("{kind}:{text}"));
        }
        return;
    }

    out.original_outline.push(kind.to_string());
    out.normalized_outline.push(kind.to_string());
    for child in node.children(&mut node.walk()) {
        visit(child, source, renames, out);
    }
}

/// Rebuilds the unit text with the collected identifier replacements applied.
fn splice(source: &str, base: usize, end: usize, replacements: &[(usize, usize, String)]) -> String {
    let mut out = String::with_capacity(end - base);
    let mut cursor = base;
    for (start, stop, placeholder) in replacements {
        out.push_str(&source[cursor..*start]);
        out.push_str(placeholder);
        cursor = *stop;
    }
    out.push_str(&source[cursor..end]);
    out
}

#[derive(Debug, Clone, Copy)]
enum Category {
    Type,
    Field,
    Method,
    Parameter,
    Variable,
}

impl Category {
    fn prefix(self) -> &'static str {
        match self {
            Self::Type => "t",
            Self::Field => "f",
            Self::Method => "m",
            Self::Parameter => "p",
            Self::Variable => "v",
        }
    }
}

#[derive(Default)]
struct Counters {
    types: usize,
    fields: usize,
    methods: usize,
    parameters: usize,
    variables: usize,
}

impl Counters {
    fn next(&mut self, category: Category) -> usize {
        let counter = match category {
            Category::Type => &mut self.types,
            Category::Field => &mut self.fields,
            Category::Method => &mut self.methods,
            Category::Parameter => &mut self.parameters,
            Category::Variable => &mut self.variables,
        };
        let value = *counter;
        *counter += 1;
        value
    }
}

/// Pre-pass: every identifier the unit declares, mapped to its placeholder.
///
/// Keyed by text, first declaration wins, so later references resolve to the
/// same placeholder regardless of where in the unit they occur.
fn declared_identifiers(lang: Lang, root: Node, source: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    let mut counters = Counters::default();
    collect(lang, root, source, &mut map, &mut counters);
    map
}

fn collect(
    lang: Lang,
    node: Node,
    source: &str,
    map: &mut HashMap<String, String>,
    counters: &mut Counters,
) {
    match lang {
        Lang::Java => collect_java(node, source, map, counters),
        Lang::Python => collect_python(node, source, map, counters),
    }

    for child in node.children(&mut node.walk()) {
        collect(lang, child, source, map, counters);
    }
}

fn collect_java(
    node: Node,
    source: &str,
    map: &mut HashMap<String, String>,
    counters: &mut Counters,
) {
    match node.kind() {
        "class_declaration"
        | "interface_declaration"
        | "enum_declaration"
        | "record_declaration"
        | "annotation_type_declaration" => {
            record(map, counters, Category::Type, field_text(node, "name", source));
        }
        "method_declaration" | "constructor_declaration" => {
            record(map, counters, Category::Method, field_text(node, "name", source));
        }
        "formal_parameter" | "spread_parameter" | "catch_formal_parameter" => {
            record(
                map,
                counters,
                Category::Parameter,
                field_text(node, "name", source),
            );
        }
        "inferred_parameters" => {
            // Lambda parameter lists without types: (a, b) -> ...
            for child in node.children(&mut node.walk()) {
                if child.kind() == "identifier" {
                    record(map, counters, Category::Parameter, leaf_text(child, source));
                }
            }
        }
        "field_declaration" => {
            record_declarators(node, source, map, counters, Category::Field);
        }
        "local_variable_declaration" => {
            record_declarators(node, source, map, counters, Category::Variable);
        }
        "enhanced_for_statement" => {
            record(
                map,
                counters,
                Category::Variable,
                field_text(node, "name", source),
            );
        }
        "enum_constant" => {
            record(map, counters, Category::Field, field_text(node, "name", source));
        }
        _ => {}
    }
}

fn record_declarators(
    node: Node,
    source: &str,
    map: &mut HashMap<String, String>,
    counters: &mut Counters,
    category: Category,
) {
    for child in node.children(&mut node.walk()) {
        if child.kind() == "variable_declarator" {
            record(map, counters, category, field_text(child, "name", source));
        }
    }
}

fn collect_python(
    node: Node,
    source: &str,
    map: &mut HashMap<String, String>,
    counters: &mut Counters,
) {
    match node.kind() {
        "class_definition" => {
            record(map, counters, Category::Type, field_text(node, "name", source));
        }
        "function_definition" => {
            record(map, counters, Category::Method, field_text(node, "name", source));
        }
        "parameters" => {
            for child in node.children(&mut node.walk()) {
                match child.kind() {
                    "identifier" => {
                        record(map, counters, Category::Parameter, leaf_text(child, source));
                    }
                    "default_parameter" | "typed_default_parameter" => {
                        record(
                            map,
                            counters,
                            Category::Parameter,
                            field_text(child, "name", source),
                        );
                    }
                    "typed_parameter" => {
                        // First child is the parameter name, the rest its annotation.
                        let name = child
                            .children(&mut child.walk())
                            .find(|c| c.kind() == "identifier")
                            .and_then(|c| leaf_text(c, source));
                        record(map, counters, Category::Parameter, name);
                    }
                    _ => {}
                }
            }
        }
        "assignment" | "for_statement" => {
            let left = node.child_by_field_name("left");
            if let Some(left) = left {
                if left.kind() == "identifier" {
                    record(map, counters, Category::Variable, leaf_text(left, source));
                }
            }
        }
        _ => {}
    }
}

fn record(
    map: &mut HashMap<String, String>,
    counters: &mut Counters,
    category: Category,
    name: Option<&str>,
) {
    let Some(name) = name else {
        return;
    };
    if name.is_empty() || map.contains_key(name) {
        return;
    }
    let index = counters.next(category);
    map.insert(
        name.to_string(),
        format!("__{}{}__", category.prefix(), index),
    );
}

fn field_text<'a>(node: Node, field: &str, source: &'a str) -> Option<&'a str> {
    node.child_by_field_name(field)?
        .utf8_text(source.as_bytes())
        .ok()
}

fn leaf_text<'a>(node: Node, source: &'a str) -> Option<&'a str> {
    node.utf8_text(source.as_bytes()).ok()
}
