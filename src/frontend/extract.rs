// src/frontend/extract.rs
//! Type-declaration extraction from a parsed source file.

use std::path::Path;

use tree_sitter::{Node, Tree};

use crate::lang::Lang;

use super::normalize;
use super::unit::ProgramUnit;

/// Extracts every declared type (top-level and nested) from a parsed file.
///
/// Nested declarations produce their own units with `Outer.Inner` qualified
/// names, in source order.
pub(crate) fn extract_units(
    lang: Lang,
    file: &Path,
    source: &str,
    tree: &Tree,
) -> Vec<ProgramUnit> {
    let mut units = Vec::new();
    let mut scope = Vec::new();
    walk(lang, tree.root_node(), source, file, &mut scope, &mut units);
    units
}

fn walk(
    lang: Lang,
    node: Node,
    source: &str,
    file: &Path,
    scope: &mut Vec<String>,
    units: &mut Vec<ProgramUnit>,
) {
    let mut entered = false;

    if lang.type_declaration_kinds().contains(&node.kind()) {
        if let Some(name) = declared_name(node, source) {
            let qualified = if scope.is_empty() {
                name.to_string()
            } else {
                format!("{}.{name}", scope.join("."))
            };

            let forms = normalize::build_forms(lang, node, source);
            units.push(ProgramUnit::new(
                qualified,
                file,
                forms.element_count,
                forms.original,
                forms.normalized,
            ));

            scope.push(name.to_string());
            entered = true;
        }
    }

    for child in node.children(&mut node.walk()) {
        walk(lang, child, source, file, scope, units);
    }

    if entered {
        scope.pop();
    }
}

fn declared_name<'a>(node: Node, source: &'a str) -> Option<&'a str> {
    node.child_by_field_name("name")?
        .utf8_text(source.as_bytes())
        .ok()
}
