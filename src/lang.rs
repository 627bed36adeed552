// src/lang.rs
use tree_sitter::Language;

/// Source languages a submission folder may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Java,
    Python,
}

impl Lang {
    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext {
            "java" => Some(Self::Java),
            "py" => Some(Self::Python),
            _ => None,
        }
    }

    #[must_use]
    pub fn grammar(self) -> Language {
        match self {
            Self::Java => tree_sitter_java::language(),
            Self::Python => tree_sitter_python::language(),
        }
    }

    /// Node kinds that declare a program unit ("type") in this language.
    #[must_use]
    pub fn type_declaration_kinds(self) -> &'static [&'static str] {
        match self {
            Self::Java => &[
                "class_declaration",
                "interface_declaration",
                "enum_declaration",
                "record_declaration",
                "annotation_type_declaration",
            ],
            Self::Python => &["class_definition"],
        }
    }
}
