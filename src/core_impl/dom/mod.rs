use super::*;

mod attrs_class_style;
mod core_nodes_identity;
mod dump;
mod selector_matching;
mod text_html_content;
mod tree_mutation;
mod tree_traversal;
