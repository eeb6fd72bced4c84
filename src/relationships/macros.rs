//! Typed finder wrappers
//!
//! `relationship_finders!` generates named methods for relationships an
//! entity type declares, on any type that is `AsRef<SemanticNode>` (and
//! `AsMut<SemanticNode>` when mutators are requested). Every generated
//! method delegates to the generic `SemanticNode` operations.
//!
//! ```rust,ignore
//! relationship_finders!(Book {
//!     "parts" => { find: parts, ids: parts_ids, query: parts_query, from_solr: parts_from_solr },
//!     "collections" => {
//!         find: collections, ids: collections_ids, query: collections_query,
//!         from_solr: collections_from_solr,
//!         append: collections_append, remove: collections_remove
//!     },
//! });
//! ```

/// Generate named relationship finders for an entity type
#[macro_export]
macro_rules! relationship_finders {
    ($ty:ty {
        $(
            $rel:literal => {
                find: $find:ident,
                ids: $ids:ident,
                query: $query:ident,
                from_solr: $from_solr:ident
                $(, append: $append:ident, remove: $remove:ident)?
                $(,)?
            }
        ),* $(,)?
    }) => {
        impl $ty {
            $(
                pub fn $find(
                    &self,
                    options: $crate::relationships::FinderOptions,
                ) -> $crate::ModelResult<$crate::relationships::FinderResponse> {
                    ::core::convert::AsRef::<$crate::relationships::SemanticNode>::as_ref(self)
                        .find($rel, options)
                }

                pub fn $ids(
                    &self,
                    options: $crate::relationships::FinderOptions,
                ) -> $crate::ModelResult<::std::vec::Vec<::std::string::String>> {
                    ::core::convert::AsRef::<$crate::relationships::SemanticNode>::as_ref(self)
                        .find_ids($rel, options)
                }

                pub fn $query(&self) -> $crate::ModelResult<$crate::search::SearchQuery> {
                    ::core::convert::AsRef::<$crate::relationships::SemanticNode>::as_ref(self)
                        .relationship_query($rel)
                }

                pub fn $from_solr(
                    &self,
                    options: $crate::relationships::FinderOptions,
                ) -> $crate::ModelResult<::std::vec::Vec<$crate::relationships::IndexedObject>> {
                    ::core::convert::AsRef::<$crate::relationships::SemanticNode>::as_ref(self)
                        .find_from_solr($rel, options)
                }

                $(
                    pub fn $append(&mut self, target: &str) -> $crate::ModelResult<()> {
                        ::core::convert::AsMut::<$crate::relationships::SemanticNode>::as_mut(self)
                            .append($rel, target)
                    }

                    pub fn $remove(&mut self, target: &str) -> $crate::ModelResult<bool> {
                        ::core::convert::AsMut::<$crate::relationships::SemanticNode>::as_mut(self)
                            .remove($rel, target)
                    }
                )?
            )*
        }
    };
}
