use std::fmt;
use std::sync::Arc;

/// One step of a resolver path: an object field name or a list index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl PathSegment {
    pub fn is_index(&self) -> bool {
        matches!(self, PathSegment::Index(_))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// The logical position of a field in the result tree, as an immutable
/// linked list from leaf to root. Cloning is cheap; siblings share their
/// prefix.
#[derive(Debug, Clone)]
pub struct ResolverPath {
    node: Arc<PathNode>,
}

#[derive(Debug)]
struct PathNode {
    segment: PathSegment,
    prev: Option<ResolverPath>,
}

impl ResolverPath {
    /// A root-level field, parented directly under the operation.
    pub fn field(name: impl Into<String>) -> Self {
        Self::new(PathSegment::Field(name.into()), None)
    }

    pub fn child_field(&self, name: impl Into<String>) -> Self {
        Self::new(PathSegment::Field(name.into()), Some(self.clone()))
    }

    pub fn child_index(&self, index: usize) -> Self {
        Self::new(PathSegment::Index(index), Some(self.clone()))
    }

    fn new(segment: PathSegment, prev: Option<ResolverPath>) -> Self {
        ResolverPath {
            node: Arc::new(PathNode { segment, prev }),
        }
    }

    pub fn segment(&self) -> &PathSegment {
        &self.node.segment
    }

    pub fn prev(&self) -> Option<&ResolverPath> {
        self.node.prev.as_ref()
    }

    /// Segments in root-to-leaf order.
    pub fn segments(&self) -> Vec<&PathSegment> {
        let mut segments = Vec::new();
        let mut current = Some(self);
        while let Some(path) = current {
            segments.push(path.segment());
            current = path.prev();
        }
        segments.reverse();
        segments
    }

    /// The index to show in the span display name (`Type.field[2]`): set when
    /// this field sits directly under a list element.
    pub fn list_index_suffix(&self) -> Option<usize> {
        match self.prev().map(|p| p.segment()) {
            Some(PathSegment::Index(index)) => Some(*index),
            _ => None,
        }
    }
}

impl PartialEq for ResolverPath {
    fn eq(&self, other: &Self) -> bool {
        self.segments() == other.segments()
    }
}

impl Eq for ResolverPath {}

impl fmt::Display for ResolverPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments().iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

/// Registry identity of a resolver span.
///
/// A trailing list index is dropped on construction: the elements of a list
/// have no resolver (and therefore no span) of their own, so the fields of
/// `products.2` must find their parent under the key of `products`. Interior
/// indices are kept, `products.2.image.url` stays distinct per element.
///
/// Identity is the segment sequence itself. A field literally named `"a.b"`
/// can never collide with the nested path `a` → `b`; the dotted rendering is
/// only a display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpanKey {
    segments: Box<[PathSegment]>,
}

impl SpanKey {
    pub fn from_path(path: &ResolverPath) -> Self {
        let mut segments: Vec<PathSegment> = path.segments().into_iter().cloned().collect();
        if segments.last().is_some_and(PathSegment::is_index) {
            segments.pop();
        }
        SpanKey {
            segments: segments.into_boxed_slice(),
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

impl fmt::Display for SpanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_stable_for_equal_paths() {
        let a = ResolverPath::field("product").child_field("image");
        let b = ResolverPath::field("product").child_field("image");
        assert_eq!(a, b);
        assert_eq!(SpanKey::from_path(&a), SpanKey::from_path(&b));
        assert_eq!(
            SpanKey::from_path(&a).to_string(),
            SpanKey::from_path(&b).to_string()
        );
    }

    #[test]
    fn trailing_list_index_is_dropped() {
        let list_field = ResolverPath::field("product").child_field("image");
        let element = list_field.child_index(0);
        assert_eq!(SpanKey::from_path(&element), SpanKey::from_path(&list_field));
        assert_eq!(SpanKey::from_path(&element).to_string(), "product.image");
    }

    #[test]
    fn interior_list_index_is_kept() {
        let url = ResolverPath::field("product")
            .child_field("image")
            .child_index(2)
            .child_field("url");
        assert_eq!(SpanKey::from_path(&url).to_string(), "product.image.2.url");
    }

    #[test]
    fn field_names_containing_the_separator_do_not_collide() {
        let nested = ResolverPath::field("a").child_field("b");
        let flat = ResolverPath::field("a.b");
        assert_eq!(SpanKey::from_path(&nested).to_string(), "a.b");
        assert_eq!(SpanKey::from_path(&flat).to_string(), "a.b");
        assert_ne!(SpanKey::from_path(&nested), SpanKey::from_path(&flat));
    }

    #[test]
    fn list_index_suffix_only_under_list_elements() {
        let list_field = ResolverPath::field("products");
        let name = list_field.child_index(2).child_field("name");
        assert_eq!(name.list_index_suffix(), Some(2));
        assert_eq!(list_field.list_index_suffix(), None);
        assert_eq!(
            list_field.child_field("pageInfo").list_index_suffix(),
            None
        );
    }

    #[test]
    fn display_label_keeps_every_segment() {
        let url = ResolverPath::field("products")
            .child_index(1)
            .child_field("image")
            .child_field("url");
        assert_eq!(url.to_string(), "products.1.image.url");
    }
}
