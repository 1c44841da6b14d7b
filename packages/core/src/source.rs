/// The source a lazy image should eventually display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A single URL, used for plain images and background images.
    Single(String),

    /// One `srcset` candidate per child of a composite container, in document order.
    Candidates(Vec<String>),
}

impl Source {
    /// The URL used for `src` and `background-image`.
    ///
    /// A candidate list contributes its first entry.
    pub fn primary(&self) -> Option<&str> {
        match self {
            Source::Single(src) => Some(src),
            Source::Candidates(candidates) => candidates.first().map(String::as_str),
        }
    }

    /// The `srcset` candidate for the child at `index`.
    ///
    /// A single URL applies to every child.
    pub fn candidate(&self, index: usize) -> Option<&str> {
        match self {
            Source::Single(src) => Some(src),
            Source::Candidates(candidates) => candidates.get(index).map(String::as_str),
        }
    }
}

impl From<&str> for Source {
    fn from(src: &str) -> Self {
        Source::Single(src.to_string())
    }
}

impl From<String> for Source {
    fn from(src: String) -> Self {
        Source::Single(src)
    }
}

impl From<Vec<String>> for Source {
    fn from(candidates: Vec<String>) -> Self {
        Source::Candidates(candidates)
    }
}

impl<const N: usize> From<[&str; N]> for Source {
    fn from(candidates: [&str; N]) -> Self {
        Source::Candidates(candidates.iter().map(|c| c.to_string()).collect())
    }
}

/// The context of one invocation: the target element and what it should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LazyImage<N> {
    /// The element that is revealed and receives the outcome signal.
    pub image: N,
    /// The source to fetch.
    pub src: Source,
}

impl<N> LazyImage<N> {
    /// Pair a target with its source.
    pub fn new(image: N, src: impl Into<Source>) -> Self {
        Self {
            image,
            src: src.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_source_applies_to_every_child() {
        let src = Source::from("a.jpg");
        assert_eq!(src.primary(), Some("a.jpg"));
        assert_eq!(src.candidate(0), Some("a.jpg"));
        assert_eq!(src.candidate(3), Some("a.jpg"));
    }

    #[test]
    fn candidates_are_index_aligned() {
        let src = Source::from(["a.jpg", "b.jpg"]);
        assert_eq!(src.primary(), Some("a.jpg"));
        assert_eq!(src.candidate(1), Some("b.jpg"));
        assert_eq!(src.candidate(2), None);
        assert_eq!(Source::Candidates(vec![]).primary(), None);
    }
}
