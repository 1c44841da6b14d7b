use crate::{Dom, DomError, ElementKind};

/// What to do to a target once its source has loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealAction {
    /// Write the source into the target's `src`.
    ShowImage,
    /// Write `url(<source>)` into the target's `background-image`.
    ShowBackgroundImage,
    /// Nothing; the composite's children already carry their candidates.
    None,
}

/// Select the reveal for a target of the given kind.
pub fn reveal_action(kind: ElementKind) -> RevealAction {
    match kind {
        ElementKind::Image => RevealAction::ShowImage,
        ElementKind::Composite => RevealAction::None,
        ElementKind::Generic => RevealAction::ShowBackgroundImage,
    }
}

impl RevealAction {
    /// Run the action against `target`.
    pub fn apply<D: Dom>(self, dom: &D, target: &D::Node, src: &str) -> Result<(), DomError> {
        match self {
            RevealAction::ShowImage => show_image(dom, target, src),
            RevealAction::ShowBackgroundImage => show_background_image(dom, target, src),
            RevealAction::None => Ok(()),
        }
    }
}

/// Reveal a plain image by pointing its `src` at the loaded resource.
pub fn show_image<D: Dom>(dom: &D, image: &D::Node, src: &str) -> Result<(), DomError> {
    dom.set_attribute(image, "src", src)
}

/// Reveal any other element by using the loaded resource as its background.
pub fn show_background_image<D: Dom>(
    dom: &D,
    element: &D::Node,
    src: &str,
) -> Result<(), DomError> {
    dom.set_style(element, "background-image", &format!("url({src})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_its_own_action() {
        assert_eq!(reveal_action(ElementKind::Image), RevealAction::ShowImage);
        assert_eq!(reveal_action(ElementKind::Composite), RevealAction::None);
        assert_eq!(
            reveal_action(ElementKind::Generic),
            RevealAction::ShowBackgroundImage
        );
    }
}
