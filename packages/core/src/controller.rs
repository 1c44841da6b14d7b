use crate::{
    load_image, reveal_action, Dom, ElementKind, LazyImage, LoadError, Outcome, RevealAction,
};

/// Load `lazy.src` and reveal `lazy.image` once the host has fetched it.
///
/// A throwaway probe observes the fetch for plain and generic targets, so nothing visible changes
/// until the resource is ready. Composite targets are observed through the `<img>` they already
/// contain.
///
/// Exactly one of `lazyloadcomplete` or `lazyloaderror` is dispatched on the target, once. Failures
/// never escape: the returned [`Outcome`] only reports which of the two was sent.
pub async fn lazy_load_image<D: Dom>(dom: &D, lazy: &LazyImage<D::Node>) -> Outcome {
    let kind = dom.classify(&lazy.image);
    let reveal = reveal_action(kind);

    let outcome = match load_and_reveal(dom, lazy, kind, reveal).await {
        Ok(()) => Outcome::Complete,
        Err(err) => {
            tracing::debug!("lazy image failed: {err}");
            Outcome::Error
        }
    };

    let signal = outcome.signal();
    if let Err(err) = dom.dispatch(&lazy.image, signal) {
        tracing::warn!("could not dispatch {}: {err}", signal.name());
    }

    outcome
}

async fn load_and_reveal<D: Dom>(
    dom: &D,
    lazy: &LazyImage<D::Node>,
    kind: ElementKind,
    reveal: RevealAction,
) -> Result<(), LoadError> {
    let probe = match kind {
        ElementKind::Composite => dom
            .nested_image(&lazy.image)
            .ok_or(LoadError::MissingNestedImage)?,
        ElementKind::Image | ElementKind::Generic => dom.create_probe()?,
    };

    load_image(dom, &lazy.src, &probe).await?;

    if reveal != RevealAction::None {
        let src = lazy.src.primary().ok_or(LoadError::EmptySource)?;
        reveal.apply(dom, &lazy.image, src)?;
    }

    Ok(())
}
