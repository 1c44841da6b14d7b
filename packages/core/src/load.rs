//! Waiting on a probe's native load/error notification.

use std::{
    cell::{Cell, RefCell},
    future::Future,
    pin::Pin,
    rc::Rc,
    task::{Context, Poll},
};

use futures_channel::oneshot;

use crate::{Dom, DomError, ElementKind, NativeEvent, Source};

/// The attribute a composite's children receive their candidate through.
pub(crate) const CANDIDATE_ATTRIBUTE: &str = "srcset";

/// Why a load attempt did not complete.
///
/// Every variant surfaces to observers as the same `lazyloaderror` signal; the distinction is only
/// kept for logging and for callers driving [`load_image`] directly.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The host reported a native `error` on the probe.
    #[error("the image failed to load")]
    Failed,

    /// The listeners were dropped before the host reported anything.
    #[error("the probe was abandoned before it settled")]
    Abandoned,

    /// A composite target contains no `<img>` to observe.
    #[error("the composite element has no nested image")]
    MissingNestedImage,

    /// There was nothing to assign to the probe.
    #[error("the source is empty")]
    EmptySource,

    /// The probe sits inside a composite but the candidate list stops before reaching it.
    #[error("no srcset candidate for the nested image at index {index}")]
    MissingCandidate {
        /// The probe's position among the composite's children.
        index: usize,
    },

    /// The host rejected a document mutation.
    #[error(transparent)]
    Dom(#[from] DomError),
}

type Settlement = Result<(), LoadError>;

/// Owns the load/error listener pair on a probe.
///
/// The pair is detached exactly once: either by whichever handler fires first, or when the guard
/// is dropped.
struct ListenerGuard<D: Dom> {
    dom: D,
    probe: D::Node,
    listeners: RefCell<Vec<D::Listener>>,
    sender: Cell<Option<oneshot::Sender<Settlement>>>,
    released: Cell<bool>,
}

impl<D: Dom> ListenerGuard<D> {
    fn new(dom: D, probe: D::Node, sender: oneshot::Sender<Settlement>) -> Self {
        Self {
            dom,
            probe,
            listeners: RefCell::new(Vec::with_capacity(2)),
            sender: Cell::new(Some(sender)),
            released: Cell::new(false),
        }
    }

    fn push(&self, listener: D::Listener) {
        self.listeners.borrow_mut().push(listener);
    }

    fn release(&self) {
        if self.released.replace(true) {
            return;
        }
        for listener in self.listeners.borrow().iter() {
            self.dom.remove_listener(&self.probe, listener);
        }
        tracing::trace!("released probe listeners");
    }

    /// Detach both listeners, then hand the result to the waiting future.
    fn settle(&self, event: NativeEvent) {
        self.release();
        let Some(sender) = self.sender.take() else {
            return;
        };
        let settlement = match event {
            NativeEvent::Load => Ok(()),
            NativeEvent::Error => Err(LoadError::Failed),
        };
        tracing::debug!(event = event.name(), "probe settled");
        _ = sender.send(settlement);
    }
}

impl<D: Dom> Drop for ListenerGuard<D> {
    fn drop(&mut self) {
        self.release();
    }
}

/// The future returned by [`load_image`].
///
/// Resolves once with `Ok(())` on `load` or an error on `error`. The listeners are gone by the
/// time it resolves, and dropping it early removes them too.
#[must_use = "the load result is only observable by awaiting it"]
pub struct LoadImage<D: Dom> {
    guard: Option<Rc<ListenerGuard<D>>>,
    receiver: Option<oneshot::Receiver<Settlement>>,
    early: Option<LoadError>,
}

impl<D: Dom> LoadImage<D> {
    fn failed(error: LoadError) -> Self {
        Self {
            guard: None,
            receiver: None,
            early: Some(error),
        }
    }
}

impl<D: Dom> Future for LoadImage<D> {
    type Output = Settlement;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if let Some(error) = self.early.take() {
            self.guard = None;
            return Poll::Ready(Err(error));
        }

        let Some(receiver) = self.receiver.as_mut() else {
            return Poll::Ready(Err(LoadError::Abandoned));
        };

        match Pin::new(receiver).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(settlement) => {
                self.receiver = None;
                self.guard = None;
                Poll::Ready(settlement.unwrap_or(Err(LoadError::Abandoned)))
            }
        }
    }
}

/// Start loading `src` through `probe` and wait for the host to report back.
///
/// The listeners are attached and the source written before this returns, so a cached resource
/// that completes immediately is never missed. If the probe sits inside a composite container, each
/// of the container's children gets the same-index candidate as its `srcset`; otherwise the probe's
/// `src` is set to the primary source.
pub fn load_image<D: Dom>(dom: &D, src: &Source, probe: &D::Node) -> LoadImage<D> {
    let (sender, receiver) = oneshot::channel();
    let guard = Rc::new(ListenerGuard::new(dom.clone(), probe.clone(), sender));

    for event in [NativeEvent::Load, NativeEvent::Error] {
        let weak = Rc::downgrade(&guard);
        let handler = Box::new(move || {
            if let Some(guard) = weak.upgrade() {
                guard.settle(event);
            }
        });

        match dom.add_listener(probe, event, handler) {
            Ok(listener) => guard.push(listener),
            Err(err) => return LoadImage::failed(err.into()),
        }
        tracing::trace!(event = event.name(), "listening on probe");
    }

    if let Err(err) = assign_source(dom, src, probe) {
        return LoadImage::failed(err);
    }

    LoadImage {
        guard: Some(guard),
        receiver: Some(receiver),
        early: None,
    }
}

fn assign_source<D: Dom>(dom: &D, src: &Source, probe: &D::Node) -> Result<(), LoadError> {
    let composite = dom
        .parent(probe)
        .filter(|parent| dom.classify(parent) == ElementKind::Composite);

    let Some(parent) = composite else {
        let primary = src.primary().ok_or(LoadError::EmptySource)?;
        tracing::trace!(src = primary, "assigning src to probe");
        dom.set_attribute(probe, "src", primary)?;
        return Ok(());
    };

    let children = dom.children(&parent);

    // the probe must get a candidate, or the host never starts a fetch and nothing settles
    if let Some(index) = children.iter().position(|child| child == probe) {
        if src.candidate(index).is_none() {
            return Err(LoadError::MissingCandidate { index });
        }
    }

    if let Source::Candidates(candidates) = src {
        if candidates.len() != children.len() {
            tracing::warn!(
                candidates = candidates.len(),
                children = children.len(),
                "candidate list does not match the composite's children"
            );
        }
    }

    for (index, child) in children.iter().enumerate() {
        let Some(candidate) = src.candidate(index) else {
            break;
        };
        tracing::trace!(index, candidate, "assigning srcset to composite child");
        dom.set_attribute(child, CANDIDATE_ATTRIBUTE, candidate)?;
    }

    Ok(())
}
