use futures::executor::block_on;
use lazy_image_core::{
    load_image, mock::MockDom, Dom, DomError, ElementKind, LoadError, NativeEvent, Source,
};
use pretty_assertions::assert_eq;

#[test]
fn listens_and_assigns_before_first_poll() {
    let dom = MockDom::new();
    let probe = dom.create_element("img", ElementKind::Image);

    let load = load_image(&dom, &Source::from("a.jpg"), &probe);

    assert_eq!(dom.listener_count(probe), 2);
    assert_eq!(dom.attribute(probe, "src").as_deref(), Some("a.jpg"));
    drop(load);
}

#[test]
fn load_resolves_and_detaches() {
    let dom = MockDom::new();
    let probe = dom.create_element("img", ElementKind::Image);
    let load = load_image(&dom, &Source::from("a.jpg"), &probe);

    assert_eq!(dom.fire(probe, NativeEvent::Load), 1);
    assert_eq!(dom.listener_count(probe), 0);

    assert_eq!(block_on(load), Ok(()));
}

#[test]
fn error_rejects_and_detaches() {
    let dom = MockDom::new();
    let probe = dom.create_element("img", ElementKind::Image);
    let load = load_image(&dom, &Source::from("missing.jpg"), &probe);

    dom.fire(probe, NativeEvent::Error);
    assert_eq!(dom.listener_count(probe), 0);

    assert_eq!(block_on(load), Err(LoadError::Failed));
}

#[test]
fn later_events_are_ignored() {
    let dom = MockDom::new();
    let probe = dom.create_element("img", ElementKind::Image);
    let load = load_image(&dom, &Source::from("a.jpg"), &probe);

    dom.fire(probe, NativeEvent::Load);
    assert_eq!(dom.fire(probe, NativeEvent::Error), 0);
    assert_eq!(dom.fire(probe, NativeEvent::Load), 0);

    assert_eq!(block_on(load), Ok(()));
}

#[test]
fn dropping_the_future_detaches() {
    let dom = MockDom::new();
    let probe = dom.create_element("img", ElementKind::Image);

    drop(load_image(&dom, &Source::from("a.jpg"), &probe));

    assert_eq!(dom.listener_count(probe), 0);
    assert_eq!(dom.fire(probe, NativeEvent::Load), 0);
}

#[test]
fn composite_children_receive_candidates() {
    let dom = MockDom::new();
    let (picture, image) = dom.create_picture(1);
    let children = dom.children(&picture);

    let load = load_image(&dom, &Source::from(["a.jpg", "b.jpg"]), &image);

    assert_eq!(dom.attribute(children[0], "srcset").as_deref(), Some("a.jpg"));
    assert_eq!(dom.attribute(children[1], "srcset").as_deref(), Some("b.jpg"));
    assert_eq!(dom.attribute(image, "src"), None);
    assert_eq!(dom.attribute(picture, "srcset"), None);

    dom.fire(image, NativeEvent::Load);
    assert_eq!(block_on(load), Ok(()));
}

#[test]
fn single_source_fills_every_composite_child() {
    let dom = MockDom::new();
    let (picture, image) = dom.create_picture(2);

    let _load = load_image(&dom, &Source::from("a.jpg"), &image);

    for child in dom.children(&picture) {
        assert_eq!(dom.attribute(child, "srcset").as_deref(), Some("a.jpg"));
    }
}

#[test]
fn candidate_list_short_of_the_image_fails() {
    let dom = MockDom::new();
    let (picture, image) = dom.create_picture(2);
    let source = dom.children(&picture)[0];

    let load = load_image(&dom, &Source::from(["a.jpg"]), &image);

    assert_eq!(dom.listener_count(image), 0);
    assert_eq!(dom.attribute(source, "srcset"), None);
    assert_eq!(
        block_on(load),
        Err(LoadError::MissingCandidate { index: 2 })
    );
}

#[test]
fn empty_candidate_list_fails_inside_a_composite() {
    let dom = MockDom::new();
    let (_, image) = dom.create_picture(1);

    let load = load_image(&dom, &Source::Candidates(vec![]), &image);

    assert_eq!(dom.listener_count(image), 0);
    assert_eq!(
        block_on(load),
        Err(LoadError::MissingCandidate { index: 1 })
    );
}

#[test]
fn extra_candidates_are_ignored() {
    let dom = MockDom::new();
    let (picture, image) = dom.create_picture(0);

    let load = load_image(&dom, &Source::from(["a.jpg", "b.jpg"]), &image);

    assert_eq!(dom.children(&picture).len(), 1);
    assert_eq!(dom.attribute(image, "srcset").as_deref(), Some("a.jpg"));
    dom.fire(image, NativeEvent::Load);
    assert_eq!(block_on(load), Ok(()));
}

#[test]
fn empty_source_fails_without_leaking_listeners() {
    let dom = MockDom::new();
    let probe = dom.create_element("img", ElementKind::Image);

    let load = load_image(&dom, &Source::Candidates(vec![]), &probe);

    assert_eq!(dom.listener_count(probe), 0);
    assert_eq!(block_on(load), Err(LoadError::EmptySource));
}

#[test]
fn rejected_write_fails_without_leaking_listeners() {
    let dom = MockDom::new();
    dom.reject_attribute("src", "blocked by policy");
    let probe = dom.create_element("img", ElementKind::Image);

    let load = load_image(&dom, &Source::from("a.jpg"), &probe);

    assert_eq!(dom.listener_count(probe), 0);
    assert_eq!(
        block_on(load),
        Err(LoadError::Dom(DomError::Attribute {
            name: "src".to_string(),
            message: "blocked by policy".to_string(),
        }))
    );
}
