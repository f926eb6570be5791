use std::rc::Rc;

use scrollstory::lazy::{LazyLoader, PENDING_SOURCE};
use scrollstory::surface::memory::{Command, MemNode, MemorySurface};
use scrollstory::surface::Surface;

fn gallery() -> (Rc<MemorySurface>, MemNode, MemNode) {
    let surface = Rc::new(MemorySurface::new());
    let body = surface.root();
    let first = surface.append(body, "img", "", &[(PENDING_SOURCE, "x.jpg")]);
    let second = surface.append(body, "img", "", &[(PENDING_SOURCE, "y.jpg")]);
    surface.append(body, "img", "", &[("src", "eager.jpg")]);
    surface.append(body, "div", "", &[(PENDING_SOURCE, "not-an-image.jpg")]);
    (surface, first, second)
}

#[test]
fn collects_only_images_with_a_pending_source() {
    let (surface, first, second) = gallery();
    let loader = LazyLoader::new(Rc::clone(&surface), true);
    assert_eq!(loader.images(), &[first, second]);
    assert!(surface.commands().is_empty());
}

#[test]
fn visible_image_swaps_in_its_source_exactly_once() {
    let (surface, first, _) = gallery();
    let loader = LazyLoader::new(Rc::clone(&surface), true);

    assert!(loader.resolve(&first));
    assert_eq!(surface.attribute(&first, "src").as_deref(), Some("x.jpg"));
    assert_eq!(surface.attribute(&first, PENDING_SOURCE), None);

    assert!(!loader.resolve(&first));
    let writes = surface
        .commands()
        .iter()
        .filter(|c| matches!(c, Command::SetAttribute { node, .. } if *node == first))
        .count();
    assert_eq!(writes, 1);
}

#[test]
fn without_observation_every_image_loads_immediately() {
    let (surface, first, second) = gallery();
    let _loader = LazyLoader::new(Rc::clone(&surface), false);

    assert_eq!(surface.attribute(&first, "src").as_deref(), Some("x.jpg"));
    assert_eq!(surface.attribute(&second, "src").as_deref(), Some("y.jpg"));
    assert_eq!(surface.attribute(&first, PENDING_SOURCE), None);
    assert_eq!(surface.attribute(&second, PENDING_SOURCE), None);
}

#[test]
fn images_added_after_construction_are_ignored() {
    let (surface, first, second) = gallery();
    let loader = LazyLoader::new(Rc::clone(&surface), true);
    let late = surface.append(surface.root(), "img", "", &[(PENDING_SOURCE, "late.jpg")]);

    assert_eq!(loader.images(), &[first, second]);
    assert!(!loader.images().contains(&late));
}
