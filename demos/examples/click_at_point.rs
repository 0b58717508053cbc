// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer clicks routed by hit testing, then delegated to element handlers.
//!
//! Each rendered node gets a rectangle in the document. `Document::click_at` hit tests a point,
//! dispatches a native click at the winning node, and the root replays it over the element tree.
//! Handlers read the pointer position from the synthetic event.
//!
//! Run:
//! - `cargo run -p trellis_demos --example click_at_point`

use kurbo::{Point, Rect};
use trellis::{Props, Root, RootConfig, SyntheticEvent, create_element};
use trellis_host::{Document, Host};

fn report(name: &'static str) -> impl Fn(&mut SyntheticEvent<'_>) + 'static {
    move |event: &mut SyntheticEvent<'_>| {
        let at = event.position().unwrap_or(Point::ORIGIN);
        println!(
            "  {name} {:?} {:?} at ({:.0}, {:.0})",
            event.event_type(),
            event.phase(),
            at.x,
            at.y
        );
    }
}

fn main() {
    let mut doc = Document::new();
    let container = doc.create_node("main").unwrap();
    let mut root = Root::with_config(&mut doc, container, RootConfig::new()).unwrap();

    let toolbar = create_element(
        "nav",
        Props::new().on_click_capture(report("toolbar")),
        [
            create_element("button", Props::new().on_click(report("open")), "Open"),
            create_element("button", Props::new().on_click(report("save")), "Save"),
        ],
    );
    root.render(&mut doc, toolbar).unwrap();

    let layout = [
        Rect::new(0.0, 0.0, 200.0, 40.0),
        Rect::new(10.0, 5.0, 90.0, 35.0),
        Rect::new(110.0, 5.0, 190.0, 35.0),
    ];
    let ids: Vec<_> = root.tree().unwrap().ids().collect();
    for (id, bounds) in ids.into_iter().zip(layout) {
        let node = root.node_of(id).unwrap();
        doc.set_bounds(node, bounds).unwrap();
    }

    for point in [
        Point::new(20.0, 20.0),
        Point::new(150.0, 20.0),
        Point::new(100.0, 20.0),
        Point::new(300.0, 20.0),
    ] {
        println!("\n== click at ({:.0}, {:.0}) ==", point.x, point.y);
        match doc.click_at(point).unwrap() {
            Some(event) => println!("  native target {:?}", event.target()),
            None => println!("  nothing under the pointer"),
        }
    }
}
