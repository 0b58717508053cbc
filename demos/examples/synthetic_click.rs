// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-phase delegated clicks on a parent with two children.
//!
//! The parent and both children register `onClickCapture` and `onClick`. The first child stops
//! propagation in its bubble handler, so clicking it never reaches the parent's bubble handler,
//! while clicking the second child runs all four handlers.
//!
//! Run:
//! - `cargo run -p trellis_demos --example synthetic_click`

use trellis::{Props, SyntheticEvent, create_element, create_root};
use trellis_host::{Document, Host, NativeEvent};

fn describe(label: &str, event: &SyntheticEvent<'_>) {
    println!(
        "  {label:<22} current={:?} target={:?}",
        event.current_target(),
        event.target()
    );
}

fn say(label: &'static str) -> impl Fn(&mut SyntheticEvent<'_>) + 'static {
    move |event: &mut SyntheticEvent<'_>| describe(label, event)
}

fn main() {
    let mut doc = Document::new();
    let container = doc.create_node("div").unwrap();
    let mut root = create_root(&mut doc, container).unwrap();

    let first = create_element(
        "div",
        Props::new()
            .on_click_capture(say("111 capture"))
            .on_click(|event| {
                describe("111 bubble (stops)", event);
                event.stop_propagation();
            }),
        "111",
    );
    let second = create_element(
        "div",
        Props::new()
            .on_click_capture(say("222 capture"))
            .on_click(say("222 bubble")),
        "222",
    );
    let app = create_element(
        "div",
        Props::new()
            .attr("id", "app")
            .on_click_capture(say("parent capture"))
            .on_click(say("parent bubble")),
        [first, second],
    );
    root.render(&mut doc, app).unwrap();

    let children: Vec<_> = {
        let tree = root.tree().unwrap();
        tree.children_of(tree.root()).to_vec()
    };
    for (label, id) in [("111", children[0]), ("222", children[1])] {
        let node = root.node_of(id).unwrap();
        println!("\n== click {label} ({node:?}) ==");
        let event = doc.click(node).unwrap();
        println!(
            "  native: propagation_stopped={} default_prevented={}",
            event.propagation_stopped(),
            event.default_prevented()
        );
    }

    let removed = root.unmount(&mut doc);
    println!("\nunmounted, removed {removed} listeners from the container");
    let node = doc.children_of(container)[0];
    doc.click(node).unwrap();
    println!("click after unmount ran no handlers");
}
