// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted scrub over an alphabet rail.
//!
//! Lays out a rail the way a host toolkit would (including a second, jittery
//! layout pass), drags a pointer from `#` down past `M`, releases, and then
//! steps the release halo at 60fps until it finishes. Prints the selection
//! callbacks and the halos in each frame's draw list.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example rail_scrub`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Size;
use understory_alphabet_rail::render::DrawOp;
use understory_alphabet_rail::{
    AlphabetRail, Letter, MonospaceMeasure, PointerEvent, RailConfig, SizeConstraint,
};

const FRAME_MS: u64 = 16;

fn print_halos(rail: &AlphabetRail, label: &str) {
    let halos: Vec<String> = rail
        .render()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Halo { circle, color } => Some(format!(
                "y={:.1} r={:.2} a={}",
                circle.center.y, circle.radius, color.a
            )),
            DrawOp::Glyph { .. } => None,
        })
        .collect();
    println!("  [{label}] halos: {halos:?}");
}

fn main() {
    env_logger::init();

    let mut rail = AlphabetRail::new(RailConfig::default());
    rail.set_available_letters(["a", "c", "m", "s", "z"]);

    let picked = Rc::new(RefCell::new(Vec::<Letter>::new()));
    let sink = picked.clone();
    rail.set_on_letter_selected(move |letter| {
        println!("  -> jump list to {letter}");
        sink.borrow_mut().push(letter);
    });

    // Two layout passes; the second proposes a different height and is ignored.
    let measure = MonospaceMeasure::default();
    let first = rail.measure(
        SizeConstraint::AtMost(120.0),
        SizeConstraint::Exact(810.0),
        &measure,
    );
    let second = rail.measure(
        SizeConstraint::AtMost(120.0),
        SizeConstraint::Exact(760.0),
        &measure,
    );
    println!("layout: first {first:?}, second {second:?}");
    rail.set_bounds(Size::new(second.width, second.height));
    println!("text size: {:.1}", rail.text_size());

    let slot = rail.geometry().slot_extent();
    let mut now = 0;
    rail.handle_pointer(PointerEvent::Down { y: 2.0 }, now);
    let mut y = 2.0;
    while y < 14.0 * slot {
        now += FRAME_MS;
        y += slot / 3.0;
        rail.handle_pointer(PointerEvent::Move { y }, now);
        rail.tick(now);
    }
    print_halos(&rail, "dragging");

    now += FRAME_MS;
    rail.handle_pointer(PointerEvent::Up, now);
    print_halos(&rail, "released");

    while rail.is_animating() {
        now += FRAME_MS;
        rail.tick(now);
        if rail.take_redraw_request() {
            print_halos(&rail, &format!("t={now}"));
        }
    }

    log::info!("selected {} letters: {:?}", picked.borrow().len(), picked.borrow());
    rail.detach();
}
