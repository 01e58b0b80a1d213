// Copyright 2025 the TileScope Authors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Feeding a stream of events through drag tracking and bindings.

use kurbo::{Point, Vec2};
use tilescope_input::drag::DragState;
use tilescope_input::{Command, InputEvent, Key, KeyBindings, Modifiers, PointerButton};

fn pan_total(events: &[InputEvent]) -> Vec2 {
    let mut drag = DragState::default();
    let mut total = Vec2::ZERO;
    for event in events {
        match *event {
            InputEvent::PointerDown {
                pos,
                button: PointerButton::Left,
                ..
            } => drag.start(pos),
            InputEvent::PointerMove { pos } => {
                if let Some(delta) = drag.update(pos) {
                    total += delta;
                }
            }
            InputEvent::PointerUp {
                button: PointerButton::Left,
                ..
            } => drag.end(),
            _ => {}
        }
    }
    total
}

#[test]
fn only_moves_between_press_and_release_pan() {
    let events = [
        InputEvent::PointerMove {
            pos: Point::new(5.0, 5.0),
        },
        InputEvent::PointerDown {
            pos: Point::new(10.0, 10.0),
            button: PointerButton::Left,
            modifiers: Modifiers::empty(),
        },
        InputEvent::PointerMove {
            pos: Point::new(20.0, 15.0),
        },
        InputEvent::PointerMove {
            pos: Point::new(30.0, 5.0),
        },
        InputEvent::PointerUp {
            pos: Point::new(30.0, 5.0),
            button: PointerButton::Left,
        },
        InputEvent::PointerMove {
            pos: Point::new(90.0, 90.0),
        },
    ];
    assert_eq!(pan_total(&events), Vec2::new(20.0, -5.0));
}

#[test]
fn right_button_does_not_pan() {
    let events = [
        InputEvent::PointerDown {
            pos: Point::new(10.0, 10.0),
            button: PointerButton::Right,
            modifiers: Modifiers::empty(),
        },
        InputEvent::PointerMove {
            pos: Point::new(20.0, 15.0),
        },
    ];
    assert_eq!(pan_total(&events), Vec2::ZERO);
}

#[test]
fn key_events_resolve_to_commands() {
    let keys = KeyBindings::default();
    let events = [
        (Key::Char('G'), Modifiers::SHIFT),
        (Key::Char('o'), Modifiers::CTRL),
        (Key::Char('e'), Modifiers::CTRL),
        (Key::Char('x'), Modifiers::empty()),
    ];
    let commands: Vec<_> = events
        .iter()
        .map(|&(key, modifiers)| keys.command_for(key, modifiers))
        .collect();
    assert_eq!(
        commands,
        [
            Some(Command::ToggleGrid),
            Some(Command::OpenImage),
            Some(Command::Export),
            None
        ]
    );
}
