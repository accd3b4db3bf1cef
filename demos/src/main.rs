// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simulated text field with copy and paste.
//!
//! The UI thread declares a text field every frame. A platform thread plays the
//! role of the OS: it types text and shortcuts, and answers clipboard reads after
//! a delay. Everything it produces reaches the router through a channel drained
//! between frames.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos`

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use understory_input_router::{
    ClipboardEvent, EditEvent, Event, KeyEvent, KeyState, Modifiers, Router,
};
use understory_ops::{
    FocusOp, KeyInputOp, Ops, ReadClipboardOp, SoftKeyboardOp, Tag, WriteClipboardOp,
};

/// What the platform thread sends to the UI.
enum Platform {
    Key(KeyEvent),
    Edit(String),
    Clipboard(String),
}

#[derive(Default)]
struct TextField {
    text: String,
    focused: bool,
    paste_requested: bool,
    copy_requested: bool,
}

impl TextField {
    fn layout(&mut self, tag: Tag, ops: &mut Ops) {
        ops.push();
        KeyInputOp { tag }.add(ops);
        if !self.focused {
            FocusOp { focus: true }.add(ops);
        }
        SoftKeyboardOp { show: true }.add(ops);
        if self.paste_requested {
            ReadClipboardOp { tag }.add(ops);
        }
        if std::mem::take(&mut self.copy_requested) {
            WriteClipboardOp::new(self.text.as_str()).add(ops);
        }
        ops.pop();
    }

    fn update(&mut self, events: Vec<Event>) {
        for event in events {
            match event {
                Event::Focus(f) => self.focused = f.focus,
                Event::Edit(e) => self.text.push_str(&e.text),
                Event::Key(k) if k.state == KeyState::Press => {
                    if k.modifiers.contains(Modifiers::SHORTCUT) {
                        match k.name.as_str() {
                            "V" => self.paste_requested = true,
                            "C" => self.copy_requested = true,
                            _ => {}
                        }
                    }
                }
                Event::Clipboard(c) => {
                    self.paste_requested = false;
                    self.text.push_str(&c.text);
                }
                Event::Key(_) => {}
            }
        }
    }
}

fn shortcut(name: &str) -> KeyEvent {
    KeyEvent {
        name: name.to_owned(),
        modifiers: Modifiers::SHORTCUT,
        state: KeyState::Press,
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut router = Router::new();
    let field_tag = Tag::new();
    let mut field = TextField::default();
    let mut ops = Ops::new();

    let (to_ui, from_platform) = mpsc::channel();
    let (to_platform, clipboard_reads) = mpsc::channel::<()>();

    // The "OS": types, then asks to paste, then copy. Clipboard reads are
    // answered late, as on platforms with asynchronous clipboards.
    let platform = thread::spawn(move || {
        to_ui.send(Platform::Edit("hello ".to_owned())).ok();
        to_ui.send(Platform::Key(shortcut("V"))).ok();
        if clipboard_reads.recv().is_ok() {
            thread::sleep(Duration::from_millis(30));
            to_ui.send(Platform::Clipboard("world".to_owned())).ok();
        }
        thread::sleep(Duration::from_millis(30));
        to_ui.send(Platform::Key(shortcut("C"))).ok();
    });

    for frame in 0..20 {
        ops.reset();
        field.layout(field_tag, &mut ops);
        router.frame(&ops);
        field.update(router.events(field_tag));

        tracing::info!(
            frame,
            text = %field.text,
            focused = field.focused,
            keyboard = ?router.text_input_state(),
            "frame"
        );

        if router.read_clipboard() {
            tracing::info!("platform clipboard read requested");
            to_platform.send(()).ok();
        }
        if let Some(text) = router.write_clipboard() {
            tracing::info!(%text, "copied to the platform clipboard");
        }

        while let Ok(msg) = from_platform.try_recv() {
            match msg {
                Platform::Key(key) => router.add(key),
                Platform::Edit(text) => router.add(EditEvent { text }),
                Platform::Clipboard(text) => router.add(ClipboardEvent { text }),
            }
        }
        field.update(router.events(field_tag));
        thread::sleep(Duration::from_millis(10));
    }

    platform.join().ok();
}
