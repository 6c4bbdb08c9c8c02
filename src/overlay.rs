// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::{Cell, RefCell};

/// Show/hide toggle for a modal element.
pub trait Overlay {
    fn show(&self, body: &str);
    fn hide(&self);
}

/// The `#modaleFile` receipt modal. Keeps its own visibility so callers can
/// inspect what the user would see.
#[derive(Debug, Default)]
pub struct ModalOverlay {
    visible: Cell<bool>,
    body: RefCell<String>,
    shows: Cell<usize>,
}

impl ModalOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    pub fn body(&self) -> String {
        self.body.borrow().clone()
    }

    pub fn show_count(&self) -> usize {
        self.shows.get()
    }
}

impl Overlay for ModalOverlay {
    fn show(&self, body: &str) {
        *self.body.borrow_mut() = body.to_string();
        self.visible.set(true);
        self.shows.set(self.shows.get() + 1);
    }

    fn hide(&self) {
        self.visible.set(false);
    }
}
